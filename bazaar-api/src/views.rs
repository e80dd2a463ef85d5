//! JSON view models for the buyer and admin screens.
//!
//! Every derived value (trust signals, price lines) is computed when the view is
//! built from the records just fetched; none of it is stored back on a record.

use bazaar_catalog::{
    reviews::verified_only,
    search::{search_products, search_reviews, search_sellers},
    PriceBreakdown, PricingEngine, SellerSummary, TrustSignals,
};
use bazaar_order::OrderConfirmation;
use bazaar_shared::{ImageRef, Product, Review, Seller};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::collections::HashMap;

const DATE_LABEL_FORMAT: &str = "%-d %B %Y";

const CATALOG_EXPLANATION: &str = "Shown because of seller trust score and low return rate";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCard {
    pub product_id: String,
    pub name: String,
    pub price: u64,
    pub primary_image: Option<ImageRef>,
    /// `None` renders as "not available".
    pub seller: Option<SellerSummary>,
    pub trust: TrustSignals,
    pub explanation: &'static str,
}

fn sellers_by_id(sellers: &[Seller]) -> HashMap<&str, &Seller> {
    sellers.iter().map(|s| (s.seller_id.as_str(), s)).collect()
}

pub fn catalog_cards(products: &[Product], sellers: &[Seller]) -> Vec<CatalogCard> {
    let sellers = sellers_by_id(sellers);

    products
        .iter()
        .map(|product| {
            let seller = sellers.get(product.seller_id.as_str()).copied();
            CatalogCard {
                product_id: product.product_id.clone(),
                name: product.name.clone(),
                price: product.price,
                primary_image: product.images.first().cloned(),
                seller: seller.map(SellerSummary::from_seller),
                trust: TrustSignals::derive(product, seller),
                explanation: CATALOG_EXPLANATION,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SellerPanel {
    #[serde(flatten)]
    pub summary: SellerSummary,
    pub total_orders: u64,
    pub disputes_won: u64,
    pub disputes_lost: u64,
    pub policy_violations: u64,
    pub penalties: u64,
    pub history_timeline: Vec<String>,
}

impl SellerPanel {
    fn from_seller(seller: &Seller) -> Self {
        Self {
            summary: SellerSummary::from_seller(seller),
            total_orders: seller.total_orders,
            disputes_won: seller.disputes_won,
            disputes_lost: seller.disputes_lost,
            policy_violations: seller.policy_violations,
            penalties: seller.penalties,
            history_timeline: seller.history_timeline.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub images: Vec<ImageRef>,
    pub seller: Option<SellerPanel>,
    pub trust: TrustSignals,
    pub breakdown: PriceBreakdown,
    pub verified_review_count: usize,
    pub verified_reviews: Vec<Review>,
    pub trade_offs: Vec<String>,
    pub return_reasons: Vec<String>,
    pub ideal_for: String,
}

pub fn product_detail(
    product: &Product,
    seller: Option<&Seller>,
    reviews: &[Review],
    pricing: &PricingEngine,
) -> ProductDetailView {
    let verified: Vec<Review> = verified_only(reviews).into_iter().cloned().collect();

    ProductDetailView {
        product_id: product.product_id.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        images: product.images.clone(),
        seller: seller.map(SellerPanel::from_seller),
        trust: TrustSignals::derive(product, seller),
        breakdown: pricing.breakdown(product.price),
        verified_review_count: verified.len(),
        verified_reviews: verified,
        trade_offs: product.trade_offs.clone(),
        return_reasons: product.return_reasons.clone(),
        ideal_for: format!(
            "Buyers looking for {} with verified quality and transparent seller history.",
            product.name.to_lowercase()
        ),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmationView {
    #[serde(flatten)]
    pub order: OrderConfirmation,
    pub payment_held_until_label: String,
    pub refund_available_until_label: String,
    pub message: &'static str,
}

/// Long-form date on the buyer's calendar.
fn date_label(instant: DateTime<Utc>, utc_offset_minutes: i32) -> String {
    match FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)) {
        Some(offset) => instant.with_timezone(&offset).format(DATE_LABEL_FORMAT).to_string(),
        None => instant.format(DATE_LABEL_FORMAT).to_string(),
    }
}

impl From<OrderConfirmation> for OrderConfirmationView {
    fn from(order: OrderConfirmation) -> Self {
        Self {
            payment_held_until_label: date_label(order.escrow.payment_hold_until, order.utc_offset_minutes),
            refund_available_until_label: date_label(order.escrow.refund_eligible_until, order.utc_offset_minutes),
            message: "Your order has been confirmed. Payment will be held in escrow until delivery is verified.",
            order,
        }
    }
}

// Admin listings

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminSellerRow {
    #[serde(flatten)]
    pub seller: Seller,
    pub account_age_label: String,
}

pub fn admin_sellers(sellers: &[Seller], query: &str) -> Vec<AdminSellerRow> {
    search_sellers(sellers, query)
        .into_iter()
        .map(|seller| AdminSellerRow {
            account_age_label: SellerSummary::from_seller(seller).account_age_label,
            seller: seller.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminProductRow {
    #[serde(flatten)]
    pub product: Product,
    pub seller_name: Option<String>,
    pub return_reason_count: usize,
    pub trade_off_count: usize,
}

pub fn admin_products(products: &[Product], sellers: &[Seller], query: &str) -> Vec<AdminProductRow> {
    let sellers = sellers_by_id(sellers);

    search_products(products, query)
        .into_iter()
        .map(|product| AdminProductRow {
            seller_name: sellers.get(product.seller_id.as_str()).map(|s| s.name.clone()),
            return_reason_count: product.return_reasons.len(),
            trade_off_count: product.trade_offs.len(),
            product: product.clone(),
        })
        .collect()
}

/// Unlike buyer views, this includes unverified reviews.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminReviewRow {
    #[serde(flatten)]
    pub review: Review,
    pub product_name: Option<String>,
}

pub fn admin_reviews(reviews: &[Review], products: &[Product], query: &str) -> Vec<AdminReviewRow> {
    let names: HashMap<&str, &str> = products
        .iter()
        .map(|p| (p.product_id.as_str(), p.name.as_str()))
        .collect();

    search_reviews(reviews, products, query)
        .into_iter()
        .map(|review| AdminReviewRow {
            product_name: names.get(review.product_id.as_str()).map(|n| n.to_string()),
            review: review.clone(),
        })
        .collect()
}
