use bazaar_catalog::{PriceBreakdown, PricingEngine};
use bazaar_shared::Product;
use chrono::{DateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::escrow::EscrowPolicy;
use crate::manager::OrderError;
use crate::models::{OrderConfirmation, PaymentMethod, ShippingDetails};

/// Buyer protection notes shown alongside every checkout.
pub const PROTECTION_NOTES: [&str; 3] = [
    "Your payment is held securely in escrow until delivery is confirmed",
    "Full refund available if product doesn't match description",
    "Seller trust score is affected by disputes and returns",
];

/// What the buyer sees before placing an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPreview {
    pub product_id: String,
    pub product_name: String,
    pub breakdown: PriceBreakdown,
    pub protection_notes: Vec<String>,
}

/// Builds checkout previews and order confirmations from the current product record.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    pricing: PricingEngine,
    escrow: EscrowPolicy,
}

impl Checkout {
    pub fn new(pricing: PricingEngine, escrow: EscrowPolicy) -> Self {
        Self { pricing, escrow }
    }

    pub fn pricing(&self) -> &PricingEngine {
        &self.pricing
    }

    pub fn preview(&self, product: &Product) -> CheckoutPreview {
        CheckoutPreview {
            product_id: product.product_id.clone(),
            product_name: product.name.clone(),
            breakdown: self.pricing.checkout_breakdown(product.price),
            protection_notes: PROTECTION_NOTES.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Place an order at `placed_at`, freezing price and escrow dates.
    ///
    /// Escrow days are counted on `placed_at`'s own calendar.
    pub fn place_order<Tz: TimeZone>(
        &self,
        product: &Product,
        shipping: ShippingDetails,
        payment_method: PaymentMethod,
        placed_at: DateTime<Tz>,
    ) -> Result<OrderConfirmation, OrderError> {
        if let Some(field) = shipping.first_missing_field() {
            return Err(OrderError::MissingField(field.to_string()));
        }

        let escrow = self.escrow.project(&placed_at)?;
        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4(),
            product_id: product.product_id.clone(),
            product_name: product.name.clone(),
            breakdown: self.pricing.checkout_breakdown(product.price),
            payment_method,
            shipping,
            placed_at: escrow.placed_at,
            escrow,
            utc_offset_minutes: placed_at.offset().fix().local_minus_utc() / 60,
        };

        tracing::info!(
            "Order {} placed for product {} (total {})",
            confirmation.order_id,
            confirmation.product_id,
            confirmation.breakdown.total
        );

        Ok(confirmation)
    }
}
