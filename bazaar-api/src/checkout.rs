use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bazaar_order::{CheckoutPreview, PaymentMethod, ShippingDetails};
use bazaar_shared::Product;
use chrono::{FixedOffset, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, state::AppState, views::OrderConfirmationView};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub shipping: ShippingDetails,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Buyer's offset from UTC; escrow dates follow the buyer's calendar. UTC when absent.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

fn buyer_offset(minutes: Option<i32>) -> Result<FixedOffset, AppError> {
    let minutes = minutes.unwrap_or(0);
    if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return Err(AppError::ValidationError(format!(
            "utcOffsetMinutes must be between -{max} and {max}, got {minutes}",
            max = MAX_OFFSET_MINUTES
        )));
    }
    FixedOffset::east_opt(minutes * 60)
        .ok_or_else(|| AppError::ValidationError(format!("Invalid UTC offset: {} minutes", minutes)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/checkout/{product_id}", get(preview_checkout).post(place_order))
        .route("/v1/orders/{order_id}", get(get_order))
}

async fn fetch_product(state: &AppState, product_id: &str) -> Result<Product, AppError> {
    state
        .backend
        .get_product(product_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Product not found: {}", product_id)))
}

/// GET /v1/checkout/:product_id
async fn preview_checkout(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<CheckoutPreview>, AppError> {
    let product = fetch_product(&state, &product_id).await?;
    Ok(Json(state.checkout.preview(&product)))
}

/// POST /v1/checkout/:product_id
async fn place_order(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderConfirmationView>), AppError> {
    let offset = buyer_offset(req.utc_offset_minutes)?;
    let product = fetch_product(&state, &product_id).await?;

    let placed_at = Utc::now().with_timezone(&offset);
    let confirmation = state
        .checkout
        .place_order(&product, req.shipping, req.payment_method, placed_at)?;
    state.orders.write().await.record(confirmation.clone())?;

    Ok((StatusCode::CREATED, Json(confirmation.into())))
}

/// GET /v1/orders/:order_id
async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderConfirmationView>, AppError> {
    let confirmation = state.orders.read().await.get(&order_id)?.clone();

    Ok(Json(confirmation.into()))
}
