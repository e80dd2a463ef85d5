use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    error::AppError,
    state::AppState,
    views::{catalog_cards, product_detail, CatalogCard, ProductDetailView},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/catalog", get(list_catalog))
        .route("/v1/products/{product_id}", get(get_product_detail))
}

/// GET /v1/catalog
async fn list_catalog(State(state): State<AppState>) -> Result<Json<Vec<CatalogCard>>, AppError> {
    let (products, sellers) = tokio::try_join!(
        state.backend.list_products(),
        state.backend.list_sellers()
    )?;

    Ok(Json(catalog_cards(&products, &sellers)))
}

/// GET /v1/products/:product_id
async fn get_product_detail(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductDetailView>, AppError> {
    let product = state
        .backend
        .get_product(&product_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Product not found: {}", product_id)))?;

    let (seller, reviews) = tokio::try_join!(
        state.backend.get_seller(&product.seller_id),
        state.backend.list_product_reviews(&product_id)
    )?;

    if seller.is_none() {
        tracing::warn!("Product {} references unknown seller {}", product.product_id, product.seller_id);
    }

    Ok(Json(product_detail(&product, seller.as_ref(), &reviews, state.pricing())))
}
