use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bazaar_core::Principal;
use bazaar_shared::{Product, Review, Seller, UserRole};
use serde::Deserialize;

use crate::{
    error::AppError,
    session::{require_admin, CallerSession},
    state::AppState,
    views::{admin_products, admin_reviews, admin_sellers, AdminProductRow, AdminReviewRow, AdminSellerRow},
};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    pub principal: String,
    pub role: UserRole,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/sellers", get(list_sellers).post(upsert_seller))
        .route("/v1/admin/products", get(list_products).post(upsert_product))
        .route("/v1/admin/reviews", get(list_reviews).post(upsert_review))
        .route("/v1/admin/roles", post(assign_role))
}

// ============================================================================
// Seller Management Handlers
// ============================================================================

/// GET /v1/admin/sellers?q=
async fn list_sellers(
    State(state): State<AppState>,
    CallerSession(session): CallerSession,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<AdminSellerRow>>, AppError> {
    require_admin(&session)?;
    let sellers = state.backend.list_sellers().await?;
    Ok(Json(admin_sellers(&sellers, &query.q)))
}

/// POST /v1/admin/sellers
async fn upsert_seller(
    State(state): State<AppState>,
    CallerSession(session): CallerSession,
    Json(seller): Json<Seller>,
) -> Result<(StatusCode, Json<Seller>), AppError> {
    require_admin(&session)?;
    state.backend.add_seller(&session.principal, seller.clone()).await?;
    Ok((StatusCode::CREATED, Json(seller)))
}

// ============================================================================
// Product Management Handlers
// ============================================================================

/// GET /v1/admin/products?q=
async fn list_products(
    State(state): State<AppState>,
    CallerSession(session): CallerSession,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<AdminProductRow>>, AppError> {
    require_admin(&session)?;
    let (products, sellers) = tokio::try_join!(
        state.backend.list_products(),
        state.backend.list_sellers()
    )?;
    Ok(Json(admin_products(&products, &sellers, &query.q)))
}

/// POST /v1/admin/products
async fn upsert_product(
    State(state): State<AppState>,
    CallerSession(session): CallerSession,
    Json(product): Json<Product>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    require_admin(&session)?;
    if state.backend.get_seller(&product.seller_id).await?.is_none() {
        // Accepted anyway; buyer views fall back to the neutral risk tier.
        tracing::warn!("Product {} saved with unknown seller {}", product.product_id, product.seller_id);
    }
    state.backend.add_product(&session.principal, product.clone()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// ============================================================================
// Review Management Handlers
// ============================================================================

/// GET /v1/admin/reviews?q=
async fn list_reviews(
    State(state): State<AppState>,
    CallerSession(session): CallerSession,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<AdminReviewRow>>, AppError> {
    require_admin(&session)?;
    let (reviews, products) = tokio::try_join!(
        state.backend.list_reviews(),
        state.backend.list_products()
    )?;
    Ok(Json(admin_reviews(&reviews, &products, &query.q)))
}

/// POST /v1/admin/reviews
async fn upsert_review(
    State(state): State<AppState>,
    CallerSession(session): CallerSession,
    Json(review): Json<Review>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    require_admin(&session)?;
    state.backend.add_review(&session.principal, review.clone()).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// POST /v1/admin/roles
async fn assign_role(
    State(state): State<AppState>,
    CallerSession(session): CallerSession,
    Json(req): Json<AssignRoleRequest>,
) -> Result<StatusCode, AppError> {
    require_admin(&session)?;
    let user = Principal::new(req.principal.trim());
    if user.as_str().is_empty() {
        return Err(AppError::ValidationError("principal must not be empty".to_string()));
    }
    state.backend.assign_role(&session.principal, &user, req.role).await?;
    Ok(StatusCode::NO_CONTENT)
}
