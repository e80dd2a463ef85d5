use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bazaar_core::Principal;
use bazaar_shared::{UserProfile, UserRole};
use serde::Serialize;

use crate::{error::AppError, session::CallerSession, state::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub principal: Principal,
    pub role: UserRole,
    pub is_admin: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/session", get(get_session))
        .route("/v1/profile", get(get_profile).put(save_profile))
}

/// GET /v1/session
async fn get_session(CallerSession(session): CallerSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        is_admin: session.is_admin(),
        principal: session.principal,
        role: session.role,
    })
}

/// GET /v1/profile
async fn get_profile(
    State(state): State<AppState>,
    CallerSession(session): CallerSession,
) -> Result<Json<Option<UserProfile>>, AppError> {
    let profile = state.backend.get_caller_profile(&session.principal).await?;
    Ok(Json(profile))
}

/// PUT /v1/profile
async fn save_profile(
    State(state): State<AppState>,
    CallerSession(session): CallerSession,
    Json(profile): Json<UserProfile>,
) -> Result<StatusCode, AppError> {
    state.backend.save_caller_profile(&session.principal, profile).await?;
    Ok(StatusCode::NO_CONTENT)
}
