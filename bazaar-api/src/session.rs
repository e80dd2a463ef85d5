use axum::{extract::FromRequestParts, http::request::Parts};
use bazaar_core::{Principal, Session};

use crate::{error::AppError, state::AppState};

/// Header carrying the caller identity set by the hosting application.
pub const PRINCIPAL_HEADER: &str = "x-principal";

/// Session resolved once per request; handlers pass it down instead of re-querying the role.
pub struct CallerSession(pub Session);

fn principal_from(parts: &Parts) -> Principal {
    parts
        .headers
        .get(PRINCIPAL_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(Principal::new)
        .unwrap_or_else(Principal::anonymous)
}

impl FromRequestParts<AppState> for CallerSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let principal = principal_from(parts);
        let session = Session::resolve(state.backend.as_ref(), principal).await?;
        Ok(CallerSession(session))
    }
}

/// Admin screens render "Access Denied" for everyone else.
pub fn require_admin(session: &Session) -> Result<(), AppError> {
    if session.is_admin() {
        return Ok(());
    }
    tracing::warn!("Admin access denied for {} ({})", session.principal, session.role);
    Err(AppError::AuthorizationError(
        "You must be an administrator to access this page.".to_string(),
    ))
}
