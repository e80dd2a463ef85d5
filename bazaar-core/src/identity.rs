use bazaar_shared::UserRole;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::backend::MarketplaceBackend;
use crate::CoreResult;

const ANONYMOUS: &str = "anonymous";

/// Opaque caller identity supplied by the hosting application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A caller plus the role resolved for it once, passed to every view that branches on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub principal: Principal,
    pub role: UserRole,
}

impl Session {
    pub fn new(principal: Principal, role: UserRole) -> Self {
        Self { principal, role }
    }

    /// Ask the backend for the caller's role once.
    pub async fn resolve(backend: &dyn MarketplaceBackend, principal: Principal) -> CoreResult<Self> {
        let role = backend.get_caller_role(&principal).await?;
        tracing::debug!("Resolved session for {} as {}", principal, role);
        Ok(Self { principal, role })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
