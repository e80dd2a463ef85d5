use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to uploaded binary content (usually a direct URL).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A listed product as held by the remote data service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub description: String,
    /// Smallest currency unit (whole rupees).
    pub price: u64,
    /// Not guaranteed to resolve to a known seller.
    pub seller_id: String,
    /// Display order is insertion order.
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub trade_offs: Vec<String>,
    #[serde(default)]
    pub return_reasons: Vec<String>,
}

/// Seller profile with its lifetime trust counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub seller_id: String,
    pub name: String,
    /// Nominally 0-100. Lifetime-cumulative, never reset.
    pub trust_score: u32,
    pub account_age_days: u64,
    pub total_orders: u64,
    pub disputes_won: u64,
    pub disputes_lost: u64,
    pub policy_violations: u64,
    pub penalties: u64,
    #[serde(default)]
    pub history_timeline: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: String,
    pub product_id: String,
    pub user_id: String,
    /// Nominally 1-5.
    pub rating: u32,
    pub content: String,
    /// Days of use claimed before the review was written.
    pub usage_days: u64,
    /// Only verified reviews are shown to buyers.
    pub verified: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub purchase_history: Vec<String>,
}

/// Role reported by the remote service for a caller
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    #[default]
    Guest,
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
            UserRole::Guest => "guest",
        };
        f.write_str(label)
    }
}
