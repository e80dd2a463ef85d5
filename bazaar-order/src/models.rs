use bazaar_catalog::PriceBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::escrow::EscrowTimeline;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    NetBanking,
}

/// Delivery address captured on the checkout form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
}

impl ShippingDetails {
    /// Name of the first required field left blank, if any.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
            ("phone", &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// A placed order. Frozen at placement and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub product_id: String,
    pub product_name: String,
    pub breakdown: PriceBreakdown,
    pub payment_method: PaymentMethod,
    pub shipping: ShippingDetails,
    pub escrow: EscrowTimeline,
    pub placed_at: DateTime<Utc>,
    /// Buyer's offset from UTC at placement, used to render dates on their calendar.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}
