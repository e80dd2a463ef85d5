use bazaar_shared::Seller;
use serde::{Deserialize, Serialize};
use std::fmt;

const DAYS_PER_YEAR: u64 = 365;

/// Seller account age split into whole years and leftover days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountAge {
    pub years: u64,
    pub days: u64,
}

impl AccountAge {
    pub fn from_days(account_age_days: u64) -> Self {
        Self {
            years: account_age_days / DAYS_PER_YEAR,
            days: account_age_days % DAYS_PER_YEAR,
        }
    }
}

impl fmt::Display for AccountAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y {}d", self.years, self.days)
    }
}

/// Read-only seller fields shown next to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SellerSummary {
    pub seller_id: String,
    pub name: String,
    pub trust_score: u32,
    pub trust_label: String,
    pub account_age: AccountAge,
    pub account_age_label: String,
}

impl SellerSummary {
    pub fn from_seller(seller: &Seller) -> Self {
        let account_age = AccountAge::from_days(seller.account_age_days);
        Self {
            seller_id: seller.seller_id.clone(),
            name: seller.name.clone(),
            trust_score: seller.trust_score,
            trust_label: format!("{}/100", seller.trust_score),
            account_age,
            account_age_label: account_age.to_string(),
        }
    }
}

/// Resolve a seller by id from an already-fetched list.
pub fn find_seller<'a>(sellers: &'a [Seller], seller_id: &str) -> Option<&'a Seller> {
    sellers.iter().find(|s| s.seller_id == seller_id)
}
