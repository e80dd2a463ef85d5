use bazaar_shared::{Product, Seller};
use serde::{Deserialize, Serialize};

/// Minimum trust score for a seller to be considered low risk.
pub const LOW_RISK_MIN_TRUST: u32 = 80;

/// Minimum trust score for a seller to be considered medium risk.
pub const MEDIUM_RISK_MIN_TRUST: u32 = 50;

/// Percentage points contributed by each listed return reason.
pub const RETURN_PERCENT_PER_REASON: u64 = 5;

/// Likelihood that a product's reviews are not genuine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Classify a known seller's trust score.
    pub fn from_trust_score(trust_score: u32) -> Self {
        if trust_score >= LOW_RISK_MIN_TRUST {
            RiskTier::Low
        } else if trust_score >= MEDIUM_RISK_MIN_TRUST {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

/// Fake-review risk for a product whose seller may not resolve.
///
/// An unknown seller is rated `Medium` rather than treated as an error.
pub fn fake_review_risk(seller: Option<&Seller>) -> RiskTier {
    match seller {
        Some(seller) => RiskTier::from_trust_score(seller.trust_score),
        None => RiskTier::Medium,
    }
}

/// Return rate proxy: five points per listed return reason.
///
/// Not clamped; more than twenty reasons reports over 100%.
pub fn return_percentage(product: &Product) -> u64 {
    product.return_reasons.len() as u64 * RETURN_PERCENT_PER_REASON
}

/// Buyer-facing trust signals for a single product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrustSignals {
    pub risk_tier: RiskTier,
    pub return_percentage: u64,
}

impl TrustSignals {
    pub fn derive(product: &Product, seller: Option<&Seller>) -> Self {
        Self {
            risk_tier: fake_review_risk(seller),
            return_percentage: return_percentage(product),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller_with_score(trust_score: u32) -> Seller {
        Seller {
            seller_id: "seller-1".to_string(),
            name: "Anand Traders".to_string(),
            trust_score,
            account_age_days: 400,
            total_orders: 120,
            disputes_won: 3,
            disputes_lost: 1,
            policy_violations: 0,
            penalties: 0,
            history_timeline: vec![],
        }
    }

    fn product_with_reasons(count: usize) -> Product {
        Product {
            product_id: "product-1".to_string(),
            name: "Cotton Kurta".to_string(),
            description: "Handloom".to_string(),
            price: 1000,
            seller_id: "seller-1".to_string(),
            images: vec![],
            trade_offs: vec![],
            return_reasons: (0..count).map(|i| format!("reason {}", i)).collect(),
        }
    }

    #[test]
    fn test_risk_tier_boundaries() {
        let expected = [
            (95, RiskTier::Low),
            (80, RiskTier::Low),
            (79, RiskTier::Medium),
            (50, RiskTier::Medium),
            (49, RiskTier::High),
            (0, RiskTier::High),
        ];

        for (score, tier) in expected {
            let seller = seller_with_score(score);
            assert_eq!(fake_review_risk(Some(&seller)), tier, "trust score {}", score);
        }
    }

    #[test]
    fn test_risk_tier_is_monotonic() {
        let mut previous = RiskTier::from_trust_score(0);
        for score in 1..=120 {
            let tier = RiskTier::from_trust_score(score);
            let rank = |t: RiskTier| match t {
                RiskTier::High => 2,
                RiskTier::Medium => 1,
                RiskTier::Low => 0,
            };
            assert!(rank(tier) <= rank(previous));
            previous = tier;
        }
    }

    #[test]
    fn test_missing_seller_is_medium() {
        for count in [0, 4, 30] {
            let signals = TrustSignals::derive(&product_with_reasons(count), None);
            assert_eq!(signals.risk_tier, RiskTier::Medium);
        }
    }

    #[test]
    fn test_return_percentage() {
        assert_eq!(return_percentage(&product_with_reasons(0)), 0);
        assert_eq!(return_percentage(&product_with_reasons(3)), 15);
        // Unclamped on purpose
        assert_eq!(return_percentage(&product_with_reasons(21)), 105);
    }

    #[test]
    fn test_signals_are_idempotent() {
        let product = product_with_reasons(2);
        let seller = seller_with_score(64);

        let first = TrustSignals::derive(&product, Some(&seller));
        let second = TrustSignals::derive(&product, Some(&seller));
        assert_eq!(first, second);
        assert_eq!(first.risk_tier.as_str(), "Medium");
        assert_eq!(first.return_percentage, 10);
    }
}
