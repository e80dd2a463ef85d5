pub mod trust;
pub mod pricing;
pub mod seller;
pub mod reviews;
pub mod search;

pub use trust::{RiskTier, TrustSignals};
pub use pricing::{PriceBreakdown, PricingConfig, PricingEngine};
pub use seller::{AccountAge, SellerSummary};
