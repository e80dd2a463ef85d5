use serde::{Deserialize, Serialize};

const BPS_DENOMINATOR: u128 = 10_000;

/// Pricing rules applied at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingConfig {
    /// Tax rate in basis points (1800 = 18%)
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Flat delivery fee, independent of weight, distance or order value
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: u64,

    /// Extended warranty line shown on the product page only; checkout totals exclude it
    #[serde(default)]
    pub warranty_fee: u64,
}

fn default_tax_rate_bps() -> u32 { 1800 }

fn default_delivery_fee() -> u64 { 50 }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: default_tax_rate_bps(),
            delivery_fee: default_delivery_fee(),
            warranty_fee: 0,
        }
    }
}

/// Derived price lines for a single product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: u64,
    pub tax: u64,
    pub delivery_fee: u64,
    pub warranty_fee: u64,
    pub total: u64,
}

/// Computes price breakdowns on demand; nothing is cached.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Tax on `base_price`, rounded half-up to the nearest unit.
    pub fn tax(&self, base_price: u64) -> u64 {
        let scaled = base_price as u128 * self.config.tax_rate_bps as u128;
        let rounded = (scaled + BPS_DENOMINATOR / 2) / BPS_DENOMINATOR;
        u64::try_from(rounded).unwrap_or(u64::MAX)
    }

    /// Product page breakdown, including the warranty line.
    pub fn breakdown(&self, base_price: u64) -> PriceBreakdown {
        self.lines(base_price, self.config.warranty_fee)
    }

    /// Checkout breakdown: base, tax and delivery only.
    pub fn checkout_breakdown(&self, base_price: u64) -> PriceBreakdown {
        self.lines(base_price, 0)
    }

    fn lines(&self, base_price: u64, warranty_fee: u64) -> PriceBreakdown {
        let tax = self.tax(base_price);
        let total = base_price
            .saturating_add(tax)
            .saturating_add(self.config.delivery_fee)
            .saturating_add(warranty_fee);

        PriceBreakdown {
            base_price,
            tax,
            delivery_fee: self.config.delivery_fee,
            warranty_fee,
            total,
        }
    }
}

/// Breakdown under the default rules (18% tax, flat 50 delivery).
pub fn price_breakdown(base_price: u64) -> PriceBreakdown {
    PricingEngine::default().breakdown(base_price)
}
