use bazaar_catalog::PricingConfig;
use bazaar_order::{manager::DEFAULT_ORDER_CAPACITY, EscrowPolicy};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub escrow: EscrowPolicy,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Placed orders held in memory before new placements are refused
    #[serde(default = "default_max_orders")]
    pub max_orders: usize,
}

fn default_port() -> u16 { 8080 }

fn default_max_orders() -> usize { DEFAULT_ORDER_CAPACITY }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            max_orders: default_max_orders(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// JSON fixture loaded into the in-memory backend at startup
    pub seed_path: Option<String>,
    /// Principals granted the admin role at startup
    #[serde(default)]
    pub admins: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `BAZAAR_PRICING__DELIVERY_FEE=40`
            .add_source(
                config::Environment::with_prefix("BAZAAR")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("store.admins")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a single TOML document, filling anything absent with defaults.
    pub fn from_toml(contents: &str) -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make order placement fail at runtime.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.escrow
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("escrow: {}", e)))?;
        if self.server.max_orders == 0 {
            return Err(config::ConfigError::Message("server.max_orders must be positive".to_string()));
        }
        Ok(())
    }
}
