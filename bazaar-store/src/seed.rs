use bazaar_shared::{Product, Review, Seller};
use serde::Deserialize;
use std::path::Path;

/// Records preloaded into the in-memory backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl SeedData {
    pub fn from_json(contents: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&contents)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
}
