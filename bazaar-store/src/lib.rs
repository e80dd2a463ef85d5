pub mod app_config;
pub mod memory;
pub mod seed;

pub use memory::MemoryBackend;
pub use seed::{SeedData, StoreError};
