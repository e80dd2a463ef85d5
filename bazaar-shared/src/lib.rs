pub mod models;

pub use models::records::{ImageRef, Product, Review, Seller, UserProfile, UserRole};
