use async_trait::async_trait;
use bazaar_shared::{Product, Review, Seller, UserProfile, UserRole};

use crate::identity::Principal;
use crate::CoreResult;

/// Request/response capability exposed by the remote marketplace service.
///
/// The service owns every record and enforces access control; implementations
/// only relay calls. Failed calls come back as `Err` and are never retried here.
#[async_trait]
pub trait MarketplaceBackend: Send + Sync {
    /// Create a product, or replace the one with the same `product_id`.
    async fn add_product(&self, caller: &Principal, product: Product) -> CoreResult<()>;

    async fn get_product(&self, product_id: &str) -> CoreResult<Option<Product>>;

    async fn list_products(&self) -> CoreResult<Vec<Product>>;

    async fn list_seller_products(&self, seller_id: &str) -> CoreResult<Vec<Product>>;

    /// Create a seller, or replace the one with the same `seller_id`.
    async fn add_seller(&self, caller: &Principal, seller: Seller) -> CoreResult<()>;

    async fn get_seller(&self, seller_id: &str) -> CoreResult<Option<Seller>>;

    async fn list_sellers(&self) -> CoreResult<Vec<Seller>>;

    /// Create a review, or replace the one with the same `review_id`.
    async fn add_review(&self, caller: &Principal, review: Review) -> CoreResult<()>;

    /// Every review, verified or not.
    async fn list_reviews(&self) -> CoreResult<Vec<Review>>;

    async fn list_product_reviews(&self, product_id: &str) -> CoreResult<Vec<Review>>;

    async fn get_caller_profile(&self, caller: &Principal) -> CoreResult<Option<UserProfile>>;

    async fn save_caller_profile(&self, caller: &Principal, profile: UserProfile) -> CoreResult<()>;

    async fn get_user_profile(&self, user: &Principal) -> CoreResult<Option<UserProfile>>;

    async fn get_caller_role(&self, caller: &Principal) -> CoreResult<UserRole>;

    async fn is_caller_admin(&self, caller: &Principal) -> CoreResult<bool> {
        Ok(self.get_caller_role(caller).await?.is_admin())
    }

    /// Grant `role` to `user`. Only admins may do this.
    async fn assign_role(&self, caller: &Principal, user: &Principal, role: UserRole) -> CoreResult<()>;
}
