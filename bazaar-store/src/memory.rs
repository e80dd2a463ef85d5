use async_trait::async_trait;
use bazaar_core::{CoreError, CoreResult, MarketplaceBackend, Principal};
use bazaar_shared::{Product, Review, Seller, UserProfile, UserRole};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

use crate::seed::SeedData;

#[derive(Default)]
struct Collections {
    products: Vec<Product>,
    sellers: Vec<Seller>,
    reviews: Vec<Review>,
    profiles: HashMap<Principal, UserProfile>,
    roles: HashMap<Principal, UserRole>,
}

impl Collections {
    fn role_of(&self, principal: &Principal) -> UserRole {
        if principal.is_anonymous() {
            return UserRole::Guest;
        }
        self.roles.get(principal).copied().unwrap_or(UserRole::User)
    }

    fn ensure_admin(&self, caller: &Principal, action: &str) -> CoreResult<()> {
        if self.role_of(caller).is_admin() {
            Ok(())
        } else {
            Err(CoreError::Unauthorized(format!("{} requires admin, caller {}", action, caller)))
        }
    }
}

/// Replace the first item matching `same`, or append. Returns true on replace.
fn upsert<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) -> bool {
    match items.iter_mut().find(|existing| same(existing)) {
        Some(existing) => {
            *existing = item;
            true
        }
        None => {
            items.push(item);
            false
        }
    }
}

/// In-process stand-in for the remote marketplace service.
///
/// Collections keep insertion order; writes replace by identifier and nothing is deleted.
pub struct MemoryBackend {
    inner: RwLock<Collections>,
}

impl MemoryBackend {
    pub fn new<I>(admins: I) -> Self
    where
        I: IntoIterator<Item = Principal>,
    {
        Self::with_seed(admins, SeedData::default())
    }

    pub fn with_seed<I>(admins: I, seed: SeedData) -> Self
    where
        I: IntoIterator<Item = Principal>,
    {
        let mut collections = Collections {
            roles: admins
                .into_iter()
                .map(|principal| (principal, UserRole::Admin))
                .collect(),
            ..Collections::default()
        };

        if !seed.products.is_empty() || !seed.sellers.is_empty() || !seed.reviews.is_empty() {
            info!(
                "Seeding {} products, {} sellers, {} reviews",
                seed.products.len(),
                seed.sellers.len(),
                seed.reviews.len()
            );
        }
        for product in seed.products {
            let id = product.product_id.clone();
            upsert(&mut collections.products, product, |p| p.product_id == id);
        }
        for seller in seed.sellers {
            let id = seller.seller_id.clone();
            upsert(&mut collections.sellers, seller, |s| s.seller_id == id);
        }
        for review in seed.reviews {
            let id = review.review_id.clone();
            upsert(&mut collections.reviews, review, |r| r.review_id == id);
        }

        Self {
            inner: RwLock::new(collections),
        }
    }
}

#[async_trait]
impl MarketplaceBackend for MemoryBackend {
    async fn add_product(&self, caller: &Principal, product: Product) -> CoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.ensure_admin(caller, "add_product")?;

        let id = product.product_id.clone();
        let replaced = upsert(&mut inner.products, product, |p| p.product_id == id);
        info!("Product {} {}", id, if replaced { "replaced" } else { "created" });
        Ok(())
    }

    async fn get_product(&self, product_id: &str) -> CoreResult<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| p.product_id == product_id).cloned())
    }

    async fn list_products(&self) -> CoreResult<Vec<Product>> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn list_seller_products(&self, seller_id: &str) -> CoreResult<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner
            .products
            .iter()
            .filter(|p| p.seller_id == seller_id)
            .cloned()
            .collect())
    }

    async fn add_seller(&self, caller: &Principal, seller: Seller) -> CoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.ensure_admin(caller, "add_seller")?;

        let id = seller.seller_id.clone();
        let replaced = upsert(&mut inner.sellers, seller, |s| s.seller_id == id);
        info!("Seller {} {}", id, if replaced { "replaced" } else { "created" });
        Ok(())
    }

    async fn get_seller(&self, seller_id: &str) -> CoreResult<Option<Seller>> {
        let inner = self.inner.read().await;
        Ok(inner.sellers.iter().find(|s| s.seller_id == seller_id).cloned())
    }

    async fn list_sellers(&self) -> CoreResult<Vec<Seller>> {
        Ok(self.inner.read().await.sellers.clone())
    }

    async fn add_review(&self, caller: &Principal, review: Review) -> CoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.ensure_admin(caller, "add_review")?;

        let id = review.review_id.clone();
        let replaced = upsert(&mut inner.reviews, review, |r| r.review_id == id);
        info!("Review {} {}", id, if replaced { "replaced" } else { "created" });
        Ok(())
    }

    async fn list_reviews(&self) -> CoreResult<Vec<Review>> {
        Ok(self.inner.read().await.reviews.clone())
    }

    async fn list_product_reviews(&self, product_id: &str) -> CoreResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn get_caller_profile(&self, caller: &Principal) -> CoreResult<Option<UserProfile>> {
        Ok(self.inner.read().await.profiles.get(caller).cloned())
    }

    async fn save_caller_profile(&self, caller: &Principal, profile: UserProfile) -> CoreResult<()> {
        let mut inner = self.inner.write().await;
        if inner.role_of(caller) == UserRole::Guest {
            return Err(CoreError::Unauthorized("guests cannot save a profile".to_string()));
        }
        inner.profiles.insert(caller.clone(), profile);
        Ok(())
    }

    async fn get_user_profile(&self, user: &Principal) -> CoreResult<Option<UserProfile>> {
        Ok(self.inner.read().await.profiles.get(user).cloned())
    }

    async fn get_caller_role(&self, caller: &Principal) -> CoreResult<UserRole> {
        Ok(self.inner.read().await.role_of(caller))
    }

    async fn assign_role(&self, caller: &Principal, user: &Principal, role: UserRole) -> CoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.ensure_admin(caller, "assign_role")?;

        if user.is_anonymous() {
            return Err(CoreError::ValidationError("cannot assign a role to the anonymous caller".to_string()));
        }
        inner.roles.insert(user.clone(), role);
        info!("Role {} assigned to {} by {}", role, user, caller);
        Ok(())
    }
}
