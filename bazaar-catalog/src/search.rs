//! Case-insensitive substring search used by the admin listings.

use bazaar_shared::{Product, Review, Seller};
use std::collections::HashMap;

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub fn search_sellers<'a>(sellers: &'a [Seller], query: &str) -> Vec<&'a Seller> {
    let needle = query.to_lowercase();
    sellers
        .iter()
        .filter(|s| matches(&s.name, &needle) || matches(&s.seller_id, &needle))
        .collect()
}

pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| matches(&p.name, &needle) || matches(&p.product_id, &needle))
        .collect()
}

/// Matches on review id, user id, or the referenced product's name.
pub fn search_reviews<'a>(
    reviews: &'a [Review],
    products: &[Product],
    query: &str,
) -> Vec<&'a Review> {
    let needle = query.to_lowercase();
    let product_names: HashMap<&str, &str> = products
        .iter()
        .map(|p| (p.product_id.as_str(), p.name.as_str()))
        .collect();

    reviews
        .iter()
        .filter(|r| {
            matches(&r.review_id, &needle)
                || matches(&r.user_id, &needle)
                || product_names
                    .get(r.product_id.as_str())
                    .is_some_and(|name| matches(name, &needle))
        })
        .collect()
}
