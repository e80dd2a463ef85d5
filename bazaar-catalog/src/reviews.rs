use bazaar_shared::Review;

/// Reviews a buyer is allowed to see, in their original order.
pub fn verified_only(reviews: &[Review]) -> Vec<&Review> {
    reviews.iter().filter(|r| r.verified).collect()
}

/// Reviews attached to one product, verified or not.
pub fn for_product<'a>(reviews: &'a [Review], product_id: &str) -> Vec<&'a Review> {
    reviews.iter().filter(|r| r.product_id == product_id).collect()
}
