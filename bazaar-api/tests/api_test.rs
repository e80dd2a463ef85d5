use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bazaar_api::{app, AppState};
use bazaar_catalog::PricingConfig;
use bazaar_core::Principal;
use bazaar_order::EscrowPolicy;
use bazaar_store::{MemoryBackend, SeedData};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN: &str = "ops-admin";

fn seed() -> SeedData {
    SeedData::from_json(
        r#"{
            "sellers": [
                {"sellerId": "seller-1", "name": "Lotus Home", "trustScore": 92, "accountAgeDays": 400,
                 "totalOrders": 2300, "disputesWon": 14, "disputesLost": 2, "policyViolations": 0,
                 "penalties": 0, "historyTimeline": ["Joined 2025"]},
                {"sellerId": "seller-2", "name": "Quick Deals", "trustScore": 41, "accountAgeDays": 30,
                 "totalOrders": 12, "disputesWon": 0, "disputesLost": 3, "policyViolations": 2,
                 "penalties": 1}
            ],
            "products": [
                {"productId": "product-1", "name": "Brass Lamp", "description": "Handmade", "price": 1000,
                 "sellerId": "seller-1", "images": ["lamp.png"], "tradeOffs": ["Needs polishing"],
                 "returnReasons": ["Dent", "Wrong size", "Scratches"]},
                {"productId": "product-2", "name": "Phone Case", "description": "Silicone", "price": 299,
                 "sellerId": "seller-2"},
                {"productId": "product-3", "name": "Tea Set", "description": "Ceramic", "price": 1500,
                 "sellerId": "seller-gone"}
            ],
            "reviews": [
                {"reviewId": "review-1", "productId": "product-1", "userId": "user-a", "rating": 5,
                 "content": "Bright and sturdy", "usageDays": 60, "verified": true},
                {"reviewId": "review-2", "productId": "product-1", "userId": "user-b", "rating": 1,
                 "content": "Suspicious", "usageDays": 0, "verified": false},
                {"reviewId": "review-3", "productId": "product-1", "userId": "user-c", "rating": 4,
                 "content": "Good value", "usageDays": 20, "verified": true}
            ]
        }"#,
    )
    .unwrap()
}

fn test_state(pricing: PricingConfig) -> AppState {
    let backend = Arc::new(MemoryBackend::with_seed([Principal::new(ADMIN)], seed()));
    AppState::new(backend, pricing, EscrowPolicy::default())
}

fn test_app() -> Router {
    app(test_state(PricingConfig::default()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str, principal: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(p) = principal {
        builder = builder.header("x-principal", p);
    }
    builder.body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, principal: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(p) = principal {
        builder = builder.header("x-principal", p);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn shipping() -> Value {
    json!({
        "firstName": "Asha",
        "lastName": "Rao",
        "address": "12 MG Road",
        "city": "Bengaluru",
        "state": "Karnataka",
        "pincode": "560001",
        "phone": "9800000000"
    })
}

#[tokio::test]
async fn test_catalog_signals() {
    let app = test_app();
    let (status, body) = send(&app, get("/v1/catalog", None)).await;

    assert_eq!(status, StatusCode::OK);
    let cards = body.as_array().unwrap();
    assert_eq!(cards.len(), 3);

    assert_eq!(cards[0]["trust"]["riskTier"], "Low");
    assert_eq!(cards[0]["trust"]["returnPercentage"], 15);
    assert_eq!(cards[0]["seller"]["trustLabel"], "92/100");
    assert_eq!(cards[0]["seller"]["accountAgeLabel"], "1y 35d");
    assert_eq!(cards[0]["primaryImage"], "lamp.png");

    assert_eq!(cards[1]["trust"]["riskTier"], "High");

    // Unknown seller: neutral tier, seller not available
    assert_eq!(cards[2]["trust"]["riskTier"], "Medium");
    assert!(cards[2]["seller"].is_null());
}

#[tokio::test]
async fn test_product_detail_hides_unverified_reviews() {
    let app = test_app();
    let (status, body) = send(&app, get("/v1/products/product-1", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verifiedReviewCount"], 2);
    let ids: Vec<&str> = body["verifiedReviews"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["reviewId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["review-1", "review-3"]);

    assert_eq!(body["breakdown"]["tax"], 180);
    assert_eq!(body["breakdown"]["deliveryFee"], 50);
    assert_eq!(body["breakdown"]["total"], 1230);
    assert_eq!(body["seller"]["disputesWon"], 14);
    assert_eq!(body["seller"]["historyTimeline"][0], "Joined 2025");
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let app = test_app();
    let (status, body) = send(&app, get("/v1/products/nope", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found: nope");
}

#[tokio::test]
async fn test_admin_price_edit_reflected_immediately() {
    let app = test_app();

    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/v1/admin/products",
            Some(ADMIN),
            json!({
                "productId": "product-1", "name": "Brass Lamp", "description": "Handmade",
                "price": 2000, "sellerId": "seller-1", "returnReasons": []
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, get("/v1/checkout/product-1", None)).await;
    assert_eq!(body["breakdown"]["total"], 2410);

    let (_, body) = send(&app, get("/v1/catalog", None)).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["price"], 2000);
    assert_eq!(body[0]["trust"]["returnPercentage"], 0);
}

#[tokio::test]
async fn test_order_confirmation_is_frozen() {
    let app = test_app();

    let (status, placed) = send(
        &app,
        with_json(
            "POST",
            "/v1/checkout/product-2",
            Some("buyer-1"),
            json!({ "shipping": shipping(), "paymentMethod": "CARD" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["breakdown"]["tax"], 54);
    assert_eq!(placed["breakdown"]["total"], 299 + 54 + 50);
    assert_eq!(placed["paymentMethod"], "CARD");

    let order_id = placed["orderId"].as_str().unwrap();

    // Price edit after placement must not leak into the confirmation
    send(
        &app,
        with_json(
            "POST",
            "/v1/admin/products",
            Some(ADMIN),
            json!({"productId": "product-2", "name": "Phone Case", "description": "Silicone",
                   "price": 999, "sellerId": "seller-2"}),
        ),
    )
    .await;

    let (status, read_back) = send(&app, get(&format!("/v1/orders/{}", order_id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read_back, placed);
}

#[tokio::test]
async fn test_checkout_rejects_blank_fields() {
    let app = test_app();
    let mut details = shipping();
    details["phone"] = json!(" ");

    let (status, body) = send(
        &app,
        with_json("POST", "/v1/checkout/product-1", None, json!({ "shipping": details })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: phone");
}

#[tokio::test]
async fn test_admin_views_require_admin() {
    let app = test_app();

    let (status, body) = send(&app, get("/v1/admin/sellers", Some("buyer-1"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You must be an administrator to access this page.");

    let (status, _) = send(&app, get("/v1/admin/reviews", None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/v1/admin/reviews",
            Some("buyer-1"),
            json!({"reviewId": "r9", "productId": "product-1", "userId": "buyer-1", "rating": 5,
                   "content": "Self review", "usageDays": 1, "verified": true}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_review_search_includes_unverified() {
    let app = test_app();

    let (status, body) = send(&app, get("/v1/admin/reviews?q=BRASS", Some(ADMIN))).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["verified"], false);
    assert_eq!(rows[1]["productName"], "Brass Lamp");

    let (_, body) = send(&app, get("/v1/admin/sellers?q=quick", Some(ADMIN))).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["accountAgeLabel"], "0y 30d");

    let (_, body) = send(&app, get("/v1/admin/products?q=tea", Some(ADMIN))).await;
    assert!(body[0]["sellerName"].is_null());
}

#[tokio::test]
async fn test_session_roles_and_profile() {
    let app = test_app();

    let (_, body) = send(&app, get("/v1/session", None)).await;
    assert_eq!(body["role"], "guest");
    assert_eq!(body["isAdmin"], false);

    let (status, _) = send(
        &app,
        with_json("POST", "/v1/admin/roles", Some(ADMIN), json!({"principal": "buyer-7", "role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, get("/v1/session", Some("buyer-7"))).await;
    assert_eq!(body["role"], "admin");
    assert_eq!(body["principal"], "buyer-7");

    let (_, body) = send(&app, get("/v1/profile", Some("buyer-8"))).await;
    assert!(body.is_null());

    let profile = json!({"name": "Meena", "purchaseHistory": ["Brass Lamp"]});
    let (status, _) = send(&app, with_json("PUT", "/v1/profile", Some("buyer-8"), profile.clone())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, get("/v1/profile", Some("buyer-8"))).await;
    assert_eq!(body, profile);

    let (status, _) = send(&app, with_json("PUT", "/v1/profile", None, profile)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_order_is_404() {
    let app = test_app();
    let order_id = "7f0c8a9e-3b5d-4c1e-9a2f-0d6e4b8c1a37";

    let (status, body) = send(&app, get(&format!("/v1/orders/{}", order_id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("Order not found: {}", order_id));
}

#[tokio::test]
async fn test_full_order_book_refuses_placement() {
    let app = app(test_state(PricingConfig::default()).with_order_limit(1));
    let order = || with_json("POST", "/v1/checkout/product-1", None, json!({ "shipping": shipping() }));

    let (status, first) = send(&app, order()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, order()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Order book is full (1 orders)");

    // Earlier confirmations stay readable
    let order_id = first["orderId"].as_str().unwrap();
    let (status, _) = send(&app, get(&format!("/v1/orders/{}", order_id), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_checkout_total_excludes_warranty() {
    let app = app(test_state(PricingConfig {
        warranty_fee: 99,
        ..PricingConfig::default()
    }));

    let (_, detail) = send(&app, get("/v1/products/product-1", None)).await;
    assert_eq!(detail["breakdown"]["warrantyFee"], 99);
    assert_eq!(detail["breakdown"]["total"], 1329);

    let (_, preview) = send(&app, get("/v1/checkout/product-1", None)).await;
    assert_eq!(preview["breakdown"]["total"], 1230);

    let (_, placed) = send(
        &app,
        with_json("POST", "/v1/checkout/product-1", None, json!({ "shipping": shipping() })),
    )
    .await;
    assert_eq!(placed["breakdown"]["warrantyFee"], 0);
    assert_eq!(placed["breakdown"]["total"], 1230);
}

#[tokio::test]
async fn test_checkout_records_buyer_offset() {
    let app = test_app();

    let (status, placed) = send(
        &app,
        with_json(
            "POST",
            "/v1/checkout/product-1",
            None,
            json!({ "shipping": shipping(), "utcOffsetMinutes": 330 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["utcOffsetMinutes"], 330);
    assert_eq!(placed["placedAt"], placed["escrow"]["placedAt"]);

    let (status, body) = send(
        &app,
        with_json(
            "POST",
            "/v1/checkout/product-1",
            None,
            json!({ "shipping": shipping(), "utcOffsetMinutes": 2000 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "utcOffsetMinutes must be between -840 and 840, got 2000");
}
