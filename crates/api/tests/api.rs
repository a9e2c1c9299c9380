//! End-to-end tests driving the full router over in-process requests.
//!
//! Each test builds a fresh seeded store and app, then speaks plain HTTP
//! through `tower::ServiceExt::oneshot`. OTP codes are read back from the
//! store handle, the same way an operator would read them from the logs in
//! development.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use charkha_api::config::ApiConfig;
use charkha_api::routes::app;
use charkha_api::services::sms::ConsoleSms;
use charkha_api::state::AppState;
use charkha_api::store::{MemStore, Storage};
use charkha_core::{OtpCode, Phone};

const ADMIN_PHONE: &str = "+919999999999";
const CUSTOMER_PHONE: &str = "+919876543210";
const OTHER_PHONE: &str = "+919876543211";

fn test_config() -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        jwt_secret: SecretString::from("k9#mP2$vL8@qR5!wX3^zB7&nF4*jH6supercharged"),
        sentry_dsn: None,
    }
}

fn test_app() -> (Router, Arc<MemStore>) {
    let store = Arc::new(MemStore::with_seed_data());
    let state = AppState::new(test_config(), store.clone(), Arc::new(ConsoleSms));
    (app(state), store)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn req(method: &str, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read the outstanding OTP for a phone straight from the store.
async fn issued_otp(store: &MemStore, phone: &str) -> OtpCode {
    let phone = Phone::parse(phone).unwrap();
    store
        .user_by_phone(&phone)
        .await
        .unwrap()
        .unwrap()
        .otp_code
        .unwrap()
}

/// Run the full OTP flow for `phone` and return a bearer token.
async fn login(app: &Router, store: &MemStore, phone: &str) -> String {
    let (status, _) = send(
        app,
        req("POST", "/api/auth/request-otp", None, Some(&json!({"phone": phone}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let code = issued_otp(store, phone).await;
    let (status, body) = send(
        app,
        req(
            "POST",
            "/api/auth/verify-otp",
            None,
            Some(&json!({"phone": phone, "otpCode": code.as_str()})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(req("GET", "/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(req("GET", "/health/ready", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_otp_login_flow() {
    let (app, store) = test_app();

    let (status, body) = send(
        &app,
        req(
            "POST",
            "/api/auth/request-otp",
            None,
            Some(&json!({"phone": CUSTOMER_PHONE})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OTP sent successfully");
    assert_eq!(body["phone"], CUSTOMER_PHONE);
    // The code itself never appears in the response.
    assert!(body.get("otpCode").is_none());

    let code = issued_otp(&store, CUSTOMER_PHONE).await;

    // A wrong code is rejected and leaves the issued one usable.
    let wrong = if code.as_str() == "000000" { "000001" } else { "000000" };
    let (status, body) = send(
        &app,
        req(
            "POST",
            "/api/auth/verify-otp",
            None,
            Some(&json!({"phone": CUSTOMER_PHONE, "otpCode": wrong})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired OTP");

    let (status, body) = send(
        &app,
        req(
            "POST",
            "/api/auth/verify-otp",
            None,
            Some(&json!({"phone": CUSTOMER_PHONE, "otpCode": code.as_str()})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert!(body["user"]["name"].is_null());
    assert_eq!(body["user"]["isAdmin"], false);
    assert!(body["user"].get("otpCode").is_none());

    // Single use: the same code fails the second time.
    let (status, _) = send(
        &app,
        req(
            "POST",
            "/api/auth/verify-otp",
            None,
            Some(&json!({"phone": CUSTOMER_PHONE, "otpCode": code.as_str()})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_otp_rejected() {
    let (app, store) = test_app();

    send(
        &app,
        req(
            "POST",
            "/api/auth/request-otp",
            None,
            Some(&json!({"phone": CUSTOMER_PHONE})),
        ),
    )
    .await;

    // Backdate the expiry past the validity window.
    let phone = Phone::parse(CUSTOMER_PHONE).unwrap();
    let code = issued_otp(&store, CUSTOMER_PHONE).await;
    store
        .set_otp(&phone, code.clone(), Utc::now() - Duration::minutes(1))
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        req(
            "POST",
            "/api/auth/verify-otp",
            None,
            Some(&json!({"phone": CUSTOMER_PHONE, "otpCode": code.as_str()})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // Indistinguishable from a wrong code.
    assert_eq!(body["message"], "Invalid or expired OTP");
}

#[tokio::test]
async fn test_malformed_phone_rejected() {
    let (app, _) = test_app();

    let (status, _) = send(
        &app,
        req(
            "POST",
            "/api/auth/request-otp",
            None,
            Some(&json!({"phone": "9876543210"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_completion() {
    let (app, store) = test_app();
    let token = login(&app, &store, CUSTOMER_PHONE).await;

    let (status, body) = send(
        &app,
        req(
            "PATCH",
            "/api/auth/profile",
            Some(&token),
            Some(&json!({"name": "Asha", "email": "asha@example.com"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Asha");
    assert_eq!(body["email"], "asha@example.com");

    let (status, body) = send(&app, req("GET", "/api/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Asha");

    // Too-short name is rejected.
    let (status, _) = send(
        &app,
        req(
            "PATCH",
            "/api/auth/profile",
            Some(&token),
            Some(&json!({"name": "A"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_auth_required() {
    let (app, _) = test_app();

    let (status, _) = send(&app, req("GET", "/api/auth/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, req("GET", "/api/addresses", Some("garbage"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, req("GET", "/api/orders", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

fn address_body(label: &str, is_default: bool) -> Value {
    json!({
        "label": label,
        "addressLine1": "42 MG Road",
        "city": "Bengaluru",
        "state": "Karnataka",
        "pincode": "560001",
        "isDefault": is_default,
    })
}

#[tokio::test]
async fn test_default_address_exclusivity() {
    let (app, store) = test_app();
    let token = login(&app, &store, CUSTOMER_PHONE).await;

    let (status, first) = send(
        &app,
        req(
            "POST",
            "/api/addresses",
            Some(&token),
            Some(&address_body("Home", true)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["isDefault"], true);

    // A second default demotes the first.
    let (status, second) = send(
        &app,
        req(
            "POST",
            "/api/addresses",
            Some(&token),
            Some(&address_body("Office", true)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = send(&app, req("GET", "/api/addresses", Some(&token), None)).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    let defaults: Vec<_> = list.iter().filter(|a| a["isDefault"] == true).collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["id"], second["id"]);
    // Default sorts first.
    assert_eq!(list[0]["id"], second["id"]);

    // Deleting the default leaves zero defaults; nothing is promoted.
    let (status, _) = send(
        &app,
        req(
            "DELETE",
            &format!("/api/addresses/{}", second["id"].as_str().unwrap()),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, req("GET", "/api/addresses", Some(&token), None)).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["isDefault"], false);
}

#[tokio::test]
async fn test_addresses_are_owner_scoped() {
    let (app, store) = test_app();
    let owner = login(&app, &store, CUSTOMER_PHONE).await;
    let intruder = login(&app, &store, OTHER_PHONE).await;

    let (_, created) = send(
        &app,
        req(
            "POST",
            "/api/addresses",
            Some(&owner),
            Some(&address_body("Home", false)),
        ),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_owned();

    // A foreign id behaves exactly like an unknown one.
    let (status, _) = send(
        &app,
        req(
            "PATCH",
            &format!("/api/addresses/{id}"),
            Some(&intruder),
            Some(&json!({"label": "Stolen"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        req("DELETE", &format!("/api/addresses/{id}"), Some(&intruder), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, req("GET", "/api/addresses", Some(&intruder), None)).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_catalog_public_reads() {
    let (app, _) = test_app();

    let (status, body) = send(&app, req("GET", "/api/products", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 4);
    // Prices serialize as 2dp strings.
    assert!(products.iter().any(|p| p["price"] == "2499.00"));

    let id = products[0]["id"].as_str().unwrap();
    let (status, body) = send(&app, req("GET", &format!("/api/products/{id}"), None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], products[0]["id"]);

    // Malformed and unknown ids both 404.
    let (status, _) = send(&app, req("GET", "/api/products/not-a-uuid", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_writes_are_admin_only() {
    let (app, store) = test_app();
    let customer = login(&app, &store, CUSTOMER_PHONE).await;
    let admin = login(&app, &store, ADMIN_PHONE).await;

    let product = json!({
        "name": "Indigo Linen Kurta",
        "description": "Breathable linen kurta dyed with natural indigo.",
        "price": "1999.00",
        "image": "/assets/products/indigo-kurta.png",
        "category": "kurta",
        "sizes": ["S", "M", "L"],
    });

    let (status, _) = send(
        &app,
        req("POST", "/api/products", Some(&customer), Some(&product)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(
        &app,
        req("POST", "/api/products", Some(&admin), Some(&product)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["inStock"], true);
    assert_eq!(created["featured"], false);
    let id = created["id"].as_str().unwrap().to_owned();

    let (status, updated) = send(
        &app,
        req(
            "PATCH",
            &format!("/api/products/{id}"),
            Some(&admin),
            Some(&json!({"inStock": false})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["inStock"], false);

    let (status, _) = send(
        &app,
        req("DELETE", &format!("/api/products/{id}"), Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, req("GET", &format!("/api/products/{id}"), None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn checkout_body(product: &Value) -> Value {
    json!({
        "items": [{
            "productId": product["id"],
            "name": product["name"],
            "size": "M",
            "quantity": 2,
            "price": product["price"],
        }],
        "totalAmount": "4998.00",
        "shippingAddress": "42 MG Road, Bengaluru, Karnataka 560001",
    })
}

#[tokio::test]
async fn test_order_placement_and_snapshot() {
    let (app, store) = test_app();
    let customer = login(&app, &store, CUSTOMER_PHONE).await;
    let admin = login(&app, &store, ADMIN_PHONE).await;

    let (_, products) = send(&app, req("GET", "/api/products", None, None)).await;
    let product = &products.as_array().unwrap()[0];

    let (status, order) = send(
        &app,
        req(
            "POST",
            "/api/orders",
            Some(&customer),
            Some(&checkout_body(product)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["paymentStatus"], "pending");
    assert_eq!(order["totalAmount"], "4998.00");

    // Renaming the product afterwards never touches the snapshot.
    let product_id = product["id"].as_str().unwrap();
    send(
        &app,
        req(
            "PATCH",
            &format!("/api/products/{product_id}"),
            Some(&admin),
            Some(&json!({"name": "Renamed"})),
        ),
    )
    .await;

    let (_, orders) = send(&app, req("GET", "/api/orders", Some(&customer), None)).await;
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["items"][0]["name"], product["name"]);
}

#[tokio::test]
async fn test_order_validation() {
    let (app, store) = test_app();
    let customer = login(&app, &store, CUSTOMER_PHONE).await;

    let (status, _) = send(
        &app,
        req(
            "POST",
            "/api/orders",
            Some(&customer),
            Some(&json!({
                "items": [],
                "totalAmount": "0.00",
                "shippingAddress": "42 MG Road, Bengaluru, Karnataka 560001",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // An address id belonging to nobody is a 404.
    let (_, products) = send(&app, req("GET", "/api/products", None, None)).await;
    let mut body = checkout_body(&products.as_array().unwrap()[0]);
    body["addressId"] = json!(uuid::Uuid::new_v4().to_string());
    let (status, _) = send(&app, req("POST", "/api/orders", Some(&customer), Some(&body))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_order_workflow() {
    let (app, store) = test_app();
    let customer = login(&app, &store, CUSTOMER_PHONE).await;
    let admin = login(&app, &store, ADMIN_PHONE).await;

    let (_, products) = send(&app, req("GET", "/api/products", None, None)).await;
    let (_, order) = send(
        &app,
        req(
            "POST",
            "/api/orders",
            Some(&customer),
            Some(&checkout_body(&products.as_array().unwrap()[0])),
        ),
    )
    .await;
    let order_id = order["id"].as_str().unwrap().to_owned();

    // Customers cannot reach the admin surface.
    let (status, _) = send(&app, req("GET", "/api/admin/orders", Some(&customer), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, all) = send(&app, req("GET", "/api/admin/orders", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        req(
            "PATCH",
            &format!("/api/admin/orders/{order_id}/status"),
            Some(&admin),
            Some(&json!({"status": "shipped"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "shipped");

    let (status, _) = send(
        &app,
        req(
            "PATCH",
            &format!("/api/admin/orders/{order_id}/status"),
            Some(&customer),
            Some(&json!({"status": "delivered"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_orders_are_owner_scoped() {
    let (app, store) = test_app();
    let buyer = login(&app, &store, CUSTOMER_PHONE).await;
    let other = login(&app, &store, OTHER_PHONE).await;

    let (_, products) = send(&app, req("GET", "/api/products", None, None)).await;
    send(
        &app,
        req(
            "POST",
            "/api/orders",
            Some(&buyer),
            Some(&checkout_body(&products.as_array().unwrap()[0])),
        ),
    )
    .await;

    let (_, own) = send(&app, req("GET", "/api/orders", Some(&other), None)).await;
    assert_eq!(own.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_payment_intent_is_stubbed() {
    let (app, store) = test_app();
    let token = login(&app, &store, CUSTOMER_PHONE).await;

    let (status, body) = send(
        &app,
        req("POST", "/api/payments/intent", Some(&token), Some(&json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["message"].as_str().unwrap().contains("Payment integration"));
}
