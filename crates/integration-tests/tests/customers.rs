//! Integration tests for the customer directory.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p storefront-server)
//!
//! Run with: cargo test -p storefront-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use storefront_integration_tests::{WithIdentity, base_url, client, fresh_user_id};

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_me_lazily_creates_and_is_idempotent() {
    let client = client();
    let user = fresh_user_id();

    // First call creates the record with profile defaults
    let resp = client
        .get(format!("{}/customers/me", base_url()))
        .as_customer(user)
        .send()
        .await
        .expect("Failed to get current customer");
    assert_eq!(resp.status(), StatusCode::OK);
    let first: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(first["user_id"].as_i64(), Some(user));
    assert_eq!(first["membership"], "bronze");
    assert_eq!(first["phone"], "");

    // Second call returns the same record
    let resp = client
        .get(format!("{}/customers/me", base_url()))
        .as_customer(user)
        .send()
        .await
        .expect("Failed to get current customer");
    assert_eq!(resp.status(), StatusCode::OK);
    let second: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(second["id"], first["id"]);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_me_profile_update() {
    let client = client();
    let user = fresh_user_id();

    let resp = client
        .put(format!("{}/customers/me", base_url()))
        .as_customer(user)
        .json(&json!({
            "phone": "555-0101",
            "birth_date": "1990-04-12",
            "membership": "silver",
        }))
        .send()
        .await
        .expect("Failed to update current customer");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["phone"], "555-0101");
    assert_eq!(body["birth_date"], "1990-04-12");
    assert_eq!(body["membership"], "silver");

    // The update sticks
    let resp = client
        .get(format!("{}/customers/me", base_url()))
        .as_customer(user)
        .send()
        .await
        .expect("Failed to get current customer");
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["phone"], "555-0101");
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_directory_endpoints_are_admin_only() {
    let client = client();
    let user = fresh_user_id();

    // Customer role cannot list the directory
    let resp = client
        .get(format!("{}/customers", base_url()))
        .as_customer(user)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Anonymous cannot see /me
    let resp = client
        .get(format!("{}/customers/me", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Admin can list with pagination metadata
    let admin = fresh_user_id();
    let resp = client
        .get(format!("{}/customers?page=1&page_size=5", base_url()))
        .as_admin(admin)
        .send()
        .await
        .expect("Failed to list customers");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["page"].as_i64(), Some(1));
    assert_eq!(body["page_size"].as_i64(), Some(5));
    assert!(body["total"].as_i64().is_some());
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_admin_create_conflicts_on_duplicate_user() {
    let client = client();
    let admin = fresh_user_id();
    let user = fresh_user_id();

    let resp = client
        .post(format!("{}/customers", base_url()))
        .as_admin(admin)
        .json(&json!({ "user_id": user, "phone": "555-0102" }))
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Same external user again is a conflict
    let resp = client
        .post(format!("{}/customers", base_url()))
        .as_admin(admin)
        .json(&json!({ "user_id": user }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert!(body["error"].as_str().is_some());
}
