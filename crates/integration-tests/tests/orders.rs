//! Integration tests for order placement.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p storefront-server)
//!
//! Run with: cargo test -p storefront-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use storefront_integration_tests::{WithIdentity, base_url, client, fresh_user_id};

/// Test helper: seed a product at the given price, returning its id.
async fn seed_product(client: &Client, title: &str, unit_price: &str) -> i64 {
    let admin = fresh_user_id();
    let resp = client
        .post(format!("{}/collections", base_url()))
        .as_admin(admin)
        .json(&json!({ "title": "Order Test Collection" }))
        .send()
        .await
        .expect("Failed to create collection");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let collection: Value = resp.json().await.expect("Failed to read response");

    let slug = format!("order-item-{}", uuid::Uuid::new_v4().simple());
    let resp = client
        .post(format!("{}/products", base_url()))
        .as_admin(admin)
        .json(&json!({
            "title": title,
            "slug": slug,
            "unit_price": unit_price,
            "inventory": 100,
            "collection_id": collection["id"],
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.expect("Failed to read response");
    product["id"].as_i64().expect("product id")
}

/// Test helper: build a cart with the given (product, quantity) lines.
async fn build_cart(client: &Client, lines: &[(i64, i32)]) -> String {
    let resp = client
        .post(format!("{}/carts", base_url()))
        .send()
        .await
        .expect("Failed to create cart");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to read response");
    let cart = body["id"].as_str().expect("cart id").to_owned();

    for (product_id, quantity) in lines {
        let resp = client
            .post(format!("{}/carts/{cart}/items", base_url()))
            .json(&json!({ "product_id": product_id, "quantity": quantity }))
            .send()
            .await
            .expect("Failed to add item");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    cart
}

fn as_f64(value: &Value) -> f64 {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("decimal string")
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_order_snapshots_cart_lines_and_deletes_the_cart() {
    let client = client();
    let user = fresh_user_id();

    let coffee = seed_product(&client, "Coffee", "10.00").await;
    let honey = seed_product(&client, "Honey", "5.00").await;
    let cart = build_cart(&client, &[(coffee, 2), (honey, 1)]).await;

    let resp = client
        .post(format!("{}/orders", base_url()))
        .as_customer(user)
        .json(&json!({ "cart_id": cart }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to read response");

    assert_eq!(order["payment_status"], "pending");
    let items = order["items"].as_array().expect("items array");
    assert_eq!(items.len(), 2);

    // Each line carries the product's price at placement time
    for item in items {
        if item["product_id"].as_i64() == Some(coffee) {
            assert_eq!(item["quantity"].as_i64(), Some(2));
            assert!((as_f64(&item["unit_price"]) - 10.0).abs() < 1e-9);
        } else {
            assert_eq!(item["product_id"].as_i64(), Some(honey));
            assert_eq!(item["quantity"].as_i64(), Some(1));
            assert!((as_f64(&item["unit_price"]) - 5.0).abs() < 1e-9);
        }
    }

    // The cart is consumed by placement
    let resp = client
        .get(format!("{}/carts/{cart}", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // And a second placement against it fails cleanly
    let resp = client
        .post(format!("{}/orders", base_url()))
        .as_customer(user)
        .json(&json!({ "cart_id": cart }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_snapshot_prices_survive_later_product_edits() {
    let client = client();
    let user = fresh_user_id();
    let admin = fresh_user_id();

    let product = seed_product(&client, "Volatile", "10.00").await;
    let cart = build_cart(&client, &[(product, 1)]).await;

    let resp = client
        .post(format!("{}/orders", base_url()))
        .as_customer(user)
        .json(&json!({ "cart_id": cart }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to read response");
    let order_id = order["id"].as_i64().expect("order id");

    // Reprice the product after the fact
    let resp = client
        .get(format!("{}/products/{product}", base_url()))
        .send()
        .await
        .expect("Failed to get product");
    let current: Value = resp.json().await.expect("Failed to read response");
    let resp = client
        .put(format!("{}/products/{product}", base_url()))
        .as_admin(admin)
        .json(&json!({
            "title": current["title"],
            "slug": current["slug"],
            "unit_price": "99.00",
            "inventory": current["inventory"],
            "collection_id": current["collection_id"],
        }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);

    // The order still shows the price paid
    let resp = client
        .get(format!("{}/orders/{order_id}", base_url()))
        .as_customer(user)
        .send()
        .await
        .expect("Failed to get order");
    assert_eq!(resp.status(), StatusCode::OK);
    let order: Value = resp.json().await.expect("Failed to read response");
    let items = order["items"].as_array().expect("items array");
    assert!((as_f64(&items[0]["unit_price"]) - 10.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_order_placement_rejections() {
    let client = client();
    let user = fresh_user_id();

    // Empty cart
    let cart = build_cart(&client, &[]).await;
    let resp = client
        .post(format!("{}/orders", base_url()))
        .as_customer(user)
        .json(&json!({ "cart_id": cart }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Unknown cart
    let ghost = uuid::Uuid::new_v4();
    let resp = client
        .post(format!("{}/orders", base_url()))
        .as_customer(user)
        .json(&json!({ "cart_id": ghost }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // No identity
    let resp = client
        .post(format!("{}/orders", base_url()))
        .json(&json!({ "cart_id": ghost }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_order_visibility_is_scoped_to_the_owner() {
    let client = client();
    let owner = fresh_user_id();
    let stranger = fresh_user_id();

    let product = seed_product(&client, "Private", "7.00").await;
    let cart = build_cart(&client, &[(product, 1)]).await;

    let resp = client
        .post(format!("{}/orders", base_url()))
        .as_customer(owner)
        .json(&json!({ "cart_id": cart }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to read response");
    let order_id = order["id"].as_i64().expect("order id");

    // The owner sees it
    let resp = client
        .get(format!("{}/orders/{order_id}", base_url()))
        .as_customer(owner)
        .send()
        .await
        .expect("Failed to get order");
    assert_eq!(resp.status(), StatusCode::OK);

    // Another customer gets 404, not 403
    let resp = client
        .get(format!("{}/orders/{order_id}", base_url()))
        .as_customer(stranger)
        .send()
        .await
        .expect("Failed to get order");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // An admin sees it and can settle it
    let admin = fresh_user_id();
    let resp = client
        .patch(format!("{}/orders/{order_id}", base_url()))
        .as_admin(admin)
        .json(&json!({ "payment_status": "complete" }))
        .send()
        .await
        .expect("Failed to update order");
    assert_eq!(resp.status(), StatusCode::OK);
    let order: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(order["payment_status"], "complete");
}
