//! Integration tests for anonymous carts.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p storefront-server)
//!
//! Run with: cargo test -p storefront-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use storefront_integration_tests::{WithIdentity, base_url, client, fresh_user_id};

/// Test helper: seed a product the cart tests can reference.
async fn seed_product(client: &Client, unit_price: &str) -> i64 {
    let admin = fresh_user_id();
    let resp = client
        .post(format!("{}/collections", base_url()))
        .as_admin(admin)
        .json(&json!({ "title": "Cart Test Collection" }))
        .send()
        .await
        .expect("Failed to create collection");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let collection: Value = resp.json().await.expect("Failed to read response");

    let slug = format!("cart-item-{}", uuid::Uuid::new_v4().simple());
    let resp = client
        .post(format!("{}/products", base_url()))
        .as_admin(admin)
        .json(&json!({
            "title": "Cart Test Product",
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

/// Test helper: create an empty cart, returning its UUID id.
async fn create_cart(client: &Client) -> String {
    let resp = client
        .post(format!("{}/carts", base_url()))
        .send()
        .await
        .expect("Failed to create cart");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to read response");
    body["id"].as_str().expect("cart id").to_owned()
}

fn as_f64(value: &Value) -> f64 {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("decimal string")
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_adding_same_product_merges_quantities() {
    let client = client();
    let product = seed_product(&client, "10.00").await;
    let cart = create_cart(&client).await;

    for _ in 0..2 {
        let resp = client
            .post(format!("{}/carts/{cart}/items", base_url()))
            .json(&json!({ "product_id": product, "quantity": 2 }))
            .send()
            .await
            .expect("Failed to add item");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = client
        .get(format!("{}/carts/{cart}", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");

    // One merged line of four units, not two lines of two
    let items = body["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"].as_i64(), Some(4));
    assert!((as_f64(&items[0]["total_price"]) - 40.0).abs() < 1e-9);
    assert!((as_f64(&body["items_price"]) - 40.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_item_quantity_update_and_removal() {
    let client = client();
    let product = seed_product(&client, "5.00").await;
    let cart = create_cart(&client).await;

    let resp = client
        .post(format!("{}/carts/{cart}/items", base_url()))
        .json(&json!({ "product_id": product, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Value = resp.json().await.expect("Failed to read response");
    let item_id = item["id"].as_i64().expect("item id");

    // Raise the quantity
    let resp = client
        .patch(format!("{}/carts/{cart}/items/{item_id}", base_url()))
        .json(&json!({ "quantity": 3 }))
        .send()
        .await
        .expect("Failed to update item");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["quantity"].as_i64(), Some(3));

    // Remove the line
    let resp = client
        .delete(format!("{}/carts/{cart}/items/{item_id}", base_url()))
        .send()
        .await
        .expect("Failed to delete item");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/carts/{cart}", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_cart_validation_errors() {
    let client = client();
    let product = seed_product(&client, "5.00").await;
    let cart = create_cart(&client).await;

    // Zero quantity is rejected
    let resp = client
        .post(format!("{}/carts/{cart}/items", base_url()))
        .json(&json!({ "product_id": product, "quantity": 0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Unknown product is rejected
    let resp = client
        .post(format!("{}/carts/{cart}/items", base_url()))
        .json(&json!({ "product_id": 0, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Unknown cart is a 404
    let ghost = uuid::Uuid::new_v4();
    let resp = client
        .post(format!("{}/carts/{ghost}/items", base_url()))
        .json(&json!({ "product_id": product, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server and database"]
async fn test_cart_delete() {
    let client = client();
    let cart = create_cart(&client).await;

    let resp = client
        .delete(format!("{}/carts/{cart}", base_url()))
        .send()
        .await
        .expect("Failed to delete cart");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/carts/{cart}", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
