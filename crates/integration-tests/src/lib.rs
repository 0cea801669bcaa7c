//! Integration tests for the storefront API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! docker compose up -d postgres
//! cargo run -p storefront-cli -- migrate
//!
//! # Start the server
//! cargo run -p storefront-server
//!
//! # Run the ignored integration tests
//! cargo test -p storefront-integration-tests -- --ignored
//! ```
//!
//! The tests talk to a running server over HTTP. The base URL defaults to
//! `http://localhost:8000` and can be overridden with `STOREFRONT_BASE_URL`.
//!
//! Identity is asserted via the `X-User-Id` / `X-User-Role` headers, the
//! same way the upstream proxy would in production. Each test uses fresh
//! random user ids so runs do not interfere with each other.

use reqwest::{Client, RequestBuilder};

/// Base URL for the storefront API (configurable via environment).
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Build the shared HTTP client.
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A fresh external user id, unlikely to collide across test runs.
pub fn fresh_user_id() -> i64 {
    // Truncated UUID timestamp bits keep ids positive and distinct enough
    i64::from(uuid::Uuid::new_v4().as_u128() as u32) + 1_000_000
}

/// Attach identity headers the way the upstream proxy does.
pub trait WithIdentity {
    fn as_customer(self, user_id: i64) -> Self;
    fn as_admin(self, user_id: i64) -> Self;
}

impl WithIdentity for RequestBuilder {
    fn as_customer(self, user_id: i64) -> Self {
        self.header("X-User-Id", user_id.to_string())
            .header("X-User-Role", "customer")
    }

    fn as_admin(self, user_id: i64) -> Self {
        self.header("X-User-Id", user_id.to_string())
            .header("X-User-Role", "admin")
    }
}
