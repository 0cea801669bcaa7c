//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! # Catalog
//! GET    /products                                  - Product listing (filter/search/order/page)
//! POST   /products                                  - Create product (admin)
//! GET    /products/{id}                             - Product detail
//! PUT    /products/{id}                             - Replace product (admin)
//! DELETE /products/{id}                             - Delete product (admin; 409 if ordered)
//! GET    /collections                               - Collection listing with product counts
//! POST   /collections                               - Create collection (admin)
//! GET    /collections/{id}                          - Collection detail
//! PUT    /collections/{id}                          - Replace collection (admin)
//! DELETE /collections/{id}                          - Delete collection (admin; 409 if non-empty)
//!
//! # Reviews (nested under product)
//! GET    /products/{id}/reviews                     - List reviews
//! POST   /products/{id}/reviews                     - Create review
//! GET    /products/{id}/reviews/{review_id}         - Review detail
//! PUT    /products/{id}/reviews/{review_id}         - Replace review
//! DELETE /products/{id}/reviews/{review_id}         - Delete review
//!
//! # Carts
//! POST   /carts                                     - Create empty cart
//! GET    /carts/{id}                                - Cart with items and totals
//! DELETE /carts/{id}                                - Delete cart
//! GET    /carts/{id}/items                          - List cart lines
//! POST   /carts/{id}/items                          - Add product (merges quantities)
//! PATCH  /carts/{id}/items/{item_id}                - Change line quantity
//! DELETE /carts/{id}/items/{item_id}                - Remove line
//!
//! # Customers
//! GET    /customers                                 - List customers (admin)
//! POST   /customers                                 - Create customer (admin)
//! GET    /customers/{id}                            - Customer detail (admin)
//! PUT    /customers/{id}                            - Replace customer profile (admin)
//! DELETE /customers/{id}                            - Delete customer (admin)
//! GET    /customers/me                              - Caller's own record (get-or-create)
//! PUT    /customers/me                              - Update caller's own record
//!
//! # Orders
//! GET    /orders                                    - Admin: all orders; customer: own orders
//! POST   /orders                                    - Place order from a cart
//! GET    /orders/{id}                               - Order detail (owner or admin)
//! PATCH  /orders/{id}                               - Update payment status (admin)
//! DELETE /orders/{id}                               - Delete order (admin)
//! ```

pub mod carts;
pub mod collections;
pub mod customers;
pub mod orders;
pub mod products;
pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Assemble all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(collections::routes())
        .merge(reviews::routes())
        .merge(carts::routes())
        .merge(customers::routes())
        .merge(orders::routes())
}
