//! Wire-format types.
//!
//! Every entity has an explicit request/response struct with an explicit
//! field list, decoupled from the row types in [`crate::models`]. Computed
//! fields (`price_with_tax`, `total_price`, `items_price`,
//! `products_count`) are filled during conversion, never stored.

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod order;

pub use cart::{AddCartItemRequest, CartDto, CartItemDto, UpdateCartItemRequest};
pub use catalog::{
    CollectionDto, CollectionRequest, ProductDto, ProductRequest, ReviewDto, ReviewRequest,
};
pub use customer::{CustomerCreateRequest, CustomerDto, CustomerUpdateRequest};
pub use order::{CreateOrderRequest, OrderDto, OrderItemDto, UpdateOrderRequest};
