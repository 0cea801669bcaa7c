//! Database row types.
//!
//! These structs mirror the tables in the `store` schema one-to-one and are
//! produced by the repositories in [`crate::db`]. The wire representation is
//! separate: see [`crate::dto`] for the explicit response/request structs.

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod order;

pub use cart::{Cart, CartLine};
pub use catalog::{CollectionWithCount, Product, Review};
pub use customer::Customer;
pub use order::{Order, OrderItem};
