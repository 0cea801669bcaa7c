//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;

pub use id::*;
pub use money::{line_total, price_with_tax, validate_quantity, validate_unit_price};
pub use status::*;
