//! Money helpers shared between the API and the seeder.
//!
//! Prices are plain [`Decimal`] values in the store's single currency.
//! The only derived money value the API exposes is the tax-inclusive
//! product price.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Multiplier applied to a unit price to obtain the tax-inclusive price.
///
/// Carried over from the storefront's pricing rules; a 1.8 factor on the
/// stored net price.
const TAX_MULTIPLIER_TENTHS: i64 = 18;

/// Compute the tax-inclusive price for a unit price.
#[must_use]
pub fn price_with_tax(unit_price: Decimal) -> Decimal {
    unit_price * Decimal::new(TAX_MULTIPLIER_TENTHS, 1)
}

/// Check that a unit price is a valid stored price (non-negative).
#[must_use]
pub fn validate_unit_price(unit_price: Decimal) -> bool {
    unit_price >= Decimal::ZERO
}

/// Check that a line quantity is valid (at least one unit).
#[must_use]
pub const fn validate_quantity(quantity: i32) -> bool {
    quantity >= 1
}

/// Line total for a quantity of units at a unit price.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from_i32(quantity).unwrap_or(Decimal::ZERO)
}
