//! Cart request/response types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{
    CartId, CartItemId, ProductId, line_total, price_with_tax, validate_quantity,
};

use crate::error::AppError;
use crate::models::{Cart, CartLine};

use super::catalog::ProductDto;

/// A cart line as returned by the API, with its product and line total.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemDto {
    pub id: CartItemId,
    pub product: ProductDto,
    pub quantity: i32,
    pub total_price: Decimal,
}

impl From<CartLine> for CartItemDto {
    fn from(line: CartLine) -> Self {
        let total_price = line_total(line.product_unit_price, line.quantity);
        Self {
            id: line.id,
            product: ProductDto {
                id: line.product_id,
                title: line.product_title,
                slug: line.product_slug,
                description: line.product_description,
                unit_price: line.product_unit_price,
                price_with_tax: price_with_tax(line.product_unit_price),
                inventory: line.product_inventory,
                collection_id: line.product_collection_id,
            },
            quantity: line.quantity,
            total_price,
        }
    }
}

/// A cart as returned by the API, with its lines and overall total.
#[derive(Debug, Clone, Serialize)]
pub struct CartDto {
    pub id: CartId,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartItemDto>,
    pub items_price: Decimal,
}

impl CartDto {
    /// Assemble a cart response from its row and lines.
    #[must_use]
    pub fn assemble(cart: Cart, lines: Vec<CartLine>) -> Self {
        let items: Vec<CartItemDto> = lines.into_iter().map(CartItemDto::from).collect();
        let items_price = items.iter().map(|item| item.total_price).sum();
        Self {
            id: cart.id,
            created_at: cart.created_at,
            items,
            items_price,
        }
    }
}

/// Payload for adding a product to a cart.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

impl AddCartItemRequest {
    /// Validate the quantity.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a quantity below one.
    pub fn validate(&self) -> Result<(), AppError> {
        if validate_quantity(self.quantity) {
            Ok(())
        } else {
            Err(AppError::Validation(
                "quantity must be at least 1".to_owned(),
            ))
        }
    }
}

/// Payload for changing a cart line's quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

impl UpdateCartItemRequest {
    /// Validate the quantity.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a quantity below one.
    pub fn validate(&self) -> Result<(), AppError> {
        if validate_quantity(self.quantity) {
            Ok(())
        } else {
            Err(AppError::Validation(
                "quantity must be at least 1".to_owned(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use storefront_core::CollectionId;

    fn line(product_id: i32, unit_price: &str, quantity: i32) -> CartLine {
        CartLine {
            id: CartItemId::new(product_id),
            quantity,
            product_id: ProductId::new(product_id),
            product_title: "x".to_owned(),
            product_slug: "x".to_owned(),
            product_description: None,
            product_unit_price: Decimal::from_str(unit_price).expect("valid decimal"),
            product_inventory: 10,
            product_collection_id: CollectionId::new(1),
        }
    }

    #[test]
    fn test_cart_totals() {
        let cart = Cart {
            id: CartId::generate(),
            created_at: Utc::now(),
        };
        let dto = CartDto::assemble(cart, vec![line(1, "10.00", 2), line(2, "5.00", 1)]);

        assert_eq!(dto.items.len(), 2);
        assert_eq!(
            dto.items.first().map(|item| item.total_price),
            Some(Decimal::from_str("20.00").expect("valid decimal"))
        );
        assert_eq!(
            dto.items_price,
            Decimal::from_str("25.00").expect("valid decimal")
        );
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart {
            id: CartId::generate(),
            created_at: Utc::now(),
        };
        let dto = CartDto::assemble(cart, Vec::new());
        assert_eq!(dto.items_price, Decimal::ZERO);
    }

    #[test]
    fn test_add_item_quantity_validation() {
        let request = AddCartItemRequest {
            product_id: ProductId::new(1),
            quantity: 0,
        };
        assert!(request.validate().is_err());

        let request = AddCartItemRequest {
            product_id: ProductId::new(1),
            quantity: 3,
        };
        assert!(request.validate().is_ok());
    }
}
