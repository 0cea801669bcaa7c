//! Authorization policy.
//!
//! A single explicit table mapping each protected action to the minimum
//! role it requires, evaluated in handlers before any work happens. Row
//! scoping (a customer only seeing their own orders) is applied separately
//! by the handlers.

use storefront_core::Role;

use crate::error::AppError;
use crate::middleware::auth::Identity;

/// Everything a caller can ask the API to do, grouped by required privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create, replace, or delete products and collections.
    EditCatalog,
    /// List, inspect, create, or delete customer records.
    ManageCustomers,
    /// Read or update the caller's own customer record.
    ViewOwnCustomer,
    /// Place an order from a cart.
    PlaceOrder,
    /// List or retrieve orders (scoped to the caller unless admin).
    ViewOrders,
    /// Change payment status or delete orders.
    EditOrders,
}

/// The minimum role required for an action.
#[must_use]
pub const fn required_role(action: Action) -> Role {
    match action {
        Action::EditCatalog
        | Action::ManageCustomers
        | Action::EditOrders => Role::Admin,
        Action::ViewOwnCustomer | Action::PlaceOrder | Action::ViewOrders => Role::Customer,
    }
}

/// Whether `role` meets a required role.
#[must_use]
pub const fn satisfies(role: Role, required: Role) -> bool {
    match required {
        Role::Customer => true,
        Role::Admin => matches!(role, Role::Admin),
    }
}

/// Check that the identity may perform the action.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the caller's role is insufficient.
pub fn authorize(identity: &Identity, action: Action) -> Result<(), AppError> {
    let required = required_role(action);
    if satisfies(identity.role, required) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "requires {required} role"
        )))
    }
}
