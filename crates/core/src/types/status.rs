//! Status and role enums for the storefront domain.

use serde::{Deserialize, Serialize};

/// Payment status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "store.payment_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Complete,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Complete => write!(f, "complete"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Customer membership tier.
///
/// New customers created by the directory always start at `Bronze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "store.membership", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    #[default]
    Bronze,
    Silver,
    Gold,
}

/// Caller role as asserted by the upstream authentication proxy.
///
/// Not persisted; used only for authorization decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular storefront customer.
    Customer,
    /// Staff member with full access to store management.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).expect("serialize"),
            "\"pending\""
        );
        let status: PaymentStatus = serde_json::from_str("\"complete\"").expect("deserialize");
        assert_eq!(status, PaymentStatus::Complete);
    }

    #[test]
    fn test_membership_default_is_bronze() {
        assert_eq!(Membership::default(), Membership::Bronze);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("customer".parse::<Role>(), Ok(Role::Customer));
        assert!("staff".parse::<Role>().is_err());
    }
}
