//! Customer request/response types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storefront_core::{CustomerId, Membership, UserId};

use crate::db::customers::CustomerProfile;
use crate::models::Customer;

/// A customer as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDto {
    pub id: CustomerId,
    pub user_id: UserId,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub membership: Membership,
}

impl From<Customer> for CustomerDto {
    fn from(row: Customer) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            phone: row.phone,
            birth_date: row.birth_date,
            membership: row.membership,
        }
    }
}

/// Payload for creating a customer record (admin operation).
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerCreateRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub membership: Membership,
}

impl CustomerCreateRequest {
    /// Split into the identity and the profile fields.
    #[must_use]
    pub fn into_parts(self) -> (UserId, CustomerProfile) {
        (
            self.user_id,
            CustomerProfile {
                phone: self.phone,
                birth_date: self.birth_date,
                membership: self.membership,
            },
        )
    }
}

/// Payload for replacing a customer's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub membership: Membership,
}

impl From<CustomerUpdateRequest> for CustomerProfile {
    fn from(request: CustomerUpdateRequest) -> Self {
        Self {
            phone: request.phone,
            birth_date: request.birth_date,
            membership: request.membership,
        }
    }
}
