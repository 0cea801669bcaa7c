//! Customer rows.

use chrono::NaiveDate;
use sqlx::FromRow;

use storefront_core::{CustomerId, Membership, UserId};

/// A customer record, keyed by the external user identity.
///
/// Created lazily by the customer directory on first authenticated access;
/// never deleted by order placement.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: CustomerId,
    #[sqlx(try_from = "i64")]
    pub user_id: UserId,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub membership: Membership,
}
