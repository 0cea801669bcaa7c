//! Caller identity extractor.
//!
//! The API sits behind an authenticating proxy which asserts the caller's
//! identity in two request headers:
//!
//! - `X-User-Id` - the external user identity (integer)
//! - `X-User-Role` - `customer` or `admin` (defaults to `customer`)
//!
//! Handlers that take an [`Identity`] argument reject unauthenticated
//! requests with 401 before running.

use axum::{extract::FromRequestParts, http::request::Parts};

use storefront_core::{Role, UserId};

use crate::error::AppError;

/// Header carrying the external user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the asserted role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller, as asserted by the upstream proxy.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    /// Whether the caller is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Parse the identity headers.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` when the user id header is absent or
/// either header does not parse.
pub fn parse_identity(
    user_id: Option<&str>,
    role: Option<&str>,
) -> Result<Identity, AppError> {
    let user_id = user_id
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?
        .parse::<i64>()
        .map_err(|_| AppError::Unauthorized("invalid user id header".to_owned()))?;

    let role = match role {
        None => Role::Customer,
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Unauthorized("invalid role header".to_owned()))?,
    };

    Ok(Identity {
        user_id: UserId::new(user_id),
        role,
    })
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
        };
        parse_identity(header(USER_ID_HEADER), header(USER_ROLE_HEADER))
    }
}
