//! Request identity extraction
//!
//! Authentication itself lives in the gateway in front of this service.
//! By the time a request arrives here, the gateway has verified the
//! caller and stamped `X-User-Id` and `X-User-Role` headers; this module
//! only reads them back.

use crate::orders::RequestUser;
use crate::utils::{AppError, ErrorCode};
use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

fn parse_user(parts: &Parts) -> Option<RequestUser> {
    let id = parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())?;

    let is_admin = parts
        .headers
        .get(USER_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|role| role.eq_ignore_ascii_case("admin"));

    Some(RequestUser {
        id: id.to_string(),
        is_admin,
    })
}

impl<S> FromRequestParts<S> for RequestUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_user(parts).ok_or_else(AppError::not_authenticated)
    }
}

impl<S> OptionalFromRequestParts<S> for RequestUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parse_user(parts))
    }
}

/// Reject non-admin callers
pub fn require_admin(user: &RequestUser) -> Result<(), AppError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::AdminRequired))
    }
}
