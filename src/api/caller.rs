//! Caller identity extraction.
//!
//! The hosting environment passes the signer of each call in the
//! [`CALLER_HEADER`] header. Signature checking happens upstream; the
//! gateway only requires the header to be present and non-blank.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::Identity;
use crate::error::LedgerError;

/// Header carrying the caller principal.
pub const CALLER_HEADER: &str = "x-caller";

/// Extractor yielding the [`Identity`] of the caller.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = LedgerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(LedgerError::MissingCaller)?;
        Ok(Self(Identity::from(principal)))
    }
}
