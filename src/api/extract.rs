//! Body and path extractors that reject with [`LedgerError::InvalidRequest`]
//! so malformed input gets the same JSON error shape as registry failures.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use crate::error::LedgerError;

/// JSON request body.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = LedgerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| LedgerError::InvalidRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Typed path segments.
#[derive(Debug, Clone)]
pub struct Segments<T>(pub T);

impl<T, S> FromRequestParts<S> for Segments<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = LedgerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| LedgerError::InvalidRequest(e.body_text()))?;
        Ok(Self(value))
    }
}
