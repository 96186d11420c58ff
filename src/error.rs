//! Registry error types and their HTTP mapping.
//!
//! Each registry has its own error enum whose numeric [`code`](FarmError::code)
//! is part of the ledger's external contract and must never be renumbered.
//! [`LedgerError`] is the gateway-level error that wraps them and renders
//! a structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "registry": "farm",
///     "code": 3,
///     "message": "caller is not the farm owner or admin"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with registry, numeric code and message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Registry that rejected the call (`farm`, `weather`, `yield`, or
    /// `gateway` for transport-level failures).
    pub registry: &'static str,
    /// Registry-specific numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Farm Registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FarmError {
    /// Area size must be strictly positive.
    #[error("area size must be greater than zero")]
    InvalidArea,
    /// No farm is registered under the given id.
    #[error("farm not found")]
    NotFound,
    /// Caller is neither the farm owner nor, where allowed, the admin.
    #[error("caller is not authorized for this farm")]
    Unauthorized,
    /// Every farm id has been handed out.
    #[error("farm id space exhausted")]
    IdsExhausted,
}

impl FarmError {
    /// Stable numeric code for this failure.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::InvalidArea => 1,
            Self::NotFound => 2,
            Self::Unauthorized => 3,
            Self::IdsExhausted => 4,
        }
    }
}

/// Weather Registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    /// Caller is not the oracle (or, for role changes, the admin).
    #[error("caller is not authorized to write weather data")]
    Unauthorized,
    /// Event severity above the maximum of 10.
    #[error("severity {0} is outside 0..=10")]
    SeverityOutOfRange(u64),
    /// Event start time is not strictly before its end time.
    #[error("event start time must be before end time")]
    InvalidTimeRange,
    /// Every event id has been handed out.
    #[error("event id space exhausted")]
    IdsExhausted,
}

impl WeatherError {
    /// Stable numeric code for this failure.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Unauthorized => 1,
            Self::SeverityOutOfRange(_) => 2,
            Self::InvalidTimeRange => 3,
            Self::IdsExhausted => 4,
        }
    }
}

/// Yield Registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum YieldError {
    /// The referenced farm does not exist in the Farm Registry.
    #[error("farm not found")]
    FarmNotFound,
    /// Caller is not the owner of the referenced farm.
    #[error("caller is not the farm owner")]
    NotFarmOwner,
    /// No yield record exists for the farm and season.
    #[error("yield record not found")]
    YieldRecordNotFound,
    /// Caller is not the designated verifier.
    #[error("caller is not the yield verifier")]
    NotVerifier,
    /// The yield record has not been verified yet.
    #[error("yield record is not verified")]
    NotVerified,
    /// Expected yield is not positive, so no loss percentage exists.
    #[error("expected yield must be greater than zero")]
    InvalidExpectedYield,
    /// Caller is not the registry admin.
    #[error("caller is not the yield registry admin")]
    NotAdmin,
}

impl YieldError {
    /// Stable numeric code for this failure.
    ///
    /// Admin refusals share code 4 with the verifier refusal.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::FarmNotFound => 1,
            Self::NotFarmOwner => 2,
            Self::YieldRecordNotFound => 3,
            Self::NotVerifier | Self::NotAdmin => 4,
            Self::NotVerified => 5,
            Self::InvalidExpectedYield => 6,
        }
    }
}

/// Gateway-level error with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Rejected by the Farm Registry.
    #[error("farm registry: {0}")]
    Farm(#[from] FarmError),

    /// Rejected by the Weather Registry.
    #[error("weather registry: {0}")]
    Weather(#[from] WeatherError),

    /// Rejected by the Yield Registry.
    #[error("yield registry: {0}")]
    Yield(#[from] YieldError),

    /// The request did not carry a caller identity.
    #[error("missing caller identity header")]
    MissingCaller,

    /// Request validation failed before reaching a registry.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl LedgerError {
    /// Returns the registry name reported in the error body.
    #[must_use]
    pub const fn registry(&self) -> &'static str {
        match self {
            Self::Farm(_) => "farm",
            Self::Weather(_) => "weather",
            Self::Yield(_) => "yield",
            Self::MissingCaller | Self::InvalidRequest(_) => "gateway",
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Farm(e) => e.code(),
            Self::Weather(e) => e.code(),
            Self::Yield(e) => e.code(),
            Self::MissingCaller => 1001,
            Self::InvalidRequest(_) => 1002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Farm(FarmError::InvalidArea)
            | Self::Weather(WeatherError::SeverityOutOfRange(_) | WeatherError::InvalidTimeRange)
            | Self::MissingCaller
            | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Farm(FarmError::NotFound)
            | Self::Yield(YieldError::FarmNotFound | YieldError::YieldRecordNotFound) => {
                StatusCode::NOT_FOUND
            }
            Self::Farm(FarmError::Unauthorized)
            | Self::Weather(WeatherError::Unauthorized)
            | Self::Yield(YieldError::NotFarmOwner | YieldError::NotVerifier | YieldError::NotAdmin) => {
                StatusCode::FORBIDDEN
            }
            Self::Yield(YieldError::NotVerified | YieldError::InvalidExpectedYield) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Farm(FarmError::IdsExhausted) | Self::Weather(WeatherError::IdsExhausted) => {
                StatusCode::INSUFFICIENT_STORAGE
            }
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                registry: self.registry(),
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farm_codes_are_stable() {
        assert_eq!(FarmError::InvalidArea.code(), 1);
        assert_eq!(FarmError::NotFound.code(), 2);
        assert_eq!(FarmError::Unauthorized.code(), 3);
        assert_eq!(FarmError::IdsExhausted.code(), 4);
    }

    #[test]
    fn weather_codes_are_stable() {
        assert_eq!(WeatherError::Unauthorized.code(), 1);
        assert_eq!(WeatherError::SeverityOutOfRange(11).code(), 2);
        assert_eq!(WeatherError::InvalidTimeRange.code(), 3);
        assert_eq!(WeatherError::IdsExhausted.code(), 4);
    }

    #[test]
    fn yield_codes_are_stable() {
        assert_eq!(YieldError::FarmNotFound.code(), 1);
        assert_eq!(YieldError::NotFarmOwner.code(), 2);
        assert_eq!(YieldError::YieldRecordNotFound.code(), 3);
        assert_eq!(YieldError::NotVerifier.code(), 4);
        assert_eq!(YieldError::NotVerified.code(), 5);
        assert_eq!(YieldError::InvalidExpectedYield.code(), 6);
    }

    #[test]
    fn ledger_error_carries_registry_code() {
        let err = LedgerError::from(WeatherError::InvalidTimeRange);
        assert_eq!(err.registry(), "weather");
        assert_eq!(err.error_code(), 3);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn exhausted_id_space_maps_to_insufficient_storage() {
        let err = LedgerError::from(FarmError::IdsExhausted);
        assert_eq!(err.error_code(), 4);
        assert_eq!(err.status_code(), StatusCode::INSUFFICIENT_STORAGE);
    }

    #[test]
    fn unauthorized_maps_to_forbidden() {
        assert_eq!(
            LedgerError::from(FarmError::Unauthorized).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            LedgerError::from(YieldError::NotVerifier).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn into_response_sets_status() {
        let response = LedgerError::from(YieldError::NotVerified).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
