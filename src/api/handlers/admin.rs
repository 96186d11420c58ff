//! Role-transfer endpoints. Each is restricted to the current admin of the
//! registry it touches.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::put;
use axum::{Json, Router};

use crate::api::caller::Caller;
use crate::api::extract::Payload;
use crate::api::dto::{AckResponse, SetRoleRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, LedgerError};

/// `PUT /admin/farm/admin` — Transfer the Farm Registry admin role.
///
/// # Errors
///
/// Returns [`LedgerError::Farm`] unless the caller is the current admin.
#[utoipa::path(
    put,
    path = "/api/v1/admin/farm/admin",
    tag = "Admin",
    summary = "Set farm registry admin",
    params(("x-caller" = String, Header, description = "Caller principal")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Admin changed", body = AckResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
    )
)]
pub async fn set_farm_admin(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Payload(req): Payload<SetRoleRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let ok = state
        .ledger_service
        .set_farm_admin(caller, req.identity)
        .await?;
    Ok(Json(AckResponse::new(ok)))
}

/// `PUT /admin/weather/admin` — Transfer the Weather Registry admin role.
///
/// # Errors
///
/// Returns [`LedgerError::Weather`] unless the caller is the current admin.
#[utoipa::path(
    put,
    path = "/api/v1/admin/weather/admin",
    tag = "Admin",
    summary = "Set weather registry admin",
    params(("x-caller" = String, Header, description = "Caller principal")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Admin changed", body = AckResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
    )
)]
pub async fn set_weather_admin(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Payload(req): Payload<SetRoleRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let ok = state
        .ledger_service
        .set_weather_admin(caller, req.identity)
        .await?;
    Ok(Json(AckResponse::new(ok)))
}

/// `PUT /admin/weather/oracle` — Designate the weather oracle.
///
/// # Errors
///
/// Returns [`LedgerError::Weather`] unless the caller is the current admin.
#[utoipa::path(
    put,
    path = "/api/v1/admin/weather/oracle",
    tag = "Admin",
    summary = "Set weather oracle",
    params(("x-caller" = String, Header, description = "Caller principal")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Oracle changed", body = AckResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
    )
)]
pub async fn set_weather_oracle(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Payload(req): Payload<SetRoleRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let ok = state
        .ledger_service
        .set_weather_oracle(caller, req.identity)
        .await?;
    Ok(Json(AckResponse::new(ok)))
}

/// `PUT /admin/yield/admin` — Transfer the Yield Registry admin role.
///
/// # Errors
///
/// Returns [`LedgerError::Yield`] unless the caller is the current admin.
#[utoipa::path(
    put,
    path = "/api/v1/admin/yield/admin",
    tag = "Admin",
    summary = "Set yield registry admin",
    params(("x-caller" = String, Header, description = "Caller principal")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Admin changed", body = AckResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
    )
)]
pub async fn set_yield_admin(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Payload(req): Payload<SetRoleRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let ok = state
        .ledger_service
        .set_yield_admin(caller, req.identity)
        .await?;
    Ok(Json(AckResponse::new(ok)))
}

/// `PUT /admin/yield/verifier` — Designate the yield verifier.
///
/// # Errors
///
/// Returns [`LedgerError::Yield`] unless the caller is the current admin.
#[utoipa::path(
    put,
    path = "/api/v1/admin/yield/verifier",
    tag = "Admin",
    summary = "Set yield verifier",
    params(("x-caller" = String, Header, description = "Caller principal")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Verifier changed", body = AckResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
    )
)]
pub async fn set_yield_verifier(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Payload(req): Payload<SetRoleRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let ok = state
        .ledger_service
        .set_yield_verifier(caller, req.identity)
        .await?;
    Ok(Json(AckResponse::new(ok)))
}

/// Role administration routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/farm/admin", put(set_farm_admin))
        .route("/admin/weather/admin", put(set_weather_admin))
        .route("/admin/weather/oracle", put(set_weather_oracle))
        .route("/admin/yield/admin", put(set_yield_admin))
        .route("/admin/yield/verifier", put(set_yield_verifier))
}
