//! Farm Registry handlers: register, get, update, deactivate.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::caller::Caller;
use crate::api::extract::{Payload, Segments};
use crate::api::dto::{AckResponse, FarmDetailsRequest, FarmResponse, RegisterFarmResponse};
use crate::app_state::AppState;
use crate::domain::FarmId;
use crate::error::{ErrorResponse, LedgerError};

/// `POST /farms` — Register a farm owned by the caller.
///
/// # Errors
///
/// Returns [`LedgerError::Farm`] if the area is not positive.
#[utoipa::path(
    post,
    path = "/api/v1/farms",
    tag = "Farms",
    summary = "Register a farm",
    description = "Registers a farm owned by the caller and returns its newly allocated id.",
    params(("x-caller" = String, Header, description = "Caller principal")),
    request_body = FarmDetailsRequest,
    responses(
        (status = 201, description = "Farm registered", body = RegisterFarmResponse),
        (status = 400, description = "Area not positive or caller missing", body = ErrorResponse),
    )
)]
pub async fn register_farm(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Payload(req): Payload<FarmDetailsRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let farm_id = state
        .ledger_service
        .register_farm(caller, req.location, req.crop_type, req.area_size)
        .await?;
    Ok((StatusCode::CREATED, Json(RegisterFarmResponse { farm_id })))
}

/// `GET /farms/{farm_id}` — Look up a farm.
///
/// Responds with `null` when no farm exists under the id.
#[utoipa::path(
    get,
    path = "/api/v1/farms/{farm_id}",
    tag = "Farms",
    summary = "Get a farm",
    description = "Returns the farm record, or null if no farm is registered under the id.",
    params(("farm_id" = u64, Path, description = "Farm id")),
    responses(
        (status = 200, description = "Farm record or null", body = Option<FarmResponse>),
    )
)]
pub async fn get_farm(
    State(state): State<AppState>,
    Segments(farm_id): Segments<u64>,
) -> Json<Option<FarmResponse>> {
    let farm_id = FarmId::new(farm_id);
    let record = state.ledger_service.get_farm(farm_id).await;
    Json(record.map(|r| FarmResponse::new(farm_id, r)))
}

/// `PUT /farms/{farm_id}` — Update a farm's details.
///
/// # Errors
///
/// Returns [`LedgerError::Farm`] if the farm is missing, the caller is not
/// the owner, or the area is not positive.
#[utoipa::path(
    put,
    path = "/api/v1/farms/{farm_id}",
    tag = "Farms",
    summary = "Update a farm",
    description = "Replaces location, crop type and area. Owner only.",
    params(
        ("farm_id" = u64, Path, description = "Farm id"),
        ("x-caller" = String, Header, description = "Caller principal"),
    ),
    request_body = FarmDetailsRequest,
    responses(
        (status = 200, description = "Farm updated", body = AckResponse),
        (status = 400, description = "Area not positive", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Farm not found", body = ErrorResponse),
    )
)]
pub async fn update_farm(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Segments(farm_id): Segments<u64>,
    Payload(req): Payload<FarmDetailsRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let ok = state
        .ledger_service
        .update_farm(
            caller,
            FarmId::new(farm_id),
            req.location,
            req.crop_type,
            req.area_size,
        )
        .await?;
    Ok(Json(AckResponse::new(ok)))
}

/// `POST /farms/{farm_id}/deactivate` — Deactivate a farm.
///
/// # Errors
///
/// Returns [`LedgerError::Farm`] if the farm is missing or the caller is
/// neither owner nor admin.
#[utoipa::path(
    post,
    path = "/api/v1/farms/{farm_id}/deactivate",
    tag = "Farms",
    summary = "Deactivate a farm",
    description = "Marks the farm inactive. Owner or admin only. Repeating the call succeeds.",
    params(
        ("farm_id" = u64, Path, description = "Farm id"),
        ("x-caller" = String, Header, description = "Caller principal"),
    ),
    responses(
        (status = 200, description = "Farm deactivated", body = AckResponse),
        (status = 403, description = "Caller is neither owner nor admin", body = ErrorResponse),
        (status = 404, description = "Farm not found", body = ErrorResponse),
    )
)]
pub async fn deactivate_farm(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Segments(farm_id): Segments<u64>,
) -> Result<impl IntoResponse, LedgerError> {
    let ok = state
        .ledger_service
        .deactivate_farm(caller, FarmId::new(farm_id))
        .await?;
    Ok(Json(AckResponse::new(ok)))
}

/// Farm Registry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/farms", post(register_farm))
        .route("/farms/{farm_id}", get(get_farm).put(update_farm))
        .route("/farms/{farm_id}/deactivate", post(deactivate_farm))
}
