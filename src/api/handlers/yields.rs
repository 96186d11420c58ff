//! Yield Registry handlers: expected yield, verification, loss.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::caller::Caller;
use crate::api::extract::{Payload, Segments};
use crate::api::dto::{
    AckResponse, RegisterYieldRequest, VerifyYieldRequest, YieldLossResponse, YieldResponse,
};
use crate::app_state::AppState;
use crate::domain::FarmId;
use crate::error::{ErrorResponse, LedgerError};

/// `POST /yields` — Register an expected yield (farm owner only).
///
/// # Errors
///
/// Returns [`LedgerError::Yield`] if the farm is missing or the caller is
/// not its owner.
#[utoipa::path(
    post,
    path = "/api/v1/yields",
    tag = "Yields",
    summary = "Register expected yield",
    description = "Declares the expected yield of a farm for a season. Replaces any earlier record for the same farm and season.",
    params(("x-caller" = String, Header, description = "Caller principal")),
    request_body = RegisterYieldRequest,
    responses(
        (status = 201, description = "Expected yield registered", body = AckResponse),
        (status = 403, description = "Caller is not the farm owner", body = ErrorResponse),
        (status = 404, description = "Farm not found", body = ErrorResponse),
    )
)]
pub async fn register_expected_yield(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Payload(req): Payload<RegisterYieldRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let ok = state
        .ledger_service
        .register_expected_yield(caller, req.farm_id, req.season, req.expected_yield)
        .await?;
    Ok((StatusCode::CREATED, Json(AckResponse::new(ok))))
}

/// `GET /yields/{farm_id}/{season}` — Look up a yield record.
#[utoipa::path(
    get,
    path = "/api/v1/yields/{farm_id}/{season}",
    tag = "Yields",
    summary = "Get yield data",
    description = "Returns the yield record, or null if none was registered for the farm and season.",
    params(
        ("farm_id" = u64, Path, description = "Farm id"),
        ("season" = String, Path, description = "Season label"),
    ),
    responses(
        (status = 200, description = "Yield record or null", body = Option<YieldResponse>),
    )
)]
pub async fn get_yield(
    State(state): State<AppState>,
    Segments((farm_id, season)): Segments<(u64, String)>,
) -> Json<Option<YieldResponse>> {
    let farm_id = FarmId::new(farm_id);
    let record = state.ledger_service.get_yield_data(farm_id, &season).await;
    Json(record.map(|r| YieldResponse::new(farm_id, season, r)))
}

/// `POST /yields/{farm_id}/{season}/verify` — Record the actual yield
/// (verifier only).
///
/// # Errors
///
/// Returns [`LedgerError::Yield`] if no record exists or the caller is not
/// the verifier.
#[utoipa::path(
    post,
    path = "/api/v1/yields/{farm_id}/{season}/verify",
    tag = "Yields",
    summary = "Verify actual yield",
    description = "Records the verified harvest, stamping the verification height and verifier.",
    params(
        ("farm_id" = u64, Path, description = "Farm id"),
        ("season" = String, Path, description = "Season label"),
        ("x-caller" = String, Header, description = "Caller principal"),
    ),
    request_body = VerifyYieldRequest,
    responses(
        (status = 200, description = "Actual yield verified", body = AckResponse),
        (status = 403, description = "Caller is not the verifier", body = ErrorResponse),
        (status = 404, description = "Yield record not found", body = ErrorResponse),
    )
)]
pub async fn verify_actual_yield(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Segments((farm_id, season)): Segments<(u64, String)>,
    Payload(req): Payload<VerifyYieldRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let ok = state
        .ledger_service
        .verify_actual_yield(caller, FarmId::new(farm_id), season, req.actual_yield)
        .await?;
    Ok(Json(AckResponse::new(ok)))
}

/// `GET /yields/{farm_id}/{season}/loss` — Compute the yield loss.
///
/// # Errors
///
/// Returns [`LedgerError::Yield`] if the record is missing, unverified, or
/// has a non-positive expected yield.
#[utoipa::path(
    get,
    path = "/api/v1/yields/{farm_id}/{season}/loss",
    tag = "Yields",
    summary = "Calculate yield loss",
    description = "Returns the lost share of the expected yield in percent, rounded down; 0 when the harvest met the expectation.",
    params(
        ("farm_id" = u64, Path, description = "Farm id"),
        ("season" = String, Path, description = "Season label"),
    ),
    responses(
        (status = 200, description = "Loss percentage", body = YieldLossResponse),
        (status = 404, description = "Yield record not found", body = ErrorResponse),
        (status = 422, description = "Record unverified or expected yield not positive", body = ErrorResponse),
    )
)]
pub async fn yield_loss(
    State(state): State<AppState>,
    Segments((farm_id, season)): Segments<(u64, String)>,
) -> Result<impl IntoResponse, LedgerError> {
    let farm_id = FarmId::new(farm_id);
    let loss_percent = state
        .ledger_service
        .calculate_yield_loss(farm_id, &season)
        .await?;
    Ok(Json(YieldLossResponse {
        farm_id,
        season,
        loss_percent,
    }))
}

/// Yield Registry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/yields", post(register_expected_yield))
        .route("/yields/{farm_id}/{season}", get(get_yield))
        .route(
            "/yields/{farm_id}/{season}/verify",
            post(verify_actual_yield),
        )
        .route("/yields/{farm_id}/{season}/loss", get(yield_loss))
}
