//! Weather Registry handlers: observations and events.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::caller::Caller;
use crate::api::extract::{Payload, Segments};
use crate::api::dto::{
    AckResponse, EventResponse, ObservationResponse, ReportEventRequest, ReportEventResponse,
    SubmitObservationRequest,
};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{ErrorResponse, LedgerError};

/// `POST /weather/observations` — Submit an observation (oracle only).
///
/// # Errors
///
/// Returns [`LedgerError::Weather`] unless the caller is the oracle.
#[utoipa::path(
    post,
    path = "/api/v1/weather/observations",
    tag = "Weather",
    summary = "Submit weather data",
    description = "Stores readings for a location and timestamp, replacing any earlier submission for the same key.",
    params(("x-caller" = String, Header, description = "Caller principal")),
    request_body = SubmitObservationRequest,
    responses(
        (status = 200, description = "Observation stored", body = AckResponse),
        (status = 403, description = "Caller is not the oracle", body = ErrorResponse),
    )
)]
pub async fn submit_observation(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Payload(req): Payload<SubmitObservationRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let (location, timestamp, readings) = req.into_parts();
    let ok = state
        .ledger_service
        .submit_weather_data(caller, location, timestamp, readings)
        .await?;
    Ok(Json(AckResponse::new(ok)))
}

/// `GET /weather/observations/{location}/{timestamp}` — Look up an observation.
#[utoipa::path(
    get,
    path = "/api/v1/weather/observations/{location}/{timestamp}",
    tag = "Weather",
    summary = "Get weather data",
    description = "Returns the observation, or null if none was submitted for the key.",
    params(
        ("location" = String, Path, description = "Location"),
        ("timestamp" = u64, Path, description = "Observation time"),
    ),
    responses(
        (status = 200, description = "Observation or null", body = Option<ObservationResponse>),
    )
)]
pub async fn get_observation(
    State(state): State<AppState>,
    Segments((location, timestamp)): Segments<(String, u64)>,
) -> Json<Option<ObservationResponse>> {
    let obs = state
        .ledger_service
        .get_weather_data(&location, timestamp)
        .await;
    Json(obs.map(|o| ObservationResponse::new(location, timestamp, o)))
}

/// `POST /weather/events` — Report a weather event (oracle only).
///
/// # Errors
///
/// Returns [`LedgerError::Weather`] if the caller is not the oracle, the
/// severity exceeds 10, or the time range is not ordered.
#[utoipa::path(
    post,
    path = "/api/v1/weather/events",
    tag = "Weather",
    summary = "Report a weather event",
    description = "Records a confirmed event and returns its globally unique id.",
    params(("x-caller" = String, Header, description = "Caller principal")),
    request_body = ReportEventRequest,
    responses(
        (status = 201, description = "Event recorded", body = ReportEventResponse),
        (status = 400, description = "Severity out of range or invalid time range", body = ErrorResponse),
        (status = 403, description = "Caller is not the oracle", body = ErrorResponse),
    )
)]
pub async fn report_event(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Payload(req): Payload<ReportEventRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let event_id = state
        .ledger_service
        .report_weather_event(caller, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ReportEventResponse { event_id })))
}

/// `GET /weather/events/{location}/{event_id}` — Look up an event.
#[utoipa::path(
    get,
    path = "/api/v1/weather/events/{location}/{event_id}",
    tag = "Weather",
    summary = "Get a weather event",
    description = "Returns the event, or null if no event with the id was reported for the location.",
    params(
        ("location" = String, Path, description = "Location"),
        ("event_id" = u64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event or null", body = Option<EventResponse>),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Segments((location, event_id)): Segments<(String, u64)>,
) -> Json<Option<EventResponse>> {
    let event_id = EventId::new(event_id);
    let event = state
        .ledger_service
        .get_weather_event(&location, event_id)
        .await;
    Json(event.map(|e| EventResponse::new(location, event_id, e)))
}

/// Weather Registry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/weather/observations", post(submit_observation))
        .route(
            "/weather/observations/{location}/{timestamp}",
            get(get_observation),
        )
        .route("/weather/events", post(report_event))
        .route("/weather/events/{location}/{event_id}", get(get_event))
}
