//! Weather Registry DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EventId, EventReport, Identity, Readings, WeatherEvent, WeatherObservation};

/// Request body for `POST /weather/observations`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitObservationRequest {
    /// Observed location.
    pub location: String,
    /// Observation time.
    pub timestamp: u64,
    /// Temperature reading.
    pub temperature: i64,
    /// Rainfall reading.
    pub rainfall: i64,
    /// Relative humidity reading.
    pub humidity: i64,
    /// Wind speed reading.
    pub wind_speed: i64,
}

impl SubmitObservationRequest {
    /// Splits the request into key parts and readings.
    #[must_use]
    pub fn into_parts(self) -> (String, u64, Readings) {
        let readings = Readings {
            temperature: self.temperature,
            rainfall: self.rainfall,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
        };
        (self.location, self.timestamp, readings)
    }
}

/// An observation as returned by `GET /weather/observations/{location}/{timestamp}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ObservationResponse {
    /// Observed location.
    pub location: String,
    /// Observation time.
    pub timestamp: u64,
    /// Temperature reading.
    pub temperature: i64,
    /// Rainfall reading.
    pub rainfall: i64,
    /// Relative humidity reading.
    pub humidity: i64,
    /// Wind speed reading.
    pub wind_speed: i64,
    /// Oracle that submitted the reading.
    pub reported_by: Identity,
    /// Height of submission.
    pub reported_at: u64,
}

impl ObservationResponse {
    /// Builds the response for the observation stored under the key.
    #[must_use]
    pub fn new(location: String, timestamp: u64, obs: WeatherObservation) -> Self {
        Self {
            location,
            timestamp,
            temperature: obs.temperature,
            rainfall: obs.rainfall,
            humidity: obs.humidity,
            wind_speed: obs.wind_speed,
            reported_by: obs.reported_by,
            reported_at: obs.reported_at,
        }
    }
}

/// Request body for `POST /weather/events`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportEventRequest {
    /// Affected location.
    pub location: String,
    /// Kind of event (`"Drought"`, `"Flood"`, ...).
    pub event_type: String,
    /// Severity from 0 to 10.
    pub severity: u64,
    /// Start of the event window.
    pub start_time: u64,
    /// End of the event window.
    pub end_time: u64,
}

impl From<ReportEventRequest> for EventReport {
    fn from(req: ReportEventRequest) -> Self {
        Self {
            location: req.location,
            event_type: req.event_type,
            severity: req.severity,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

/// Response body for `POST /weather/events` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportEventResponse {
    /// Newly allocated event id.
    pub event_id: EventId,
}

/// An event as returned by `GET /weather/events/{location}/{event_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
    /// Affected location.
    pub location: String,
    /// Event id.
    pub event_id: EventId,
    /// Kind of event.
    pub event_type: String,
    /// Severity from 0 to 10.
    pub severity: u64,
    /// Start of the event window.
    pub start_time: u64,
    /// End of the event window.
    pub end_time: u64,
    /// Always `true` for oracle-reported events.
    pub confirmed: bool,
}

impl EventResponse {
    /// Builds the response for the event stored under the key.
    #[must_use]
    pub fn new(location: String, event_id: EventId, event: WeatherEvent) -> Self {
        Self {
            location,
            event_id,
            event_type: event.event_type,
            severity: event.severity,
            start_time: event.start_time,
            end_time: event.end_time,
            confirmed: event.confirmed,
        }
    }
}
