//! Weather Registry: oracle-reported observations and weather events.
//!
//! All writes are restricted to the designated oracle identity, and the
//! oracle check always runs before any field validation. Observations are
//! upserted per `(location, timestamp)`; events are append-only and
//! numbered from a counter shared by every location.

use std::collections::HashMap;

use serde::Serialize;

use super::context::{CallContext, Height};
use super::gate::Gate;
use super::ids::{EventId, IdCounter};
use super::Identity;
use crate::error::WeatherError;

/// Highest accepted event severity.
pub const MAX_SEVERITY: u64 = 10;

/// Key of a [`WeatherObservation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationKey {
    /// Observed location.
    pub location: String,
    /// Observation time, as reported by the oracle.
    pub timestamp: u64,
}

/// Key of a [`WeatherEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    /// Affected location.
    pub location: String,
    /// Globally unique event number.
    pub event_id: EventId,
}

/// One weather reading for a location at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherObservation {
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
    /// Height at which the reading was submitted.
    pub reported_at: Height,
}

/// A discrete weather event such as a drought or a flood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherEvent {
    /// Kind of event (`"Drought"`, `"Flood"`, ...).
    pub event_type: String,
    /// Severity from 0 to [`MAX_SEVERITY`].
    pub severity: u64,
    /// Start of the event window.
    pub start_time: u64,
    /// End of the event window, strictly after `start_time`.
    pub end_time: u64,
    /// Always `true`: oracle reports need no further confirmation.
    pub confirmed: bool,
}

/// Raw readings for [`WeatherRegistry::submit_weather_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readings {
    /// Temperature reading.
    pub temperature: i64,
    /// Rainfall reading.
    pub rainfall: i64,
    /// Relative humidity reading.
    pub humidity: i64,
    /// Wind speed reading.
    pub wind_speed: i64,
}

/// Parameters for [`WeatherRegistry::report_weather_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventReport {
    /// Affected location.
    pub location: String,
    /// Kind of event.
    pub event_type: String,
    /// Severity from 0 to [`MAX_SEVERITY`].
    pub severity: u64,
    /// Start of the event window.
    pub start_time: u64,
    /// End of the event window.
    pub end_time: u64,
}

/// Oracle-fed store of observations and events.
#[derive(Debug, Clone)]
pub struct WeatherRegistry {
    observations: HashMap<ObservationKey, WeatherObservation>,
    events: HashMap<EventKey, WeatherEvent>,
    counter: IdCounter,
    admin: Identity,
    oracle: Identity,
}

impl WeatherRegistry {
    /// Creates an empty registry with the given admin and oracle.
    #[must_use]
    pub fn new(admin: Identity, oracle: Identity) -> Self {
        Self {
            observations: HashMap::new(),
            events: HashMap::new(),
            counter: IdCounter::new(),
            admin,
            oracle,
        }
    }

    /// Stores the readings for `(location, timestamp)`, replacing any
    /// earlier submission for the same key.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Unauthorized`] unless the caller is the oracle.
    pub fn submit_weather_data(
        &mut self,
        ctx: &CallContext,
        location: String,
        timestamp: u64,
        readings: Readings,
    ) -> Result<bool, WeatherError> {
        Gate::Holder(&self.oracle).check(&ctx.sender, WeatherError::Unauthorized)?;

        self.observations.insert(
            ObservationKey {
                location,
                timestamp,
            },
            WeatherObservation {
                temperature: readings.temperature,
                rainfall: readings.rainfall,
                humidity: readings.humidity,
                wind_speed: readings.wind_speed,
                reported_by: ctx.sender.clone(),
                reported_at: ctx.height,
            },
        );
        Ok(true)
    }

    /// Records a confirmed weather event and returns its id.
    ///
    /// # Errors
    ///
    /// In order: [`WeatherError::Unauthorized`] unless the caller is the
    /// oracle, [`WeatherError::SeverityOutOfRange`] if severity exceeds
    /// [`MAX_SEVERITY`], [`WeatherError::InvalidTimeRange`] unless
    /// `start_time < end_time`, [`WeatherError::IdsExhausted`] once every
    /// event id has been used.
    pub fn report_weather_event(
        &mut self,
        ctx: &CallContext,
        report: EventReport,
    ) -> Result<EventId, WeatherError> {
        Gate::Holder(&self.oracle).check(&ctx.sender, WeatherError::Unauthorized)?;
        if report.severity > MAX_SEVERITY {
            return Err(WeatherError::SeverityOutOfRange(report.severity));
        }
        if report.start_time >= report.end_time {
            return Err(WeatherError::InvalidTimeRange);
        }

        let event_id = self
            .counter
            .issue()
            .map(EventId::new)
            .ok_or(WeatherError::IdsExhausted)?;
        self.events.insert(
            EventKey {
                location: report.location,
                event_id,
            },
            WeatherEvent {
                event_type: report.event_type,
                severity: report.severity,
                start_time: report.start_time,
                end_time: report.end_time,
                confirmed: true,
            },
        );
        Ok(event_id)
    }

    /// Designates a new oracle.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Unauthorized`] unless the caller is the admin.
    pub fn set_oracle(&mut self, ctx: &CallContext, oracle: Identity) -> Result<bool, WeatherError> {
        Gate::Holder(&self.admin).check(&ctx.sender, WeatherError::Unauthorized)?;
        self.oracle = oracle;
        Ok(true)
    }

    /// Hands the admin role to `new_admin`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Unauthorized`] unless the caller is the admin.
    pub fn set_admin(
        &mut self,
        ctx: &CallContext,
        new_admin: Identity,
    ) -> Result<bool, WeatherError> {
        Gate::Holder(&self.admin).check(&ctx.sender, WeatherError::Unauthorized)?;
        self.admin = new_admin;
        Ok(true)
    }

    /// Returns the observation for `(location, timestamp)`, if any.
    #[must_use]
    pub fn get_weather_data(&self, location: &str, timestamp: u64) -> Option<&WeatherObservation> {
        self.observations.get(&ObservationKey {
            location: location.to_string(),
            timestamp,
        })
    }

    /// Returns the event `event_id` recorded at `location`, if any.
    #[must_use]
    pub fn get_weather_event(&self, location: &str, event_id: EventId) -> Option<&WeatherEvent> {
        self.events.get(&EventKey {
            location: location.to_string(),
            event_id,
        })
    }

    /// Current oracle identity.
    #[must_use]
    pub fn oracle(&self) -> &Identity {
        &self.oracle
    }

    /// Current registry admin.
    #[must_use]
    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    /// Number of stored events across all locations.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of stored observations across all locations.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }
}
