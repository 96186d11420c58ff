//! Ledger service: serializes calls onto the ledger and logs outcomes.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{
    EventId, EventReport, FarmId, FarmRecord, Height, Identity, Ledger, Readings, WeatherEvent,
    WeatherObservation, YieldRecord,
};
use crate::error::LedgerError;

/// Orchestration layer for all registry operations.
///
/// Holds the single [`Ledger`] behind a [`tokio::sync::RwLock`]. Every
/// mutation takes the write lock for the whole call, so calls execute one
/// at a time and the Yield Registry's farm-ownership read happens in the
/// same critical section as the write it gates. Lookups share the read
/// lock and return owned copies.
#[derive(Debug, Clone)]
pub struct LedgerService {
    ledger: Arc<RwLock<Ledger>>,
}

/// Logs the outcome of a mutating call and widens its error.
fn settle<T, E>(op: &'static str, caller: &Identity, result: Result<T, E>) -> Result<T, LedgerError>
where
    E: Into<LedgerError>,
{
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            let err = err.into();
            tracing::debug!(op, %caller, code = err.error_code(), registry = err.registry(), "call rejected");
            Err(err)
        }
    }
}

impl LedgerService {
    /// Creates a new `LedgerService` around `ledger`.
    #[must_use]
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Height of the last committed call.
    pub async fn height(&self) -> Height {
        self.ledger.read().await.height()
    }

    // ── Farm Registry ───────────────────────────────────────────────────

    /// Registers a farm owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Farm`] if the registry rejects the call.
    pub async fn register_farm(
        &self,
        caller: Identity,
        location: String,
        crop_type: String,
        area_size: i64,
    ) -> Result<FarmId, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result = ledger.register_farm(caller.clone(), location, crop_type, area_size);
        let farm_id = settle("register_farm", &caller, result)?;
        tracing::info!(%farm_id, owner = %caller, height = ledger.height(), "farm registered");
        Ok(farm_id)
    }

    /// Updates location, crop type and area of a farm.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Farm`] if the registry rejects the call.
    pub async fn update_farm(
        &self,
        caller: Identity,
        farm_id: FarmId,
        location: String,
        crop_type: String,
        area_size: i64,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result = ledger.update_farm(caller.clone(), farm_id, location, crop_type, area_size);
        let updated = settle("update_farm", &caller, result)?;
        tracing::info!(%farm_id, area_size, "farm updated");
        Ok(updated)
    }

    /// Deactivates a farm.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Farm`] if the registry rejects the call.
    pub async fn deactivate_farm(
        &self,
        caller: Identity,
        farm_id: FarmId,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result = ledger.deactivate_farm(caller.clone(), farm_id);
        let done = settle("deactivate_farm", &caller, result)?;
        tracing::info!(%farm_id, by = %caller, "farm deactivated");
        Ok(done)
    }

    /// Returns a copy of the farm record, if any.
    pub async fn get_farm(&self, farm_id: FarmId) -> Option<FarmRecord> {
        self.ledger.read().await.get_farm(farm_id).cloned()
    }

    /// Transfers the Farm Registry admin role.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Farm`] if the caller is not the admin.
    pub async fn set_farm_admin(
        &self,
        caller: Identity,
        admin: Identity,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result = ledger.set_farm_admin(caller.clone(), admin.clone());
        let done = settle("set_farm_admin", &caller, result)?;
        tracing::info!(%admin, "farm registry admin changed");
        Ok(done)
    }

    // ── Weather Registry ────────────────────────────────────────────────

    /// Stores an oracle weather observation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Weather`] if the registry rejects the call.
    pub async fn submit_weather_data(
        &self,
        caller: Identity,
        location: String,
        timestamp: u64,
        readings: Readings,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result =
            ledger.submit_weather_data(caller.clone(), location.clone(), timestamp, readings);
        let done = settle("submit_weather_data", &caller, result)?;
        tracing::info!(%location, timestamp, "weather observation stored");
        Ok(done)
    }

    /// Records an oracle weather event.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Weather`] if the registry rejects the call.
    pub async fn report_weather_event(
        &self,
        caller: Identity,
        report: EventReport,
    ) -> Result<EventId, LedgerError> {
        let location = report.location.clone();
        let severity = report.severity;
        let mut ledger = self.ledger.write().await;
        let result = ledger.report_weather_event(caller.clone(), report);
        let event_id = settle("report_weather_event", &caller, result)?;
        tracing::info!(%event_id, %location, severity, "weather event reported");
        Ok(event_id)
    }

    /// Returns a copy of the observation, if any.
    pub async fn get_weather_data(
        &self,
        location: &str,
        timestamp: u64,
    ) -> Option<WeatherObservation> {
        self.ledger
            .read()
            .await
            .get_weather_data(location, timestamp)
            .cloned()
    }

    /// Returns a copy of the event, if any.
    pub async fn get_weather_event(&self, location: &str, event_id: EventId) -> Option<WeatherEvent> {
        self.ledger
            .read()
            .await
            .get_weather_event(location, event_id)
            .cloned()
    }

    /// Designates a new weather oracle.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Weather`] if the caller is not the admin.
    pub async fn set_weather_oracle(
        &self,
        caller: Identity,
        oracle: Identity,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result = ledger.set_weather_oracle(caller.clone(), oracle.clone());
        let done = settle("set_weather_oracle", &caller, result)?;
        tracing::info!(%oracle, "weather oracle changed");
        Ok(done)
    }

    /// Transfers the Weather Registry admin role.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Weather`] if the caller is not the admin.
    pub async fn set_weather_admin(
        &self,
        caller: Identity,
        admin: Identity,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result = ledger.set_weather_admin(caller.clone(), admin.clone());
        let done = settle("set_weather_admin", &caller, result)?;
        tracing::info!(%admin, "weather registry admin changed");
        Ok(done)
    }

    // ── Yield Registry ──────────────────────────────────────────────────

    /// Registers the expected yield of a farm for a season.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Yield`] if the registry rejects the call.
    pub async fn register_expected_yield(
        &self,
        caller: Identity,
        farm_id: FarmId,
        season: String,
        expected_yield: i64,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result =
            ledger.register_expected_yield(caller.clone(), farm_id, season.clone(), expected_yield);
        let done = settle("register_expected_yield", &caller, result)?;
        tracing::info!(%farm_id, %season, expected_yield, "expected yield registered");
        Ok(done)
    }

    /// Records the verified actual yield of a farm for a season.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Yield`] if the registry rejects the call.
    pub async fn verify_actual_yield(
        &self,
        caller: Identity,
        farm_id: FarmId,
        season: String,
        actual_yield: u64,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result =
            ledger.verify_actual_yield(caller.clone(), farm_id, season.clone(), actual_yield);
        let done = settle("verify_actual_yield", &caller, result)?;
        tracing::info!(%farm_id, %season, actual_yield, verifier = %caller, "actual yield verified");
        Ok(done)
    }

    /// Returns a copy of the yield record, if any.
    pub async fn get_yield_data(&self, farm_id: FarmId, season: &str) -> Option<YieldRecord> {
        self.ledger
            .read()
            .await
            .get_yield_data(farm_id, season)
            .cloned()
    }

    /// Computes the yield-loss percentage of a verified record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Yield`] if the record is missing, unverified,
    /// or has a non-positive expected yield.
    pub async fn calculate_yield_loss(
        &self,
        farm_id: FarmId,
        season: &str,
    ) -> Result<u64, LedgerError> {
        Ok(self
            .ledger
            .read()
            .await
            .calculate_yield_loss(farm_id, season)?)
    }

    /// Designates a new yield verifier.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Yield`] if the caller is not the admin.
    pub async fn set_yield_verifier(
        &self,
        caller: Identity,
        verifier: Identity,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result = ledger.set_yield_verifier(caller.clone(), verifier.clone());
        let done = settle("set_yield_verifier", &caller, result)?;
        tracing::info!(%verifier, "yield verifier changed");
        Ok(done)
    }

    /// Transfers the Yield Registry admin role.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Yield`] if the caller is not the admin.
    pub async fn set_yield_admin(
        &self,
        caller: Identity,
        admin: Identity,
    ) -> Result<bool, LedgerError> {
        let mut ledger = self.ledger.write().await;
        let result = ledger.set_yield_admin(caller.clone(), admin.clone());
        let done = settle("set_yield_admin", &caller, result)?;
        tracing::info!(%admin, "yield registry admin changed");
        Ok(done)
    }
}
