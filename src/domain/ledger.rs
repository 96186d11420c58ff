//! The ledger: all three registries plus the chain tip.
//!
//! [`Ledger`] plays the part of the hosting environment. It stamps every
//! mutating call with a [`CallContext`] at height `tip + 1` and only
//! advances the tip when the call succeeds, so each committed call lands
//! in its own block and a rejected call leaves no trace. Registry
//! operations validate before they write, which keeps each call atomic.

use super::context::{CallContext, Height};
use super::farm_registry::{FarmRecord, FarmRegistry};
use super::ids::{EventId, FarmId};
use super::weather_registry::{
    EventReport, Readings, WeatherEvent, WeatherObservation, WeatherRegistry,
};
use super::yield_registry::{YieldRecord, YieldRegistry};
use super::Identity;
use crate::error::{FarmError, WeatherError, YieldError};

/// Initial role holders for a fresh ledger.
#[derive(Debug, Clone)]
pub struct Roles {
    /// Admin of the Farm Registry.
    pub farm_admin: Identity,
    /// Admin of the Weather Registry.
    pub weather_admin: Identity,
    /// Identity allowed to write weather data.
    pub weather_oracle: Identity,
    /// Admin of the Yield Registry.
    pub yield_admin: Identity,
    /// Identity allowed to verify actual yields.
    pub yield_verifier: Identity,
}

impl Roles {
    /// Gives every role to the same identity.
    #[must_use]
    pub fn single(holder: &Identity) -> Self {
        Self {
            farm_admin: holder.clone(),
            weather_admin: holder.clone(),
            weather_oracle: holder.clone(),
            yield_admin: holder.clone(),
            yield_verifier: holder.clone(),
        }
    }
}

/// Aggregate of the farm, weather and yield registries.
#[derive(Debug, Clone)]
pub struct Ledger {
    farms: FarmRegistry,
    weather: WeatherRegistry,
    yields: YieldRegistry,
    tip: Height,
}

impl Ledger {
    /// Creates an empty ledger whose tip starts at `genesis`.
    #[must_use]
    pub fn new(roles: Roles, genesis: Height) -> Self {
        Self {
            farms: FarmRegistry::new(roles.farm_admin),
            weather: WeatherRegistry::new(roles.weather_admin, roles.weather_oracle),
            yields: YieldRegistry::new(roles.yield_admin, roles.yield_verifier),
            tip: genesis,
        }
    }

    /// Height of the last committed call.
    #[must_use]
    pub fn height(&self) -> Height {
        self.tip
    }

    /// Read access to the Farm Registry.
    #[must_use]
    pub fn farms(&self) -> &FarmRegistry {
        &self.farms
    }

    /// Read access to the Weather Registry.
    #[must_use]
    pub fn weather(&self) -> &WeatherRegistry {
        &self.weather
    }

    /// Read access to the Yield Registry.
    #[must_use]
    pub fn yields(&self) -> &YieldRegistry {
        &self.yields
    }

    fn context(&self, sender: Identity) -> CallContext {
        CallContext::new(sender, self.tip.saturating_add(1))
    }

    fn commit<T, E>(&mut self, ctx: &CallContext, result: Result<T, E>) -> Result<T, E> {
        if result.is_ok() {
            self.tip = ctx.height;
        }
        result
    }

    // ── Farm Registry ───────────────────────────────────────────────────

    /// See [`FarmRegistry::register_farm`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`FarmError`].
    pub fn register_farm(
        &mut self,
        sender: Identity,
        location: String,
        crop_type: String,
        area_size: i64,
    ) -> Result<FarmId, FarmError> {
        let ctx = self.context(sender);
        let result = self.farms.register_farm(&ctx, location, crop_type, area_size);
        self.commit(&ctx, result)
    }

    /// See [`FarmRegistry::update_farm`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`FarmError`].
    pub fn update_farm(
        &mut self,
        sender: Identity,
        farm_id: FarmId,
        location: String,
        crop_type: String,
        area_size: i64,
    ) -> Result<bool, FarmError> {
        let ctx = self.context(sender);
        let result = self
            .farms
            .update_farm(&ctx, farm_id, location, crop_type, area_size);
        self.commit(&ctx, result)
    }

    /// See [`FarmRegistry::deactivate_farm`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`FarmError`].
    pub fn deactivate_farm(&mut self, sender: Identity, farm_id: FarmId) -> Result<bool, FarmError> {
        let ctx = self.context(sender);
        let result = self.farms.deactivate_farm(&ctx, farm_id);
        self.commit(&ctx, result)
    }

    /// See [`FarmRegistry::set_admin`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`FarmError`].
    pub fn set_farm_admin(&mut self, sender: Identity, admin: Identity) -> Result<bool, FarmError> {
        let ctx = self.context(sender);
        let result = self.farms.set_admin(&ctx, admin);
        self.commit(&ctx, result)
    }

    /// See [`FarmRegistry::get_farm`].
    #[must_use]
    pub fn get_farm(&self, farm_id: FarmId) -> Option<&FarmRecord> {
        self.farms.get_farm(farm_id)
    }

    // ── Weather Registry ────────────────────────────────────────────────

    /// See [`WeatherRegistry::submit_weather_data`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`WeatherError`].
    pub fn submit_weather_data(
        &mut self,
        sender: Identity,
        location: String,
        timestamp: u64,
        readings: Readings,
    ) -> Result<bool, WeatherError> {
        let ctx = self.context(sender);
        let result = self
            .weather
            .submit_weather_data(&ctx, location, timestamp, readings);
        self.commit(&ctx, result)
    }

    /// See [`WeatherRegistry::report_weather_event`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`WeatherError`].
    pub fn report_weather_event(
        &mut self,
        sender: Identity,
        report: EventReport,
    ) -> Result<EventId, WeatherError> {
        let ctx = self.context(sender);
        let result = self.weather.report_weather_event(&ctx, report);
        self.commit(&ctx, result)
    }

    /// See [`WeatherRegistry::set_oracle`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`WeatherError`].
    pub fn set_weather_oracle(
        &mut self,
        sender: Identity,
        oracle: Identity,
    ) -> Result<bool, WeatherError> {
        let ctx = self.context(sender);
        let result = self.weather.set_oracle(&ctx, oracle);
        self.commit(&ctx, result)
    }

    /// See [`WeatherRegistry::set_admin`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`WeatherError`].
    pub fn set_weather_admin(
        &mut self,
        sender: Identity,
        admin: Identity,
    ) -> Result<bool, WeatherError> {
        let ctx = self.context(sender);
        let result = self.weather.set_admin(&ctx, admin);
        self.commit(&ctx, result)
    }

    /// See [`WeatherRegistry::get_weather_data`].
    #[must_use]
    pub fn get_weather_data(&self, location: &str, timestamp: u64) -> Option<&WeatherObservation> {
        self.weather.get_weather_data(location, timestamp)
    }

    /// See [`WeatherRegistry::get_weather_event`].
    #[must_use]
    pub fn get_weather_event(&self, location: &str, event_id: EventId) -> Option<&WeatherEvent> {
        self.weather.get_weather_event(location, event_id)
    }

    // ── Yield Registry ──────────────────────────────────────────────────

    /// See [`YieldRegistry::register_expected_yield`]. Farm ownership is
    /// read from this ledger's Farm Registry within the same call.
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`YieldError`].
    pub fn register_expected_yield(
        &mut self,
        sender: Identity,
        farm_id: FarmId,
        season: String,
        expected_yield: i64,
    ) -> Result<bool, YieldError> {
        let ctx = self.context(sender);
        let result =
            self.yields
                .register_expected_yield(&ctx, &self.farms, farm_id, season, expected_yield);
        self.commit(&ctx, result)
    }

    /// See [`YieldRegistry::verify_actual_yield`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`YieldError`].
    pub fn verify_actual_yield(
        &mut self,
        sender: Identity,
        farm_id: FarmId,
        season: String,
        actual_yield: u64,
    ) -> Result<bool, YieldError> {
        let ctx = self.context(sender);
        let result = self
            .yields
            .verify_actual_yield(&ctx, farm_id, season, actual_yield);
        self.commit(&ctx, result)
    }

    /// See [`YieldRegistry::set_verifier`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`YieldError`].
    pub fn set_yield_verifier(
        &mut self,
        sender: Identity,
        verifier: Identity,
    ) -> Result<bool, YieldError> {
        let ctx = self.context(sender);
        let result = self.yields.set_verifier(&ctx, verifier);
        self.commit(&ctx, result)
    }

    /// See [`YieldRegistry::set_admin`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`YieldError`].
    pub fn set_yield_admin(&mut self, sender: Identity, admin: Identity) -> Result<bool, YieldError> {
        let ctx = self.context(sender);
        let result = self.yields.set_admin(&ctx, admin);
        self.commit(&ctx, result)
    }

    /// See [`YieldRegistry::get_yield_data`].
    #[must_use]
    pub fn get_yield_data(&self, farm_id: FarmId, season: &str) -> Option<&YieldRecord> {
        self.yields.get_yield_data(farm_id, season)
    }

    /// See [`YieldRegistry::calculate_yield_loss`].
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`YieldError`].
    pub fn calculate_yield_loss(&self, farm_id: FarmId, season: &str) -> Result<u64, YieldError> {
        self.yields.calculate_yield_loss(farm_id, season)
    }
}
