//! Yield Registry: expected versus verified crop yields.
//!
//! The farm owner registers an expected yield for a season; the
//! designated verifier later records the actual harvest. Ownership is
//! resolved through a [`FarmDirectory`] so this registry never holds farm
//! records itself. Once verified, a record yields a loss percentage.

use std::collections::HashMap;

use serde::Serialize;

use super::context::{CallContext, Height};
use super::farm_registry::FarmDirectory;
use super::gate::Gate;
use super::ids::FarmId;
use super::Identity;
use crate::error::YieldError;

/// Key of a [`YieldRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YieldKey {
    /// Farm the yield belongs to.
    pub farm_id: FarmId,
    /// Free-form season label (`"Summer 2023"`).
    pub season: String,
}

/// Expected and verified yield of one farm for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YieldRecord {
    /// Yield declared by the farm owner. Stored as given; non-positive
    /// values are only rejected when a loss is computed.
    pub expected_yield: i64,
    /// Yield confirmed by the verifier, 0 until verified.
    pub actual_yield: u64,
    /// `true` once the verifier has recorded the actual yield.
    pub verified: bool,
    /// Height of verification, 0 until verified.
    pub verification_date: Height,
    /// Registrant until verification, verifier afterwards.
    pub verified_by: Identity,
}

/// Store of [`YieldRecord`]s keyed by farm and season.
#[derive(Debug, Clone)]
pub struct YieldRegistry {
    records: HashMap<YieldKey, YieldRecord>,
    admin: Identity,
    verifier: Identity,
}

impl YieldRegistry {
    /// Creates an empty registry with the given admin and verifier.
    #[must_use]
    pub fn new(admin: Identity, verifier: Identity) -> Self {
        Self {
            records: HashMap::new(),
            admin,
            verifier,
        }
    }

    /// Declares the expected yield of `farm_id` for `season`.
    ///
    /// Any earlier record for the same farm and season is replaced by a
    /// fresh, unverified one.
    ///
    /// # Errors
    ///
    /// In order: [`YieldError::FarmNotFound`] if `farms` has no such farm,
    /// [`YieldError::NotFarmOwner`] if the caller does not own it.
    pub fn register_expected_yield(
        &mut self,
        ctx: &CallContext,
        farms: &impl FarmDirectory,
        farm_id: FarmId,
        season: String,
        expected_yield: i64,
    ) -> Result<bool, YieldError> {
        let owner = farms.farm_owner(farm_id).ok_or(YieldError::FarmNotFound)?;
        Gate::Holder(owner).check(&ctx.sender, YieldError::NotFarmOwner)?;

        self.records.insert(
            YieldKey { farm_id, season },
            YieldRecord {
                expected_yield,
                actual_yield: 0,
                verified: false,
                verification_date: 0,
                verified_by: ctx.sender.clone(),
            },
        );
        Ok(true)
    }

    /// Records the verified harvest for `farm_id` and `season`.
    ///
    /// A second verification overwrites the first.
    ///
    /// # Errors
    ///
    /// In order: [`YieldError::YieldRecordNotFound`] if nothing was
    /// registered, [`YieldError::NotVerifier`] unless the caller is the
    /// verifier.
    pub fn verify_actual_yield(
        &mut self,
        ctx: &CallContext,
        farm_id: FarmId,
        season: String,
        actual_yield: u64,
    ) -> Result<bool, YieldError> {
        let record = self
            .records
            .get_mut(&YieldKey { farm_id, season })
            .ok_or(YieldError::YieldRecordNotFound)?;
        Gate::Holder(&self.verifier).check(&ctx.sender, YieldError::NotVerifier)?;

        record.actual_yield = actual_yield;
        record.verified = true;
        record.verification_date = ctx.height;
        record.verified_by = ctx.sender.clone();
        Ok(true)
    }

    /// Percentage of the expected yield that was lost, rounded down.
    ///
    /// Returns 0 when the actual yield meets or exceeds the expectation.
    ///
    /// # Errors
    ///
    /// In order: [`YieldError::YieldRecordNotFound`],
    /// [`YieldError::NotVerified`], [`YieldError::InvalidExpectedYield`]
    /// when the expected yield is not positive.
    pub fn calculate_yield_loss(&self, farm_id: FarmId, season: &str) -> Result<u64, YieldError> {
        let record = self
            .get_yield_data(farm_id, season)
            .ok_or(YieldError::YieldRecordNotFound)?;
        if !record.verified {
            return Err(YieldError::NotVerified);
        }
        let expected = u64::try_from(record.expected_yield)
            .ok()
            .filter(|&expected| expected > 0)
            .ok_or(YieldError::InvalidExpectedYield)?;
        Ok(loss_percentage(expected, record.actual_yield))
    }

    /// Designates a new verifier.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::NotAdmin`] unless the caller is the admin.
    pub fn set_verifier(&mut self, ctx: &CallContext, verifier: Identity) -> Result<bool, YieldError> {
        Gate::Holder(&self.admin).check(&ctx.sender, YieldError::NotAdmin)?;
        self.verifier = verifier;
        Ok(true)
    }

    /// Hands the admin role to `new_admin`.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::NotAdmin`] unless the caller is the admin.
    pub fn set_admin(&mut self, ctx: &CallContext, new_admin: Identity) -> Result<bool, YieldError> {
        Gate::Holder(&self.admin).check(&ctx.sender, YieldError::NotAdmin)?;
        self.admin = new_admin;
        Ok(true)
    }

    /// Returns the record for `farm_id` and `season`, if any.
    #[must_use]
    pub fn get_yield_data(&self, farm_id: FarmId, season: &str) -> Option<&YieldRecord> {
        self.records.get(&YieldKey {
            farm_id,
            season: season.to_string(),
        })
    }

    /// Current verifier identity.
    #[must_use]
    pub fn verifier(&self) -> &Identity {
        &self.verifier
    }

    /// Current registry admin.
    #[must_use]
    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    /// Number of stored yield records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no yield has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `floor((expected - actual) * 100 / expected)`, clamped at 0.
///
/// `expected` must be non-zero.
fn loss_percentage(expected: u64, actual: u64) -> u64 {
    if actual >= expected {
        return 0;
    }
    let shortfall = u128::from(expected - actual);
    let pct = shortfall * 100 / u128::from(expected);
    // shortfall <= expected, so pct <= 100.
    u64::try_from(pct).unwrap_or(100)
}
