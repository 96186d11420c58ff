//! Farm Registry: ownership-checked farm records.
//!
//! Farms are created by any caller, who becomes the owner. Only the owner
//! may change a farm's details; the owner or the registry admin may
//! deactivate it. Records are never removed, deactivation only clears the
//! `active` flag.

use std::collections::HashMap;

use serde::Serialize;

use super::context::{CallContext, Height};
use super::gate::Gate;
use super::ids::{FarmId, IdCounter};
use super::Identity;
use crate::error::FarmError;

/// A registered farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmRecord {
    /// Identity that registered the farm.
    pub owner: Identity,
    /// Free-form location description.
    pub location: String,
    /// Crop grown on the farm.
    pub crop_type: String,
    /// Farm area, always greater than zero.
    pub area_size: i64,
    /// Height at which the farm was registered.
    pub registered_at: Height,
    /// `false` once the farm has been deactivated.
    pub active: bool,
}

/// Read access to farm ownership, consumed by the Yield Registry.
pub trait FarmDirectory {
    /// Returns the owner of `farm_id`, or `None` if no such farm exists.
    fn farm_owner(&self, farm_id: FarmId) -> Option<&Identity>;
}

/// Keyed store of [`FarmRecord`]s with its own id counter and admin.
#[derive(Debug, Clone)]
pub struct FarmRegistry {
    farms: HashMap<FarmId, FarmRecord>,
    counter: IdCounter,
    admin: Identity,
}

impl FarmRegistry {
    /// Creates an empty registry administered by `admin`.
    #[must_use]
    pub fn new(admin: Identity) -> Self {
        Self {
            farms: HashMap::new(),
            counter: IdCounter::new(),
            admin,
        }
    }

    /// Registers a farm owned by the caller and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::InvalidArea`] if `area_size` is not positive,
    /// or [`FarmError::IdsExhausted`] once every farm id has been used.
    pub fn register_farm(
        &mut self,
        ctx: &CallContext,
        location: String,
        crop_type: String,
        area_size: i64,
    ) -> Result<FarmId, FarmError> {
        validate_area(area_size)?;

        let farm_id = self
            .counter
            .issue()
            .map(FarmId::new)
            .ok_or(FarmError::IdsExhausted)?;
        self.farms.insert(
            farm_id,
            FarmRecord {
                owner: ctx.sender.clone(),
                location,
                crop_type,
                area_size,
                registered_at: ctx.height,
                active: true,
            },
        );
        Ok(farm_id)
    }

    /// Replaces the location, crop type and area of an existing farm.
    ///
    /// Owner, registration height and active flag are left untouched.
    ///
    /// # Errors
    ///
    /// In order: [`FarmError::NotFound`] if the farm does not exist,
    /// [`FarmError::Unauthorized`] if the caller is not the owner,
    /// [`FarmError::InvalidArea`] if `area_size` is not positive.
    pub fn update_farm(
        &mut self,
        ctx: &CallContext,
        farm_id: FarmId,
        location: String,
        crop_type: String,
        area_size: i64,
    ) -> Result<bool, FarmError> {
        let farm = self.farms.get_mut(&farm_id).ok_or(FarmError::NotFound)?;
        Gate::Holder(&farm.owner).check(&ctx.sender, FarmError::Unauthorized)?;
        validate_area(area_size)?;

        farm.location = location;
        farm.crop_type = crop_type;
        farm.area_size = area_size;
        Ok(true)
    }

    /// Marks a farm inactive. Succeeds again on an already inactive farm.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] if the farm does not exist, or
    /// [`FarmError::Unauthorized`] if the caller is neither owner nor admin.
    pub fn deactivate_farm(&mut self, ctx: &CallContext, farm_id: FarmId) -> Result<bool, FarmError> {
        let farm = self.farms.get_mut(&farm_id).ok_or(FarmError::NotFound)?;
        Gate::HolderOrAdmin {
            holder: &farm.owner,
            admin: &self.admin,
        }
        .check(&ctx.sender, FarmError::Unauthorized)?;

        farm.active = false;
        Ok(true)
    }

    /// Hands the admin role to `new_admin`.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::Unauthorized`] unless the caller is the current
    /// admin.
    pub fn set_admin(&mut self, ctx: &CallContext, new_admin: Identity) -> Result<bool, FarmError> {
        Gate::Holder(&self.admin).check(&ctx.sender, FarmError::Unauthorized)?;
        self.admin = new_admin;
        Ok(true)
    }

    /// Returns the farm registered under `farm_id`, if any.
    #[must_use]
    pub fn get_farm(&self, farm_id: FarmId) -> Option<&FarmRecord> {
        self.farms.get(&farm_id)
    }

    /// Current registry admin.
    #[must_use]
    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    /// Number of farms ever registered, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.farms.len()
    }

    /// Returns `true` if no farm has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.farms.is_empty()
    }
}

impl FarmDirectory for FarmRegistry {
    fn farm_owner(&self, farm_id: FarmId) -> Option<&Identity> {
        self.farms.get(&farm_id).map(|farm| &farm.owner)
    }
}

fn validate_area(area_size: i64) -> Result<(), FarmError> {
    if area_size <= 0 {
        return Err(FarmError::InvalidArea);
    }
    Ok(())
}
