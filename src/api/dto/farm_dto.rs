//! Farm Registry DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FarmId, FarmRecord, Identity};

/// Request body for `POST /farms` and `PUT /farms/{farm_id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FarmDetailsRequest {
    /// Free-form location description.
    pub location: String,
    /// Crop grown on the farm.
    pub crop_type: String,
    /// Farm area, must be greater than zero.
    pub area_size: i64,
}

/// Response body for `POST /farms` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterFarmResponse {
    /// Newly allocated farm id.
    pub farm_id: FarmId,
}

/// A farm record as returned by `GET /farms/{farm_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FarmResponse {
    /// Farm id.
    pub farm_id: FarmId,
    /// Registering principal.
    pub owner: Identity,
    /// Location description.
    pub location: String,
    /// Crop type.
    pub crop_type: String,
    /// Farm area.
    pub area_size: i64,
    /// Height of registration.
    pub registered_at: u64,
    /// Whether the farm is still active.
    pub active: bool,
}

impl FarmResponse {
    /// Builds the response for `farm_id` from its record.
    #[must_use]
    pub fn new(farm_id: FarmId, record: FarmRecord) -> Self {
        Self {
            farm_id,
            owner: record.owner,
            location: record.location,
            crop_type: record.crop_type,
            area_size: record.area_size,
            registered_at: record.registered_at,
            active: record.active,
        }
    }
}
