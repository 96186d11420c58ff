//! Yield Registry DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FarmId, Identity, YieldRecord};

/// Request body for `POST /yields`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterYieldRequest {
    /// Farm the expectation is for.
    pub farm_id: FarmId,
    /// Season label.
    pub season: String,
    /// Expected yield. Non-positive values are accepted but have no loss percentage.
    pub expected_yield: i64,
}

/// Request body for `POST /yields/{farm_id}/{season}/verify`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyYieldRequest {
    /// Verified harvest.
    pub actual_yield: u64,
}

/// A yield record as returned by `GET /yields/{farm_id}/{season}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct YieldResponse {
    /// Farm id.
    pub farm_id: FarmId,
    /// Season label.
    pub season: String,
    /// Expected yield. Non-positive values are accepted but have no loss percentage.
    pub expected_yield: i64,
    /// Verified yield, 0 until verified.
    pub actual_yield: u64,
    /// Whether the verifier has recorded the actual yield.
    pub verified: bool,
    /// Height of verification, 0 until verified.
    pub verification_date: u64,
    /// Registrant until verification, verifier afterwards.
    pub verified_by: Identity,
}

impl YieldResponse {
    /// Builds the response for the record stored under the key.
    #[must_use]
    pub fn new(farm_id: FarmId, season: String, record: YieldRecord) -> Self {
        Self {
            farm_id,
            season,
            expected_yield: record.expected_yield,
            actual_yield: record.actual_yield,
            verified: record.verified,
            verification_date: record.verification_date,
            verified_by: record.verified_by,
        }
    }
}

/// Response body for `GET /yields/{farm_id}/{season}/loss`.
#[derive(Debug, Serialize, ToSchema)]
pub struct YieldLossResponse {
    /// Farm id.
    pub farm_id: FarmId,
    /// Season label.
    pub season: String,
    /// Lost share of the expected yield, percent rounded down.
    pub loss_percent: u64,
}
