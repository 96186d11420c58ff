//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Identity;

/// Success body for mutations that return a plain boolean.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AckResponse {
    /// Always `true` on success.
    pub ok: bool,
}

impl AckResponse {
    /// Wraps the boolean returned by a registry operation.
    #[must_use]
    pub const fn new(ok: bool) -> Self {
        Self { ok }
    }
}

/// Request body for role-transfer endpoints.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetRoleRequest {
    /// Principal that receives the role.
    pub identity: Identity,
}
