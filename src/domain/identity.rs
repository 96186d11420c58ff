//! Opaque caller identity.
//!
//! [`Identity`] wraps the principal string supplied by the hosting
//! environment. Identities carry no structure the ledger relies on; they
//! are only ever compared for equality against stored owner and role
//! holders.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Principal that issued a call, or that holds a record or role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wraps a principal string.
    #[must_use]
    pub fn new(principal: impl Into<String>) -> Self {
        Self(principal.into())
    }

    /// Returns the principal as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(principal: &str) -> Self {
        Self(principal.to_string())
    }
}

impl From<String> for Identity {
    fn from(principal: String) -> Self {
        Self(principal)
    }
}
