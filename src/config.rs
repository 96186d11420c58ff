//! Ledger configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every role holder defaults to the
//! deployer principal so a fresh node is usable without any setup.

use std::net::SocketAddr;

use crate::domain::{Height, Identity, Roles};

/// Principal that holds every role unless configured otherwise.
pub const DEFAULT_DEPLOYER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

/// Top-level ledger configuration.
///
/// Loaded once at startup via [`LedgerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Chain tip the ledger starts from.
    pub genesis_height: Height,

    /// Initial role holders of the three registries.
    pub roles: Roles,

    /// Seconds before an in-flight request is aborted.
    pub request_timeout_secs: u64,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub log_json: bool,
}

impl LedgerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let genesis_height = parse_env("GENESIS_HEIGHT", 0);

        let deployer = parse_identity("DEPLOYER", &Identity::from(DEFAULT_DEPLOYER));
        let roles = Roles {
            farm_admin: parse_identity("FARM_ADMIN", &deployer),
            weather_admin: parse_identity("WEATHER_ADMIN", &deployer),
            weather_oracle: parse_identity("WEATHER_ORACLE", &deployer),
            yield_admin: parse_identity("YIELD_ADMIN", &deployer),
            yield_verifier: parse_identity("YIELD_VERIFIER", &deployer),
        };

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", 30);
        let log_json = matches!(
            std::env::var("LOG_FORMAT").ok().as_deref(),
            Some("json") | Some("JSON")
        );

        Ok(Self {
            listen_addr,
            genesis_height,
            roles,
            request_timeout_secs,
            log_json,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reads a principal from the environment. Blank values count as unset.
fn parse_identity(key: &str, default: &Identity) -> Identity {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map_or_else(|| default.clone(), Identity::from)
}
