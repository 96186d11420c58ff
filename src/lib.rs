//! # agri-ledger
//!
//! Farm, weather and crop-yield registries for an agricultural
//! record-keeping ledger, served over REST.
//!
//! Three registries share one ledger:
//!
//! - **Farm Registry**: farms owned by principals, with sequential ids.
//! - **Weather Registry**: oracle-submitted observations and events.
//! - **Yield Registry**: expected vs. verified harvests and the loss
//!   percentage between them.
//!
//! Every mutating call runs against a [`CallContext`](domain::CallContext)
//! carrying the signer and the height of the block it lands in; a rejected
//! call leaves the ledger untouched.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, x-caller header)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── LedgerService (service/)   tokio RwLock, tracing
//!     │
//!     ├── Ledger (domain/)           chain tip, CallContext
//!     │
//!     └── FarmRegistry · WeatherRegistry · YieldRegistry
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
