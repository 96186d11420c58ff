//! Domain layer: identities, registries, and the ledger aggregate.
//!
//! This module contains the registry state-transition logic: the farm,
//! weather and yield registries with their validation and authorization
//! rules, the typed identifiers and composite keys they store records
//! under, and the [`Ledger`] that executes calls against them.

pub mod context;
pub mod farm_registry;
pub mod gate;
pub mod identity;
pub mod ids;
pub mod ledger;
pub mod weather_registry;
pub mod yield_registry;

pub use context::{CallContext, Height};
pub use farm_registry::{FarmDirectory, FarmRecord, FarmRegistry};
pub use gate::Gate;
pub use identity::Identity;
pub use ids::{EventId, FarmId};
pub use ledger::{Ledger, Roles};
pub use weather_registry::{
    EventReport, Readings, WeatherEvent, WeatherObservation, WeatherRegistry,
};
pub use yield_registry::{YieldRecord, YieldRegistry};
