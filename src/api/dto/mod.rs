//! Data Transfer Objects for REST request/response serialization.
//!
//! Registry records are mapped into response DTOs here so the domain
//! types stay free of transport concerns.

pub mod common_dto;
pub mod farm_dto;
pub mod weather_dto;
pub mod yield_dto;

pub use common_dto::*;
pub use farm_dto::*;
pub use weather_dto::*;
pub use yield_dto::*;
