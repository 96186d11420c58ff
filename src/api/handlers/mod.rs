//! REST endpoint handlers organized by registry.

pub mod admin;
pub mod farm;
pub mod system;
pub mod weather;
pub mod yields;

use axum::Router;

use crate::app_state::AppState;

/// Composes all registry routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(farm::routes())
        .merge(weather::routes())
        .merge(yields::routes())
        .merge(admin::routes())
}
