//! REST API layer: caller extraction, route handlers, DTOs, and router
//! composition.
//!
//! Registry endpoints are mounted under `/api/v1`; `/health` sits at the
//! root.

pub mod caller;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}
