//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::LedgerService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ledger service for all registry operations.
    pub ledger_service: Arc<LedgerService>,
}
