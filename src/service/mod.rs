//! Service layer: business logic orchestration.
//!
//! [`LedgerService`] serializes calls onto the [`super::domain::Ledger`]
//! and logs every committed or rejected mutation.

pub mod ledger_service;

pub use ledger_service::LedgerService;
