//! Per-call execution context supplied by the hosting environment.

use super::Identity;

/// Block height used as the ledger's timestamp substitute.
pub type Height = u64;

/// Who is calling, and at which height the call executes.
///
/// Every mutating registry operation takes a `CallContext`; reads never
/// need one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Identity of the caller (`tx-sender`).
    pub sender: Identity,
    /// Height the call is executed at.
    pub height: Height,
}

impl CallContext {
    /// Creates a context for a call from `sender` at `height`.
    #[must_use]
    pub fn new(sender: Identity, height: Height) -> Self {
        Self { sender, height }
    }
}
