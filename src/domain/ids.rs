//! Counter-allocated record identifiers.
//!
//! [`FarmId`] and [`EventId`] are newtypes around `u64` so that a farm
//! number can never be passed where a weather event number is expected.
//! Both are issued by their owning registry from a private counter whose
//! first value is [`FIRST_ID`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The first identifier any counter hands out.
pub const FIRST_ID: u64 = 1;

/// Identifier of a registered farm.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct FarmId(u64);

impl FarmId {
    /// Creates a `FarmId` from its raw counter value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FarmId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Identifier of a reported weather event. Global across locations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    /// Creates an `EventId` from its raw counter value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EventId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Monotonic id allocator owned by a single registry.
///
/// The counter only moves when [`IdCounter::issue`] is called, which
/// registries do as the last step of a successful insert. Once `u64::MAX`
/// has been issued the counter is exhausted and never repeats an id.
#[derive(Debug, Clone)]
pub(crate) struct IdCounter {
    last: u64,
}

impl IdCounter {
    pub(crate) const fn new() -> Self {
        Self { last: FIRST_ID - 1 }
    }

    #[cfg(test)]
    pub(crate) const fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Value the next call to [`IdCounter::issue`] will return, or `None`
    /// when exhausted.
    pub(crate) const fn peek(&self) -> Option<u64> {
        self.last.checked_add(1)
    }

    /// Hands out the next id. Leaves the counter untouched when exhausted.
    pub(crate) fn issue(&mut self) -> Option<u64> {
        let next = self.peek()?;
        self.last = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_first_id() {
        let mut counter = IdCounter::new();
        assert_eq!(counter.peek(), Some(FIRST_ID));
        assert_eq!(counter.issue(), Some(1));
        assert_eq!(counter.issue(), Some(2));
        assert_eq!(counter.peek(), Some(3));
    }

    #[test]
    fn counter_never_repeats_the_last_id() {
        let mut counter = IdCounter::starting_after(u64::MAX - 1);
        assert_eq!(counter.issue(), Some(u64::MAX));
        assert_eq!(counter.peek(), None);
        assert_eq!(counter.issue(), None);
        assert_eq!(counter.issue(), None);
    }

    #[test]
    fn ids_order_by_counter_value() {
        assert!(FarmId::new(1) < FarmId::new(2));
        assert!(EventId::from(7) > EventId::from(3));
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let id = FarmId::new(4);
        let mut map = HashMap::new();
        map.insert(id, "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(format!("{}", FarmId::new(12)), "12");
        assert_eq!(EventId::new(3).to_string(), "3");
    }
}
