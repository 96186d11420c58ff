//! Authorization predicates for registry mutations.
//!
//! Every mutating operation names the [`Gate`] that guards it and calls
//! [`Gate::check`] before any business-rule validation. The gate itself
//! is a pure function of the caller and the identities it was built
//! from; the error returned on refusal is chosen by the operation so that
//! each registry keeps its own stable error codes.

use super::Identity;

/// Who may pass a mutation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate<'a> {
    /// Only the exact holder: a record owner, the oracle, the verifier,
    /// or the current admin.
    Holder(&'a Identity),
    /// The record owner or the registry admin.
    HolderOrAdmin {
        /// Owner of the record being mutated.
        holder: &'a Identity,
        /// Current registry admin.
        admin: &'a Identity,
    },
}

impl Gate<'_> {
    /// Returns `true` if `caller` may pass this gate.
    #[must_use]
    pub fn permits(&self, caller: &Identity) -> bool {
        match self {
            Self::Holder(holder) => caller == *holder,
            Self::HolderOrAdmin { holder, admin } => caller == *holder || caller == *admin,
        }
    }

    /// Returns `Ok(())` if `caller` passes, otherwise `refusal`.
    ///
    /// # Errors
    ///
    /// Returns `refusal` when [`Gate::permits`] is `false`.
    pub fn check<E>(&self, caller: &Identity, refusal: E) -> Result<(), E> {
        if self.permits(caller) {
            Ok(())
        } else {
            Err(refusal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holder_gate_admits_only_holder() {
        let owner = Identity::new("ST1OWNER");
        let other = Identity::new("ST2OTHER");
        let gate = Gate::Holder(&owner);
        assert!(gate.permits(&owner));
        assert!(!gate.permits(&other));
    }

    #[test]
    fn holder_or_admin_admits_both() {
        let owner = Identity::new("ST1OWNER");
        let admin = Identity::new("ST1ADMIN");
        let other = Identity::new("ST2OTHER");
        let gate = Gate::HolderOrAdmin {
            holder: &owner,
            admin: &admin,
        };
        assert!(gate.permits(&owner));
        assert!(gate.permits(&admin));
        assert!(!gate.permits(&other));
    }

    #[test]
    fn check_returns_supplied_refusal() {
        let owner = Identity::new("ST1OWNER");
        let other = Identity::new("ST2OTHER");
        let gate = Gate::Holder(&owner);
        assert_eq!(gate.check(&owner, 3u32), Ok(()));
        assert_eq!(gate.check(&other, 3u32), Err(3));
    }
}
