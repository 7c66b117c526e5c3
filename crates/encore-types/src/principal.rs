//! Principal (acting identity) types.
//!
//! A [`Principal`] represents the actor evaluated for authorization,
//! separating "who is acting" from "what they are allowed to do".
//!
//! # Design Rationale
//!
//! Principal lives in `encore-types` (not `encore-policy`) because:
//!
//! 1. **Event boundary**: domain events carry principals without
//!    depending on policy logic
//! 2. **No policy dependency**: Principal is pure identity; roles and
//!    statements are resolved elsewhere
//! 3. **Avoid circular dependency**: Event -> Policy -> Types would
//!    create issues
//!
//! Permission resolution (groups, roles, statements) happens in the
//! runtime layer's `PrincipalContextResolver`.

use crate::{IdentityId, PrincipalId};
use serde::{Deserialize, Serialize};

/// The actor evaluated for authorization.
///
/// A Principal carries identity only, not permission. Effective
/// permissions are derived at evaluation time from the principal's
/// group memberships and business linkage.
///
/// # Delegation
///
/// A principal may act on behalf of another principal (e.g., an agency
/// staffer managing a talent's account). The `delegated_from` link is
/// recorded for audit purposes; authorization always evaluates the
/// *acting* principal, never the delegator.
///
/// # Example
///
/// ```
/// use encore_types::{Principal, PrincipalId, IdentityId};
///
/// let staffer = Principal::new(IdentityId::new());
/// assert!(!staffer.is_delegated());
///
/// let delegate = Principal::delegated(IdentityId::new(), staffer.id());
/// assert!(delegate.is_delegated());
/// assert_eq!(delegate.delegated_from(), Some(staffer.id()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identifier of this principal.
    id: PrincipalId,
    /// The login identity this principal is linked to.
    identity_id: IdentityId,
    /// The principal this one acts on behalf of, if any.
    delegated_from: Option<PrincipalId>,
}

impl Principal {
    /// Creates a new principal linked to the given identity.
    #[must_use]
    pub fn new(identity_id: IdentityId) -> Self {
        Self {
            id: PrincipalId::new(),
            identity_id,
            delegated_from: None,
        }
    }

    /// Creates a principal acting on behalf of another principal.
    #[must_use]
    pub fn delegated(identity_id: IdentityId, delegated_from: PrincipalId) -> Self {
        Self {
            id: PrincipalId::new(),
            identity_id,
            delegated_from: Some(delegated_from),
        }
    }

    /// Returns this principal's identifier.
    #[must_use]
    pub fn id(&self) -> PrincipalId {
        self.id
    }

    /// Returns the linked identity identifier.
    #[must_use]
    pub fn identity_id(&self) -> IdentityId {
        self.identity_id
    }

    /// Returns the delegator's identifier, if this is a delegation.
    #[must_use]
    pub fn delegated_from(&self) -> Option<PrincipalId> {
        self.delegated_from
    }

    /// Returns `true` if this principal acts on behalf of another.
    #[must_use]
    pub fn is_delegated(&self) -> bool {
        self.delegated_from.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_principal_is_not_delegated() {
        let p = Principal::new(IdentityId::new());
        assert!(!p.is_delegated());
        assert_eq!(p.delegated_from(), None);
    }

    #[test]
    fn delegated_principal_records_delegator() {
        let owner = Principal::new(IdentityId::new());
        let delegate = Principal::delegated(IdentityId::new(), owner.id());

        assert!(delegate.is_delegated());
        assert_eq!(delegate.delegated_from(), Some(owner.id()));
        assert_ne!(delegate.id(), owner.id());
    }

    #[test]
    fn principal_round_trips_through_serde() {
        let p = Principal::delegated(IdentityId::new(), PrincipalId::new());
        let json = serde_json::to_string(&p).expect("serialize");
        let back: Principal = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(p, back);
    }
}
