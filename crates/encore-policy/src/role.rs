//! Roles: named bundles of policy references.

use encore_types::{PolicyId, RoleId};
use serde::{Deserialize, Serialize};

/// A named bundle of policies.
///
/// A role owns no statements directly; it references policies by
/// identifier, and resolution flattens the referenced policies'
/// statements into the principal's effective statement list. Like
/// policies, roles are either seeded system roles (never deleted by
/// the grant lifecycle) or custom roles created and torn down with a
/// grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: String,
    policy_ids: Vec<PolicyId>,
    is_system: bool,
}

impl Role {
    /// Creates a custom role with a fresh random identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, policy_ids: Vec<PolicyId>) -> Self {
        Self {
            id: RoleId::new(),
            name: name.into(),
            policy_ids,
            is_system: false,
        }
    }

    /// Creates a system role with a deterministic seeded identifier.
    #[must_use]
    pub fn system(name: impl Into<String>, policy_ids: Vec<PolicyId>) -> Self {
        let name = name.into();
        Self {
            id: RoleId::seeded(&name),
            name,
            policy_ids,
            is_system: true,
        }
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the referenced policy identifiers in declaration order.
    #[must_use]
    pub fn policy_ids(&self) -> &[PolicyId] {
        &self.policy_ids
    }

    /// Returns `true` for seeded system roles.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }
}
