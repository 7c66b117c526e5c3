//! Principal groups: named sets of principals sharing attached roles.

use encore_types::{AccountId, PrincipalGroupId, PrincipalId, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named set of member principals plus a set of attached roles,
/// owned by an account.
///
/// A principal's effective permissions flow entirely through its group
/// memberships: groups carry roles, roles reference policies, policies
/// hold statements.
///
/// # Default Groups
///
/// Every account has at least one `is_default` group (e.g. "Owners")
/// created at account setup. Default groups are **never** deleted by
/// the grant-revocation path, even if a grant record incorrectly
/// references one. Groups created by the grant lifecycle are always
/// non-default.
///
/// # Example
///
/// ```
/// use encore_policy::PrincipalGroup;
/// use encore_types::{AccountId, PrincipalId, RoleId};
///
/// let mut group = PrincipalGroup::new(AccountId::new(), "Agency X collaborators");
/// let member = PrincipalId::new();
///
/// group.add_member(member);
/// group.attach_role(RoleId::new());
///
/// assert!(group.has_member(member));
/// assert!(!group.is_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalGroup {
    id: PrincipalGroupId,
    account_id: AccountId,
    name: String,
    is_default: bool,
    members: HashSet<PrincipalId>,
    role_ids: HashSet<RoleId>,
}

impl PrincipalGroup {
    /// Creates a non-default group owned by `account_id`.
    #[must_use]
    pub fn new(account_id: AccountId, name: impl Into<String>) -> Self {
        Self {
            id: PrincipalGroupId::new(),
            account_id,
            name: name.into(),
            is_default: false,
            members: HashSet::new(),
            role_ids: HashSet::new(),
        }
    }

    /// Creates the account's default group (e.g. "Owners").
    ///
    /// Default groups are protected from grant-revocation teardown.
    #[must_use]
    pub fn default_group(account_id: AccountId, name: impl Into<String>) -> Self {
        Self {
            id: PrincipalGroupId::new(),
            account_id,
            name: name.into(),
            is_default: true,
            members: HashSet::new(),
            role_ids: HashSet::new(),
        }
    }

    /// Returns the group identifier.
    #[must_use]
    pub fn id(&self) -> PrincipalGroupId {
        self.id
    }

    /// Returns the owning account.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the account's protected default group.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns the member principals.
    #[must_use]
    pub fn members(&self) -> &HashSet<PrincipalId> {
        &self.members
    }

    /// Returns the attached roles.
    #[must_use]
    pub fn role_ids(&self) -> &HashSet<RoleId> {
        &self.role_ids
    }

    /// Returns `true` if `principal_id` is a member.
    #[must_use]
    pub fn has_member(&self, principal_id: PrincipalId) -> bool {
        self.members.contains(&principal_id)
    }

    /// Adds a member. Adding an existing member is a no-op.
    pub fn add_member(&mut self, principal_id: PrincipalId) {
        self.members.insert(principal_id);
    }

    /// Removes a member. Removing a non-member is a no-op.
    pub fn remove_member(&mut self, principal_id: PrincipalId) {
        self.members.remove(&principal_id);
    }

    /// Attaches a role. Attaching an already-attached role is a no-op.
    pub fn attach_role(&mut self, role_id: RoleId) {
        self.role_ids.insert(role_id);
    }

    /// Detaches a role. Detaching an unattached role is a no-op.
    pub fn detach_role(&mut self, role_id: RoleId) {
        self.role_ids.remove(&role_id);
    }
}
