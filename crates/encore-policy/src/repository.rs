//! Persistence trait seams.
//!
//! The policy core depends on, but does not implement, persistence.
//! Trait definitions live here so both the grant lifecycle and the
//! runtime can reference them without circular dependencies; concrete
//! implementations live in `encore-runtime`.
//!
//! ```text
//! PolicyRepository trait (encore-policy)   <- abstract, no storage deps
//!          │
//!          └── MemoryPolicyStore (encore-runtime)   <- concrete impl
//! ```
//!
//! All traits are `Send + Sync` so repositories can be shared as
//! trait objects across threads and async tasks.

use crate::group::PrincipalGroup;
use crate::policy::Policy;
use crate::role::Role;
use encore_types::{
    AccountId, AgencyId, ErrorCode, PolicyId, Principal, PrincipalGroupId, PrincipalId, RoleId,
    TalentId, WikiGroupId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Error surfaced by repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint was violated (duplicate id or key).
    #[error("duplicate {entity} for key '{key}'")]
    Duplicate {
        /// The entity kind, e.g. `"policy"`.
        entity: &'static str,
        /// The conflicting key, rendered for diagnostics.
        key: String,
    },

    /// The storage backend failed.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl ErrorCode for RepositoryError {
    fn code(&self) -> &'static str {
        match self {
            Self::Duplicate { .. } => "REPO_DUPLICATE",
            Self::Backend(_) => "REPO_BACKEND",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // Another writer won the race; the caller's idempotency
            // check absorbs it on retry.
            Self::Duplicate { .. } => true,
            Self::Backend(_) => true,
        }
    }
}

/// Storage for policies, keyed by [`PolicyId`] and unique name.
pub trait PolicyRepository: Send + Sync {
    /// Looks up a policy by identifier.
    fn find_by_id(&self, id: PolicyId) -> Result<Option<Policy>, RepositoryError>;

    /// Looks up a policy by its unique name.
    fn find_by_name(&self, name: &str) -> Result<Option<Policy>, RepositoryError>;

    /// Returns every stored policy, in no particular order.
    fn find_all(&self) -> Result<Vec<Policy>, RepositoryError>;

    /// Persists a policy.
    fn save(&self, policy: Policy) -> Result<(), RepositoryError>;

    /// Deletes a policy. Deleting an absent policy is a no-op.
    fn delete(&self, id: PolicyId) -> Result<(), RepositoryError>;
}

/// Storage for roles, keyed by [`RoleId`].
pub trait RoleRepository: Send + Sync {
    /// Looks up a role by identifier.
    fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RepositoryError>;

    /// Persists a role.
    fn save(&self, role: Role) -> Result<(), RepositoryError>;

    /// Deletes a role. Deleting an absent role is a no-op.
    fn delete(&self, id: RoleId) -> Result<(), RepositoryError>;
}

/// Storage for principal groups, keyed by [`PrincipalGroupId`].
pub trait PrincipalGroupRepository: Send + Sync {
    /// Looks up a group by identifier.
    fn find_by_id(&self, id: PrincipalGroupId)
        -> Result<Option<PrincipalGroup>, RepositoryError>;

    /// Returns every group the given principal is a member of.
    fn find_by_member(&self, principal_id: PrincipalId)
        -> Result<Vec<PrincipalGroup>, RepositoryError>;

    /// Persists a group (insert or update).
    fn save(&self, group: PrincipalGroup) -> Result<(), RepositoryError>;

    /// Deletes a group. Deleting an absent group is a no-op.
    fn delete(&self, id: PrincipalGroupId) -> Result<(), RepositoryError>;
}

/// Business-linkage attributes of a principal, used to satisfy
/// principal-side condition placeholders.
///
/// Maintained by the account/wiki bounded contexts; the authorization
/// core only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalLinkage {
    /// The principal's agency, if agency-scoped.
    pub agency_id: Option<AgencyId>,
    /// Wiki groups the principal is linked to.
    pub wiki_group_ids: HashSet<WikiGroupId>,
    /// Talents the principal is linked to.
    pub talent_ids: HashSet<TalentId>,
}

/// Storage for principals and their business linkage.
pub trait PrincipalRepository: Send + Sync {
    /// Looks up a principal by identifier.
    fn find_by_id(&self, id: PrincipalId) -> Result<Option<Principal>, RepositoryError>;

    /// Returns every principal belonging to the given account.
    fn find_by_account(&self, account_id: AccountId)
        -> Result<Vec<Principal>, RepositoryError>;

    /// Returns the principal's business linkage, if the principal
    /// exists.
    fn linkage(&self, id: PrincipalId) -> Result<Option<PrincipalLinkage>, RepositoryError>;
}

/// Lookup from a talent account to its wiki Talent record.
///
/// The wiki Talent page is created by the content workflow, possibly
/// after the business affiliation is activated, so the lookup may
/// legitimately find nothing.
pub trait TalentRepository: Send + Sync {
    /// Returns the wiki talent for the given account, if one exists.
    fn find_by_account(&self, account_id: AccountId)
        -> Result<Option<TalentId>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_errors_are_recoverable() {
        let err = RepositoryError::Duplicate {
            entity: "policy",
            key: "FULL_ACCESS".to_string(),
        };
        assert_eq!(err.code(), "REPO_DUPLICATE");
        assert!(err.is_recoverable());
    }

    #[test]
    fn duplicate_error_message_names_entity_and_key() {
        let err = RepositoryError::Duplicate {
            entity: "grant",
            key: "aff-1/talent_side".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate grant for key 'aff-1/talent_side'");
    }
}
