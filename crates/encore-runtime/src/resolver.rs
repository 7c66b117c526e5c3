//! Principal context resolution.
//!
//! Aggregates a principal's authorization snapshot: group memberships
//! → attached roles → referenced policies → flattened statements,
//! plus the business-linkage attributes that satisfy principal-side
//! condition placeholders.
//!
//! # Fail-loud References
//!
//! A group referencing a missing role, or a role referencing a
//! missing policy, is a hard error — access must never silently
//! shrink (or appear to shrink) because of a dangling reference. The
//! bootstrap ordering contract (policies before roles) makes dangling
//! references a deployment bug, not an expected state.

use encore_policy::{
    PolicyRepository, PrincipalContext, PrincipalGroupRepository, PrincipalRepository,
    RepositoryError, RoleRepository, Statement,
};
use encore_types::{ErrorCode, PolicyId, PrincipalGroupId, PrincipalId, RoleId};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Error raised while resolving a principal's context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The principal does not exist; the evaluator must not be
    /// invoked.
    #[error("principal '{0}' not found")]
    PrincipalNotFound(PrincipalId),

    /// A group references a role that does not exist.
    #[error("group '{group}' references missing role '{role}'")]
    DanglingRole {
        /// The referencing group.
        group: PrincipalGroupId,
        /// The missing role.
        role: RoleId,
    },

    /// A role references a policy that does not exist.
    #[error("role '{role}' references missing policy '{policy}'")]
    DanglingPolicy {
        /// The referencing role.
        role: RoleId,
        /// The missing policy.
        policy: PolicyId,
    },

    /// A repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ErrorCode for ResolveError {
    fn code(&self) -> &'static str {
        match self {
            Self::PrincipalNotFound(_) => "RESOLVE_PRINCIPAL_NOT_FOUND",
            Self::DanglingRole { .. } => "RESOLVE_DANGLING_ROLE",
            Self::DanglingPolicy { .. } => "RESOLVE_DANGLING_POLICY",
            Self::Repository(err) => err.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // Dangling references need a data fix, not a retry.
            Self::PrincipalNotFound(_) | Self::DanglingRole { .. } | Self::DanglingPolicy { .. } => {
                false
            }
            Self::Repository(err) => err.is_recoverable(),
        }
    }
}

/// Resolves [`PrincipalContext`] snapshots from the repositories.
///
/// Each call produces one immutable snapshot; concurrent membership
/// changes are observed by the *next* resolution, never mid-check.
/// An authorization check racing a termination commit may therefore
/// still authorize once against the just-revoked snapshot — accepted
/// staleness of at most one request.
pub struct PrincipalContextResolver {
    principals: Arc<dyn PrincipalRepository>,
    groups: Arc<dyn PrincipalGroupRepository>,
    roles: Arc<dyn RoleRepository>,
    policies: Arc<dyn PolicyRepository>,
}

impl PrincipalContextResolver {
    /// Creates a resolver over the given repositories.
    #[must_use]
    pub fn new(
        principals: Arc<dyn PrincipalRepository>,
        groups: Arc<dyn PrincipalGroupRepository>,
        roles: Arc<dyn RoleRepository>,
        policies: Arc<dyn PolicyRepository>,
    ) -> Self {
        Self {
            principals,
            groups,
            roles,
            policies,
        }
    }

    /// Resolves the snapshot for one principal.
    ///
    /// Statements are flattened across every policy of every role of
    /// every group the principal belongs to. Duplicates are kept;
    /// deny-overrides makes order and multiplicity irrelevant.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::PrincipalNotFound`] when the principal does
    ///   not exist
    /// - [`ResolveError::DanglingRole`] / [`ResolveError::DanglingPolicy`]
    ///   on broken references
    /// - [`ResolveError::Repository`] on storage failure
    pub fn resolve(&self, principal_id: PrincipalId) -> Result<PrincipalContext, ResolveError> {
        if self.principals.find_by_id(principal_id)?.is_none() {
            return Err(ResolveError::PrincipalNotFound(principal_id));
        }
        // The principal exists; absent linkage just means no business
        // attributes are attached yet.
        let linkage = self.principals.linkage(principal_id)?.unwrap_or_default();

        let mut statements: Vec<Statement> = Vec::new();
        for group in self.groups.find_by_member(principal_id)? {
            for role_id in group.role_ids() {
                let role = self.roles.find_by_id(*role_id)?.ok_or_else(|| {
                    ResolveError::DanglingRole {
                        group: group.id(),
                        role: *role_id,
                    }
                })?;
                for policy_id in role.policy_ids() {
                    let policy = self.policies.find_by_id(*policy_id)?.ok_or_else(|| {
                        ResolveError::DanglingPolicy {
                            role: role.id(),
                            policy: *policy_id,
                        }
                    })?;
                    statements.extend_from_slice(policy.statements());
                }
            }
        }
        debug!(
            principal = %principal_id,
            statements = statements.len(),
            "principal context resolved"
        );

        let mut ctx = PrincipalContext::new(principal_id)
            .with_wiki_groups(linkage.wiki_group_ids)
            .with_talents(linkage.talent_ids)
            .with_statements(statements);
        if let Some(agency_id) = linkage.agency_id {
            ctx = ctx.with_agency(agency_id);
        }
        Ok(ctx)
    }
}
