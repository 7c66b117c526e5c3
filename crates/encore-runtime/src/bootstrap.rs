//! System catalogue seeding.
//!
//! Persists the built-in policies and roles at startup. Policies are
//! saved before roles so a role never points at a policy that is not
//! yet stored; each role's references are verified before the role
//! itself is saved.
//!
//! Built-in identifiers are deterministic, so re-running the seed is
//! an upsert and safe on every startup.

use encore_policy::seed::{SystemPolicy, SystemRole};
use encore_policy::{PolicyError, PolicyRepository, RepositoryError, RoleRepository};
use encore_types::ErrorCode;
use thiserror::Error;
use tracing::info;

/// Error raised while seeding the system catalogue.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A role references a policy not present in the store.
    #[error("role '{role}' references missing policy '{name}'")]
    MissingPolicy {
        /// The role being seeded.
        role: &'static str,
        /// The unresolved policy name.
        name: &'static str,
    },

    /// A built-in policy failed to construct.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// A repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ErrorCode for BootstrapError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingPolicy { .. } => "BOOTSTRAP_MISSING_POLICY",
            Self::Policy(err) => err.code(),
            Self::Repository(err) => err.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::MissingPolicy { .. } => false,
            Self::Policy(err) => err.is_recoverable(),
            Self::Repository(err) => err.is_recoverable(),
        }
    }
}

/// Seeds every built-in policy and role into the given repositories.
///
/// # Errors
///
/// - [`BootstrapError::Policy`] when a built-in policy fails to
///   construct
/// - [`BootstrapError::MissingPolicy`] when a role's reference cannot
///   be resolved after the policy pass
/// - [`BootstrapError::Repository`] on storage failure
pub fn seed_system_catalogue(
    policies: &dyn PolicyRepository,
    roles: &dyn RoleRepository,
) -> Result<(), BootstrapError> {
    for entry in SystemPolicy::ALL {
        let policy = entry.build()?;
        info!(policy = policy.name(), "seeding system policy");
        policies.save(policy)?;
    }
    for entry in SystemRole::ALL {
        for referenced in entry.policies() {
            if policies.find_by_name(referenced.name())?.is_none() {
                return Err(BootstrapError::MissingPolicy {
                    role: entry.name(),
                    name: referenced.name(),
                });
            }
        }
        let role = entry.build();
        info!(role = role.name(), "seeding system role");
        roles.save(role)?;
    }
    Ok(())
}
