//! Policies: named, immutable bundles of statements.

use crate::statement::Statement;
use encore_types::PolicyId;
use serde::{Deserialize, Serialize};

/// A named, reusable bundle of statements.
///
/// Policies are immutable after creation. They come in two flavors:
///
/// - **System policies** (seed catalogue, e.g. `FULL_ACCESS`):
///   deterministic identifiers, seeded at bootstrap, never deleted by
///   tenant operations or the grant lifecycle.
/// - **Custom policies**: random identifiers, created by the grant
///   lifecycle (or tenant administration) and deletable by the path
///   that created them.
///
/// A policy with **zero statements is legal**: it grants nothing. The
/// agency-side grant path creates such a policy when the talent
/// account has no wiki Talent record yet, so the grant structure is
/// always complete even when it currently authorizes nothing.
///
/// # Example
///
/// ```
/// use encore_policy::{Action, Policy, ResourceType, Statement};
///
/// let stmt = Statement::allow([Action::Edit], [ResourceType::Song], None)?;
/// let policy = Policy::new("song-editors", vec![stmt]);
///
/// assert!(!policy.is_system());
/// assert_eq!(policy.statements().len(), 1);
/// # Ok::<(), encore_policy::PolicyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    id: PolicyId,
    name: String,
    statements: Vec<Statement>,
    is_system: bool,
}

impl Policy {
    /// Creates a custom policy with a fresh random identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            id: PolicyId::new(),
            name: name.into(),
            statements,
            is_system: false,
        }
    }

    /// Creates a system policy with a deterministic seeded identifier.
    ///
    /// System policies are exempt from grant-lifecycle teardown.
    #[must_use]
    pub fn system(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        let name = name.into();
        Self {
            id: PolicyId::seeded(&name),
            name,
            statements,
            is_system: true,
        }
    }

    /// Returns the policy identifier.
    #[must_use]
    pub fn id(&self) -> PolicyId {
        self.id
    }

    /// Returns the policy name (unique within the system scope).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the statements in declaration order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Returns `true` for seeded system policies.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }
}
