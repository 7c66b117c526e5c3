//! The decision algorithm: deny-overrides, default-deny.
//!
//! # Algorithm
//!
//! 1. Collect every statement in the principal's effective set that
//!    matches the request (action, resource type, condition).
//! 2. Any matching **deny** statement → [`Decision::Deny`].
//! 3. Otherwise any matching **allow** statement → [`Decision::Allow`].
//! 4. Otherwise → [`Decision::Deny`] (absence of an explicit allow is
//!    not authorization).
//!
//! Deny wins regardless of statement order and regardless of which
//! policy or role contributed it. This lets a single narrowly-scoped
//! deny policy (e.g. `DENY_ROLLBACK`) restrict a broad `FULL_ACCESS`
//! allow without any statement-ordering contract.
//!
//! # Purity
//!
//! Evaluation is a pure, synchronous function over its inputs: no
//! repository access, no logging, no shared mutable state. It is safe
//! to call concurrently from any number of threads. All I/O (context
//! resolution, resource-attribute lookup) happens before the call.
//!
//! # Opacity of Deny
//!
//! [`Decision`] does not expose whether a deny was explicit (a deny
//! statement matched) or default (nothing matched). Both produce the
//! same outcome, so callers cannot leak policy structure to end users.

use crate::action::{Action, Effect, ResourceType};
use crate::context::{PrincipalContext, ResourceAttributes};
use serde::{Deserialize, Serialize};

/// The outcome of an authorization check.
///
/// # Example
///
/// ```
/// use encore_policy::Decision;
///
/// assert!(Decision::Allow.is_allow());
/// assert!(Decision::Deny.is_deny());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The request is authorized.
    Allow,
    /// The request is not authorized.
    ///
    /// Deliberately opaque: explicit deny and default deny are
    /// indistinguishable here.
    Deny,
}

impl Decision {
    /// Returns `true` if the request was authorized.
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns `true` if the request was not authorized.
    #[must_use]
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny)
    }
}

/// Stateless deny-overrides policy evaluator.
///
/// # Example
///
/// ```
/// use encore_policy::{
///     Action, Decision, PolicyEvaluator, PrincipalContext, ResourceAttributes, ResourceType,
///     Statement,
/// };
/// use encore_types::PrincipalId;
///
/// let stmt = Statement::allow([Action::Edit], [ResourceType::Song], None)?;
/// let ctx = PrincipalContext::new(PrincipalId::new()).with_statements(vec![stmt]);
/// let resource = ResourceAttributes::new();
///
/// let decision = PolicyEvaluator::decide(&ctx, Action::Edit, ResourceType::Song, &resource);
/// assert_eq!(decision, Decision::Allow);
///
/// let decision = PolicyEvaluator::decide(&ctx, Action::Publish, ResourceType::Song, &resource);
/// assert_eq!(decision, Decision::Deny); // default-deny
/// # Ok::<(), encore_policy::PolicyError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Decides whether `ctx`'s principal may perform `action` on a
    /// resource of `resource_type` with the observed attributes.
    #[must_use]
    pub fn decide(
        ctx: &PrincipalContext,
        action: Action,
        resource_type: ResourceType,
        resource: &ResourceAttributes,
    ) -> Decision {
        let mut any_allow = false;
        for statement in ctx.statements() {
            if !statement.matches(action, resource_type, resource, ctx) {
                continue;
            }
            match statement.effect() {
                // Deny-overrides: the first matching deny settles it.
                Effect::Deny => return Decision::Deny,
                Effect::Allow => any_allow = true,
            }
        }
        if any_allow {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}
