//! Statements: one effect, a set of actions, a set of resource types,
//! and an optional condition.

use crate::action::{Action, Effect, ResourceType};
use crate::condition::Condition;
use crate::context::{PrincipalContext, ResourceAttributes};
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An immutable authorization statement.
///
/// A statement **matches** a request `(action, resource_type,
/// resource_attrs, principal_ctx)` iff:
///
/// 1. `action` is in its action set, and
/// 2. `resource_type` is in its resource-type set, and
/// 3. its condition is absent, or every clause is satisfied.
///
/// A matching statement contributes its [`Effect`] to the decision.
/// OR across conditions is expressed by attaching several statements
/// to one policy; a single condition is always a conjunction.
///
/// # Construction
///
/// Empty action or resource-type sets are configuration errors caught
/// at construction, never at evaluation:
///
/// ```
/// use encore_policy::{Action, Effect, PolicyError, ResourceType, Statement};
///
/// let err = Statement::new(Effect::Allow, [], [ResourceType::Song], None).unwrap_err();
/// assert!(matches!(err, PolicyError::EmptyActions));
///
/// let ok = Statement::allow([Action::Edit], [ResourceType::Song], None);
/// assert!(ok.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    effect: Effect,
    actions: HashSet<Action>,
    resource_types: HashSet<ResourceType>,
    condition: Option<Condition>,
}

impl Statement {
    /// Creates a statement.
    ///
    /// # Errors
    ///
    /// - [`PolicyError::EmptyActions`] when `actions` is empty
    /// - [`PolicyError::EmptyResourceTypes`] when `resource_types` is
    ///   empty
    pub fn new(
        effect: Effect,
        actions: impl IntoIterator<Item = Action>,
        resource_types: impl IntoIterator<Item = ResourceType>,
        condition: Option<Condition>,
    ) -> Result<Self, PolicyError> {
        let actions: HashSet<Action> = actions.into_iter().collect();
        if actions.is_empty() {
            return Err(PolicyError::EmptyActions);
        }
        let resource_types: HashSet<ResourceType> = resource_types.into_iter().collect();
        if resource_types.is_empty() {
            return Err(PolicyError::EmptyResourceTypes);
        }
        Ok(Self {
            effect,
            actions,
            resource_types,
            condition,
        })
    }

    /// Creates an [`Effect::Allow`] statement.
    ///
    /// # Errors
    ///
    /// Same as [`Statement::new`].
    pub fn allow(
        actions: impl IntoIterator<Item = Action>,
        resource_types: impl IntoIterator<Item = ResourceType>,
        condition: Option<Condition>,
    ) -> Result<Self, PolicyError> {
        Self::new(Effect::Allow, actions, resource_types, condition)
    }

    /// Creates an [`Effect::Deny`] statement.
    ///
    /// # Errors
    ///
    /// Same as [`Statement::new`].
    pub fn deny(
        actions: impl IntoIterator<Item = Action>,
        resource_types: impl IntoIterator<Item = ResourceType>,
        condition: Option<Condition>,
    ) -> Result<Self, PolicyError> {
        Self::new(Effect::Deny, actions, resource_types, condition)
    }

    /// Returns the statement's effect.
    #[must_use]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Returns the action set.
    #[must_use]
    pub fn actions(&self) -> &HashSet<Action> {
        &self.actions
    }

    /// Returns the resource-type set.
    #[must_use]
    pub fn resource_types(&self) -> &HashSet<ResourceType> {
        &self.resource_types
    }

    /// Returns the condition, if any.
    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Returns `true` when this statement matches the request.
    #[must_use]
    pub fn matches(
        &self,
        action: Action,
        resource_type: ResourceType,
        resource: &ResourceAttributes,
        ctx: &PrincipalContext,
    ) -> bool {
        if !self.actions.contains(&action) || !self.resource_types.contains(&resource_type) {
            return false;
        }
        match &self.condition {
            None => true,
            Some(condition) => condition.is_satisfied(resource, ctx),
        }
    }
}
