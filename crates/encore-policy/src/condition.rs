//! Attribute comparisons gating statements.
//!
//! A [`Condition`] is a non-empty AND-combination of
//! [`ConditionClause`]s. Each clause compares a **resource-side**
//! attribute (named by a [`ConditionKey`], looked up in the
//! [`ResourceAttributes`] bundle the caller supplies) against a
//! [`ConditionValue`] — either a literal, or a **principal-side**
//! attribute resolved from the acting principal's context.
//!
//! # Orientation
//!
//! Orientation is fixed at construction: the resource key is always
//! the left operand, the resolved value is always the right operand.
//! A clause never compares two principal attributes; the
//! [`ConditionValue`] union makes that unrepresentable.
//!
//! # Fail-closed
//!
//! A clause whose resource attribute is absent from the bundle, or
//! whose principal attribute cannot be resolved from the context, is
//! **not satisfied**. Missing data never widens access.
//!
//! # Example
//!
//! ```
//! use encore_policy::{
//!     AttrValue, ConditionClause, ConditionKey, ConditionOperator, ConditionValue,
//!     PrincipalAttribute,
//! };
//!
//! // resource.talent_id IN principal.talent_ids
//! let clause = ConditionClause::new(
//!     ConditionKey::ResourceTalentId,
//!     ConditionOperator::In,
//!     ConditionValue::principal(PrincipalAttribute::TalentIds),
//! );
//! assert_eq!(clause.key(), ConditionKey::ResourceTalentId);
//! ```

use crate::context::{PrincipalContext, ResourceAttributes};
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// An attribute value observed at evaluation time.
///
/// Attribute values are untyped UUIDs on purpose: a clause compares a
/// resource-side agency id against a principal-side agency id, and the
/// newtype wrappers would forbid exactly that comparison. The typed
/// wrappers convert in via `From`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue {
    /// A single identifier.
    Id(Uuid),
    /// A set of identifiers.
    IdSet(HashSet<Uuid>),
}

impl AttrValue {
    /// Builds an [`AttrValue::IdSet`] from anything yielding UUIDs.
    #[must_use]
    pub fn set_of(ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self::IdSet(ids.into_iter().collect())
    }
}

impl From<Uuid> for AttrValue {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

impl From<encore_types::AgencyId> for AttrValue {
    fn from(id: encore_types::AgencyId) -> Self {
        Self::Id(id.uuid())
    }
}

impl From<encore_types::TalentId> for AttrValue {
    fn from(id: encore_types::TalentId) -> Self {
        Self::Id(id.uuid())
    }
}

impl From<encore_types::WikiGroupId> for AttrValue {
    fn from(id: encore_types::WikiGroupId) -> Self {
        Self::Id(id.uuid())
    }
}

/// Names a resource-side attribute to read at evaluation time.
///
/// The caller resolves these from the actual wiki entity (agency,
/// group, talent, song) before invoking the evaluator; the policy
/// engine never touches entity storage itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKey {
    /// The agency the resource belongs to.
    ResourceAgencyId,
    /// The group the resource belongs to.
    ResourceGroupId,
    /// The talent the resource belongs to.
    ResourceTalentId,
}

impl ConditionKey {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceAgencyId => "resource_agency_id",
            Self::ResourceGroupId => "resource_group_id",
            Self::ResourceTalentId => "resource_talent_id",
        }
    }
}

impl std::fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names a principal-side attribute resolved from the acting
/// principal's context.
///
/// This is a closed union rather than an open string namespace so the
/// resolver can be matched exhaustively; adding an attribute is a code
/// change, not a data migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalAttribute {
    /// The principal's agency id, if the principal is agency-scoped.
    AgencyId,
    /// The wiki groups the principal is linked to.
    WikiGroupIds,
    /// The talents the principal is linked to.
    TalentIds,
}

impl PrincipalAttribute {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgencyId => "principal_agency_id",
            Self::WikiGroupIds => "principal_wiki_group_ids",
            Self::TalentIds => "principal_talent_ids",
        }
    }
}

impl std::fmt::Display for PrincipalAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The right operand of a clause: a literal, or a principal attribute
/// placeholder resolved at evaluation time.
///
/// Literal and dynamic are mutually exclusive by construction, and the
/// left operand is always a resource attribute, so two dynamic values
/// can never be compared to each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionValue {
    /// A fixed value baked into the statement.
    Literal(AttrValue),
    /// A placeholder resolved from the acting principal's context.
    Principal(PrincipalAttribute),
}

impl ConditionValue {
    /// Creates a literal value.
    #[must_use]
    pub fn literal(value: impl Into<AttrValue>) -> Self {
        Self::Literal(value.into())
    }

    /// Creates a principal-attribute placeholder.
    #[must_use]
    pub fn principal(attr: PrincipalAttribute) -> Self {
        Self::Principal(attr)
    }
}

/// How the left (resource) operand is compared to the right operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// Scalar equality. Satisfied only when both operands are single
    /// identifiers and equal.
    Equals,
    /// Set membership. Satisfied when the scalar operand is contained
    /// in the set operand (either side may be the set). Two scalars
    /// degrade to equality; an empty or unresolved set never matches.
    In,
}

impl ConditionOperator {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::In => "in",
        }
    }
}

/// One attribute comparison: `(key, operator, value)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionClause {
    key: ConditionKey,
    operator: ConditionOperator,
    value: ConditionValue,
}

impl ConditionClause {
    /// Creates a clause. Orientation is fixed: `key` names the left
    /// (resource) operand, `value` resolves to the right operand.
    #[must_use]
    pub fn new(key: ConditionKey, operator: ConditionOperator, value: ConditionValue) -> Self {
        Self {
            key,
            operator,
            value,
        }
    }

    /// Returns the resource-attribute key.
    #[must_use]
    pub fn key(&self) -> ConditionKey {
        self.key
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> ConditionOperator {
        self.operator
    }

    /// Returns the right operand.
    #[must_use]
    pub fn value(&self) -> &ConditionValue {
        &self.value
    }

    /// Evaluates the clause against a resource-attribute bundle and a
    /// principal context.
    ///
    /// Fails closed: an absent resource attribute or an unresolvable
    /// principal attribute makes the clause unsatisfied.
    #[must_use]
    pub fn is_satisfied(&self, resource: &ResourceAttributes, ctx: &PrincipalContext) -> bool {
        let Some(left) = resource.get(self.key) else {
            return false;
        };
        let resolved;
        let right = match &self.value {
            ConditionValue::Literal(value) => value,
            ConditionValue::Principal(attr) => match ctx.resolve_attribute(*attr) {
                Some(value) => {
                    resolved = value;
                    &resolved
                }
                None => return false,
            },
        };
        compare(left, self.operator, right)
    }
}

fn compare(left: &AttrValue, operator: ConditionOperator, right: &AttrValue) -> bool {
    match operator {
        ConditionOperator::Equals => match (left, right) {
            (AttrValue::Id(a), AttrValue::Id(b)) => a == b,
            // Equality over sets is not a supported comparison.
            _ => false,
        },
        ConditionOperator::In => match (left, right) {
            (AttrValue::Id(a), AttrValue::IdSet(set)) => set.contains(a),
            (AttrValue::IdSet(set), AttrValue::Id(b)) => set.contains(b),
            (AttrValue::Id(a), AttrValue::Id(b)) => a == b,
            (AttrValue::IdSet(a), AttrValue::IdSet(b)) => !a.is_disjoint(b),
        },
    }
}

/// A non-empty AND-combination of clauses.
///
/// OR semantics are expressed by attaching multiple statements to a
/// policy, never by clause-level OR; the seed catalogue relies on
/// that restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    clauses: Vec<ConditionClause>,
}

impl Condition {
    /// Creates a condition from its clauses.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::EmptyCondition`] when `clauses` is empty.
    /// An empty conjunction would be vacuously true, silently turning
    /// a scoped statement into an unconditional one.
    pub fn new(clauses: Vec<ConditionClause>) -> Result<Self, PolicyError> {
        if clauses.is_empty() {
            return Err(PolicyError::EmptyCondition);
        }
        Ok(Self { clauses })
    }

    /// Creates a single-clause condition.
    #[must_use]
    pub fn single(clause: ConditionClause) -> Self {
        Self {
            clauses: vec![clause],
        }
    }

    /// Returns the clauses in declaration order.
    #[must_use]
    pub fn clauses(&self) -> &[ConditionClause] {
        &self.clauses
    }

    /// Evaluates the conjunction: every clause must be satisfied.
    #[must_use]
    pub fn is_satisfied(&self, resource: &ResourceAttributes, ctx: &PrincipalContext) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.is_satisfied(resource, ctx))
    }
}
