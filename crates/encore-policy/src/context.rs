//! Evaluation-time inputs: the principal's resolved context and the
//! resource-attribute bundle.
//!
//! Both types are immutable snapshots. The evaluator is a pure
//! function over them; all I/O (membership lookup, entity lookup)
//! happens before evaluation, in the caller or the runtime resolver.
//!
//! ```text
//! PrincipalRepository ──┐
//! PrincipalGroups ──────┤  resolve (runtime)   ┌─ PrincipalContext ─┐
//! Roles / Policies ─────┴──────────────────────►                    │
//!                                              │   PolicyEvaluator  ├─► Allow | Deny
//! Agency/Group/Talent/Song entity ────────────►└ ResourceAttributes ┘
//!                 (caller resolves attributes)
//! ```

use crate::condition::{AttrValue, ConditionKey, PrincipalAttribute};
use crate::statement::Statement;
use encore_types::{AgencyId, PrincipalId, TalentId, WikiGroupId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A principal's resolved authorization snapshot.
///
/// Aggregates everything the evaluator needs about the acting
/// principal: the flattened statements of every policy of every role
/// of every group the principal belongs to (duplicates kept, order
/// irrelevant), plus the business-linkage attributes that satisfy
/// principal-side condition placeholders.
///
/// # Snapshot Semantics
///
/// A context is resolved once per authorization check. If memberships
/// change concurrently, the check sees the snapshot taken at
/// resolution time; it is never partially refreshed mid-evaluation.
///
/// # Example
///
/// ```
/// use encore_policy::PrincipalContext;
/// use encore_types::{AgencyId, PrincipalId};
///
/// let ctx = PrincipalContext::new(PrincipalId::new())
///     .with_agency(AgencyId::new())
///     .with_statements(Vec::new());
///
/// assert!(ctx.agency_id().is_some());
/// assert!(ctx.statements().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
    agency_id: Option<AgencyId>,
    wiki_group_ids: HashSet<WikiGroupId>,
    talent_ids: HashSet<TalentId>,
    statements: Vec<Statement>,
}

impl PrincipalContext {
    /// Creates an empty context for the given principal.
    ///
    /// An empty context carries no statements and no linkage; every
    /// request evaluated against it is denied (default-deny).
    #[must_use]
    pub fn new(principal_id: PrincipalId) -> Self {
        Self {
            principal_id,
            agency_id: None,
            wiki_group_ids: HashSet::new(),
            talent_ids: HashSet::new(),
            statements: Vec::new(),
        }
    }

    /// Sets the principal's agency scope.
    #[must_use]
    pub fn with_agency(mut self, agency_id: AgencyId) -> Self {
        self.agency_id = Some(agency_id);
        self
    }

    /// Sets the principal's wiki-group linkage.
    #[must_use]
    pub fn with_wiki_groups(mut self, ids: impl IntoIterator<Item = WikiGroupId>) -> Self {
        self.wiki_group_ids = ids.into_iter().collect();
        self
    }

    /// Sets the principal's talent linkage.
    #[must_use]
    pub fn with_talents(mut self, ids: impl IntoIterator<Item = TalentId>) -> Self {
        self.talent_ids = ids.into_iter().collect();
        self
    }

    /// Sets the flattened effective statements.
    #[must_use]
    pub fn with_statements(mut self, statements: Vec<Statement>) -> Self {
        self.statements = statements;
        self
    }

    /// Returns the acting principal's identifier.
    #[must_use]
    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    /// Returns the principal's agency scope, if agency-scoped.
    #[must_use]
    pub fn agency_id(&self) -> Option<AgencyId> {
        self.agency_id
    }

    /// Returns the principal's wiki-group linkage.
    #[must_use]
    pub fn wiki_group_ids(&self) -> &HashSet<WikiGroupId> {
        &self.wiki_group_ids
    }

    /// Returns the principal's talent linkage.
    #[must_use]
    pub fn talent_ids(&self) -> &HashSet<TalentId> {
        &self.talent_ids
    }

    /// Returns the flattened effective statements.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Resolves a principal-side attribute placeholder.
    ///
    /// Returns `None` when the attribute has no value for this
    /// principal (e.g., [`PrincipalAttribute::AgencyId`] for a
    /// principal that is not agency-scoped); the referencing clause
    /// then fails closed.
    #[must_use]
    pub fn resolve_attribute(&self, attr: PrincipalAttribute) -> Option<AttrValue> {
        match attr {
            PrincipalAttribute::AgencyId => self.agency_id.map(|id| AttrValue::Id(id.uuid())),
            PrincipalAttribute::WikiGroupIds => Some(AttrValue::set_of(
                self.wiki_group_ids.iter().map(|id| id.uuid()),
            )),
            PrincipalAttribute::TalentIds => {
                Some(AttrValue::set_of(self.talent_ids.iter().map(|id| id.uuid())))
            }
        }
    }
}

/// The resource-attribute bundle for one authorization request.
///
/// Produced by the caller from the actual wiki entity before invoking
/// the evaluator. Keys absent from the bundle make any clause that
/// references them fail closed.
///
/// # Example
///
/// ```
/// use encore_policy::{ConditionKey, ResourceAttributes};
/// use encore_types::{AgencyId, TalentId};
///
/// let attrs = ResourceAttributes::new()
///     .with_agency(AgencyId::new())
///     .with_talent(TalentId::new());
///
/// assert!(attrs.get(ConditionKey::ResourceAgencyId).is_some());
/// assert!(attrs.get(ConditionKey::ResourceGroupId).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAttributes {
    attrs: HashMap<ConditionKey, AttrValue>,
}

impl ResourceAttributes {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource's agency attribute.
    #[must_use]
    pub fn with_agency(mut self, id: AgencyId) -> Self {
        self.attrs
            .insert(ConditionKey::ResourceAgencyId, AttrValue::Id(id.uuid()));
        self
    }

    /// Sets the resource's group attribute.
    #[must_use]
    pub fn with_group(mut self, id: WikiGroupId) -> Self {
        self.attrs
            .insert(ConditionKey::ResourceGroupId, AttrValue::Id(id.uuid()));
        self
    }

    /// Sets the resource's talent attribute.
    #[must_use]
    pub fn with_talent(mut self, id: TalentId) -> Self {
        self.attrs
            .insert(ConditionKey::ResourceTalentId, AttrValue::Id(id.uuid()));
        self
    }

    /// Inserts an arbitrary attribute value.
    pub fn insert(&mut self, key: ConditionKey, value: AttrValue) {
        self.attrs.insert(key, value);
    }

    /// Looks up an attribute value.
    #[must_use]
    pub fn get(&self, key: ConditionKey) -> Option<&AttrValue> {
        self.attrs.get(&key)
    }

    /// Returns `true` when no attributes are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}
