//! The grant lifecycle: provisioning on activation, teardown on
//! termination.
//!
//! # State Machine
//!
//! ```text
//! absent ──AffiliationActivated──► granted ──AffiliationTerminated──► absent
//! ```
//!
//! Terminal: grants are never suspended, only created or fully torn
//! down. Replaying activation after a completed termination
//! synthesizes **fresh** identifiers; it never resurrects deleted
//! objects.
//!
//! # Idempotency
//!
//! Both handlers are safe to replay. Activation is idempotent per
//! `(affiliation, side)`: the find-before-create check absorbs
//! redelivery cheaply, and the storage-level unique key inside
//! [`GrantUnitOfWork::commit_activation`] absorbs the race two
//! concurrent workers can still lose between check and commit.
//!
//! # Teardown Order
//!
//! Role → Policy → PrincipalGroup → grant record: children before the
//! parent index. A crash mid-revocation leaves access already revoked
//! (the role is gone) but may leave an orphaned grant record; that
//! record makes a later activation for the same affiliation a no-op,
//! which is surfaced as a warning for reconciliation rather than
//! silently re-granted.

use crate::error::GrantError;
use crate::grant::{AffiliationGrant, GrantSide};
use crate::naming::GrantNaming;
use crate::repository::{AffiliationGrantRepository, GrantUnitOfWork};
use async_trait::async_trait;
use encore_event::{AffiliationActivated, AffiliationEvent, AffiliationTerminated, EventHandler};
use encore_policy::{
    Action, Condition, ConditionClause, ConditionKey, ConditionOperator, ConditionValue, Policy,
    PolicyError, PolicyRepository, PrincipalAttribute, PrincipalGroup, PrincipalGroupRepository,
    PrincipalRepository, RepositoryError, ResourceType, Role, RoleRepository, Statement,
    TalentRepository,
};
use encore_types::{AgencyId, TalentId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The repository bundle the lifecycle operates on.
///
/// All repositories are shared trait objects; concrete
/// implementations come from `encore-runtime` (in-memory) or a real
/// storage adapter.
#[derive(Clone)]
pub struct GrantStores {
    /// Policy storage.
    pub policies: Arc<dyn PolicyRepository>,
    /// Role storage.
    pub roles: Arc<dyn RoleRepository>,
    /// Principal-group storage.
    pub groups: Arc<dyn PrincipalGroupRepository>,
    /// Principal storage (membership enumeration).
    pub principals: Arc<dyn PrincipalRepository>,
    /// Account → wiki talent lookup.
    pub talents: Arc<dyn TalentRepository>,
    /// Grant record storage.
    pub grants: Arc<dyn AffiliationGrantRepository>,
    /// Transactional boundary for activation commits.
    pub unit_of_work: Arc<dyn GrantUnitOfWork>,
}

/// Event handler that provisions and revokes affiliation grants.
///
/// Consumes [`AffiliationEvent`]s from the dispatch subsystem and
/// maintains the derived PrincipalGroup + Policy + Role triple per
/// affiliation side, with an [`AffiliationGrant`] record as the
/// reverse index.
pub struct GrantLifecycle {
    stores: GrantStores,
    naming: GrantNaming,
}

impl GrantLifecycle {
    /// Creates a lifecycle handler with default naming templates.
    #[must_use]
    pub fn new(stores: GrantStores) -> Self {
        Self {
            stores,
            naming: GrantNaming::default(),
        }
    }

    /// Overrides the naming templates for derived objects.
    #[must_use]
    pub fn with_naming(mut self, naming: GrantNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Provisions both grant sides for an activated affiliation.
    ///
    /// # Errors
    ///
    /// Returns [`GrantError`] on repository failure; duplicate
    /// delivery is absorbed silently.
    pub fn activate(&self, event: &AffiliationActivated) -> Result<(), GrantError> {
        self.provision_talent_side(event)?;
        self.provision_agency_side(event)?;
        Ok(())
    }

    /// Tears down every grant recorded for a terminated affiliation.
    ///
    /// # Errors
    ///
    /// Returns [`GrantError`] on repository failure. The teardown is
    /// resumable: a retry after a partial failure skips the objects
    /// already deleted.
    pub fn terminate(&self, event: &AffiliationTerminated) -> Result<(), GrantError> {
        let grants = self
            .stores
            .grants
            .find_by_affiliation(event.affiliation_id)?;
        if grants.is_empty() {
            debug!(
                affiliation = %event.affiliation_id,
                "termination with no recorded grants, nothing to revoke"
            );
            return Ok(());
        }
        for grant in grants {
            self.revoke(&grant)?;
        }
        Ok(())
    }

    fn provision_talent_side(&self, event: &AffiliationActivated) -> Result<(), GrantError> {
        let side = GrantSide::TalentSide;
        if self.absorb_existing(event, side)? {
            return Ok(());
        }

        let mut group = PrincipalGroup::new(
            event.talent_account_id,
            self.naming.group_name(event.affiliation_id, side),
        );
        for principal in self
            .stores
            .principals
            .find_by_account(event.talent_account_id)?
        {
            group.add_member(principal.id());
        }

        let policy = Policy::new(
            self.naming.policy_name(event.affiliation_id, side),
            talent_side_statements(event.agency_id)?,
        );
        self.commit(event, side, group, policy)
    }

    fn provision_agency_side(&self, event: &AffiliationActivated) -> Result<(), GrantError> {
        let side = GrantSide::AgencySide;
        if self.absorb_existing(event, side)? {
            return Ok(());
        }

        // Members are added later through the UI, not automatically.
        let group = PrincipalGroup::new(
            event.agency_account_id,
            self.naming.group_name(event.affiliation_id, side),
        );

        let talent = self
            .stores
            .talents
            .find_by_account(event.talent_account_id)?;
        if talent.is_none() {
            // The policy is still created, with zero statements: the
            // grant structure must be complete even when it currently
            // authorizes nothing.
            debug!(
                affiliation = %event.affiliation_id,
                account = %event.talent_account_id,
                "no wiki talent for account, agency-side policy grants nothing"
            );
        }
        let policy = Policy::new(
            self.naming.policy_name(event.affiliation_id, side),
            agency_side_statements(talent)?,
        );
        self.commit(event, side, group, policy)
    }

    /// Returns `true` when a grant already exists for the key and the
    /// event should be treated as a duplicate delivery.
    fn absorb_existing(
        &self,
        event: &AffiliationActivated,
        side: GrantSide,
    ) -> Result<bool, GrantError> {
        let Some(existing) = self.stores.grants.find(event.affiliation_id, side)? else {
            return Ok(false);
        };
        if self.stores.roles.find_by_id(existing.role_id)?.is_none() {
            // Partial revocation left an orphaned record; a fresh
            // grant is blocked until reconciliation removes it.
            warn!(
                affiliation = %event.affiliation_id,
                side = %side,
                role = %existing.role_id,
                "orphaned grant record blocks re-activation, reconciliation required"
            );
        } else {
            debug!(
                affiliation = %event.affiliation_id,
                side = %side,
                "duplicate activation absorbed"
            );
        }
        Ok(true)
    }

    fn commit(
        &self,
        event: &AffiliationActivated,
        side: GrantSide,
        mut group: PrincipalGroup,
        policy: Policy,
    ) -> Result<(), GrantError> {
        let role = Role::new(
            self.naming.role_name(event.affiliation_id, side),
            vec![policy.id()],
        );
        group.attach_role(role.id());
        let grant = AffiliationGrant::new(
            event.affiliation_id,
            side,
            policy.id(),
            role.id(),
            group.id(),
        );

        match self
            .stores
            .unit_of_work
            .commit_activation(group, policy, role, grant)
        {
            Ok(()) => {
                info!(
                    affiliation = %event.affiliation_id,
                    side = %side,
                    "affiliation grant provisioned"
                );
                Ok(())
            }
            Err(RepositoryError::Duplicate { .. }) => {
                // A concurrent worker committed the same key first.
                debug!(
                    affiliation = %event.affiliation_id,
                    side = %side,
                    "concurrent activation lost the commit race, absorbed"
                );
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn revoke(&self, grant: &AffiliationGrant) -> Result<(), GrantError> {
        // Children before the parent index: role, policy, group, then
        // the grant record. Each step tolerates an already-deleted
        // object so a partially failed teardown can be retried.
        match self.stores.roles.find_by_id(grant.role_id)? {
            Some(role) if role.is_system() => {
                warn!(
                    affiliation = %grant.affiliation_id,
                    role = %grant.role_id,
                    "grant references a system role, refusing to delete it"
                );
            }
            Some(_) => self.stores.roles.delete(grant.role_id)?,
            None => {}
        }

        match self.stores.policies.find_by_id(grant.policy_id)? {
            Some(policy) if policy.is_system() => {
                warn!(
                    affiliation = %grant.affiliation_id,
                    policy = %grant.policy_id,
                    "grant references a system policy, refusing to delete it"
                );
            }
            Some(_) => self.stores.policies.delete(grant.policy_id)?,
            None => {}
        }

        match self.stores.groups.find_by_id(grant.principal_group_id)? {
            Some(group) if group.is_default() => {
                warn!(
                    affiliation = %grant.affiliation_id,
                    group = %grant.principal_group_id,
                    "grant references a default group, refusing to delete it"
                );
            }
            Some(_) => self.stores.groups.delete(grant.principal_group_id)?,
            None => {}
        }

        self.stores.grants.delete(grant.affiliation_id, grant.side)?;
        info!(
            affiliation = %grant.affiliation_id,
            side = %grant.side,
            "affiliation grant revoked"
        );
        Ok(())
    }
}

#[async_trait]
impl EventHandler for GrantLifecycle {
    type Error = GrantError;

    async fn handle(&self, event: &AffiliationEvent) -> Result<(), GrantError> {
        match event {
            AffiliationEvent::Activated(e) => self.activate(e),
            AffiliationEvent::Terminated(e) => self.terminate(e),
        }
    }
}

/// Builds the talent-side policy statements.
///
/// Group pages: create/edit/submit where the resource belongs to
/// *this* agency AND to one of the principal's talents. Song pages:
/// two alternative statements (OR), one reachable through the
/// principal's wiki groups, one through the principal's talents.
fn talent_side_statements(agency_id: AgencyId) -> Result<Vec<Statement>, PolicyError> {
    let editing = [Action::Create, Action::Edit, Action::Submit];
    Ok(vec![
        Statement::allow(
            editing,
            [ResourceType::Group],
            Some(Condition::new(vec![
                ConditionClause::new(
                    ConditionKey::ResourceAgencyId,
                    ConditionOperator::Equals,
                    ConditionValue::literal(agency_id),
                ),
                ConditionClause::new(
                    ConditionKey::ResourceTalentId,
                    ConditionOperator::In,
                    ConditionValue::principal(PrincipalAttribute::TalentIds),
                ),
            ])?),
        )?,
        Statement::allow(
            editing,
            [ResourceType::Song],
            Some(Condition::single(ConditionClause::new(
                ConditionKey::ResourceGroupId,
                ConditionOperator::In,
                ConditionValue::principal(PrincipalAttribute::WikiGroupIds),
            ))),
        )?,
        Statement::allow(
            editing,
            [ResourceType::Song],
            Some(Condition::single(ConditionClause::new(
                ConditionKey::ResourceTalentId,
                ConditionOperator::In,
                ConditionValue::principal(PrincipalAttribute::TalentIds),
            ))),
        )?,
    ])
}

/// Builds the agency-side policy statements: create/edit/submit on
/// the one talent resolved from the talent account, or nothing at all
/// when no wiki talent exists yet.
fn agency_side_statements(talent: Option<TalentId>) -> Result<Vec<Statement>, PolicyError> {
    match talent {
        Some(talent_id) => Ok(vec![Statement::allow(
            [Action::Create, Action::Edit, Action::Submit],
            [ResourceType::Talent],
            Some(Condition::single(ConditionClause::new(
                ConditionKey::ResourceTalentId,
                ConditionOperator::Equals,
                ConditionValue::literal(talent_id),
            ))),
        )?]),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_policy::{Effect, PrincipalContext, ResourceAttributes};
    use encore_types::{PrincipalId, WikiGroupId};

    #[test]
    fn talent_side_builds_three_statements() {
        let statements = talent_side_statements(AgencyId::new()).expect("valid");
        assert_eq!(statements.len(), 3);
        assert!(statements.iter().all(|s| s.effect() == Effect::Allow));
    }

    #[test]
    fn talent_side_group_statement_requires_matching_agency() {
        let agency = AgencyId::new();
        let talent = TalentId::new();
        let statements = talent_side_statements(agency).expect("valid");
        let ctx = PrincipalContext::new(PrincipalId::new()).with_talents([talent]);

        let own_agency = ResourceAttributes::new().with_agency(agency).with_talent(talent);
        assert!(statements[0].matches(Action::Edit, ResourceType::Group, &own_agency, &ctx));

        let other_agency = ResourceAttributes::new()
            .with_agency(AgencyId::new())
            .with_talent(talent);
        assert!(!statements[0].matches(Action::Edit, ResourceType::Group, &other_agency, &ctx));
    }

    #[test]
    fn talent_side_song_alternatives_are_independent() {
        let statements = talent_side_statements(AgencyId::new()).expect("valid");
        let wiki_group = WikiGroupId::new();
        let talent = TalentId::new();

        // Reachable through the wiki group only.
        let ctx = PrincipalContext::new(PrincipalId::new()).with_wiki_groups([wiki_group]);
        let by_group = ResourceAttributes::new().with_group(wiki_group);
        assert!(statements[1].matches(Action::Submit, ResourceType::Song, &by_group, &ctx));
        assert!(!statements[2].matches(Action::Submit, ResourceType::Song, &by_group, &ctx));

        // Reachable through the talent only.
        let ctx = PrincipalContext::new(PrincipalId::new()).with_talents([talent]);
        let by_talent = ResourceAttributes::new().with_talent(talent);
        assert!(!statements[1].matches(Action::Submit, ResourceType::Song, &by_talent, &ctx));
        assert!(statements[2].matches(Action::Submit, ResourceType::Song, &by_talent, &ctx));
    }

    #[test]
    fn agency_side_without_talent_grants_nothing() {
        let statements = agency_side_statements(None).expect("valid");
        assert!(statements.is_empty());
    }

    #[test]
    fn agency_side_scopes_to_the_one_talent() {
        let talent = TalentId::new();
        let statements = agency_side_statements(Some(talent)).expect("valid");
        assert_eq!(statements.len(), 1);

        let ctx = PrincipalContext::new(PrincipalId::new());
        let own = ResourceAttributes::new().with_talent(talent);
        let other = ResourceAttributes::new().with_talent(TalentId::new());
        assert!(statements[0].matches(Action::Create, ResourceType::Talent, &own, &ctx));
        assert!(!statements[0].matches(Action::Create, ResourceType::Talent, &other, &ctx));
    }
}
