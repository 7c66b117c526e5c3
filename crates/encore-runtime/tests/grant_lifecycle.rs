//! Integration tests for the affiliation grant lifecycle.
//!
//! Drives [`GrantLifecycle`] through its [`EventHandler`] entry point
//! against the in-memory stores and checks:
//! - both grant sides are provisioned on activation
//! - redelivered events are absorbed without duplicating objects
//! - termination tears everything down and actually revokes access
//! - protected objects survive revocation

use encore_event::{AffiliationActivated, AffiliationEvent, AffiliationTerminated, EventHandler};
use encore_grant::{
    AffiliationGrant, AffiliationGrantRepository, GrantLifecycle, GrantSide, GrantUnitOfWork,
};
use encore_policy::{
    Action, PolicyEvaluator, PolicyRepository, PrincipalGroup, PrincipalGroupRepository,
    PrincipalLinkage, ResourceAttributes, ResourceType, Role, RoleRepository,
};
use encore_runtime::{MemoryStores, PrincipalContextResolver};
use encore_types::{AccountId, AffiliationId, AgencyId, IdentityId, Principal, TalentId};

// =============================================================================
// Test Fixtures
// =============================================================================

struct Fixture {
    stores: MemoryStores,
    lifecycle: GrantLifecycle,
    event: AffiliationActivated,
}

impl Fixture {
    /// An affiliation between a fresh agency account and a fresh
    /// talent account, with one principal on the talent account and a
    /// wiki talent registered for it.
    fn new() -> (Self, encore_types::PrincipalId) {
        let stores = MemoryStores::new();
        let agency_account = AccountId::new();
        let talent_account = AccountId::new();

        let principal = Principal::new(IdentityId::new());
        let principal_id = principal.id();
        stores
            .principals
            .insert(principal, talent_account, PrincipalLinkage::default());
        stores.talents.insert(talent_account, TalentId::new());

        let event = AffiliationActivated::new(
            AffiliationId::new(),
            agency_account,
            talent_account,
            AgencyId::new(),
        );
        let lifecycle = GrantLifecycle::new(stores.grant_stores());
        (
            Self {
                stores,
                lifecycle,
                event,
            },
            principal_id,
        )
    }

    async fn activate(&self) {
        self.lifecycle
            .handle(&AffiliationEvent::from(self.event.clone()))
            .await
            .expect("activation");
    }

    async fn terminate(&self) {
        self.lifecycle
            .handle(&AffiliationEvent::from(AffiliationTerminated::new(
                self.event.affiliation_id,
            )))
            .await
            .expect("termination");
    }

    fn grant(&self, side: GrantSide) -> AffiliationGrant {
        self.stores
            .grants
            .find(self.event.affiliation_id, side)
            .expect("lookup")
            .expect("grant recorded")
    }
}

// =============================================================================
// Activation
// =============================================================================

#[tokio::test]
async fn activation_provisions_both_sides() {
    let (fx, principal_id) = Fixture::new();
    fx.activate().await;

    assert_eq!(fx.stores.grants.len(), 2);
    for side in GrantSide::ALL {
        let grant = fx.grant(side);
        let role = fx
            .stores
            .roles
            .find_by_id(grant.role_id)
            .expect("lookup")
            .expect("role provisioned");
        assert_eq!(role.policy_ids(), &[grant.policy_id]);

        let group = fx
            .stores
            .groups
            .find_by_id(grant.principal_group_id)
            .expect("lookup")
            .expect("group provisioned");
        assert!(group.role_ids().contains(&role.id()));
        assert!(!group.is_default());
    }

    // Talent-side group is seeded with the account's principals, the
    // agency-side group starts empty.
    let talent_group = fx
        .stores
        .groups
        .find_by_id(fx.grant(GrantSide::TalentSide).principal_group_id)
        .expect("lookup")
        .expect("group");
    assert!(talent_group.has_member(principal_id));

    let agency_group = fx
        .stores
        .groups
        .find_by_id(fx.grant(GrantSide::AgencySide).principal_group_id)
        .expect("lookup")
        .expect("group");
    assert!(agency_group.members().is_empty());
}

#[tokio::test]
async fn duplicate_activation_is_absorbed() {
    let (fx, _) = Fixture::new();
    fx.activate().await;
    let first = fx.grant(GrantSide::TalentSide);

    fx.activate().await;

    assert_eq!(fx.stores.grants.len(), 2);
    // The original objects are untouched, not re-synthesized.
    assert_eq!(fx.grant(GrantSide::TalentSide).role_id, first.role_id);
    assert_eq!(fx.grant(GrantSide::TalentSide).granted_at, first.granted_at);
}

#[tokio::test]
async fn agency_side_without_wiki_talent_still_provisions() {
    let (fx, _) = Fixture::new();
    // Undo the fixture's talent registration by using a fresh store
    // set with no wiki talent.
    let stores = MemoryStores::new();
    let lifecycle = GrantLifecycle::new(stores.grant_stores());
    lifecycle
        .handle(&AffiliationEvent::from(fx.event.clone()))
        .await
        .expect("activation");

    let grant = stores
        .grants
        .find(fx.event.affiliation_id, GrantSide::AgencySide)
        .expect("lookup")
        .expect("grant recorded");
    let policy = stores
        .policies
        .find_by_id(grant.policy_id)
        .expect("lookup")
        .expect("policy provisioned");
    // The structure is complete even though it authorizes nothing yet.
    assert!(policy.statements().is_empty());
}

// =============================================================================
// Termination
// =============================================================================

#[tokio::test]
async fn termination_tears_down_and_revokes_access() {
    let (fx, principal_id) = Fixture::new();
    fx.activate().await;

    let talent_grant = fx.grant(GrantSide::TalentSide);
    let resolver = PrincipalContextResolver::new(
        fx.stores.principals.clone(),
        fx.stores.groups.clone(),
        fx.stores.roles.clone(),
        fx.stores.policies.clone(),
    );

    // Before termination the talent-side principal can edit songs
    // linked to one of its talents.
    let talent = TalentId::new();
    let linkage = PrincipalLinkage {
        talent_ids: [talent].into_iter().collect(),
        ..PrincipalLinkage::default()
    };
    let refreshed = Principal::new(IdentityId::new());
    let refreshed_id = refreshed.id();
    fx.stores
        .principals
        .insert(refreshed, fx.event.talent_account_id, linkage);
    let mut group = fx
        .stores
        .groups
        .find_by_id(talent_grant.principal_group_id)
        .expect("lookup")
        .expect("group");
    group.add_member(refreshed_id);
    fx.stores.groups.save(group).expect("save");

    let resource = ResourceAttributes::new().with_talent(talent);
    let ctx = resolver.resolve(refreshed_id).expect("resolve");
    assert!(PolicyEvaluator::decide(&ctx, Action::Edit, ResourceType::Song, &resource).is_allow());

    fx.terminate().await;

    assert!(fx.stores.grants.is_empty());
    assert!(fx
        .stores
        .roles
        .find_by_id(talent_grant.role_id)
        .expect("lookup")
        .is_none());
    assert!(fx
        .stores
        .policies
        .find_by_id(talent_grant.policy_id)
        .expect("lookup")
        .is_none());
    assert!(fx
        .stores
        .groups
        .find_by_id(talent_grant.principal_group_id)
        .expect("lookup")
        .is_none());

    // With the grant gone the same request is denied.
    let ctx = resolver.resolve(refreshed_id).expect("resolve");
    assert!(PolicyEvaluator::decide(&ctx, Action::Edit, ResourceType::Song, &resource).is_deny());
    // The other fixture principal kept nothing either.
    let ctx = resolver.resolve(principal_id).expect("resolve");
    assert!(ctx.statements().is_empty());
}

#[tokio::test]
async fn termination_without_grants_is_a_noop() {
    let stores = MemoryStores::new();
    let lifecycle = GrantLifecycle::new(stores.grant_stores());

    lifecycle
        .handle(&AffiliationEvent::from(AffiliationTerminated::new(
            AffiliationId::new(),
        )))
        .await
        .expect("nothing to revoke");
}

#[tokio::test]
async fn replay_after_termination_synthesizes_fresh_objects() {
    let (fx, _) = Fixture::new();
    fx.activate().await;
    let first = fx.grant(GrantSide::TalentSide);

    fx.terminate().await;
    fx.activate().await;
    let second = fx.grant(GrantSide::TalentSide);

    assert_ne!(first.role_id, second.role_id);
    assert_ne!(first.policy_id, second.policy_id);
    assert_ne!(first.principal_group_id, second.principal_group_id);
}

// =============================================================================
// Protected Objects
// =============================================================================

#[tokio::test]
async fn revocation_spares_default_groups_and_system_objects() {
    let stores = MemoryStores::new();
    let lifecycle = GrantLifecycle::new(stores.grant_stores());
    let affiliation = AffiliationId::new();

    // A grant record wired (through operator error or migration) to a
    // default group, a system policy, and a system role.
    let group = PrincipalGroup::default_group(AccountId::new(), "everyone");
    let policy = encore_policy::Policy::system("LEGACY_POLICY", Vec::new());
    let role = Role::system("LEGACY_ROLE", vec![policy.id()]);
    let grant = AffiliationGrant::new(
        affiliation,
        GrantSide::TalentSide,
        policy.id(),
        role.id(),
        group.id(),
    );
    let group_id = group.id();
    let policy_id = policy.id();
    let role_id = role.id();
    stores
        .commit_activation(group, policy, role, grant)
        .expect("commit");

    lifecycle
        .handle(&AffiliationEvent::from(AffiliationTerminated::new(
            affiliation,
        )))
        .await
        .expect("termination");

    // The grant record is gone but the protected objects survive.
    assert!(stores.grants.is_empty());
    assert!(stores.groups.find_by_id(group_id).expect("lookup").is_some());
    assert!(stores.policies.find_by_id(policy_id).expect("lookup").is_some());
    assert!(stores.roles.find_by_id(role_id).expect("lookup").is_some());
}
