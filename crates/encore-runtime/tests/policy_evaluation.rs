//! Integration tests for end-to-end policy evaluation.
//!
//! Exercises the full chain over the seeded system catalogue:
//! - bootstrap seeding into the in-memory stores
//! - principal context resolution (groups → roles → policies)
//! - PolicyEvaluator decisions (deny-overrides, default-deny,
//!   fail-closed conditions)

use encore_policy::seed::{SystemPolicy, SystemRole};
use encore_policy::{
    Action, Decision, PolicyEvaluator, PrincipalGroup, PrincipalGroupRepository, PrincipalLinkage,
    ResourceAttributes, ResourceType, Role, RoleRepository,
};
use encore_runtime::{seed_system_catalogue, MemoryStores, PrincipalContextResolver};
use encore_types::{AccountId, AgencyId, IdentityId, Principal, PrincipalId, TalentId, WikiGroupId};

// =============================================================================
// Test Fixtures
// =============================================================================

fn seeded_stores() -> (MemoryStores, PrincipalContextResolver) {
    let stores = MemoryStores::new();
    seed_system_catalogue(stores.policies.as_ref(), stores.roles.as_ref()).expect("seed");
    let resolver = PrincipalContextResolver::new(
        stores.principals.clone(),
        stores.groups.clone(),
        stores.roles.clone(),
        stores.policies.clone(),
    );
    (stores, resolver)
}

/// Registers a principal with the given linkage and puts it in a fresh
/// group carrying the given system roles.
fn enroll(
    stores: &MemoryStores,
    roles: &[SystemRole],
    linkage: PrincipalLinkage,
) -> PrincipalId {
    let account = AccountId::new();
    let principal = Principal::new(IdentityId::new());
    let principal_id = principal.id();
    stores.principals.insert(principal, account, linkage);

    let mut group = PrincipalGroup::new(account, "members");
    group.add_member(principal_id);
    for role in roles {
        group.attach_role(role.id());
    }
    stores.groups.save(group).expect("save group");
    principal_id
}

fn decide(
    resolver: &PrincipalContextResolver,
    principal_id: PrincipalId,
    action: Action,
    resource_type: ResourceType,
    resource: &ResourceAttributes,
) -> Decision {
    let ctx = resolver.resolve(principal_id).expect("resolve");
    PolicyEvaluator::decide(&ctx, action, resource_type, resource)
}

// =============================================================================
// Default Deny
// =============================================================================

#[test]
fn no_permissions_means_deny() {
    let (stores, resolver) = seeded_stores();
    let principal = enroll(&stores, &[SystemRole::None], PrincipalLinkage::default());

    for action in Action::ALL {
        let decision = decide(
            &resolver,
            principal,
            action,
            ResourceType::Song,
            &ResourceAttributes::new(),
        );
        assert!(decision.is_deny(), "{action} should be denied");
    }
}

#[test]
fn collaborator_edits_but_cannot_review() {
    let (stores, resolver) = seeded_stores();
    let principal = enroll(&stores, &[SystemRole::Collaborator], PrincipalLinkage::default());
    let resource = ResourceAttributes::new();

    assert!(decide(&resolver, principal, Action::Edit, ResourceType::Song, &resource).is_allow());
    assert!(decide(&resolver, principal, Action::Create, ResourceType::Group, &resource).is_allow());
    // No statement covers approval, so the default applies.
    assert!(decide(&resolver, principal, Action::Approve, ResourceType::Song, &resource).is_deny());
}

#[test]
fn administrator_is_unrestricted() {
    let (stores, resolver) = seeded_stores();
    let principal = enroll(&stores, &[SystemRole::Administrator], PrincipalLinkage::default());
    let resource = ResourceAttributes::new();

    for action in Action::ALL {
        for resource_type in ResourceType::ALL {
            assert!(decide(&resolver, principal, action, resource_type, &resource).is_allow());
        }
    }
}

// =============================================================================
// Deny Overrides
// =============================================================================

#[test]
fn matching_deny_beats_matching_allow() {
    let (stores, resolver) = seeded_stores();
    let agency = AgencyId::new();
    // AgencyActor's AGENCY_MANAGEMENT allows approval inside the
    // principal's own agency; TalentActor's DENY_AGENCY_APPROVAL
    // forbids it on agency pages. Both statements match here.
    let principal = enroll(
        &stores,
        &[SystemRole::AgencyActor, SystemRole::TalentActor],
        PrincipalLinkage {
            agency_id: Some(agency),
            ..PrincipalLinkage::default()
        },
    );
    let resource = ResourceAttributes::new().with_agency(agency);

    let decision = decide(&resolver, principal, Action::Approve, ResourceType::Agency, &resource);
    assert!(decision.is_deny());
}

#[test]
fn talent_actor_cannot_approve_agency_pages() {
    let (stores, resolver) = seeded_stores();
    let agency = AgencyId::new();
    let talent = TalentId::new();
    let principal = enroll(
        &stores,
        &[SystemRole::TalentActor],
        PrincipalLinkage {
            agency_id: Some(agency),
            wiki_group_ids: Default::default(),
            talent_ids: [talent].into_iter().collect(),
        },
    );

    // Even on the principal's own agency page the approval deny wins.
    let own_agency = ResourceAttributes::new().with_agency(agency);
    assert!(
        decide(&resolver, principal, Action::Approve, ResourceType::Agency, &own_agency).is_deny()
    );

    // The same principal still edits talent pages linked to it.
    let own_talent = ResourceAttributes::new().with_talent(talent);
    assert!(
        decide(&resolver, principal, Action::Edit, ResourceType::Talent, &own_talent).is_allow()
    );
}

#[test]
fn rollback_deny_beats_full_access() {
    let (stores, resolver) = seeded_stores();
    let principal = enroll(
        &stores,
        &[SystemRole::Administrator, SystemRole::AgencyActor],
        PrincipalLinkage::default(),
    );
    let resource = ResourceAttributes::new();

    // FULL_ACCESS allows rollback, DENY_ROLLBACK forbids it anywhere.
    assert!(decide(&resolver, principal, Action::Rollback, ResourceType::Song, &resource).is_deny());
    // Unrelated actions keep their allow.
    assert!(decide(&resolver, principal, Action::Publish, ResourceType::Song, &resource).is_allow());
}

// =============================================================================
// Conditions and Fail-Closed
// =============================================================================

#[test]
fn agency_actor_approves_only_inside_own_agency() {
    let (stores, resolver) = seeded_stores();
    let agency = AgencyId::new();
    let principal = enroll(
        &stores,
        &[SystemRole::AgencyActor],
        PrincipalLinkage {
            agency_id: Some(agency),
            ..PrincipalLinkage::default()
        },
    );

    let own = ResourceAttributes::new().with_agency(agency);
    assert!(decide(&resolver, principal, Action::Approve, ResourceType::Talent, &own).is_allow());

    let other = ResourceAttributes::new().with_agency(AgencyId::new());
    assert!(decide(&resolver, principal, Action::Approve, ResourceType::Talent, &other).is_deny());
}

#[test]
fn missing_resource_attribute_fails_closed() {
    let (stores, resolver) = seeded_stores();
    let principal = enroll(
        &stores,
        &[SystemRole::AgencyActor],
        PrincipalLinkage {
            agency_id: Some(AgencyId::new()),
            ..PrincipalLinkage::default()
        },
    );

    // The resource carries no agency attribute, so the conditioned
    // allow cannot be proven.
    let resource = ResourceAttributes::new();
    assert!(decide(&resolver, principal, Action::Approve, ResourceType::Talent, &resource).is_deny());
}

#[test]
fn missing_principal_attribute_fails_closed() {
    let (stores, resolver) = seeded_stores();
    // No agency linkage at all.
    let principal = enroll(&stores, &[SystemRole::AgencyActor], PrincipalLinkage::default());

    let resource = ResourceAttributes::new().with_agency(AgencyId::new());
    assert!(decide(&resolver, principal, Action::Approve, ResourceType::Talent, &resource).is_deny());
}

// =============================================================================
// Multi-Statement OR
// =============================================================================

#[test]
fn talent_management_alternatives_each_grant_independently() {
    let (stores, resolver) = seeded_stores();
    let wiki_group = WikiGroupId::new();
    let talent = TalentId::new();

    // An isolated role carrying only TALENT_MANAGEMENT, so the
    // unconditioned BASIC_EDITING allow cannot mask the conditions.
    let role = Role::new(
        "talent-management-only",
        vec![SystemPolicy::TalentManagement.id()],
    );
    let role_id = role.id();
    stores.roles.save(role).expect("save role");

    let account = AccountId::new();
    let principal = Principal::new(IdentityId::new());
    let principal_id = principal.id();
    stores.principals.insert(
        principal,
        account,
        PrincipalLinkage {
            agency_id: None,
            wiki_group_ids: [wiki_group].into_iter().collect(),
            talent_ids: [talent].into_iter().collect(),
        },
    );
    let mut group = PrincipalGroup::new(account, "talent-staff");
    group.add_member(principal_id);
    group.attach_role(role_id);
    stores.groups.save(group).expect("save group");

    // Song reachable through the wiki group alternative.
    let by_group = ResourceAttributes::new().with_group(wiki_group);
    assert!(decide(&resolver, principal_id, Action::Edit, ResourceType::Song, &by_group).is_allow());

    // Song reachable through the talent alternative.
    let by_talent = ResourceAttributes::new().with_talent(talent);
    assert!(decide(&resolver, principal_id, Action::Edit, ResourceType::Song, &by_talent).is_allow());

    // Song linked to neither.
    let unrelated = ResourceAttributes::new()
        .with_group(WikiGroupId::new())
        .with_talent(TalentId::new());
    assert!(decide(&resolver, principal_id, Action::Edit, ResourceType::Song, &unrelated).is_deny());

    // Talent pages only match through the talent linkage.
    let own_talent = ResourceAttributes::new().with_talent(talent);
    assert!(
        decide(&resolver, principal_id, Action::Create, ResourceType::Talent, &own_talent)
            .is_allow()
    );
    let other_talent = ResourceAttributes::new().with_talent(TalentId::new());
    assert!(
        decide(&resolver, principal_id, Action::Create, ResourceType::Talent, &other_talent)
            .is_deny()
    );
}

// =============================================================================
// Membership Aggregation
// =============================================================================

#[test]
fn permissions_accumulate_across_groups() {
    let (stores, resolver) = seeded_stores();
    let account = AccountId::new();
    let principal = Principal::new(IdentityId::new());
    let principal_id = principal.id();
    stores
        .principals
        .insert(principal, account, PrincipalLinkage::default());

    let mut editors = PrincipalGroup::new(account, "editors");
    editors.add_member(principal_id);
    editors.attach_role(SystemRole::Collaborator.id());
    stores.groups.save(editors).expect("save");

    assert!(decide(
        &resolver,
        principal_id,
        Action::Publish,
        ResourceType::Song,
        &ResourceAttributes::new()
    )
    .is_deny());

    // Joining a second group with a broader role widens access.
    let mut admins = PrincipalGroup::new(account, "admins");
    admins.add_member(principal_id);
    admins.attach_role(SystemRole::Administrator.id());
    stores.groups.save(admins).expect("save");

    assert!(decide(
        &resolver,
        principal_id,
        Action::Publish,
        ResourceType::Song,
        &ResourceAttributes::new()
    )
    .is_allow());
}

#[test]
fn leaving_the_group_revokes_access() {
    let (stores, resolver) = seeded_stores();
    let account = AccountId::new();
    let principal = Principal::new(IdentityId::new());
    let principal_id = principal.id();
    stores
        .principals
        .insert(principal, account, PrincipalLinkage::default());

    let mut group = PrincipalGroup::new(account, "editors");
    group.add_member(principal_id);
    group.attach_role(SystemRole::Collaborator.id());
    stores.groups.save(group.clone()).expect("save");

    let resource = ResourceAttributes::new();
    assert!(decide(&resolver, principal_id, Action::Edit, ResourceType::Song, &resource).is_allow());

    group.remove_member(principal_id);
    stores.groups.save(group).expect("save");

    // The next resolution observes the removal.
    assert!(decide(&resolver, principal_id, Action::Edit, ResourceType::Song, &resource).is_deny());
}
