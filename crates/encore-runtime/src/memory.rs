//! In-memory repository implementations.
//!
//! These back the repository trait seams with
//! `parking_lot::RwLock<HashMap>` maps. They exist for tests,
//! prototyping and single-process deployments; a real storage adapter
//! implements the same traits against its database.
//!
//! # Concurrency
//!
//! Every store is independently lockable, so reads across stores are
//! not a cross-store snapshot. The one place cross-store atomicity
//! matters — committing a freshly provisioned grant — goes through
//! [`MemoryStores`]' [`GrantUnitOfWork`] implementation, which holds
//! the grant map's write lock for the whole commit so two workers
//! racing on the same `(affiliation, side)` key serialize there.

use encore_grant::{AffiliationGrant, AffiliationGrantRepository, GrantSide, GrantUnitOfWork};
use encore_policy::{
    Policy, PolicyRepository, PrincipalGroup, PrincipalGroupRepository, PrincipalLinkage,
    PrincipalRepository, RepositoryError, Role, RoleRepository, TalentRepository,
};
use encore_types::{
    AccountId, AffiliationId, PolicyId, Principal, PrincipalGroupId, PrincipalId, RoleId,
    TalentId,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory [`PolicyRepository`].
#[derive(Debug, Default)]
pub struct MemoryPolicyStore {
    map: RwLock<HashMap<PolicyId, Policy>>,
}

impl MemoryPolicyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Returns `true` when no policies are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

impl PolicyRepository for MemoryPolicyStore {
    fn find_by_id(&self, id: PolicyId) -> Result<Option<Policy>, RepositoryError> {
        Ok(self.map.read().get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Policy>, RepositoryError> {
        Ok(self
            .map
            .read()
            .values()
            .find(|policy| policy.name() == name)
            .cloned())
    }

    fn find_all(&self) -> Result<Vec<Policy>, RepositoryError> {
        Ok(self.map.read().values().cloned().collect())
    }

    fn save(&self, policy: Policy) -> Result<(), RepositoryError> {
        self.map.write().insert(policy.id(), policy);
        Ok(())
    }

    fn delete(&self, id: PolicyId) -> Result<(), RepositoryError> {
        self.map.write().remove(&id);
        Ok(())
    }
}

/// In-memory [`RoleRepository`].
#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    map: RwLock<HashMap<RoleId, Role>>,
}

impl MemoryRoleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoleRepository for MemoryRoleStore {
    fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RepositoryError> {
        Ok(self.map.read().get(&id).cloned())
    }

    fn save(&self, role: Role) -> Result<(), RepositoryError> {
        self.map.write().insert(role.id(), role);
        Ok(())
    }

    fn delete(&self, id: RoleId) -> Result<(), RepositoryError> {
        self.map.write().remove(&id);
        Ok(())
    }
}

/// In-memory [`PrincipalGroupRepository`].
#[derive(Debug, Default)]
pub struct MemoryGroupStore {
    map: RwLock<HashMap<PrincipalGroupId, PrincipalGroup>>,
}

impl MemoryGroupStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrincipalGroupRepository for MemoryGroupStore {
    fn find_by_id(
        &self,
        id: PrincipalGroupId,
    ) -> Result<Option<PrincipalGroup>, RepositoryError> {
        Ok(self.map.read().get(&id).cloned())
    }

    fn find_by_member(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Vec<PrincipalGroup>, RepositoryError> {
        Ok(self
            .map
            .read()
            .values()
            .filter(|group| group.has_member(principal_id))
            .cloned()
            .collect())
    }

    fn save(&self, group: PrincipalGroup) -> Result<(), RepositoryError> {
        self.map.write().insert(group.id(), group);
        Ok(())
    }

    fn delete(&self, id: PrincipalGroupId) -> Result<(), RepositoryError> {
        self.map.write().remove(&id);
        Ok(())
    }
}

/// In-memory [`PrincipalRepository`].
///
/// Stores each principal alongside its owning account and its
/// business linkage, which in production are maintained by the
/// account and wiki bounded contexts.
#[derive(Debug, Default)]
pub struct MemoryPrincipalStore {
    map: RwLock<HashMap<PrincipalId, PrincipalEntry>>,
}

#[derive(Debug, Clone)]
struct PrincipalEntry {
    principal: Principal,
    account_id: AccountId,
    linkage: PrincipalLinkage,
}

impl MemoryPrincipalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a principal under an account, with its linkage.
    pub fn insert(&self, principal: Principal, account_id: AccountId, linkage: PrincipalLinkage) {
        self.map.write().insert(
            principal.id(),
            PrincipalEntry {
                principal,
                account_id,
                linkage,
            },
        );
    }
}

impl PrincipalRepository for MemoryPrincipalStore {
    fn find_by_id(&self, id: PrincipalId) -> Result<Option<Principal>, RepositoryError> {
        Ok(self.map.read().get(&id).map(|e| e.principal.clone()))
    }

    fn find_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Principal>, RepositoryError> {
        Ok(self
            .map
            .read()
            .values()
            .filter(|e| e.account_id == account_id)
            .map(|e| e.principal.clone())
            .collect())
    }

    fn linkage(&self, id: PrincipalId) -> Result<Option<PrincipalLinkage>, RepositoryError> {
        Ok(self.map.read().get(&id).map(|e| e.linkage.clone()))
    }
}

/// In-memory [`TalentRepository`].
#[derive(Debug, Default)]
pub struct MemoryTalentStore {
    by_account: RwLock<HashMap<AccountId, TalentId>>,
}

impl MemoryTalentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the wiki talent for an account.
    pub fn insert(&self, account_id: AccountId, talent_id: TalentId) {
        self.by_account.write().insert(account_id, talent_id);
    }
}

impl TalentRepository for MemoryTalentStore {
    fn find_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<TalentId>, RepositoryError> {
        Ok(self.by_account.read().get(&account_id).copied())
    }
}

/// In-memory [`AffiliationGrantRepository`].
#[derive(Debug, Default)]
pub struct MemoryGrantStore {
    map: RwLock<HashMap<(AffiliationId, GrantSide), AffiliationGrant>>,
}

impl MemoryGrantStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored grant records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Returns `true` when no grant records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

impl AffiliationGrantRepository for MemoryGrantStore {
    fn find(
        &self,
        affiliation_id: AffiliationId,
        side: GrantSide,
    ) -> Result<Option<AffiliationGrant>, RepositoryError> {
        Ok(self.map.read().get(&(affiliation_id, side)).cloned())
    }

    fn find_by_affiliation(
        &self,
        affiliation_id: AffiliationId,
    ) -> Result<Vec<AffiliationGrant>, RepositoryError> {
        Ok(self
            .map
            .read()
            .values()
            .filter(|grant| grant.affiliation_id == affiliation_id)
            .cloned()
            .collect())
    }

    fn delete(
        &self,
        affiliation_id: AffiliationId,
        side: GrantSide,
    ) -> Result<(), RepositoryError> {
        self.map.write().remove(&(affiliation_id, side));
        Ok(())
    }
}

/// The full in-memory store bundle.
///
/// Cloning is cheap (shared `Arc` handles). The bundle itself
/// implements [`GrantUnitOfWork`], since only something holding every
/// store can commit an activation atomically.
#[derive(Clone, Default)]
pub struct MemoryStores {
    /// Policy storage.
    pub policies: Arc<MemoryPolicyStore>,
    /// Role storage.
    pub roles: Arc<MemoryRoleStore>,
    /// Principal-group storage.
    pub groups: Arc<MemoryGroupStore>,
    /// Principal storage.
    pub principals: Arc<MemoryPrincipalStore>,
    /// Account → wiki talent lookup.
    pub talents: Arc<MemoryTalentStore>,
    /// Grant record storage.
    pub grants: Arc<MemoryGrantStore>,
}

impl MemoryStores {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the [`encore_grant::GrantStores`] view of this bundle
    /// for wiring a [`encore_grant::GrantLifecycle`].
    #[must_use]
    pub fn grant_stores(&self) -> encore_grant::GrantStores {
        encore_grant::GrantStores {
            policies: self.policies.clone(),
            roles: self.roles.clone(),
            groups: self.groups.clone(),
            principals: self.principals.clone(),
            talents: self.talents.clone(),
            grants: self.grants.clone(),
            unit_of_work: Arc::new(self.clone()),
        }
    }
}

impl GrantUnitOfWork for MemoryStores {
    fn commit_activation(
        &self,
        group: PrincipalGroup,
        policy: Policy,
        role: Role,
        grant: AffiliationGrant,
    ) -> Result<(), RepositoryError> {
        // The grant map's write lock is held for the whole commit:
        // it is the unique-key constraint, and holding it serializes
        // racing activations of the same (affiliation, side).
        let mut grants = self.grants.map.write();
        let key = (grant.affiliation_id, grant.side);
        if grants.contains_key(&key) {
            return Err(RepositoryError::Duplicate {
                entity: "affiliation_grant",
                key: grant.key(),
            });
        }
        self.groups.save(group)?;
        self.policies.save(policy)?;
        self.roles.save(role)?;
        grants.insert(key, grant);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_policy::Statement;
    use encore_policy::{Action, ResourceType};
    use encore_types::IdentityId;

    #[test]
    fn policy_store_finds_by_name() {
        let store = MemoryPolicyStore::new();
        let policy = Policy::new("song-editors", Vec::new());
        let id = policy.id();
        store.save(policy).expect("save");

        let by_name = store.find_by_name("song-editors").expect("lookup");
        assert_eq!(by_name.map(|p| p.id()), Some(id));
        assert!(store.find_by_name("missing").expect("lookup").is_none());
    }

    #[test]
    fn group_store_finds_by_member() {
        let store = MemoryGroupStore::new();
        let member = PrincipalId::new();

        let mut in_group = PrincipalGroup::new(AccountId::new(), "a");
        in_group.add_member(member);
        let out_group = PrincipalGroup::new(AccountId::new(), "b");
        store.save(in_group.clone()).expect("save");
        store.save(out_group).expect("save");

        let memberships = store.find_by_member(member).expect("lookup");
        assert_eq!(memberships.len(), 1);
        assert_eq!(memberships[0].id(), in_group.id());
    }

    #[test]
    fn principal_store_scopes_by_account() {
        let store = MemoryPrincipalStore::new();
        let account = AccountId::new();
        let p1 = Principal::new(IdentityId::new());
        let p2 = Principal::new(IdentityId::new());
        store.insert(p1.clone(), account, PrincipalLinkage::default());
        store.insert(p2, AccountId::new(), PrincipalLinkage::default());

        let in_account = store.find_by_account(account).expect("lookup");
        assert_eq!(in_account.len(), 1);
        assert_eq!(in_account[0].id(), p1.id());
    }

    #[test]
    fn unit_of_work_rejects_duplicate_grant_keys() {
        let stores = MemoryStores::new();
        let affiliation = AffiliationId::new();

        let make = || {
            let group = PrincipalGroup::new(AccountId::new(), "g");
            let stmt = Statement::allow([Action::Edit], [ResourceType::Song], None)
                .expect("valid statement");
            let policy = Policy::new("p", vec![stmt]);
            let role = Role::new("r", vec![policy.id()]);
            let grant = AffiliationGrant::new(
                affiliation,
                GrantSide::TalentSide,
                policy.id(),
                role.id(),
                group.id(),
            );
            (group, policy, role, grant)
        };

        let (g, p, r, grant) = make();
        stores.commit_activation(g, p, r, grant).expect("first commit");

        let (g, p, r, grant) = make();
        let err = stores.commit_activation(g, p, r, grant).unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate { .. }));
        assert_eq!(stores.grants.len(), 1);
    }

    #[test]
    fn deleting_absent_entries_is_a_noop() {
        let stores = MemoryStores::new();
        stores.policies.delete(PolicyId::new()).expect("no-op");
        stores.roles.delete(RoleId::new()).expect("no-op");
        stores
            .grants
            .delete(AffiliationId::new(), GrantSide::AgencySide)
            .expect("no-op");
    }
}
