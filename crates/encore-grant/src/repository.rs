//! Grant persistence trait seams.
//!
//! Concrete implementations live in `encore-runtime`, same split as
//! the repositories in `encore-policy`.

use crate::grant::{AffiliationGrant, GrantSide};
use encore_policy::{Policy, PrincipalGroup, RepositoryError, Role};
use encore_types::AffiliationId;

/// Storage for affiliation grant records, keyed by
/// `(affiliation, side)`.
pub trait AffiliationGrantRepository: Send + Sync {
    /// Looks up the grant for one side of an affiliation.
    fn find(
        &self,
        affiliation_id: AffiliationId,
        side: GrantSide,
    ) -> Result<Option<AffiliationGrant>, RepositoryError>;

    /// Returns every grant recorded for an affiliation (both sides,
    /// if present).
    fn find_by_affiliation(
        &self,
        affiliation_id: AffiliationId,
    ) -> Result<Vec<AffiliationGrant>, RepositoryError>;

    /// Deletes the grant record for one side. Deleting an absent
    /// record is a no-op.
    fn delete(
        &self,
        affiliation_id: AffiliationId,
        side: GrantSide,
    ) -> Result<(), RepositoryError>;
}

/// Transactional boundary for grant provisioning.
///
/// Activation persists four aggregates — group, policy, role, grant
/// record — as one logical unit. The unique `(affiliation, side)` key
/// on the grant record is enforced *here*, inside the commit: two
/// concurrent workers provisioning the same side race on the storage
/// constraint, not on an application-level check, and the loser
/// receives [`RepositoryError::Duplicate`].
pub trait GrantUnitOfWork: Send + Sync {
    /// Persists a freshly provisioned grant atomically.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::Duplicate`] when a grant already exists
    ///   for the record's `(affiliation, side)` key; nothing is
    ///   persisted in that case.
    /// - [`RepositoryError::Backend`] on storage failure.
    fn commit_activation(
        &self,
        group: PrincipalGroup,
        policy: Policy,
        role: Role,
        grant: AffiliationGrant,
    ) -> Result<(), RepositoryError>;
}
