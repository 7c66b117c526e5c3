//! Identifier types for the Encore platform.
//!
//! All identifiers are UUID-based for network compatibility and
//! cloud readiness. Identifiers come in two flavors:
//!
//! - **Instance identifiers** (accounts, principals, affiliations, ...):
//!   random UUID v4, unique per created aggregate.
//! - **Seeded identifiers** (system policies and roles): deterministic
//!   UUID v5 derived from the catalogue name, so that every process
//!   agrees on the identity of e.g. the `FULL_ACCESS` policy without
//!   coordination.

use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// Encore namespace UUID for deterministic UUID v5 generation.
///
/// Used as the namespace when deriving identifiers for seeded system
/// policies and roles, so the same catalogue name always yields the
/// same identifier across processes and machines.
const ENCORE_NAMESPACE: Uuid = uuid!("7c9f4b1e-52d8-4f0a-9b63-1a84febc02d5");

/// Identifier for an Account.
///
/// An account is the tenant boundary of the platform: agencies and
/// talents each act through an account, and principal groups are
/// owned by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Creates a new [`AccountId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "account:{}", self.0)
    }
}

/// Identifier for a Principal (acting identity).
///
/// A Principal represents "who" is performing an action, separate from
/// "what they are allowed to do". This separation enables:
///
/// - **Audit trails**: actions are attributed to identifiable actors
/// - **Delegation**: a principal may act on behalf of another
/// - **Network identity**: unique across distributed deployments
///
/// # Example
///
/// ```
/// use encore_types::PrincipalId;
///
/// let editor = PrincipalId::new();
/// let reviewer = PrincipalId::new();
///
/// assert_ne!(editor, reviewer);
/// println!("Editor: {}", editor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    /// Creates a new [`PrincipalId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "principal:{}", self.0)
    }
}

/// Identifier for the login identity a Principal is linked to.
///
/// Identity (credentials, external IdP subject) lives outside the
/// authorization core; principals only carry a link to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Creates a new [`IdentityId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "identity:{}", self.0)
    }
}

/// Identifier for an Affiliation.
///
/// An affiliation is the business relationship between an agency
/// account and a talent account. Its lifecycle (activation and
/// termination) drives automatic grant provisioning: activating an
/// affiliation synthesizes scoped Policy/Role/PrincipalGroup objects,
/// terminating it tears them down again.
///
/// # Example
///
/// ```
/// use encore_types::AffiliationId;
///
/// let aff = AffiliationId::new();
/// assert_eq!(aff, aff);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AffiliationId(pub Uuid);

impl AffiliationId {
    /// Creates a new [`AffiliationId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AffiliationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AffiliationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "affiliation:{}", self.0)
    }
}

/// Identifier for a wiki Agency entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgencyId(pub Uuid);

impl AgencyId {
    /// Creates a new [`AgencyId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AgencyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AgencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agency:{}", self.0)
    }
}

/// Identifier for a wiki Talent entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TalentId(pub Uuid);

impl TalentId {
    /// Creates a new [`TalentId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TalentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TalentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "talent:{}", self.0)
    }
}

/// Identifier for a wiki Group entity (a unit talents perform in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WikiGroupId(pub Uuid);

impl WikiGroupId {
    /// Creates a new [`WikiGroupId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for WikiGroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WikiGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wiki-group:{}", self.0)
    }
}

/// Identifier for a wiki Song entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(pub Uuid);

impl SongId {
    /// Creates a new [`SongId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SongId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SongId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "song:{}", self.0)
    }
}

/// Identifier for a Policy.
///
/// # UUID Strategy
///
/// - **System policies** (seed catalogue): deterministic UUID v5 via
///   [`PolicyId::seeded`], so `FULL_ACCESS` has the same identifier
///   in every process.
/// - **Custom / grant-derived policies**: random UUID v4 via
///   [`PolicyId::new`].
///
/// # Example
///
/// ```
/// use encore_types::PolicyId;
///
/// let a = PolicyId::seeded("FULL_ACCESS");
/// let b = PolicyId::seeded("FULL_ACCESS");
/// let c = PolicyId::seeded("BASIC_EDITING");
///
/// assert_eq!(a, b);  // Same name = same identifier
/// assert_ne!(a, c);  // Different name = different identifier
/// assert_ne!(PolicyId::new(), PolicyId::new());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyId(pub Uuid);

impl PolicyId {
    /// Creates a new [`PolicyId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deterministic [`PolicyId`] for a seeded system policy.
    ///
    /// The UUID is derived from the Encore namespace and the catalogue
    /// name using SHA-1 (UUID v5).
    #[must_use]
    pub fn seeded(name: &str) -> Self {
        Self(Uuid::new_v5(
            &ENCORE_NAMESPACE,
            format!("policy:{name}").as_bytes(),
        ))
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PolicyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "policy:{}", self.0)
    }
}

/// Identifier for a Role.
///
/// Same UUID strategy as [`PolicyId`]: v5 for seeded system roles,
/// v4 for grant-derived roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub Uuid);

impl RoleId {
    /// Creates a new [`RoleId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deterministic [`RoleId`] for a seeded system role.
    #[must_use]
    pub fn seeded(name: &str) -> Self {
        Self(Uuid::new_v5(
            &ENCORE_NAMESPACE,
            format!("role:{name}").as_bytes(),
        ))
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "role:{}", self.0)
    }
}

/// Identifier for a PrincipalGroup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalGroupId(pub Uuid);

impl PrincipalGroupId {
    /// Creates a new [`PrincipalGroupId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PrincipalGroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PrincipalGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "principal-group:{}", self.0)
    }
}
