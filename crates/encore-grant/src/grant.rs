//! The affiliation grant record.

use chrono::{DateTime, Utc};
use encore_types::{AffiliationId, PolicyId, PrincipalGroupId, RoleId};
use serde::{Deserialize, Serialize};

/// Which side of the affiliation a grant provisions.
///
/// Activation creates one grant per side: the talent side (the talent
/// account's principals get scoped editing rights on the agency's
/// pages) and the agency side (an initially empty group the agency
/// staffs later through the UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantSide {
    /// Grant for the talent account's principals.
    TalentSide,
    /// Grant for the agency account's principals.
    AgencySide,
}

impl GrantSide {
    /// Both sides, in provisioning order.
    pub const ALL: [GrantSide; 2] = [GrantSide::TalentSide, GrantSide::AgencySide];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TalentSide => "talent_side",
            Self::AgencySide => "agency_side",
        }
    }
}

impl std::fmt::Display for GrantSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reverse index linking an affiliation side to the Policy, Role and
/// PrincipalGroup its activation created.
///
/// The record exists purely so termination can find and delete
/// exactly what activation created. At most one record exists per
/// `(affiliation, side)` key; the storage layer enforces the
/// uniqueness, and the lifecycle's find-before-create check is only
/// an optimization on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationGrant {
    /// The affiliation this grant derives from.
    pub affiliation_id: AffiliationId,
    /// Which side of the affiliation this grant provisions.
    pub side: GrantSide,
    /// The policy activation created.
    pub policy_id: PolicyId,
    /// The role activation created.
    pub role_id: RoleId,
    /// The principal group activation created.
    pub principal_group_id: PrincipalGroupId,
    /// When the grant was recorded.
    pub granted_at: DateTime<Utc>,
}

impl AffiliationGrant {
    /// Records a grant, stamped with the current time.
    #[must_use]
    pub fn new(
        affiliation_id: AffiliationId,
        side: GrantSide,
        policy_id: PolicyId,
        role_id: RoleId,
        principal_group_id: PrincipalGroupId,
    ) -> Self {
        Self {
            affiliation_id,
            side,
            policy_id,
            role_id,
            principal_group_id,
            granted_at: Utc::now(),
        }
    }

    /// Returns the unique `(affiliation, side)` key as a display
    /// string, for diagnostics and duplicate-key errors.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.affiliation_id.uuid(), self.side)
    }
}
