//! Naming templates for grant-derived objects.

use crate::grant::GrantSide;
use encore_types::AffiliationId;
use serde::{Deserialize, Serialize};

/// Name templates for the objects an activation synthesizes.
///
/// Templates may reference `{affiliation}` (the affiliation UUID) and
/// `{side}` (`talent_side` / `agency_side`). The defaults produce
/// names like `affiliation-1f3a...-talent_side-policy`; deployments
/// override them through the runtime configuration when operators
/// want friendlier names in their admin tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrantNaming {
    /// Template for the synthesized principal group's name.
    pub group: String,
    /// Template for the synthesized policy's name.
    pub policy: String,
    /// Template for the synthesized role's name.
    pub role: String,
}

impl Default for GrantNaming {
    fn default() -> Self {
        Self {
            group: "affiliation-{affiliation}-{side}-group".to_string(),
            policy: "affiliation-{affiliation}-{side}-policy".to_string(),
            role: "affiliation-{affiliation}-{side}-role".to_string(),
        }
    }
}

impl GrantNaming {
    /// Renders the group name for one affiliation side.
    #[must_use]
    pub fn group_name(&self, affiliation_id: AffiliationId, side: GrantSide) -> String {
        render(&self.group, affiliation_id, side)
    }

    /// Renders the policy name for one affiliation side.
    #[must_use]
    pub fn policy_name(&self, affiliation_id: AffiliationId, side: GrantSide) -> String {
        render(&self.policy, affiliation_id, side)
    }

    /// Renders the role name for one affiliation side.
    #[must_use]
    pub fn role_name(&self, affiliation_id: AffiliationId, side: GrantSide) -> String {
        render(&self.role, affiliation_id, side)
    }
}

fn render(template: &str, affiliation_id: AffiliationId, side: GrantSide) -> String {
    template
        .replace("{affiliation}", &affiliation_id.uuid().to_string())
        .replace("{side}", side.as_str())
}
