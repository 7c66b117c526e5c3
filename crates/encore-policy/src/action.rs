//! Closed request vocabularies: actions, resource types, effects.
//!
//! These enums are the fixed vocabulary every statement and every
//! authorization request is expressed in. They are versioned only by
//! code change; no runtime registration exists.
//!
//! | Vocabulary | Members |
//! |------------|---------|
//! | [`Action`] | create, edit, submit, approve, reject, translate, publish, merge, rollback, automatic_create |
//! | [`ResourceType`] | agency, talent, group, song |
//! | [`Effect`] | allow, deny |

use serde::{Deserialize, Serialize};

/// An operation a principal may attempt on a wiki resource.
///
/// # Example
///
/// ```
/// use encore_policy::Action;
///
/// assert_eq!(Action::Approve.as_str(), "approve");
/// assert!(Action::ALL.contains(&Action::Rollback));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new resource draft.
    Create,
    /// Edit an existing resource.
    Edit,
    /// Submit a draft for review.
    Submit,
    /// Approve a submitted draft.
    Approve,
    /// Reject a submitted draft.
    Reject,
    /// Translate resource content.
    Translate,
    /// Publish approved content.
    Publish,
    /// Merge duplicate resources.
    Merge,
    /// Roll a resource back to a previous revision.
    Rollback,
    /// System-initiated creation (imports, derived pages).
    AutomaticCreate,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 10] = [
        Action::Create,
        Action::Edit,
        Action::Submit,
        Action::Approve,
        Action::Reject,
        Action::Translate,
        Action::Publish,
        Action::Merge,
        Action::Rollback,
        Action::AutomaticCreate,
    ];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Translate => "translate",
            Self::Publish => "publish",
            Self::Merge => "merge",
            Self::Rollback => "rollback",
            Self::AutomaticCreate => "automatic_create",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of wiki resource an authorization request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// An agency page.
    Agency,
    /// A talent page.
    Talent,
    /// A group (performing unit) page.
    Group,
    /// A song page.
    Song,
}

impl ResourceType {
    /// Every resource type, in declaration order.
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Agency,
        ResourceType::Talent,
        ResourceType::Group,
        ResourceType::Song,
    ];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agency => "agency",
            Self::Talent => "talent",
            Self::Group => "group",
            Self::Song => "song",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The effect a matching statement contributes to a decision.
///
/// Combined with deny-overrides: any matching [`Effect::Deny`]
/// statement beats any number of matching [`Effect::Allow`] statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// The statement grants the matched actions.
    Allow,
    /// The statement forbids the matched actions, overriding allows.
    Deny,
}

impl Effect {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_action() {
        assert_eq!(Action::ALL.len(), 10);
        // Spot-check both ends of the declaration order.
        assert_eq!(Action::ALL[0], Action::Create);
        assert_eq!(Action::ALL[9], Action::AutomaticCreate);
    }

    #[test]
    fn action_names_are_snake_case() {
        assert_eq!(Action::AutomaticCreate.as_str(), "automatic_create");
        assert_eq!(Action::Rollback.to_string(), "rollback");
    }

    #[test]
    fn resource_type_serde_uses_snake_case() {
        let json = serde_json::to_string(&ResourceType::Agency).expect("serialize");
        assert_eq!(json, "\"agency\"");
        let back: ResourceType = serde_json::from_str("\"song\"").expect("deserialize");
        assert_eq!(back, ResourceType::Song);
    }

    #[test]
    fn effect_display() {
        assert_eq!(Effect::Allow.to_string(), "allow");
        assert_eq!(Effect::Deny.to_string(), "deny");
    }
}
