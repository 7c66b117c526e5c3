//! The seed catalogue of system policies and roles.
//!
//! The catalogue is a compile-time table of strongly-typed entries;
//! the evaluator never looks anything up by name at runtime. Name
//! strings exist only so the bootstrap import step can persist the
//! catalogue and so operators can recognize the objects in storage.
//!
//! # Catalogue
//!
//! | Policy | Content |
//! |--------|---------|
//! | `FULL_ACCESS` | allow every action on every resource type |
//! | `BASIC_EDITING` | allow create/edit/submit everywhere |
//! | `AGENCY_MANAGEMENT` | allow review-and-publish actions where the resource's agency is the principal's agency |
//! | `TALENT_MANAGEMENT` | allow create/edit/submit on talent/group/song pages linked to the principal |
//! | `DENY_AGENCY_APPROVAL` | deny approve/reject/publish/translate on agency pages |
//! | `DENY_ROLLBACK` | deny rollback everywhere |
//!
//! | Role | Policies |
//! |------|----------|
//! | `ADMINISTRATOR` | FULL_ACCESS |
//! | `SENIOR_COLLABORATOR` | BASIC_EDITING, AGENCY_MANAGEMENT, TALENT_MANAGEMENT |
//! | `AGENCY_ACTOR` | BASIC_EDITING, AGENCY_MANAGEMENT, DENY_ROLLBACK |
//! | `TALENT_ACTOR` | BASIC_EDITING, TALENT_MANAGEMENT, DENY_AGENCY_APPROVAL |
//! | `COLLABORATOR` | BASIC_EDITING |
//! | `NONE` | (no policies) |
//!
//! # OR via Multiple Statements
//!
//! `TALENT_MANAGEMENT` carries four near-identical statements because
//! a condition is always a conjunction; alternatives (song reachable
//! through the principal's groups OR through the principal's talents)
//! are separate statements. Clause-level OR is deliberately not
//! supported.

use crate::action::{Action, Effect, ResourceType};
use crate::condition::{
    Condition, ConditionClause, ConditionKey, ConditionOperator, ConditionValue,
    PrincipalAttribute,
};
use crate::error::PolicyError;
use crate::policy::Policy;
use crate::role::Role;
use crate::statement::Statement;
use encore_types::{PolicyId, RoleId};

/// The seeded system policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemPolicy {
    /// Allow every action on every resource type.
    FullAccess,
    /// Allow create/edit/submit on every resource type.
    BasicEditing,
    /// Allow review-and-publish actions within the principal's agency.
    AgencyManagement,
    /// Allow create/edit/submit on pages linked to the principal.
    TalentManagement,
    /// Deny agency-page approval actions (restricts talent actors).
    DenyAgencyApproval,
    /// Deny rollback everywhere (restricts agency actors).
    DenyRollback,
}

impl SystemPolicy {
    /// Every system policy, in bootstrap order.
    pub const ALL: [SystemPolicy; 6] = [
        SystemPolicy::FullAccess,
        SystemPolicy::BasicEditing,
        SystemPolicy::AgencyManagement,
        SystemPolicy::TalentManagement,
        SystemPolicy::DenyAgencyApproval,
        SystemPolicy::DenyRollback,
    ];

    /// Returns the catalogue name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullAccess => "FULL_ACCESS",
            Self::BasicEditing => "BASIC_EDITING",
            Self::AgencyManagement => "AGENCY_MANAGEMENT",
            Self::TalentManagement => "TALENT_MANAGEMENT",
            Self::DenyAgencyApproval => "DENY_AGENCY_APPROVAL",
            Self::DenyRollback => "DENY_ROLLBACK",
        }
    }

    /// Returns the deterministic identifier this policy is seeded
    /// under.
    #[must_use]
    pub fn id(&self) -> PolicyId {
        PolicyId::seeded(self.name())
    }

    /// Builds the policy aggregate for persistence.
    ///
    /// # Errors
    ///
    /// Propagates [`PolicyError`] from statement construction. The
    /// catalogue is statically valid, so an error here indicates a
    /// broken catalogue definition and should abort bootstrap.
    pub fn build(&self) -> Result<Policy, PolicyError> {
        let statements = match self {
            Self::FullAccess => vec![Statement::allow(Action::ALL, ResourceType::ALL, None)?],
            Self::BasicEditing => vec![Statement::allow(
                [Action::Create, Action::Edit, Action::Submit],
                ResourceType::ALL,
                None,
            )?],
            Self::AgencyManagement => vec![Statement::new(
                Effect::Allow,
                [
                    Action::Approve,
                    Action::Reject,
                    Action::Translate,
                    Action::Publish,
                    Action::Merge,
                    Action::AutomaticCreate,
                ],
                ResourceType::ALL,
                Some(Condition::single(ConditionClause::new(
                    ConditionKey::ResourceAgencyId,
                    ConditionOperator::Equals,
                    ConditionValue::principal(PrincipalAttribute::AgencyId),
                ))),
            )?],
            Self::TalentManagement => {
                let editing = [Action::Create, Action::Edit, Action::Submit];
                // OR across alternatives = one statement per alternative.
                vec![
                    Statement::allow(
                        editing,
                        [ResourceType::Talent],
                        Some(Condition::single(ConditionClause::new(
                            ConditionKey::ResourceTalentId,
                            ConditionOperator::In,
                            ConditionValue::principal(PrincipalAttribute::TalentIds),
                        ))),
                    )?,
                    Statement::allow(
                        editing,
                        [ResourceType::Group],
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
                ]
            }
            Self::DenyAgencyApproval => vec![Statement::deny(
                [
                    Action::Approve,
                    Action::Reject,
                    Action::Publish,
                    Action::Translate,
                ],
                [ResourceType::Agency],
                None,
            )?],
            Self::DenyRollback => {
                vec![Statement::deny([Action::Rollback], ResourceType::ALL, None)?]
            }
        };
        Ok(Policy::system(self.name(), statements))
    }
}

/// The seeded system roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemRole {
    /// Unrestricted platform administration.
    Administrator,
    /// Trusted collaborator: editing plus agency/talent management.
    SeniorCollaborator,
    /// Agency staff: editing and agency management, no rollback.
    AgencyActor,
    /// Talent staff: editing and talent management, no agency review.
    TalentActor,
    /// Plain collaborator: editing only.
    Collaborator,
    /// No permissions at all (placeholder for suspended members).
    None,
}

impl SystemRole {
    /// Every system role, in bootstrap order.
    pub const ALL: [SystemRole; 6] = [
        SystemRole::Administrator,
        SystemRole::SeniorCollaborator,
        SystemRole::AgencyActor,
        SystemRole::TalentActor,
        SystemRole::Collaborator,
        SystemRole::None,
    ];

    /// Returns the catalogue name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Administrator => "ADMINISTRATOR",
            Self::SeniorCollaborator => "SENIOR_COLLABORATOR",
            Self::AgencyActor => "AGENCY_ACTOR",
            Self::TalentActor => "TALENT_ACTOR",
            Self::Collaborator => "COLLABORATOR",
            Self::None => "NONE",
        }
    }

    /// Returns the deterministic identifier this role is seeded under.
    #[must_use]
    pub fn id(&self) -> RoleId {
        RoleId::seeded(self.name())
    }

    /// Returns the policies this role bundles.
    #[must_use]
    pub fn policies(&self) -> &'static [SystemPolicy] {
        match self {
            Self::Administrator => &[SystemPolicy::FullAccess],
            Self::SeniorCollaborator => &[
                SystemPolicy::BasicEditing,
                SystemPolicy::AgencyManagement,
                SystemPolicy::TalentManagement,
            ],
            Self::AgencyActor => &[
                SystemPolicy::BasicEditing,
                SystemPolicy::AgencyManagement,
                SystemPolicy::DenyRollback,
            ],
            Self::TalentActor => &[
                SystemPolicy::BasicEditing,
                SystemPolicy::TalentManagement,
                SystemPolicy::DenyAgencyApproval,
            ],
            Self::Collaborator => &[SystemPolicy::BasicEditing],
            Self::None => &[],
        }
    }

    /// Builds the role aggregate for persistence.
    #[must_use]
    pub fn build(&self) -> Role {
        Role::system(
            self.name(),
            self.policies().iter().map(SystemPolicy::id).collect(),
        )
    }
}
