//! ABAC policy model and evaluator for the Encore platform.
//!
//! This crate is the heart of Encore's authorization: an
//! attribute-based access-control engine that decides whether a
//! principal may perform an action on a wiki resource.
//!
//! # Model
//!
//! ```text
//! PrincipalGroup ──attaches──► Role ──references──► Policy ──holds──► Statement
//!       │                                                                 │
//!       └── members: Principal                   effect + actions + resource
//!                                                 types + optional Condition
//! ```
//!
//! - [`Statement`]: one [`Effect`] + action set + resource-type set +
//!   optional [`Condition`] (AND of attribute comparisons)
//! - [`Policy`]: named, immutable list of statements
//! - [`Role`]: named list of policy references
//! - [`PrincipalGroup`]: member principals + attached roles, owned by
//!   an account
//!
//! # Evaluation
//!
//! [`PolicyEvaluator::decide`] consumes a [`PrincipalContext`] (the
//! principal's flattened statements plus its business-linkage
//! attributes) and a [`ResourceAttributes`] bundle, and returns a
//! [`Decision`] by deny-overrides with default-deny. Evaluation is
//! pure; all I/O happens before the call.
//!
//! # Architecture
//!
//! ```text
//! encore-policy (model + evaluator + trait seams)  ◄── THIS CRATE
//!     ▲                    ▲
//! encore-grant        encore-runtime
//! (lifecycle)         (stores, resolver, bootstrap)
//! ```
//!
//! # Example
//!
//! ```
//! use encore_policy::{
//!     Action, Decision, PolicyEvaluator, PrincipalContext, ResourceAttributes, ResourceType,
//!     seed::SystemPolicy,
//! };
//! use encore_types::PrincipalId;
//!
//! // A principal holding only DENY_ROLLBACK statements.
//! let statements = SystemPolicy::DenyRollback
//!     .build()
//!     .expect("catalogue is valid")
//!     .statements()
//!     .to_vec();
//! let ctx = PrincipalContext::new(PrincipalId::new()).with_statements(statements);
//!
//! let decision = PolicyEvaluator::decide(
//!     &ctx,
//!     Action::Rollback,
//!     ResourceType::Song,
//!     &ResourceAttributes::new(),
//! );
//! assert_eq!(decision, Decision::Deny);
//! ```

pub mod action;
pub mod condition;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod group;
pub mod policy;
pub mod repository;
pub mod role;
pub mod seed;
pub mod statement;

pub use action::{Action, Effect, ResourceType};
pub use condition::{
    AttrValue, Condition, ConditionClause, ConditionKey, ConditionOperator, ConditionValue,
    PrincipalAttribute,
};
pub use context::{PrincipalContext, ResourceAttributes};
pub use error::PolicyError;
pub use evaluator::{Decision, PolicyEvaluator};
pub use group::PrincipalGroup;
pub use policy::Policy;
pub use repository::{
    PolicyRepository, PrincipalGroupRepository, PrincipalLinkage, PrincipalRepository,
    RepositoryError, RoleRepository, TalentRepository,
};
pub use role::Role;
pub use statement::Statement;
