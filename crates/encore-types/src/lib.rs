//! Core types for the Encore platform.
//!
//! This crate provides the foundational identifier and identity types
//! for Encore, a content-wiki and monetization platform for music
//! agencies and talents. Only the authorization core lives in this
//! workspace; CRUD over wiki entities is a separate concern.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Model Layer                             │
//! │  (Pure value types and trait seams, no I/O)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  encore-types   : ID types, Principal, ErrorCode  ◄── HERE  │
//! │  encore-policy  : Statements, Policies, PolicyEvaluator     │
//! │  encore-event   : Affiliation events, EventHandler trait    │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Runtime Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  encore-grant   : affiliation grant lifecycle handlers      │
//! │  encore-runtime : stores, context resolver, seed bootstrap  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier Design
//!
//! All identifiers are UUID-based:
//!
//! - **Instance identifiers**: random v4, unique per aggregate
//! - **Seeded identifiers**: deterministic v5 from the catalogue name,
//!   so system policies and roles have stable identities everywhere
//!
//! # Example
//!
//! ```
//! use encore_types::{Principal, IdentityId, PolicyId};
//!
//! let actor = Principal::new(IdentityId::new());
//! let policy = PolicyId::seeded("FULL_ACCESS");
//!
//! assert_eq!(policy, PolicyId::seeded("FULL_ACCESS"));
//! println!("{} may be checked against {}", actor.id(), policy);
//! ```

pub mod error;
pub mod id;
pub mod principal;

pub use error::ErrorCode;
pub use id::{
    AccountId, AffiliationId, AgencyId, IdentityId, PolicyId, PrincipalGroupId, PrincipalId,
    RoleId, SongId, TalentId, WikiGroupId,
};
pub use principal::Principal;
