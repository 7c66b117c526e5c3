//! Affiliation grant lifecycle for the Encore platform.
//!
//! When a business affiliation between an agency account and a talent
//! account is **activated**, this crate synthesizes a scoped
//! PrincipalGroup + Policy + Role per affiliation side and records an
//! [`AffiliationGrant`] as the reverse index. When the affiliation is
//! **terminated**, it finds the recorded grants and reverses the
//! provisioning exactly.
//!
//! ```text
//! AffiliationActivated ──► GrantLifecycle ──► PrincipalGroup + Policy + Role
//!                                             + AffiliationGrant record
//! AffiliationTerminated ─► GrantLifecycle ──► delete Role → Policy → Group
//!                                             → grant record
//! ```
//!
//! # Guarantees
//!
//! - **Idempotent**: at-least-once delivery is absorbed; at most one
//!   grant exists per `(affiliation, side)`.
//! - **No privilege leakage**: teardown deletes the role first, so a
//!   crash mid-revocation leaves access already revoked.
//! - **System objects protected**: seeded policies/roles and default
//!   groups are never deleted, even via a bad grant reference.

pub mod error;
pub mod grant;
pub mod lifecycle;
pub mod naming;
pub mod repository;

pub use error::GrantError;
pub use grant::{AffiliationGrant, GrantSide};
pub use lifecycle::{GrantLifecycle, GrantStores};
pub use naming::GrantNaming;
pub use repository::{AffiliationGrantRepository, GrantUnitOfWork};
