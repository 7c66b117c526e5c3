//! Affiliation domain events for the Encore platform.
//!
//! This crate defines the events emitted when a business affiliation
//! between an agency account and a talent account changes state, and
//! the [`EventHandler`] trait through which the grant lifecycle
//! consumes them.
//!
//! # Data Flow
//!
//! ```text
//! Account/Affiliation context (external)
//!         │ AffiliationActivated / AffiliationTerminated
//!         ▼
//! event dispatch (external; owns retry/backoff)
//!         │ EventHandler::handle
//!         ▼
//! encore-grant (provisions / revokes scoped grants)
//! ```
//!
//! # Delivery Contract
//!
//! - **At-least-once**: handlers must be idempotent.
//! - **Causally ordered per affiliation**: an activation is delivered
//!   before its matching termination.
//! - **Parallel across affiliations**: no cross-affiliation locking is
//!   required; derived grant objects are disjoint.

pub mod event;
pub mod handler;

pub use event::{AffiliationActivated, AffiliationEvent, AffiliationTerminated};
pub use handler::EventHandler;
