//! Affiliation lifecycle events.
//!
//! These events are emitted by the Account/Affiliation bounded
//! context (external) and consumed by the grant lifecycle. Delivery
//! is **at-least-once**: handlers must absorb duplicates.
//!
//! # Ordering
//!
//! Events for the *same* affiliation are delivered in causal order
//! (activation before its matching termination). Events for different
//! affiliations may be processed fully in parallel; their derived
//! grant objects are disjoint.

use encore_types::{AccountId, AffiliationId, AgencyId};
use serde::{Deserialize, Serialize};

/// An affiliation between an agency account and a talent account was
/// activated.
///
/// Carries the wiki [`AgencyId`] alongside the two account ids: the
/// talent-side grant scopes its statements to the agency's wiki
/// entity, and resolving account → agency is a wiki-domain lookup
/// that belongs to the emitting context, not to the grant handler.
///
/// # Example
///
/// ```
/// use encore_event::AffiliationActivated;
/// use encore_types::{AccountId, AffiliationId, AgencyId};
///
/// let event = AffiliationActivated::new(
///     AffiliationId::new(),
///     AccountId::new(),
///     AccountId::new(),
///     AgencyId::new(),
/// );
/// assert_ne!(event.agency_account_id, event.talent_account_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationActivated {
    /// The activated affiliation.
    pub affiliation_id: AffiliationId,
    /// The agency side of the relationship.
    pub agency_account_id: AccountId,
    /// The talent side of the relationship.
    pub talent_account_id: AccountId,
    /// The agency's wiki entity, used to scope talent-side statements.
    pub agency_id: AgencyId,
}

impl AffiliationActivated {
    /// Creates an activation event.
    #[must_use]
    pub fn new(
        affiliation_id: AffiliationId,
        agency_account_id: AccountId,
        talent_account_id: AccountId,
        agency_id: AgencyId,
    ) -> Self {
        Self {
            affiliation_id,
            agency_account_id,
            talent_account_id,
            agency_id,
        }
    }
}

/// A previously activated affiliation was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliationTerminated {
    /// The terminated affiliation.
    pub affiliation_id: AffiliationId,
}

impl AffiliationTerminated {
    /// Creates a termination event.
    #[must_use]
    pub fn new(affiliation_id: AffiliationId) -> Self {
        Self { affiliation_id }
    }
}

/// Sum of all affiliation lifecycle events, as delivered to handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AffiliationEvent {
    /// An affiliation became active.
    Activated(AffiliationActivated),
    /// An affiliation was terminated.
    Terminated(AffiliationTerminated),
}

impl AffiliationEvent {
    /// Returns the affiliation this event concerns.
    #[must_use]
    pub fn affiliation_id(&self) -> AffiliationId {
        match self {
            Self::Activated(e) => e.affiliation_id,
            Self::Terminated(e) => e.affiliation_id,
        }
    }

    /// Returns `true` for activation events.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Activated(_))
    }
}

impl From<AffiliationActivated> for AffiliationEvent {
    fn from(event: AffiliationActivated) -> Self {
        Self::Activated(event)
    }
}

impl From<AffiliationTerminated> for AffiliationEvent {
    fn from(event: AffiliationTerminated) -> Self {
        Self::Terminated(event)
    }
}
