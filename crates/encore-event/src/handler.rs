//! The handler boundary consumed by the event-dispatch subsystem.

use crate::event::AffiliationEvent;
use async_trait::async_trait;

/// An asynchronous consumer of affiliation lifecycle events.
///
/// Implementations must be **idempotent**: delivery is at-least-once,
/// so handling the same event twice must leave the same state as
/// handling it once. Retry and backoff policy belongs to the dispatch
/// infrastructure, not to implementations; a handler that fails
/// simply returns its error.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use encore_event::{AffiliationEvent, EventHandler};
///
/// struct LoggingHandler;
///
/// #[async_trait]
/// impl EventHandler for LoggingHandler {
///     type Error = std::convert::Infallible;
///
///     async fn handle(&self, event: &AffiliationEvent) -> Result<(), Self::Error> {
///         println!("affiliation {} changed", event.affiliation_id());
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// The error this handler can fail with.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Processes one event.
    ///
    /// # Errors
    ///
    /// Returns the handler's error when processing fails; the dispatch
    /// layer decides whether to retry.
    async fn handle(&self, event: &AffiliationEvent) -> Result<(), Self::Error>;
}
