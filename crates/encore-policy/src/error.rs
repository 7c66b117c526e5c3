//! Policy construction errors.
//!
//! These are configuration errors: they surface when a policy is
//! *built*, never while a request is being evaluated. An invalid
//! statement or condition is a programming or seeding mistake, and the
//! caller creating the policy must fail loudly rather than persist an
//! object whose meaning is undefined.

use encore_types::ErrorCode;
use thiserror::Error;

/// Error raised while constructing policy objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// A statement was given an empty action set.
    #[error("statement requires at least one action")]
    EmptyActions,

    /// A statement was given an empty resource-type set.
    #[error("statement requires at least one resource type")]
    EmptyResourceTypes,

    /// A condition was given an empty clause list. An empty
    /// conjunction is vacuously true and would silently widen access.
    #[error("condition requires at least one clause")]
    EmptyCondition,
}

impl ErrorCode for PolicyError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyActions => "POLICY_EMPTY_ACTIONS",
            Self::EmptyResourceTypes => "POLICY_EMPTY_RESOURCE_TYPES",
            Self::EmptyCondition => "POLICY_EMPTY_CONDITION",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Construction errors require a code or seed-data fix.
        false
    }
}
