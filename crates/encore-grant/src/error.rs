//! Grant lifecycle errors.

use encore_policy::{PolicyError, RepositoryError};
use encore_types::ErrorCode;
use thiserror::Error;

/// Error raised by the grant lifecycle handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrantError {
    /// Building a scoped statement or condition failed. Indicates a
    /// bug in the provisioning code, not bad input.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// A repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ErrorCode for GrantError {
    fn code(&self) -> &'static str {
        match self {
            Self::Policy(err) => err.code(),
            Self::Repository(err) => err.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Policy(err) => err.is_recoverable(),
            Self::Repository(err) => err.is_recoverable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_code_to_source() {
        let err = GrantError::from(PolicyError::EmptyCondition);
        assert_eq!(err.code(), "POLICY_EMPTY_CONDITION");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn repository_duplicates_stay_recoverable() {
        let err = GrantError::from(RepositoryError::Duplicate {
            entity: "grant",
            key: "x/talent_side".to_string(),
        });
        assert!(err.is_recoverable());
    }
}
