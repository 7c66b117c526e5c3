//! Unified error interface for Encore crates.
//!
//! This module provides the [`ErrorCode`] trait for standardized
//! error handling across all Encore crates.
//!
//! # Design
//!
//! All Encore error types implement [`ErrorCode`] to provide:
//!
//! - **Machine-readable codes**: for programmatic error handling
//! - **Recoverability info**: for retry logic and operator feedback
//!
//! # Example
//!
//! ```
//! use encore_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum StoreError {
//!     NotFound(String),
//!     Conflict,
//! }
//!
//! impl ErrorCode for StoreError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound(_) => "STORE_NOT_FOUND",
//!             Self::Conflict => "STORE_CONFLICT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Conflict)
//!     }
//! }
//!
//! let err = StoreError::Conflict;
//! assert_eq!(err.code(), "STORE_CONFLICT");
//! assert!(err.is_recoverable());
//! ```

/// Unified error code interface for Encore errors.
///
/// # Code Format
///
/// Error codes should be:
///
/// - **UPPER_SNAKE_CASE**: e.g., `"POLICY_EMPTY_CONDITION"`
/// - **Namespace-prefixed**: e.g., `"GRANT_"`, `"RESOLVE_"`, `"SEED_"`
/// - **Stable**: codes do not change once defined (API contract)
///
/// # Recoverability
///
/// An error is recoverable if retrying the operation may succeed or
/// the operator can take corrective action (transient conflicts,
/// missing-but-creatable data). Construction errors and dangling
/// references are not recoverable: they require a code or data fix.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    ///
    /// - `true`: retry may succeed, or the operator can intervene
    /// - `false`: retry will not help; requires a code/config change
    fn is_recoverable(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum SampleError {
        Transient,
        Permanent,
    }

    impl ErrorCode for SampleError {
        fn code(&self) -> &'static str {
            match self {
                Self::Transient => "SAMPLE_TRANSIENT",
                Self::Permanent => "SAMPLE_PERMANENT",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn codes_are_stable_strings() {
        assert_eq!(SampleError::Transient.code(), "SAMPLE_TRANSIENT");
        assert_eq!(SampleError::Permanent.code(), "SAMPLE_PERMANENT");
    }

    #[test]
    fn recoverability_follows_variant() {
        assert!(SampleError::Transient.is_recoverable());
        assert!(!SampleError::Permanent.is_recoverable());
    }
}
