//! # Error Handling
//!
//! This module provides the error taxonomy for the cryptography core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Domain validation                                                 │
//! │  │   └── InvalidParameters   - DH/curve parameter bundle fails a check  │
//! │  │                                                                      │
//! │  ├── Key validation                                                    │
//! │  │   └── InvalidKey          - public key fails range/subgroup/curve   │
//! │  │                                                                      │
//! │  ├── Kernel preconditions                                              │
//! │  │   ├── NoInverse           - modular inverse of a non-unit            │
//! │  │   └── ArithmeticError     - division by zero, negative exponent, …   │
//! │  │                                                                      │
//! │  ├── Bounded search                                                     │
//! │  │   └── GenerationFailure   - prime/parameter search exhausted         │
//! │  │                                                                      │
//! │  └── Wrapper-layer lookup                                              │
//! │      └── UnsupportedCurve    - curve name string has no known mapping  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation Policy
//!
//! Validation errors (`InvalidParameters`, `InvalidKey`) are never swallowed:
//! a caller receiving one of these from a session-establishing operation
//! MUST abort the session. `GenerationFailure` is non-fatal — callers MAY
//! retry the bounded search that produced it. `ArithmeticError` and
//! `NoInverse` indicate a programming error in the caller (an out-of-range
//! precondition) and should propagate unchanged rather than being caught
//! and retried.
//!
//! Every variant carries enough context (which invariant failed, which
//! value's bit length was wrong) to diagnose misuse without ever
//! interpolating secret material into a message string.

use thiserror::Error;

/// Result type alias for the cryptography core.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the arithmetic kernel and the DH/RSA/EC primitives
/// built on top of it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parameter bundle (DH parameters, curve descriptor) failed
    /// domain validation.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A public key failed validation (out of range, wrong subgroup,
    /// not on curve, or the identity element).
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A modular inverse was requested for a value that is not a unit
    /// modulo the given modulus (gcd(a, n) != 1).
    #[error("no modular inverse exists for the given modulus")]
    NoInverse,

    /// A kernel operation was called with a precondition violation:
    /// zero modulus, negative exponent, or similar misuse.
    #[error("arithmetic error: {0}")]
    ArithmeticError(String),

    /// A bounded retry search (prime generation, p = qn+1 search,
    /// generator search) exhausted its retry budget without success.
    #[error("generation failed after exhausting retry budget: {0}")]
    GenerationFailure(String),

    /// A curve name string did not match any known SECG curve or
    /// NIST alias.
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),
}

impl Error {
    /// Construct an [`Error::InvalidParameters`] with a formatted message.
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Error::InvalidParameters(msg.into())
    }

    /// Construct an [`Error::InvalidKey`] with a formatted message.
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Error::InvalidKey(msg.into())
    }

    /// Construct an [`Error::ArithmeticError`] with a formatted message.
    pub fn arithmetic(msg: impl Into<String>) -> Self {
        Error::ArithmeticError(msg.into())
    }

    /// Construct an [`Error::GenerationFailure`] with a formatted message.
    pub fn generation_failure(msg: impl Into<String>) -> Self {
        Error::GenerationFailure(msg.into())
    }

    /// Whether a caller may retry the operation that produced this error.
    ///
    /// Only bounded-search exhaustion is retryable; validation failures
    /// indicate a session that must be abandoned, and kernel errors
    /// indicate caller misuse.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::GenerationFailure(_))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(Error::generation_failure("exhausted 100 tries").is_retryable());
        assert!(!Error::invalid_params("q not prime").is_retryable());
        assert!(!Error::invalid_key("not on curve").is_retryable());
        assert!(!Error::NoInverse.is_retryable());
        assert!(!Error::arithmetic("zero modulus").is_retryable());
    }

    #[test]
    fn test_messages_carry_context_not_secrets() {
        let err = Error::invalid_key("y not in [2, p-1]");
        assert!(err.to_string().contains("y not in"));
    }
}
