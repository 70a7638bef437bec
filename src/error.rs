//! Error types for the cachehash library.
//!
//! The cache itself has no recoverable error taxonomy: operations report
//! absence through `Option` and `bool`, never through error values. The
//! only error type here is [`InvariantError`], produced by the diagnostic
//! `check_invariants` methods so tests can inspect a violation as a value
//! instead of unwinding.

use std::fmt;

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`CacheHash::check_invariants`](crate::cache::CacheHash::check_invariants).
/// Carries a human-readable description of which invariant failed. Hitting
/// this in practice indicates a bug in the cache, not bad caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
