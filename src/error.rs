//! Error types for the gencache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when the cache is constructed with an invalid
//!   capacity.
//! - [`InvariantError`]: Returned when the generation invariants are violated
//!   (debug-only `check_invariants`).
//!
//! ## Example Usage
//!
//! ```
//! use gencache::error::ConfigError;
//! use gencache::policy::generational::GenerationalCache;
//!
//! let cache: Result<GenerationalCache<String, i32>, ConfigError> = GenerationalCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = GenerationalCache::<String, i32>::try_new(0);
//! assert_eq!(bad.unwrap_err(), ConfigError::InvalidCapacity { requested: 0 });
//! ```

use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`GenerationalCache::try_new`](crate::policy::generational::GenerationalCache::try_new).
/// The panicking constructor [`GenerationalCache::new`](crate::policy::generational::GenerationalCache::new)
/// uses the same message.
///
/// # Example
///
/// ```
/// use gencache::policy::generational::GenerationalCache;
///
/// let err = GenerationalCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested item count was below one.
    #[error("capacity must be at least 1, got {requested}")]
    InvalidCapacity {
        /// The capacity passed to the constructor.
        requested: usize,
    },
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by the debug-only
/// [`GenerationalCache::check_invariants`](crate::policy::generational::GenerationalCache::check_invariants).
/// Carries a human-readable description of which invariant failed.
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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_names_requested_capacity() {
        let err = ConfigError::InvalidCapacity { requested: 0 };
        assert_eq!(err.to_string(), "capacity must be at least 1, got 0");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::InvalidCapacity { requested: 0 };
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("fresh over half capacity");
        assert_eq!(err.to_string(), "fresh over half capacity");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("key in both generations");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("key in both generations"));
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
