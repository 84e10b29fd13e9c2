//! gencache: a bounded, thread-safe cache with two-generation approximate
//! LRU eviction.
//!
//! See [`policy::generational`] for the rotation and promotion protocol, and
//! `DESIGN.md` for how the pieces fit together.

pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
