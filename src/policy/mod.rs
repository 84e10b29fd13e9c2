//! Cache eviction policies.
//!
//! | Policy                          | Eviction basis                              |
//! |---------------------------------|---------------------------------------------|
//! | [`generational`]                | Whole-generation rotation, promotion on hit |

pub mod generational;
