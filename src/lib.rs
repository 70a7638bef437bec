//! cachehash: bounded, recency-ordered key/value cache with eviction
//! callbacks.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod cache;
pub mod ds;
pub mod error;
pub mod prelude;
pub mod traits;
