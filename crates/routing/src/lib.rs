//! Resolve which model each agent should use.
//!
//! Resolution cascade (precedence):
//! 1. User preference (`userSelected`, tier access re-validated per call)
//! 2. Oracle default (the catalog's curated per-agent assignment)
//! 3. Hardcoded per-tier fallback
//!
//! `resolve` is total: it always returns a usable model, even with a
//! missing or corrupt catalog — chat must continue regardless.

pub mod fallback;
pub mod resolve;

pub use {
    fallback::{Fallback, fallback_for},
    resolve::{ModelResolver, ResolutionResult, ResolutionSource},
};
