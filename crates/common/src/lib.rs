//! Shared types, error definitions, and utilities used across all troupe crates.

pub mod error;
pub mod tier;

pub use {
    error::{Error, Result, TroupeError},
    tier::Tier,
};
