//! Catalog Store: the read-only snapshot of available models.
//!
//! The catalog maps providers to model descriptors (tier requirement plus
//! capability flags) and carries the oracle's per-agent default model
//! assignments. The whole snapshot lives behind a single swappable `Arc`;
//! `reload` replaces it wholesale — there is no partial-update path and no
//! hidden process-wide mutability beyond that one reference swap.

pub mod store;
pub mod types;

pub use {
    store::{Catalog, CatalogStore},
    types::{Capabilities, ModelDescriptor, OracleDefault},
};
