//! Session transcripts: the bounded, append-only record of bus events.
//!
//! One transcript per chat session, owned exclusively by the delegation
//! bus. Consumers reconcile fetched batches with [`merge::merge_events`],
//! which is idempotent by construction — polling and push delivery can be
//! used concurrently against the same session without duplicates or
//! reordering.

pub mod event;
pub mod merge;
pub mod transcript;

pub use {
    event::{BusEvent, EventDraft, EventKind},
    merge::merge_events,
    transcript::{DEFAULT_WINDOW, Transcript},
};
