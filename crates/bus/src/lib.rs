//! The delegation bus: single-process pub/sub for agent collaboration.
//!
//! Any agent can publish `MESSAGE`, `HANDOFF`, and `COMPLETE` events to a
//! session. `publish` appends to that session's bounded transcript and fans
//! out to every live subscriber before returning; subscribers that join
//! later receive the transcript backlog plus future events.

pub mod delegation;
pub mod error;

pub use {
    delegation::{DelegationBus, Subscription},
    error::{PublishError, Result},
};
