use thiserror::Error;

/// Publishing is total for validated inputs; the only publisher-visible
/// failure is a draft that fails validation. Malformed events are rejected
/// here, synchronously — they never reach the transcript or subscribers.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("invalid {kind} event: {reason}")]
    InvalidEvent {
        kind: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, PublishError>;
