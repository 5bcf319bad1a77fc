use std::collections::VecDeque;

use crate::event::BusEvent;

/// Default number of recent events retained per session.
pub const DEFAULT_WINDOW: usize = 50;

/// Bounded, append-only record of bus events for one session.
///
/// Oldest events are dropped first once the window is exceeded. Events are
/// appended in publish order, which the bus guarantees is a valid total
/// order (per-session serialization + monotonic `seq`).
#[derive(Debug)]
pub struct Transcript {
    events: VecDeque<BusEvent>,
    window: usize,
}

impl Transcript {
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(window.min(DEFAULT_WINDOW)),
            window: window.max(1),
        }
    }

    /// Append an event, evicting the oldest if the window is full.
    pub fn push(&mut self, event: BusEvent) {
        if self.events.len() >= self.window {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// The current window, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BusEvent> {
        self.events.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
