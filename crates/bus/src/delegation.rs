use std::sync::Mutex;

use {
    dashmap::DashMap,
    tokio::sync::broadcast,
    tracing::debug,
    troupe_sessions::{BusEvent, EventDraft, EventKind, Transcript},
};

use crate::error::{PublishError, Result};

/// Fan-out channel capacity per session. A receiver that lags this far
/// behind misses events (it still has the transcript window to recover from).
const SUBSCRIBER_BUFFER: usize = 256;

/// What a new subscriber gets: the retained backlog plus a live receiver.
pub struct Subscription {
    pub backlog: Vec<BusEvent>,
    pub receiver: broadcast::Receiver<BusEvent>,
}

struct SessionChannel {
    transcript: Transcript,
    next_seq: u64,
    tx: broadcast::Sender<BusEvent>,
}

impl SessionChannel {
    fn new(window: usize) -> Self {
        let (tx, _) = broadcast::channel(SUBSCRIBER_BUFFER);
        Self {
            transcript: Transcript::new(window),
            next_seq: 0,
            tx,
        }
    }
}

/// Single-process, in-memory delegation bus.
///
/// Per-session state sits behind a mutex so that two agents publishing to
/// the same session "simultaneously" are serialized: transcript order is a
/// valid total order consistent with publish call order, with the monotonic
/// `seq` making that order explicit even when wall-clock timestamps tie.
pub struct DelegationBus {
    sessions: DashMap<String, Mutex<SessionChannel>>,
    window: usize,
}

impl DelegationBus {
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            window,
        }
    }

    /// Validate and publish a draft to a session.
    ///
    /// Appends to the transcript and notifies all live subscribers before
    /// returning. Total for validated drafts; invalid `HANDOFF`/`COMPLETE`
    /// drafts are rejected to the publisher and never reach subscribers.
    pub fn publish(&self, session_id: &str, draft: EventDraft) -> Result<BusEvent> {
        validate_draft(&draft)?;

        let entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Mutex::new(SessionChannel::new(self.window)));
        let mut channel = lock(&entry);

        let event = BusEvent {
            session_id: session_id.to_string(),
            seq: channel.next_seq,
            timestamp_ms: now_ms(),
            agent_id: draft.agent_id,
            kind: draft.kind,
            content: draft.content,
        };
        channel.next_seq += 1;
        channel.transcript.push(event.clone());

        // Fan out; Err only means no live subscribers, which is fine.
        let delivered = channel.tx.send(event.clone()).unwrap_or(0);
        debug!(
            session_id,
            seq = event.seq,
            kind = ?event.kind,
            agent_id = %event.agent_id,
            subscribers = delivered,
            "published bus event"
        );

        Ok(event)
    }

    /// Subscribe to a session: current backlog plus all future events.
    #[must_use]
    pub fn subscribe(&self, session_id: &str) -> Subscription {
        let entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Mutex::new(SessionChannel::new(self.window)));
        let channel = lock(&entry);
        Subscription {
            backlog: channel.transcript.snapshot(),
            receiver: channel.tx.subscribe(),
        }
    }

    /// The current transcript window for a session, oldest first.
    ///
    /// Sessions nobody has published to yield an empty transcript.
    #[must_use]
    pub fn transcript(&self, session_id: &str) -> Vec<BusEvent> {
        self.sessions
            .get(session_id)
            .map(|entry| lock(&entry).transcript.snapshot())
            .unwrap_or_default()
    }
}

/// Lock a session channel, recovering from a poisoned mutex — the state is
/// a plain ring buffer and counter, valid regardless of a panicked holder.
fn lock(mutex: &Mutex<SessionChannel>) -> std::sync::MutexGuard<'_, SessionChannel> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn validate_draft(draft: &EventDraft) -> Result<()> {
    if draft.agent_id.trim().is_empty() {
        return Err(PublishError::InvalidEvent {
            kind: "bus",
            reason: "agentId must not be empty",
        });
    }
    match draft.kind {
        EventKind::Message => Ok(()),
        EventKind::Handoff => {
            require_string(&draft.content, "toAgentId", "HANDOFF")?;
            require_string(&draft.content, "task", "HANDOFF")
        },
        EventKind::Complete => require_string(&draft.content, "taskId", "COMPLETE"),
    }
}

fn require_string(
    content: &serde_json::Value,
    field: &'static str,
    kind: &'static str,
) -> Result<()> {
    match content.get(field).and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PublishError::InvalidEvent {
            kind,
            reason: match field {
                "toAgentId" => "missing content.toAgentId",
                "task" => "missing content.task",
                _ => "missing content.taskId",
            },
        }),
    }
}
