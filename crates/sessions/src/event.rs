use serde::{Deserialize, Serialize};

/// What an event on the delegation bus means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// Agent-authored content directed at the user.
    Message,
    /// Agent delegates `content.task` to `content.toAgentId`.
    Handoff,
    /// Agent reports finishing `content.taskId`.
    Complete,
}

/// One event on the delegation bus.
///
/// Identity is the per-session monotonic `seq` assigned at publish time;
/// the wire id is `"bus-<seq>"`. `timestamp_ms` is kept for display and as
/// the primary ordering key, with `seq` breaking same-millisecond ties —
/// two events in the same millisecond can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusEvent {
    pub session_id: String,
    pub seq: u64,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: u64,
    pub agent_id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub content: serde_json::Value,
}

impl BusEvent {
    /// Wire identity used for client-side deduplication.
    #[must_use]
    pub fn id(&self) -> String {
        format!("bus-{}", self.seq)
    }

    /// Sort key: timestamp first, sequence number as tie-break.
    #[must_use]
    pub fn order_key(&self) -> (u64, u64) {
        (self.timestamp_ms, self.seq)
    }
}

/// A not-yet-published event: everything but the bus-assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub agent_id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub content: serde_json::Value,
}

impl EventDraft {
    #[must_use]
    pub fn new(agent_id: impl Into<String>, kind: EventKind, content: serde_json::Value) -> Self {
        Self {
            agent_id: agent_id.into(),
            kind,
            content,
        }
    }

    /// A `MESSAGE` draft with plain text content.
    #[must_use]
    pub fn message(agent_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            agent_id,
            EventKind::Message,
            serde_json::json!({ "text": text.into() }),
        )
    }

    /// A `HANDOFF` draft delegating `task` to `to_agent_id`.
    #[must_use]
    pub fn handoff(
        agent_id: impl Into<String>,
        to_agent_id: impl Into<String>,
        task: impl Into<String>,
    ) -> Self {
        Self::new(
            agent_id,
            EventKind::Handoff,
            serde_json::json!({ "toAgentId": to_agent_id.into(), "task": task.into() }),
        )
    }

    /// A `COMPLETE` draft marking `task_id` finished.
    #[must_use]
    pub fn complete(agent_id: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self::new(
            agent_id,
            EventKind::Complete,
            serde_json::json!({ "taskId": task_id.into() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let event = BusEvent {
            session_id: "s1".into(),
            seq: 7,
            timestamp_ms: 1700000000000,
            agent_id: "it".into(),
            kind: EventKind::Handoff,
            content: serde_json::json!({ "toAgentId": "hanna", "task": "logo" }),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["sessionId"], "s1");
        assert_eq!(json["timestamp"], 1700000000000u64);
        assert_eq!(json["type"], "HANDOFF");
        assert_eq!(json["content"]["toAgentId"], "hanna");
    }

    #[test]
    fn test_id_scheme() {
        let event = BusEvent {
            session_id: "s1".into(),
            seq: 3,
            timestamp_ms: 1,
            agent_id: "mei".into(),
            kind: EventKind::Message,
            content: serde_json::Value::Null,
        };
        assert_eq!(event.id(), "bus-3");
    }

    #[test]
    fn test_draft_constructors() {
        let draft = EventDraft::handoff("it", "hanna", "logo");
        assert_eq!(draft.kind, EventKind::Handoff);
        assert_eq!(draft.content["toAgentId"], "hanna");
        assert_eq!(draft.content["task"], "logo");

        let draft = EventDraft::complete("hanna", "logo");
        assert_eq!(draft.content["taskId"], "logo");
    }
}
