use std::collections::HashSet;

use crate::event::BusEvent;

/// Reconcile a fetched batch of events into an existing local view.
///
/// The algorithm every consumer runs, whether the batch came from a poll of
/// the transcript endpoint or from buffered push frames:
/// 1. skip any event whose identity (`seq`) is already present,
/// 2. sort the union ascending by `(timestamp, seq)`.
///
/// Idempotent: merging the same batch any number of times yields the same
/// ordered sequence, so concurrent push + poll against one session renders
/// each event exactly once, in order.
#[must_use]
pub fn merge_events(existing: &[BusEvent], batch: &[BusEvent]) -> Vec<BusEvent> {
    let mut seen: HashSet<u64> = existing.iter().map(|e| e.seq).collect();
    let mut merged: Vec<BusEvent> = existing.to_vec();

    for event in batch {
        if seen.insert(event.seq) {
            merged.push(event.clone());
        }
    }

    merged.sort_by_key(BusEvent::order_key);
    merged
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::event::{EventDraft, EventKind},
    };

    fn event(seq: u64, timestamp_ms: u64) -> BusEvent {
        let draft = EventDraft::message("mei", "hi");
        BusEvent {
            session_id: "s1".into(),
            seq,
            timestamp_ms,
            agent_id: draft.agent_id,
            kind: EventKind::Message,
            content: draft.content,
        }
    }

    #[test]
    fn test_merge_into_empty() {
        let batch = vec![event(1, 200), event(0, 100)];
        let merged = merge_events(&[], &batch);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].seq, 0);
        assert_eq!(merged[1].seq, 1);
    }

    #[test]
    fn test_merge_skips_duplicates() {
        let existing = vec![event(0, 100)];
        let batch = vec![event(0, 100), event(1, 200)];
        let merged = merge_events(&existing, &batch);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let batch = vec![event(2, 300), event(0, 100), event(1, 200)];
        let once = merge_events(&[], &batch);
        let twice = merge_events(&once, &batch);
        let thrice = merge_events(&twice, &batch);
        assert_eq!(once, twice);
        assert_eq!(twice, thrice);
    }

    #[test]
    fn test_same_millisecond_ordered_by_seq() {
        // Two agents publishing within the same millisecond: the per-session
        // sequence number keeps the order total and stable.
        let batch = vec![event(5, 100), event(4, 100)];
        let merged = merge_events(&[], &batch);
        assert_eq!(merged[0].seq, 4);
        assert_eq!(merged[1].seq, 5);
    }

    #[test]
    fn test_overlapping_polls_converge() {
        // Poll A saw events 0-1, poll B saw events 1-2; merging both in
        // either order yields the same final view.
        let poll_a = vec![event(0, 100), event(1, 200)];
        let poll_b = vec![event(1, 200), event(2, 300)];

        let ab = merge_events(&merge_events(&[], &poll_a), &poll_b);
        let ba = merge_events(&merge_events(&[], &poll_b), &poll_a);
        assert_eq!(ab, ba);
        assert_eq!(ab.iter().map(|e| e.seq).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
