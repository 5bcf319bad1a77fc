use std::convert::Infallible;

use {
    axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
        response::{
            IntoResponse, Response,
            sse::{Event, KeepAlive, Sse},
        },
    },
    futures::stream::Stream,
    tokio_stream::{
        StreamExt,
        wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
    },
    tracing::{debug, warn},
    troupe_sessions::{BusEvent, EventDraft},
};

use crate::state::AppState;

/// SSE push channel for one session.
///
/// Replays the transcript backlog, then relays every subsequent bus event
/// as a JSON data frame. Comment-only heartbeats keep idle connections
/// alive. Dropping the response (client disconnect) drops the broadcast
/// receiver with it — nothing to unsubscribe, nothing leaks, and the bus
/// and its other subscribers are unaffected.
pub async fn session_events(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let sub = state.bus.subscribe(&session_id);
    debug!(
        session_id,
        backlog = sub.backlog.len(),
        "sse subscriber connected"
    );

    let backlog = tokio_stream::iter(sub.backlog).map(|event| sse_frame(&event));
    let live = BroadcastStream::new(sub.receiver).filter_map(move |item| match item {
        Ok(event) => Some(sse_frame(&event)),
        Err(BroadcastStreamRecvError::Lagged(missed)) => {
            // The subscriber can recover the window via the poll endpoint.
            warn!(session_id, missed, "sse subscriber lagged, events dropped");
            None
        },
    });

    let stream = backlog.chain(live).map(Ok::<_, Infallible>);
    Sse::new(stream).keep_alive(KeepAlive::new().interval(state.heartbeat).text("keep-alive"))
}

fn sse_frame(event: &BusEvent) -> Event {
    match serde_json::to_string(event) {
        Ok(json) => Event::default().id(event.id()).data(json),
        Err(e) => {
            warn!(seq = event.seq, error = %e, "failed to serialize bus event");
            Event::default().comment("serialization failure")
        },
    }
}

/// Polling fallback: the current transcript window, oldest first.
pub async fn session_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Vec<BusEvent>> {
    Json(state.bus.transcript(&session_id))
}

/// Publish doorway for the chat orchestrator.
///
/// Validates the draft; an invalid `HANDOFF`/`COMPLETE` is a 400 to the
/// publisher and never reaches subscribers.
pub async fn publish_event(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(draft): Json<EventDraft>,
) -> Response {
    match state.bus.publish(&session_id, draft) {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
