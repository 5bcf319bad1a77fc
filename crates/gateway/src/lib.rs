//! HTTP gateway: push (SSE) and pull (poll) access to session event
//! streams, plus the model resolution API.
//!
//! Endpoints:
//! - `GET  /api/health` — liveness probe
//! - `GET  /api/sessions/{id}/events` — SSE stream: transcript backlog,
//!   then live bus events, with comment-only heartbeats
//! - `GET  /api/sessions/{id}/transcript` — current transcript window
//! - `POST /api/sessions/{id}/events` — publish (orchestrator doorway)
//! - `GET  /api/models?tier=...` — models the tier can access
//! - `GET  /api/agents/{id}/model?tier=...` — resolve an agent's model

pub mod events;
pub mod models;
pub mod server;
pub mod state;

pub use {
    server::{build_app, start_gateway},
    state::AppState,
};
