use {
    axum::{Json, Router, routing::get},
    tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    },
    tracing::info,
    troupe_config::TroupeConfig,
};

use crate::{events, models, state::AppState};

/// Build the gateway router (shared between production startup and tests).
#[must_use]
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/sessions/{session_id}/events",
            get(events::session_events).post(events::publish_event),
        )
        .route(
            "/api/sessions/{session_id}/transcript",
            get(events::session_transcript),
        )
        .route("/api/models", get(models::list_models))
        .route("/api/agents/{agent_id}/model", get(models::resolve_model))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// Start the gateway HTTP server and serve until shutdown.
pub async fn start_gateway(config: &TroupeConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(config);
    let app = build_app(state);

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "troupe gateway listening");
    axum::serve(listener, app).await?;
    Ok(())
}
