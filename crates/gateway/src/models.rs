use {
    axum::{
        Json,
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    serde::Deserialize,
    troupe_common::Tier,
};

use crate::state::AppState;

/// The caller's current tier, supplied by the billing layer on every
/// request — never cached across a tier change.
#[derive(Debug, Deserialize)]
pub struct TierQuery {
    tier: String,
}

impl TierQuery {
    fn parse(&self) -> Result<Tier, Response> {
        self.tier.parse::<Tier>().map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        })
    }
}

/// Every model the caller's tier can access, stable-ordered.
pub async fn list_models(State(state): State<AppState>, Query(query): Query<TierQuery>) -> Response {
    let tier = match query.parse() {
        Ok(tier) => tier,
        Err(response) => return response,
    };
    Json(serde_json::json!({
        "models": state.resolver.list_available_models(tier),
    }))
    .into_response()
}

/// Resolve which model an agent should use for the caller's tier.
pub async fn resolve_model(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    Query(query): Query<TierQuery>,
) -> Response {
    let tier = match query.parse() {
        Ok(tier) => tier,
        Err(response) => return response,
    };
    Json(state.resolver.resolve(&agent_id, tier)).into_response()
}
