use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::payload::{Payload, lenient_string};
use crate::llm::RouteError;
use crate::response;
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AiRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: Option<String>,
}

/// POST /api/ai
pub async fn ask_ai(State(state): State<AppState>, Payload(req): Payload<AiRequest>) -> Response {
    let Some(prompt) = req.prompt.as_deref().filter(|p| !p.is_empty()) else {
        return response::bad_request("Missing prompt").into_response();
    };

    match state.router.route(prompt, req.model.as_deref()).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(RouteError::NoProviders) => response::service_unavailable(
            "No AI key configured. Set GROQ_API_KEY or OPENAI_API_KEY.",
        )
        .into_response(),
        Err(RouteError::Upstream { source, .. }) => {
            response::internal_error("AI backend error", source.to_string()).into_response()
        }
    }
}
