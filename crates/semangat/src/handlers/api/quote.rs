use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: &'static str,
}

/// GET /api/quote
pub async fn random_quote(State(state): State<AppState>) -> Json<QuoteResponse> {
    let quote = state.quotes.pick(&mut rand::rng());
    Json(QuoteResponse { quote })
}
