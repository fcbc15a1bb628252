use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::payload::{Payload, lenient_string};
use crate::response;
use crate::share;

#[derive(Debug, Default, Deserialize)]
pub struct ShareRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub share_url: String,
}

/// POST /api/social
pub async fn share_link(Payload(req): Payload<ShareRequest>) -> Response {
    let Some(platform) = req.platform.as_deref().filter(|p| !p.is_empty()) else {
        return response::bad_request("Missing platform").into_response();
    };

    let share_url = share::share_url(platform, req.text.as_deref(), req.url.as_deref());
    (StatusCode::OK, Json(ShareResponse { share_url })).into_response()
}
