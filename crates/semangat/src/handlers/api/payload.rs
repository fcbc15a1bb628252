//! Lenient request body extraction for the `/api` POST handlers.
//!
//! Bodies are read as urlencoded forms or JSON depending on `Content-Type`.
//! A body that is absent or cannot be parsed yields `T::default()`, so the
//! handler reports the missing required field instead of a parser error.

use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use axum::{Form, Json};
use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Request body parsed from a form or JSON, defaulting when unreadable.
#[derive(Debug, Default)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let parsed = if is_form(req.headers()) {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|e| e.body_text())
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|e| e.body_text())
        };

        match parsed {
            Ok(body) => Ok(Payload(body)),
            Err(reason) => {
                debug!(reason, "Unreadable request body, using empty payload");
                Ok(Payload(T::default()))
            }
        }
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Deserialize any scalar as text, treating falsy values as absent.
///
/// `null`, `false`, `0` and absent fields give `None`; other numbers and
/// `true` are stringified; arrays and objects become their JSON text.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    })
}
