//! Request body extraction shared by the handlers.

use super::error::ApiError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserializes a JSON or `application/x-www-form-urlencoded` body.
/// An empty body deserializes as `{}`.
pub struct JsonOrForm<T>(pub T);

fn is_form_request(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| {
            content_type.starts_with("application/x-www-form-urlencoded")
        })
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form_request(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            return Ok(JsonOrForm(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        serde_json::from_slice(raw)
            .map(JsonOrForm)
            .map_err(|err| ApiError::BadRequest(format!("Invalid request body: {}", err)))
    }
}

/// Presence check: a missing or empty field is a bad request.
pub fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::missing_field(field)),
    }
}

/// Drops empty optional strings.
pub fn optional(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Accepts a whole number of seconds sent either as a JSON number or as a
/// numeric string.
pub fn parse_duration(value: Option<Value>) -> Result<u32, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid duration".to_owned());
    match value {
        None | Some(Value::Null) => Err(ApiError::missing_field("duration")),
        Some(Value::String(text)) if text.is_empty() => Err(ApiError::missing_field("duration")),
        Some(Value::String(text)) => text.trim().parse::<u32>().map_err(|_| invalid()),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|seconds| u32::try_from(seconds).ok())
            .ok_or_else(invalid),
        Some(_) => Err(invalid()),
    }
}

/// Playlists are public unless the body carries the boolean `false`.
pub fn is_public_flag(value: Option<&Value>) -> bool {
    !matches!(value, Some(Value::Bool(false)))
}
