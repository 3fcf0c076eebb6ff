//! `{ "data": ... }` request and response envelopes.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;

/// The `data` object of a JSON request body.
///
/// A missing or non-object `data` member yields an empty map so that the
/// resource validators report the first missing field. So does a request
/// that is not declared as JSON or has an empty body. A JSON request whose
/// body does not parse is a bad request.
#[derive(Debug, Clone, Default)]
pub struct Payload(pub Map<String, Value>);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(Self::default());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        if bytes.is_empty() {
            return Ok(Self::default());
        }

        let Json(body) = Json::<Value>::from_bytes(&bytes)
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        Ok(Self::from_body(body))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}

impl Payload {
    /// Unwrap the `data` member of an already decoded body.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut envelope) => match envelope.remove("data") {
                Some(Value::Object(data)) => Self(data),
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }
}

/// Successful response body wrapped as `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for Data<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
