use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::response::ErrorResponse;

/// Errors surfaced by the HTTP layer.
///
/// Rule evaluation itself never fails; the only failure is a request
/// body that does not decode into the expected transaction shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    MalformedRequestBody(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequestBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Renders an [`ApiError`] as `{"error": "..."}`.
#[derive(Debug)]
pub struct JsonError(pub ApiError);

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

/// Renders an [`ApiError`] as a plain text body.
#[derive(Debug)]
pub struct PlainTextError(pub ApiError);

impl IntoResponse for PlainTextError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.0.to_string(),
        )
            .into_response()
    }
}
