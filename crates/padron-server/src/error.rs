//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Wraps the registry error and
/// maps it onto an HTTP status.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] padron_core::Error);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use padron_core::Error;

    let (status, message) = match &self.0 {
      Error::Validation { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
      Error::DuplicateIdentification(_) => {
        (StatusCode::CONFLICT, self.0.to_string())
      }
      Error::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
      // Internal failures never leak detail to the client; the full
      // error goes to the log instead.
      Error::Geography(_)
      | Error::Decode { .. }
      | Error::Store(_)
      | Error::PartialWrite { .. } => {
        tracing::error!(error = %self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
