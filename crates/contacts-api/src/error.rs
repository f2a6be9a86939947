//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::{multipart::MultipartError, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use contacts_core::store::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("malformed body: {0}")]
  Body(#[from] JsonRejection),

  #[error("malformed upload: {0}")]
  Multipart(#[from] MultipartError),

  #[error("validation failed: {}", .0.join(", "))]
  Validation(Vec<String>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a store error, keeping not-found distinct from backend failures.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    match e.not_found() {
      Some(id) => Self::NotFound(format!("person {id} not found")),
      None => Self::Store(Box::new(e)),
    }
  }
}

impl From<contacts_core::Error> for ApiError {
  fn from(e: contacts_core::Error) -> Self {
    match e {
      contacts_core::Error::Validation(messages) => Self::Validation(messages),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Body(e) => {
        let reason = e.body_text();
        (
          StatusCode::BAD_REQUEST,
          Json(json!({ "error": "invalid request body", "details": [reason] })),
        )
          .into_response()
      }
      ApiError::Multipart(e) => {
        (e.status(), Json(json!({ "error": e.body_text() }))).into_response()
      }
      ApiError::Validation(details) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "validation failed", "details": details })),
      )
        .into_response(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": e.to_string() })),
        )
          .into_response()
      }
    }
  }
}
