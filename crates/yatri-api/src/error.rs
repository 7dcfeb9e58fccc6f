//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use yatri_core::Rejection;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The identity number failed validation; the reason goes to the user
  /// verbatim.
  #[error("{0}")]
  Invalid(Rejection),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("cipher error: {0}")]
  Cipher(#[from] yatri_cipher::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::Invalid(rejection) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": rejection.to_string(), "code": rejection.code() })),
      )
        .into_response(),
      ApiError::BadRequest(m) => error_body(StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => error_body(StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => error_body(StatusCode::CONFLICT, m.clone()),
      ApiError::Cipher(e) => error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Store(e) => error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
  }
}

fn error_body(status: StatusCode, message: String) -> Response {
  (status, Json(json!({ "error": message }))).into_response()
}
