//! Error type shared by the clients and the sync pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Network error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{service} HTTP {status}: {message}")]
  Api { service: &'static str, status: u16, message: String },

  #[error("GraphQL error: {0}")]
  GraphQl(String),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Question not found: {0}")]
  QuestionNotFound(String),

  #[error("Invalid frontend id {0:?}")]
  InvalidFrontendId(String),

  #[error("Invalid level {0:?}")]
  InvalidLevel(String),
}
