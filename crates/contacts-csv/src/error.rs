//! Error type for whole-file read failures.
//!
//! Row-level problems are never errors; they become row messages inside
//! [`crate::ImportOutcome`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
  #[error("file is not valid UTF-8: {0}")]
  Encoding(#[from] std::str::Utf8Error),

  #[error("{0}")]
  Csv(#[from] csv::Error),
}

pub type Result<T, E = ReadError> = std::result::Result<T, E>;
