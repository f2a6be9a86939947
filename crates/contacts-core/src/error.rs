//! Error types for `contacts-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// One message per violated field rule, in field order.
  #[error("validation failed: {}", .0.join(", "))]
  Validation(Vec<String>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
