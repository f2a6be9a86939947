//! Error type for `contacts-store-sqlite`.

use contacts_core::{person::PersonId, store::StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("decimal parse error: {0}")]
  Decimal(#[from] rust_decimal::Error),

  /// Attempted to update a person that does not exist.
  #[error("person not found: {0}")]
  PersonNotFound(PersonId),
}

impl StoreError for Error {
  fn not_found(&self) -> Option<PersonId> {
    match self {
      Self::PersonNotFound(id) => Some(*id),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
