//! The `PersonStore` trait — the storage gateway for [`Person`] records.
//!
//! The trait is implemented by storage backends (e.g.
//! `contacts-store-sqlite`). Higher layers (`contacts-csv`, `contacts-api`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::person::{NewPerson, Person, PersonId};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Error bound for [`PersonStore::Error`].
///
/// Lets generic callers tell a missing record apart from a backend failure
/// without knowing the concrete error type.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The id of the person that was not found, if this is a not-found error.
  fn not_found(&self) -> Option<PersonId>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a person store backend.
///
/// The store owns identity and timestamps: `id` and `created_at` are assigned
/// by [`create`](Self::create), `updated_at` by [`update`](Self::update).
/// Each call is atomic on its own; nothing spans calls.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: StoreError;

  /// All people, newest `created_at` first.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Persist a new person and return it with `id` and `created_at` assigned.
  fn create(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Replace every mutable field of an existing person and refresh
  /// `updated_at`.
  ///
  /// Returns a not-found error (see [`StoreError::not_found`]) if `id` is
  /// unknown.
  fn update(
    &self,
    id: PersonId,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Delete a person. A missing id is not an error.
  fn delete(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn exists(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
