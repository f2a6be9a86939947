//! JSON REST API for the contact manager.
//!
//! Exposes an axum [`Router`] backed by any [`PersonStore`]. TLS, body
//! limits and request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", contacts_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod people;
pub mod service;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use contacts_core::store::PersonStore;

pub use error::ApiError;
pub use service::ContactService;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route("/people/count", get(people::count::<S>))
    .route("/people/import", post(people::import::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .delete(people::delete_one::<S>),
    )
    .with_state(ContactService::new(store))
}

// ─── Integration tests ────────────────────────────────────────────────────────
