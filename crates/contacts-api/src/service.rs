//! [`ContactService`] — the boundary between HTTP handlers and the domain.
//!
//! CRUD calls go straight to the [`PersonStore`]; imports go to
//! [`contacts_csv::import`].

use std::sync::Arc;

use contacts_core::{
  person::{NewPerson, Person, PersonId},
  store::PersonStore,
};
use contacts_csv::ImportOutcome;

pub struct ContactService<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: PersonStore> ContactService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Everyone, newest first.
  pub async fn list_people(&self) -> Result<Vec<Person>, S::Error> {
    self.store.list_all().await
  }

  pub async fn get_person(&self, id: PersonId) -> Result<Option<Person>, S::Error> {
    self.store.get(id).await
  }

  pub async fn count_people(&self) -> Result<u64, S::Error> {
    self.store.count().await
  }

  pub async fn create_person(&self, input: NewPerson) -> Result<Person, S::Error> {
    self.store.create(input).await
  }

  pub async fn update_person(
    &self,
    id: PersonId,
    input: NewPerson,
  ) -> Result<Person, S::Error> {
    self.store.update(id, input).await
  }

  /// Idempotent; deleting an unknown id succeeds.
  pub async fn delete_person(&self, id: PersonId) -> Result<(), S::Error> {
    if !self.store.exists(id).await? {
      tracing::debug!(id, "delete of unknown person ignored");
      return Ok(());
    }
    self.store.delete(id).await
  }

  pub async fn import_file(&self, filename: &str, input: &[u8]) -> ImportOutcome {
    contacts_csv::import(self.store.as_ref(), filename, input).await
  }
}
