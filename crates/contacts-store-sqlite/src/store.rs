//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::{path::Path, sync::Arc};

use chrono::SubsecRound as _;
use contacts_core::{
  clock::{Clock, SystemClock},
  person::{NewPerson, Person, PersonId},
  store::PersonStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{
    PERSON_COLUMNS, RawPerson, encode_date, encode_dt, encode_salary,
    normalize_salary,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection and clock are reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:  tokio_rusqlite::Connection,
  clock: Arc<dyn Clock>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  /// Replace the time source used for `created_at` / `updated_at`.
  pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
    self.clock = Arc::new(clock);
    self
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn, clock: Arc::new(SystemClock) })
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn list_all(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM people ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn get(&self, id: PersonId) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
              rusqlite::params![id],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn create(&self, input: NewPerson) -> Result<Person> {
    // Stored timestamps keep microseconds; match what a later read returns.
    let created_at = self.clock.now().trunc_subsecs(6);
    let salary = normalize_salary(input.salary);

    let dob_str    = encode_date(input.date_of_birth);
    let salary_str = encode_salary(salary);
    let at_str     = encode_dt(created_at);
    let name       = input.name.clone();
    let phone      = input.phone.clone();
    let married    = input.married;

    let id: PersonId = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (name, date_of_birth, married, phone, salary, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![name, dob_str, married, phone, salary_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, "created person");

    Ok(Person {
      id,
      name: input.name,
      date_of_birth: input.date_of_birth,
      married: input.married,
      phone: input.phone,
      salary,
      created_at,
      updated_at: None,
    })
  }

  async fn update(&self, id: PersonId, input: NewPerson) -> Result<Person> {
    let dob_str    = encode_date(input.date_of_birth);
    let salary_str = encode_salary(input.salary);
    let at_str     = encode_dt(self.clock.now());

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE people
           SET name = ?1, date_of_birth = ?2, married = ?3, phone = ?4,
               salary = ?5, updated_at = ?6
           WHERE id = ?7",
          rusqlite::params![
            input.name,
            dob_str,
            input.married,
            input.phone,
            salary_str,
            at_str,
            id,
          ],
        )?;

        if changed == 0 {
          return Ok(None);
        }

        Ok(Some(conn.query_row(
          &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
          rusqlite::params![id],
          RawPerson::from_row,
        )?))
      })
      .await?;

    let person = raw.ok_or(Error::PersonNotFound(id))?.into_person()?;
    tracing::debug!(id, "updated person");
    Ok(person)
  }

  async fn delete(&self, id: PersonId) -> Result<()> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if removed > 0 {
      tracing::debug!(id, "deleted person");
    }
    Ok(())
  }

  async fn exists(&self, id: PersonId) -> Result<bool> {
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM people WHERE id = ?1",
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(found)
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM people", [], |r| r.get(0))?)
      })
      .await?;
    Ok(u64::try_from(n).unwrap_or_default())
  }
}
