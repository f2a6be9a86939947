//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that lexical
//! order matches chronological order. Dates are `YYYY-MM-DD`. Salaries are
//! decimal strings with exactly two fractional digits.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use contacts_core::person::Person;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Salary ──────────────────────────────────────────────────────────────────

/// Round to the stored precision (two fractional digits, half away from
/// zero) and pad so `1250` becomes `1250.00`.
pub fn normalize_salary(d: Decimal) -> Decimal {
  let mut rounded =
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
  rounded.rescale(2);
  rounded
}

pub fn encode_salary(d: Decimal) -> String { normalize_salary(d).to_string() }

pub fn decode_salary(s: &str) -> Result<Decimal> {
  Ok(s.parse::<Decimal>()?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column list matching [`RawPerson::from_row`].
pub const PERSON_COLUMNS: &str =
  "id, name, date_of_birth, married, phone, salary, created_at, updated_at";

/// Raw values read directly from a `people` row.
pub struct RawPerson {
  pub id:            i64,
  pub name:          String,
  pub date_of_birth: String,
  pub married:       bool,
  pub phone:         String,
  pub salary:        String,
  pub created_at:    String,
  pub updated_at:    Option<String>,
}

impl RawPerson {
  /// Read a row selected with [`PERSON_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      name:          row.get(1)?,
      date_of_birth: row.get(2)?,
      married:       row.get(3)?,
      phone:         row.get(4)?,
      salary:        row.get(5)?,
      created_at:    row.get(6)?,
      updated_at:    row.get(7)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:            self.id,
      name:          self.name,
      date_of_birth: decode_date(&self.date_of_birth)?,
      married:       self.married,
      phone:         self.phone,
      salary:        decode_salary(&self.salary)?,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    self.updated_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}
