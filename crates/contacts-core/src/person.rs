//! Person — the sole entity of the contact manager.
//!
//! [`Person`] is the persisted shape, with gateway-assigned identity and
//! timestamps. [`NewPerson`] carries only the mutable fields and is the input
//! to both creation and full-record update.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Store-assigned integer identifier. Never reused.
pub type PersonId = i64;

/// Maximum length of [`NewPerson::name`], in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of [`NewPerson::phone`], in characters.
pub const PHONE_MAX_LEN: usize = 20;

// ─── Person ──────────────────────────────────────────────────────────────────

/// A stored contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:            PersonId,
  pub name:          String,
  pub date_of_birth: NaiveDate,
  pub married:       bool,
  pub phone:         String,
  /// Fixed-point, two fractional digits once persisted.
  pub salary:        Decimal,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:    DateTime<Utc>,
  /// Refreshed on every update; `None` until the first one.
  pub updated_at:    Option<DateTime<Utc>>,
}

impl Person {
  /// The mutable fields of this record.
  pub fn fields(&self) -> NewPerson {
    NewPerson {
      name:          self.name.clone(),
      date_of_birth: self.date_of_birth,
      married:       self.married,
      phone:         self.phone.clone(),
      salary:        self.salary,
    }
  }
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::PersonStore::create`] and
/// [`crate::store::PersonStore::update`].
///
/// `id`, `created_at` and `updated_at` are always set by the store; they are
/// not accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
  pub name:          String,
  pub date_of_birth: NaiveDate,
  #[serde(default)]
  pub married:       bool,
  pub phone:         String,
  pub salary:        Decimal,
}

impl NewPerson {
  /// Field-level checks applied to records entered directly by a caller.
  ///
  /// All violations are collected. Bulk imports go through their own row
  /// validator and do not call this.
  pub fn check(&self) -> Result<()> {
    let errors = self.violations();
    if errors.is_empty() {
      Ok(())
    } else {
      Err(Error::Validation(errors))
    }
  }

  fn violations(&self) -> Vec<String> {
    let mut errors = Vec::new();

    if self.name.trim().is_empty() {
      errors.push("Name is required".to_owned());
    } else if self.name.chars().count() > NAME_MAX_LEN {
      errors.push(format!("Name must be at most {NAME_MAX_LEN} characters"));
    }

    if self.phone.trim().is_empty() {
      errors.push("Phone is required".to_owned());
    } else if self.phone.chars().count() > PHONE_MAX_LEN {
      errors.push(format!("Phone must be at most {PHONE_MAX_LEN} characters"));
    } else if !looks_like_phone(&self.phone) {
      errors.push("Phone is not a valid phone number".to_owned());
    }

    if self.salary < Decimal::ZERO {
      errors.push("Salary must be non-negative".to_owned());
    }

    errors
  }
}

// ─── PersonDraft ─────────────────────────────────────────────────────────────

/// A caller-supplied body for create or update, before any checks.
///
/// Every field may be absent so that a missing field is reported alongside
/// the other field errors instead of failing deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDraft {
  pub name:          Option<String>,
  pub date_of_birth: Option<NaiveDate>,
  pub married:       Option<bool>,
  pub phone:         Option<String>,
  pub salary:        Option<Decimal>,
}

impl PersonDraft {
  /// Fill in the record and run [`NewPerson::check`]. Missing name or phone
  /// read as empty; a missing date of birth or salary is its own error.
  pub fn into_new_person(self) -> Result<NewPerson> {
    let mut errors = Vec::new();
    if self.date_of_birth.is_none() {
      errors.push("Date of birth is required".to_owned());
    }
    if self.salary.is_none() {
      errors.push("Salary is required".to_owned());
    }

    let person = NewPerson {
      name:          self.name.unwrap_or_default(),
      date_of_birth: self.date_of_birth.unwrap_or_default(),
      married:       self.married.unwrap_or(false),
      phone:         self.phone.unwrap_or_default(),
      salary:        self.salary.unwrap_or_default(),
    };

    let mut all = person.violations();
    all.append(&mut errors);
    if all.is_empty() {
      Ok(person)
    } else {
      Err(Error::Validation(all))
    }
  }
}

/// Loose phone-number shape: at least one digit, otherwise only separators,
/// a leading `+`, and an `x`/`ext` extension marker.
fn looks_like_phone(s: &str) -> bool {
  let lowered = s.trim().to_ascii_lowercase();
  let body = lowered.replace("ext", "x");
  body.chars().any(|c| c.is_ascii_digit())
    && body.chars().all(|c| {
      c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.' | 'x')
    })
}
