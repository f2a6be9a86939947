//! Row validation for imported records.

use contacts_core::person::NewPerson;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::parse::Candidate;

/// A rule an imported row broke. The display text is what ends up in the
/// import report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
  #[error("Name is required")]
  NameRequired,
  #[error("Valid date of birth is required")]
  DateOfBirthRequired,
  #[error("Phone is required")]
  PhoneRequired,
  #[error("Salary must be non-negative")]
  NegativeSalary,
}

/// Check every rule and return all violations in rule order. An empty list
/// means the candidate is valid.
pub fn validate(candidate: &Candidate) -> Vec<Violation> {
  let mut violations = Vec::new();

  if candidate.name.trim().is_empty() {
    violations.push(Violation::NameRequired);
  }
  if candidate.date_of_birth.is_none() {
    violations.push(Violation::DateOfBirthRequired);
  }
  if candidate.phone.trim().is_empty() {
    violations.push(Violation::PhoneRequired);
  }
  if candidate.salary < Decimal::ZERO {
    violations.push(Violation::NegativeSalary);
  }

  violations
}

impl Candidate {
  /// Validate and, if clean, turn the candidate into a record ready to store.
  pub fn accept(self) -> Result<NewPerson, Vec<Violation>> {
    let violations = validate(&self);
    match self.date_of_birth {
      Some(date_of_birth) if violations.is_empty() => Ok(NewPerson {
        name: self.name,
        date_of_birth,
        married: self.married,
        phone: self.phone,
        salary: self.salary,
      }),
      _ => Err(violations),
    }
  }
}
