//! Lenient field parsing: every field has a fallback, nothing here fails.
//!
//! Malformed values degrade to defaults and are left for the validator to
//! reject (an unset date) or accept (a `false` flag, a zero salary).

use std::str::FromStr;

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::columns::RawRow;

/// Two-digit-year layouts, tried before the four-digit ones so `1/2/99` is
/// 1999 rather than the year 99. `%y` maps 00-69 to 20xx and 70-99 to 19xx.
const SHORT_YEAR_FORMATS: &[&str] = &["%m/%d/%y", "%m-%d-%y", "%d.%m.%y"];

/// Date-only layouts, tried in order. Slash dates are month-first.
const DATE_FORMATS: &[&str] = &[
  "%Y-%m-%d",
  "%Y/%m/%d",
  "%m/%d/%Y",
  "%m-%d-%Y",
  "%d.%m.%Y",
  "%B %d, %Y",
  "%b %d, %Y",
  "%B %d %Y",
  "%b %d %Y",
  "%d %B %Y",
  "%d %b %Y",
];

/// Years below this are taken as truncated input, not real birth years.
const MIN_YEAR: i32 = 1000;

/// Date-and-time layouts; the time of day is discarded.
const DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
  "%m/%d/%Y %H:%M:%S",
  "%m/%d/%Y %I:%M:%S %p",
  "%m/%d/%Y %H:%M",
];

/// A parsed but not yet validated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
  pub name:          String,
  /// `None` when the source text was missing or unparseable.
  pub date_of_birth: Option<NaiveDate>,
  pub married:       bool,
  pub phone:         String,
  pub salary:        Decimal,
}

impl Candidate {
  pub fn from_raw(raw: &RawRow) -> Self {
    Self {
      name:          raw.name.clone().unwrap_or_default(),
      date_of_birth: parse_date(raw.date_of_birth.as_deref()),
      married:       parse_bool(raw.married.as_deref()),
      phone:         raw.phone.clone().unwrap_or_default(),
      salary:        parse_decimal(raw.salary.as_deref()),
    }
  }
}

/// Parse a calendar date from any of the supported layouts.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
  let value = value.map(str::trim).filter(|v| !v.is_empty())?;

  let date = SHORT_YEAR_FORMATS
    .iter()
    .chain(DATE_FORMATS)
    .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
    .or_else(|| {
      DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
    })
    .or_else(|| {
      DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .map(|dt| dt.date())
    })?;

  (date.year() >= MIN_YEAR).then_some(date)
}

/// `true`/`1`/`yes`/`y` are true, case-insensitively. Everything else,
/// including the explicit falsy spellings, is false.
pub fn parse_bool(value: Option<&str>) -> bool {
  let Some(value) = value.map(str::trim) else {
    return false;
  };
  match value.to_ascii_lowercase().as_str() {
    "true" | "1" | "yes" | "y" => true,
    "false" | "0" | "no" | "n" => false,
    _ => false,
  }
}

/// Culture-invariant decimal: optional sign, `.` as the decimal point, no
/// grouping separators. Scientific notation is accepted. Falls back to zero.
pub fn parse_decimal(value: Option<&str>) -> Decimal {
  let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
    return Decimal::ZERO;
  };
  if value.contains(',') {
    return Decimal::ZERO;
  }
  Decimal::from_str(value)
    .or_else(|_| Decimal::from_scientific(value))
    .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
  }

  // ── Dates ────────────────────────────────────────────────────────────────

  #[test]
  fn date_layouts() {
    assert_eq!(parse_date(Some("1990-03-15")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some("1990/03/15")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some("03/15/1990")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some("3/5/1990")), ymd(1990, 3, 5));
    assert_eq!(parse_date(Some("15.03.1990")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some("March 15, 1990")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some("15 Mar 1990")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some(" 1990-03-15 ")), ymd(1990, 3, 15));
  }

  #[test]
  fn two_digit_years_are_windowed() {
    assert_eq!(parse_date(Some("1/2/99")), ymd(1999, 1, 2));
    assert_eq!(parse_date(Some("12/31/05")), ymd(2005, 12, 31));
    assert_eq!(parse_date(Some("15.03.90")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some("1/2/1999")), ymd(1999, 1, 2));
  }

  #[test]
  fn truncated_years_are_unset() {
    assert_eq!(parse_date(Some("99-01-02")), None);
    assert_eq!(parse_date(Some("1/2/199")), None);
  }

  #[test]
  fn named_months_without_comma() {
    assert_eq!(parse_date(Some("Dec 31 1999")), ymd(1999, 12, 31));
    assert_eq!(parse_date(Some("December 31 1999")), ymd(1999, 12, 31));
  }

  #[test]
  fn datetimes_keep_only_the_date() {
    assert_eq!(parse_date(Some("1990-03-15T08:30:00")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some("1990-03-15T08:30:00Z")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some("1990-03-15 08:30")), ymd(1990, 3, 15));
    assert_eq!(parse_date(Some("03/15/1990 08:30:00")), ymd(1990, 3, 15));
  }

  #[test]
  fn bad_dates_are_unset() {
    assert_eq!(parse_date(None), None);
    assert_eq!(parse_date(Some("")), None);
    assert_eq!(parse_date(Some("   ")), None);
    assert_eq!(parse_date(Some("not a date")), None);
    assert_eq!(parse_date(Some("1990-02-30")), None);
    assert_eq!(parse_date(Some("15/15/1990")), None);
  }

  // ── Booleans ─────────────────────────────────────────────────────────────

  #[test]
  fn truthy_values() {
    for v in ["true", "TRUE", "1", "yes", "Yes", "y", "Y"] {
      assert!(parse_bool(Some(v)), "{v:?} should be true");
    }
  }

  #[test]
  fn everything_else_is_false() {
    for v in ["false", "0", "no", "N", "", "maybe", "2"] {
      assert!(!parse_bool(Some(v)), "{v:?} should be false");
    }
    assert!(!parse_bool(None));
  }

  // ── Decimals ─────────────────────────────────────────────────────────────

  #[test]
  fn decimal_values() {
    assert_eq!(parse_decimal(Some("1234.56")), Decimal::new(123_456, 2));
    assert_eq!(parse_decimal(Some("-50")), Decimal::new(-50, 0));
    assert_eq!(parse_decimal(Some("+7.25")), Decimal::new(725, 2));
    assert_eq!(parse_decimal(Some(" 42 ")), Decimal::new(42, 0));
    assert_eq!(parse_decimal(Some("1e3")), Decimal::new(1000, 0));
  }

  #[test]
  fn bad_decimals_are_zero() {
    assert_eq!(parse_decimal(None), Decimal::ZERO);
    assert_eq!(parse_decimal(Some("")), Decimal::ZERO);
    assert_eq!(parse_decimal(Some("lots")), Decimal::ZERO);
    assert_eq!(parse_decimal(Some("1,000")), Decimal::ZERO);
    assert_eq!(parse_decimal(Some("12.5.3")), Decimal::ZERO);
  }

  // ── Candidate ────────────────────────────────────────────────────────────

  #[test]
  fn missing_fields_fall_back_to_defaults() {
    let c = Candidate::from_raw(&RawRow::default());
    assert_eq!(c, Candidate {
      name:          String::new(),
      date_of_birth: None,
      married:       false,
      phone:         String::new(),
      salary:        Decimal::ZERO,
    });
  }

  #[test]
  fn text_fields_are_kept_as_is() {
    let c = Candidate::from_raw(&RawRow {
      name: Some(" Ann ".into()),
      phone: Some("(555) 010".into()),
      ..RawRow::default()
    });
    assert_eq!(c.name, " Ann ");
    assert_eq!(c.phone, "(555) 010");
  }
}
