//! The import pipeline: read every row, validate it, persist only a clean
//! batch.

use contacts_core::{
  person::{NewPerson, Person},
  store::PersonStore,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
  columns::ColumnMap,
  error::{ReadError, Result},
  parse::Candidate,
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// What an import reports back to its caller. Every failure mode ends up
/// here; [`import`] never returns an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
  pub success:   bool,
  pub message:   String,
  /// Rows that passed validation, in file order. Still populated when other
  /// rows failed, even though nothing was stored.
  pub accepted:  Vec<NewPerson>,
  /// Records written to the store. Empty unless `success`.
  pub persisted: Vec<Person>,
}

impl ImportOutcome {
  fn rejected(message: impl Into<String>) -> Self {
    Self {
      success:   false,
      message:   message.into(),
      accepted:  Vec::new(),
      persisted: Vec::new(),
    }
  }
}

// ─── Reading ─────────────────────────────────────────────────────────────────

/// Per-row result of parsing and validation.
#[derive(Debug, PartialEq, Eq)]
enum RowResult {
  Accepted(NewPerson),
  Rejected(String),
}

/// Every row of a file, sorted into accepted records and row error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
  pub accepted: Vec<NewPerson>,
  /// `"Row {n}: ..."` messages, in file order.
  pub errors:   Vec<String>,
}

/// Parse and validate every data row of `input`.
///
/// Rows are numbered from 2 so the header is row 1. Only failures that make
/// the whole file unreadable are returned as errors.
pub fn read_batch(input: &[u8]) -> Result<Batch> {
  let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
  let text = std::str::from_utf8(input)?;

  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(text.as_bytes());

  let columns = ColumnMap::from_headers(reader.headers()?);

  let mut batch = Batch::default();
  for (index, record) in reader.records().enumerate() {
    let row = index + 2;
    match classify(row, record, &columns) {
      RowResult::Accepted(person) => {
        debug!(row, "row accepted");
        batch.accepted.push(person);
      }
      RowResult::Rejected(message) => {
        debug!(row, %message, "row rejected");
        batch.errors.push(message);
      }
    }
  }

  Ok(batch)
}

/// Turn one read result into an accepted record or a row error message.
///
/// Over decoded in-memory text with flexible row lengths the reader only
/// fails a record on I/O-class errors; those still cost just the one row.
fn classify(
  row: usize,
  record: csv::Result<csv::StringRecord>,
  columns: &ColumnMap,
) -> RowResult {
  let record = match record {
    Ok(record) => record,
    Err(e) => {
      return RowResult::Rejected(format!(
        "Row {row}: Error processing row - {e}"
      ));
    }
  };
  match Candidate::from_raw(&columns.extract(&record)).accept() {
    Ok(person) => RowResult::Accepted(person),
    Err(violations) => {
      let reasons: Vec<String> =
        violations.iter().map(ToString::to_string).collect();
      RowResult::Rejected(format!("Row {row}: {}", reasons.join(", ")))
    }
  }
}

// ─── Import ──────────────────────────────────────────────────────────────────

/// Import the people described by the CSV file `filename` into `store`.
///
/// Nothing is stored unless every row is valid: one bad row blocks the whole
/// file, though the rows that did pass are still listed in
/// [`ImportOutcome::accepted`]. A clean batch is stored one record at a time
/// with no surrounding transaction, so a store failure part-way leaves the
/// earlier records in place.
pub async fn import<S: PersonStore>(
  store: &S,
  filename: &str,
  input: &[u8],
) -> ImportOutcome {
  if input.is_empty() {
    warn!(filename, "import rejected: empty upload");
    return ImportOutcome::rejected("No file was uploaded.");
  }
  if !filename.to_ascii_lowercase().ends_with(".csv") {
    warn!(filename, "import rejected: not a CSV file");
    return ImportOutcome::rejected("Only CSV files are allowed.");
  }

  let batch = match read_batch(input) {
    Ok(batch) => batch,
    Err(e) => return read_failure(filename, &e),
  };

  if !batch.errors.is_empty() {
    info!(
      filename,
      accepted = batch.accepted.len(),
      rejected = batch.errors.len(),
      "import finished with row errors; nothing stored"
    );
    return ImportOutcome {
      success:   false,
      message:   format!(
        "CSV processing completed with errors:\n{}",
        batch.errors.join("\n")
      ),
      accepted:  batch.accepted,
      persisted: Vec::new(),
    };
  }

  let mut persisted = Vec::with_capacity(batch.accepted.len());
  for person in &batch.accepted {
    match store.create(person.clone()).await {
      Ok(stored) => persisted.push(stored),
      Err(e) => {
        warn!(
          filename,
          stored = persisted.len(),
          error = %e,
          "import aborted while storing records"
        );
        return ImportOutcome::rejected(format!("Error processing CSV file: {e}"));
      }
    }
  }

  info!(filename, count = persisted.len(), "import stored all records");
  ImportOutcome {
    success: true,
    message: format!(
      "Successfully processed {} records from CSV file.",
      persisted.len()
    ),
    accepted: batch.accepted,
    persisted,
  }
}

fn read_failure(filename: &str, e: &ReadError) -> ImportOutcome {
  warn!(filename, error = %e, "import aborted: file unreadable");
  ImportOutcome::rejected(format!("Error processing CSV file: {e}"))
}

#[cfg(test)]
mod tests {
  use contacts_core::store::PersonStore;
  use contacts_store_sqlite::SqliteStore;
  use rust_decimal::Decimal;

  use super::*;

  const HEADER: &str = "Name,DateOfBirth,Married,Phone,Salary\n";

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory()
      .await
      .expect("in-memory store")
  }

  fn csv(rows: &[&str]) -> Vec<u8> {
    let mut out = HEADER.to_owned();
    for row in rows {
      out.push_str(row);
      out.push('\n');
    }
    out.into_bytes()
  }

  // ── Preconditions ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_upload_is_rejected() {
    let s = store().await;
    let outcome = import(&s, "people.csv", b"").await;
    assert_eq!(outcome, ImportOutcome::rejected("No file was uploaded."));
  }

  #[tokio::test]
  async fn non_csv_extension_is_rejected_before_reading() {
    let s = store().await;
    let input = csv(&["Ann,1990-01-01,yes,555,10"]);
    let outcome = import(&s, "people.txt", &input).await;
    assert_eq!(outcome, ImportOutcome::rejected("Only CSV files are allowed."));
    assert_eq!(s.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn extension_check_ignores_case() {
    let s = store().await;
    let outcome = import(&s, "PEOPLE.CSV", &csv(&["Ann,1990-01-01,yes,555,10"])).await;
    assert!(outcome.success, "{}", outcome.message);
  }

  // ── Clean batches ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn all_valid_rows_are_stored() {
    let s = store().await;
    let input = csv(&[
      "Ann,1990-01-01,yes,555-0001,1000.50",
      "Bob,02/03/1985,no,555-0002,0",
      "Cy,1970-12-31,,555-0003,",
    ]);

    let outcome = import(&s, "people.csv", &input).await;

    assert!(outcome.success);
    assert_eq!(outcome.message, "Successfully processed 3 records from CSV file.");
    assert_eq!(outcome.accepted.len(), 3);
    assert_eq!(outcome.persisted.len(), 3);
    assert_eq!(s.count().await.unwrap(), 3);

    let names: Vec<_> = outcome.persisted.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ann", "Bob", "Cy"]);
    assert!(outcome.persisted[0].married);
    assert_eq!(outcome.persisted[0].salary, Decimal::new(100_050, 2));
    assert_eq!(outcome.persisted[2].salary, Decimal::ZERO);
  }

  #[tokio::test]
  async fn header_only_file_succeeds_with_zero_records() {
    let s = store().await;
    let outcome = import(&s, "people.csv", HEADER.as_bytes()).await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Successfully processed 0 records from CSV file.");
  }

  #[tokio::test]
  async fn bom_and_loose_headers_are_handled() {
    let s = store().await;
    let input = b"\xEF\xBB\xBFphone,name,date_of_birth\n555,Dee,1999-09-09\n";
    let outcome = import(&s, "people.csv", input).await;
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.persisted[0].name, "Dee");
    assert_eq!(outcome.persisted[0].phone, "555");
  }

  // ── Row errors ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn one_bad_row_blocks_the_whole_file() {
    let s = store().await;
    let input = csv(&[
      "Ann,1990-01-01,yes,555-0001,100",
      "Bob,not a date,no,555-0002,100",
      "Cy,1970-12-31,no,555-0003,100",
    ]);

    let outcome = import(&s, "people.csv", &input).await;

    assert!(!outcome.success);
    assert_eq!(
      outcome.message,
      "CSV processing completed with errors:\nRow 3: Valid date of birth is required"
    );
    assert_eq!(outcome.accepted.len(), 2);
    assert!(outcome.persisted.is_empty());
    assert_eq!(s.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn row_errors_are_joined_in_file_order() {
    let s = store().await;
    let input = csv(&[
      ",,,,-5",
      "Ann,1990-01-01,yes,555-0001,100",
      "Bob,1990-01-01,no,,1",
    ]);

    let outcome = import(&s, "people.csv", &input).await;

    assert!(!outcome.success);
    assert_eq!(
      outcome.message,
      "CSV processing completed with errors:\n\
       Row 2: Name is required, Valid date of birth is required, Phone is required, \
       Salary must be non-negative\n\
       Row 4: Phone is required"
    );
    assert_eq!(outcome.accepted.len(), 1);
    assert_eq!(outcome.accepted[0].name, "Ann");
  }

  #[test]
  fn short_rows_are_treated_as_missing_fields() {
    let batch = read_batch(csv(&["Ann,1990-01-01"]).as_slice()).unwrap();
    assert!(batch.accepted.is_empty());
    assert_eq!(batch.errors, ["Row 2: Phone is required"]);
  }

  #[test]
  fn unreadable_record_becomes_a_row_error() {
    let columns =
      ColumnMap::from_headers(&csv::StringRecord::from(vec!["Name", "Phone"]));
    let failure = csv::Error::from(std::io::Error::other("disk went away"));
    assert_eq!(
      classify(7, Err(failure), &columns),
      RowResult::Rejected("Row 7: Error processing row - disk went away".into())
    );
  }

  #[test]
  fn classify_joins_violations_for_one_row() {
    let columns =
      ColumnMap::from_headers(&csv::StringRecord::from(vec!["Name", "Phone"]));
    let record = csv::StringRecord::from(vec!["", ""]);
    assert_eq!(
      classify(3, Ok(record), &columns),
      RowResult::Rejected(
        "Row 3: Name is required, Valid date of birth is required, Phone is required"
          .into()
      )
    );
  }

  // ── Whole-file failures ──────────────────────────────────────────────────

  #[tokio::test]
  async fn invalid_utf8_aborts_the_import() {
    let s = store().await;
    let outcome = import(&s, "people.csv", b"Name,Phone\n\xFF\xFE,555\n").await;
    assert!(!outcome.success);
    assert!(
      outcome.message.starts_with("Error processing CSV file: "),
      "{}",
      outcome.message
    );
    assert!(outcome.accepted.is_empty());
    assert_eq!(s.count().await.unwrap(), 0);
  }

  #[test]
  fn read_batch_reports_encoding_errors() {
    assert!(matches!(
      read_batch(b"\xC3\x28"),
      Err(ReadError::Encoding(_))
    ));
  }
}
