//! CSV bulk import for the contact manager.
//!
//! Pipeline:
//!   filename + raw bytes
//!     └─ import()                 → precondition checks
//!          └─ read_batch()        → header mapping, one pass over records
//!               └─ RawRow         → named optional text fields per record
//!                    └─ Candidate → lenient field parsing, never fails
//!                         └─ validate() → accepted record or row error
//!
//! Persistence happens only when every row is accepted; see [`import`].

pub mod error;
mod columns;
mod import;
mod parse;
mod validate;

pub use columns::{ColumnMap, RawRow};
pub use error::{ReadError, Result};
pub use import::{Batch, ImportOutcome, import, read_batch};
pub use parse::{Candidate, parse_bool, parse_date, parse_decimal};
pub use validate::{Violation, validate};
