//! Header-to-field mapping and per-record field extraction.

use csv::StringRecord;

/// The text of one record, split into the fields an import understands.
///
/// `None` means the header has no such column or the record is too short to
/// reach it. Values are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
  pub name:          Option<String>,
  pub date_of_birth: Option<String>,
  pub married:       Option<String>,
  pub phone:         Option<String>,
  pub salary:        Option<String>,
}

/// Column index of each known field, resolved once from the header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
  name:          Option<usize>,
  date_of_birth: Option<usize>,
  married:       Option<usize>,
  phone:         Option<usize>,
  salary:        Option<usize>,
}

impl ColumnMap {
  /// Match header names case-insensitively, ignoring spaces, `_` and `-`.
  /// Unknown columns are ignored; on duplicates the first column wins.
  pub fn from_headers(headers: &StringRecord) -> Self {
    let mut map = Self::default();
    for (index, header) in headers.iter().enumerate() {
      let slot = match normalize(header).as_str() {
        "name" => &mut map.name,
        "dateofbirth" => &mut map.date_of_birth,
        "married" => &mut map.married,
        "phone" => &mut map.phone,
        "salary" => &mut map.salary,
        _ => continue,
      };
      slot.get_or_insert(index);
    }
    map
  }

  pub fn extract(&self, record: &StringRecord) -> RawRow {
    let field = |index: Option<usize>| {
      index.and_then(|i| record.get(i)).map(str::to_owned)
    };
    RawRow {
      name:          field(self.name),
      date_of_birth: field(self.date_of_birth),
      married:       field(self.married),
      phone:         field(self.phone),
      salary:        field(self.salary),
    }
  }
}

fn normalize(header: &str) -> String {
  header
    .trim()
    .chars()
    .filter(|c| !matches!(c, ' ' | '_' | '-'))
    .flat_map(char::to_lowercase)
    .collect()
}
