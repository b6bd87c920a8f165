//! Reader for header-less `trial_id,start,end,label` tables.
//!
//! Cells are kept as raw text: type checking belongs to the validator, so a
//! malformed row still reaches it and produces a trial-specific diagnostic.

use std::path::Path;

use tracing::debug;

use crate::{EvalError, Result};

/// Cell values treated as missing, in addition to empty cells.
pub const NA_TOKENS: &[&str] = &[
  "NA", "N/A", "n/a", "#N/A", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>",
];

/// One row of an annotation table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntervalRecord {
  /// Empty when the trial id cell is missing
  pub trial_id: String,
  pub start: Option<String>,
  pub end: Option<String>,
  pub label: Option<String>,
}

impl IntervalRecord {
  pub fn new(trial_id: &str, start: &str, end: &str, label: &str) -> Self {
    Self {
      trial_id: cell(trial_id).unwrap_or_default(),
      start: cell(start),
      end: cell(end),
      label: cell(label),
    }
  }
}

/// Read and parse a table file.
pub fn read_table(path: &Path) -> Result<Vec<IntervalRecord>> {
  let bytes = std::fs::read(path)?;
  let text = String::from_utf8(bytes).map_err(|e| EvalError::Parse(format!("{}: {}", path.display(), e)))?;
  let records = parse_table(&text);
  debug!("Read {} rows from {}", records.len(), path.display());
  Ok(records)
}

/// Parse table text. A leading byte-order mark and blank lines are skipped,
/// columns past the fourth ignored.
pub fn parse_table(text: &str) -> Vec<IntervalRecord> {
  text
    .strip_prefix('\u{feff}')
    .unwrap_or(text)
    .lines()
    .filter(|line| !line.trim().is_empty())
    .map(parse_row)
    .collect()
}

fn parse_row(line: &str) -> IntervalRecord {
  let mut cells = split_cells(line).into_iter().map(cell);
  let mut next = || cells.next().flatten();
  IntervalRecord {
    trial_id: next().unwrap_or_default(),
    start: next(),
    end: next(),
    label: next(),
  }
}

/// Split on commas outside double quotes. Quotes stay in the cells.
fn split_cells(line: &str) -> Vec<&str> {
  let mut cells = Vec::new();
  let mut quoted = false;
  let mut from = 0;
  for (i, c) in line.char_indices() {
    match c {
      '"' => quoted = !quoted,
      ',' if !quoted => {
        cells.push(&line[from..i]);
        from = i + 1;
      }
      _ => {}
    }
  }
  cells.push(&line[from..]);
  cells
}

fn cell(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  let value = match trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
    Some(inner) => inner.replace("\"\"", "\""),
    None => trimmed.to_string(),
  };
  if value.is_empty() || NA_TOKENS.contains(&value.as_str()) {
    None
  } else {
    Some(value)
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_rows() {
    let records = parse_table("t1la,0,1.5,la_walk\nt1la,1.5,2.0,la_stand\n");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], IntervalRecord::new("t1la", "0", "1.5", "la_walk"));
    assert_eq!(records[1].start.as_deref(), Some("1.5"));
  }

  #[test]
  fn test_missing_cells() {
    let records = parse_table("t1la,0,,la_walk\nt1la,0,NaN,la_walk\nt1la,0\n");
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.end.is_none()));
    assert!(records[0].label.is_some());
    assert!(records[2].label.is_none());
  }

  #[test]
  fn test_blank_lines_and_extra_columns() {
    let records = parse_table("\r\nt1la, 0 ,1,\"la_walk\",extra\r\n\n   \n");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], IntervalRecord::new("t1la", "0", "1", "la_walk"));
  }

  #[test]
  fn test_quoted_comma_stays_in_cell() {
    let records = parse_table("s1_la,0,1,\"la,walk\"\ns1_la,1,2,\"la \"\"x\"\"\",extra\n");
    assert_eq!(records[0].label.as_deref(), Some("la,walk"));
    assert_eq!(records[1].label.as_deref(), Some("la \"x\""));
    assert_eq!(records[1].end.as_deref(), Some("2"));
  }

  #[test]
  fn test_byte_order_mark_skipped() {
    let records = parse_table("\u{feff}s1_la,0,1,la_walk\n");
    assert_eq!(records[0].trial_id, "s1_la");
  }

  #[test]
  fn test_missing_trial_id() {
    let records = parse_table(",0,1,la_walk\n");
    assert_eq!(records[0].trial_id, "");
  }

  #[test]
  fn test_read_table_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("labels.csv");
    std::fs::write(&path, "t1ra,0,1,ra_walk\n").unwrap();

    let records = read_table(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label.as_deref(), Some("ra_walk"));
  }

  #[test]
  fn test_read_table_with_byte_order_mark() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("labels.csv");
    std::fs::write(&path, "\u{feff}t1ra,0,1,ra_walk\nt1ra,1,2,ra_stand\n").unwrap();

    let records = read_table(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.trial_id == "t1ra"));
  }

  #[test]
  fn test_read_table_missing_file() {
    let err = read_table(Path::new("/nonexistent/labels.csv")).unwrap_err();
    assert!(matches!(err, EvalError::Io(_)));
  }

  #[test]
  fn test_read_table_invalid_utf8() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("labels.csv");
    std::fs::write(&path, [0x74, 0x31, 0x2c, 0xff, 0xfe]).unwrap();

    assert!(matches!(read_table(&path), Err(EvalError::Parse(_))));
  }
}
