//! Inline cell editing types.
//!
//! A commit runs in three phases so that the async edit handler never runs
//! while the table is borrowed:
//!
//! 1. [`DataTable::begin_commit`](crate::DataTable::begin_commit) compares the
//!    normalized values and locks the cell, returning a [`PendingEdit`].
//! 2. The handler runs against the row snapshot in the pending edit.
//! 3. [`DataTable::finish_commit`](crate::DataTable::finish_commit) unlocks the
//!    cell and either writes the value or reverts.

use crate::column::ColumnKind;
use crate::value::{CellValue, parse_date, parse_number};

/// Address of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row_id: String,
    pub field: String,
}

impl CellRef {
    pub fn new(row_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            field: field.into(),
        }
    }
}

/// Input control used by the cell editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Date,
}

impl From<ColumnKind> for InputKind {
    fn from(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Number => InputKind::Number,
            ColumnKind::Date => InputKind::Date,
            ColumnKind::Text | ColumnKind::Boolean => InputKind::Text,
        }
    }
}

/// The open cell editor.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEditor {
    pub cell: CellRef,
    pub input: InputKind,
    /// Value the input starts with.
    pub initial: String,
    /// Raw value of the cell when the editor opened.
    pub original: CellValue,
}

/// An accepted commit waiting for the edit handler.
#[derive(Debug, Clone)]
pub struct PendingEdit<R> {
    /// Row as it was when the commit started.
    pub row: R,
    pub cell: CellRef,
    pub new_value: CellValue,
    pub old_value: CellValue,
}

impl<R> PendingEdit<R> {
    pub fn field(&self) -> &str {
        &self.cell.field
    }
}

/// Result of the first commit phase.
#[derive(Debug, Clone)]
pub enum CommitStep<R> {
    /// The value did not change. No handler call is needed.
    Unchanged,
    /// The cell is locked until the pending edit is finished.
    Pending(PendingEdit<R>),
}

/// Final result of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    /// The new value was written into the row.
    Committed,
    /// The handler rejected or failed. The row kept its old value.
    Reverted { reason: String },
    /// The handler accepted, but the row is no longer in the table.
    Stale,
}

impl EditOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, EditOutcome::Committed)
    }
}

/// Initial text of an editor for a value.
pub(crate) fn editor_text(value: &CellValue, kind: ColumnKind) -> String {
    match kind {
        ColumnKind::Date => value
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        _ => value.to_string(),
    }
}

/// Parse editor input for a column kind. Empty input clears the cell.
pub(crate) fn parse_input(input: &str, kind: ColumnKind) -> Result<CellValue, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(CellValue::Null);
    }
    match kind {
        ColumnKind::Number => {
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(CellValue::Int(i));
            }
            parse_number(trimmed)
                .map(CellValue::Float)
                .ok_or_else(|| format!("'{trimmed}' is not a number"))
        }
        ColumnKind::Date => parse_date(trimmed)
            .map(CellValue::Date)
            .ok_or_else(|| format!("'{trimmed}' is not a date")),
        ColumnKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Ok(CellValue::Bool(true)),
            "no" | "false" | "0" => Ok(CellValue::Bool(false)),
            _ => Err(format!("'{trimmed}' is not yes or no")),
        },
        ColumnKind::Text => Ok(CellValue::String(input.to_string())),
    }
}

/// Compare values after normalizing for the column kind.
///
/// Numbers compare as floats, dates as calendar dates, everything else by its
/// string form. `Null` equals the empty string.
pub(crate) fn normalized_eq(old: &CellValue, new: &CellValue, kind: ColumnKind) -> bool {
    if old.is_null() && new.is_null() {
        return true;
    }
    match kind {
        ColumnKind::Number => match (old.as_number(), new.as_number()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => old.to_string() == new.to_string(),
            _ => false,
        },
        ColumnKind::Date => match (old.as_date(), new.as_date()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => old.to_string() == new.to_string(),
            _ => false,
        },
        ColumnKind::Text | ColumnKind::Boolean => old.to_string() == new.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_number_normalization() {
        let old = CellValue::from("5");
        let new = parse_input("5.0", ColumnKind::Number).unwrap();
        assert!(normalized_eq(&old, &new, ColumnKind::Number));
        let new = parse_input("5,5", ColumnKind::Number).unwrap();
        assert!(!normalized_eq(&old, &new, ColumnKind::Number));
    }

    #[test]
    fn test_date_normalization() {
        let old = CellValue::from("2024-03-09T00:00:00Z");
        let new = parse_input("2024-03-09", ColumnKind::Date).unwrap();
        assert!(normalized_eq(&old, &new, ColumnKind::Date));
        assert_eq!(new, CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()));
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_input("abc", ColumnKind::Number).is_err());
        assert!(parse_input("32.13.2024", ColumnKind::Date).is_err());
        assert!(parse_input("maybe", ColumnKind::Boolean).is_err());
    }

    #[test]
    fn test_empty_input_clears() {
        assert_eq!(parse_input("  ", ColumnKind::Number), Ok(CellValue::Null));
        assert!(normalized_eq(&CellValue::Null, &CellValue::from(""), ColumnKind::Text));
    }

    #[test]
    fn test_editor_text_for_dates() {
        let value = CellValue::from("2024-03-09T10:00:00Z");
        assert_eq!(editor_text(&value, ColumnKind::Date), "2024-03-09");
    }
}
