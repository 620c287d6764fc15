//! Sort ordering for cell values.

use std::cmp::Ordering;

use crate::column::ColumnKind;
use crate::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The other direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Comparable projection of a cell.
///
/// Variants are ranked in declaration order when kinds are mixed.
#[derive(Debug, PartialEq, PartialOrd)]
enum SortKey {
    Bool(bool),
    Number(f64),
    Time(i64),
    Text(String),
}

fn sort_key(value: &CellValue, kind: ColumnKind) -> Option<SortKey> {
    if value.is_null() {
        return None;
    }
    let text = || SortKey::Text(value.to_string().to_lowercase());
    let key = match kind {
        ColumnKind::Number => value.as_number().map(SortKey::Number).unwrap_or_else(text),
        ColumnKind::Date => value
            .as_timestamp()
            .map(|dt| SortKey::Time(dt.timestamp_millis()))
            .unwrap_or_else(text),
        ColumnKind::Text | ColumnKind::Boolean => match value {
            CellValue::Bool(b) => SortKey::Bool(*b),
            CellValue::Int(i) => SortKey::Number(*i as f64),
            CellValue::Float(f) => SortKey::Number(*f),
            CellValue::Date(_) | CellValue::DateTime(_) => value
                .as_timestamp()
                .map(|dt| SortKey::Time(dt.timestamp_millis()))
                .unwrap_or_else(text),
            _ => text(),
        },
    };
    Some(key)
}

/// Compare two cells for sorting.
///
/// Strings compare case-insensitively, numbers numerically and dates by
/// timestamp. `Null` sorts last in both directions.
pub fn compare_cells(
    a: &CellValue,
    b: &CellValue,
    kind: ColumnKind,
    direction: SortDirection,
) -> Ordering {
    match (sort_key(a, kind), sort_key(b, kind)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(ka), Some(kb)) => {
            let ord = ka.partial_cmp(&kb).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_case_insensitive() {
        let a = CellValue::from("apple");
        let b = CellValue::from("Banana");
        assert_eq!(compare_cells(&a, &b, ColumnKind::Text, SortDirection::Asc), Ordering::Less);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let a = CellValue::Int(9);
        let b = CellValue::Int(10);
        assert_eq!(compare_cells(&a, &b, ColumnKind::Text, SortDirection::Asc), Ordering::Less);
        let a = CellValue::from("9");
        let b = CellValue::from("10");
        assert_eq!(compare_cells(&a, &b, ColumnKind::Number, SortDirection::Asc), Ordering::Less);
    }

    #[test]
    fn test_null_last_in_both_directions() {
        let null = CellValue::Null;
        let v = CellValue::Int(1);
        assert_eq!(compare_cells(&null, &v, ColumnKind::Number, SortDirection::Asc), Ordering::Greater);
        assert_eq!(compare_cells(&null, &v, ColumnKind::Number, SortDirection::Desc), Ordering::Greater);
    }

    #[test]
    fn test_dates_by_timestamp() {
        let a = CellValue::from("2024-01-02");
        let b = CellValue::from("2023-12-31T23:00:00Z");
        assert_eq!(compare_cells(&a, &b, ColumnKind::Date, SortDirection::Asc), Ordering::Greater);
    }
}
