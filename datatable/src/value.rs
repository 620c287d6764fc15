//! Cell values read from rows.

use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use serde_json::Value;

/// A dynamic value held by one cell of a row.
///
/// Rows coming from the REST backend are JSON objects, so most values arrive
/// as `Int`, `Float`, `String`, `Bool` or `Null`. `Date` and `DateTime` are
/// produced by inline editing of date columns.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integral number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text value.
    String(String),
    /// Calendar date without time.
    Date(NaiveDate),
    /// Timestamp.
    DateTime(DateTime<Utc>),
    /// Nested arrays and objects.
    Json(Value),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Converts a JSON value into a cell value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Null),
            },
            Value::String(s) => CellValue::String(s.clone()),
            other => CellValue::Json(other.clone()),
        }
    }

    /// Converts this value into JSON for writing back into a row.
    ///
    /// Dates are written as `YYYY-MM-DD`, timestamps as RFC 3339.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Int(i) => Value::from(*i),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::String(s) => Value::String(s.clone()),
            CellValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            CellValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            CellValue::Json(v) => v.clone(),
        }
    }

    /// Interprets this value as a number.
    ///
    /// Strings are parsed, accepting a comma as decimal separator.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::String(s) => parse_number(s),
            _ => None,
        }
    }

    /// Interprets this value as a UTC timestamp.
    ///
    /// Integers are taken as milliseconds since the epoch, which is how the
    /// backend ships planning times.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            CellValue::Date(d) => d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
            CellValue::Int(ms) => DateTime::from_timestamp_millis(*ms),
            CellValue::String(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Interprets this value as a calendar date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::String(s) => parse_date(s),
            other => other.as_timestamp().map(|dt| dt.date_naive()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::String(s) => f.write_str(s),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            CellValue::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        CellValue::from_json(value)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::String(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::String(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

// =============================================================================
// Parsing helpers
// =============================================================================

/// Parses a number, accepting `,` as decimal separator when no `.` is present.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".").parse::<f64>()
    } else {
        trimmed.parse::<f64>()
    };
    parsed.ok().filter(|n| n.is_finite())
}

/// Parses the date formats the backend and the date inputs produce.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d.%m.%Y"))
        .ok()
        .or_else(|| parse_timestamp(trimmed).map(|dt| dt.date_naive()))
}

/// Parses RFC 3339 timestamps, naive ISO timestamps (taken as UTC) and plain dates.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d.%m.%Y"))
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(&json!(3)), CellValue::Int(3));
        assert_eq!(CellValue::from_json(&json!(2.5)), CellValue::Float(2.5));
        assert_eq!(
            CellValue::from_json(&json!("Bracket")),
            CellValue::String("Bracket".to_string())
        );
        assert!(matches!(CellValue::from_json(&json!([1, 2])), CellValue::Json(_)));
    }

    #[test]
    fn test_date_written_as_iso_string() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(CellValue::Date(date).to_json(), json!("2024-03-09"));
    }

    #[test]
    fn test_as_number_accepts_decimal_comma() {
        assert_eq!(CellValue::from("12,5").as_number(), Some(12.5));
        assert_eq!(CellValue::from("12.5").as_number(), Some(12.5));
        assert_eq!(CellValue::from("abc").as_number(), None);
        assert_eq!(CellValue::from("").as_number(), None);
    }

    #[test]
    fn test_as_date_from_timestamp_string() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(CellValue::from("2024-01-31T15:20:00Z").as_date(), Some(expected));
        assert_eq!(CellValue::from("2024-01-31").as_date(), Some(expected));
        assert_eq!(CellValue::from("31.01.2024").as_date(), Some(expected));
    }

    #[test]
    fn test_int_timestamp_is_millis() {
        let ts = CellValue::Int(86_400_000).as_timestamp().unwrap();
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(1970, 1, 2).unwrap());
    }

    #[test]
    fn test_null_displays_empty() {
        assert_eq!(CellValue::Null.to_string(), "");
    }
}
