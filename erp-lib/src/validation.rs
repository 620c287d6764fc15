//! Client-side validation run before create/update requests.
//!
//! Validators collect every problem instead of stopping at the first one, so
//! hosts can show the full list in a single notification.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::ValidationErrors;
use crate::model::Record;

fn text<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Reads a number that may arrive as a JSON number or a numeric string.
fn number(record: &Record, field: &str) -> Option<Result<f64, ()>> {
    match record.get(field)? {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().ok_or(())),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().replace(',', ".").parse::<f64>().map_err(|_| ())),
        _ => Some(Err(())),
    }
}

fn require(errors: &mut ValidationErrors, record: &Record, field: &str) {
    if text(record, field).is_none() {
        errors.push(field, "is required");
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Validates a part before it is created or updated.
///
/// `name` and `job_no` are required; `quantity`, when given, must be a
/// positive number.
pub fn validate_part(record: &Record) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, record, "name");
    require(&mut errors, record, "job_no");
    match number(record, "quantity") {
        Some(Ok(q)) if q > 0.0 => {}
        Some(_) => errors.push("quantity", "must be greater than 0"),
        None => {}
    }
    errors.into_result()
}

/// Validates a supplier.
///
/// The default tax rate must lie in `0..=100`. A DBS limit is only checked
/// when `has_dbs` is set and must not be negative.
pub fn validate_supplier(record: &Record) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, record, "name");

    match number(record, "default_tax_rate") {
        Some(Ok(rate)) if (0.0..=100.0).contains(&rate) => {}
        _ => errors.push("default_tax_rate", "must be between 0 and 100"),
    }

    let has_dbs = record
        .get("has_dbs")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if has_dbs {
        match number(record, "dbs_limit") {
            Some(Ok(limit)) if limit < 0.0 => errors.push("dbs_limit", "must be 0 or greater"),
            Some(Err(())) => errors.push("dbs_limit", "must be a number"),
            _ => {}
        }
    }
    errors.into_result()
}

/// Validates a payment term and its lines.
///
/// At least one line is required, every line needs a label and a percentage,
/// and the percentages must add up to exactly 100.
pub fn validate_payment_term(record: &Record) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, record, "name");

    let lines = record
        .get("default_lines")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if lines.is_empty() {
        errors.push("default_lines", "at least one payment line is required");
        return errors.into_result();
    }

    let mut total = 0.0;
    for (i, line) in lines.iter().enumerate() {
        let Some(line) = line.as_object() else {
            errors.push(format!("default_lines[{}]", i), "must be an object");
            continue;
        };
        if text(line, "label").is_none() {
            errors.push(format!("default_lines[{}].label", i), "is required");
        }
        match number(line, "percentage") {
            Some(Ok(p)) if (0.0..=100.0).contains(&p) => total += p,
            _ => errors.push(
                format!("default_lines[{}].percentage", i),
                "must be between 0 and 100",
            ),
        }
    }

    // Compare in hundredths; percentages carry two decimals.
    if errors.is_empty() && (total * 100.0).round() as i64 != 10_000 {
        errors.push(
            "default_lines",
            format!("percentages must add up to 100 (currently {:.2})", total),
        );
    }
    errors.into_result()
}

/// Validates a new overtime request against the current time.
///
/// Start and end are required, the end must come after the start, and the
/// start must not lie in the past. Every entry needs a user and a job number.
pub fn validate_overtime_request(
    record: &Record,
    now: DateTime<Utc>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let start = text(record, "start_at");
    let end = text(record, "end_at");
    if start.is_none() {
        errors.push("start_at", "is required");
    }
    if end.is_none() {
        errors.push("end_at", "is required");
    }

    if let (Some(start), Some(end)) = (start, end) {
        match (parse_datetime(start), parse_datetime(end)) {
            (Some(start), Some(end)) => {
                if start >= end {
                    errors.push("end_at", "must be after the start time");
                }
                if start < now {
                    errors.push("start_at", "cannot be in the past");
                }
            }
            (None, _) => errors.push("start_at", "is not a valid date and time"),
            (_, None) => errors.push("end_at", "is not a valid date and time"),
        }
    }

    let entries = record
        .get("entries")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if entries.is_empty() {
        errors.push("entries", "at least one participant is required");
    }
    for (i, entry) in entries.iter().enumerate() {
        let entry = entry.as_object();
        let has_user = entry
            .and_then(|e| e.get("user"))
            .is_some_and(|u| !u.is_null());
        if !has_user {
            errors.push(format!("entries[{}].user", i), "is required");
        }
        if entry.and_then(|e| text(e, "job_no")).is_none() {
            errors.push(format!("entries[{}].job_no", i), "is required");
        }
    }

    errors.into_result()
}
