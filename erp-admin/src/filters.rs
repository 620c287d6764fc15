//! Filter id translation.
//!
//! Filter inputs are identified by UI ids such as `job-no-filter`. The
//! backend expects query parameter names such as `job_no`. Screens translate
//! ids through [`translate_generic`] and add their own aliases on top.

/// Suffix shared by every filter input id.
pub const FILTER_SUFFIX: &str = "-filter";

/// Backend parameter name for a filter id.
///
/// Strips the `-filter` suffix and turns dashes into underscores.
pub fn parameter_name(id: &str) -> String {
    id.strip_suffix(FILTER_SUFFIX)
        .unwrap_or(id)
        .replace('-', "_")
}

/// Generic translation: `<name>-filter` becomes `<name>` and checkbox values
/// (`on`/`off`) become booleans.
pub fn translate_generic(id: &str, value: &str) -> Option<(String, String)> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let value = match value {
        "on" => "true",
        "off" => "false",
        other => other,
    };
    Some((parameter_name(id), value.to_string()))
}

/// Maps `active`/`inactive` status selections onto the `is_active` flag.
pub fn active_flag(value: &str) -> Option<(String, String)> {
    let flag = match value.trim().to_lowercase().as_str() {
        "active" | "true" | "1" => "true",
        "inactive" | "false" | "0" => "false",
        _ => return None,
    };
    Some(("is_active".to_string(), flag.to_string()))
}

/// Expands a bare number into a part key (`12` → `PT-12`).
///
/// Anything else is passed through unchanged.
pub fn part_key(value: &str) -> Option<(String, String)> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let key = if value.chars().all(|c| c.is_ascii_digit()) {
        format!("PT-{}", value)
    } else {
        value.to_string()
    };
    Some(("key".to_string(), key))
}

/// Maps `completed`/`incomplete` onto `completion_date__isnull`.
pub fn completion_status(value: &str) -> Option<(String, String)> {
    let isnull = match value.trim() {
        "completed" => "false",
        "incomplete" => "true",
        _ => return None,
    };
    Some(("completion_date__isnull".to_string(), isnull.to_string()))
}
