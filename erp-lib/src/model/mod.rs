//! Data models

mod list;
mod resource;

pub use list::*;
pub use resource::*;

/// A dynamic entity record as returned by the backend.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Read a record field as an identifier string.
///
/// Numbers and strings are accepted; anything else is `None`.
pub fn record_id(record: &Record, field: &str) -> Option<String> {
    match record.get(field)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
