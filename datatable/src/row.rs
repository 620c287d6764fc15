//! Row access trait.

use serde_json::{Map, Value};

use crate::value::CellValue;

/// Trait for items that can be displayed as rows in a [`DataTable`](crate::DataTable).
///
/// Fields are addressed by name. Dotted names (`supplier.name`) reach into
/// nested objects where the row type supports it. Missing fields read as
/// [`CellValue::Null`].
///
/// # Examples
///
/// ```ignore
/// #[derive(Clone, PartialEq)]
/// struct Part { key: String, quantity: i64 }
///
/// impl TableRow for Part {
///     fn cell(&self, field: &str) -> CellValue {
///         match field {
///             "key" => self.key.as_str().into(),
///             "quantity" => self.quantity.into(),
///             _ => CellValue::Null,
///         }
///     }
///
///     fn set_cell(&mut self, field: &str, value: CellValue) -> bool {
///         match (field, value) {
///             ("quantity", CellValue::Int(q)) => { self.quantity = q; true }
///             _ => false,
///         }
///     }
/// }
/// ```
///
/// Rows compare with `PartialEq` so that a row without an id can be found
/// again after the table was re-sorted.
pub trait TableRow: Clone + PartialEq + Send + Sync + 'static {
    /// Read the value of a field.
    fn cell(&self, field: &str) -> CellValue;

    /// Write the value of a field.
    ///
    /// Returns `false` if the row cannot hold the field.
    fn set_cell(&mut self, field: &str, value: CellValue) -> bool;
}

impl TableRow for Map<String, Value> {
    fn cell(&self, field: &str) -> CellValue {
        if let Some(value) = self.get(field) {
            return CellValue::from_json(value);
        }
        let mut parts = field.split('.');
        let Some(first) = parts.next() else {
            return CellValue::Null;
        };
        let mut current = match self.get(first) {
            Some(v) => v,
            None => return CellValue::Null,
        };
        for part in parts {
            current = match current.get(part) {
                Some(v) => v,
                None => return CellValue::Null,
            };
        }
        CellValue::from_json(current)
    }

    fn set_cell(&mut self, field: &str, value: CellValue) -> bool {
        if self.contains_key(field) || !field.contains('.') {
            self.insert(field.to_string(), value.to_json());
            return true;
        }
        let segments: Vec<&str> = field.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return false;
        };
        let mut current = self;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            let Some(map) = entry.as_object_mut() else {
                return false;
            };
            current = map;
        }
        current.insert(last.to_string(), value.to_json());
        true
    }
}
