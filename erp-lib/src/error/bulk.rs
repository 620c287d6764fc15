//! Bulk create failures

use std::fmt;

use serde_json::Value;

/// Field errors of one rejected item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    /// 0-based position of the item in the submitted batch.
    pub index: usize,
    /// Messages per field, in body order.
    pub errors: Vec<(String, Vec<String>)>,
}

impl fmt::Display for BulkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item {}: ", self.index + 1)?;
        if self.errors.is_empty() {
            return f.write_str("Unknown error");
        }
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// A bulk create rejected by the backend, itemized per failing item.
///
/// Decoded from error bodies shaped like
/// `{"failures": [{"index": 0, "errors": {"name": ["This field is required."]}}]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkCreateError {
    pub status: u16,
    pub failures: Vec<BulkFailure>,
}

impl BulkCreateError {
    /// Decode the failures from an error body.
    ///
    /// Returns `None` if the body has no `failures` array.
    pub fn from_body(status: u16, body: &Value) -> Option<Self> {
        let failures = body.get("failures")?.as_array()?;
        let failures = failures
            .iter()
            .enumerate()
            .map(|(position, failure)| {
                let index = failure
                    .get("index")
                    .and_then(Value::as_u64)
                    .and_then(|i| usize::try_from(i).ok())
                    .unwrap_or(position);
                let errors = failure
                    .get("errors")
                    .and_then(Value::as_object)
                    .map(|map| {
                        map.iter()
                            .map(|(field, messages)| (field.clone(), messages_of(messages)))
                            .collect()
                    })
                    .unwrap_or_default();
                BulkFailure { index, errors }
            })
            .collect();
        Some(Self { status, failures })
    }
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        other => vec![other.to_string()],
    }
}

impl fmt::Display for BulkCreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Bulk creation failed:")?;
        for failure in &self.failures {
            write!(f, "\n{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for BulkCreateError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_itemized_message() {
        let body = json!({
            "failures": [
                {"index": 0, "errors": {"name": ["This field is required."]}},
                {"index": 3, "errors": {"job_no": ["Unknown job."], "quantity": "Must be positive."}}
            ]
        });
        let err = BulkCreateError::from_body(400, &body).unwrap();
        assert_eq!(
            err.to_string(),
            "Bulk creation failed:\n\
             Item 1: name: This field is required.\n\
             Item 4: job_no: Unknown job.; quantity: Must be positive."
        );
    }

    #[test]
    fn test_missing_index_uses_position() {
        let body = json!({"failures": [{"errors": {}}, {"errors": {"name": ["x", "y"]}}]});
        let err = BulkCreateError::from_body(400, &body).unwrap();
        assert_eq!(err.to_string(), "Bulk creation failed:\nItem 1: Unknown error\nItem 2: name: x, y");
    }

    #[test]
    fn test_body_without_failures() {
        assert!(BulkCreateError::from_body(400, &json!({"detail": "bad"})).is_none());
    }
}
