//! List response envelope

use serde::Deserialize;

use super::Record;
use crate::error::ApiError;

/// A list endpoint response.
///
/// Paginated endpoints answer `{"results": [...], "count": n}`; others answer a
/// bare array. The shape is resolved once, when the body is decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum ListResponse {
    Paginated { results: Vec<Record>, count: usize },
    Plain { items: Vec<Record> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Paginated {
        results: Vec<Record>,
        count: Option<usize>,
    },
    Plain(Vec<Record>),
}

impl ListResponse {
    /// Decode a list body. Any shape other than the two envelopes is a parse error.
    pub fn decode(body: &str) -> Result<Self, ApiError> {
        let envelope: Envelope = serde_json::from_str(body).map_err(|e| {
            ApiError::parse_with_body(format!("Unexpected list response format: {}", e), body)
        })?;
        Ok(match envelope {
            Envelope::Paginated { results, count } => {
                let count = count.unwrap_or(results.len());
                ListResponse::Paginated { results, count }
            }
            Envelope::Plain(items) => ListResponse::Plain { items },
        })
    }

    /// Rows and total count. Plain lists count their own items.
    pub fn into_parts(self) -> (Vec<Record>, usize) {
        match self {
            ListResponse::Paginated { results, count } => (results, count),
            ListResponse::Plain { items } => {
                let count = items.len();
                (items, count)
            }
        }
    }

    pub fn records(&self) -> &[Record] {
        match self {
            ListResponse::Paginated { results, .. } => results,
            ListResponse::Plain { items } => items,
        }
    }

    pub fn total(&self) -> usize {
        match self {
            ListResponse::Paginated { count, .. } => *count,
            ListResponse::Plain { items } => items.len(),
        }
    }

    pub fn is_paginated(&self) -> bool {
        matches!(self, ListResponse::Paginated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated() {
        let list = ListResponse::decode(r#"{"results":[{"key":"PT-1","name":"Bracket"}],"count":1}"#)
            .unwrap();
        assert!(list.is_paginated());
        let (rows, total) = list.into_parts();
        assert_eq!(total, 1);
        assert_eq!(rows[0]["key"], "PT-1");
    }

    #[test]
    fn test_paginated_count_exceeds_page() {
        let list = ListResponse::decode(r#"{"results":[{"id":1}],"count":57,"next":null}"#).unwrap();
        assert_eq!(list.total(), 57);
        assert_eq!(list.records().len(), 1);
    }

    #[test]
    fn test_plain() {
        let list = ListResponse::decode(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert!(!list.is_paginated());
        assert_eq!(list.into_parts().1, 2);
    }

    #[test]
    fn test_other_shapes_are_errors() {
        assert!(matches!(
            ListResponse::decode(r#"{"items":[]}"#),
            Err(ApiError::Parse { .. })
        ));
        assert!(ListResponse::decode(r#""nope""#).is_err());
    }
}
