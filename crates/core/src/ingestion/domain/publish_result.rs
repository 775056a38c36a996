use serde_json::Value;

use crate::ingestion::domain::table_ref::InsertId;

/// A row-level failure the sink reported inside a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertError {
    /// Index of the failing row within the request; always 0 here.
    pub index: Option<u64>,
    /// Error objects exactly as reported (`reason`, `message`, `location`...).
    pub errors: Vec<Value>,
}

impl InsertError {
    fn from_json(entry: &Value) -> Self {
        Self {
            index: entry.get("index").and_then(Value::as_u64),
            errors: entry
                .get("errors")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// The `reason` codes of the individual errors, e.g. `invalid`.
    pub fn reasons(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| e.get("reason").and_then(Value::as_str))
            .collect()
    }
}

/// Outcome of a completed publish call.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub insert_id: InsertId,
    /// Transport attempts made, including the successful one.
    pub attempts: u32,
    /// The sink's acknowledgement, unmodified.
    pub response: Value,
    pub insert_errors: Vec<InsertError>,
}

impl PublishResult {
    pub fn new(insert_id: InsertId, attempts: u32, response: Value) -> Self {
        let insert_errors = response
            .get("insertErrors")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(InsertError::from_json).collect())
            .unwrap_or_default();
        Self {
            insert_id,
            attempts,
            response,
            insert_errors,
        }
    }

    /// True when the sink accepted the row without row-level errors.
    pub fn is_clean(&self) -> bool {
        self.insert_errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_acknowledgement_is_clean() {
        let result = PublishResult::new(
            InsertId::generate(),
            1,
            json!({"kind": "bigquery#tableDataInsertAllResponse"}),
        );
        assert!(result.is_clean());
    }

    #[test]
    fn test_insert_errors_are_parsed() {
        let response = json!({
            "kind": "bigquery#tableDataInsertAllResponse",
            "insertErrors": [{
                "index": 0,
                "errors": [{"reason": "invalid", "location": "age", "message": "no such field: age."}]
            }]
        });

        let result = PublishResult::new(InsertId::generate(), 2, response.clone());

        assert!(!result.is_clean());
        assert_eq!(result.insert_errors.len(), 1);
        assert_eq!(result.insert_errors[0].index, Some(0));
        assert_eq!(result.insert_errors[0].reasons(), vec!["invalid"]);
        assert_eq!(result.response, response);
        assert_eq!(result.attempts, 2);
    }

    #[test]
    fn test_entry_without_errors_array_is_kept() {
        let result = PublishResult::new(
            InsertId::generate(),
            1,
            json!({"insertErrors": [{"index": 0}]}),
        );
        assert_eq!(result.insert_errors.len(), 1);
        assert!(result.insert_errors[0].errors.is_empty());
    }
}
