use std::fmt;

use serde_json::{Map, Value};
use uuid::Uuid;

/// A structured record destined for the warehouse. The sink owns the schema.
pub type Row = Map<String, Value>;

/// Identifies an append-only warehouse table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

impl TableRef {
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

/// Client-generated deduplication token for one logical insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsertId(String);

impl InsertId {
    /// A fresh random (v4) UUID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InsertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_ref_display() {
        let table = TableRef::new("proj", "faces", "detections");
        assert_eq!(table.to_string(), "proj:faces.detections");
    }

    #[test]
    fn test_insert_id_is_uuid_v4() {
        let id = InsertId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<InsertId> = (0..1000).map(|_| InsertId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
