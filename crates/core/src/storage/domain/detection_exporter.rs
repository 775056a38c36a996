use serde_json::Value;

use crate::detection::domain::detection_record::DetectionRecord;
use crate::shared::constants::JSON_CONTENT_TYPE;
use crate::storage::domain::object_store::{ObjectRef, ObjectStore, StorageError};

/// Uploads a detection record as a JSON document.
pub struct DetectionExporter {
    store: Box<dyn ObjectStore>,
}

impl DetectionExporter {
    pub fn new(store: Box<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub fn export(
        &self,
        object: &ObjectRef,
        record: &DetectionRecord,
    ) -> Result<Value, StorageError> {
        let data = serde_json::to_vec(&record.to_json())?;
        log::info!("Uploading {} bytes to {object}", data.len());
        self.store.upload(object, JSON_CONTENT_TYPE, data)
    }
}
