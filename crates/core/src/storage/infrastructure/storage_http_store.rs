use serde_json::Value;

use crate::shared::http_client::HttpJsonClient;
use crate::storage::domain::object_store::{ObjectRef, ObjectStore, StorageError};

/// [`ObjectStore`] backed by the storage JSON API's simple media upload.
pub struct StorageHttpStore {
    http: HttpJsonClient,
    endpoint: String,
}

impl StorageHttpStore {
    pub fn new(http: HttpJsonClient, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl ObjectStore for StorageHttpStore {
    fn upload(
        &self,
        object: &ObjectRef,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<Value, StorageError> {
        let url = format!("{}/upload/storage/v1/b/{}/o", self.endpoint, object.bucket);
        let response = self.http.post_bytes(
            &url,
            &[("uploadType", "media"), ("name", object.name.as_str())],
            content_type,
            data,
        )?;
        Ok(response)
    }
}
