use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::shared::transport_error::TransportError;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    Transport(#[source] TransportError),
    #[error("upload rejected: {0}")]
    Rejected(#[source] TransportError),
    #[error("failed to encode object: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<TransportError> for StorageError {
    fn from(err: TransportError) -> Self {
        if err.is_retryable() {
            StorageError::Transport(err)
        } else {
            StorageError::Rejected(err)
        }
    }
}

/// Location of an object in a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub name: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.name)
    }
}

/// Domain interface for an object storage service.
///
/// Returns the service's description of the stored object.
pub trait ObjectStore: Send {
    fn upload(
        &self,
        object: &ObjectRef,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<Value, StorageError>;
}
