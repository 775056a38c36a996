use serde_json::Value;
use thiserror::Error;

use crate::ingestion::domain::table_ref::TableRef;
use crate::shared::transport_error::TransportError;

#[derive(Error, Debug)]
pub enum SinkError {
    /// The exchange did not complete; repeating it may succeed.
    #[error("transport failure: {0}")]
    Transport(#[source] TransportError),
    /// The sink refused the request; repeating it will not help.
    #[error("request rejected: {0}")]
    Rejected(#[source] TransportError),
    /// The sink answered with success but the body could not be read; the
    /// rows have most likely been stored.
    #[error("acknowledged with an undecodable body: {0}")]
    Undecodable(#[source] TransportError),
}

impl From<TransportError> for SinkError {
    fn from(err: TransportError) -> Self {
        if matches!(err, TransportError::Decode { .. }) {
            SinkError::Undecodable(err)
        } else if err.is_retryable() {
            SinkError::Transport(err)
        } else {
            SinkError::Rejected(err)
        }
    }
}

/// Domain interface for an append-only warehouse accepting bulk inserts.
///
/// `body` is the complete insert request; implementations must send it
/// unchanged so that retried attempts carry the same insert IDs.
pub trait RowSink: Send {
    fn insert_all(&self, destination: &TableRef, body: &Value) -> Result<Value, SinkError>;
}
