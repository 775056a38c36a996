use serde_json::Value;

use crate::shared::transport_error::TransportError;

/// Domain interface for the remote image annotation endpoint.
///
/// Takes a full batch request body and returns the raw batch response
/// envelope. Implementations carry their own authenticated client.
pub trait AnnotateTransport: Send {
    fn annotate(&self, request: &Value) -> Result<Value, TransportError>;
}
