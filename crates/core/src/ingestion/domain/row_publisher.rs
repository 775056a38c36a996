use serde_json::{json, Value};
use thiserror::Error;

use crate::ingestion::domain::publish_result::PublishResult;
use crate::ingestion::domain::retry_policy::RetryPolicy;
use crate::ingestion::domain::row_sink::{RowSink, SinkError};
use crate::ingestion::domain::table_ref::{InsertId, Row, TableRef};
use crate::shared::transport_error::TransportError;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("insert {insert_id} into {destination} was rejected: {source}")]
    Rejected {
        destination: String,
        insert_id: InsertId,
        #[source]
        source: TransportError,
    },
    #[error(
        "insert {insert_id} into {destination} was acknowledged with an undecodable body: {source}"
    )]
    UndecodableAcknowledgement {
        destination: String,
        insert_id: InsertId,
        #[source]
        source: TransportError,
    },
    #[error("insert {insert_id} into {destination} failed after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        destination: String,
        insert_id: InsertId,
        attempts: u32,
        #[source]
        source: TransportError,
    },
}

impl PublishError {
    pub fn insert_id(&self) -> &InsertId {
        match self {
            PublishError::Rejected { insert_id, .. } => insert_id,
            PublishError::UndecodableAcknowledgement { insert_id, .. } => insert_id,
            PublishError::RetriesExhausted { insert_id, .. } => insert_id,
        }
    }
}

/// Streams single rows into an append-only sink.
///
/// Each call generates one insert ID and sends the identical request body on
/// every attempt, so a sink that deduplicates on insert ID stores the row at
/// most once even when an attempt timed out after the row landed.
pub struct RowPublisher {
    sink: Box<dyn RowSink>,
    policy: RetryPolicy,
}

impl RowPublisher {
    pub fn new(sink: Box<dyn RowSink>, policy: RetryPolicy) -> Self {
        Self { sink, policy }
    }

    pub fn publish(&self, destination: &TableRef, row: Row) -> Result<PublishResult, PublishError> {
        let insert_id = InsertId::generate();
        let body = insert_all_body(row, &insert_id);
        let max_attempts = self.policy.max_attempts();

        let mut attempt = 1;
        loop {
            match self.sink.insert_all(destination, &body) {
                Ok(response) => {
                    log::debug!(
                        "Insert {insert_id} into {destination} acknowledged on attempt {attempt}"
                    );
                    return Ok(PublishResult::new(insert_id, attempt, response));
                }
                Err(SinkError::Rejected(source)) => {
                    return Err(PublishError::Rejected {
                        destination: destination.to_string(),
                        insert_id,
                        source,
                    });
                }
                Err(SinkError::Undecodable(source)) => {
                    return Err(PublishError::UndecodableAcknowledgement {
                        destination: destination.to_string(),
                        insert_id,
                        source,
                    });
                }
                Err(SinkError::Transport(source)) => {
                    if attempt >= max_attempts {
                        return Err(PublishError::RetriesExhausted {
                            destination: destination.to_string(),
                            insert_id,
                            attempts: attempt,
                            source,
                        });
                    }
                    log::warn!(
                        "Insert {insert_id} into {destination} failed (attempt {attempt}/{max_attempts}): {source}"
                    );
                    self.policy.pause_before_retry(attempt);
                    attempt += 1;
                }
            }
        }
    }
}

/// Request body for a one-row bulk insert.
pub fn insert_all_body(row: Row, insert_id: &InsertId) -> Value {
    json!({
        "rows": [{
            "json": Value::Object(row),
            "insertId": insert_id.as_str(),
        }]
    })
}
