use serde_json::Value;

use crate::ingestion::domain::row_sink::{RowSink, SinkError};
use crate::ingestion::domain::table_ref::TableRef;
use crate::shared::http_client::HttpJsonClient;

/// [`RowSink`] backed by the warehouse `tabledata.insertAll` REST endpoint.
///
/// Makes exactly one exchange per call; retrying is the publisher's job.
pub struct WarehouseHttpSink {
    http: HttpJsonClient,
    endpoint: String,
}

impl WarehouseHttpSink {
    pub fn new(http: HttpJsonClient, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn insert_all_url(&self, table: &TableRef) -> String {
        format!(
            "{}/bigquery/v2/projects/{}/datasets/{}/tables/{}/insertAll",
            self.endpoint, table.project_id, table.dataset_id, table.table_id
        )
    }
}

impl RowSink for WarehouseHttpSink {
    fn insert_all(&self, destination: &TableRef, body: &Value) -> Result<Value, SinkError> {
        self.http
            .post_json(&self.insert_all_url(destination), body)
            .map_err(SinkError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::infrastructure::static_token_provider::StaticTokenProvider;
    use crate::ingestion::domain::retry_policy::{ConstantBackoff, RetryPolicy};
    use crate::ingestion::domain::row_publisher::{PublishError, RowPublisher};
    use crate::shared::test_server::{serve, CannedResponse};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn http() -> HttpJsonClient {
        HttpJsonClient::new(
            Arc::new(StaticTokenProvider::new("bq-token").unwrap()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn table() -> TableRef {
        TableRef::new("my-project", "faces", "rows")
    }

    fn publisher(base_url: &str, num_retries: u32) -> RowPublisher {
        RowPublisher::new(
            Box::new(WarehouseHttpSink::new(http(), base_url)),
            RetryPolicy::new(num_retries, Box::new(ConstantBackoff(Duration::ZERO))),
        )
    }

    fn row() -> serde_json::Map<String, Value> {
        match json!({"name": "alice", "faces": 1}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_posts_to_insert_all_path() {
        let server = serve(vec![CannedResponse::ok(
            r#"{"kind":"bigquery#tableDataInsertAllResponse"}"#,
        )]);

        let result = publisher(server.base_url(), 0).publish(&table(), row()).unwrap();

        assert!(result.is_clean());
        let requests = server.finish();
        assert_eq!(
            requests[0].path(),
            "/bigquery/v2/projects/my-project/datasets/faces/tables/rows/insertAll"
        );
        let body = requests[0].json();
        assert_eq!(body["rows"][0]["json"], json!({"name": "alice", "faces": 1}));
        assert_eq!(body["rows"][0]["insertId"], result.insert_id.as_str());
    }

    #[test]
    fn test_server_error_is_retried_with_identical_body() {
        let server = serve(vec![
            CannedResponse::new(500, r#"{"error":{"code":500}}"#),
            CannedResponse::ok(r#"{"kind":"bigquery#tableDataInsertAllResponse"}"#),
        ]);

        let result = publisher(server.base_url(), 3).publish(&table(), row()).unwrap();

        assert_eq!(result.attempts, 2);
        let requests = server.finish();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, requests[1].body);
    }

    #[test]
    fn test_unknown_table_is_rejected_without_retry() {
        let server = serve(vec![CannedResponse::new(
            404,
            r#"{"error":{"code":404,"message":"Not found: Table my-project:faces.rows"}}"#,
        )]);

        let err = publisher(server.base_url(), 5).publish(&table(), row()).unwrap_err();

        assert!(matches!(err, PublishError::Rejected { .. }));
        assert_eq!(server.finish().len(), 1);
    }

    #[test]
    fn test_undecodable_success_body_is_not_reported_as_rejection() {
        let server = serve(vec![CannedResponse::ok("<html>ok</html>")]);

        let err = publisher(server.base_url(), 5).publish(&table(), row()).unwrap_err();

        assert!(matches!(err, PublishError::UndecodableAcknowledgement { .. }));
        let message = err.to_string();
        assert!(message.contains("acknowledged with an undecodable body"));
        assert!(!message.contains("rejected"));
        assert_eq!(server.finish().len(), 1);
    }

    #[test]
    fn test_row_level_errors_in_success_response() {
        let server = serve(vec![CannedResponse::ok(
            r#"{"kind":"bigquery#tableDataInsertAllResponse","insertErrors":[{"index":0,"errors":[{"reason":"invalid","location":"name","message":"bad"}]}]}"#,
        )]);

        let result = publisher(server.base_url(), 0).publish(&table(), row()).unwrap();

        assert_eq!(result.insert_errors.len(), 1);
        assert_eq!(result.insert_errors[0].reasons(), vec!["invalid"]);
        server.finish();
    }
}
