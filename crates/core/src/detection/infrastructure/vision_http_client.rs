use serde_json::Value;

use crate::detection::domain::annotate_transport::AnnotateTransport;
use crate::shared::http_client::HttpJsonClient;
use crate::shared::transport_error::TransportError;

/// [`AnnotateTransport`] backed by the `images:annotate` REST endpoint.
pub struct VisionHttpClient {
    http: HttpJsonClient,
    url: String,
}

impl VisionHttpClient {
    pub fn new(http: HttpJsonClient, endpoint: &str) -> Self {
        Self {
            http,
            url: format!("{}/v1/images:annotate", endpoint.trim_end_matches('/')),
        }
    }
}

impl AnnotateTransport for VisionHttpClient {
    fn annotate(&self, request: &Value) -> Result<Value, TransportError> {
        self.http.post_json(&self.url, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::infrastructure::static_token_provider::StaticTokenProvider;
    use crate::detection::domain::face_detection_adapter::FaceDetectionAdapter;
    use crate::shared::test_server::{serve, CannedResponse};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn http() -> HttpJsonClient {
        HttpJsonClient::new(
            Arc::new(StaticTokenProvider::new("vision-token").unwrap()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_posts_to_annotate_endpoint() {
        let server = serve(vec![CannedResponse::ok(
            r#"{"responses":[{"faceAnnotations":[{"detectionConfidence":0.98}]}]}"#,
        )]);
        let endpoint = format!("{}/", server.base_url());
        let adapter = FaceDetectionAdapter::new(Box::new(VisionHttpClient::new(http(), &endpoint)));

        let record = adapter.detect(b"jpeg-bytes", 4).unwrap();

        assert_eq!(record.summary(), "Found 1 face");
        let requests = server.finish();
        assert_eq!(requests[0].path(), "/v1/images:annotate");
        assert_eq!(
            requests[0].json()["requests"][0]["features"][0],
            json!({"type": "FACE_DETECTION", "maxResults": 4})
        );
    }

    #[test]
    fn test_quota_error_surfaces_as_transport_failure() {
        let server = serve(vec![CannedResponse::new(
            429,
            r#"{"error":{"code":429,"message":"Quota exceeded"}}"#,
        )]);
        let client = VisionHttpClient::new(http(), server.base_url());

        let err = client.annotate(&json!({"requests": []})).unwrap_err();

        assert!(matches!(err, TransportError::Status { status: 429, .. }));
        server.finish();
    }
}
