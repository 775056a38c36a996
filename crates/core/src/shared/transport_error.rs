use thiserror::Error;

use crate::auth::domain::access_token_provider::AuthError;

/// Failure of a single HTTP exchange with a remote service.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },
    #[error("invalid JSON in response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to obtain access token: {0}")]
    Auth(#[from] AuthError),
}

impl TransportError {
    /// Whether repeating the identical request may succeed.
    ///
    /// Connection failures, timeouts, throttling (429) and server errors (5xx)
    /// are transient. Client errors, undecodable bodies and credential
    /// failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Request { source, .. } => !source.is_builder(),
            TransportError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            TransportError::Build(_) | TransportError::Decode { .. } | TransportError::Auth(_) => {
                false
            }
        }
    }

    /// Shorthand for a status failure, mostly used by stub transports.
    pub fn status(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        TransportError::Status {
            url: url.into(),
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::throttled(429, true)]
    #[case::internal(500, true)]
    #[case::unavailable(503, true)]
    #[case::bad_request(400, false)]
    #[case::unauthorized(401, false)]
    #[case::not_found(404, false)]
    fn test_status_retryability(#[case] status: u16, #[case] expected: bool) {
        let err = TransportError::status("http://sink", status, "");
        assert_eq!(err.is_retryable(), expected);
    }

    #[test]
    fn test_auth_failure_is_not_retryable() {
        let err = TransportError::from(AuthError::EmptyToken);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_decode_failure_is_not_retryable() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TransportError::Decode {
            url: "http://sink".into(),
            source,
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_build_failure_names_client_setup() {
        let source = reqwest::blocking::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let err = TransportError::Build(source);

        assert!(err.to_string().starts_with("failed to build HTTP client: "));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_status_message_includes_body() {
        let err = TransportError::status("http://sink/x", 403, "quota exceeded");
        assert_eq!(
            err.to_string(),
            "http://sink/x returned HTTP 403: quota exceeded"
        );
    }
}
