use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use crate::auth::domain::access_token_provider::AccessTokenProvider;
use crate::shared::transport_error::TransportError;

/// Authenticated blocking JSON client shared by the HTTP adapters.
///
/// Every request carries a bearer token from the injected provider. Any
/// non-2xx status is turned into [`TransportError::Status`]; successful
/// bodies are decoded as JSON (an empty body decodes to an empty object).
#[derive(Clone)]
pub struct HttpJsonClient {
    client: Client,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl HttpJsonClient {
    pub fn new(
        tokens: Arc<dyn AccessTokenProvider>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client, tokens })
    }

    pub fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        self.send(url, self.client.post(url).json(body))
    }

    pub fn post_bytes(
        &self,
        url: &str,
        query: &[(&str, &str)],
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Value, TransportError> {
        let request = self
            .client
            .post(url)
            .query(query)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body);
        self.send(url, request)
    }

    fn send(&self, url: &str, request: RequestBuilder) -> Result<Value, TransportError> {
        let token = self.tokens.access_token()?;
        log::debug!("POST {url}");

        let response = request
            .bearer_auth(token)
            .send()
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let text = response.text().map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&text).map_err(|source| TransportError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
