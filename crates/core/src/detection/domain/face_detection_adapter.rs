use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use thiserror::Error;

use crate::detection::domain::annotate_transport::AnnotateTransport;
use crate::detection::domain::detection_record::DetectionRecord;
use crate::shared::constants::FACE_DETECTION_FEATURE;
use crate::shared::transport_error::TransportError;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("image payload is empty")]
    EmptyImage,
    #[error("max_results must be at least 1, got {0}")]
    InvalidMaxResults(u32),
    #[error("face detection request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("malformed detection response: {0}")]
    MalformedResponse(String),
}

/// A single-image face detection request.
#[derive(Debug, Clone, Copy)]
pub struct DetectionRequest<'a> {
    image: &'a [u8],
    max_results: u32,
}

impl<'a> DetectionRequest<'a> {
    pub fn new(image: &'a [u8], max_results: u32) -> Result<Self, AdapterError> {
        if image.is_empty() {
            return Err(AdapterError::EmptyImage);
        }
        if max_results < 1 {
            return Err(AdapterError::InvalidMaxResults(max_results));
        }
        Ok(Self { image, max_results })
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Wraps the image in a one-element batch request body.
    pub fn to_batch_body(&self) -> Value {
        json!({
            "requests": [{
                "image": { "content": STANDARD.encode(self.image) },
                "features": [{
                    "type": FACE_DETECTION_FEATURE,
                    "maxResults": self.max_results,
                }],
            }]
        })
    }
}

/// Calls the annotation service and normalizes its batch envelope into a
/// [`DetectionRecord`].
///
/// No retries happen here; callers decide what to do with a failure.
pub struct FaceDetectionAdapter {
    transport: Box<dyn AnnotateTransport>,
}

impl FaceDetectionAdapter {
    pub fn new(transport: Box<dyn AnnotateTransport>) -> Self {
        Self { transport }
    }

    pub fn detect(&self, image: &[u8], max_results: u32) -> Result<DetectionRecord, AdapterError> {
        let request = DetectionRequest::new(image, max_results)?;
        log::debug!(
            "Requesting face detection for {} bytes (max_results={})",
            image.len(),
            request.max_results()
        );

        let envelope = self.transport.annotate(&request.to_batch_body())?;
        let record = first_response(envelope)?;

        if let Some(error) = record.error() {
            log::warn!("Detection service reported an error for the image: {error}");
        }
        Ok(record)
    }
}

fn first_response(envelope: Value) -> Result<DetectionRecord, AdapterError> {
    let mut responses = match envelope {
        Value::Object(mut map) => match map.remove("responses") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(AdapterError::MalformedResponse(
                    "'responses' is not an array".into(),
                ))
            }
            None => {
                return Err(AdapterError::MalformedResponse(
                    "missing 'responses'".into(),
                ))
            }
        },
        _ => {
            return Err(AdapterError::MalformedResponse(
                "response body is not an object".into(),
            ))
        }
    };

    if responses.is_empty() {
        return Err(AdapterError::MalformedResponse(
            "'responses' is empty".into(),
        ));
    }

    match responses.swap_remove(0) {
        Value::Object(element) => DetectionRecord::from_response_element(element).ok_or_else(
            || AdapterError::MalformedResponse("'faceAnnotations' is not an array".into()),
        ),
        _ => Err(AdapterError::MalformedResponse(
            "'responses[0]' is not an object".into(),
        )),
    }
}
