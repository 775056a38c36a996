use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const FACE_ANNOTATIONS_KEY: &str = "faceAnnotations";
const ERROR_KEY: &str = "error";

/// One detected face, passed through exactly as the service reported it.
///
/// Geometry, landmarks and likelihoods are not interpreted here; the
/// accessors only read well-known keys for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Face(Value);

impl Face {
    pub fn new(annotation: Value) -> Self {
        Self(annotation)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn detection_confidence(&self) -> Option<f64> {
        self.0.get("detectionConfidence")?.as_f64()
    }

    /// Vertices of `boundingPoly`; missing coordinates default to 0 as the
    /// service omits zero-valued fields.
    pub fn bounding_vertices(&self) -> Option<Vec<(i64, i64)>> {
        let vertices = self.0.get("boundingPoly")?.get("vertices")?.as_array()?;
        Some(
            vertices
                .iter()
                .map(|v| {
                    let x = v.get("x").and_then(Value::as_i64).unwrap_or(0);
                    let y = v.get("y").and_then(Value::as_i64).unwrap_or(0);
                    (x, y)
                })
                .collect(),
        )
    }
}

/// Error object the service attaches to a single image's response.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceError {
    pub code: Option<i64>,
    pub message: Option<String>,
    raw: Value,
}

impl ServiceError {
    fn from_json(raw: Value) -> Self {
        Self {
            code: raw.get("code").and_then(Value::as_i64),
            message: raw.get("message").and_then(Value::as_str).map(str::to_string),
            raw,
        }
    }

    pub fn as_json(&self) -> &Value {
        &self.raw
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{message} (code {code})"),
            (None, Some(message)) => write!(f, "{message}"),
            _ => write!(f, "{}", self.raw),
        }
    }
}

/// Normalized result of one detection call.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRecord {
    faces: Vec<Face>,
    error: Option<ServiceError>,
    element: Map<String, Value>,
}

impl DetectionRecord {
    /// Builds a record from one element of the `responses` array.
    ///
    /// A missing `faceAnnotations` key means no faces were found. Returns
    /// `None` when the key is present but is not an array.
    pub fn from_response_element(element: Map<String, Value>) -> Option<Self> {
        let faces = match element.get(FACE_ANNOTATIONS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().cloned().map(Face::new).collect(),
            Some(_) => return None,
        };
        let error = element
            .get(ERROR_KEY)
            .filter(|e| !e.is_null())
            .cloned()
            .map(ServiceError::from_json);

        Some(Self {
            faces,
            error,
            element,
        })
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    /// Human-readable summary, e.g. "Found 1 face" or "Found 3 faces".
    pub fn summary(&self) -> String {
        summary_message(self.face_count())
    }

    /// The full response element, including keys this crate does not model.
    pub fn to_json(&self) -> Value {
        Value::Object(self.element.clone())
    }
}

pub fn summary_message(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("Found {count} face{suffix}")
}
