use std::io::{self, Write};

use serde_json::Value;

use crate::detection::domain::detection_record::{DetectionRecord, Face};
use crate::ingestion::domain::publish_result::PublishResult;
use crate::rows::domain::row_parser::RowParseError;
use crate::storage::domain::object_store::ObjectRef;

/// Observer for use case events.
///
/// Decouples the use cases from where their output goes, so the CLI can
/// print results while tests stay silent.
pub trait PipelineReporter: Send {
    /// A detection call completed.
    fn detection(&mut self, record: &DetectionRecord);

    /// A detection record was uploaded.
    fn exported(&mut self, object: &ObjectRef, acknowledgement: &Value, record: &DetectionRecord);

    /// A row was accepted by the sink (possibly with row-level errors).
    fn row_published(&mut self, result: &PublishResult);

    /// A line of row input could not be parsed.
    fn row_skipped(&mut self, error: &RowParseError);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&mut self) {}
}

/// Silent reporter that discards all events.
pub struct NullPipelineReporter;

impl PipelineReporter for NullPipelineReporter {
    fn detection(&mut self, _record: &DetectionRecord) {}
    fn exported(&mut self, _object: &ObjectRef, _acknowledgement: &Value, _record: &DetectionRecord) {}
    fn row_published(&mut self, _result: &PublishResult) {}
    fn row_skipped(&mut self, _error: &RowParseError) {}
}

/// CLI reporter: prints results as they happen and tallies rows for the
/// closing summary.
///
/// Write failures on the output stream are logged and otherwise ignored;
/// they do not abort the pipeline.
pub struct StdoutPipelineReporter {
    out: Box<dyn Write + Send>,
    published: usize,
    with_insert_errors: usize,
    skipped: usize,
}

impl StdoutPipelineReporter {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out,
            published: 0,
            with_insert_errors: 0,
            skipped: 0,
        }
    }

    /// Returns the formatted row summary, or `None` if no rows were seen.
    pub fn summary_string(&self) -> Option<String> {
        if self.published == 0 && self.skipped == 0 {
            return None;
        }
        Some(format!(
            "Published {} row(s) ({} with insert errors), skipped {} unparseable row(s)",
            self.published, self.with_insert_errors, self.skipped
        ))
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            log::warn!("Failed to write report output: {e}");
        }
    }
}

impl Default for StdoutPipelineReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// One display line per face, or `None` when the annotation carries neither
/// a confidence nor a bounding box.
fn describe_face(number: usize, face: &Face) -> Option<String> {
    let confidence = face.detection_confidence();
    let vertices = face.bounding_vertices();
    if confidence.is_none() && vertices.is_none() {
        return None;
    }

    let mut line = format!("  Face {number}:");
    if let Some(confidence) = confidence {
        line.push_str(&format!(" confidence {confidence:.2}"));
    }
    if let Some(vertices) = vertices {
        let points: Vec<String> = vertices.iter().map(|(x, y)| format!("({x},{y})")).collect();
        line.push_str(&format!(" box {}", points.join(" ")));
    }
    Some(line)
}

impl PipelineReporter for StdoutPipelineReporter {
    fn detection(&mut self, record: &DetectionRecord) {
        self.emit(&record.summary());
        for (i, face) in record.faces().iter().enumerate() {
            if let Some(line) = describe_face(i + 1, face) {
                self.emit(&line);
            }
        }
        if let Some(error) = record.error() {
            self.emit(&format!("Service reported an error: {error}"));
        }
    }

    fn exported(&mut self, object: &ObjectRef, acknowledgement: &Value, record: &DetectionRecord) {
        self.emit(&format!("> Composed files into {object}"));
        self.emit(&pretty(acknowledgement));
        self.emit("> Data exported:");
        self.emit(&pretty(&record.to_json()));
    }

    fn row_published(&mut self, result: &PublishResult) {
        self.published += 1;
        if !result.is_clean() {
            self.with_insert_errors += 1;
        }
        self.emit(&result.response.to_string());
    }

    fn row_skipped(&mut self, error: &RowParseError) {
        self.skipped += 1;
        self.emit(&format!("Skipped: {error}"));
    }

    fn summary(&mut self) {
        if let Some(summary) = self.summary_string() {
            self.emit(&summary);
        }
        if let Err(e) = self.out.flush() {
            log::warn!("Failed to flush report output: {e}");
        }
    }
}
