use std::path::Path;

use crate::detection::domain::face_detection_adapter::FaceDetectionAdapter;
use crate::detection::infrastructure::image_file_loader::read_image;
use crate::ingestion::domain::row_publisher::RowPublisher;
use crate::ingestion::domain::table_ref::{Row, TableRef};
use crate::pipeline::pipeline_reporter::PipelineReporter;
use crate::pipeline::use_case_error::UseCaseError;
use crate::rows::domain::row_parser::RowParseError;

/// Counts of what happened to the rows of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub face_count: usize,
    pub published: usize,
    pub rows_with_insert_errors: usize,
    pub parse_failures: usize,
}

/// Row streaming pipeline: read → detect → report, then one publish per row.
///
/// Rows are published as they arrive, one row in and one row out. A row
/// that fails to parse is reported and skipped; a failed publish ends the
/// run with an error.
pub struct DetectAndStreamUseCase {
    adapter: FaceDetectionAdapter,
    publisher: RowPublisher,
    reporter: Box<dyn PipelineReporter>,
    destination: TableRef,
    max_results: u32,
}

impl DetectAndStreamUseCase {
    pub fn new(
        adapter: FaceDetectionAdapter,
        publisher: RowPublisher,
        reporter: Box<dyn PipelineReporter>,
        destination: TableRef,
        max_results: u32,
    ) -> Self {
        Self {
            adapter,
            publisher,
            reporter,
            destination,
            max_results,
        }
    }

    pub fn execute<I>(&mut self, image_path: &Path, rows: I) -> Result<StreamSummary, UseCaseError>
    where
        I: IntoIterator<Item = Result<Row, RowParseError>>,
    {
        let image = read_image(image_path)?;
        let record = self.adapter.detect(&image, self.max_results)?;
        self.reporter.detection(&record);

        let mut summary = StreamSummary {
            face_count: record.face_count(),
            ..StreamSummary::default()
        };

        for row in rows {
            match row {
                Ok(row) => {
                    let result = self.publisher.publish(&self.destination, row)?;
                    if !result.is_clean() {
                        log::warn!(
                            "Insert {} reported {} row error(s)",
                            result.insert_id,
                            result.insert_errors.len()
                        );
                        summary.rows_with_insert_errors += 1;
                    }
                    summary.published += 1;
                    self.reporter.row_published(&result);
                }
                Err(e) => {
                    log::warn!("{e}");
                    summary.parse_failures += 1;
                    self.reporter.row_skipped(&e);
                }
            }
        }

        self.reporter.summary();
        Ok(summary)
    }
}
