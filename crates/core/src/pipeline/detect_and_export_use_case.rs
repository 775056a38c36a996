use std::path::Path;

use crate::detection::domain::detection_record::DetectionRecord;
use crate::detection::domain::face_detection_adapter::FaceDetectionAdapter;
use crate::detection::infrastructure::image_file_loader::read_image;
use crate::pipeline::pipeline_reporter::PipelineReporter;
use crate::pipeline::use_case_error::UseCaseError;
use crate::storage::domain::detection_exporter::DetectionExporter;
use crate::storage::domain::object_store::ObjectRef;

/// Image export pipeline: read → detect → report → upload.
pub struct DetectAndExportUseCase {
    adapter: FaceDetectionAdapter,
    exporter: DetectionExporter,
    reporter: Box<dyn PipelineReporter>,
    max_results: u32,
}

impl DetectAndExportUseCase {
    pub fn new(
        adapter: FaceDetectionAdapter,
        exporter: DetectionExporter,
        reporter: Box<dyn PipelineReporter>,
        max_results: u32,
    ) -> Self {
        Self {
            adapter,
            exporter,
            reporter,
            max_results,
        }
    }

    pub fn execute(
        &mut self,
        image_path: &Path,
        object: &ObjectRef,
    ) -> Result<DetectionRecord, UseCaseError> {
        let image = read_image(image_path)?;
        let record = self.adapter.detect(&image, self.max_results)?;
        self.reporter.detection(&record);

        let acknowledgement = self.exporter.export(object, &record)?;
        self.reporter.exported(object, &acknowledgement, &record);
        self.reporter.summary();

        Ok(record)
    }
}
