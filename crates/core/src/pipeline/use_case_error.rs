use thiserror::Error;

use crate::detection::domain::face_detection_adapter::AdapterError;
use crate::detection::infrastructure::image_file_loader::ImageReadError;
use crate::ingestion::domain::row_publisher::PublishError;
use crate::storage::domain::object_store::StorageError;

/// Fatal failure of a use case. Row parse errors are not in here: the stream
/// use case reports them and moves on to the next row.
#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error(transparent)]
    ReadImage(#[from] ImageReadError),
    #[error(transparent)]
    Detect(#[from] AdapterError),
    #[error(transparent)]
    Export(#[from] StorageError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}
