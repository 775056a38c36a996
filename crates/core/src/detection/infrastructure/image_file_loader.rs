use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageReadError {
    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image file {path} is empty")]
    Empty { path: PathBuf },
}

/// Reads an image file into memory for upload.
///
/// The bytes are sent to the service as-is; the format is only sniffed for
/// logging, since the service accepts more formats than this crate decodes.
pub fn read_image(path: &Path) -> Result<Vec<u8>, ImageReadError> {
    let bytes = fs::read(path).map_err(|source| ImageReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(ImageReadError::Empty {
            path: path.to_path_buf(),
        });
    }

    match image::guess_format(&bytes) {
        Ok(format) => log::info!(
            "Loaded {} ({} bytes, {:?})",
            path.display(),
            bytes.len(),
            format
        ),
        Err(_) => log::warn!(
            "Loaded {} ({} bytes) but could not recognize the image format",
            path.display(),
            bytes.len()
        ),
    }
    Ok(bytes)
}
