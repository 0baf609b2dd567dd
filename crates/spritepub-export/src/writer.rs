//! Writer seam for persisting descriptors and atlas images.

use std::fs;
use std::path::Path;

use spritepub_spec::DataKind;
use tracing::debug;

use crate::document::ExportDocument;
use crate::error::WriteError;

/// Destination for serialized descriptors and atlas images.
///
/// Methods take `&self` so one writer can serve several exports at once,
/// provided each export writes to distinct paths.
pub trait AtlasWriter {
    /// Persists a descriptor document of the given kind at `path`.
    fn write_data(
        &self,
        path: &Path,
        document: &ExportDocument,
        kind: DataKind,
    ) -> Result<(), WriteError>;

    /// Persists the atlas image at `path`.
    fn write_image(&self, path: &Path) -> Result<(), WriteError>;
}

/// Writes descriptors and pre-encoded image bytes to the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsWriter {
    image_data: Option<Vec<u8>>,
}

impl FsWriter {
    /// Creates a writer with no image data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the encoded atlas image written by [`AtlasWriter::write_image`].
    pub fn with_image_data(mut self, bytes: Vec<u8>) -> Self {
        self.image_data = Some(bytes);
        self
    }
}

impl AtlasWriter for FsWriter {
    fn write_data(
        &self,
        path: &Path,
        document: &ExportDocument,
        _kind: DataKind,
    ) -> Result<(), WriteError> {
        write_file(path, document.render().as_bytes())
    }

    fn write_image(&self, path: &Path) -> Result<(), WriteError> {
        let bytes = self
            .image_data
            .as_deref()
            .ok_or_else(|| WriteError::NoImageData(path.to_path_buf()))?;
        write_file(path, bytes)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let io_error = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    debug!(path = %path.display(), bytes = bytes.len(), "writing file");
    fs::write(path, bytes).map_err(io_error)
}
