//! Export and writer error types.

use std::path::PathBuf;

use spritepub_spec::{CodedError, ContextError, GeometryError};
use thiserror::Error;

/// Errors that can occur while serializing or publishing an atlas.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Frame geometry is inconsistent with its source size.
    #[error(transparent)]
    MalformedGeometry(GeometryError),

    /// The same sprite name was added to a frame set twice.
    #[error("duplicate sprite frame: '{0}'")]
    DuplicateFrame(String),

    /// No serializer is registered under the requested format id.
    #[error("unknown export format: '{0}'")]
    UnknownFormat(String),

    /// A serializer-specific required input is absent.
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// JSON encoding error.
    #[error("JSON encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The writer collaborator failed.
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl From<GeometryError> for ExportError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::DuplicateFrame(name) => ExportError::DuplicateFrame(name),
            malformed @ GeometryError::MalformedGeometry { .. } => {
                ExportError::MalformedGeometry(malformed)
            }
        }
    }
}

impl From<ContextError> for ExportError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::MissingRequiredField(field) => ExportError::MissingRequiredField(field),
        }
    }
}

impl CodedError for ExportError {
    fn code(&self) -> &'static str {
        match self {
            ExportError::MalformedGeometry(_) => "EXPORT_001",
            ExportError::UnknownFormat(_) => "EXPORT_002",
            ExportError::MissingRequiredField(_) => "EXPORT_003",
            ExportError::Encoding(_) => "EXPORT_004",
            ExportError::Write(_) => "EXPORT_005",
            ExportError::DuplicateFrame(_) => "EXPORT_006",
        }
    }

    fn category(&self) -> &'static str {
        "export"
    }
}

/// Errors reported by an [`AtlasWriter`](crate::writer::AtlasWriter).
#[derive(Debug, Error)]
pub enum WriteError {
    /// I/O error while writing a file.
    #[error("failed to write '{path}': {source}")]
    Io {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The writer was asked for an image but holds no encoded image data.
    #[error("no image data available for '{0}'")]
    NoImageData(PathBuf),
}

impl CodedError for WriteError {
    fn code(&self) -> &'static str {
        match self {
            WriteError::Io { .. } => "WRITER_001",
            WriteError::NoImageData(_) => "WRITER_002",
        }
    }

    fn category(&self) -> &'static str {
        "writer"
    }
}
