//! Error and warning types shared by the export layer.

use thiserror::Error;

/// Common trait for errors surfaced by the export layer.
///
/// Every error type in the workspace implements this trait so callers can
/// report failures uniformly:
/// - a stable code for programmatic handling
/// - a human-readable message
/// - a category grouping related errors
///
/// # Example
///
/// ```ignore
/// use spritepub_spec::error::CodedError;
///
/// fn report<E: CodedError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait CodedError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "GEOMETRY_001" or "EXPORT_002".
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category (e.g., "geometry", "export", "writer").
    fn category(&self) -> &'static str;
}

/// Errors raised while constructing or loading frame geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Frame rectangle data is inconsistent with the source size.
    #[error("malformed geometry{}: {reason}", frame_label(.name))]
    MalformedGeometry {
        /// Sprite name, or empty when the frame is not yet named.
        name: String,
        /// What is inconsistent.
        reason: String,
    },

    /// The same sprite key was inserted twice into a frame set.
    #[error("duplicate sprite frame: '{0}'")]
    DuplicateFrame(String),
}

/// ` for frame '<name>'`, or nothing for an unnamed frame.
fn frame_label(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!(" for frame '{}'", name)
    }
}

impl GeometryError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        GeometryError::MalformedGeometry {
            name: String::new(),
            reason: reason.into(),
        }
    }

    /// Attaches the sprite name to a malformed-geometry error.
    pub fn for_frame(self, frame_name: &str) -> Self {
        match self {
            GeometryError::MalformedGeometry { reason, .. } => GeometryError::MalformedGeometry {
                name: frame_name.to_string(),
                reason,
            },
            other => other,
        }
    }
}

impl CodedError for GeometryError {
    fn code(&self) -> &'static str {
        match self {
            GeometryError::MalformedGeometry { .. } => "GEOMETRY_001",
            GeometryError::DuplicateFrame(_) => "GEOMETRY_002",
        }
    }

    fn category(&self) -> &'static str {
        "geometry"
    }
}

/// Errors raised when an export context lacks an input a serializer needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A required field is absent or empty.
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
}

impl CodedError for ContextError {
    fn code(&self) -> &'static str {
        "CONTEXT_001"
    }

    fn category(&self) -> &'static str {
        "context"
    }
}

/// Errors raised when loading packer output or export contexts from JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    /// JSON parsing error (includes geometry rejected during parsing).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl CodedError for LoadError {
    fn code(&self) -> &'static str {
        "LOAD_001"
    }

    fn category(&self) -> &'static str {
        "load"
    }
}

/// Warning codes reported alongside successful operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: A format identifier was registered more than once
    FormatReplaced,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::FormatReplaced => "W001",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A caller-facing warning with code and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
}

impl Warning {
    /// Creates a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_codes() {
        let err = GeometryError::malformed("bad").for_frame("hero.png");
        assert_eq!(err.code(), "GEOMETRY_001");
        assert_eq!(err.category(), "geometry");
        assert_eq!(
            err.message(),
            "malformed geometry for frame 'hero.png': bad"
        );

        let err = GeometryError::DuplicateFrame("a".to_string());
        assert_eq!(err.code(), "GEOMETRY_002");
    }

    #[test]
    fn test_unnamed_geometry_error_omits_frame() {
        let err = GeometryError::malformed("negative size");
        assert_eq!(err.to_string(), "malformed geometry: negative size");
    }

    #[test]
    fn test_for_frame_keeps_duplicate_errors() {
        let err = GeometryError::DuplicateFrame("a".to_string()).for_frame("b");
        assert_eq!(err, GeometryError::DuplicateFrame("a".to_string()));
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::new(WarningCode::FormatReplaced, "format 'json' replaced");
        assert_eq!(warning.to_string(), "W001: format 'json' replaced");
    }
}
