//! Serialized descriptor documents.

use spritepub_spec::DataKind;

use crate::plist::PlistValue;

/// A descriptor document produced by a serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDocument {
    /// Property-list tree, encoded to XML on render.
    PropertyList(PlistValue),
    /// Already-formatted text (JSON manifests, scene descriptions).
    Text(String),
}

impl ExportDocument {
    /// Renders the document to the exact text written to disk.
    pub fn render(&self) -> String {
        match self {
            ExportDocument::PropertyList(value) => value.to_xml(),
            ExportDocument::Text(text) => text.clone(),
        }
    }

    /// BLAKE3 hex digest of the rendered document.
    pub fn content_hash(&self) -> String {
        blake3::hash(self.render().as_bytes()).to_hex().to_string()
    }

    /// Returns the text, if this is a text document.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExportDocument::Text(text) => Some(text),
            ExportDocument::PropertyList(_) => None,
        }
    }

    /// Returns the property-list tree, if this is a property list.
    pub fn as_plist(&self) -> Option<&PlistValue> {
        match self {
            ExportDocument::PropertyList(value) => Some(value),
            ExportDocument::Text(_) => None,
        }
    }
}

/// In-memory result of one serializer call: `{data, format}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// The serialized document.
    pub data: ExportDocument,
    /// Declared output file kind.
    pub format: DataKind,
}

impl ExportResult {
    /// Creates a property-list result.
    pub fn plist(value: PlistValue) -> Self {
        Self {
            data: ExportDocument::PropertyList(value),
            format: DataKind::Plist,
        }
    }

    /// Creates a JSON result from formatted text.
    pub fn json(text: String) -> Self {
        Self {
            data: ExportDocument::Text(text),
            format: DataKind::Json,
        }
    }

    /// Creates a scene-description result.
    pub fn tscn(text: String) -> Self {
        Self {
            data: ExportDocument::Text(text),
            format: DataKind::Tscn,
        }
    }
}
