//! Export context supplied by the packing stage.
//!
//! The context bundles everything a serializer needs besides the frames
//! themselves: where the descriptor goes, which image files it refers to, an
//! optional scaling variant, and the optional whole-texture size. Paths are
//! already resolved by the caller; the export layer only derives file names
//! from them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ContextError, LoadError};
use crate::geometry::Size;
use crate::output::DataKind;

/// Image files produced alongside the descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageFiles {
    /// Primary color image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
    /// Optional separate alpha mask image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

/// Scaling variant the export belongs to (e.g. `@2x`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScalingVariant {
    /// Subfolder the variant's files are written into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
}

impl ScalingVariant {
    /// Creates a variant written into `folder_name`.
    pub fn in_folder(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: Some(folder_name.into()),
        }
    }
}

/// Collaborator-supplied inputs for one export call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExportContext {
    /// Output base path of the descriptor, without extension.
    pub data_path: String,
    /// Image file references.
    #[serde(default)]
    pub images: ImageFiles,
    /// Scaling variant descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ScalingVariant>,
    /// Whole-texture size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_size: Option<Size>,
}

impl ExportContext {
    /// Creates a context writing to `data_path` (no extension).
    pub fn new(data_path: impl Into<String>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    /// Sets the primary color image.
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.images.rgb = Some(path.into());
        self
    }

    /// Sets the alpha mask image.
    pub fn with_mask(mut self, path: impl Into<String>) -> Self {
        self.images.mask = Some(path.into());
        self
    }

    /// Sets the scaling variant.
    pub fn with_variant(mut self, variant: ScalingVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets the whole-texture size.
    pub fn with_texture_size(mut self, size: Size) -> Self {
        self.texture_size = Some(size);
        self
    }

    /// Parses a context from JSON.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the primary image path.
    ///
    /// # Errors
    ///
    /// [`ContextError::MissingRequiredField`] if no non-empty rgb image is set.
    pub fn require_image(&self) -> Result<&str, ContextError> {
        match self.images.rgb.as_deref() {
            Some(path) if !path.is_empty() => Ok(path),
            _ => Err(ContextError::MissingRequiredField("images.rgb")),
        }
    }

    /// Returns the mask image path, treating an empty string as absent.
    pub fn mask_image(&self) -> Option<&str> {
        self.images.mask.as_deref().filter(|path| !path.is_empty())
    }

    /// Destination of the descriptor file for `kind`.
    ///
    /// The variant folder, if any, is inserted between the base directory and
    /// the file name: `out/atlas` with folder `hd` becomes `out/hd/atlas.json`.
    pub fn resolve_data_path(&self, kind: DataKind) -> Result<PathBuf, ContextError> {
        if self.data_path.is_empty() {
            return Err(ContextError::MissingRequiredField("dataPath"));
        }
        let mut path = self.in_variant_folder(Path::new(&self.data_path));
        let mut file_name = path.file_name().unwrap_or_default().to_os_string();
        file_name.push(".");
        file_name.push(kind.extension());
        path.set_file_name(file_name);
        Ok(path)
    }

    /// Destination of the primary image, placed with the same variant folder.
    pub fn resolve_image_path(&self) -> Result<PathBuf, ContextError> {
        let image = self.require_image()?;
        Ok(self.in_variant_folder(Path::new(image)))
    }

    fn variant_folder(&self) -> Option<&str> {
        self.variant
            .as_ref()
            .and_then(|variant| variant.folder_name.as_deref())
            .filter(|folder| !folder.is_empty())
    }

    fn in_variant_folder(&self, path: &Path) -> PathBuf {
        match (self.variant_folder(), path.file_name()) {
            (Some(folder), Some(file_name)) => {
                let parent = path.parent().unwrap_or_else(|| Path::new(""));
                parent.join(folder).join(file_name)
            }
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder() {
        let ctx = ExportContext::new("out/atlas")
            .with_image("out/atlas.png")
            .with_mask("out/atlas_mask.png")
            .with_variant(ScalingVariant::in_folder("hd"))
            .with_texture_size(Size::new(512, 256));

        assert_eq!(ctx.require_image().unwrap(), "out/atlas.png");
        assert_eq!(ctx.mask_image(), Some("out/atlas_mask.png"));
        assert_eq!(ctx.texture_size, Some(Size::new(512, 256)));
    }

    #[test]
    fn test_missing_image() {
        let ctx = ExportContext::new("out/atlas");
        assert_eq!(
            ctx.require_image().unwrap_err(),
            ContextError::MissingRequiredField("images.rgb")
        );

        let ctx = ExportContext::new("out/atlas").with_image("");
        assert!(ctx.require_image().is_err());
    }

    #[test]
    fn test_empty_mask_is_absent() {
        let ctx = ExportContext::new("a").with_image("a.png").with_mask("");
        assert_eq!(ctx.mask_image(), None);
    }

    #[test]
    fn test_resolve_paths_without_variant() {
        let ctx = ExportContext::new("out/atlas").with_image("out/atlas.png");
        assert_eq!(
            ctx.resolve_data_path(DataKind::Plist).unwrap(),
            PathBuf::from("out/atlas.plist")
        );
        assert_eq!(ctx.resolve_image_path().unwrap(), PathBuf::from("out/atlas.png"));
    }

    #[test]
    fn test_resolve_paths_with_variant_folder() {
        let ctx = ExportContext::new("out/atlas.v2")
            .with_image("out/atlas.v2.png")
            .with_variant(ScalingVariant::in_folder("hd"));
        assert_eq!(
            ctx.resolve_data_path(DataKind::Json).unwrap(),
            PathBuf::from("out/hd/atlas.v2.json")
        );
        assert_eq!(
            ctx.resolve_image_path().unwrap(),
            PathBuf::from("out/hd/atlas.v2.png")
        );
    }

    #[test]
    fn test_variant_without_folder_is_ignored() {
        let ctx = ExportContext::new("atlas").with_variant(ScalingVariant::default());
        assert_eq!(
            ctx.resolve_data_path(DataKind::Tscn).unwrap(),
            PathBuf::from("atlas.tscn")
        );
    }

    #[test]
    fn test_empty_data_path() {
        let ctx = ExportContext::new("");
        assert_eq!(
            ctx.resolve_data_path(DataKind::Json).unwrap_err(),
            ContextError::MissingRequiredField("dataPath")
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "dataPath": "out/atlas",
            "images": {"rgb": "out/atlas.png"},
            "variant": {"folderName": "sd"},
            "textureSize": {"width": 128, "height": 64}
        }"#;
        let ctx = ExportContext::from_json(json).unwrap();
        assert_eq!(ctx.data_path, "out/atlas");
        assert_eq!(ctx.variant, Some(ScalingVariant::in_folder("sd")));
        assert_eq!(ctx.texture_size, Some(Size::new(128, 64)));
        assert_eq!(ctx.images.mask, None);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let json = r#"{"dataPath": "a", "format": "json"}"#;
        assert!(ExportContext::from_json(json).is_err());
    }
}
