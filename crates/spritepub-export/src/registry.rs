//! Format registry and dispatch.
//!
//! Serializers are registered under an explicit format id and selected by
//! that id at export time. Two entry points exist:
//! - [`FormatRegistry::dispatch`] returns the document for the caller to persist
//! - [`FormatRegistry::publish`] hands the document and image to an [`AtlasWriter`]

use std::collections::HashMap;
use std::path::PathBuf;

use spritepub_spec::{DataKind, ExportContext, SpriteFrameSet, Warning, WarningCode};
use tracing::{debug, info, warn};

use crate::document::ExportResult;
use crate::error::ExportError;
use crate::serializers::{
    Cocos2dPlist, GodotAnimation, GodotAnimations, GodotParts, LegacyJson, PhaserJson, PixiJson,
};
use crate::writer::AtlasWriter;

/// A descriptor serializer for one target format.
///
/// Implementations are pure functions of their inputs. Plain functions and
/// closures with the matching signature implement this trait too.
pub trait Serializer: Send + Sync {
    /// Serializes `frames` into a complete document.
    fn serialize(
        &self,
        frames: &SpriteFrameSet,
        context: &ExportContext,
    ) -> Result<ExportResult, ExportError>;
}

impl<F> Serializer for F
where
    F: Fn(&SpriteFrameSet, &ExportContext) -> Result<ExportResult, ExportError> + Send + Sync,
{
    fn serialize(
        &self,
        frames: &SpriteFrameSet,
        context: &ExportContext,
    ) -> Result<ExportResult, ExportError> {
        self(frames, context)
    }
}

/// Format ids of the built-in serializers.
pub mod format_ids {
    pub const COCOS2D: &str = "cocos2d";
    pub const COCOS2D_V3: &str = "cocos2d-v3";
    pub const JSON: &str = "json";
    pub const PIXIJS: &str = "pixijs";
    pub const PHASER: &str = "phaser";
    pub const GODOT_PARTS: &str = "godot-parts";
    pub const GODOT: &str = "godot";
    pub const GODOT_ANIMATIONS: &str = "godot-animations";
}

/// Outcome of a writer-delegating export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Format id that was exported.
    pub format_id: String,
    /// Kind of the descriptor written.
    pub kind: DataKind,
    /// Where the descriptor was written.
    pub data_path: PathBuf,
    /// Where the image was written.
    pub image_path: PathBuf,
    /// BLAKE3 hash of the rendered descriptor.
    pub hash: String,
}

/// Maps format ids to serializers.
#[derive(Default)]
pub struct FormatRegistry {
    serializers: HashMap<String, Box<dyn Serializer>>,
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in serializer.
    pub fn with_builtin_formats() -> Self {
        let mut registry = Self::new();
        registry.register(format_ids::COCOS2D, Cocos2dPlist::legacy());
        registry.register(format_ids::COCOS2D_V3, Cocos2dPlist::mesh());
        registry.register(format_ids::JSON, LegacyJson);
        registry.register(format_ids::PIXIJS, PixiJson);
        registry.register(format_ids::PHASER, PhaserJson);
        registry.register(format_ids::GODOT_PARTS, GodotParts);
        registry.register(format_ids::GODOT, GodotAnimation);
        registry.register(format_ids::GODOT_ANIMATIONS, GodotAnimations);
        registry
    }

    /// Registers `serializer` under `format_id`.
    ///
    /// The last registration for an id wins. Replacing an existing id returns
    /// a [`WarningCode::FormatReplaced`] warning for the caller.
    pub fn register<S>(&mut self, format_id: impl Into<String>, serializer: S) -> Option<Warning>
    where
        S: Serializer + 'static,
    {
        let format_id = format_id.into();
        let replaced = self
            .serializers
            .insert(format_id.clone(), Box::new(serializer))
            .is_some();
        if replaced {
            warn!(format = %format_id, "export format registered twice; replacing previous serializer");
            Some(Warning::new(
                WarningCode::FormatReplaced,
                format!("format '{}' was already registered and has been replaced", format_id),
            ))
        } else {
            None
        }
    }

    /// Returns true if a serializer is registered under `format_id`.
    pub fn contains(&self, format_id: &str) -> bool {
        self.serializers.contains_key(format_id)
    }

    /// Registered format ids, sorted.
    pub fn formats(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.serializers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Serializes `frames` with the serializer registered under `format_id`.
    ///
    /// # Errors
    ///
    /// [`ExportError::UnknownFormat`] if nothing is registered under the id,
    /// otherwise whatever the serializer reports.
    pub fn dispatch(
        &self,
        format_id: &str,
        frames: &SpriteFrameSet,
        context: &ExportContext,
    ) -> Result<ExportResult, ExportError> {
        let serializer = self
            .serializers
            .get(format_id)
            .ok_or_else(|| ExportError::UnknownFormat(format_id.to_string()))?;
        debug!(format = format_id, frames = frames.len(), "serializing sprite frames");
        serializer.serialize(frames, context)
    }

    /// Serializes `frames` and persists image and descriptor through `writer`.
    ///
    /// The document and both destination paths are fully resolved before the
    /// writer is called, so a serializer or context error never leaves a
    /// partial export behind.
    pub fn publish<W>(
        &self,
        format_id: &str,
        frames: &SpriteFrameSet,
        context: &ExportContext,
        writer: &W,
    ) -> Result<PublishReport, ExportError>
    where
        W: AtlasWriter + ?Sized,
    {
        let result = self.dispatch(format_id, frames, context)?;
        let data_path = context.resolve_data_path(result.format)?;
        let image_path = context.resolve_image_path()?;
        let hash = result.data.content_hash();

        writer.write_image(&image_path)?;
        writer.write_data(&data_path, &result.data, result.format)?;

        info!(
            format = format_id,
            data = %data_path.display(),
            image = %image_path.display(),
            "published sprite sheet"
        );

        Ok(PublishReport {
            format_id: format_id.to_string(),
            kind: result.format,
            data_path,
            image_path,
            hash,
        })
    }
}
