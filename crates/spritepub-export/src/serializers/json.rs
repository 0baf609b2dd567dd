//! JSON manifest descriptors.
//!
//! Three shapes are produced:
//! - `json`: the legacy name-keyed mapping (`{name: {frame, sourceSize, rotated}}`)
//! - `pixijs`: name-keyed trimmed frames plus a `meta` block
//! - `phaser`: an array of trimmed frames with `filename`, plus a `meta` block
//!
//! All output is pretty-printed with one tab per indentation level.
//! The manifest types also deserialize, so a written manifest can be read
//! back into frame geometry.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer as SerdeSerializer};
use spritepub_spec::{
    ExportContext, GeometryError, Point, Rect, Size, SpriteFrame, SpriteFrameSet,
};

use crate::document::ExportResult;
use crate::error::ExportError;
use crate::naming::file_name;
use crate::registry::Serializer;

/// Rectangle in manifest notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl From<&Rect> for ManifestRect {
    fn from(rect: &Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.width,
            h: rect.height,
        }
    }
}

impl From<ManifestRect> for Rect {
    fn from(rect: ManifestRect) -> Self {
        Rect::new(rect.x, rect.y, rect.w, rect.h)
    }
}

/// Size in manifest notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSize {
    pub w: i32,
    pub h: i32,
}

impl From<&Size> for ManifestSize {
    fn from(size: &Size) -> Self {
        Self {
            w: size.width,
            h: size.height,
        }
    }
}

impl From<ManifestSize> for Size {
    fn from(size: ManifestSize) -> Self {
        Size::new(size.w, size.h)
    }
}

/// Name-keyed trimmed frame (`pixijs`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedManifestFrame {
    pub frame: ManifestRect,
    pub rotated: bool,
    pub sprite_source_size: ManifestRect,
    pub source_size: ManifestSize,
    pub trimmed: bool,
}

/// Array-entry trimmed frame (`phaser`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayManifestFrame {
    pub filename: String,
    pub frame: ManifestRect,
    pub sprite_source_size: ManifestRect,
    pub source_size: ManifestSize,
    pub trimmed: bool,
    pub rotated: bool,
}

/// Legacy name-keyed frame (`json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyManifestFrame {
    pub frame: Rect,
    pub source_size: Size,
    pub rotated: bool,
}

/// The `meta` block of trimmed manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestMeta {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

/// A trimmed manifest: `{frames, meta}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonManifest<F> {
    pub frames: F,
    pub meta: ManifestMeta,
}

/// JSON object whose keys keep their order through serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFrames<T>(pub Vec<(String, T)>);

impl<T: Serialize> Serialize for NamedFrames<T> {
    fn serialize<S: SerdeSerializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for NamedFrames<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NamedFramesVisitor(PhantomData))
    }
}

struct NamedFramesVisitor<T>(PhantomData<T>);

impl<'de, T: DeserializeOwned> Visitor<'de> for NamedFramesVisitor<T> {
    type Value = NamedFrames<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object keyed by sprite name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();
        while let Some((name, value)) = access.next_entry::<String, T>()? {
            entries.push((name, value));
        }
        Ok(NamedFrames(entries))
    }
}

impl KeyedManifestFrame {
    fn from_frame(frame: &SpriteFrame) -> Self {
        Self {
            frame: frame.frame().into(),
            rotated: frame.rotated(),
            sprite_source_size: frame.source_color_rect().into(),
            source_size: frame.source_size().into(),
            trimmed: frame.is_trimmed(),
        }
    }

    /// Rebuilds validated frame geometry for the entry stored under `name`;
    /// the offset is not part of the manifest.
    pub fn to_sprite_frame(&self, name: &str) -> Result<SpriteFrame, GeometryError> {
        SpriteFrame::new(
            self.frame.into(),
            Point::default(),
            self.sprite_source_size.into(),
            self.source_size.into(),
            self.rotated,
        )
        .map_err(|e| e.for_frame(name))
    }
}

impl ArrayManifestFrame {
    fn from_frame(name: &str, frame: &SpriteFrame) -> Self {
        Self {
            filename: name.strip_prefix("./").unwrap_or(name).to_string(),
            frame: frame.frame().into(),
            sprite_source_size: frame.source_color_rect().into(),
            source_size: frame.source_size().into(),
            trimmed: frame.is_trimmed(),
            rotated: frame.rotated(),
        }
    }

    /// Rebuilds validated frame geometry; the offset is not part of the manifest.
    pub fn to_sprite_frame(&self) -> Result<SpriteFrame, GeometryError> {
        SpriteFrame::new(
            self.frame.into(),
            Point::default(),
            self.sprite_source_size.into(),
            self.source_size.into(),
            self.rotated,
        )
        .map_err(|e| e.for_frame(&self.filename))
    }
}

/// Pretty-prints a value with one tab per indentation level.
pub fn to_tab_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn manifest_meta(context: &ExportContext) -> Result<ManifestMeta, ExportError> {
    let image = context.require_image()?;
    Ok(ManifestMeta {
        image: file_name(image).to_string(),
        mask: context.mask_image().map(|mask| file_name(mask).to_string()),
    })
}

/// Legacy name-keyed manifest without trim data (`json`).
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyJson;

impl Serializer for LegacyJson {
    fn serialize(
        &self,
        frames: &SpriteFrameSet,
        _context: &ExportContext,
    ) -> Result<ExportResult, ExportError> {
        let entries = frames
            .iter()
            .map(|(name, frame)| {
                let entry = LegacyManifestFrame {
                    frame: *frame.frame(),
                    source_size: *frame.source_size(),
                    rotated: frame.rotated(),
                };
                (name.to_string(), entry)
            })
            .collect();
        Ok(ExportResult::json(to_tab_pretty(&NamedFrames(entries))?))
    }
}

/// Name-keyed trimmed manifest (`pixijs`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PixiJson;

impl Serializer for PixiJson {
    fn serialize(
        &self,
        frames: &SpriteFrameSet,
        context: &ExportContext,
    ) -> Result<ExportResult, ExportError> {
        let meta = manifest_meta(context)?;
        let entries = frames
            .iter()
            .map(|(name, frame)| (name.to_string(), KeyedManifestFrame::from_frame(frame)))
            .collect();
        let manifest = JsonManifest {
            frames: NamedFrames(entries),
            meta,
        };
        Ok(ExportResult::json(to_tab_pretty(&manifest)?))
    }
}

/// Array-shaped trimmed manifest (`phaser`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaserJson;

impl Serializer for PhaserJson {
    fn serialize(
        &self,
        frames: &SpriteFrameSet,
        context: &ExportContext,
    ) -> Result<ExportResult, ExportError> {
        let meta = manifest_meta(context)?;
        let entries: Vec<ArrayManifestFrame> = frames
            .iter()
            .map(|(name, frame)| ArrayManifestFrame::from_frame(name, frame))
            .collect();
        let manifest = JsonManifest {
            frames: entries,
            meta,
        };
        Ok(ExportResult::json(to_tab_pretty(&manifest)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spritepub_spec::DataKind;

    fn frames() -> SpriteFrameSet {
        let trimmed = SpriteFrame::new(
            Rect::new(0, 0, 30, 40),
            Point::new(1, 0),
            Rect::new(3, 4, 30, 40),
            Size::new(36, 48),
            false,
        )
        .unwrap();
        let full = SpriteFrame::untrimmed(30, 0, 16, 16).unwrap();
        SpriteFrameSet::new()
            .with_frame("./hero.png", trimmed)
            .unwrap()
            .with_frame("coin.png", full)
            .unwrap()
    }

    fn context() -> ExportContext {
        ExportContext::new("out/atlas").with_image("a/b\\c/tex.png")
    }

    #[test]
    fn test_legacy_layout() {
        let frames = SpriteFrameSet::new()
            .with_frame("coin.png", SpriteFrame::untrimmed(2, 3, 16, 8).unwrap())
            .unwrap();
        let result = LegacyJson.serialize(&frames, &ExportContext::new("atlas")).unwrap();
        assert_eq!(result.format, DataKind::Json);

        let expected = "{\n\
\t\"coin.png\": {\n\
\t\t\"frame\": {\n\
\t\t\t\"x\": 2,\n\
\t\t\t\"y\": 3,\n\
\t\t\t\"width\": 16,\n\
\t\t\t\"height\": 8\n\
\t\t},\n\
\t\t\"sourceSize\": {\n\
\t\t\t\"width\": 16,\n\
\t\t\t\"height\": 8\n\
\t\t},\n\
\t\t\"rotated\": false\n\
\t}\n\
}";
        assert_eq!(result.data.as_text().unwrap(), expected);
    }

    #[test]
    fn test_legacy_does_not_need_image() {
        let result = LegacyJson.serialize(&SpriteFrameSet::new(), &ExportContext::new("a"));
        assert_eq!(result.unwrap().data.render(), "{}");
    }

    #[test]
    fn test_pixi_frames_keep_order_and_trim_flag() {
        let result = PixiJson.serialize(&frames(), &context()).unwrap();
        let text = result.data.as_text().unwrap();
        assert!(text.find("./hero.png").unwrap() < text.find("coin.png").unwrap());

        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value["frames"]["./hero.png"]["trimmed"], true);
        assert_eq!(value["frames"]["coin.png"]["trimmed"], false);
        assert_eq!(value["frames"]["./hero.png"]["spriteSourceSize"]["x"], 3);
        assert_eq!(value["frames"]["./hero.png"]["sourceSize"]["h"], 48);
        assert_eq!(value["meta"]["image"], "tex.png");
        assert!(value["meta"].get("mask").is_none());
    }

    #[test]
    fn test_pixi_entry_key_order() {
        let result = PixiJson.serialize(&frames(), &context()).unwrap();
        let text = result.data.as_text().unwrap();
        let positions: Vec<usize> = ["\"frame\"", "\"rotated\"", "\"spriteSourceSize\"", "\"sourceSize\"", "\"trimmed\""]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_phaser_array_shape() {
        let ctx = context().with_mask("out\\tex_mask.png");
        let result = PhaserJson.serialize(&frames(), &ctx).unwrap();
        let text = result.data.as_text().unwrap();
        assert!(text.starts_with("{\n\t\"frames\": [\n\t\t{\n\t\t\t\"filename\": \"hero.png\""));

        let manifest: JsonManifest<Vec<ArrayManifestFrame>> = serde_json::from_str(text).unwrap();
        assert_eq!(manifest.frames.len(), 2);
        assert_eq!(manifest.frames[0].filename, "hero.png");
        assert!(manifest.frames[0].trimmed);
        assert_eq!(manifest.frames[1].filename, "coin.png");
        assert!(!manifest.frames[1].trimmed);
        assert_eq!(manifest.meta.image, "tex.png");
        assert_eq!(manifest.meta.mask.as_deref(), Some("tex_mask.png"));
    }

    #[test]
    fn test_phaser_strips_only_leading_dot_slash() {
        let frame = SpriteFrame::untrimmed(0, 0, 4, 4).unwrap();
        let entry = ArrayManifestFrame::from_frame("walk/./0.png", &frame);
        assert_eq!(entry.filename, "walk/./0.png");
        let entry = ArrayManifestFrame::from_frame("././0.png", &frame);
        assert_eq!(entry.filename, "./0.png");
    }

    #[test]
    fn test_trimmed_manifests_require_image() {
        let ctx = ExportContext::new("atlas");
        assert!(matches!(
            PixiJson.serialize(&frames(), &ctx),
            Err(ExportError::MissingRequiredField("images.rgb"))
        ));
        assert!(matches!(
            PhaserJson.serialize(&frames(), &ctx),
            Err(ExportError::MissingRequiredField("images.rgb"))
        ));
    }

    #[test]
    fn test_keyed_manifest_round_trip() {
        let original = frames();
        let result = PixiJson.serialize(&original, &context()).unwrap();
        let manifest: JsonManifest<NamedFrames<KeyedManifestFrame>> =
            serde_json::from_str(result.data.as_text().unwrap()).unwrap();

        for ((name, entry), (original_name, original_frame)) in manifest.frames.0.iter().zip(original.iter()) {
            assert_eq!(name, original_name);
            let rebuilt = entry.to_sprite_frame(name).unwrap();
            assert_eq!(rebuilt.frame(), original_frame.frame());
            assert_eq!(rebuilt.source_color_rect(), original_frame.source_color_rect());
            assert_eq!(rebuilt.source_size(), original_frame.source_size());
            assert_eq!(rebuilt.rotated(), original_frame.rotated());
        }
    }

    #[test]
    fn test_keyed_manifest_error_names_frame() {
        let json = r#"{
            "frame": {"x": 0, "y": 0, "w": 4, "h": 4},
            "rotated": false,
            "trimmed": true,
            "spriteSourceSize": {"x": 0, "y": 0, "w": 4, "h": 4},
            "sourceSize": {"w": 2, "h": 2}
        }"#;
        let entry: KeyedManifestFrame = serde_json::from_str(json).unwrap();
        let err = entry.to_sprite_frame("walk/0.png").unwrap_err();
        assert!(
            err.to_string().starts_with("malformed geometry for frame 'walk/0.png': "),
            "{}",
            err
        );
    }

    #[test]
    fn test_tab_pretty_matches_stringify() {
        let value = serde_json::json!({"a": [1, 2], "b": {}});
        assert_eq!(to_tab_pretty(&value).unwrap(), "{\n\t\"a\": [\n\t\t1,\n\t\t2\n\t],\n\t\"b\": {}\n}");
    }
}
