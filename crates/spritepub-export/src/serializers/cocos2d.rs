//! cocos2d property-list descriptors (formats 2 and 3).

use std::collections::BTreeMap;

use spritepub_spec::{ExportContext, Point, Rect, Size, SpriteFrame, SpriteFrameSet, Triangles};

use crate::document::ExportResult;
use crate::error::ExportError;
use crate::naming::file_name;
use crate::plist::PlistValue;
use crate::registry::Serializer;

/// Property-list dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistDialect {
    /// `metadata.format = 2`: frame, offset, sourceSize, rotated.
    Legacy,
    /// `metadata.format = 3`: sprite/texture fields plus optional triangle mesh.
    Mesh,
}

impl PlistDialect {
    /// Value of `metadata.format`.
    pub fn version(&self) -> i64 {
        match self {
            PlistDialect::Legacy => 2,
            PlistDialect::Mesh => 3,
        }
    }
}

/// Serializer for cocos2d sprite-frame property lists.
#[derive(Debug, Clone, Copy)]
pub struct Cocos2dPlist {
    dialect: PlistDialect,
}

impl Cocos2dPlist {
    /// Format 2 serializer.
    pub fn legacy() -> Self {
        Self {
            dialect: PlistDialect::Legacy,
        }
    }

    /// Format 3 serializer with triangle-mesh support.
    pub fn mesh() -> Self {
        Self {
            dialect: PlistDialect::Mesh,
        }
    }

    /// The dialect this serializer emits.
    pub fn dialect(&self) -> PlistDialect {
        self.dialect
    }
}

impl Serializer for Cocos2dPlist {
    fn serialize(
        &self,
        frames: &SpriteFrameSet,
        context: &ExportContext,
    ) -> Result<ExportResult, ExportError> {
        let image = context.require_image()?;

        let mut metadata = BTreeMap::new();
        metadata.insert(
            "format".to_string(),
            PlistValue::from(self.dialect.version()),
        );
        metadata.insert(
            "textureFileName".to_string(),
            PlistValue::from(file_name(image)),
        );
        if self.dialect == PlistDialect::Mesh {
            if let Some(size) = &context.texture_size {
                metadata.insert("size".to_string(), PlistValue::from(size_string(size)));
            }
        }

        let mut entries = BTreeMap::new();
        for (name, frame) in frames.iter() {
            let entry = match self.dialect {
                PlistDialect::Legacy => legacy_frame(frame),
                PlistDialect::Mesh => mesh_frame(frame),
            };
            entries.insert(name.to_string(), PlistValue::from(entry));
        }

        let mut root = BTreeMap::new();
        root.insert("frames".to_string(), PlistValue::from(entries));
        root.insert("metadata".to_string(), PlistValue::from(metadata));

        Ok(ExportResult::plist(PlistValue::from(root)))
    }
}

fn legacy_frame(frame: &SpriteFrame) -> BTreeMap<String, PlistValue> {
    let mut entry = BTreeMap::new();
    entry.insert("frame".to_string(), rect_string(frame.frame()).into());
    entry.insert("offset".to_string(), point_string(frame.offset()).into());
    entry.insert(
        "sourceSize".to_string(),
        size_string(frame.source_size()).into(),
    );
    entry.insert("rotated".to_string(), frame.rotated().into());
    entry
}

fn mesh_frame(frame: &SpriteFrame) -> BTreeMap<String, PlistValue> {
    let mut entry = BTreeMap::new();
    entry.insert("aliases".to_string(), PlistValue::Array(Vec::new()));
    entry.insert(
        "spriteSize".to_string(),
        size_string(&frame.frame().size()).into(),
    );
    entry.insert(
        "spriteOffset".to_string(),
        point_string(frame.offset()).into(),
    );
    entry.insert(
        "spriteSourceSize".to_string(),
        size_string(frame.source_size()).into(),
    );
    entry.insert("textureRect".to_string(), rect_string(frame.frame()).into());
    entry.insert("textureRotated".to_string(), frame.rotated().into());

    if let Some(triangles) = frame.triangles() {
        let fields = TriangleFields::new(triangles, frame.frame());
        if let Some(indices) = fields.indices {
            entry.insert("triangles".to_string(), indices.into());
        }
        if let Some(vertices) = fields.vertices {
            entry.insert("vertices".to_string(), vertices.into());
        }
        if let Some(vertices_uv) = fields.vertices_uv {
            entry.insert("verticesUV".to_string(), vertices_uv.into());
        }
    }

    entry
}

/// Space-joined mesh strings; `None` where the source list is empty.
struct TriangleFields {
    indices: Option<String>,
    vertices: Option<String>,
    vertices_uv: Option<String>,
}

impl TriangleFields {
    fn new(triangles: &Triangles, frame: &Rect) -> Self {
        let indices: Vec<String> = triangles.indices.iter().map(u32::to_string).collect();
        let vertices: Vec<String> = triangles
            .verts
            .iter()
            .flat_map(|v| [v.x.to_string(), v.y.to_string()])
            .collect();
        let vertices_uv: Vec<String> = triangles
            .verts
            .iter()
            .flat_map(|v| {
                [
                    (i64::from(frame.x) + i64::from(v.x)).to_string(),
                    (i64::from(frame.y) + i64::from(v.y)).to_string(),
                ]
            })
            .collect();

        Self {
            indices: join_non_empty(&indices),
            vertices: join_non_empty(&vertices),
            vertices_uv: join_non_empty(&vertices_uv),
        }
    }
}

fn join_non_empty(parts: &[String]) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// `{{x,y},{w,h}}`
pub(crate) fn rect_string(rect: &Rect) -> String {
    format!("{{{{{},{}}},{{{},{}}}}}", rect.x, rect.y, rect.width, rect.height)
}

/// `{x,y}`
pub(crate) fn point_string(point: &Point) -> String {
    format!("{{{},{}}}", point.x, point.y)
}

/// `{w,h}`
pub(crate) fn size_string(size: &Size) -> String {
    format!("{{{},{}}}", size.width, size.height)
}
