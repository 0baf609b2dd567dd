//! Frame geometry value types.
//!
//! These are the records a packer hands to the export layer: one
//! [`SpriteFrame`] per packed sprite, built from integer [`Rect`], [`Point`]
//! and [`Size`] values. A `SpriteFrame` can only be obtained through
//! validation, so every serializer downstream can rely on its invariants:
//!
//! - `source_color_rect` lies inside the rectangle implied by `source_size`
//! - `frame` has the size of `source_color_rect` (swapped when `rotated`)
//! - no rectangle or size has a negative extent

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Axis-aligned rectangle in integer pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner of the rectangle.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let right = i64::from(self.x) + i64::from(self.width);
        let bottom = i64::from(self.y) + i64::from(self.height);
        other.x >= self.x
            && other.y >= self.y
            && i64::from(other.x) + i64::from(other.width) <= right
            && i64::from(other.y) + i64::from(other.height) <= bottom
    }
}

/// Integer pixel offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The same size with width and height exchanged.
    pub fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// Polygon mesh for non-rectangular packing.
///
/// `verts` are in sprite-local space; `indices` index into `verts`, three per
/// triangle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Triangles {
    #[serde(default)]
    pub verts: Vec<Point>,
    #[serde(default)]
    pub indices: Vec<u32>,
}

impl Triangles {
    /// Creates a mesh from vertices and triangle indices.
    pub fn new(verts: Vec<Point>, indices: Vec<u32>) -> Self {
        Self { verts, indices }
    }
}

/// One packed sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSpriteFrame")]
pub struct SpriteFrame {
    frame: Rect,
    offset: Point,
    source_color_rect: Rect,
    source_size: Size,
    rotated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    triangles: Option<Triangles>,
}

impl SpriteFrame {
    /// Creates a validated sprite frame.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MalformedGeometry`] when the geometry breaks
    /// one of the frame invariants (see the module documentation).
    pub fn new(
        frame: Rect,
        offset: Point,
        source_color_rect: Rect,
        source_size: Size,
        rotated: bool,
    ) -> Result<Self, GeometryError> {
        validate_geometry(&frame, &source_color_rect, &source_size, rotated)?;
        Ok(Self {
            frame,
            offset,
            source_color_rect,
            source_size,
            rotated,
            triangles: None,
        })
    }

    /// Creates an untrimmed, unrotated frame covering the whole source image.
    pub fn untrimmed(x: i32, y: i32, width: i32, height: i32) -> Result<Self, GeometryError> {
        Self::new(
            Rect::new(x, y, width, height),
            Point::default(),
            Rect::new(0, 0, width, height),
            Size::new(width, height),
            false,
        )
    }

    /// Attaches a polygon mesh to this frame.
    pub fn with_triangles(mut self, triangles: Triangles) -> Self {
        self.triangles = Some(triangles);
        self
    }

    /// Location and size within the output texture.
    pub fn frame(&self) -> &Rect {
        &self.frame
    }

    /// Centering offset between trimmed and untrimmed artwork.
    pub fn offset(&self) -> &Point {
        &self.offset
    }

    /// Trimmed opaque-pixel bounding box in source space.
    pub fn source_color_rect(&self) -> &Rect {
        &self.source_color_rect
    }

    /// Full untrimmed source dimensions.
    pub fn source_size(&self) -> &Size {
        &self.source_size
    }

    /// Whether the packer stored the pixels rotated 90 degrees.
    pub fn rotated(&self) -> bool {
        self.rotated
    }

    /// Optional polygon mesh.
    pub fn triangles(&self) -> Option<&Triangles> {
        self.triangles.as_ref()
    }

    /// Returns true if trimming removed pixels in either dimension.
    pub fn is_trimmed(&self) -> bool {
        self.source_size.width != self.source_color_rect.width
            || self.source_size.height != self.source_color_rect.height
    }

    /// Difference between the untrimmed source size and the packed frame size.
    ///
    /// Negative components are possible for rotated frames.
    pub fn trim_delta(&self) -> Size {
        Size::new(
            self.source_size.width - self.frame.width,
            self.source_size.height - self.frame.height,
        )
    }
}

/// Unvalidated frame as it appears in packer JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSpriteFrame {
    frame: Rect,
    #[serde(default)]
    offset: Point,
    source_color_rect: Rect,
    source_size: Size,
    #[serde(default)]
    rotated: bool,
    #[serde(default)]
    triangles: Option<Triangles>,
}

impl TryFrom<RawSpriteFrame> for SpriteFrame {
    type Error = GeometryError;

    fn try_from(raw: RawSpriteFrame) -> Result<Self, Self::Error> {
        let frame = SpriteFrame::new(
            raw.frame,
            raw.offset,
            raw.source_color_rect,
            raw.source_size,
            raw.rotated,
        )?;
        Ok(match raw.triangles {
            Some(triangles) => frame.with_triangles(triangles),
            None => frame,
        })
    }
}

fn validate_geometry(
    frame: &Rect,
    source_color_rect: &Rect,
    source_size: &Size,
    rotated: bool,
) -> Result<(), GeometryError> {
    if frame.width < 0 || frame.height < 0 {
        return Err(GeometryError::malformed(format!(
            "frame has negative size {}x{}",
            frame.width, frame.height
        )));
    }
    if source_color_rect.width < 0 || source_color_rect.height < 0 {
        return Err(GeometryError::malformed(format!(
            "sourceColorRect has negative size {}x{}",
            source_color_rect.width, source_color_rect.height
        )));
    }
    if source_size.width < 0 || source_size.height < 0 {
        return Err(GeometryError::malformed(format!(
            "sourceSize is negative {}x{}",
            source_size.width, source_size.height
        )));
    }

    let bounds = Rect::new(0, 0, source_size.width, source_size.height);
    if !bounds.contains_rect(source_color_rect) {
        return Err(GeometryError::malformed(format!(
            "sourceColorRect ({}, {}, {}x{}) extends outside sourceSize {}x{}",
            source_color_rect.x,
            source_color_rect.y,
            source_color_rect.width,
            source_color_rect.height,
            source_size.width,
            source_size.height
        )));
    }

    let expected = if rotated {
        source_color_rect.size().transposed()
    } else {
        source_color_rect.size()
    };
    if frame.size() != expected {
        return Err(GeometryError::malformed(format!(
            "frame size {}x{} does not match sourceColorRect size {}x{}{}",
            frame.width,
            frame.height,
            source_color_rect.width,
            source_color_rect.height,
            if rotated { " (rotated)" } else { "" }
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trimmed_frame() -> SpriteFrame {
        SpriteFrame::new(
            Rect::new(10, 20, 30, 40),
            Point::new(1, -2),
            Rect::new(3, 4, 30, 40),
            Size::new(36, 50),
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_frame() {
        let frame = trimmed_frame();
        assert_eq!(frame.frame(), &Rect::new(10, 20, 30, 40));
        assert_eq!(frame.offset(), &Point::new(1, -2));
        assert!(frame.is_trimmed());
        assert_eq!(frame.trim_delta(), Size::new(6, 10));
        assert!(frame.triangles().is_none());
    }

    #[test]
    fn test_untrimmed_frame() {
        let frame = SpriteFrame::untrimmed(0, 0, 16, 16).unwrap();
        assert!(!frame.is_trimmed());
        assert_eq!(frame.trim_delta(), Size::new(0, 0));
    }

    #[test]
    fn test_trimmed_in_one_dimension() {
        let frame = SpriteFrame::new(
            Rect::new(0, 0, 16, 10),
            Point::default(),
            Rect::new(0, 2, 16, 10),
            Size::new(16, 16),
            false,
        )
        .unwrap();
        assert!(frame.is_trimmed());
    }

    #[test]
    fn test_rotated_frame_swaps_size() {
        let frame = SpriteFrame::new(
            Rect::new(0, 0, 20, 10),
            Point::default(),
            Rect::new(0, 0, 10, 20),
            Size::new(10, 20),
            true,
        )
        .unwrap();
        assert!(frame.rotated());
        assert_eq!(frame.trim_delta(), Size::new(-10, 10));
    }

    #[test]
    fn test_color_rect_outside_source_size() {
        let err = SpriteFrame::new(
            Rect::new(0, 0, 30, 40),
            Point::default(),
            Rect::new(10, 0, 30, 40),
            Size::new(32, 40),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::MalformedGeometry { .. }));
        assert!(err.to_string().contains("extends outside sourceSize"));
    }

    #[test]
    fn test_color_rect_negative_origin() {
        let err = SpriteFrame::new(
            Rect::new(0, 0, 4, 4),
            Point::default(),
            Rect::new(-1, 0, 4, 4),
            Size::new(8, 8),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::MalformedGeometry { .. }));
    }

    #[test]
    fn test_frame_size_mismatch() {
        let err = SpriteFrame::new(
            Rect::new(0, 0, 31, 40),
            Point::default(),
            Rect::new(0, 0, 30, 40),
            Size::new(30, 40),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_negative_sizes_rejected() {
        assert!(SpriteFrame::untrimmed(0, 0, -1, 4).is_err());
        let err = SpriteFrame::new(
            Rect::new(0, 0, 0, 0),
            Point::default(),
            Rect::new(0, 0, 0, 0),
            Size::new(-2, 0),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("sourceSize is negative"));
    }

    #[test]
    fn test_frame_json_uses_camel_case() {
        let frame = trimmed_frame().with_triangles(Triangles::new(
            vec![Point::new(0, 0), Point::new(30, 0), Point::new(0, 40)],
            vec![0, 1, 2],
        ));
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["sourceColorRect"]["x"], 3);
        assert_eq!(json["sourceSize"]["width"], 36);
        assert_eq!(json["triangles"]["indices"][2], 2);

        let parsed: SpriteFrame = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_frame_json_defaults() {
        let json = r#"{
            "frame": {"x": 0, "y": 0, "width": 8, "height": 8},
            "sourceColorRect": {"x": 0, "y": 0, "width": 8, "height": 8},
            "sourceSize": {"width": 8, "height": 8}
        }"#;
        let frame: SpriteFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.offset(), &Point::default());
        assert!(!frame.rotated());
    }

    #[test]
    fn test_frame_json_rejects_malformed_geometry() {
        let json = r#"{
            "frame": {"x": 0, "y": 0, "width": 8, "height": 8},
            "sourceColorRect": {"x": 4, "y": 0, "width": 8, "height": 8},
            "sourceSize": {"width": 8, "height": 8}
        }"#;
        let err = serde_json::from_str::<SpriteFrame>(json).unwrap_err();
        assert!(err.to_string().contains("malformed geometry"));
    }

    #[test]
    fn test_contains_rect_edges() {
        let bounds = Rect::new(0, 0, 10, 10);
        assert!(bounds.contains_rect(&Rect::new(0, 0, 10, 10)));
        assert!(bounds.contains_rect(&Rect::new(10, 10, 0, 0)));
        assert!(!bounds.contains_rect(&Rect::new(1, 0, 10, 10)));
        assert!(!bounds.contains_rect(&Rect::new(0, 1, 10, 10)));
    }
}
