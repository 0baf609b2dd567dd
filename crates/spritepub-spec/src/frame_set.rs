//! Insertion-ordered collection of packed sprites.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GeometryError, LoadError};
use crate::geometry::SpriteFrame;

/// Ordered mapping from unique sprite name to its packed frame.
///
/// Order is significant: it is the packing order the packer produced and,
/// for animation grouping, the frame-sequence order. Serialized as a JSON
/// object whose key order follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteFrameSet {
    entries: Vec<(String, SpriteFrame)>,
    names: HashSet<String>,
}

impl SpriteFrameSet {
    /// Creates an empty frame set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a frame under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DuplicateFrame`] if `name` is already present.
    pub fn insert(&mut self, name: impl Into<String>, frame: SpriteFrame) -> Result<(), GeometryError> {
        let name = name.into();
        if !self.names.insert(name.clone()) {
            return Err(GeometryError::DuplicateFrame(name));
        }
        self.entries.push((name, frame));
        Ok(())
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_frame(
        mut self,
        name: impl Into<String>,
        frame: SpriteFrame,
    ) -> Result<Self, GeometryError> {
        self.insert(name, frame)?;
        Ok(self)
    }

    /// Looks up a frame by name.
    pub fn get(&self, name: &str) -> Option<&SpriteFrame> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, frame)| frame)
    }

    /// Iterates `(name, frame)` pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &SpriteFrame)> {
        self.entries.iter().map(|(name, frame)| (name.as_str(), frame))
    }

    /// Iterates sprite names in insertion order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set holds no frames.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses packer output from a JSON object keyed by sprite name.
    ///
    /// Every frame is validated while parsing; malformed geometry or a
    /// duplicate key fails the whole load.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes this frame set to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for SpriteFrameSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, frame) in &self.entries {
            map.serialize_entry(name, frame)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SpriteFrameSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FrameSetVisitor)
    }
}

struct FrameSetVisitor;

impl<'de> Visitor<'de> for FrameSetVisitor {
    type Value = SpriteFrameSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping sprite names to frames")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = SpriteFrameSet::new();
        while let Some(name) = access.next_key::<String>()? {
            let frame: SpriteFrame = access.next_value().map_err(|e| {
                serde::de::Error::custom(format!("frame '{}': {}", name, e))
            })?;
            set.insert(name, frame).map_err(serde::de::Error::custom)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect, Size};
    use pretty_assertions::assert_eq;

    fn square(x: i32) -> SpriteFrame {
        SpriteFrame::untrimmed(x, 0, 8, 8).unwrap()
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let set = SpriteFrameSet::new()
            .with_frame("zeta", square(0))
            .unwrap()
            .with_frame("alpha", square(8))
            .unwrap()
            .with_frame("mid", square(16))
            .unwrap();

        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("alpha").unwrap().frame().x, 8);
        assert!(set.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut set = SpriteFrameSet::new();
        set.insert("a", square(0)).unwrap();
        let err = set.insert("a", square(8)).unwrap_err();
        assert_eq!(err, GeometryError::DuplicateFrame("a".to_string()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let json = r#"{
            "walk/1.png": {
                "frame": {"x": 8, "y": 0, "width": 8, "height": 8},
                "sourceColorRect": {"x": 0, "y": 0, "width": 8, "height": 8},
                "sourceSize": {"width": 8, "height": 8}
            },
            "walk/0.png": {
                "frame": {"x": 0, "y": 0, "width": 6, "height": 8},
                "offset": {"x": -1, "y": 0},
                "sourceColorRect": {"x": 0, "y": 0, "width": 6, "height": 8},
                "sourceSize": {"width": 8, "height": 8},
                "rotated": false
            }
        }"#;

        let set = SpriteFrameSet::from_json(json).unwrap();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["walk/1.png", "walk/0.png"]);

        let second = set.get("walk/0.png").unwrap();
        assert_eq!(second.offset(), &Point::new(-1, 0));
        assert_eq!(second.source_size(), &Size::new(8, 8));
        assert_eq!(second.source_color_rect(), &Rect::new(0, 0, 6, 8));
    }

    #[test]
    fn test_from_json_reports_frame_name() {
        let json = r#"{
            "bad.png": {
                "frame": {"x": 0, "y": 0, "width": 9, "height": 8},
                "sourceColorRect": {"x": 0, "y": 0, "width": 8, "height": 8},
                "sourceSize": {"width": 8, "height": 8}
            }
        }"#;
        let err = SpriteFrameSet::from_json(json).unwrap_err();
        assert!(err.to_string().contains("bad.png"), "{}", err);
    }

    #[test]
    fn test_json_round_trip() {
        let set = SpriteFrameSet::new()
            .with_frame("b", square(0))
            .unwrap()
            .with_frame("a", square(8))
            .unwrap();
        let json = set.to_json_pretty().unwrap();
        let parsed = SpriteFrameSet::from_json(&json).unwrap();
        assert_eq!(parsed, set);
        assert!(json.find("\"b\"").unwrap() < json.find("\"a\"").unwrap());
    }
}
