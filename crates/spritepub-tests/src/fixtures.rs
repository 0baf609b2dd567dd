//! Shared frame sets and contexts for integration tests.

use spritepub_spec::{
    ExportContext, Point, Rect, ScalingVariant, Size, SpriteFrame, SpriteFrameSet, Triangles,
};

/// Packer output for a small character sheet, as the packer writes it.
pub const PACKED_CHARACTER_JSON: &str = r#"{
    "idle/0.png": {
        "frame": {"x": 0, "y": 0, "width": 30, "height": 40},
        "offset": {"x": 1, "y": -2},
        "sourceColorRect": {"x": 2, "y": 4, "width": 30, "height": 40},
        "sourceSize": {"width": 32, "height": 48},
        "rotated": false
    },
    "idle/1.png": {
        "frame": {"x": 30, "y": 0, "width": 40, "height": 30},
        "offset": {"x": 0, "y": 0},
        "sourceColorRect": {"x": 1, "y": 3, "width": 30, "height": 40},
        "sourceSize": {"width": 32, "height": 48},
        "rotated": true
    },
    "run/0.png": {
        "frame": {"x": 0, "y": 40, "width": 32, "height": 48},
        "offset": {"x": 0, "y": 0},
        "sourceColorRect": {"x": 0, "y": 0, "width": 32, "height": 48},
        "sourceSize": {"width": 32, "height": 48},
        "rotated": false
    }
}"#;

/// Parses [`PACKED_CHARACTER_JSON`].
pub fn packed_character() -> SpriteFrameSet {
    SpriteFrameSet::from_json(PACKED_CHARACTER_JSON).expect("character fixture is valid")
}

/// Four untrimmed 16x16 frames named `walk/0.png` .. `walk/3.png`.
pub fn walk_cycle() -> SpriteFrameSet {
    let mut frames = SpriteFrameSet::new();
    for i in 0..4 {
        let frame = SpriteFrame::untrimmed(i * 16, 0, 16, 16).expect("untrimmed frame is valid");
        frames
            .insert(format!("walk/{}.png", i), frame)
            .expect("names are unique");
    }
    frames
}

/// Frames whose animation keys interleave: `walk, run, walk, jump`.
pub fn interleaved_animations() -> SpriteFrameSet {
    let names = ["walk/0.png", "run/0.png", "walk/1.png", "jump/0.png"];
    let mut frames = SpriteFrameSet::new();
    for (i, name) in names.iter().enumerate() {
        let frame =
            SpriteFrame::untrimmed(i as i32 * 8, 0, 8, 8).expect("untrimmed frame is valid");
        frames.insert(*name, frame).expect("names are unique");
    }
    frames
}

/// A single trimmed frame carrying a two-triangle mesh.
pub fn meshed_frame() -> SpriteFrameSet {
    let frame = SpriteFrame::new(
        Rect::new(4, 4, 10, 6),
        Point::new(0, 1),
        Rect::new(3, 2, 10, 6),
        Size::new(16, 12),
        false,
    )
    .expect("meshed frame is valid")
    .with_triangles(Triangles::new(
        vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 6),
            Point::new(0, 6),
        ],
        vec![0, 1, 2, 0, 2, 3],
    ));
    SpriteFrameSet::new()
        .with_frame("gem.png", frame)
        .expect("names are unique")
}

/// Context with a data path, color image and texture size.
pub fn basic_context() -> ExportContext {
    ExportContext::new("out/hero")
        .with_image("out/hero.png")
        .with_texture_size(Size::new(128, 128))
}

/// Context whose image and mask paths mix separators.
pub fn mixed_separator_context() -> ExportContext {
    ExportContext::new("build/atlas")
        .with_image("a/b\\c/tex.png")
        .with_mask("a\\b/c/tex-alpha.png")
}

/// [`basic_context`] placed into a scaling-variant folder.
pub fn variant_context(folder: &str) -> ExportContext {
    basic_context().with_variant(ScalingVariant::in_folder(folder))
}
