//! Godot scene descriptions (`.tscn`, format 2).
//!
//! Every dialect starts with one `AtlasTexture` sub-resource per frame, in
//! frame-set order, with 1-based ids. The dialects differ in what binds those
//! regions to nodes:
//! - `godot-parts`: one `Sprite` node per frame
//! - `godot`: a single non-looping `default` animation over every frame
//! - `godot-animations`: one looping animation per name prefix
//!
//! Spacing differs per dialect. The parts scene closes `region` with `h )`
//! and binds nodes with `SubResource(i)`; the animated scenes close `region`
//! with `h)`.

use spritepub_spec::{ExportContext, SpriteFrameSet};

use crate::animation::{frame_list, group_animations, sub_resource_ref, DEFAULT_ANIMATION};
use crate::document::ExportResult;
use crate::error::ExportError;
use crate::naming::{file_name, file_stem};
use crate::registry::Serializer;

/// Playback speed written for every animation.
pub const ANIMATION_SPEED: &str = "5.0";

/// Static scene with one sprite node per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct GodotParts;

/// Scene with one non-looping animation over all frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct GodotAnimation;

/// Scene with one looping animation per animation key.
///
/// An empty frame set still gets a `default` animation with no frames, so
/// the node never names an animation the scene does not define.
#[derive(Debug, Clone, Copy, Default)]
pub struct GodotAnimations;

/// How the `region` rectangle of an atlas sub-resource is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegionStyle {
    /// `Rect2( x, y, w, h )`
    Padded,
    /// `Rect2( x, y, w, h)`
    Tight,
}

impl RegionStyle {
    fn closing(self) -> &'static str {
        match self {
            RegionStyle::Padded => " )",
            RegionStyle::Tight => ")",
        }
    }
}

impl Serializer for GodotParts {
    fn serialize(
        &self,
        frames: &SpriteFrameSet,
        context: &ExportContext,
    ) -> Result<ExportResult, ExportError> {
        let image = context.require_image()?;

        let mut contents = scene_header(frames.len() + 2, image);
        contents.push_str(&atlas_sub_resources(frames, RegionStyle::Padded));
        contents.push_str(&format!(
            "[node name=\"{}\" type=\"Sprite\"]\n\n",
            escape(file_stem(image))
        ));
        for (index, name) in frames.names().enumerate() {
            contents.push_str(&format!(
                "[node name=\"{}\" type=\"Sprite\" parent=\".\"]\n",
                escape(file_stem(name))
            ));
            contents.push_str(&format!("texture = SubResource({})\n\n", index + 1));
        }
        contents.push('\n');

        Ok(ExportResult::tscn(contents))
    }
}

impl Serializer for GodotAnimation {
    fn serialize(
        &self,
        frames: &SpriteFrameSet,
        context: &ExportContext,
    ) -> Result<ExportResult, ExportError> {
        let image = context.require_image()?;
        let ids: Vec<usize> = (1..=frames.len()).collect();
        let blocks = [animation_block(&frame_list(&ids), false, DEFAULT_ANIMATION)];
        Ok(ExportResult::tscn(animated_scene(
            frames,
            image,
            &blocks,
            DEFAULT_ANIMATION,
        )))
    }
}

impl Serializer for GodotAnimations {
    fn serialize(
        &self,
        frames: &SpriteFrameSet,
        context: &ExportContext,
    ) -> Result<ExportResult, ExportError> {
        let image = context.require_image()?;
        let groups = group_animations(frames.names());
        let mut blocks: Vec<String> = groups
            .iter()
            .map(|group| animation_block(&group.frame_list(), true, &group.name))
            .collect();
        if blocks.is_empty() {
            blocks.push(animation_block("", true, DEFAULT_ANIMATION));
        }
        let initial = groups
            .first()
            .map(|group| group.name.as_str())
            .unwrap_or(DEFAULT_ANIMATION);
        Ok(ExportResult::tscn(animated_scene(
            frames, image, &blocks, initial,
        )))
    }
}

/// Escapes `\` and `"` for a quoted scene string.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn scene_header(load_steps: usize, image: &str) -> String {
    let mut header = format!("[gd_scene load_steps={} format=2]\n\n", load_steps);
    header.push_str(&format!(
        "[ext_resource path=\"res://{}\" type=\"Texture\" id=1]\n\n",
        escape(file_name(image))
    ));
    header
}

fn atlas_sub_resources(frames: &SpriteFrameSet, style: RegionStyle) -> String {
    let mut out = String::new();
    for (index, (_, frame)) in frames.iter().enumerate() {
        let region = frame.frame();
        let color_rect = frame.source_color_rect();
        let delta = frame.trim_delta();
        out.push_str(&format!(
            "[sub_resource type=\"AtlasTexture\" id={}]\n",
            index + 1
        ));
        out.push_str("atlas = ExtResource( 1 )\n");
        out.push_str(&format!(
            "region = Rect2( {}, {}, {}, {}{}\n",
            region.x,
            region.y,
            region.width,
            region.height,
            style.closing()
        ));
        out.push_str(&format!(
            "margin = Rect2( {}, {}, {}, {} )\n\n",
            color_rect.x, color_rect.y, delta.width, delta.height
        ));
    }
    out
}

fn animation_block(frames: &str, looping: bool, name: &str) -> String {
    format!(
        "{{\n\"frames\": [ {} ],\n\"loop\": {},\n\"name\": \"{}\",\n\"speed\": {}\n}}",
        frames,
        looping,
        escape(name),
        ANIMATION_SPEED
    )
}

fn animated_scene(
    frames: &SpriteFrameSet,
    image: &str,
    blocks: &[String],
    initial_animation: &str,
) -> String {
    let sprite_frames_id = frames.len() + 1;

    let mut contents = scene_header(frames.len() + 3, image);
    contents.push_str(&atlas_sub_resources(frames, RegionStyle::Tight));
    contents.push_str(&format!(
        "[sub_resource type=\"SpriteFrames\" id={}]\n",
        sprite_frames_id
    ));
    contents.push_str(&format!("animations = [ {} ]\n\n", blocks.join(", ")));
    contents.push_str("[node name=\"AnimatedSprite\" type=\"AnimatedSprite\"]\n");
    contents.push_str(&format!("frames = {}\n", sub_resource_ref(sprite_frames_id)));
    contents.push_str(&format!("animation = \"{}\"\n", escape(initial_animation)));
    contents.push_str("frame = 0\n\n");
    contents
}
