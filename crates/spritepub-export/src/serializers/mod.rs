//! Built-in descriptor serializers, one per target runtime.

mod cocos2d;
mod godot;
mod json;

pub use cocos2d::{Cocos2dPlist, PlistDialect};
pub use godot::{GodotAnimation, GodotAnimations, GodotParts, ANIMATION_SPEED};
pub use json::{
    to_tab_pretty, ArrayManifestFrame, JsonManifest, KeyedManifestFrame, LegacyJson,
    LegacyManifestFrame, ManifestMeta, ManifestRect, ManifestSize, NamedFrames, PhaserJson,
    PixiJson,
};
