//! Sprite Atlas Descriptor Export
//!
//! This crate turns packed sprite geometry into the descriptor files different
//! runtimes load: cocos2d property lists, PixiJS/Phaser JSON manifests and
//! Godot scene descriptions.
//!
//! # Example
//!
//! ```
//! use spritepub_export::{FormatRegistry, DataKind};
//! use spritepub_spec::{ExportContext, SpriteFrame, SpriteFrameSet};
//!
//! let mut frames = SpriteFrameSet::new();
//! frames.insert("walk/0.png", SpriteFrame::untrimmed(0, 0, 32, 32).unwrap()).unwrap();
//! frames.insert("walk/1.png", SpriteFrame::untrimmed(32, 0, 32, 32).unwrap()).unwrap();
//!
//! let ctx = ExportContext::new("out/hero").with_image("out/hero.png");
//! let registry = FormatRegistry::with_builtin_formats();
//!
//! let result = registry.dispatch("godot-animations", &frames, &ctx).unwrap();
//! assert_eq!(result.format, DataKind::Tscn);
//! assert!(result.data.render().contains("\"name\": \"walk\""));
//! ```
//!
//! # Determinism
//!
//! Every serializer is a pure function of the frame set and context:
//! identical input renders byte-identical output.

pub mod animation;
pub mod document;
pub mod error;
pub mod naming;
pub mod plist;
pub mod registry;
pub mod serializers;
pub mod writer;

// Re-export main types for convenience
pub use animation::{animation_key, group_animations, AnimationGroup, DEFAULT_ANIMATION};
pub use document::{ExportDocument, ExportResult};
pub use error::{ExportError, WriteError};
pub use plist::PlistValue;
pub use registry::{format_ids, FormatRegistry, PublishReport, Serializer};
pub use spritepub_spec::DataKind;
pub use writer::{AtlasWriter, FsWriter};
