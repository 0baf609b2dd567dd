//! Sprite Atlas Geometry Model
//!
//! This crate provides the value types exchanged between a sprite packer and
//! the `spritepub-export` serializers.
//!
//! # Overview
//!
//! - A packer produces a [`SpriteFrameSet`]: sprite names mapped, in packing
//!   order, to validated [`SpriteFrame`] geometry.
//! - The caller describes where the results go with an [`ExportContext`].
//! - Invalid geometry is rejected at construction time with
//!   [`GeometryError::MalformedGeometry`].
//!
//! # Example
//!
//! ```
//! use spritepub_spec::{ExportContext, Point, Rect, Size, SpriteFrame, SpriteFrameSet};
//!
//! let hero = SpriteFrame::new(
//!     Rect::new(0, 0, 30, 40),
//!     Point::new(1, 0),
//!     Rect::new(4, 2, 30, 40),
//!     Size::new(36, 44),
//!     false,
//! )
//! .unwrap();
//!
//! let mut frames = SpriteFrameSet::new();
//! frames.insert("hero/idle_0.png", hero).unwrap();
//!
//! let ctx = ExportContext::new("out/atlas").with_image("out/atlas.png");
//! assert_eq!(ctx.require_image().unwrap(), "out/atlas.png");
//! assert!(frames.get("hero/idle_0.png").unwrap().is_trimmed());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types
//! - [`geometry`]: Rect, point, size and sprite frame records
//! - [`frame_set`]: Insertion-ordered frame collection
//! - [`context`]: Export context and path resolution
//! - [`output`]: Output document kinds

pub mod context;
pub mod error;
pub mod frame_set;
pub mod geometry;
pub mod output;

pub use context::{ExportContext, ImageFiles, ScalingVariant};
pub use error::{CodedError, ContextError, GeometryError, LoadError, Warning, WarningCode};
pub use frame_set::SpriteFrameSet;
pub use geometry::{Point, Rect, Size, SpriteFrame, Triangles};
pub use output::DataKind;
