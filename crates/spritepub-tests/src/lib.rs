//! Sprite Atlas Export Test Infrastructure
//!
//! Integration tests for the export pipeline:
//!
//! - Publishing: frame set -> descriptor and image files on disk
//! - Conformance: the exact text each target runtime expects
//! - **Determinism**: byte-identical output across runs
//! - Properties: invariants over generated frame sets
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p spritepub-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use spritepub_tests::test_determinism;
//!
//! test_determinism!(phaser_is_stable, {
//!     registry.dispatch("phaser", &frames, &ctx).unwrap().data.render()
//! });
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export key types for convenience
pub use determinism::{
    compute_hash, verify_determinism, verify_hash_determinism, DeterminismFixture,
    DeterminismReport, DeterminismResult, DiffInfo,
};
