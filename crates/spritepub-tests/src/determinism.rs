//! Determinism harness for descriptor export.
//!
//! Every serializer must render byte-identical output for identical input.
//! This module runs an export several times and compares the results byte by
//! byte, reporting the first difference with a little surrounding context.
//!
//! # Example
//!
//! ```
//! use spritepub_tests::determinism::{verify_determinism, DeterminismFixture};
//! use spritepub_tests::fixtures;
//!
//! let frames = fixtures::walk_cycle();
//! let ctx = fixtures::basic_context();
//!
//! let registry = spritepub_export::FormatRegistry::with_builtin_formats();
//! let result = verify_determinism(
//!     || registry.dispatch("phaser", &frames, &ctx).unwrap().data.render(),
//!     3,
//! );
//! assert!(result.is_deterministic);
//!
//! let report = DeterminismFixture::new(frames, ctx).all_builtin_formats().run();
//! assert!(report.all_deterministic());
//! ```

use std::fmt;

use spritepub_export::{ExportError, FormatRegistry};
use spritepub_spec::{ExportContext, SpriteFrameSet};

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the reference output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the reference output.
    pub hash: String,
    /// First difference found, if any.
    pub diff_info: Option<DiffInfo>,
}

/// Information about the first byte difference found between runs.
#[derive(Debug, Clone)]
pub struct DiffInfo {
    /// Byte offset of the difference.
    pub offset: usize,
    /// Value from the reference run (0 past its end).
    pub expected: u8,
    /// Value from the differing run (0 past its end).
    pub actual: u8,
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
    /// Bytes around the difference in the reference output.
    pub context: DiffContext,
}

/// Context around a byte difference.
#[derive(Debug, Clone, Default)]
pub struct DiffContext {
    /// Up to 8 bytes before the difference.
    pub before: Vec<u8>,
    /// Up to 8 bytes after the difference.
    pub after: Vec<u8>,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Difference at byte {}: expected 0x{:02X}, got 0x{:02X} (run {})",
            self.offset, self.expected, self.actual, self.run_index
        )?;
        if !self.context.before.is_empty() || !self.context.after.is_empty() {
            write!(
                f,
                "\n  Context: {:?}[{:?}]{:?}",
                String::from_utf8_lossy(&self.context.before),
                self.expected as char,
                String::from_utf8_lossy(&self.context.after)
            )?;
        }
        Ok(())
    }
}

impl DeterminismResult {
    /// Creates a deterministic result.
    pub fn success(runs: usize, output_size: usize, hash: String) -> Self {
        Self {
            is_deterministic: true,
            runs,
            output_size,
            hash,
            diff_info: None,
        }
    }

    /// Creates a non-deterministic result.
    pub fn failure(runs: usize, output_size: usize, hash: String, diff_info: DiffInfo) -> Self {
        Self {
            is_deterministic: false,
            runs,
            output_size,
            hash,
            diff_info: Some(diff_info),
        }
    }

    /// Panics with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Output size: {} bytes\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.output_size, self.hash, diff
            );
        }
    }
}

/// Runs `generate_fn` `runs` times and verifies all outputs are identical.
///
/// # Panics
///
/// If `runs` is less than 2.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference_bytes = reference.as_ref();
    let reference_hash = compute_hash(reference_bytes);

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(diff) = find_first_difference(reference_bytes, output.as_ref(), run_index) {
            return DeterminismResult::failure(runs, reference_bytes.len(), reference_hash, diff);
        }
    }

    DeterminismResult::success(runs, reference_bytes.len(), reference_hash)
}

/// Finds the first byte difference, including a length mismatch.
fn find_first_difference(expected: &[u8], actual: &[u8], run_index: usize) -> Option<DiffInfo> {
    let offset = expected
        .iter()
        .zip(actual.iter())
        .position(|(e, a)| e != a)
        .or_else(|| (expected.len() != actual.len()).then(|| expected.len().min(actual.len())))?;

    Some(DiffInfo {
        offset,
        expected: expected.get(offset).copied().unwrap_or(0),
        actual: actual.get(offset).copied().unwrap_or(0),
        run_index,
        context: extract_context(expected, offset),
    })
}

fn extract_context(data: &[u8], offset: usize) -> DiffContext {
    let offset = offset.min(data.len());
    let before_start = offset.saturating_sub(8);
    let after_end = (offset + 9).min(data.len());

    DiffContext {
        before: data[before_start..offset].to_vec(),
        after: if offset + 1 < data.len() {
            data[(offset + 1)..after_end].to_vec()
        } else {
            Vec::new()
        },
    }
}

/// Returns true if every hash equals the first.
pub fn verify_hash_determinism(hashes: &[String]) -> bool {
    match hashes.first() {
        Some(reference) => hashes.iter().all(|h| h == reference),
        None => true,
    }
}

/// Computes the BLAKE3 hash of data as lowercase hex.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Runs determinism checks for one frame set across several formats.
#[derive(Debug, Clone)]
pub struct DeterminismFixture {
    /// Frames to export.
    pub frames: SpriteFrameSet,
    /// Context to export with.
    pub context: ExportContext,
    /// Format ids to check.
    pub formats: Vec<String>,
    /// Number of runs per format.
    pub runs: usize,
}

impl DeterminismFixture {
    /// Creates a fixture with no formats and 3 runs.
    pub fn new(frames: SpriteFrameSet, context: ExportContext) -> Self {
        Self {
            frames,
            context,
            formats: Vec::new(),
            runs: 3,
        }
    }

    /// Adds a format id.
    pub fn add_format(mut self, format_id: impl Into<String>) -> Self {
        self.formats.push(format_id.into());
        self
    }

    /// Adds every format of the built-in registry.
    pub fn all_builtin_formats(mut self) -> Self {
        let registry = FormatRegistry::with_builtin_formats();
        self.formats
            .extend(registry.formats().into_iter().map(str::to_string));
        self
    }

    /// Sets the number of runs per format.
    pub fn runs(mut self, runs: usize) -> Self {
        assert!(runs >= 2, "Must run at least 2 times");
        self.runs = runs;
        self
    }

    /// Runs every format against a fresh built-in registry.
    pub fn run(&self) -> DeterminismReport {
        self.run_with(&FormatRegistry::with_builtin_formats())
    }

    /// Runs every format against `registry`.
    pub fn run_with(&self, registry: &FormatRegistry) -> DeterminismReport {
        let mut report = DeterminismReport::default();
        for format_id in &self.formats {
            let result = self.check_format(registry, format_id);
            report.entries.push(DeterminismReportEntry {
                format_id: format_id.clone(),
                result,
            });
        }
        report
    }

    fn check_format(
        &self,
        registry: &FormatRegistry,
        format_id: &str,
    ) -> Result<DeterminismResult, DeterminismError> {
        // A failing serializer fails the same way every run; check once up front.
        registry
            .dispatch(format_id, &self.frames, &self.context)
            .map_err(DeterminismError::Export)?;

        Ok(verify_determinism(
            || {
                registry
                    .dispatch(format_id, &self.frames, &self.context)
                    .map(|result| result.data.render())
                    .unwrap_or_default()
            },
            self.runs,
        ))
    }
}

/// Why a format could not be checked.
#[derive(Debug)]
pub enum DeterminismError {
    /// The export itself failed.
    Export(ExportError),
}

impl fmt::Display for DeterminismError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeterminismError::Export(e) => write!(f, "export failed: {}", e),
        }
    }
}

/// Result for one format.
#[derive(Debug)]
pub struct DeterminismReportEntry {
    /// Format id checked.
    pub format_id: String,
    /// Outcome of the check.
    pub result: Result<DeterminismResult, DeterminismError>,
}

/// Results of a [`DeterminismFixture`] run.
#[derive(Debug, Default)]
pub struct DeterminismReport {
    /// One entry per format.
    pub entries: Vec<DeterminismReportEntry>,
}

impl DeterminismReport {
    /// Returns true if every format exported and was deterministic.
    pub fn all_deterministic(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| matches!(&entry.result, Ok(r) if r.is_deterministic))
    }

    /// Entries that failed to export or were not deterministic.
    pub fn failures(&self) -> Vec<&DeterminismReportEntry> {
        self.entries
            .iter()
            .filter(|entry| !matches!(&entry.result, Ok(r) if r.is_deterministic))
            .collect()
    }
}

impl fmt::Display for DeterminismReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Determinism report: {} format(s)", self.entries.len())?;
        for entry in &self.entries {
            match &entry.result {
                Ok(r) if r.is_deterministic => {
                    writeln!(f, "  PASS {} ({} bytes, {})", entry.format_id, r.output_size, r.hash)?
                }
                Ok(r) => match &r.diff_info {
                    Some(diff) => writeln!(f, "  FAIL {}: {}", entry.format_id, diff)?,
                    None => writeln!(f, "  FAIL {}", entry.format_id)?,
                },
                Err(e) => writeln!(f, "  ERROR {}: {}", entry.format_id, e)?,
            }
        }
        Ok(())
    }
}

/// Declares a test asserting that `$generate` renders identical bytes 3 times.
#[macro_export]
macro_rules! test_determinism {
    ($name:ident, $generate:expr) => {
        #[test]
        fn $name() {
            $crate::determinism::verify_determinism(|| $generate, 3).assert_deterministic();
        }
    };
}
