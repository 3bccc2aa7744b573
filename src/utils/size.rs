//! Size parsing and classification utilities.
//!
//! This module provides the two size-related building blocks of the crate:
//! parsing a declared size string (like "850MB") into a byte count, and
//! bucketing byte counts into the three size tiers used by cabinet queries.
//! It also provides the on-disk directory measurement used by the scanner.
//!
//! All units are binary (1 KB = 1024 bytes), matching the tier thresholds.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

/// Bytes per kilobyte (binary: 1024).
pub const KB: u64 = 1024;

/// Bytes per megabyte (binary: 1024²).
pub const MB: u64 = 1024 * KB;

/// Bytes per gigabyte (binary: 1024³).
pub const GB: u64 = 1024 * MB;

/// Upper bound (exclusive) of the `Small` tier: 100 MB.
const SMALL_LIMIT: u64 = 100 * MB;

/// Upper bound (exclusive) of the `Medium` tier: 1 GB.
const MEDIUM_LIMIT: u64 = GB;

/// Pattern for declared size strings: an integer with an optional KB/MB/GB
/// unit, surrounded by optional whitespace.
static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([0-9]+)\s*(KB|MB|GB)?\s*$").expect("size pattern is valid")
});

/// Parse a declared size string into a byte count.
///
/// Accepts a non-negative integer with an optional case-insensitive unit
/// suffix, with optional whitespace around either token. A missing unit
/// means the value is already a byte count.
///
/// Returns `None` for every other shape — embedded letters, signs, decimal
/// points, unknown units, multiple values, or a value that overflows `u64`
/// once multiplied out. Malformed input is an expected condition, not an
/// error: folders carry free-text size declarations and unparseable ones
/// are simply never classified.
///
/// # Arguments
///
/// * `text` - The declared size string (e.g., "850MB", " 2 gb ", "4096")
///
/// # Returns
///
/// - `Some(u64)` - The size in bytes
/// - `None` - If the string does not match the size grammar
///
/// # Examples
///
/// ```
/// # use file_cabinet::utils::parse_size;
/// assert_eq!(parse_size("850MB"), Some(850 * 1024 * 1024));
/// assert_eq!(parse_size("4096"), Some(4096));
/// assert_eq!(parse_size("oops"), None);
/// ```
///
/// # Supported Units
///
/// - **KB**: 1024 bytes
/// - **MB**: 1024² bytes
/// - **GB**: 1024³ bytes
/// - **Bytes**: plain integers without a unit
#[must_use]
pub fn parse_size(text: &str) -> Option<u64> {
    let caps = SIZE_PATTERN.captures(text)?;
    let value: u64 = caps.get(1)?.as_str().parse().ok()?;

    let multiplier = match caps.get(2) {
        None => 1,
        Some(unit) => match unit.as_str().to_ascii_uppercase().as_str() {
            "KB" => KB,
            "MB" => MB,
            "GB" => GB,
            _ => return None,
        },
    };

    value.checked_mul(multiplier)
}

/// Size tier of a folder, derived from its parsed byte count.
///
/// The three tiers partition the whole non-negative byte range with
/// half-open thresholds:
/// - `Small`: below 100 MB
/// - `Medium`: from 100 MB up to (excluding) 1 GB
/// - `Large`: 1 GB and above
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    /// Below 100 MB
    Small,

    /// From 100 MB (inclusive) to 1 GB (exclusive)
    Medium,

    /// 1 GB and above
    Large,
}

impl SizeTier {
    /// Classify a byte count into its tier.
    ///
    /// Classification is total: every `u64` value lands in exactly one tier.
    ///
    /// # Examples
    ///
    /// ```
    /// # use file_cabinet::utils::SizeTier;
    /// assert_eq!(SizeTier::classify(99 * 1024 * 1024), SizeTier::Small);
    /// assert_eq!(SizeTier::classify(100 * 1024 * 1024), SizeTier::Medium);
    /// assert_eq!(SizeTier::classify(1024 * 1024 * 1024), SizeTier::Large);
    /// ```
    #[must_use]
    pub const fn classify(bytes: u64) -> Self {
        if bytes < SMALL_LIMIT {
            Self::Small
        } else if bytes < MEDIUM_LIMIT {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// Resolve a user-supplied tier label.
    ///
    /// Accepts the single-letter abbreviations `S`/`M`/`L` and the full
    /// tier names, case-insensitively and with surrounding whitespace
    /// ignored. Every other label (including the empty string) yields
    /// `None`, which queries translate into an empty result rather than
    /// an error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use file_cabinet::utils::SizeTier;
    /// assert_eq!(SizeTier::from_label("medium"), Some(SizeTier::Medium));
    /// assert_eq!(SizeTier::from_label(" L "), Some(SizeTier::Large));
    /// assert_eq!(SizeTier::from_label("HUGE"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "S" | "SMALL" => Some(Self::Small),
            "M" | "MEDIUM" => Some(Self::Medium),
            "L" | "LARGE" => Some(Self::Large),
            _ => None,
        }
    }

    /// Canonical upper-case name of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::Large => "LARGE",
        }
    }
}

impl std::fmt::Display for SizeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculate the total size of a directory and all its contents, in bytes.
///
/// Recursively traverses the directory tree using `walkdir` and sums the
/// sizes of all files found. Errors for individual entries (permission
/// denied, broken symlinks, etc.) are silently skipped so the function
/// always returns a result.
///
/// Returns `0` if the path does not exist or cannot be traversed at the
/// root level.
#[must_use]
pub fn calculate_dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}
