//! Structured JSON output for scripting and piping.
//!
//! This module provides serializable data structures that represent the
//! complete output of a cabinet query. When the `--json` flag is passed,
//! these structures are serialized to stdout as a single JSON object,
//! replacing all human-readable output.

use std::collections::BTreeMap;

use humansize::{BINARY, format_size};
use serde::Serialize;

use crate::folder::{FolderHandle, Folders};
use crate::utils::SizeTier;

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize)]
pub struct JsonOutput {
    /// The query that produced this output: `"find"`, `"size"`, `"count"`,
    /// or `"report"`.
    pub query: String,

    /// The name that was looked up. Present only for `find`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The tier label as given by the caller. Present only for `size`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The tier the label resolved to, or `null` when it named no tier.
    /// Present only for `size`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Option<SizeTier>>,

    /// The folders the query matched, in traversal discovery order.
    pub folders: Vec<JsonFolderEntry>,

    /// Number of matched folders, or the distinct reachable count for
    /// `count` and `report`.
    pub count: usize,

    /// Per-tier breakdown. Present only for `report`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<JsonReportSummary>,
}

/// A single folder entry in the JSON output.
#[derive(Serialize)]
pub struct JsonFolderEntry {
    /// Name of the folder.
    pub name: String,

    /// Folder kind (`"folder"` or `"group"`).
    pub kind: &'static str,

    /// Declared size string exactly as stored (may be malformed).
    pub size: String,

    /// Parsed size in bytes, or `null` when the declaration does not parse.
    pub size_bytes: Option<u64>,

    /// Human-readable formatted size (e.g. `"850 MiB"`), or `null`.
    pub size_formatted: Option<String>,

    /// Size tier (`"small"`, `"medium"`, `"large"`), or `null`.
    pub tier: Option<SizeTier>,
}

/// Aggregated per-tier statistics for the `report` query.
#[derive(Serialize)]
pub struct JsonReportSummary {
    /// Per-tier breakdown (keys are the lower-case tier names).
    pub by_tier: BTreeMap<String, JsonTierSummary>,

    /// Number of folders whose size declaration does not parse.
    pub unclassified: usize,

    /// Total declared size across all parseable folders, in bytes.
    pub total_size: u64,

    /// Human-readable formatted total size.
    pub total_size_formatted: String,
}

/// Per-tier count and declared size.
#[derive(Serialize)]
pub struct JsonTierSummary {
    /// Number of folders in this tier.
    pub count: usize,

    /// Total declared size in bytes for this tier.
    pub size: u64,

    /// Human-readable formatted size.
    pub size_formatted: String,
}

impl JsonOutput {
    /// Build a `JsonOutput` for a name lookup.
    ///
    /// A miss is not an error: the output simply carries zero folders.
    #[must_use]
    pub fn from_find(name: &str, result: Option<&FolderHandle>) -> Self {
        let folders: Vec<_> = result.map(JsonFolderEntry::from_folder).into_iter().collect();
        let count = folders.len();

        Self {
            query: "find".to_string(),
            name: Some(name.to_string()),
            label: None,
            tier: None,
            folders,
            count,
            summary: None,
        }
    }

    /// Build a `JsonOutput` for a size-tier query.
    ///
    /// The resolved tier is recorded alongside the caller's label; a label
    /// that named no tier yields `tier: null` and an empty folder list.
    #[must_use]
    pub fn from_size_query(label: &str, matches: &Folders) -> Self {
        Self {
            query: "size".to_string(),
            name: None,
            label: Some(label.to_string()),
            tier: Some(SizeTier::from_label(label)),
            folders: matches.iter().map(JsonFolderEntry::from_folder).collect(),
            count: matches.len(),
            summary: None,
        }
    }

    /// Build a `JsonOutput` for a distinct-folder count.
    #[must_use]
    pub fn from_count(count: usize) -> Self {
        Self {
            query: "count".to_string(),
            name: None,
            label: None,
            tier: None,
            folders: Vec::new(),
            count,
            summary: None,
        }
    }

    /// Build a `JsonOutput` for the overview report.
    ///
    /// Takes every distinct reachable folder and breaks the collection down
    /// by tier, with unparseable declarations counted separately.
    #[must_use]
    pub fn from_report(folders: &Folders) -> Self {
        let count = folders.len();

        Self {
            query: "report".to_string(),
            name: None,
            label: None,
            tier: None,
            folders: folders.iter().map(JsonFolderEntry::from_folder).collect(),
            count,
            summary: Some(JsonReportSummary::from_folders(folders)),
        }
    }
}

impl JsonFolderEntry {
    /// Convert a folder into a `JsonFolderEntry`.
    #[must_use]
    pub fn from_folder(folder: &FolderHandle) -> Self {
        let size_bytes = folder.size_bytes();

        Self {
            name: folder.name().to_string(),
            kind: if folder.is_group() { "group" } else { "folder" },
            size: folder.size().to_string(),
            size_bytes,
            size_formatted: size_bytes.map(|bytes| format_size(bytes, BINARY)),
            tier: folder.tier(),
        }
    }
}

impl JsonReportSummary {
    /// Compute per-tier statistics from a folder collection.
    #[must_use]
    pub fn from_folders(folders: &Folders) -> Self {
        let mut by_tier: BTreeMap<String, (usize, u64)> = BTreeMap::new();
        let mut unclassified = 0usize;

        for folder in folders {
            match folder.tier() {
                Some(tier) => {
                    let key = tier.as_str().to_ascii_lowercase();
                    let entry = by_tier.entry(key).or_insert((0, 0));
                    entry.0 += 1;
                    entry.1 += folder.size_bytes().unwrap_or(0);
                }
                None => unclassified += 1,
            }
        }

        let total_size = folders.total_declared_bytes();

        Self {
            by_tier: by_tier
                .into_iter()
                .map(|(key, (count, size))| {
                    (
                        key,
                        JsonTierSummary {
                            count,
                            size,
                            size_formatted: format_size(size, BINARY),
                        },
                    )
                })
                .collect(),
            unclassified,
            total_size,
            total_size_formatted: format_size(total_size, BINARY),
        }
    }
}
