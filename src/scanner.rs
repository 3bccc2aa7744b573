//! Directory scanning and cabinet construction from disk.
//!
//! This module builds a folder hierarchy from a real directory tree:
//! directories become folder groups, files become plain folders, and the
//! resulting top-level folders are handed to a [`Cabinet`]. It supports
//! parallel processing of top-level subtrees and handles unreadable
//! entries gracefully.

use std::fs;
use std::path::Path;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::cabinet::Cabinet;
use crate::config::ScanOptions;
use crate::folder::{Folder, FolderHandle};
use crate::utils::calculate_dir_size;

/// Directory scanner that mirrors a directory tree into a cabinet.
///
/// The `Scanner` struct encapsulates the logic for traversing a directory
/// tree and turning it into folders: every directory becomes a group whose
/// declared size is the aggregate byte count of its subtree, and every file
/// becomes a plain folder whose declared size is its length in bytes. All
/// declared sizes are plain byte-count strings, so every scanned folder
/// classifies into a size tier.
pub struct Scanner {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,

    /// Compiled exclusion patterns, matched against entry names
    exclude: Vec<Pattern>,

    /// When `true`, suppresses progress spinner output (used by `--json` mode).
    quiet: bool,
}

/// A subtree built by the scanner: the folder and its total size in bytes.
///
/// The byte count rides along so a parent group can declare its aggregate
/// size without re-parsing the children's size strings.
struct ScannedEntry {
    folder: FolderHandle,
    bytes: u64,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    ///
    /// Exclusion patterns that fail to compile as globs are dropped with a
    /// warning on stderr rather than failing the whole scan.
    ///
    /// # Arguments
    ///
    /// * `scan_options` - Configuration for scanning behavior (threads, verbosity, etc.)
    ///
    /// # Returns
    ///
    /// A new `Scanner` instance configured with the provided options.
    #[must_use]
    pub fn new(scan_options: ScanOptions) -> Self {
        let exclude = scan_options
            .exclude
            .iter()
            .filter_map(|raw| match Pattern::new(raw) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    eprintln!(
                        "{}",
                        format!("Ignoring invalid exclude pattern '{raw}': {e}").yellow()
                    );
                    None
                }
            })
            .collect();

        Self {
            scan_options,
            exclude,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses progress spinner).
    ///
    /// When quiet mode is active the scanning spinner is hidden, which is
    /// required for `--json` output so that only the final JSON is printed.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build a cabinet from the given directory.
    ///
    /// The immediate entries of `root` become the cabinet's top-level
    /// folders, in name order. Each top-level subtree is built in parallel.
    /// Unreadable entries below the root are skipped (and reported on
    /// stderr in verbose mode); only a failure to read the root itself is
    /// fatal.
    ///
    /// # Arguments
    ///
    /// * `root` - The root directory to build the cabinet from
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a directory or cannot be read.
    ///
    /// # Panics
    ///
    /// This method may panic if the progress bar template string is invalid,
    /// though this should not occur under normal circumstances as the template
    /// is hardcoded and valid.
    pub fn scan_directory(&self, root: &Path) -> Result<Cabinet> {
        if !root.is_dir() {
            bail!("{} is not a directory", root.display());
        }

        let errors = Arc::new(Mutex::new(Vec::<String>::new()));

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            pb.set_message("Scanning...");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        };

        let found_count = Arc::new(AtomicUsize::new(0));

        let top_level_paths = self
            .read_entries(root, &errors)
            .with_context(|| format!("Failed to scan {}", root.display()))?;

        // Build each top-level subtree in parallel; entries are already in
        // name order and par_iter preserves it.
        let top_level: Vec<FolderHandle> = top_level_paths
            .par_iter()
            .filter_map(|path| {
                self.build_entry(path, 0, &found_count, &progress, &errors)
                    .map(|entry| entry.folder)
            })
            .collect();

        progress.finish_with_message(format!(
            "✅ Scan complete: {} folders",
            found_count.load(Ordering::Relaxed)
        ));

        // Print collected errors if verbose
        if self.scan_options.verbose {
            let errors = errors.lock().unwrap();
            for error in errors.iter() {
                eprintln!("{}", error.red());
            }
        }

        Ok(Cabinet::new(top_level))
    }

    /// Build the folder for one directory entry.
    ///
    /// Files become plain folders. Directories become groups, except at the
    /// `max_depth` cutoff, where they become plain folders whose declared
    /// size is measured on disk. Returns `None` for excluded or unreadable
    /// entries.
    fn build_entry(
        &self,
        path: &Path,
        depth: usize,
        found_count: &Arc<AtomicUsize>,
        progress: &ProgressBar,
        errors: &Arc<Mutex<Vec<String>>>,
    ) -> Option<ScannedEntry> {
        if self.is_excluded(path) {
            return None;
        }

        let name = path.file_name()?.to_str()?.to_string();

        let entry = if path.is_dir() {
            if self.at_depth_cutoff(depth) {
                // Don't descend; declare the measured size of the whole subtree.
                let bytes = calculate_dir_size(path);
                ScannedEntry {
                    folder: Folder::leaf(name, bytes.to_string()),
                    bytes,
                }
            } else {
                self.build_group(path, &name, depth, found_count, progress, errors)?
            }
        } else {
            let bytes = match path.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    self.log_entry_error(path, &e, errors);
                    return None;
                }
            };
            ScannedEntry {
                folder: Folder::leaf(name, bytes.to_string()),
                bytes,
            }
        };

        let n = found_count.fetch_add(1, Ordering::Relaxed) + 1;
        progress.set_message(format!("Scanning... {n} folders"));

        Some(entry)
    }

    /// Build a group from a directory and its children.
    ///
    /// The group's declared size is the sum of its children's byte counts,
    /// rendered as a plain integer string.
    fn build_group(
        &self,
        path: &Path,
        name: &str,
        depth: usize,
        found_count: &Arc<AtomicUsize>,
        progress: &ProgressBar,
        errors: &Arc<Mutex<Vec<String>>>,
    ) -> Option<ScannedEntry> {
        let child_paths = self.read_entries(path, errors).ok()?;

        let mut children = Vec::with_capacity(child_paths.len());
        let mut bytes: u64 = 0;

        for child_path in &child_paths {
            if let Some(child) =
                self.build_entry(child_path, depth + 1, found_count, progress, errors)
            {
                bytes = bytes.saturating_add(child.bytes);
                children.push(child.folder);
            }
        }

        Some(ScannedEntry {
            folder: Folder::group(name, bytes.to_string(), children),
            bytes,
        })
    }

    /// Read a directory's entries sorted by name.
    ///
    /// Name order makes the cabinet's traversal order deterministic across
    /// platforms and runs.
    fn read_entries(
        &self,
        dir: &Path,
        errors: &Arc<Mutex<Vec<String>>>,
    ) -> std::io::Result<Vec<std::path::PathBuf>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.log_entry_error(dir, &e, errors);
                return Err(e);
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    self.log_entry_error(dir, &e, errors);
                    None
                }
            })
            .collect();

        paths.sort_by_key(|path| path.file_name().map(std::ffi::OsStr::to_os_string));
        Ok(paths)
    }

    /// Whether a directory at this depth should not be descended into.
    fn at_depth_cutoff(&self, depth: usize) -> bool {
        self.scan_options
            .max_depth
            .is_some_and(|max_depth| depth >= max_depth)
    }

    /// Check if an entry's name matches one of the exclusion patterns.
    fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.exclude.iter().any(|pattern| pattern.matches(name)))
    }

    /// Record an access error for later reporting if verbose mode is enabled.
    fn log_entry_error(
        &self,
        path: &Path,
        error: &std::io::Error,
        errors: &Arc<Mutex<Vec<String>>>,
    ) {
        if self.scan_options.verbose {
            errors
                .lock()
                .unwrap()
                .push(format!("Error reading {}: {error}", path.display()));
        }
    }
}
