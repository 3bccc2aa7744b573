//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control how a directory tree is
//! turned into a cabinet and what information is collected along the way.

/// Configuration for directory scanning behavior.
///
/// This struct contains the fully resolved options that control how a
/// directory tree is traversed when building a cabinet from disk.
#[derive(Clone, Default)]
pub struct ScanOptions {
    /// Whether to show access errors encountered during scanning
    pub verbose: bool,

    /// Number of threads to use for scanning (0 = all CPU cores)
    pub threads: usize,

    /// Glob patterns for entry names to exclude from the scan
    pub exclude: Vec<String>,

    /// Maximum directory depth to descend into (None = unlimited)
    ///
    /// Directories sitting at the cutoff depth are not descended into;
    /// they become plain folders whose size is measured on disk.
    pub max_depth: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_options_creation() {
        let scan_opts = ScanOptions {
            verbose: true,
            threads: 4,
            exclude: vec!["*.tmp".to_string()],
            max_depth: Some(3),
        };

        assert!(scan_opts.verbose);
        assert_eq!(scan_opts.threads, 4);
        assert_eq!(scan_opts.exclude.len(), 1);
        assert_eq!(scan_opts.max_depth, Some(3));
    }

    #[test]
    fn test_scan_options_default() {
        let scan_opts = ScanOptions::default();

        assert!(!scan_opts.verbose);
        assert_eq!(scan_opts.threads, 0);
        assert!(scan_opts.exclude.is_empty());
        assert!(scan_opts.max_depth.is_none());
    }
}
