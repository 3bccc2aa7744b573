//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library. It provides structured access
//! to user input and handles argument conflicts and defaults.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use file_cabinet::config::file::{FileConfig, expand_tilde};
use file_cabinet::config::ScanOptions;

/// Command-line arguments for controlling directory scanning behavior.
///
/// These options affect how a directory tree is traversed when the cabinet
/// is built from disk with `--scan`. They are ignored when the cabinet
/// comes from a manifest file.
#[derive(Parser)]
struct ScanningArgs {
    /// The number of threads to use for directory scanning
    ///
    /// A value of 0 uses the default number of threads (typically the number of CPU cores).
    /// Higher values can improve scanning performance on systems with fast storage.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Show access errors that occur while scanning
    ///
    /// When enabled, displays errors encountered while accessing files or directories
    /// during the scanning process. Useful for debugging permission issues.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Glob patterns for entry names to exclude from the scan
    ///
    /// Entries whose name matches one of these patterns are left out of the
    /// cabinet entirely. Can be specified multiple times, e.g.
    /// `--exclude '*.tmp' --exclude .git`
    #[arg(long, action = clap::ArgAction::Append)]
    exclude: Vec<String>,

    /// Maximum directory depth to scan
    ///
    /// Limits how deep into the directory tree the scanner will traverse.
    /// Directories at the cutoff depth become plain folders whose declared
    /// size is measured on disk. When not set, the scan is unlimited.
    #[arg(long)]
    max_depth: Option<usize>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Find the first folder with the given name
    Find {
        /// Exact folder name to look for (case-sensitive)
        name: String,
    },

    /// List the folders in a size tier
    Size {
        /// Size tier label: S/M/L or small/medium/large (case-insensitive)
        ///
        /// When omitted, an interactive tier picker is shown. A label that
        /// names no tier yields an empty result rather than an error.
        label: Option<String>,
    },

    /// Print the number of distinct folders in the cabinet
    Count,

    /// Print a cabinet overview: distinct count and per-tier breakdown
    Report,

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Where the cabinet comes from.
pub enum CabinetSource {
    /// A `.json` or `.toml` manifest file
    Manifest(PathBuf),

    /// A directory tree to scan
    Scan(PathBuf),
}

/// Main command-line interface structure.
///
/// This struct defines the complete command-line interface for the file-cabinet
/// tool, combining the cabinet source arguments, scanning options, and the
/// query subcommands.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values
/// act as defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "file-cabinet")]
#[command(
    about = "Explore a hierarchical folder cabinet: find folders by name, bucket them into size tiers, and count distinct entries"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Query subcommand; defaults to `report` when omitted
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Load the cabinet from a manifest file (.json or .toml)
    ///
    /// The manifest lists the top-level folders; entries with a `children`
    /// list are groups, and `{"ref": "<id>"}` entries reuse a folder that
    /// was declared earlier with that id.
    #[arg(short = 'f', long = "file", conflicts_with = "scan")]
    file: Option<PathBuf>,

    /// Build the cabinet from a directory tree on disk
    ///
    /// Directories become folder groups and files become plain folders;
    /// declared sizes are actual byte counts.
    #[arg(long)]
    scan: Option<PathBuf>,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, all human-readable output (colors, progress bars, emojis)
    /// is suppressed and a single JSON document is printed to stdout.
    #[arg(long)]
    json: bool,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    ///
    /// The CLI flag takes priority; otherwise the config file's
    /// `[output] json` value applies.
    #[must_use]
    pub fn json(&self, config: &FileConfig) -> bool {
        self.json || config.output.json.unwrap_or(false)
    }

    /// Resolve the cabinet source from CLI args and config file.
    ///
    /// Priority: `--file` > `--scan` > config `manifest` > config `dir`.
    /// Tilde expansion is applied to paths originating from the config file.
    /// Returns `None` when no source is configured anywhere; the caller
    /// turns that into a helpful error.
    #[must_use]
    pub fn source(&self, config: &FileConfig) -> Option<CabinetSource> {
        if let Some(ref path) = self.file {
            return Some(CabinetSource::Manifest(path.clone()));
        }

        if let Some(ref path) = self.scan {
            return Some(CabinetSource::Scan(path.clone()));
        }

        if let Some(ref path) = config.manifest {
            return Some(CabinetSource::Manifest(expand_tilde(path)));
        }

        if let Some(ref path) = config.dir {
            return Some(CabinetSource::Scan(expand_tilde(path)));
        }

        None
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **threads**: CLI > config > `0` (default)
    /// - **verbose**: CLI flag `||` config value `||` `false`
    /// - **exclude**: merged from both sources (config values first, then CLI)
    /// - **`max_depth`**: CLI > config > unlimited
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        let mut exclude = config.scanning.exclude.clone().unwrap_or_default();
        exclude.extend(self.scanning.exclude.clone());

        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            threads: self
                .scanning
                .threads
                .or(config.scanning.threads)
                .unwrap_or(0),
            exclude,
            max_depth: self.scanning.max_depth.or(config.scanning.max_depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use file_cabinet::config::file::{FileConfig, FileOutputConfig, FileScanConfig};

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["file-cabinet"]);
        let config = FileConfig::default();

        assert!(args.subcommand.is_none());
        assert!(!args.json(&config));
        assert!(args.source(&config).is_none());

        let scan_opts = args.scan_options(&config);
        assert!(!scan_opts.verbose);
        assert_eq!(scan_opts.threads, 0);
        assert!(scan_opts.exclude.is_empty());
        assert!(scan_opts.max_depth.is_none());
    }

    #[test]
    fn test_manifest_source() {
        let args = Cli::parse_from(["file-cabinet", "--file", "cabinet.json", "count"]);
        let config = FileConfig::default();

        match args.source(&config) {
            Some(CabinetSource::Manifest(path)) => {
                assert_eq!(path, PathBuf::from("cabinet.json"));
            }
            _ => panic!("expected a manifest source"),
        }
    }

    #[test]
    fn test_scan_source() {
        let args = Cli::parse_from(["file-cabinet", "--scan", "/some/dir", "count"]);
        let config = FileConfig::default();

        match args.source(&config) {
            Some(CabinetSource::Scan(path)) => {
                assert_eq!(path, PathBuf::from("/some/dir"));
            }
            _ => panic!("expected a scan source"),
        }
    }

    #[test]
    fn test_file_and_scan_conflict() {
        let result = Cli::try_parse_from([
            "file-cabinet",
            "--file",
            "cabinet.json",
            "--scan",
            "/some/dir",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_manifest_as_fallback_source() {
        let args = Cli::parse_from(["file-cabinet", "count"]);
        let config = FileConfig {
            manifest: Some(PathBuf::from("/cabinets/main.toml")),
            ..FileConfig::default()
        };

        match args.source(&config) {
            Some(CabinetSource::Manifest(path)) => {
                assert_eq!(path, PathBuf::from("/cabinets/main.toml"));
            }
            _ => panic!("expected the config manifest"),
        }
    }

    #[test]
    fn test_cli_file_beats_config_manifest() {
        let args = Cli::parse_from(["file-cabinet", "--file", "other.json", "count"]);
        let config = FileConfig {
            manifest: Some(PathBuf::from("/cabinets/main.toml")),
            ..FileConfig::default()
        };

        match args.source(&config) {
            Some(CabinetSource::Manifest(path)) => {
                assert_eq!(path, PathBuf::from("other.json"));
            }
            _ => panic!("expected the CLI manifest"),
        }
    }

    #[test]
    fn test_config_dir_as_last_resort_source() {
        let args = Cli::parse_from(["file-cabinet", "count"]);
        let config = FileConfig {
            dir: Some(PathBuf::from("/files")),
            ..FileConfig::default()
        };

        match args.source(&config) {
            Some(CabinetSource::Scan(path)) => {
                assert_eq!(path, PathBuf::from("/files"));
            }
            _ => panic!("expected the config scan directory"),
        }
    }

    #[test]
    fn test_config_manifest_beats_config_dir() {
        let args = Cli::parse_from(["file-cabinet", "count"]);
        let config = FileConfig {
            manifest: Some(PathBuf::from("/cabinets/main.json")),
            dir: Some(PathBuf::from("/files")),
            ..FileConfig::default()
        };

        assert!(matches!(
            args.source(&config),
            Some(CabinetSource::Manifest(_))
        ));
    }

    #[test]
    fn test_find_subcommand() {
        let args = Cli::parse_from(["file-cabinet", "-f", "c.json", "find", "B-medium"]);

        match args.subcommand {
            Some(Commands::Find { ref name }) => assert_eq!(name, "B-medium"),
            _ => panic!("expected the find subcommand"),
        }
    }

    #[test]
    fn test_size_subcommand_with_and_without_label() {
        let with_label = Cli::parse_from(["file-cabinet", "-f", "c.json", "size", "M"]);
        match with_label.subcommand {
            Some(Commands::Size { ref label }) => assert_eq!(label.as_deref(), Some("M")),
            _ => panic!("expected the size subcommand"),
        }

        let without_label = Cli::parse_from(["file-cabinet", "-f", "c.json", "size"]);
        match without_label.subcommand {
            Some(Commands::Size { ref label }) => assert!(label.is_none()),
            _ => panic!("expected the size subcommand"),
        }
    }

    #[test]
    fn test_json_flag_and_config_layering() {
        let flag_args = Cli::parse_from(["file-cabinet", "--json", "count"]);
        assert!(flag_args.json(&FileConfig::default()));

        let plain_args = Cli::parse_from(["file-cabinet", "count"]);
        let config = FileConfig {
            output: FileOutputConfig { json: Some(true) },
            ..FileConfig::default()
        };
        assert!(plain_args.json(&config));
    }

    #[test]
    fn test_scan_options_from_cli() {
        let args = Cli::parse_from([
            "file-cabinet",
            "--scan",
            "/d",
            "--verbose",
            "--threads",
            "4",
            "--exclude",
            "*.tmp",
            "--exclude",
            ".git",
            "--max-depth",
            "3",
            "count",
        ]);
        let options = args.scan_options(&FileConfig::default());

        assert!(options.verbose);
        assert_eq!(options.threads, 4);
        assert_eq!(options.exclude, vec!["*.tmp", ".git"]);
        assert_eq!(options.max_depth, Some(3));
    }

    #[test]
    fn test_scan_options_merge_excludes_config_first() {
        let args = Cli::parse_from(["file-cabinet", "--exclude", "*.log", "count"]);
        let config = FileConfig {
            scanning: FileScanConfig {
                exclude: Some(vec![".git".to_string()]),
                ..FileScanConfig::default()
            },
            ..FileConfig::default()
        };

        let options = args.scan_options(&config);
        assert_eq!(options.exclude, vec![".git", "*.log"]);
    }

    #[test]
    fn test_scan_options_cli_beats_config() {
        let args = Cli::parse_from(["file-cabinet", "--threads", "2", "count"]);
        let config = FileConfig {
            scanning: FileScanConfig {
                threads: Some(8),
                max_depth: Some(5),
                ..FileScanConfig::default()
            },
            ..FileConfig::default()
        };

        let options = args.scan_options(&config);
        assert_eq!(options.threads, 2);
        assert_eq!(options.max_depth, Some(5));
    }

    #[test]
    fn test_config_subcommands() {
        let show = Cli::parse_from(["file-cabinet", "config", "show"]);
        assert!(matches!(
            show.subcommand,
            Some(Commands::Config {
                command: ConfigCommand::Show
            })
        ));

        let init = Cli::parse_from(["file-cabinet", "config", "init"]);
        assert!(matches!(
            init.subcommand,
            Some(Commands::Config {
                command: ConfigCommand::Init
            })
        ));

        let path = Cli::parse_from(["file-cabinet", "config", "path"]);
        assert!(matches!(
            path.subcommand,
            Some(Commands::Config {
                command: ConfigCommand::Path
            })
        ));
    }
}
