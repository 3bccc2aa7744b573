//! # file-cabinet
//!
//! A CLI tool for exploring hierarchical folder cabinets: find folders by name,
//! bucket them into size tiers, and count distinct entries across shared
//! structures.
//!
//! A cabinet is loaded from a declarative manifest file (JSON or TOML) or built
//! from a real directory tree, then queried. Folders form a directed acyclic
//! graph — a folder can be referenced by several groups at once — and every
//! query visits each distinct folder exactly once.
//!
//! ## Features
//!
//! - Name lookup, size-tier filtering, and distinct-folder counting
//! - Shared folder references (the same folder under multiple groups)
//! - Manifest files in JSON or TOML with `id`/`ref` sharing
//! - Building a cabinet straight from a directory tree, in parallel
//! - Interactive tier picker when no tier label is given
//! - Human-readable output with progress indicators, or `--json` for scripting
//! - Persistent configuration via `~/.config/file-cabinet/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Overview of a manifest cabinet
//! file-cabinet --file cabinet.json
//!
//! # Find a folder by exact name
//! file-cabinet --file cabinet.json find B-medium
//!
//! # All folders in the MEDIUM tier
//! file-cabinet --file cabinet.json size M
//!
//! # Count distinct folders in a scanned directory tree
//! file-cabinet --scan ~/files count
//! ```

mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;
use file_cabinet::{
    cabinet::Cabinet,
    config::FileConfig,
    manifest::load_cabinet,
    output::JsonOutput,
    scanner::Scanner,
    utils::SizeTier,
};
use inquire::Select;
use std::process::exit;

use cli::{CabinetSource, Cli, Commands, ConfigCommand};

/// Entry point for the file-cabinet application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function orchestrates the full pipeline: parse arguments, acquire the
/// cabinet (manifest or scan), and run the requested query.
///
/// # Errors
///
/// Returns errors from thread-pool configuration, manifest loading, directory
/// scanning, interactive selection, or JSON serialization. Query-level edge
/// cases (unknown names, unrecognized tier labels) are not errors; they
/// degrade to empty results.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    // Config-load warnings are suppressed based on the raw flag; the
    // effective JSON mode also honors the config file itself.
    let file_config = load_config(args.json(&FileConfig::default()));
    let json_mode = args.json(&file_config);

    let scan_options = args.scan_options(&file_config);

    if scan_options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(scan_options.threads)
            .build_global()?;
    }

    let Some(source) = args.source(&file_config) else {
        bail!(
            "No cabinet source given. Pass --file <MANIFEST> or --scan <DIR>, \
             or set `manifest`/`dir` in the config file (see `file-cabinet config init`)."
        );
    };

    let cabinet = match source {
        CabinetSource::Manifest(path) => load_cabinet(&path)?,
        CabinetSource::Scan(path) => Scanner::new(scan_options)
            .with_quiet(json_mode)
            .scan_directory(&path)?,
    };

    match args.subcommand {
        Some(Commands::Find { ref name }) => run_find(&cabinet, name, json_mode),
        Some(Commands::Size { ref label }) => run_size(&cabinet, label.as_deref(), json_mode),
        Some(Commands::Count) => run_count(&cabinet, json_mode),
        Some(Commands::Report) | None => run_report(&cabinet, json_mode),
        Some(Commands::Config { .. }) => unreachable!("handled before cabinet acquisition"),
    }
}

// ── Query commands ──────────────────────────────────────────────────────

/// Run the `find` query and print the result.
fn run_find(cabinet: &Cabinet, name: &str, json_mode: bool) -> Result<()> {
    let result = cabinet.find_folder_by_name(name);

    if json_mode {
        let output = JsonOutput::from_find(name, result.as_ref());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match result {
        Some(folder) => {
            let tier = folder
                .tier()
                .map_or_else(|| "no tier".to_string(), |t| t.to_string());
            println!("{folder}  {}", format!("[{tier}]").dimmed());
        }
        None => println!("{}", format!("No folder named '{name}' found.").yellow()),
    }

    Ok(())
}

/// Run the `size` query and print the matching folders.
///
/// When no label was given on the command line, an interactive tier picker
/// is shown (human mode only; `--json` requires an explicit label).
fn run_size(cabinet: &Cabinet, label: Option<&str>, json_mode: bool) -> Result<()> {
    let label = match label {
        Some(label) => label.to_string(),
        None => {
            if json_mode {
                bail!("--json requires an explicit size label (S, M, or L)");
            }
            pick_tier()?
        }
    };

    let matches = cabinet.find_folders_by_size(&label);

    if json_mode {
        let output = JsonOutput::from_size_query(&label, &matches);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if matches.is_empty() {
        let reason = if SizeTier::from_label(&label).is_none() {
            format!("'{label}' names no size tier (use S, M, or L)")
        } else {
            "no folders in that tier".to_string()
        };
        println!("{}", format!("✨ Nothing to list: {reason}.").green());
        return Ok(());
    }

    for folder in &matches {
        println!("{folder}");
    }

    Ok(())
}

/// Let the user pick a size tier interactively.
fn pick_tier() -> Result<String> {
    let tier = Select::new(
        "Which size tier?",
        vec![SizeTier::Small, SizeTier::Medium, SizeTier::Large],
    )
    .prompt()?;

    Ok(tier.to_string())
}

/// Run the `count` query.
fn run_count(cabinet: &Cabinet, json_mode: bool) -> Result<()> {
    let count = cabinet.count();

    if json_mode {
        let output = JsonOutput::from_count(count);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let noun = if count == 1 { "folder" } else { "folders" };
        println!("{} distinct {noun}", count.to_string().bright_white().bold());
    }

    Ok(())
}

/// Run the `report` overview: distinct count plus a per-tier breakdown.
fn run_report(cabinet: &Cabinet, json_mode: bool) -> Result<()> {
    let folders = cabinet.all_folders();

    if json_mode {
        let output = JsonOutput::from_report(&folders);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if folders.is_empty() {
        println!("{}", "✨ The cabinet is empty!".green());
        return Ok(());
    }

    println!(
        "{} {} distinct folders",
        "📊 Cabinet overview:".bold(),
        folders.len().to_string().bright_white()
    );
    folders.print_summary();

    Ok(())
}

// ── Config subcommand ───────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# file-cabinet configuration
# All values shown are their defaults. Uncomment and change as needed.

# Default cabinet manifest to load (takes priority over `dir` when both are set)
# manifest = "~/cabinets/main.json"

# Default directory to build the cabinet from when no manifest is set
# dir = "~/files"

[output]
# Emit machine-readable JSON by default
# json = false

[scanning]
# Number of threads to use for scanning (0 = all CPU cores)
# threads = 0

# Show access errors encountered during scanning
# verbose = false

# Maximum directory depth to descend into (unset = unlimited)
# max_depth = 6

# Glob patterns for entry names to exclude from the scan
# exclude = [".git", "*.tmp"]
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_path(val: Option<&std::path::Path>) -> String {
        val.map_or_else(
            || "(none)  (default)".to_string(),
            |p| format!("\"{}\"", p.display()),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_usize(val: Option<usize>, default: &str) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_patterns(val: Option<&[String]>) -> String {
        match val {
            Some(v) if !v.is_empty() => {
                let items: Vec<String> = v.iter().map(|p| format!("\"{p}\"")).collect();
                format!("[{}]", items.join(", "))
            }
            _ => "[]  (default)".to_string(),
        }
    }

    format!(
        "\
manifest  = {manifest}
dir       = {dir}

[output]
json      = {json}

[scanning]
threads   = {threads}
verbose   = {verbose}
max_depth = {max_depth}
exclude   = {exclude}",
        manifest = show_path(config.manifest.as_deref()),
        dir = show_path(config.dir.as_deref()),
        json = show_bool(config.output.json, false),
        threads = show_usize(config.scanning.threads, "0 (all cores)"),
        verbose = show_bool(config.scanning.verbose, false),
        max_depth = show_usize(config.scanning.max_depth, "unlimited"),
        exclude = show_patterns(config.scanning.exclude.as_deref()),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}
