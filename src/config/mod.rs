//! Configuration types and persistent settings.
//!
//! This module groups the configuration surface of the application: the
//! resolved option structs handed to the scanner and the TOML-backed
//! configuration file whose values serve as defaults for CLI arguments.

pub mod file;
pub mod scan;

pub use file::{FileConfig, expand_tilde};
pub use scan::ScanOptions;
