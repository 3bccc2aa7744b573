//! Utility functions and helpers.
//!
//! This module contains utility functions used throughout the application,
//! such as size parsing and tier classification helpers.

pub mod size;

pub use size::{SizeTier, calculate_dir_size, parse_size};
