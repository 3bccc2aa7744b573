//! Core library for the file-cabinet tool.
//!
//! A cabinet is an immutable collection of top-level folders. Folders form a
//! directed acyclic graph: a folder group holds shared handles to its
//! children, so the same folder instance may appear under several groups at
//! once. The cabinet answers three queries — find a folder by name, list the
//! folders in a size tier, and count distinct folders — all through one
//! deduplicated breadth-first traversal that visits every instance exactly
//! once no matter how many paths reach it.
//!
//! Cabinets are built programmatically from [`folder::Folder`] handles, loaded
//! from JSON/TOML manifest files ([`manifest`]), or mirrored from a real
//! directory tree ([`scanner::Scanner`]).
//!
//! ```
//! use file_cabinet::cabinet::Cabinet;
//! use file_cabinet::folder::Folder;
//!
//! let a = Folder::leaf("A-small", "50MB");
//! let b = Folder::leaf("B-medium", "850MB");
//! let g1 = Folder::group("G1", "900MB", vec![a, b]);
//! let cabinet = Cabinet::new(vec![g1, Folder::leaf("C-large", "2GB")]);
//!
//! assert_eq!(cabinet.count(), 4);
//! assert!(cabinet.find_folder_by_name("B-medium").is_some());
//! assert_eq!(cabinet.find_folders_by_size("L").len(), 1);
//! ```

pub mod cabinet;
pub mod config;
pub mod folder;
pub mod manifest;
pub mod output;
pub mod scanner;
pub mod utils;

pub use cabinet::Cabinet;
pub use config::{FileConfig, ScanOptions};
pub use folder::{Folder, FolderHandle, FolderKind, Folders};
pub use utils::{SizeTier, parse_size};
