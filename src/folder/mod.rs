//! Folder representation and management functionality.
//!
//! This module contains the core data structures for representing folders
//! and folder groups. It provides types for individual folders, shared
//! handles to them, and ordered collections of query results.
//!
//! ## Main Parts
//!
//! - [`Folder`] - An immutable named folder with a declared size
//! - [`FolderKind`] - Distinguishes plain folders from folder groups
//! - [`FolderHandle`] - Shared handle allowing one folder to appear under several groups
//! - [`Folders`] - An ordered collection of folder handles with batch operations

#[allow(clippy::module_inception)]
// This is acceptable as it is the main module for folder management
pub mod folder;
pub mod folders;

pub use folder::{Folder, FolderHandle, FolderKind};
pub use folders::Folders;
