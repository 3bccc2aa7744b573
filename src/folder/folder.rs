//! Core folder data structures and types.
//!
//! This module defines the fundamental data structures used to represent
//! folders and folder groups throughout the application. Folders form a
//! directed acyclic graph: a group holds shared handles to its children,
//! so the same folder instance can appear under several parents.

use std::fmt::{Display, Formatter, Result};
use std::sync::Arc;

use crate::utils::{SizeTier, parse_size};

/// Shared handle to an immutable folder.
///
/// Cabinets, groups, and query results all hold folders through this
/// handle. Two handles denote the same folder exactly when they point at
/// the same instance; folders with equal names and sizes are still
/// distinct entries. Compare handles with [`Arc::ptr_eq`].
pub type FolderHandle = Arc<Folder>;

/// The two shapes a folder can take.
///
/// This enum distinguishes plain folders from folder groups. Only groups
/// carry children; a plain folder is always a leaf of the graph.
#[derive(Debug)]
pub enum FolderKind {
    /// A plain folder with no nested entries
    ///
    /// Leaves carry nothing beyond the name and declared size every
    /// folder has.
    Leaf,

    /// A folder group with an ordered list of child folders
    ///
    /// The child list is fixed at construction time and its order is
    /// preserved exactly as declared. Children are shared handles, so
    /// a child may simultaneously belong to other groups.
    Group {
        /// Child folders in declared order
        children: Vec<FolderHandle>,
    },
}

/// An immutable named folder with a declared size.
///
/// Every folder has a name and a size declaration. The size is kept as
/// the raw declared string: declarations come from external descriptions
/// and are not required to be well-formed. Queries parse the string on
/// demand and treat unparseable declarations as having no size tier.
#[derive(Debug)]
pub struct Folder {
    /// Name of the folder
    name: String,

    /// Declared size string (e.g., "850MB")
    ///
    /// Stored verbatim, including declarations that do not parse.
    size: String,

    /// Whether this folder is a leaf or a group with children
    kind: FolderKind,
}

impl Folder {
    /// Create a plain folder with no children.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the folder
    /// * `size` - Declared size string (e.g., "50MB")
    ///
    /// # Returns
    ///
    /// A shared handle to the new folder.
    ///
    /// # Examples
    ///
    /// ```
    /// # use file_cabinet::folder::Folder;
    /// let report = Folder::leaf("report.pdf", "50MB");
    /// assert_eq!(report.name(), "report.pdf");
    /// ```
    #[must_use]
    pub fn leaf(name: impl Into<String>, size: impl Into<String>) -> FolderHandle {
        Arc::new(Self {
            name: name.into(),
            size: size.into(),
            kind: FolderKind::Leaf,
        })
    }

    /// Create a folder group with the given children.
    ///
    /// The group takes ownership of the child list; the declared order is
    /// preserved and cannot change afterwards. Passing an empty list is
    /// valid and produces a group with no children, which is still a
    /// group and not a leaf.
    ///
    /// A group's declared size is its own value. It is not derived from
    /// the children and is never kept in sync with them.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the group
    /// * `size` - Declared size string of the group itself
    /// * `children` - Child folders in declared order
    ///
    /// # Returns
    ///
    /// A shared handle to the new group.
    ///
    /// # Examples
    ///
    /// ```
    /// # use file_cabinet::folder::Folder;
    /// let a = Folder::leaf("A", "50MB");
    /// let b = Folder::leaf("B", "850MB");
    /// let group = Folder::group("G1", "900MB", vec![a, b]);
    /// assert!(group.is_group());
    /// ```
    #[must_use]
    pub fn group(
        name: impl Into<String>,
        size: impl Into<String>,
        children: Vec<FolderHandle>,
    ) -> FolderHandle {
        Arc::new(Self {
            name: name.into(),
            size: size.into(),
            kind: FolderKind::Group { children },
        })
    }

    /// Name of the folder.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared size string, exactly as provided at construction.
    #[must_use]
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Whether this folder is a group.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self.kind, FolderKind::Group { .. })
    }

    /// Child folders of a group, in declared order.
    ///
    /// # Returns
    ///
    /// - `Some(&[FolderHandle])` - The children, for a group (possibly empty)
    /// - `None` - For a plain folder, which has no notion of children
    #[must_use]
    pub fn children(&self) -> Option<&[FolderHandle]> {
        match &self.kind {
            FolderKind::Leaf => None,
            FolderKind::Group { children } => Some(children),
        }
    }

    /// Declared size parsed into bytes.
    ///
    /// Parsing happens on demand with [`parse_size`]; an unparseable
    /// declaration yields `None` rather than an error.
    #[must_use]
    pub fn size_bytes(&self) -> Option<u64> {
        parse_size(&self.size)
    }

    /// Size tier of the folder, if its declared size parses.
    ///
    /// Folders with unparseable declarations have no tier and never
    /// match a tier query.
    #[must_use]
    pub fn tier(&self) -> Option<SizeTier> {
        self.size_bytes().map(SizeTier::classify)
    }
}

impl Display for Folder {
    /// Format the folder for display with an icon, name, and declared size.
    ///
    /// Groups get a 📁 icon and plain folders a 📄 icon.
    ///
    /// # Examples
    ///
    /// - `📁 assets (900MB)`
    /// - `📄 report.pdf (50MB)`
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let icon = if self.is_group() { "📁" } else { "📄" };
        write!(f, "{icon} {} ({})", self.name, self.size)
    }
}
