//! Collection management and operations for folder query results.
//!
//! This module provides the `Folders` struct which wraps an ordered
//! collection of folder handles and provides operations on them, including
//! size accounting and summary reporting. Query results preserve the order
//! in which the traversal discovered the folders.

use colored::Colorize;
use humansize::{BINARY, format_size};

use crate::utils::SizeTier;

use super::FolderHandle;

/// An ordered collection of folder handles with associated operations.
///
/// The `Folders` struct wraps a vector of [`FolderHandle`] instances and
/// provides higher-level operations such as size accounting and summary
/// reporting. It is the result type of every cabinet query that can match
/// more than one folder, and keeps the traversal's discovery order.
pub struct Folders(Vec<FolderHandle>);

impl From<Vec<FolderHandle>> for Folders {
    /// Create a `Folders` collection from a vector of folder handles.
    ///
    /// This conversion allows easy creation of a `Folders` instance from
    /// any vector of handles, typically used when a cabinet traversal
    /// returns its matches.
    ///
    /// # Arguments
    ///
    /// * `folders` - A vector of folder handles
    ///
    /// # Returns
    ///
    /// A new `Folders` collection containing the provided handles.
    fn from(folders: Vec<FolderHandle>) -> Self {
        Self(folders)
    }
}

impl IntoIterator for Folders {
    type Item = FolderHandle;
    type IntoIter = std::vec::IntoIter<FolderHandle>;

    /// Iterate over the collection with ownership transfer.
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Folders {
    type Item = &'a FolderHandle;
    type IntoIter = std::slice::Iter<'a, FolderHandle>;

    /// Iterate over references to the folders in discovery order.
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Folders {
    /// Get the number of folders in the collection.
    ///
    /// # Returns
    ///
    /// The number of folders contained in this collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the collection is empty.
    ///
    /// # Returns
    ///
    /// `true` if the collection contains no folders, `false` otherwise.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a slice of the underlying folder handles.
    ///
    /// Useful for inspecting the result without consuming the collection,
    /// for example to build JSON output.
    #[must_use]
    pub fn as_slice(&self) -> &[FolderHandle] {
        &self.0
    }

    /// Iterate over references to the folders in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, FolderHandle> {
        self.0.iter()
    }

    /// Calculate the total declared size of all folders in the collection.
    ///
    /// This method sums the parsed byte counts of every folder whose size
    /// declaration parses. Folders with unparseable declarations contribute
    /// nothing to the total.
    ///
    /// # Returns
    ///
    /// The total declared size in bytes.
    #[must_use]
    pub fn total_declared_bytes(&self) -> u64 {
        self.0.iter().filter_map(|folder| folder.size_bytes()).sum()
    }

    /// Print a detailed summary of the folders grouped by size tier.
    ///
    /// This method analyzes the collection and prints statistics including:
    /// - Number and total declared size of small folders
    /// - Number and total declared size of medium folders
    /// - Number and total declared size of large folders
    /// - Number of folders whose size declaration does not parse
    /// - Total declared space across the whole collection
    ///
    /// The output is formatted with colors and emoji icons for better
    /// readability, with sizes rendered in binary units (KiB, MiB, GiB).
    ///
    /// # Output Format
    ///
    /// ```text
    ///   🟢 2 SMALL folders (51 MiB)
    ///   🟡 2 MEDIUM folders (1.71 GiB)
    ///   🔴 1 LARGE folder (2 GiB)
    ///   ⚪ 1 folder without a parseable size
    ///   💾 Total declared space: 3.76 GiB
    /// ```
    pub fn print_summary(&self) {
        let tier_entries: &[(SizeTier, &str)] = &[
            (SizeTier::Small, "🟢"),
            (SizeTier::Medium, "🟡"),
            (SizeTier::Large, "🔴"),
        ];

        for (tier, icon) in tier_entries {
            let (count, bytes) = self.0.iter().fold((0usize, 0u64), |(c, b), folder| {
                if folder.tier() == Some(*tier) {
                    (c + 1, b + folder.size_bytes().unwrap_or(0))
                } else {
                    (c, b)
                }
            });

            if count > 0 {
                let noun = if count == 1 { "folder" } else { "folders" };
                println!(
                    "  {icon} {} {tier} {noun} ({})",
                    count.to_string().bright_white(),
                    format_size(bytes, BINARY).bright_white()
                );
            }
        }

        let unclassified = self.0.iter().filter(|f| f.tier().is_none()).count();
        if unclassified > 0 {
            let noun = if unclassified == 1 { "folder" } else { "folders" };
            println!(
                "  ⚪ {} {noun} without a parseable size",
                unclassified.to_string().bright_white()
            );
        }

        println!(
            "  💾 Total declared space: {}",
            format_size(self.total_declared_bytes(), BINARY)
                .bright_green()
                .bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::Folder;

    fn sample_folders() -> Folders {
        Folders::from(vec![
            Folder::leaf("A-small", "50MB"),
            Folder::leaf("B-medium", "850MB"),
            Folder::leaf("C-large", "2GB"),
            Folder::leaf("Xbad", "oops"),
        ])
    }

    #[test]
    fn test_len_and_is_empty() {
        let folders = sample_folders();
        assert_eq!(folders.len(), 4);
        assert!(!folders.is_empty());

        let empty = Folders::from(vec![]);
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_iteration_preserves_order() {
        let folders = sample_folders();

        let names: Vec<_> = folders.iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, ["A-small", "B-medium", "C-large", "Xbad"]);
    }

    #[test]
    fn test_total_declared_bytes_skips_unparseable() {
        let folders = sample_folders();

        let expected = (50 + 850) * 1024 * 1024 + 2 * 1024 * 1024 * 1024;
        assert_eq!(folders.total_declared_bytes(), expected);
    }

    #[test]
    fn test_total_declared_bytes_empty() {
        assert_eq!(Folders::from(vec![]).total_declared_bytes(), 0);
    }
}
