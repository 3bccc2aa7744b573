//! Cabinet construction and traversal queries.
//!
//! This module provides the [`Cabinet`] struct, the entry point for every
//! folder query. A cabinet holds the top-level folders of a folder graph
//! and answers name lookups, size-tier listings, and distinct-folder counts
//! by running a single deduplicated breadth-first traversal over the graph.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::folder::{Folder, FolderHandle, Folders};
use crate::utils::SizeTier;

/// An immutable collection of top-level folders with query operations.
///
/// A cabinet is constructed once from its top-level folders and never
/// changes afterwards. Because groups hold shared handles, the reachable
/// graph may contain the same folder instance under several parents; every
/// query visits each instance exactly once.
///
/// All queries are synchronous and run on the calling thread.
#[derive(Debug, Default)]
pub struct Cabinet {
    /// Top-level folders in declared order
    top_level: Vec<FolderHandle>,
}

impl Cabinet {
    /// Create a cabinet from its top-level folders.
    ///
    /// The cabinet takes ownership of the list; the declared order is
    /// preserved and determines traversal order. An empty list is valid
    /// and produces a cabinet for which every query returns an empty
    /// result.
    ///
    /// # Arguments
    ///
    /// * `top_level` - Top-level folders in declared order
    ///
    /// # Examples
    ///
    /// ```
    /// # use file_cabinet::cabinet::Cabinet;
    /// # use file_cabinet::folder::Folder;
    /// let g1 = Folder::group("G1", "900MB", vec![Folder::leaf("A", "50MB")]);
    /// let cabinet = Cabinet::new(vec![g1, Folder::leaf("C", "2GB")]);
    /// assert_eq!(cabinet.count(), 3);
    /// ```
    #[must_use]
    pub const fn new(top_level: Vec<FolderHandle>) -> Self {
        Self { top_level }
    }

    /// Top-level folders in declared order.
    #[must_use]
    pub fn top_level(&self) -> &[FolderHandle] {
        &self.top_level
    }

    /// Find the first folder with the given name.
    ///
    /// The search runs breadth-first from the top-level folders and stops
    /// at the first folder whose name equals `name` exactly (comparison is
    /// case-sensitive). When several folders share the name, the one the
    /// traversal discovers first wins: all folders at one nesting level are
    /// examined before any of their children.
    ///
    /// # Arguments
    ///
    /// * `name` - Exact folder name to look for
    ///
    /// # Returns
    ///
    /// - `Some(FolderHandle)` - The first matching folder in traversal order
    /// - `None` - If no reachable folder has that name
    #[must_use]
    pub fn find_folder_by_name(&self, name: &str) -> Option<FolderHandle> {
        self.bfs_filter(|folder| folder.name() == name, true)
            .into_iter()
            .next()
    }

    /// Find all folders in the size tier named by `label`.
    ///
    /// The label is resolved with [`SizeTier::from_label`], so `"M"`,
    /// `"medium"`, and `" MEDIUM "` all name the same tier. A label that
    /// names no tier yields an empty result rather than an error, as does
    /// a cabinet with no folders in the tier.
    ///
    /// # Arguments
    ///
    /// * `label` - Size tier label ("S"/"M"/"L" or the full tier name)
    ///
    /// # Returns
    ///
    /// The matching folders in traversal discovery order. Folders whose
    /// size declaration does not parse belong to no tier and never appear.
    #[must_use]
    pub fn find_folders_by_size(&self, label: &str) -> Folders {
        SizeTier::from_label(label)
            .map_or_else(|| Folders::from(Vec::new()), |tier| self.find_folders_by_tier(tier))
    }

    /// Find all folders classified into the given size tier.
    ///
    /// This is the typed variant of [`Cabinet::find_folders_by_size`] for
    /// callers that already hold a [`SizeTier`].
    ///
    /// # Returns
    ///
    /// The matching folders in traversal discovery order.
    #[must_use]
    pub fn find_folders_by_tier(&self, tier: SizeTier) -> Folders {
        self.bfs_filter(|folder| folder.tier() == Some(tier), false)
            .into()
    }

    /// Collect every distinct folder reachable from the top level.
    ///
    /// # Returns
    ///
    /// All folders in traversal discovery order, each instance exactly
    /// once no matter how many parents it has.
    #[must_use]
    pub fn all_folders(&self) -> Folders {
        self.bfs_filter(|_| true, false).into()
    }

    /// Count the distinct folders reachable from the top level.
    ///
    /// A folder shared by several groups is counted once; two folders that
    /// merely have equal names and sizes are counted separately.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bfs_filter(|_| true, false).len()
    }

    /// Breadth-first traversal over the folder graph with deduplication.
    ///
    /// The queue starts with the top-level folders in declared order. Each
    /// dequeued folder is skipped if already visited, otherwise tested
    /// against the predicate widthwise before its children (in declared
    /// order) join the back of the queue. With `stop_on_first` the
    /// traversal ends at the first match.
    fn bfs_filter<P>(&self, predicate: P, stop_on_first: bool) -> Vec<FolderHandle>
    where
        P: Fn(&Folder) -> bool,
    {
        // Visited tracking is by instance identity, not value equality.
        let mut visited: HashSet<*const Folder> = HashSet::new();
        let mut queue: VecDeque<FolderHandle> = self.top_level.iter().map(Arc::clone).collect();
        let mut matches = Vec::new();

        while let Some(folder) = queue.pop_front() {
            if !visited.insert(Arc::as_ptr(&folder)) {
                continue;
            }

            if predicate(&folder) {
                matches.push(Arc::clone(&folder));
                if stop_on_first {
                    break;
                }
            }

            if let Some(children) = folder.children() {
                queue.extend(children.iter().map(Arc::clone));
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::Folder;

    /// The flat sample graph: one group of two, two loose folders, one of
    /// them with a size declaration that does not parse.
    struct SampleGraph {
        cabinet: Cabinet,
        a: FolderHandle,
        b: FolderHandle,
        c: FolderHandle,
        g1: FolderHandle,
        xbad: FolderHandle,
    }

    fn sample_graph() -> SampleGraph {
        let a = Folder::leaf("A-small", "50MB");
        let b = Folder::leaf("B-medium", "850MB");
        let c = Folder::leaf("C-large", "2GB");
        let xbad = Folder::leaf("Xbad", "oops");
        let g1 = Folder::group("G1", "900MB", vec![Arc::clone(&a), Arc::clone(&b)]);

        let cabinet = Cabinet::new(vec![
            Arc::clone(&g1),
            Arc::clone(&c),
            Arc::clone(&xbad),
        ]);

        SampleGraph {
            cabinet,
            a,
            b,
            c,
            g1,
            xbad,
        }
    }

    /// A graph where two groups share children: G1 = [A, B], G2 = [A, B, D].
    struct SharedGraph {
        cabinet: Cabinet,
        a: FolderHandle,
        d: FolderHandle,
    }

    fn shared_graph() -> SharedGraph {
        let a = Folder::leaf("A-small", "50MB");
        let b = Folder::leaf("B-medium", "850MB");
        let c = Folder::leaf("C-large", "2GB");
        let d = Folder::leaf("D-small", "10MB");
        let g1 = Folder::group("G1", "900MB", vec![Arc::clone(&a), Arc::clone(&b)]);
        let g2 = Folder::group(
            "G2",
            "910MB",
            vec![Arc::clone(&a), Arc::clone(&b), Arc::clone(&d)],
        );

        let cabinet = Cabinet::new(vec![g1, g2, c]);

        SharedGraph { cabinet, a, d }
    }

    #[test]
    fn test_find_folder_by_name_top_level() {
        let graph = sample_graph();

        let found = graph.cabinet.find_folder_by_name("C-large").unwrap();
        assert!(Arc::ptr_eq(&found, &graph.c));
    }

    #[test]
    fn test_find_folder_by_name_nested() {
        let graph = sample_graph();

        let found = graph.cabinet.find_folder_by_name("B-medium").unwrap();
        assert!(Arc::ptr_eq(&found, &graph.b));
    }

    #[test]
    fn test_find_folder_by_name_missing() {
        let graph = sample_graph();

        assert!(graph.cabinet.find_folder_by_name("nope").is_none());
    }

    #[test]
    fn test_find_folder_by_name_is_case_sensitive() {
        let graph = sample_graph();

        assert!(graph.cabinet.find_folder_by_name("a-small").is_none());
        assert!(graph.cabinet.find_folder_by_name("A-SMALL").is_none());
        assert!(graph.cabinet.find_folder_by_name("A-small").is_some());
    }

    #[test]
    fn test_find_folder_by_name_prefers_shallower_match() {
        // "dup" exists both as a child of the first top-level group and as
        // a later top-level folder. Level order examines all top-level
        // folders before any child, so the top-level one wins.
        let nested_dup = Folder::leaf("dup", "1MB");
        let group = Folder::group("G", "1MB", vec![Arc::clone(&nested_dup)]);
        let top_dup = Folder::leaf("dup", "2MB");
        let cabinet = Cabinet::new(vec![group, Arc::clone(&top_dup)]);

        let found = cabinet.find_folder_by_name("dup").unwrap();
        assert!(Arc::ptr_eq(&found, &top_dup));
    }

    #[test]
    fn test_find_folder_by_name_first_of_same_level() {
        let first = Folder::leaf("dup", "1MB");
        let second = Folder::leaf("dup", "2MB");
        let cabinet = Cabinet::new(vec![Arc::clone(&first), Arc::clone(&second)]);

        let found = cabinet.find_folder_by_name("dup").unwrap();
        assert!(Arc::ptr_eq(&found, &first));
    }

    #[test]
    fn test_find_folders_by_size_small() {
        let graph = sample_graph();

        let small = graph.cabinet.find_folders_by_size("S");
        assert_eq!(small.len(), 1);
        assert!(Arc::ptr_eq(&small.as_slice()[0], &graph.a));
    }

    #[test]
    fn test_find_folders_by_size_medium_in_discovery_order() {
        let graph = sample_graph();

        // G1 (900MB) is discovered at the top level before B-medium, which
        // only enters the queue as a child of G1.
        let medium = graph.cabinet.find_folders_by_size("M");
        let names: Vec<_> = medium.iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, ["G1", "B-medium"]);
    }

    #[test]
    fn test_find_folders_by_size_large() {
        let graph = sample_graph();

        let large = graph.cabinet.find_folders_by_size("L");
        assert_eq!(large.len(), 1);
        assert!(Arc::ptr_eq(&large.as_slice()[0], &graph.c));
    }

    #[test]
    fn test_find_folders_by_size_accepts_label_variants() {
        let graph = sample_graph();

        assert_eq!(graph.cabinet.find_folders_by_size("small").len(), 1);
        assert_eq!(graph.cabinet.find_folders_by_size("MEDIUM").len(), 2);
        assert_eq!(graph.cabinet.find_folders_by_size(" l ").len(), 1);
    }

    #[test]
    fn test_find_folders_by_size_unknown_label_is_empty() {
        let graph = sample_graph();

        assert!(graph.cabinet.find_folders_by_size("HUGE").is_empty());
        assert!(graph.cabinet.find_folders_by_size("").is_empty());
        assert!(graph.cabinet.find_folders_by_size("   ").is_empty());
    }

    #[test]
    fn test_unparseable_sizes_match_no_tier() {
        let graph = sample_graph();

        for label in ["S", "M", "L"] {
            let matches = graph.cabinet.find_folders_by_size(label);
            assert!(
                !matches.iter().any(|f| Arc::ptr_eq(f, &graph.xbad)),
                "folder with an unparseable size appeared in tier {label}"
            );
        }

        // Xbad is still reachable and counted, it just has no tier.
        assert!(graph.cabinet.find_folder_by_name("Xbad").is_some());
        assert_eq!(graph.cabinet.count(), 5);
    }

    #[test]
    fn test_count_counts_distinct_instances() {
        let graph = sample_graph();
        assert_eq!(graph.cabinet.count(), 5);

        let shared = shared_graph();
        assert_eq!(shared.cabinet.count(), 6);
    }

    #[test]
    fn test_shared_children_appear_once_in_tier_results() {
        let shared = shared_graph();

        // A-small is a child of both G1 and G2 but is one instance.
        let small = shared.cabinet.find_folders_by_size("S");
        let a_hits = small
            .iter()
            .filter(|f| Arc::ptr_eq(f, &shared.a))
            .count();
        assert_eq!(a_hits, 1);
        assert_eq!(small.len(), 2);
        assert!(small.iter().any(|f| Arc::ptr_eq(f, &shared.d)));
    }

    #[test]
    fn test_duplicate_top_level_handle_counted_once() {
        let folder = Folder::leaf("solo", "1MB");
        let cabinet = Cabinet::new(vec![Arc::clone(&folder), Arc::clone(&folder)]);

        assert_eq!(cabinet.count(), 1);
        assert_eq!(cabinet.find_folders_by_size("S").len(), 1);
    }

    #[test]
    fn test_diamond_visited_once() {
        let shared = Folder::leaf("bottom", "10MB");
        let left = Folder::group("left", "10MB", vec![Arc::clone(&shared)]);
        let right = Folder::group("right", "10MB", vec![Arc::clone(&shared)]);
        let root = Folder::group("root", "20MB", vec![left, right]);
        let cabinet = Cabinet::new(vec![root]);

        assert_eq!(cabinet.count(), 4);

        let small = cabinet.find_folders_by_size("S");
        let bottom_hits = small
            .iter()
            .filter(|f| Arc::ptr_eq(f, &shared))
            .count();
        assert_eq!(bottom_hits, 1);
    }

    #[test]
    fn test_empty_cabinet() {
        let cabinet = Cabinet::default();

        assert_eq!(cabinet.count(), 0);
        assert!(cabinet.find_folder_by_name("anything").is_none());
        assert!(cabinet.find_folders_by_size("M").is_empty());
        assert!(cabinet.all_folders().is_empty());
    }

    #[test]
    fn test_all_folders_discovery_order() {
        let graph = sample_graph();

        let names: Vec<_> = graph
            .cabinet
            .all_folders()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(names, ["G1", "C-large", "Xbad", "A-small", "B-medium"]);
    }

    #[test]
    fn test_all_folders_shared_graph_order() {
        let shared = shared_graph();

        let names: Vec<_> = shared
            .cabinet
            .all_folders()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        // G2's repeats of A and B are skipped; D still follows them.
        assert_eq!(
            names,
            ["G1", "G2", "C-large", "A-small", "B-medium", "D-small"]
        );
    }

    #[test]
    fn test_equal_looking_folders_counted_separately() {
        let first = Folder::leaf("twin", "5MB");
        let second = Folder::leaf("twin", "5MB");
        let cabinet = Cabinet::new(vec![first, second]);

        assert_eq!(cabinet.count(), 2);
        assert_eq!(cabinet.find_folders_by_size("S").len(), 2);
    }
}
