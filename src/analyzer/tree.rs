//! File Tree Builder
//!
//! Converts the flat repository listing into a nested tree. Directories
//! implied by a deep path but absent from the listing are synthesized on
//! demand and inserted into their own parent (recursively synthesizing
//! further ancestors), so the tree is well-formed even when the listing
//! names deep files without their containing directories.
//!
//! Processing follows input order and siblings keep insertion order;
//! nothing is sorted. Parent attachment is O(1) amortized through a
//! path-indexed slot map.

use std::collections::HashMap;

use crate::types::{EntryKind, FileEntry, TreeNode, parent_dir_of};

/// Build the nested tree for a flat listing, returning the top-level
/// roots in first-seen order.
pub fn build_file_tree(entries: &[FileEntry]) -> Vec<TreeNode> {
    let mut builder = TreeBuilder::default();
    for entry in entries {
        builder.insert(entry);
    }
    builder.finish()
}

/// Arena-backed construction state. Children are tracked as slot indices
/// until `finish` materializes the owned tree.
#[derive(Default)]
struct TreeBuilder {
    slots: Vec<TreeNode>,
    children: Vec<Vec<usize>>,
    index_by_path: HashMap<String, usize>,
    roots: Vec<usize>,
}

impl TreeBuilder {
    fn insert(&mut self, entry: &FileEntry) {
        if self.index_by_path.contains_key(&entry.path) {
            // Already present: either a duplicate listing entry or a
            // directory that was synthesized for an earlier deep path.
            // Synthesized directories are indistinguishable from explicit
            // ones, so there is nothing to update.
            return;
        }

        let slot = self.push(match entry.kind {
            EntryKind::File => TreeNode::file(&entry.path),
            EntryKind::Directory => TreeNode::directory(&entry.path),
        });
        self.index_by_path.insert(entry.path.clone(), slot);
        self.attach(&entry.path, slot);
    }

    /// Attach a slot under its parent directory, synthesizing the parent
    /// (and transitively its ancestors) when the listing has not named it.
    fn attach(&mut self, path: &str, slot: usize) {
        let parent_path = parent_dir_of(path);
        if parent_path.is_empty() {
            self.roots.push(slot);
        } else {
            let parent_slot = self.ensure_directory(parent_path);
            self.children[parent_slot].push(slot);
        }
    }

    fn ensure_directory(&mut self, path: &str) -> usize {
        if let Some(&slot) = self.index_by_path.get(path) {
            return slot;
        }
        let slot = self.push(TreeNode::directory(path));
        self.index_by_path.insert(path.to_string(), slot);
        self.attach(path, slot);
        slot
    }

    fn push(&mut self, node: TreeNode) -> usize {
        self.slots.push(node);
        self.children.push(Vec::new());
        self.slots.len() - 1
    }

    fn finish(mut self) -> Vec<TreeNode> {
        let roots = std::mem::take(&mut self.roots);
        roots.into_iter().map(|slot| self.materialize(slot)).collect()
    }

    fn materialize(&mut self, slot: usize) -> TreeNode {
        let child_slots = std::mem::take(&mut self.children[slot]);
        let mut node = std::mem::replace(&mut self.slots[slot], TreeNode::file(String::new()));
        node.children = child_slots
            .into_iter()
            .map(|child| self.materialize(child))
            .collect();
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn collect_paths(nodes: &[TreeNode], out: &mut Vec<String>) {
        for node in nodes {
            out.push(node.path.clone());
            collect_paths(&node.children, out);
        }
    }

    #[test]
    fn test_flat_listing() {
        let tree = build_file_tree(&[
            FileEntry::file("README.md"),
            FileEntry::file("main.py"),
        ]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].path, "README.md");
        assert_eq!(tree[1].path, "main.py");
    }

    #[test]
    fn test_explicit_directories() {
        let tree = build_file_tree(&[
            FileEntry::directory("src"),
            FileEntry::file("src/main.rs"),
        ]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].path, "src");
        assert_eq!(tree[0].kind, EntryKind::Directory);
        assert_eq!(tree[0].children[0].path, "src/main.rs");
    }

    #[test]
    fn test_synthesized_directory_chain() {
        // only the deep file is listed; a and a/b must be synthesized
        let tree = build_file_tree(&[FileEntry::file("a/b/c.txt")]);
        assert_eq!(tree.len(), 1);
        let a = &tree[0];
        assert_eq!(a.path, "a");
        assert_eq!(a.kind, EntryKind::Directory);
        let b = &a.children[0];
        assert_eq!(b.path, "a/b");
        assert_eq!(b.children[0].path, "a/b/c.txt");
        assert_eq!(b.children[0].kind, EntryKind::File);
    }

    #[test]
    fn test_explicit_directory_after_synthesis_is_reused() {
        let tree = build_file_tree(&[
            FileEntry::file("a/b/c.txt"),
            FileEntry::directory("a/b"),
            FileEntry::file("a/b/d.txt"),
        ]);
        let mut paths = Vec::new();
        collect_paths(&tree, &mut paths);
        // a/b appears once and holds both files
        assert_eq!(paths.iter().filter(|p| *p == "a/b").count(), 1);
        let b = &tree[0].children[0];
        assert_eq!(b.children.len(), 2);
        assert_eq!(b.children[0].path, "a/b/c.txt");
        assert_eq!(b.children[1].path, "a/b/d.txt");
    }

    #[test]
    fn test_sibling_order_is_insertion_order() {
        let tree = build_file_tree(&[
            FileEntry::file("src/zebra.rs"),
            FileEntry::file("src/alpha.rs"),
        ]);
        let src = &tree[0];
        assert_eq!(src.children[0].path, "src/zebra.rs");
        assert_eq!(src.children[1].path, "src/alpha.rs");
    }

    #[test]
    fn test_every_entry_appears_exactly_once() {
        let entries = vec![
            FileEntry::directory("src"),
            FileEntry::file("src/main.rs"),
            FileEntry::file("src/lib/util.rs"),
            FileEntry::file("docs/guide/intro.md"),
            FileEntry::file("Cargo.toml"),
        ];
        let tree = build_file_tree(&entries);
        let mut paths = Vec::new();
        collect_paths(&tree, &mut paths);
        let unique: HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len(), "duplicate node emitted");
        for entry in &entries {
            assert!(paths.contains(&entry.path), "missing {}", entry.path);
        }
    }

    proptest! {
        #[test]
        fn prop_all_paths_reachable_once(
            raw in proptest::collection::vec(r"([a-z]{1,3}/){0,3}[a-z]{1,3}\.[a-z]{2}", 1..20)
        ) {
            let unique: Vec<String> = {
                let mut seen = HashSet::new();
                raw.into_iter().filter(|p| seen.insert(p.clone())).collect()
            };
            let entries: Vec<FileEntry> =
                unique.iter().map(FileEntry::file).collect();
            let tree = build_file_tree(&entries);

            let mut paths = Vec::new();
            collect_paths(&tree, &mut paths);
            let path_set: HashSet<_> = paths.iter().cloned().collect();
            prop_assert_eq!(path_set.len(), paths.len());
            for entry in &entries {
                prop_assert!(path_set.contains(&entry.path));
            }
        }
    }
}
