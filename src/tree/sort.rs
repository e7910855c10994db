//! Tree Normalizer
//!
//! Imposes the deterministic display order on a forest: directories before
//! files at every level, then ascending lexicographic order on a collation
//! key within each kind. Applied recursively; each level sorts independently.

use unicode_normalization::UnicodeNormalization;

use crate::tree::node::FileTreeNode;

/// Collation key: NFC-normalized, lowercased name.
///
/// Filesystems report names in mixed normalization forms (macOS decomposes);
/// folding to NFC keeps ordering identical for identical-looking names.
fn collation_key(name: &str) -> String {
    name.nfc().flat_map(char::to_lowercase).collect()
}

/// Sort siblings in place at every level of the forest.
///
/// The sort is total: kind first, collation key second, raw name third, and
/// stable for fully equal keys (original relative order survives).
/// Idempotent: normalizing a normalized forest changes nothing.
pub fn sort_forest(nodes: &mut [FileTreeNode]) {
    nodes.sort_by_cached_key(|node| {
        (
            node.is_file(),
            collation_key(node.name()),
            node.name().to_string(),
        )
    });
    for node in nodes.iter_mut() {
        if let FileTreeNode::Directory(dir) = node {
            sort_forest(&mut dir.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::FlatListBuilder;
    use crate::tree::node::{FilePayload, Forest};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn build_sorted(paths: &[&str]) -> Forest {
        let mut builder = FlatListBuilder::new();
        for path in paths {
            builder.push(*path, FilePayload::Memory(Arc::new(Vec::new())));
        }
        let mut forest = builder.build();
        sort_forest(&mut forest);
        forest
    }

    fn names(nodes: &[FileTreeNode]) -> Vec<&str> {
        nodes.iter().map(FileTreeNode::name).collect()
    }

    #[test]
    fn test_directories_precede_files() {
        let forest = build_sorted(&["b.mp4", "a/x.mp4", "c/y.mp4", "A.mp4"]);
        assert_eq!(names(&forest), vec!["a", "c", "A.mp4", "b.mp4"]);
    }

    #[test]
    fn test_name_order_ignores_case() {
        let forest = build_sorted(&["Bravo.mp4", "alpha.mp4", "Charlie.mp4"]);
        assert_eq!(names(&forest), vec!["alpha.mp4", "Bravo.mp4", "Charlie.mp4"]);
    }

    #[test]
    fn test_sort_recurses_into_children() {
        let forest = build_sorted(&["Show/z.mp4", "Show/inner/x.mp4", "Show/a.vtt"]);
        let FileTreeNode::Directory(show) = &forest[0] else {
            panic!("expected directory root");
        };
        assert_eq!(names(&show.children), vec!["inner", "a.vtt", "z.mp4"]);
    }

    #[test]
    fn test_idempotent() {
        let mut forest = build_sorted(&["b/x.mp4", "a/y.mp4", "c.mp4", "a/b.vtt"]);
        let before = format!("{forest:?}");
        sort_forest(&mut forest);
        assert_eq!(before, format!("{forest:?}"));
    }

    fn assert_level_order(nodes: &[FileTreeNode]) {
        let first_file = nodes.iter().position(FileTreeNode::is_file);
        if let Some(first_file) = first_file {
            assert!(
                nodes[first_file..].iter().all(FileTreeNode::is_file),
                "directory found after a file"
            );
        }
        for pair in nodes.windows(2) {
            if pair[0].is_file() == pair[1].is_file() {
                assert!(collation_key(pair[0].name()) <= collation_key(pair[1].name()));
            }
        }
        for node in nodes {
            if let FileTreeNode::Directory(dir) = node {
                assert_level_order(&dir.children);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_every_level_is_ordered(
            paths in proptest::collection::vec(
                proptest::collection::vec("[a-cA-C][a-c0-9]{0,2}", 1..4).prop_map(|s| s.join("/")),
                1..20,
            )
        ) {
            let mut builder = FlatListBuilder::new();
            for path in &paths {
                builder.push(path.clone(), FilePayload::Memory(Arc::new(Vec::new())));
            }
            let mut forest = builder.build();
            sort_forest(&mut forest);
            assert_level_order(&forest);
        }
    }
}
