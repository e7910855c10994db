//! Display filtering for a forest.
//!
//! A node matches a term when its own name contains it case-insensitively; a
//! directory stays visible while any descendant matches. The filtered view is
//! a pruned clone; the underlying forest is never touched.

use crate::tree::node::{DirectoryNode, FileTreeNode, Forest};

/// True when the node's name, or any descendant's name, contains `term`
/// (case-insensitive). The empty term matches everything.
pub fn node_matches(node: &FileTreeNode, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    matches_inner(node, &term.to_lowercase())
}

fn matches_inner(node: &FileTreeNode, needle: &str) -> bool {
    if node.name().to_lowercase().contains(needle) {
        return true;
    }
    match node {
        FileTreeNode::Directory(dir) => {
            dir.children.iter().any(|child| matches_inner(child, needle))
        }
        FileTreeNode::File(_) => false,
    }
}

/// Filtered display view of a forest, preserving relative order.
///
/// Children that match only through their parent's name are still pruned,
/// the same way the explorer hides them while a search is active.
pub fn filter_forest(forest: &[FileTreeNode], term: &str) -> Forest {
    if term.is_empty() {
        return forest.to_vec();
    }
    let needle = term.to_lowercase();
    forest
        .iter()
        .filter(|node| matches_inner(node, &needle))
        .map(|node| prune(node, &needle))
        .collect()
}

fn prune(node: &FileTreeNode, needle: &str) -> FileTreeNode {
    match node {
        FileTreeNode::File(file) => FileTreeNode::File(file.clone()),
        FileTreeNode::Directory(dir) => FileTreeNode::Directory(DirectoryNode {
            name: dir.name.clone(),
            path: dir.path.clone(),
            children: dir
                .children
                .iter()
                .filter(|child| matches_inner(child, needle))
                .map(|child| prune(child, needle))
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::FlatListBuilder;
    use crate::tree::node::FilePayload;
    use std::sync::Arc;

    fn forest(paths: &[&str]) -> Forest {
        let mut builder = FlatListBuilder::new();
        for path in paths {
            builder.push(*path, FilePayload::Memory(Arc::new(Vec::new())));
        }
        builder.build()
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let forest = forest(&["Show/a.mp4", "b.mp4"]);
        assert_eq!(filter_forest(&forest, "").len(), 2);
    }

    #[test]
    fn test_directory_retained_when_descendant_matches() {
        let forest = forest(&["Show/Season 1/episode.mp4", "Other/clip.mp4"]);
        let filtered = filter_forest(&forest, "EPISODE");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name(), "Show");
        let FileTreeNode::Directory(show) = &filtered[0] else {
            panic!("expected directory");
        };
        assert_eq!(show.children.len(), 1);
    }

    #[test]
    fn test_non_matching_children_pruned_under_matching_parent() {
        let forest = forest(&["Season/episode.mp4", "Season/bloopers.mp4"]);
        let filtered = filter_forest(&forest, "season");

        // The directory matches by name, but a search still hides children
        // that don't match on their own.
        let FileTreeNode::Directory(season) = &filtered[0] else {
            panic!("expected directory");
        };
        assert!(season.children.is_empty());
    }

    #[test]
    fn test_no_match_yields_empty_view() {
        let forest = forest(&["Show/a.mp4"]);
        assert!(filter_forest(&forest, "zzz").is_empty());
        assert!(!node_matches(&forest[0], "zzz"));
    }
}
