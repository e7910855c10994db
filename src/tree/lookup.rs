//! Node Lookup
//!
//! Pre-order depth-first search over a forest for an exact path. Linear in
//! forest size, which stays modest for a user-browsable folder.

use crate::tree::node::{FileNode, FileTreeNode};

/// Find the first node whose `path` exactly equals `path`.
///
/// Exact string equality: no normalization, no case folding, no
/// trailing-slash tolerance. `None` is a legitimate negative result.
pub fn find_node<'a>(nodes: &'a [FileTreeNode], path: &str) -> Option<&'a FileTreeNode> {
    for node in nodes {
        if node.path() == path {
            return Some(node);
        }
        if let FileTreeNode::Directory(dir) = node {
            if let Some(found) = find_node(&dir.children, path) {
                return Some(found);
            }
        }
    }
    None
}

/// [`find_node`] narrowed to file nodes; a directory at `path` is a miss.
pub fn find_file<'a>(nodes: &'a [FileTreeNode], path: &str) -> Option<&'a FileNode> {
    match find_node(nodes, path) {
        Some(FileTreeNode::File(file)) => Some(file),
        _ => None,
    }
}
