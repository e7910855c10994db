//! File tree node types

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::IngestError;

/// Opaque reference to a file's backing bytes.
///
/// Content is not read at ingestion time; a payload stays a cheap reference
/// until the playback surface resolves a handle against it.
#[derive(Debug, Clone)]
pub enum FilePayload {
    /// File on the local filesystem.
    Disk { path: PathBuf, size: u64 },
    /// In-memory bytes, for synthetic entry graphs.
    Memory(Arc<Vec<u8>>),
}

impl FilePayload {
    /// Size in bytes as reported at ingestion time.
    pub fn size(&self) -> u64 {
        match self {
            FilePayload::Disk { size, .. } => *size,
            FilePayload::Memory(bytes) => bytes.len() as u64,
        }
    }

    /// Read the full backing bytes.
    pub fn read_bytes(&self) -> Result<Vec<u8>, IngestError> {
        match self {
            FilePayload::Disk { path, .. } => Ok(std::fs::read(path)?),
            FilePayload::Memory(bytes) => Ok(bytes.as_ref().clone()),
        }
    }
}

/// File node representation
#[derive(Debug, Clone)]
pub struct FileNode {
    /// Display label, the final path segment.
    pub name: String,
    /// Canonical `/`-joined path from the traversal root.
    pub path: String,
    /// Reference to the underlying file payload.
    pub payload: FilePayload,
}

/// Directory node representation
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    /// Display label, the final path segment.
    pub name: String,
    /// Canonical `/`-joined path from the traversal root.
    pub path: String,
    /// Child nodes, in ingestion order until normalized.
    pub children: Vec<FileTreeNode>,
}

/// Tree node variant: exactly one of payload or children exists, enforced by
/// the variant itself.
#[derive(Debug, Clone)]
pub enum FileTreeNode {
    File(FileNode),
    Directory(DirectoryNode),
}

/// Forest: ordered sequence of root nodes.
///
/// Multi-file selections produce several roots; a dropped directory produces
/// a single root.
pub type Forest = Vec<FileTreeNode>;

impl FileTreeNode {
    pub fn name(&self) -> &str {
        match self {
            FileTreeNode::File(file) => &file.name,
            FileTreeNode::Directory(dir) => &dir.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            FileTreeNode::File(file) => &file.path,
            FileTreeNode::Directory(dir) => &dir.path,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, FileTreeNode::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, FileTreeNode::Directory(_))
    }

    /// Total node count of this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        match self {
            FileTreeNode::File(_) => 1,
            FileTreeNode::Directory(dir) => {
                1 + dir.children.iter().map(FileTreeNode::node_count).sum::<usize>()
            }
        }
    }
}
