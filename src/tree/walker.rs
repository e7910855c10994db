//! Directory-Entry Walker
//!
//! Recursively traverses a hierarchical entry graph into a forest subtree,
//! preserving hierarchy as given. Sibling subtrees are resolved concurrently
//! and joined positionally, so completion order never affects final shape.
//!
//! The graph is abstracted behind [`EntryHandle`] so the same walk serves the
//! filesystem-backed source ([`FsEntry`]) and synthetic in-memory graphs
//! ([`MemoryEntry`]).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{join_all, BoxFuture};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::tree::node::{DirectoryNode, FileNode, FilePayload, FileTreeNode};

/// A hierarchical entry as reported by an ingestion source.
///
/// Directory reads and file resolutions are independent suspension points;
/// children are enumerated in platform order, never assumed sorted.
#[async_trait]
pub trait EntryHandle: Send + Sync {
    /// Final path segment.
    fn name(&self) -> String;

    /// `/`-joined path from the traversal root, no leading slash.
    fn full_path(&self) -> String;

    fn is_directory(&self) -> bool;

    /// Enumerate immediate children. Fails on non-directories.
    async fn read_children(&self) -> Result<Vec<Box<dyn EntryHandle>>, IngestError>;

    /// Resolve the payload behind a file entry. Fails on directories.
    async fn resolve_payload(&self) -> Result<FilePayload, IngestError>;
}

/// Walker tuning for filesystem-backed sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Descend into symlinked entries (default: skip them).
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Stop enumerating children below this depth; `None` is unbounded.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

/// Walk one entry into a subtree.
///
/// Unreadable children are omitted and their siblings keep going; only a
/// failure on the root entry itself fails the walk.
pub async fn walk_entry(entry: &dyn EntryHandle) -> Result<FileTreeNode, IngestError> {
    walk_inner(entry).await
}

fn walk_inner<'a>(
    entry: &'a dyn EntryHandle,
) -> BoxFuture<'a, Result<FileTreeNode, IngestError>> {
    Box::pin(async move {
        if entry.is_directory() {
            let children = entry.read_children().await?;
            let results = join_all(children.iter().map(|child| walk_inner(child.as_ref()))).await;

            let mut resolved = Vec::with_capacity(results.len());
            for (child, result) in children.iter().zip(results) {
                match result {
                    Ok(node) => resolved.push(node),
                    Err(error) => {
                        warn!(path = %child.full_path(), %error, "Omitting unreadable subtree");
                    }
                }
            }

            Ok(FileTreeNode::Directory(DirectoryNode {
                name: entry.name(),
                path: entry.full_path(),
                children: resolved,
            }))
        } else {
            let payload = entry.resolve_payload().await?;
            Ok(FileTreeNode::File(FileNode {
                name: entry.name(),
                path: entry.full_path(),
                payload,
            }))
        }
    })
}

/// Ingest a set of dropped items.
///
/// Only the first top-level directory is processed; additional directories
/// are silently ignored. Returns `Ok(None)` when no directory is present:
/// the drop is ignored, not an error.
pub async fn ingest_drop(
    items: &[Box<dyn EntryHandle>],
) -> Result<Option<FileTreeNode>, IngestError> {
    let Some(directory) = items.iter().find(|item| item.is_directory()) else {
        debug!("No directory among dropped items, ignoring drop");
        return Ok(None);
    };
    let tree = walk_entry(directory.as_ref()).await?;
    Ok(Some(tree))
}

/// Filesystem-backed entry, rooted at a selected directory.
pub struct FsEntry {
    abs: PathBuf,
    name: String,
    rel: String,
    is_dir: bool,
    depth: usize,
    config: Arc<WalkerConfig>,
}

impl FsEntry {
    /// Open a selection root. The root's own name becomes the first path
    /// segment of every node underneath it.
    pub async fn open(path: &Path, config: WalkerConfig) -> Result<Self, IngestError> {
        let abs = crate::tree::path::canonicalize_root(path)?;
        let metadata = tokio::fs::metadata(&abs).await?;
        let name = abs
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| abs.to_string_lossy().into_owned());
        Ok(Self {
            rel: name.clone(),
            name,
            is_dir: metadata.is_dir(),
            depth: 0,
            config: Arc::new(config),
            abs,
        })
    }
}

#[async_trait]
impl EntryHandle for FsEntry {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn full_path(&self) -> String {
        self.rel.clone()
    }

    fn is_directory(&self) -> bool {
        self.is_dir
    }

    async fn read_children(&self) -> Result<Vec<Box<dyn EntryHandle>>, IngestError> {
        if !self.is_dir {
            return Err(IngestError::NotADirectory(self.rel.clone()));
        }
        if let Some(max_depth) = self.config.max_depth {
            if self.depth >= max_depth {
                debug!(path = %self.rel, max_depth, "Depth cap reached, not descending");
                return Ok(Vec::new());
            }
        }

        let mut entries = tokio::fs::read_dir(&self.abs).await?;
        let mut children: Vec<Box<dyn EntryHandle>> = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(error) => {
                    warn!(path = %entry.path().display(), %error, "Skipping untyped entry");
                    continue;
                }
            };
            let is_dir = if file_type.is_symlink() {
                if !self.config.follow_symlinks {
                    continue;
                }
                tokio::fs::metadata(entry.path())
                    .await
                    .map(|metadata| metadata.is_dir())
                    .unwrap_or(false)
            } else {
                file_type.is_dir()
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            children.push(Box::new(FsEntry {
                abs: entry.path(),
                rel: format!("{}/{}", self.rel, name),
                name,
                is_dir,
                depth: self.depth + 1,
                config: Arc::clone(&self.config),
            }));
        }
        Ok(children)
    }

    async fn resolve_payload(&self) -> Result<FilePayload, IngestError> {
        if self.is_dir {
            return Err(IngestError::NotAFile(self.rel.clone()));
        }
        let metadata = tokio::fs::metadata(&self.abs).await?;
        Ok(FilePayload::Disk {
            path: self.abs.clone(),
            size: metadata.len(),
        })
    }
}

/// In-memory entry graph, for synthetic selections and tests.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    name: String,
    path: String,
    kind: MemoryKind,
}

#[derive(Debug, Clone)]
enum MemoryKind {
    File(Arc<Vec<u8>>),
    Directory(Vec<MemoryEntry>),
}

impl MemoryEntry {
    pub fn file(name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            path: name.to_string(),
            kind: MemoryKind::File(Arc::new(bytes.into())),
        }
    }

    pub fn dir(name: &str, children: Vec<MemoryEntry>) -> Self {
        let mut entry = Self {
            name: name.to_string(),
            path: name.to_string(),
            kind: MemoryKind::Directory(children),
        };
        entry.reroot_children();
        entry
    }

    fn reroot_children(&mut self) {
        let prefix = self.path.clone();
        if let MemoryKind::Directory(children) = &mut self.kind {
            for child in children {
                child.path = format!("{prefix}/{}", child.name);
                child.reroot_children();
            }
        }
    }
}

#[async_trait]
impl EntryHandle for MemoryEntry {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn full_path(&self) -> String {
        self.path.clone()
    }

    fn is_directory(&self) -> bool {
        matches!(self.kind, MemoryKind::Directory(_))
    }

    async fn read_children(&self) -> Result<Vec<Box<dyn EntryHandle>>, IngestError> {
        match &self.kind {
            MemoryKind::Directory(children) => Ok(children
                .iter()
                .map(|child| Box::new(child.clone()) as Box<dyn EntryHandle>)
                .collect()),
            MemoryKind::File(_) => Err(IngestError::NotADirectory(self.path.clone())),
        }
    }

    async fn resolve_payload(&self) -> Result<FilePayload, IngestError> {
        match &self.kind {
            MemoryKind::File(bytes) => Ok(FilePayload::Memory(Arc::clone(bytes))),
            MemoryKind::Directory(_) => Err(IngestError::NotAFile(self.path.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::lookup::find_node;

    struct FailingEntry;

    #[async_trait]
    impl EntryHandle for FailingEntry {
        fn name(&self) -> String {
            "broken".to_string()
        }

        fn full_path(&self) -> String {
            "broken".to_string()
        }

        fn is_directory(&self) -> bool {
            false
        }

        async fn read_children(&self) -> Result<Vec<Box<dyn EntryHandle>>, IngestError> {
            Err(IngestError::NotADirectory("broken".to_string()))
        }

        async fn resolve_payload(&self) -> Result<FilePayload, IngestError> {
            Err(IngestError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }
    }

    #[tokio::test]
    async fn test_walk_preserves_hierarchy_and_paths() {
        let root = MemoryEntry::dir(
            "Show",
            vec![
                MemoryEntry::dir(
                    "Season 1",
                    vec![
                        MemoryEntry::file("e1.mp4", b"v".to_vec()),
                        MemoryEntry::file("e1.vtt", b"c".to_vec()),
                    ],
                ),
                MemoryEntry::file("extra.mp4", b"v".to_vec()),
            ],
        );

        let tree = walk_entry(&root).await.unwrap();
        let forest = vec![tree];
        assert!(find_node(&forest, "Show").is_some());
        assert!(find_node(&forest, "Show/Season 1").is_some());
        assert!(find_node(&forest, "Show/Season 1/e1.mp4").is_some());
        assert!(find_node(&forest, "Show/extra.mp4").is_some());
        assert!(find_node(&forest, "Season 1/e1.mp4").is_none());
    }

    #[tokio::test]
    async fn test_empty_directory_yields_empty_children() {
        let tree = walk_entry(&MemoryEntry::dir("empty", Vec::new())).await.unwrap();
        let FileTreeNode::Directory(dir) = tree else {
            panic!("expected directory");
        };
        assert!(dir.children.is_empty());
    }

    struct DirWithBrokenChild;

    #[async_trait]
    impl EntryHandle for DirWithBrokenChild {
        fn name(&self) -> String {
            "Show".to_string()
        }

        fn full_path(&self) -> String {
            "Show".to_string()
        }

        fn is_directory(&self) -> bool {
            true
        }

        async fn read_children(&self) -> Result<Vec<Box<dyn EntryHandle>>, IngestError> {
            Ok(vec![
                Box::new(FailingEntry),
                Box::new(MemoryEntry::file("ok.mp4", b"v".to_vec())),
            ])
        }

        async fn resolve_payload(&self) -> Result<FilePayload, IngestError> {
            Err(IngestError::NotAFile("Show".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failing_child_is_omitted_and_siblings_survive() {
        let tree = walk_entry(&DirWithBrokenChild).await.unwrap();
        let FileTreeNode::Directory(dir) = tree else {
            panic!("expected directory");
        };
        assert_eq!(dir.children.len(), 1);
        assert_eq!(dir.children[0].name(), "ok.mp4");
    }

    #[tokio::test]
    async fn test_ingest_drop_takes_first_directory_only() {
        let items: Vec<Box<dyn EntryHandle>> = vec![
            Box::new(MemoryEntry::file("loose.mp4", b"v".to_vec())),
            Box::new(MemoryEntry::dir(
                "First",
                vec![MemoryEntry::file("a.mp4", b"v".to_vec())],
            )),
            Box::new(MemoryEntry::dir(
                "Second",
                vec![MemoryEntry::file("b.mp4", b"v".to_vec())],
            )),
        ];

        let tree = ingest_drop(&items).await.unwrap().unwrap();
        assert_eq!(tree.path(), "First");
    }

    #[tokio::test]
    async fn test_ingest_drop_without_directory_is_ignored() {
        let items: Vec<Box<dyn EntryHandle>> =
            vec![Box::new(MemoryEntry::file("loose.mp4", b"v".to_vec()))];
        assert!(ingest_drop(&items).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_entry_walks_disk_tree() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("Show");
        std::fs::create_dir_all(root.join("Season 1")).unwrap();
        std::fs::write(root.join("Season 1/e1.mp4"), b"v").unwrap();
        std::fs::write(root.join("Season 1/e1.vtt"), b"c").unwrap();
        std::fs::create_dir(root.join("Empty")).unwrap();

        let entry = FsEntry::open(&root, WalkerConfig::default()).await.unwrap();
        let tree = walk_entry(&entry).await.unwrap();
        let forest = vec![tree];

        assert!(find_node(&forest, "Show/Season 1/e1.mp4").is_some());
        assert!(find_node(&forest, "Show/Season 1/e1.vtt").is_some());
        let Some(FileTreeNode::Directory(empty)) = find_node(&forest, "Show/Empty") else {
            panic!("expected empty directory node");
        };
        assert!(empty.children.is_empty());
    }

    #[tokio::test]
    async fn test_fs_entry_depth_cap_stops_descent() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("Show");
        std::fs::create_dir_all(root.join("a/b")).unwrap();
        std::fs::write(root.join("a/b/deep.mp4"), b"v").unwrap();

        let config = WalkerConfig {
            follow_symlinks: false,
            max_depth: Some(1),
        };
        let entry = FsEntry::open(&root, config).await.unwrap();
        let tree = walk_entry(&entry).await.unwrap();
        let forest = vec![tree];

        assert!(find_node(&forest, "Show/a").is_some());
        assert!(find_node(&forest, "Show/a/b").is_none());
    }
}
