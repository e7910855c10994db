//! Flat-List Tree Builder
//!
//! Synthesizes a hierarchical forest from a flat, ordered collection of files
//! carrying slash-delimited relative paths, the shape a directory-input
//! selection produces. Folder nodes are created on demand as path prefixes
//! are first seen; files land in input order.

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::IngestError;
use crate::tree::node::{DirectoryNode, FileNode, FilePayload, FileTreeNode, Forest};

/// One file of a flat selection: a relative path plus its payload.
#[derive(Debug, Clone)]
pub struct FlatFile {
    /// Slash-delimited path relative to the selection root, including the
    /// selected folder's own name as the first segment.
    pub relative_path: String,
    pub payload: FilePayload,
}

/// Builder accumulating a flat selection into a forest.
///
/// Files are folded in input order. Directory segments match existing
/// directory nodes by name; a file node with the same name never satisfies a
/// directory segment. Two files with an identical full path are both
/// retained; duplicate detection is out of scope.
#[derive(Debug, Default)]
pub struct FlatListBuilder {
    files: Vec<FlatFile>,
}

impl FlatListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files(files: Vec<FlatFile>) -> Self {
        Self { files }
    }

    pub fn push(&mut self, relative_path: impl Into<String>, payload: FilePayload) {
        self.files.push(FlatFile {
            relative_path: relative_path.into(),
            payload,
        });
    }

    /// Fold every pushed file into a forest. The result is unsorted; sibling
    /// order reflects input order until normalization.
    pub fn build(self) -> Forest {
        let mut roots: Forest = Vec::new();

        for file in self.files {
            let segments: Vec<&str> = file
                .relative_path
                .split('/')
                .filter(|s| !s.is_empty())
                .collect();
            let Some((leaf, parents)) = segments.split_last() else {
                warn!(path = %file.relative_path, "Skipping file with empty relative path");
                continue;
            };

            let mut level = &mut roots;
            let mut prefix = String::new();
            for segment in parents {
                if !prefix.is_empty() {
                    prefix.push('/');
                }
                prefix.push_str(segment);

                let position = level.iter().position(
                    |node| matches!(node, FileTreeNode::Directory(dir) if dir.name == *segment),
                );
                let index = match position {
                    Some(index) => index,
                    None => {
                        level.push(FileTreeNode::Directory(DirectoryNode {
                            name: segment.to_string(),
                            path: prefix.clone(),
                            children: Vec::new(),
                        }));
                        level.len() - 1
                    }
                };
                level = match &mut level[index] {
                    FileTreeNode::Directory(dir) => &mut dir.children,
                    // The position above only matches directory variants.
                    FileTreeNode::File(_) => unreachable!("directory segment matched a file node"),
                };
            }

            level.push(FileTreeNode::File(FileNode {
                name: leaf.to_string(),
                path: file.relative_path.clone(),
                payload: file.payload,
            }));
        }

        roots
    }
}

/// Scan a directory on disk into the flat selection shape.
///
/// Yields files only, in platform enumeration order, with relative paths
/// rooted at the selected folder's name. Empty directories do not appear,
/// matching what a directory-input selection reports. Unreadable entries are
/// skipped and logged; the scan itself continues.
pub fn scan_directory(root: &Path) -> Result<Vec<FlatFile>, IngestError> {
    let root = crate::tree::path::canonicalize_root(root)?;
    if !root.is_dir() {
        return Err(IngestError::NotADirectory(root.display().to_string()));
    }
    let base = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "Skipping unreadable entry during scan");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(error) => {
                warn!(path = %entry.path().display(), %error, "Skipping file without metadata");
                continue;
            }
        };
        let Ok(relative) = entry.path().strip_prefix(&root) else {
            continue;
        };
        let mut segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if let Some(base) = &base {
            segments.insert(0, base.clone());
        }

        files.push(FlatFile {
            relative_path: segments.join("/"),
            payload: FilePayload::Disk {
                path: entry.into_path(),
                size,
            },
        });
    }

    debug!(count = files.len(), root = %root.display(), "Scanned directory into flat list");
    Ok(files)
}
