//! File tree construction, normalization, and lookup.
//!
//! Two ingestion routes feed one forest type: the async directory-entry
//! walker ([`walker`]) preserves a hierarchical entry graph as given, and the
//! flat-list builder ([`builder`]) synthesizes the equivalent hierarchy from
//! slash-delimited relative paths. [`sort`] imposes the deterministic display
//! order and [`lookup`] resolves exact paths over a finished forest.

pub mod builder;
pub mod filter;
pub mod lookup;
pub mod node;
pub mod path;
pub mod sort;
pub mod walker;

pub use builder::{scan_directory, FlatFile, FlatListBuilder};
pub use filter::{filter_forest, node_matches};
pub use lookup::{find_file, find_node};
pub use node::{DirectoryNode, FileNode, FilePayload, FileTreeNode, Forest};
pub use sort::sort_forest;
pub use walker::{ingest_drop, walk_entry, EntryHandle, FsEntry, MemoryEntry, WalkerConfig};
