//! Viewer Session
//!
//! Top-level controller owning the forest, the playback handle table, and the
//! selection generation counter. All mutation funnels through the session:
//! ingestion passes replace the forest wholesale, selections go through
//! lookup and caption resolution, and every forest replacement revokes the
//! handles issued against the superseded forest.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::captions::{is_video_path, resolve_caption};
use crate::config::ReelConfig;
use crate::error::{IngestError, ViewerError};
use crate::playback::{HandleTable, MediaHandle, Slot};
use crate::tree::builder::{FlatFile, FlatListBuilder};
use crate::tree::lookup::find_file;
use crate::tree::node::{FilePayload, FileTreeNode, Forest};
use crate::tree::path::{display_title, folder_label};
use crate::tree::sort::sort_forest;
use crate::tree::walker::{ingest_drop, walk_entry, EntryHandle, FsEntry};
use crate::types::Generation;

/// Everything the playback surface needs for one chosen video.
#[derive(Debug, Clone)]
pub struct PlaybackSelection {
    /// Revocable reference to the video payload.
    pub video: MediaHandle,
    /// Revocable reference to the resolved caption payload, when one matched.
    pub caption: Option<MediaHandle>,
    /// Filename without the video extension.
    pub title: String,
    /// Parent segments joined with " / ", or "Root" at top level.
    pub folder_label: String,
}

/// Viewer session state.
pub struct ViewerSession {
    config: ReelConfig,
    forest: RwLock<Forest>,
    handles: HandleTable,
    generation: AtomicU64,
}

impl ViewerSession {
    pub fn new(config: ReelConfig) -> Self {
        Self {
            config,
            forest: RwLock::new(Vec::new()),
            handles: HandleTable::new(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ReelConfig::default())
    }

    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    /// Generation of the most recently started ingestion pass.
    pub fn generation(&self) -> Generation {
        self.generation.load(Ordering::SeqCst)
    }

    /// Snapshot of the current forest.
    pub fn forest(&self) -> Forest {
        self.forest.read().clone()
    }

    /// Run a closure over the current forest without cloning it.
    pub fn visit_forest<R>(&self, visit: impl FnOnce(&[FileTreeNode]) -> R) -> R {
        visit(&self.forest.read())
    }

    /// Number of playback handles currently live.
    pub fn live_handle_count(&self) -> usize {
        self.handles.live_count()
    }

    /// Resolve an issued handle to its payload.
    pub fn resolve_handle(&self, handle: MediaHandle) -> Result<FilePayload, ViewerError> {
        self.handles.resolve(handle)
    }

    /// Ingest a directory through the async entry walker.
    ///
    /// If a newer pass starts while this one is walking, the stale result is
    /// discarded on arrival and the call fails with `Superseded`.
    pub async fn load_directory(&self, root: &Path) -> Result<Generation, ViewerError> {
        let token = self.begin_pass();
        let entry = FsEntry::open(root, self.config.walker.clone()).await?;
        let tree = walk_entry(&entry).await?;
        if !self.install(token, vec![tree]) {
            return Err(IngestError::Superseded.into());
        }
        info!(root = %root.display(), generation = token, "Loaded directory selection");
        Ok(token)
    }

    /// Ingest dropped items: only the first top-level directory is taken.
    ///
    /// A drop without any directory is ignored: `Ok(None)`, no state change.
    pub async fn load_dropped(
        &self,
        items: &[Box<dyn EntryHandle>],
    ) -> Result<Option<Generation>, ViewerError> {
        // Check for a directory before claiming a generation, so a malformed
        // drop never invalidates an in-flight pass.
        if !items.iter().any(|item| item.is_directory()) {
            debug!("Drop contained no directory, ignoring");
            return Ok(None);
        }
        let token = self.begin_pass();
        let Some(tree) = ingest_drop(items).await? else {
            return Ok(None);
        };
        if !self.install(token, vec![tree]) {
            return Err(IngestError::Superseded.into());
        }
        info!(generation = token, "Loaded dropped directory");
        Ok(Some(token))
    }

    /// Ingest a flat file selection through the tree builder.
    pub fn load_flat(&self, files: Vec<FlatFile>) -> Result<Generation, ViewerError> {
        let token = self.begin_pass();
        let count = files.len();
        let forest = FlatListBuilder::from_files(files).build();
        if !self.install(token, forest) {
            return Err(IngestError::Superseded.into());
        }
        info!(files = count, generation = token, "Loaded flat selection");
        Ok(token)
    }

    /// Select a video by forest path, issuing playback handles and deriving
    /// display metadata.
    pub fn select(&self, path: &str) -> Result<PlaybackSelection, ViewerError> {
        let caption_config = &self.config.captions;
        if !is_video_path(path, &caption_config.video_extension) {
            return Err(ViewerError::NotAVideo(path.to_string()));
        }

        let forest = self.forest.read();
        let file =
            find_file(&forest, path).ok_or_else(|| ViewerError::NodeNotFound(path.to_string()))?;

        let video = self.handles.issue(Slot::Video, file.payload.clone());
        let caption = match resolve_caption(
            &forest,
            path,
            &caption_config.video_extension,
            &caption_config.variants,
        ) {
            Some(caption_file) => {
                Some(self.handles.issue(Slot::Caption, caption_file.payload.clone()))
            }
            None => {
                // No caption this time: the previous selection's track must
                // not linger.
                self.handles.revoke_slot(&Slot::Caption);
                None
            }
        };

        info!(video = %path, caption = caption.is_some(), "Selected video");
        Ok(PlaybackSelection {
            video,
            caption,
            title: display_title(path, &caption_config.video_extension),
            folder_label: folder_label(path),
        })
    }

    /// Tear the session down: revoke every handle and drop the forest.
    pub fn clear(&self) {
        self.begin_pass();
        let revoked = self.handles.revoke_all();
        self.forest.write().clear();
        debug!(revoked, "Cleared session");
    }

    fn begin_pass(&self) -> Generation {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Normalize and install a freshly built forest, unless the pass has
    /// been superseded. Installation revokes all handles of the old forest.
    fn install(&self, token: Generation, mut forest: Forest) -> bool {
        sort_forest(&mut forest);
        let mut guard = self.forest.write();
        if self.generation.load(Ordering::SeqCst) != token {
            debug!(generation = token, "Discarding stale ingestion result");
            return false;
        }
        self.handles.revoke_all();
        *guard = forest;
        true
    }
}
