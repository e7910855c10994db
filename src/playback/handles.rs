//! Ephemeral Reference Manager
//!
//! Issues short-lived, revocable handles over file payloads for the playback
//! surface, keyed by logical slot. A slot's previous handle is revoked
//! exactly once when superseded; revoking an already-revoked or never-issued
//! handle is a no-op. On forest replacement or teardown every live handle is
//! revoked, so handles never leak across selections.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::ViewerError;
use crate::tree::node::FilePayload;
use crate::types::HandleId;

/// Logical slot a handle is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The currently playing video.
    Video,
    /// The caption track of the currently playing video.
    Caption,
    /// An arbitrary path-keyed binding.
    Path(String),
}

/// Issued handle token. Worthless after revocation; resolution goes back
/// through the table that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaHandle(HandleId);

impl MediaHandle {
    pub fn id(&self) -> HandleId {
        self.0
    }
}

#[derive(Default)]
struct TableInner {
    next_id: HandleId,
    live: HashMap<HandleId, FilePayload>,
    slots: HashMap<Slot, HandleId>,
}

/// Side table of live playback handles, keyed by slot.
#[derive(Default)]
pub struct HandleTable {
    inner: RwLock<TableInner>,
}

impl HandleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh handle for `slot`, revoking the slot's previous handle.
    ///
    /// Every call yields a new handle, even for the same payload.
    pub fn issue(&self, slot: Slot, payload: FilePayload) -> MediaHandle {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        let id = inner.next_id;
        if let Some(superseded) = inner.slots.insert(slot.clone(), id) {
            if inner.live.remove(&superseded).is_some() {
                debug!(handle = superseded, ?slot, "Revoked superseded handle");
            }
        }
        inner.live.insert(id, payload);
        debug!(handle = id, ?slot, "Issued handle");
        MediaHandle(id)
    }

    /// Resolve a handle to its payload, or fail if it was revoked.
    pub fn resolve(&self, handle: MediaHandle) -> Result<FilePayload, ViewerError> {
        self.inner
            .read()
            .live
            .get(&handle.0)
            .cloned()
            .ok_or(ViewerError::HandleRevoked(handle.0))
    }

    /// Revoke one handle. Returns whether it was live; repeated revocation
    /// is a no-op.
    pub fn revoke(&self, handle: MediaHandle) -> bool {
        let mut inner = self.inner.write();
        let was_live = inner.live.remove(&handle.0).is_some();
        if was_live {
            inner.slots.retain(|_, id| *id != handle.0);
            debug!(handle = handle.0, "Revoked handle");
        }
        was_live
    }

    /// Revoke whatever handle currently occupies `slot`, if any.
    pub fn revoke_slot(&self, slot: &Slot) -> bool {
        let mut inner = self.inner.write();
        match inner.slots.remove(slot) {
            Some(id) => {
                let was_live = inner.live.remove(&id).is_some();
                if was_live {
                    debug!(handle = id, ?slot, "Revoked slot handle");
                }
                was_live
            }
            None => false,
        }
    }

    /// Revoke every live handle. Returns the number revoked.
    pub fn revoke_all(&self) -> usize {
        let mut inner = self.inner.write();
        let count = inner.live.len();
        inner.live.clear();
        inner.slots.clear();
        if count > 0 {
            debug!(count, "Revoked all handles");
        }
        count
    }

    /// Number of handles currently live.
    pub fn live_count(&self) -> usize {
        self.inner.read().live.len()
    }
}
