//! Playback-facing surface: revocable handle lifecycle and selection output.

pub mod handles;

pub use handles::{HandleTable, MediaHandle, Slot};
