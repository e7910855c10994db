//! Reel: Local Folder Media Viewer Core
//!
//! Turns a user-chosen folder into a navigable file-tree forest, pairs a
//! selected video with its companion caption track by naming convention, and
//! manages the revocable playback handles handed to the playback surface.

pub mod captions;
pub mod config;
pub mod error;
pub mod logging;
pub mod playback;
pub mod session;
pub mod tooling;
pub mod tree;
pub mod types;
