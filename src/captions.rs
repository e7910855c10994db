//! Caption Resolver
//!
//! Pairs a selected video with the most plausible companion caption track by
//! naming convention: the video extension is replaced with each caption
//! variant in order, most-specific first, and the first path present in the
//! forest wins. Best-effort by design: a caption under an unlisted naming
//! convention is never found.

use tracing::debug;

use crate::tree::lookup::find_file;
use crate::tree::node::{FileNode, FileTreeNode};
use crate::tree::path::strip_suffix_ci;

/// The one recognized video extension, matched case-insensitively.
pub const VIDEO_EXTENSION: &str = ".mp4";

/// Caption variants in probe order: locale-qualified before short-locale
/// before bare. Matched case-sensitively as exact suffixes.
pub fn default_caption_variants() -> Vec<String> {
    vec![
        ".en_US.vtt".to_string(),
        ".en.vtt".to_string(),
        ".vtt".to_string(),
    ]
}

/// Display classification of a file by name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Caption,
    Other,
}

/// Classify a file name for display purposes.
pub fn classify(name: &str, video_extension: &str) -> MediaKind {
    if strip_suffix_ci(name, video_extension).is_some() {
        MediaKind::Video
    } else if strip_suffix_ci(name, ".vtt").is_some() {
        MediaKind::Caption
    } else {
        MediaKind::Other
    }
}

/// True when the path ends with the video extension, any case.
pub fn is_video_path(path: &str, video_extension: &str) -> bool {
    strip_suffix_ci(path, video_extension).is_some()
}

/// Candidate caption paths for a video, in probe order.
///
/// The video extension is stripped from the end only; interior occurrences
/// are never touched. A non-video path yields no candidates.
pub fn caption_candidates(path: &str, video_extension: &str, variants: &[String]) -> Vec<String> {
    let Some(stem) = strip_suffix_ci(path, video_extension) else {
        return Vec::new();
    };
    variants
        .iter()
        .map(|variant| format!("{stem}{variant}"))
        .collect()
}

/// Resolve the caption file for a selected video path, or `None` when every
/// candidate misses.
pub fn resolve_caption<'a>(
    forest: &'a [FileTreeNode],
    video_path: &str,
    video_extension: &str,
    variants: &[String],
) -> Option<&'a FileNode> {
    for candidate in caption_candidates(video_path, video_extension, variants) {
        debug!(%candidate, "Probing caption candidate");
        if let Some(file) = find_file(forest, &candidate) {
            debug!(caption = %file.path, video = %video_path, "Caption matched");
            return Some(file);
        }
    }
    debug!(video = %video_path, "No matching caption found");
    None
}

/// Paths of every video file in the forest, in display order.
pub fn collect_video_paths(forest: &[FileTreeNode], video_extension: &str) -> Vec<String> {
    let mut paths = Vec::new();
    collect_videos_inner(forest, video_extension, &mut paths);
    paths
}

fn collect_videos_inner(nodes: &[FileTreeNode], video_extension: &str, out: &mut Vec<String>) {
    for node in nodes {
        match node {
            FileTreeNode::File(file) => {
                if is_video_path(&file.path, video_extension) {
                    out.push(file.path.clone());
                }
            }
            FileTreeNode::Directory(dir) => {
                collect_videos_inner(&dir.children, video_extension, out)
            }
        }
    }
}
