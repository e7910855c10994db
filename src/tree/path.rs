//! Path segment utilities for forest paths.
//!
//! Forest paths are `/`-joined relative paths with no leading slash; these
//! helpers derive display metadata from them without touching the filesystem.

use std::path::{Path, PathBuf};

/// Label shown for files sitting at the top level of a selection.
pub const ROOT_LABEL: &str = "Root";

/// Split a forest path into its non-empty segments.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Strip `suffix` from the end of `s`, matching ASCII case-insensitively.
///
/// Returns `None` when the suffix does not match or falls on a non-character
/// boundary of `s`.
pub(crate) fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    if suffix.is_empty() {
        return Some(s);
    }
    let split = s.len().checked_sub(suffix.len())?;
    let head = s.get(..split)?;
    let tail = s.get(split..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        Some(head)
    } else {
        None
    }
}

/// Derived playback title: the filename without the video extension.
pub fn display_title(path: &str, video_extension: &str) -> String {
    let name = split_segments(path).last().copied().unwrap_or(path);
    strip_suffix_ci(name, video_extension)
        .unwrap_or(name)
        .to_string()
}

/// Derived folder label: parent segments joined with " / ", or [`ROOT_LABEL`]
/// when the file sits at the top level.
pub fn folder_label(path: &str) -> String {
    let segments = split_segments(path);
    if segments.len() > 1 {
        segments[..segments.len() - 1].join(" / ")
    } else {
        ROOT_LABEL.to_string()
    }
}

/// Canonicalize a selection root without UNC artifacts on Windows.
pub fn canonicalize_root(path: &Path) -> std::io::Result<PathBuf> {
    dunce::canonicalize(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_segments_drops_empty() {
        assert_eq!(split_segments("Show/Season 1/Ep.mp4"), vec!["Show", "Season 1", "Ep.mp4"]);
        assert_eq!(split_segments("/Show//Ep.mp4"), vec!["Show", "Ep.mp4"]);
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn test_strip_suffix_ci_matches_any_case() {
        assert_eq!(strip_suffix_ci("Episode.MP4", ".mp4"), Some("Episode"));
        assert_eq!(strip_suffix_ci("Episode.mp4", ".mp4"), Some("Episode"));
        assert_eq!(strip_suffix_ci("Episode.mkv", ".mp4"), None);
        assert_eq!(strip_suffix_ci("a", ".mp4"), None);
    }

    #[test]
    fn test_display_title_drops_extension_only() {
        assert_eq!(display_title("Show/Episode 01.mp4", ".mp4"), "Episode 01");
        assert_eq!(display_title("Episode.MP4", ".mp4"), "Episode");
        // Interior occurrences of the extension are preserved.
        assert_eq!(display_title("Show/file.mp4.backup.mp4", ".mp4"), "file.mp4.backup");
    }

    #[test]
    fn test_folder_label_joins_parents() {
        assert_eq!(folder_label("Show/Season 1/Ep.mp4"), "Show / Season 1");
        assert_eq!(folder_label("Ep.mp4"), ROOT_LABEL);
    }
}
