//! Format forests, caption probes, and selections as text or JSON.

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::captions::{caption_candidates, classify, MediaKind};
use crate::session::PlaybackSelection;
use crate::tree::lookup::find_node;
use crate::tree::node::FileTreeNode;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Render a forest as an indented tree, directories first as normalized.
pub fn render_tree(forest: &[FileTreeNode], video_extension: &str) -> String {
    let mut out = String::new();
    let mut directories = 0usize;
    let mut files = 0usize;
    render_level(forest, 0, video_extension, &mut out, &mut directories, &mut files);
    out.push_str(&format!("\n{} directories, {} files\n", directories, files));
    out
}

fn render_level(
    nodes: &[FileTreeNode],
    depth: usize,
    video_extension: &str,
    out: &mut String,
    directories: &mut usize,
    files: &mut usize,
) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        match node {
            FileTreeNode::Directory(dir) => {
                *directories += 1;
                out.push_str(&format!("{}{}/\n", indent, dir.name.blue().bold()));
                render_level(&dir.children, depth + 1, video_extension, out, directories, files);
            }
            FileTreeNode::File(file) => {
                *files += 1;
                let label = match classify(&file.name, video_extension) {
                    MediaKind::Video => format!("{}", file.name.green()),
                    MediaKind::Caption => format!("{}", file.name.cyan()),
                    MediaKind::Other => format!("{}", file.name.dimmed()),
                };
                out.push_str(&format!("{}{}\n", indent, label));
            }
        }
    }
}

/// Render a forest as JSON, payloads reduced to kind and size.
pub fn forest_to_json(forest: &[FileTreeNode]) -> serde_json::Value {
    json!(forest.iter().map(node_to_json).collect::<Vec<_>>())
}

fn node_to_json(node: &FileTreeNode) -> serde_json::Value {
    match node {
        FileTreeNode::Directory(dir) => json!({
            "name": dir.name,
            "path": dir.path,
            "kind": "directory",
            "children": dir.children.iter().map(node_to_json).collect::<Vec<_>>(),
        }),
        FileTreeNode::File(file) => json!({
            "name": file.name,
            "path": file.path,
            "kind": "file",
            "size": file.payload.size(),
        }),
    }
}

/// Render the caption probe for a video path: every candidate in order and
/// whether the forest contains it.
pub fn render_caption_probe(
    forest: &[FileTreeNode],
    video_path: &str,
    video_extension: &str,
    variants: &[String],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Caption candidates")));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Candidate", "Present"]);
    let mut matched: Option<String> = None;
    for candidate in caption_candidates(video_path, video_extension, variants) {
        let present = find_node(forest, &candidate).is_some();
        if present && matched.is_none() {
            matched = Some(candidate.clone());
        }
        table.add_row(vec![candidate, if present { "yes".to_string() } else { "no".to_string() }]);
    }
    out.push_str(&format!("{}\n\n", table));

    match matched {
        Some(path) => out.push_str(&format!("Resolved caption: {}\n", path.green())),
        None => out.push_str("No matching caption found.\n"),
    }
    out
}

/// JSON shape of the caption probe.
pub fn caption_probe_to_json(
    forest: &[FileTreeNode],
    video_path: &str,
    video_extension: &str,
    variants: &[String],
) -> serde_json::Value {
    let candidates: Vec<serde_json::Value> =
        caption_candidates(video_path, video_extension, variants)
            .into_iter()
            .map(|candidate| {
                let present = find_node(forest, &candidate).is_some();
                json!({ "path": candidate, "present": present })
            })
            .collect();
    let resolved = candidates
        .iter()
        .find(|c| c["present"] == json!(true))
        .map(|c| c["path"].clone())
        .unwrap_or(serde_json::Value::Null);
    json!({ "video": video_path, "candidates": candidates, "resolved": resolved })
}

/// Render a playback selection with its display metadata and handle state.
pub fn render_selection(selection: &PlaybackSelection, live_handles: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Playback selection")));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.add_row(vec!["Title".to_string(), selection.title.clone()]);
    table.add_row(vec!["Folder".to_string(), selection.folder_label.clone()]);
    table.add_row(vec![
        "Video handle".to_string(),
        selection.video.id().to_string(),
    ]);
    table.add_row(vec![
        "Caption handle".to_string(),
        selection
            .caption
            .map(|handle| handle.id().to_string())
            .unwrap_or_else(|| "none".to_string()),
    ]);
    table.add_row(vec!["Live handles".to_string(), live_handles.to_string()]);
    out.push_str(&format!("{}\n", table));
    out
}

/// JSON shape of a playback selection.
pub fn selection_to_json(selection: &PlaybackSelection, live_handles: usize) -> serde_json::Value {
    json!({
        "title": selection.title,
        "folder": selection.folder_label,
        "video_handle": selection.video.id(),
        "caption_handle": selection.caption.map(|handle| handle.id()),
        "live_handles": live_handles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::{default_caption_variants, VIDEO_EXTENSION};
    use crate::tree::builder::FlatListBuilder;
    use crate::tree::node::FilePayload;
    use crate::tree::sort::sort_forest;
    use std::sync::Arc;

    fn forest(paths: &[&str]) -> Vec<FileTreeNode> {
        let mut builder = FlatListBuilder::new();
        for path in paths {
            builder.push(*path, FilePayload::Memory(Arc::new(Vec::new())));
        }
        let mut forest = builder.build();
        sort_forest(&mut forest);
        forest
    }

    #[test]
    fn test_render_tree_counts_nodes() {
        let rendered = render_tree(
            &forest(&["Show/a.mp4", "Show/a.vtt", "b.mp4"]),
            VIDEO_EXTENSION,
        );
        assert!(rendered.contains("1 directories, 3 files"));
    }

    #[test]
    fn test_forest_json_shape() {
        let value = forest_to_json(&forest(&["Show/a.mp4"]));
        assert_eq!(value[0]["kind"], "directory");
        assert_eq!(value[0]["children"][0]["path"], "Show/a.mp4");
    }

    #[test]
    fn test_caption_probe_json_resolves_first_hit() {
        let forest = forest(&["Show/a.mp4", "Show/a.vtt"]);
        let value = caption_probe_to_json(
            &forest,
            "Show/a.mp4",
            VIDEO_EXTENSION,
            &default_caption_variants(),
        );
        assert_eq!(value["resolved"], "Show/a.vtt");
        assert_eq!(value["candidates"].as_array().unwrap().len(), 3);
    }
}
