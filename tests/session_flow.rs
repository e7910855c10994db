//! End-to-end flows: ingest a real folder through both routes, select a
//! video, resolve its caption, and watch handle lifecycle across selections.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use reel::config::ReelConfig;
use reel::session::ViewerSession;
use reel::tree::builder::{scan_directory, FlatFile};
use reel::tree::lookup::find_node;
use reel::tree::node::{FilePayload, FileTreeNode};

fn seed_show_folder(root: &Path) {
    fs::create_dir_all(root.join("Show/Season 1")).unwrap();
    fs::write(root.join("Show/Season 1/e1.mp4"), b"video-1").unwrap();
    fs::write(root.join("Show/Season 1/e1.en_US.vtt"), b"caption-1").unwrap();
    fs::write(root.join("Show/Season 1/e2.mp4"), b"video-2").unwrap();
    fs::write(root.join("Show/notes.txt"), b"n").unwrap();
}

fn flat(paths: &[&str]) -> Vec<FlatFile> {
    paths
        .iter()
        .map(|path| FlatFile {
            relative_path: path.to_string(),
            payload: FilePayload::Memory(Arc::new(Vec::new())),
        })
        .collect()
}

#[test]
fn flat_scan_select_and_caption_resolution() -> Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path().join("media");
    seed_show_folder(&root);

    let session = ViewerSession::new(ReelConfig::default());
    session.load_flat(scan_directory(&root)?)?;

    let selection = session.select("media/Show/Season 1/e1.mp4")?;
    assert_eq!(selection.title, "e1");
    assert_eq!(selection.folder_label, "media / Show / Season 1");
    assert!(selection.caption.is_some());

    // The caption handle resolves to the locale-qualified track's bytes.
    let caption = selection.caption.unwrap();
    let payload = session.resolve_handle(caption)?;
    assert_eq!(payload.read_bytes()?, b"caption-1");
    Ok(())
}

#[tokio::test]
async fn walker_route_builds_the_same_forest_shape() -> Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path().join("media");
    seed_show_folder(&root);

    let session = ViewerSession::new(ReelConfig::default());
    session.load_directory(&root).await?;

    session.visit_forest(|forest| {
        assert!(find_node(forest, "media/Show/Season 1/e1.mp4").is_some());
        assert!(find_node(forest, "media/Show/Season 1/e1.en_US.vtt").is_some());
        assert!(find_node(forest, "media/Show/notes.txt").is_some());
    });

    let selection = session.select("media/Show/Season 1/e1.mp4")?;
    assert!(selection.caption.is_some());
    Ok(())
}

#[test]
fn replacement_revokes_every_handle_of_the_old_forest() -> Result<()> {
    let session = ViewerSession::new(ReelConfig::default());
    session.load_flat(flat(&["A/b.mp4", "A/b.vtt"]))?;
    let selection = session.select("A/b.mp4")?;
    assert_eq!(session.live_handle_count(), 2);

    session.load_flat(flat(&["B/c.mp4"]))?;
    assert_eq!(session.live_handle_count(), 0);
    assert!(session.resolve_handle(selection.video).is_err());

    // The replacement forest is fully usable.
    let next = session.select("B/c.mp4")?;
    assert!(next.caption.is_none());
    assert_eq!(session.live_handle_count(), 1);
    Ok(())
}

#[test]
fn end_to_end_ordering_and_caption_match() -> Result<()> {
    let session = ViewerSession::new(ReelConfig::default());
    session.load_flat(flat(&["A/b.mp4", "A/b.vtt", "C.mp4"]))?;

    session.visit_forest(|forest| {
        assert_eq!(forest.len(), 2);
        let FileTreeNode::Directory(a) = &forest[0] else {
            panic!("directory A sorts before file C.mp4");
        };
        assert_eq!(a.name, "A");
        let names: Vec<&str> = a.children.iter().map(FileTreeNode::name).collect();
        assert_eq!(names, vec!["b.mp4", "b.vtt"]);
        assert_eq!(forest[1].path(), "C.mp4");
    });

    let selection = session.select("A/b.mp4")?;
    let caption = selection.caption.expect("A/b.vtt should match");
    let payload = session.resolve_handle(caption)?;
    assert_eq!(payload.size(), 0);
    Ok(())
}
