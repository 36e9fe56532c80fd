#![forbid(unsafe_code)]

//! Filesystem lister and end-to-end selector tests against a temp tree.

use std::fs;
use std::io;
use std::path::Path;

use rcui_core::event::TouchEvent;
use rcui_core::geometry::Rect;
use rcui_widgets::config::{RowMetrics, SelectorConfig};
use rcui_widgets::entry::EntryKind;
use rcui_widgets::file_selector::{FileSelector, Selection};
use rcui_widgets::listing::{DirectoryLister, FsLister, ListingFilter, ListingFlags};
use rcui_widgets::vars::{MemoryStore, VariableStore};
use tempfile::TempDir;

/// ```text
/// root/
///   sub/
///     inner.img
///   update.zip   (1 KiB)
///   notes.txt
/// ```
fn tree() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("sub")).expect("mkdir");
    fs::write(dir.path().join("sub").join("inner.img"), b"img").expect("write");
    fs::write(dir.path().join("update.zip"), vec![0u8; 1024]).expect("write");
    fs::write(dir.path().join("notes.txt"), b"hello").expect("write");
    dir
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn sorted_names(entries: &[rcui_widgets::Entry]) -> Vec<String> {
    let mut names: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();
    names.sort();
    names
}

#[test]
fn lists_containers_and_leaves() {
    let dir = tree();
    let listing = FsLister::new()
        .list(&path_str(dir.path()), &ListingFilter::default())
        .expect("list");

    assert_eq!(sorted_names(&listing.containers), vec!["..", "sub"]);
    assert_eq!(sorted_names(&listing.leaves), vec!["notes.txt", "update.zip"]);

    let zip = listing
        .leaves
        .iter()
        .find(|e| e.name == "update.zip")
        .expect("zip listed");
    assert_eq!(zip.size, 1024);
    assert_eq!(zip.kind, EntryKind::RegularFile);
    assert!(zip.modified > 0);
}

#[test]
fn extension_filter_applies_to_leaves_only() {
    let dir = tree();
    let filter = ListingFilter::default().with_extension(".zip");
    let listing = FsLister::new()
        .list(&path_str(dir.path()), &filter)
        .expect("list");
    assert_eq!(sorted_names(&listing.containers), vec!["..", "sub"]);
    assert_eq!(sorted_names(&listing.leaves), vec!["update.zip"]);
}

#[test]
fn flags_hide_parts() {
    let dir = tree();
    let filter = ListingFilter::new(ListingFlags::CONTAINERS);
    let listing = FsLister::new()
        .list(&path_str(dir.path()), &filter)
        .expect("list");
    assert_eq!(sorted_names(&listing.containers), vec!["sub"]);
    assert!(listing.leaves.is_empty());
}

#[test]
fn root_has_no_parent_entry() {
    let listing = FsLister::new()
        .list("/", &ListingFilter::default())
        .expect("list root");
    assert!(listing.containers.iter().all(|e| !e.is_parent_link()));
}

#[test]
fn regular_file_is_not_a_directory() {
    let dir = tree();
    let err = FsLister::new()
        .list(&path_str(&dir.path().join("notes.txt")), &ListingFilter::default())
        .expect_err("file cannot be listed");
    assert!(err.to_string().starts_with("unable to open"));
}

#[test]
fn missing_directory_is_not_found() {
    let dir = tree();
    let missing = path_str(&dir.path().join("gone"));
    let err = FsLister::new()
        .list(&missing, &ListingFilter::default())
        .expect_err("missing dir");
    assert_eq!(err.kind, io::ErrorKind::NotFound);
    assert_eq!(err.path, missing);
}

#[cfg(unix)]
#[test]
fn dangling_symlink_kept_with_zeroed_metadata() {
    let dir = tree();
    std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("dangling"))
        .expect("symlink");
    let listing = FsLister::new()
        .list(&path_str(dir.path()), &ListingFilter::default())
        .expect("list");
    let link = listing
        .leaves
        .iter()
        .find(|e| e.name == "dangling")
        .expect("link listed");
    assert_eq!(link.kind, EntryKind::SymbolicLink);
    assert_eq!(link.size, 0);
    assert_eq!(link.modified, 0);
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_names_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tree();
    fs::write(dir.path().join(OsStr::from_bytes(b"bad\xffname.zip")), b"x").expect("write");
    let listing = FsLister::new()
        .list(&path_str(dir.path()), &ListingFilter::default())
        .expect("list");
    assert_eq!(sorted_names(&listing.leaves), vec!["notes.txt", "update.zip"]);
    assert!(listing.leaves.iter().all(|e| !e.name.contains('\u{FFFD}')));
}

// ── End to end ──────────────────────────────────────────────────────────

const AREA: Rect = Rect::new(0, 0, 480, 240);

fn tap(sel: &mut FileSelector<FsLister, MemoryStore>, row: i32) -> Option<Selection> {
    let y = 40 + row * 40 + 20;
    sel.on_touch(TouchEvent::start(50, y));
    sel.on_touch(TouchEvent::release(50, y))
}

#[test]
fn browse_into_subdirectory_and_back() {
    let dir = tree();
    let root = path_str(dir.path());
    let sub = format!("{root}/sub");

    let mut sel = FileSelector::new(
        SelectorConfig::default()
            .path_default(root.as_str())
            .result_var("tw_filename"),
        RowMetrics::new(40),
        AREA,
        FsLister::new(),
        MemoryStore::default(),
    );
    let labels: Vec<_> = sel.rows().iter().map(|r| r.label.to_owned()).collect();
    assert_eq!(labels, vec!["(Up A Level)", "sub", "notes.txt", "update.zip"]);

    assert_eq!(tap(&mut sel, 1), Some(Selection::Navigated { path: sub.clone() }));
    assert_eq!(sel.vars().get("cwd"), sub);

    assert_eq!(
        tap(&mut sel, 1),
        Some(Selection::FileChosen {
            path: format!("{sub}/inner.img")
        })
    );

    assert_eq!(tap(&mut sel, 0), Some(Selection::Navigated { path: root.clone() }));
    assert_eq!(sel.len(), 4);
}

#[test]
fn vanished_directory_keeps_listing() {
    let dir = tree();
    let root = path_str(dir.path());

    let mut sel = FileSelector::new(
        SelectorConfig::default().path_default(root.as_str()),
        RowMetrics::new(40),
        AREA,
        FsLister::new(),
        MemoryStore::default(),
    );
    fs::remove_dir_all(dir.path().join("sub")).expect("rm");

    let chosen = tap(&mut sel, 1);
    assert!(matches!(chosen, Some(Selection::NavigationFailed { .. })));
    assert_eq!(sel.vars().get("cwd"), root);
    assert_eq!(sel.len(), 4);
    assert!(sel.take_error().is_some());
}
