#![forbid(unsafe_code)]

//! Directory listing boundary.
//!
//! A [`DirectoryLister`] turns a path into a [`Listing`]: containers and
//! leaves, already filtered by a [`ListingFilter`]. Ordering is applied by
//! the caller. [`FsLister`] is the `std::fs` implementation.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Result |
//! |---------|-------|--------|
//! | Directory cannot be opened | Missing, permissions, not a dir | `Err(ListError)` |
//! | One entry cannot be read | Raced removal, I/O error | Entry skipped |
//! | Name is not UTF-8 | Foreign filesystem encoding | Entry skipped |
//! | Metadata lookup fails | Dangling symlink, permissions | Entry kept, metadata zeroed |

use std::fmt;
use std::io;
use std::path::Path;

use bitflags::bitflags;

use crate::entry::{Entry, EntryKind, PARENT_NAME, SELF_NAME};

bitflags! {
    /// Which parts of a directory are listed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ListingFlags: u8 {
        /// List directories.
        const CONTAINERS = 0b0000_0001;
        /// List files.
        const LEAVES     = 0b0000_0010;
        /// Include the "go up" entry.
        const NAV        = 0b0000_0100;
    }
}

impl Default for ListingFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// Filter applied by listers before returning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Parts of the directory to include.
    pub flags: ListingFlags,
    /// Required file name suffix for leaves (case-sensitive).
    pub extension: Option<String>,
}

impl ListingFilter {
    /// Create a filter from flags with no extension restriction.
    #[must_use]
    pub fn new(flags: ListingFlags) -> Self {
        Self {
            flags,
            extension: None,
        }
    }

    /// Restrict leaves to names ending in `extension`.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = (!extension.is_empty()).then_some(extension);
        self
    }

    /// Whether a directory entry belongs in the container list.
    #[must_use]
    pub fn admits_container(&self, entry: &Entry) -> bool {
        if !self.flags.contains(ListingFlags::CONTAINERS) || !entry.kind.is_container() {
            return false;
        }
        self.flags.contains(ListingFlags::NAV) || !entry.is_sentinel()
    }

    /// Whether a non-directory entry belongs in the leaf list.
    ///
    /// The name must be strictly longer than the extension; a file named
    /// exactly `.zip` does not match `.zip`.
    #[must_use]
    pub fn admits_leaf(&self, entry: &Entry) -> bool {
        if !self.flags.contains(ListingFlags::LEAVES) || !entry.kind.is_leaf() {
            return false;
        }
        match &self.extension {
            None => true,
            Some(ext) => entry.name.len() > ext.len() && entry.name.ends_with(ext.as_str()),
        }
    }
}

/// The result of listing one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Navigable directories.
    pub containers: Vec<Entry>,
    /// Selectable files.
    pub leaves: Vec<Entry>,
}

impl Listing {
    /// Classify raw entries through `filter`, dropping what it rejects.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>, filter: &ListingFilter) -> Self {
        let mut listing = Self::default();
        for entry in entries {
            listing.push(entry, filter);
        }
        listing
    }

    fn push(&mut self, entry: Entry, filter: &ListingFilter) {
        if filter.admits_container(&entry) {
            self.containers.push(entry);
        } else if filter.admits_leaf(&entry) {
            self.leaves.push(entry);
        }
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len() + self.leaves.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A directory could not be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListError {
    /// The path that failed.
    pub path: String,
    /// The underlying I/O error kind.
    pub kind: io::ErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl ListError {
    /// Create an error for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, kind: io::ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Wrap an I/O error.
    #[must_use]
    pub fn io(path: impl Into<String>, err: &io::Error) -> Self {
        Self::new(path, err.kind(), err.to_string())
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to open '{}': {}", self.path, self.message)
    }
}

impl std::error::Error for ListError {}

/// Produces the entries of a directory.
pub trait DirectoryLister {
    /// List `path`, applying `filter`. Entries are returned unsorted.
    fn list(&self, path: &str, filter: &ListingFilter) -> Result<Listing, ListError>;
}

/// Lists directories from the local filesystem.
///
/// `std::fs::read_dir` never yields `.` or `..`; the "go up" entry is
/// synthesized for every directory except `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl FsLister {
    /// Create a filesystem lister.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for FsLister {
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn list(&self, path: &str, filter: &ListingFilter) -> Result<Listing, ListError> {
        let dir = Path::new(path);
        let read = std::fs::read_dir(dir).map_err(|err| ListError::io(path, &err))?;

        let mut listing = Listing::default();
        if path != "/" {
            let mut up = Entry::parent_link();
            fill_metadata(&mut up, &dir.join(PARENT_NAME));
            listing.push(up, filter);
        }

        for item in read {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    rcui_core::warn!(path, error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            let name = match item.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    rcui_core::warn!(path, name = ?raw, "skipping non-UTF-8 file name");
                    continue;
                }
            };
            if name == SELF_NAME || name == PARENT_NAME {
                continue;
            }
            let kind = item
                .file_type()
                .map(classify)
                .unwrap_or(EntryKind::Other);
            let mut entry = Entry::new(name, kind);
            fill_metadata(&mut entry, &item.path());
            listing.push(entry, filter);
        }

        rcui_core::debug!(
            path,
            containers = listing.containers.len(),
            leaves = listing.leaves.len(),
            "listed directory"
        );
        Ok(listing)
    }
}

fn classify(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        return EntryKind::Directory;
    }
    if file_type.is_file() {
        return EntryKind::RegularFile;
    }
    if file_type.is_symlink() {
        return EntryKind::SymbolicLink;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if file_type.is_block_device() {
            return EntryKind::BlockDevice;
        }
    }
    EntryKind::Other
}

/// Fill `stat` metadata, following symlinks. Failures leave zeros.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn fill_metadata(entry: &mut Entry, path: &Path) {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) => {
            rcui_core::warn!(path = %path.display(), error = %err, "metadata unavailable; using zeros");
            return;
        }
    };
    entry.size = meta.len();

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        entry.modified = meta.mtime();
        entry.accessed = meta.atime();
        entry.status_changed = meta.ctime();
        entry.mode = meta.mode();
        entry.uid = meta.uid();
        entry.gid = meta.gid();
    }
    #[cfg(not(unix))]
    {
        entry.modified = epoch_seconds(meta.modified());
        entry.accessed = epoch_seconds(meta.accessed());
        entry.status_changed = entry.modified;
    }
}

#[cfg(not(unix))]
fn epoch_seconds(time: io::Result<std::time::SystemTime>) -> i64 {
    time.ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}
