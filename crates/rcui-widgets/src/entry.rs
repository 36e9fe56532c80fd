#![forbid(unsafe_code)]

//! Directory entry model.
//!
//! An [`Entry`] is a plain value: a name, a kind, and the `stat` metadata
//! collected by the lister. The selector never interprets permissions or
//! ownership; it only compares names, sizes, and modification times.

/// Name of the "self" sentinel entry.
pub const SELF_NAME: &str = ".";

/// Name of the "go up" sentinel entry.
pub const PARENT_NAME: &str = "..";

/// Label shown in place of the raw `..` name.
pub const UP_A_LEVEL_LABEL: &str = "(Up A Level)";

/// The kind of a directory entry, as reported by the directory scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Directory (navigable container).
    Directory,
    /// Regular file.
    RegularFile,
    /// Symbolic link (not followed for classification).
    SymbolicLink,
    /// Block device node.
    BlockDevice,
    /// Sockets, fifos, character devices, unknown.
    Other,
}

impl EntryKind {
    /// Whether entries of this kind are listed as containers.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Whether entries of this kind are listed as selectable leaves.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::RegularFile | Self::SymbolicLink | Self::BlockDevice
        )
    }
}

/// A single entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File name (no directory component).
    pub name: String,
    /// Entry kind.
    pub kind: EntryKind,
    /// Size in bytes. Meaningless for directories on most filesystems.
    pub size: u64,
    /// Last modification, seconds since the epoch.
    pub modified: i64,
    /// Last access, seconds since the epoch.
    pub accessed: i64,
    /// Last status change, seconds since the epoch.
    pub status_changed: i64,
    /// Raw mode bits.
    pub mode: u32,
    /// Owner user id.
    pub uid: u32,
    /// Owner group id.
    pub gid: u32,
}

impl Entry {
    /// Create an entry with zeroed metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            size: 0,
            modified: 0,
            accessed: 0,
            status_changed: 0,
            mode: 0,
            uid: 0,
            gid: 0,
        }
    }

    /// Create a directory entry.
    #[must_use]
    pub fn dir(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Directory)
    }

    /// Create a regular file entry.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::RegularFile)
    }

    /// The synthetic "go up" entry.
    #[must_use]
    pub fn parent_link() -> Self {
        Self::dir(PARENT_NAME)
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Set the modification time.
    #[must_use]
    pub fn with_modified(mut self, modified: i64) -> Self {
        self.modified = modified;
        self
    }

    /// Whether this is the "self" sentinel.
    #[must_use]
    pub fn is_self_link(&self) -> bool {
        self.name == SELF_NAME
    }

    /// Whether this is the "go up" sentinel.
    #[must_use]
    pub fn is_parent_link(&self) -> bool {
        self.name == PARENT_NAME
    }

    /// Whether this entry is one of the two sentinels.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.is_self_link() || self.is_parent_link()
    }

    /// Whether this is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind.is_container()
    }

    /// Text to draw for this entry.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.is_parent_link() {
            UP_A_LEVEL_LABEL
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classification() {
        assert!(EntryKind::Directory.is_container());
        assert!(!EntryKind::Directory.is_leaf());
        for kind in [
            EntryKind::RegularFile,
            EntryKind::SymbolicLink,
            EntryKind::BlockDevice,
        ] {
            assert!(kind.is_leaf(), "{kind:?}");
            assert!(!kind.is_container(), "{kind:?}");
        }
        assert!(!EntryKind::Other.is_leaf());
        assert!(!EntryKind::Other.is_container());
    }

    #[test]
    fn parent_link_has_fixed_label() {
        let up = Entry::parent_link();
        assert!(up.is_parent_link());
        assert!(up.is_sentinel());
        assert!(up.is_dir());
        assert_eq!(up.label(), "(Up A Level)");
    }

    #[test]
    fn regular_entries_use_their_name() {
        let e = Entry::file("update.zip").with_size(42).with_modified(7);
        assert_eq!(e.label(), "update.zip");
        assert_eq!(e.size, 42);
        assert_eq!(e.modified, 7);
        assert!(!e.is_sentinel());
    }

    #[test]
    fn self_link_detected() {
        assert!(Entry::dir(".").is_self_link());
        assert!(!Entry::dir(".hidden").is_self_link());
    }
}
