#![forbid(unsafe_code)]

//! Touch list widgets for the recovery console.
//!
//! The centerpiece is [`FileSelector`], a directory browser driven by raw
//! touch reports and a frame tick. Its parts are usable on their own:
//! [`sort`] orders entries, [`viewport`] paginates fixed-height rows,
//! [`kinetic`] decays flings and [`touch`] recognizes gestures.

pub mod config;
pub mod entry;
pub mod file_selector;
pub mod kinetic;
pub mod listing;
pub mod sort;
pub mod touch;
pub mod vars;
pub mod viewport;

pub use config::{RowMetrics, SelectorConfig, SelectorConfigError};
pub use entry::{Entry, EntryKind};
pub use file_selector::{FileSelector, LogicalEntry, RowIcon, RowLayout, Selection};
pub use listing::{DirectoryLister, FsLister, ListError, Listing, ListingFilter, ListingFlags};
pub use sort::SortMode;
pub use vars::{MemoryStore, VariableStore};
pub use viewport::{ScrollEdge, Viewport};
