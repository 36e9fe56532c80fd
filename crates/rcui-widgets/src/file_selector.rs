#![forbid(unsafe_code)]

//! Touch-driven file selector widget.
//!
//! [`FileSelector`] owns the whole interaction state of one list: the two
//! sorted collections, the viewport, momentum, and the touch tracker. The
//! console drives it through a handful of callbacks:
//!
//! - [`FileSelector::on_touch`] for every touch report,
//! - [`FileSelector::on_tick`] once per frame,
//! - [`FileSelector::on_variable_changed`] when a store variable changes,
//! - [`FileSelector::on_focus_gained`] when its page is shown.
//!
//! Drawing is left to the caller, which reads [`FileSelector::rows`] and
//! [`FileSelector::header_text`].
//!
//! # Example
//!
//! ```
//! use rcui_core::event::TouchEvent;
//! use rcui_core::geometry::Rect;
//! use rcui_widgets::config::{RowMetrics, SelectorConfig};
//! use rcui_widgets::entry::Entry;
//! use rcui_widgets::file_selector::{FileSelector, Selection};
//! use rcui_widgets::listing::{DirectoryLister, ListError, Listing, ListingFilter};
//! use rcui_widgets::vars::{MemoryStore, VariableStore};
//!
//! struct OneDir;
//!
//! impl DirectoryLister for OneDir {
//!     fn list(&self, _path: &str, filter: &ListingFilter) -> Result<Listing, ListError> {
//!         Ok(Listing::from_entries([Entry::file("update.zip")], filter))
//!     }
//! }
//!
//! let config = SelectorConfig::default()
//!     .path_default("/sdcard")
//!     .result_var("tw_filename");
//! let mut selector = FileSelector::new(
//!     config,
//!     RowMetrics::new(40),
//!     Rect::new(0, 0, 480, 240),
//!     OneDir,
//!     MemoryStore::default(),
//! );
//!
//! // Header takes the first 40 px; the first row starts below it.
//! selector.on_touch(TouchEvent::start(10, 50));
//! let chosen = selector.on_touch(TouchEvent::release(10, 50));
//! assert_eq!(
//!     chosen,
//!     Some(Selection::FileChosen { path: "/sdcard/update.zip".into() })
//! );
//! assert_eq!(selector.vars().get("tw_filename"), "/sdcard/update.zip");
//! ```

use rcui_core::event::{TouchEvent, TouchEventKind};
use rcui_core::geometry::Rect;

use crate::config::{RowMetrics, SelectorConfig};
use crate::entry::Entry;
use crate::kinetic::Momentum;
use crate::listing::{DirectoryLister, ListError, Listing};
use crate::sort::{SortMode, sort_entries};
use crate::touch::{TouchOutcome, TouchPhase, TouchTracker};
use crate::vars::{VariableStore, expand, is_template};
use crate::viewport::Viewport;

/// An entry addressed by its logical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalEntry<'a> {
    /// A directory (including the "go up" entry).
    Container(&'a Entry),
    /// A file.
    Leaf(&'a Entry),
}

impl<'a> LogicalEntry<'a> {
    /// The underlying entry.
    #[must_use]
    pub fn entry(self) -> &'a Entry {
        match self {
            Self::Container(entry) | Self::Leaf(entry) => entry,
        }
    }

    /// Icon drawn next to this entry.
    #[must_use]
    pub fn icon(self) -> RowIcon {
        match self {
            Self::Container(_) => RowIcon::Folder,
            Self::Leaf(_) => RowIcon::File,
        }
    }
}

/// Which icon a row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIcon {
    Folder,
    File,
}

/// Placement of one visible row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout<'a> {
    /// Logical index.
    pub index: usize,
    /// Screen y of the row top. May be above the content area for a
    /// partially scrolled-off first row.
    pub top: i32,
    /// Row pitch in pixels.
    pub height: i32,
    /// The entry drawn; [`LogicalEntry::icon`] picks its icon.
    pub entry: LogicalEntry<'a>,
    /// Text to draw.
    pub label: &'a str,
}

/// What a tap resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The selector now shows `path`.
    Navigated { path: String },
    /// `path` could not be listed; the previous directory is still shown.
    NavigationFailed { path: String, error: ListError },
    /// A directory was chosen as the result (folder picking mode).
    FolderChosen { path: String },
    /// A file was chosen as the result.
    FileChosen { path: String },
}

/// Parent of `path`: the last `/` segment is removed. The root and
/// single-segment paths map to `/`.
#[must_use]
pub fn parent_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }
    let parent = path.rfind('/').map_or(path, |i| &path[..i]);
    if parent.len() < 2 {
        "/".to_owned()
    } else {
        parent.to_owned()
    }
}

/// `name` inside `dir`, without doubling the root slash.
#[must_use]
pub fn child_path(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Scrollable directory list with touch navigation.
#[derive(Debug)]
pub struct FileSelector<L, V> {
    config: SelectorConfig,
    lister: L,
    vars: V,
    sort_mode: SortMode,
    containers: Vec<Entry>,
    leaves: Vec<Entry>,
    area: Rect,
    header_height: i32,
    viewport: Viewport,
    momentum: Momentum,
    touch: TouchTracker,
    header_static: bool,
    header_value: String,
    needs_redraw: bool,
    last_error: Option<ListError>,
}

impl<L: DirectoryLister, V: VariableStore> FileSelector<L, V> {
    /// Build a selector and perform the initial listing.
    ///
    /// Configured defaults are written to the store first. If the stored
    /// path cannot be listed the selector falls back to the storage root.
    pub fn new(
        config: SelectorConfig,
        metrics: RowMetrics,
        area: Rect,
        lister: L,
        mut vars: V,
    ) -> Self {
        if let Some(path) = &config.path_default {
            vars.set(&config.path_var, path);
        }
        if let (Some(name), Some(value)) = (&config.result_var, &config.result_default) {
            vars.set(name, value);
        }
        if let (Some(name), Some(mode)) = (&config.sort_var, config.sort_default) {
            vars.set(name, &mode.code().to_string());
        }

        let header_static = !is_template(&config.header_text);
        let header_value = expand(&config.header_text, &vars);
        let header_height = metrics.header_height();
        let content = area.split_top(header_height).1;

        let mut selector = Self {
            viewport: Viewport::new(metrics.row_height(), content.height),
            touch: TouchTracker::new(metrics.debounce()),
            momentum: Momentum::new(),
            sort_mode: SortMode::default(),
            containers: Vec::new(),
            leaves: Vec::new(),
            needs_redraw: true,
            last_error: None,
            config,
            lister,
            vars,
            area,
            header_height,
            header_static,
            header_value,
        };
        selector.sort_mode = selector.read_sort_mode();
        selector.load_with_fallback();
        selector
    }

    // --- Queries ---

    /// Number of entries in the logical list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len() + self.leaves.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry at logical `index`: containers first, then leaves.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<LogicalEntry<'_>> {
        if let Some(entry) = self.containers.get(index) {
            return Some(LogicalEntry::Container(entry));
        }
        self.leaves
            .get(index - self.containers.len())
            .map(LogicalEntry::Leaf)
    }

    /// Sorted directories.
    #[must_use]
    pub fn containers(&self) -> &[Entry] {
        &self.containers
    }

    /// Sorted files.
    #[must_use]
    pub fn leaves(&self) -> &[Entry] {
        &self.leaves
    }

    /// Rows intersecting the content area, top to bottom.
    #[must_use]
    pub fn rows(&self) -> Vec<RowLayout<'_>> {
        let content = self.content_area();
        let height = self.viewport.row_height();
        self.viewport
            .render_range(self.len())
            .filter_map(|index| {
                let entry = self.entry(index)?;
                Some(RowLayout {
                    index,
                    top: content.y + self.viewport.row_top(index),
                    height,
                    entry,
                    label: entry.entry().label(),
                })
            })
            .collect()
    }

    /// Expanded header text.
    #[must_use]
    pub fn header_text(&self) -> &str {
        &self.header_value
    }

    /// The whole widget area.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// The header band.
    #[must_use]
    pub fn header_area(&self) -> Rect {
        self.area.split_top(self.header_height).0
    }

    /// The area rows are drawn in, below the header.
    #[must_use]
    pub fn content_area(&self) -> Rect {
        self.area.split_top(self.header_height).1
    }

    /// Scroll position.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Momentum state.
    #[must_use]
    pub fn momentum(&self) -> &Momentum {
        &self.momentum
    }

    /// Current touch phase.
    #[must_use]
    pub fn touch_phase(&self) -> TouchPhase {
        self.touch.phase()
    }

    /// Active sort mode.
    #[must_use]
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// The displayed directory, as stored in the path variable.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.vars.get(&self.config.path_var)
    }

    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    #[must_use]
    pub fn vars(&self) -> &V {
        &self.vars
    }

    /// Mutable store access. Call [`Self::on_variable_changed`] after
    /// writing a variable the selector watches.
    pub fn vars_mut(&mut self) -> &mut V {
        &mut self.vars
    }

    #[must_use]
    pub fn lister(&self) -> &L {
        &self.lister
    }

    pub fn lister_mut(&mut self) -> &mut L {
        &mut self.lister
    }

    /// Whether the widget changed since the last [`Self::on_tick`].
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// The most recent listing failure, if not yet taken.
    #[must_use]
    pub fn last_error(&self) -> Option<&ListError> {
        self.last_error.as_ref()
    }

    /// Take the most recent listing failure.
    pub fn take_error(&mut self) -> Option<ListError> {
        self.last_error.take()
    }

    // --- Events ---

    /// Convenience for consoles that report touches as raw triples.
    pub fn on_touch_at(&mut self, kind: TouchEventKind, x: i32, y: i32) -> Option<Selection> {
        self.on_touch(TouchEvent::new(kind, x, y))
    }

    /// Handle one touch report. Returns the selection a tap resolved to.
    pub fn on_touch(&mut self, event: TouchEvent) -> Option<Selection> {
        let content = self.content_area();
        match self.touch.handle(event, content, self.momentum.is_active()) {
            TouchOutcome::Began => {
                self.momentum.cancel();
                None
            }
            TouchOutcome::Scroll(delta) => {
                self.viewport.scroll_by(delta, self.len());
                self.needs_redraw = true;
                None
            }
            TouchOutcome::Tap(y) => {
                let index = self.viewport.row_at(y, self.len())?;
                self.resolve_selection(index)
            }
            TouchOutcome::Fling(velocity) => {
                rcui_core::debug!(velocity, "fling");
                self.momentum.fling(velocity);
                None
            }
            TouchOutcome::Settled | TouchOutcome::Ignored => None,
        }
    }

    /// Advance one frame: refresh a templated header and step momentum.
    ///
    /// Returns `true` when the widget needs to be redrawn.
    pub fn on_tick(&mut self) -> bool {
        self.refresh_header();
        let total = self.len();
        if self.momentum.tick(&mut self.viewport, total) {
            self.needs_redraw = true;
        }
        std::mem::take(&mut self.needs_redraw)
    }

    /// React to a store variable change.
    ///
    /// An empty `name` is a broadcast and clears the result variable. A
    /// change to the path or sort variable re-reads both and relists.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn on_variable_changed(&mut self, name: &str, value: &str) {
        if name.is_empty() {
            if let Some(result) = &self.config.result_var {
                self.vars.set(result, "");
            }
        }

        if self.refresh_header() {
            self.settle();
        }

        let watched = name == self.config.path_var
            || self.config.sort_var.as_deref().is_some_and(|sort| sort == name);
        if !watched {
            return;
        }

        rcui_core::debug!(name, value, "selector variable changed");
        // The path is always re-read: a sort change reports the sort code.
        let path = self.current_path();
        self.sort_mode = self.read_sort_mode();
        match self.fetch(&path) {
            Ok(listing) => self.install(listing),
            Err(err) => {
                rcui_core::warn!(path = %path, error = %err, "relisting failed");
                self.install(Listing::default());
                self.last_error = Some(err);
            }
        }
    }

    /// Relist when the selector's page is shown.
    pub fn on_focus_gained(&mut self) {
        self.load_with_fallback();
    }

    /// Move the widget. A zero width and height keep the current size.
    pub fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.area = if width != 0 || height != 0 {
            Rect::new(x, y, width, height)
        } else {
            Rect::new(x, y, self.area.width, self.area.height)
        };
        let content = self.content_area();
        self.viewport.set_height(content.height, self.len());
        self.needs_redraw = true;
    }

    // --- Selection ---

    /// Act on the entry at logical `index` as if it had been tapped.
    ///
    /// Returns `None` when nothing happens: out of range, the `.` entry, or
    /// a file while no result variable is configured.
    pub fn resolve_selection(&mut self, index: usize) -> Option<Selection> {
        let cwd = self.current_path();

        if let Some(entry) = self.containers.get(index) {
            if entry.is_self_link() {
                return None;
            }
            let target = if entry.is_parent_link() {
                parent_path(&cwd)
            } else {
                let name = entry.name.clone();
                if let Some(selection) = &self.config.selection_var {
                    self.vars.set(selection, &name);
                }
                child_path(&cwd, &name)
            };

            if !self.config.shows_nav() && !self.config.shows_leaves() {
                if let Some(result) = &self.config.result_var {
                    self.vars.set(result, &target);
                }
                return Some(Selection::FolderChosen { path: target });
            }
            return Some(self.navigate(target));
        }

        let leaf = self.leaves.get(index - self.containers.len())?;
        let result = self.config.result_var.as_ref()?;
        let name = leaf.name.clone();
        if let Some(selection) = &self.config.selection_var {
            self.vars.set(selection, &name);
        }
        let path = child_path(&cwd, &name);
        self.vars.set(result, &path);
        Some(Selection::FileChosen { path })
    }

    // --- Internals ---

    fn navigate(&mut self, target: String) -> Selection {
        match self.fetch(&target) {
            Ok(listing) => {
                self.vars.set(&self.config.path_var, &target);
                self.install(listing);
                Selection::Navigated { path: target }
            }
            Err(err) => {
                rcui_core::error!(path = %target, error = %err, "unable to change folders");
                self.settle();
                self.last_error = Some(err.clone());
                Selection::NavigationFailed {
                    path: target,
                    error: err,
                }
            }
        }
    }

    /// List the stored path, falling back to the storage root once.
    fn load_with_fallback(&mut self) {
        let path = self.current_path();
        let err = match self.fetch(&path) {
            Ok(listing) => {
                self.install(listing);
                return;
            }
            Err(err) => err,
        };

        if !self.config.shows_containers() && !self.config.shows_leaves() {
            self.install(Listing::default());
            self.last_error = Some(err);
            return;
        }

        let root = self.vars.storage_root();
        rcui_core::warn!(path = %path, root = %root, error = %err, "falling back to storage root");
        match self.fetch(&root) {
            Ok(listing) => {
                self.vars.set(&self.config.path_var, &root);
                self.install(listing);
            }
            Err(err) => {
                rcui_core::error!(root = %root, error = %err, "storage root cannot be listed");
                self.install(Listing::default());
                self.last_error = Some(err);
            }
        }
    }

    fn fetch(&self, path: &str) -> Result<Listing, ListError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "file_selector.list",
            path = path,
            sort = self.sort_mode.code()
        )
        .entered();

        let mut listing = self.lister.list(path, &self.config.filter)?;
        sort_entries(&mut listing.containers, self.sort_mode);
        sort_entries(&mut listing.leaves, self.sort_mode);
        rcui_core::debug!(
            path,
            containers = listing.containers.len(),
            leaves = listing.leaves.len(),
            "sorted listing"
        );
        Ok(listing)
    }

    fn install(&mut self, listing: Listing) {
        self.containers = listing.containers;
        self.leaves = listing.leaves;
        self.settle();
    }

    /// Back to the top, at rest.
    fn settle(&mut self) {
        self.viewport.reset();
        self.momentum.cancel();
        self.needs_redraw = true;
    }

    fn read_sort_mode(&self) -> SortMode {
        self.config
            .sort_var
            .as_deref()
            .map(|name| SortMode::parse(&self.vars.get(name)))
            .unwrap_or_default()
    }

    /// Re-expand a templated header. Returns `true` if the text changed.
    fn refresh_header(&mut self) -> bool {
        if self.header_static {
            return false;
        }
        let value = expand(&self.config.header_text, &self.vars);
        if value == self.header_value {
            return false;
        }
        self.header_value = value;
        self.needs_redraw = true;
        true
    }
}
