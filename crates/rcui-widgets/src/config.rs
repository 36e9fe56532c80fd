#![forbid(unsafe_code)]

//! File selector configuration.
//!
//! [`SelectorConfig`] carries the variable names and filters a selector is
//! wired with. Layouts describe these as string attributes; use
//! [`SelectorConfig::from_attributes`] to parse them with diagnostics.
//!
//! | Attribute        | Field            | Default |
//! |------------------|------------------|---------|
//! | `path.name`      | `path_var`       | `cwd`   |
//! | `path.default`   | `path_default`   | unset   |
//! | `data.name`      | `result_var`     | unset   |
//! | `data.default`   | `result_default` | unset   |
//! | `sort.name`      | `sort_var`       | unset   |
//! | `sort.default`   | `sort_default`   | unset   |
//! | `selection.name` | `selection_var`  | unset   |
//! | `filter.extn`    | extension        | none    |
//! | `filter.folders` | `CONTAINERS`     | `1`     |
//! | `filter.files`   | `LEAVES`         | `1`     |
//! | `filter.nav`     | `NAV`            | `1`     |
//! | `header.text`    | `header_text`    | empty   |

use std::fmt;

use crate::listing::{ListingFilter, ListingFlags};
use crate::sort::SortMode;
use crate::touch::debounce_for_row_height;

/// Default name of the variable holding the displayed directory.
pub const DEFAULT_PATH_VAR: &str = "cwd";

pub const ATTR_PATH_NAME: &str = "path.name";
pub const ATTR_PATH_DEFAULT: &str = "path.default";
pub const ATTR_DATA_NAME: &str = "data.name";
pub const ATTR_DATA_DEFAULT: &str = "data.default";
pub const ATTR_SORT_NAME: &str = "sort.name";
pub const ATTR_SORT_DEFAULT: &str = "sort.default";
pub const ATTR_SELECTION_NAME: &str = "selection.name";
pub const ATTR_FILTER_EXTN: &str = "filter.extn";
pub const ATTR_FILTER_FOLDERS: &str = "filter.folders";
pub const ATTR_FILTER_FILES: &str = "filter.files";
pub const ATTR_FILTER_NAV: &str = "filter.nav";
pub const ATTR_HEADER_TEXT: &str = "header.text";

/// Wiring and filtering for one file selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Variable holding the displayed directory.
    pub path_var: String,
    /// Written to `path_var` at construction.
    pub path_default: Option<String>,
    /// Variable receiving the chosen path.
    pub result_var: Option<String>,
    /// Written to `result_var` at construction.
    pub result_default: Option<String>,
    /// Variable holding the sort code.
    pub sort_var: Option<String>,
    /// Written to `sort_var` at construction.
    pub sort_default: Option<SortMode>,
    /// Variable receiving the bare name of the tapped entry.
    pub selection_var: Option<String>,
    /// Listing filter.
    pub filter: ListingFilter,
    /// Header template; `%name%` references are expanded.
    pub header_text: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            path_var: DEFAULT_PATH_VAR.to_owned(),
            path_default: None,
            result_var: None,
            result_default: None,
            sort_var: None,
            sort_default: None,
            selection_var: None,
            filter: ListingFilter::default(),
            header_text: String::new(),
        }
    }
}

/// Parsed configuration with diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfigParse {
    pub config: SelectorConfig,
    pub errors: Vec<SelectorConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl SelectorConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SelectorConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for SelectorConfigError {}

impl SelectorConfig {
    /// Set the path variable.
    #[must_use]
    pub fn path_var(mut self, name: impl Into<String>) -> Self {
        self.path_var = name.into();
        self
    }

    /// Set the initial directory.
    #[must_use]
    pub fn path_default(mut self, path: impl Into<String>) -> Self {
        self.path_default = Some(path.into());
        self
    }

    /// Set the result variable.
    #[must_use]
    pub fn result_var(mut self, name: impl Into<String>) -> Self {
        self.result_var = Some(name.into());
        self
    }

    /// Set the initial result value.
    #[must_use]
    pub fn result_default(mut self, value: impl Into<String>) -> Self {
        self.result_default = Some(value.into());
        self
    }

    /// Set the sort variable.
    #[must_use]
    pub fn sort_var(mut self, name: impl Into<String>) -> Self {
        self.sort_var = Some(name.into());
        self
    }

    /// Set the initial sort mode.
    #[must_use]
    pub fn sort_default(mut self, mode: SortMode) -> Self {
        self.sort_default = Some(mode);
        self
    }

    /// Set the selection variable.
    #[must_use]
    pub fn selection_var(mut self, name: impl Into<String>) -> Self {
        self.selection_var = Some(name.into());
        self
    }

    /// Set the listing flags, keeping the extension.
    #[must_use]
    pub fn flags(mut self, flags: ListingFlags) -> Self {
        self.filter.flags = flags;
        self
    }

    /// Restrict files to an extension.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.filter = self.filter.with_extension(extension);
        self
    }

    /// Set the header template.
    #[must_use]
    pub fn header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = text.into();
        self
    }

    /// Whether directories are listed.
    #[must_use]
    pub fn shows_containers(&self) -> bool {
        self.filter.flags.contains(ListingFlags::CONTAINERS)
    }

    /// Whether files are listed.
    #[must_use]
    pub fn shows_leaves(&self) -> bool {
        self.filter.flags.contains(ListingFlags::LEAVES)
    }

    /// Whether the "go up" entry is listed.
    #[must_use]
    pub fn shows_nav(&self) -> bool {
        self.filter.flags.contains(ListingFlags::NAV)
    }

    /// Parse from an attribute lookup.
    ///
    /// Unknown values are reported and leave the default in place.
    pub fn from_attributes<F>(get: F) -> SelectorConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        from_attributes_with(get)
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<SelectorConfigError>> {
        let mut errors = Vec::new();
        if self.path_var.is_empty() {
            errors.push(SelectorConfigError::new(
                "path_var",
                "",
                "path variable name must not be empty",
            ));
        }
        validate_name("result_var", self.result_var.as_deref(), &mut errors);
        validate_name("sort_var", self.sort_var.as_deref(), &mut errors);
        validate_name("selection_var", self.selection_var.as_deref(), &mut errors);
        if self.filter.flags.is_empty() {
            errors.push(SelectorConfigError::new(
                "filter",
                "0",
                "at least one of folders, files or nav must be shown",
            ));
        }
        if let Some(ext) = &self.filter.extension {
            if !self.shows_leaves() {
                errors.push(SelectorConfigError::new(
                    "extension",
                    ext.clone(),
                    "extension filter requires files to be shown",
                ));
            }
        }
        if self.result_default.is_some() && self.result_var.is_none() {
            errors.push(SelectorConfigError::new(
                "result_default",
                self.result_default.clone().unwrap_or_default(),
                "result_default requires result_var",
            ));
        }
        if self.sort_default.is_some() && self.sort_var.is_none() {
            errors.push(SelectorConfigError::new(
                "sort_default",
                self.sort_default.map(SortMode::code).unwrap_or_default().to_string(),
                "sort_default requires sort_var",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_name(field: &'static str, name: Option<&str>, errors: &mut Vec<SelectorConfigError>) {
    if name.is_some_and(str::is_empty) {
        errors.push(SelectorConfigError::new(
            field,
            "",
            "variable name must not be empty",
        ));
    }
}

fn from_attributes_with<F>(mut get: F) -> SelectorConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = SelectorConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ATTR_PATH_NAME) {
        if value.trim().is_empty() {
            errors.push(SelectorConfigError::new(
                "path_var",
                value,
                "expected a variable name",
            ));
        } else {
            config.path_var = value.trim().to_owned();
        }
    }
    config.path_default = get(ATTR_PATH_DEFAULT);
    config.result_var = non_empty(get(ATTR_DATA_NAME));
    config.result_default = get(ATTR_DATA_DEFAULT);
    config.sort_var = non_empty(get(ATTR_SORT_NAME));
    config.selection_var = non_empty(get(ATTR_SELECTION_NAME));

    if let Some(value) = get(ATTR_SORT_DEFAULT) {
        match value.trim().parse::<i32>() {
            Ok(code) if SortMode::from_code(code).code() == code => {
                config.sort_default = Some(SortMode::from_code(code));
            }
            _ => errors.push(SelectorConfigError::new(
                "sort_default",
                value,
                "expected 1|-1|2|-2|3|-3",
            )),
        }
    }

    if let Some(value) = get(ATTR_FILTER_EXTN) {
        config.filter = config.filter.with_extension(value);
    }

    for (attr, field, flag) in [
        (ATTR_FILTER_FOLDERS, "show_containers", ListingFlags::CONTAINERS),
        (ATTR_FILTER_FILES, "show_leaves", ListingFlags::LEAVES),
        (ATTR_FILTER_NAV, "show_nav", ListingFlags::NAV),
    ] {
        if let Some(value) = get(attr) {
            match parse_bool(&value) {
                Some(on) => config.filter.flags.set(flag, on),
                None => errors.push(SelectorConfigError::new(
                    field,
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }
    }

    if let Some(value) = get(ATTR_HEADER_TEXT) {
        config.header_text = value;
    }

    SelectorConfigParse { config, errors }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[inline]
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Pixel metrics the selector is laid out with.
///
/// Icon sizes are `(width, height)`; absent icons count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMetrics {
    pub font_height: i32,
    pub line_spacing: i32,
    pub separator_height: i32,
    /// Falls back to `separator_height` when unset.
    pub header_separator_height: Option<i32>,
    pub folder_icon: Option<(i32, i32)>,
    pub file_icon: Option<(i32, i32)>,
    pub header_icon: Option<(i32, i32)>,
}

impl RowMetrics {
    /// Metrics for a font with no icons or separators.
    #[must_use]
    pub fn new(font_height: i32) -> Self {
        Self {
            font_height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn line_spacing(mut self, spacing: i32) -> Self {
        self.line_spacing = spacing;
        self
    }

    #[must_use]
    pub fn separator_height(mut self, height: i32) -> Self {
        self.separator_height = height;
        self
    }

    #[must_use]
    pub fn header_separator_height(mut self, height: i32) -> Self {
        self.header_separator_height = Some(height);
        self
    }

    #[must_use]
    pub fn folder_icon(mut self, width: i32, height: i32) -> Self {
        self.folder_icon = Some((width, height));
        self
    }

    #[must_use]
    pub fn file_icon(mut self, width: i32, height: i32) -> Self {
        self.file_icon = Some((width, height));
        self
    }

    #[must_use]
    pub fn header_icon(mut self, width: i32, height: i32) -> Self {
        self.header_icon = Some((width, height));
        self
    }

    fn icon_height(icon: Option<(i32, i32)>) -> i32 {
        icon.map_or(0, |(_, h)| h.max(0))
    }

    fn icon_w(icon: Option<(i32, i32)>) -> i32 {
        icon.map_or(0, |(w, _)| w.max(0))
    }

    /// Height of the tallest row content before spacing.
    #[must_use]
    pub fn line_height(&self) -> i32 {
        self.font_height
            .max(Self::icon_height(self.folder_icon))
            .max(Self::icon_height(self.file_icon))
            .max(0)
    }

    /// Full row pitch, at least one pixel.
    #[must_use]
    pub fn row_height(&self) -> i32 {
        (self.line_height() + self.line_spacing.max(0) + self.separator_height.max(0)).max(1)
    }

    /// Header band height; never shorter than a row.
    #[must_use]
    pub fn header_height(&self) -> i32 {
        let separator = self
            .header_separator_height
            .unwrap_or(self.separator_height)
            .max(0);
        let content = self
            .font_height
            .max(Self::icon_height(self.header_icon))
            .max(0);
        (content + self.line_spacing.max(0) + separator).max(self.row_height())
    }

    /// Width of the icon column.
    #[must_use]
    pub fn icon_width(&self) -> i32 {
        Self::icon_w(self.folder_icon)
            .max(Self::icon_w(self.file_icon))
            .max(Self::icon_w(self.header_icon))
    }

    /// Tap debounce threshold for this row height.
    #[must_use]
    pub fn debounce(&self) -> i32 {
        debounce_for_row_height(self.row_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_list_everything_from_cwd() {
        let config = SelectorConfig::default();
        assert_eq!(config.path_var, "cwd");
        assert!(config.shows_containers());
        assert!(config.shows_leaves());
        assert!(config.shows_nav());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn attributes_parse() {
        let mut attrs = HashMap::new();
        attrs.insert(ATTR_PATH_NAME, "tw_zip_location");
        attrs.insert(ATTR_PATH_DEFAULT, "/sdcard");
        attrs.insert(ATTR_DATA_NAME, "tw_filename");
        attrs.insert(ATTR_SORT_NAME, "tw_gui_sort_order");
        attrs.insert(ATTR_SORT_DEFAULT, "-2");
        attrs.insert(ATTR_FILTER_EXTN, ".zip");
        attrs.insert(ATTR_FILTER_NAV, "0");
        attrs.insert(ATTR_HEADER_TEXT, "Location: %tw_zip_location%");

        let parsed = SelectorConfig::from_attributes(|key| attrs.get(key).map(|v| v.to_string()));
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let config = parsed.config;
        assert_eq!(config.path_var, "tw_zip_location");
        assert_eq!(config.path_default.as_deref(), Some("/sdcard"));
        assert_eq!(config.result_var.as_deref(), Some("tw_filename"));
        assert_eq!(config.sort_default, Some(SortMode::DateOldest));
        assert_eq!(config.filter.extension.as_deref(), Some(".zip"));
        assert!(config.shows_containers());
        assert!(!config.shows_nav());
        assert_eq!(config.header_text, "Location: %tw_zip_location%");
    }

    #[test]
    fn invalid_attributes_reported() {
        let mut attrs = HashMap::new();
        attrs.insert(ATTR_FILTER_FILES, "maybe");
        attrs.insert(ATTR_SORT_DEFAULT, "7");
        attrs.insert(ATTR_PATH_NAME, "  ");

        let parsed = SelectorConfig::from_attributes(|key| attrs.get(key).map(|v| v.to_string()));
        assert!(parsed.errors.iter().any(|e| e.field == "show_leaves"));
        assert!(parsed.errors.iter().any(|e| e.field == "sort_default"));
        assert!(parsed.errors.iter().any(|e| e.field == "path_var"));
        // Defaults survive bad values.
        assert!(parsed.config.shows_leaves());
        assert_eq!(parsed.config.path_var, "cwd");
    }

    #[test]
    fn error_display_has_context() {
        let err = SelectorConfigError::new("show_nav", "x", "expected bool");
        assert_eq!(err.to_string(), "show_nav=x (expected bool)");
    }

    #[test]
    fn validation_collects_all_violations() {
        let config = SelectorConfig::default()
            .path_var("")
            .flags(ListingFlags::CONTAINERS)
            .extension(".img")
            .result_default("x")
            .sort_default(SortMode::SizeLargest);
        let errors = config.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["path_var", "extension", "result_default", "sort_default"]
        );
    }

    #[test]
    fn row_height_takes_tallest_content() {
        let m = RowMetrics::new(24)
            .line_spacing(10)
            .separator_height(2)
            .folder_icon(32, 30)
            .file_icon(28, 26);
        assert_eq!(m.line_height(), 30);
        assert_eq!(m.row_height(), 42);
        assert_eq!(m.icon_width(), 32);
        assert_eq!(m.debounce(), 14);
    }

    #[test]
    fn header_height_at_least_row_height() {
        let m = RowMetrics::new(20).folder_icon(48, 48).line_spacing(4);
        assert_eq!(m.row_height(), 52);
        assert_eq!(m.header_height(), 52);

        let m = RowMetrics::new(20)
            .separator_height(1)
            .header_separator_height(6)
            .header_icon(64, 64);
        assert_eq!(m.header_height(), 70);
        assert_eq!(m.icon_width(), 64);
    }

    #[test]
    fn header_separator_falls_back_to_row_separator() {
        let m = RowMetrics::new(20).separator_height(3);
        assert_eq!(m.header_height(), 23);
    }

    #[test]
    fn degenerate_metrics_stay_positive() {
        let m = RowMetrics::default();
        assert_eq!(m.row_height(), 1);
        assert_eq!(m.debounce(), 6);
    }
}
