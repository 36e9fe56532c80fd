#![forbid(unsafe_code)]

//! Entry ordering.
//!
//! [`SortMode`] is decoded from the signed integer stored in the sort
//! variable. [`compare`] is a total order: sentinels are ranked in tiers
//! below every regular entry, so `.` and `..` stay pinned to the top
//! without breaking the guarantees `slice::sort_by` relies on.

use std::cmp::Ordering;

use crate::entry::Entry;

/// How to order entries within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Case-insensitive name, A to Z (code `1`).
    #[default]
    NameAsc,
    /// Case-insensitive name, Z to A (code `-1`).
    NameDesc,
    /// Modification time, newest first (code `2`).
    DateNewest,
    /// Modification time, oldest first (code `-2`).
    DateOldest,
    /// Size, largest first (code `3`).
    SizeLargest,
    /// Size, smallest first (code `-3`).
    SizeSmallest,
}

impl SortMode {
    /// Decode a sort variable value. Unknown codes sort by name ascending.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            -1 => Self::NameDesc,
            2 => Self::DateNewest,
            -2 => Self::DateOldest,
            3 => Self::SizeLargest,
            -3 => Self::SizeSmallest,
            _ => Self::NameAsc,
        }
    }

    /// Parse the textual form stored in the variable store.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        value
            .trim()
            .parse::<i32>()
            .map(Self::from_code)
            .unwrap_or_default()
    }

    /// The integer code for this mode.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::NameAsc => 1,
            Self::NameDesc => -1,
            Self::DateNewest => 2,
            Self::DateOldest => -2,
            Self::SizeLargest => 3,
            Self::SizeSmallest => -3,
        }
    }

    /// Direction of the name tie-break used by this mode.
    const fn name_direction(self) -> Direction {
        match self {
            Self::NameAsc | Self::DateNewest | Self::SizeLargest => Direction::Ascending,
            Self::NameDesc | Self::DateOldest | Self::SizeSmallest => Direction::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }
}

/// Pinning tier: lower tiers sort first regardless of mode.
fn tier(entry: &Entry) -> u8 {
    if entry.is_self_link() {
        0
    } else if entry.is_parent_link() {
        1
    } else {
        2
    }
}

/// ASCII case-insensitive name comparison.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Compare two entries under `mode`.
#[must_use]
pub fn compare(a: &Entry, b: &Entry, mode: SortMode) -> Ordering {
    let pinned = tier(a).cmp(&tier(b));
    if pinned != Ordering::Equal || tier(a) < 2 {
        return pinned;
    }

    let by_name = || mode.name_direction().apply(compare_names(&a.name, &b.name));
    match mode {
        SortMode::NameAsc | SortMode::NameDesc => by_name(),
        SortMode::DateNewest => b.modified.cmp(&a.modified).then_with(by_name),
        SortMode::DateOldest => a.modified.cmp(&b.modified).then_with(by_name),
        SortMode::SizeLargest | SortMode::SizeSmallest => {
            // Directory sizes say nothing about their contents. Directories
            // order by name and ahead of files so mixed input stays total.
            match (a.is_dir(), b.is_dir()) {
                (true, true) => return by_name(),
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                (false, false) => {}
            }
            let ord = a.size.cmp(&b.size);
            let ord = if mode == SortMode::SizeLargest {
                ord.reverse()
            } else {
                ord
            };
            ord.then_with(by_name)
        }
    }
}

/// Sort a collection in place.
pub fn sort_entries(entries: &mut [Entry], mode: SortMode) {
    entries.sort_by(|a, b| compare(a, b, mode));
}
