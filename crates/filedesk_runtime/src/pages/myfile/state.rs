//! File list state, search, and filtering.

use std::{cell::RefCell, fmt::Display, rc::Rc};

use chrono::{NaiveDate, TimeZone};
use platform_host::{parse_timestamp, FileCategory, FileRecord};

#[derive(Debug, Default)]
struct ListState {
    all: Vec<FileRecord>,
    visible: Vec<FileRecord>,
    matches: Vec<FileRecord>,
}

#[derive(Debug, Clone, Default)]
/// Files of the "My files" page, shared between its listeners.
///
/// `visible` is what the card grid shows and what `data-file-index` refers to; `matches` backs
/// the search dropdown.
pub struct FileListState {
    inner: Rc<RefCell<ListState>>,
}

impl FileListState {
    /// Replaces the full listing and shows all of it.
    pub fn replace(&self, files: Vec<FileRecord>) {
        let mut inner = self.inner.borrow_mut();
        inner.visible = files.clone();
        inner.all = files;
        inner.matches.clear();
    }

    /// Every listed file.
    pub fn all(&self) -> Vec<FileRecord> {
        self.inner.borrow().all.clone()
    }

    /// Files in the card grid.
    pub fn visible(&self) -> Vec<FileRecord> {
        self.inner.borrow().visible.clone()
    }

    /// Card at `index`.
    pub fn visible_at(&self, index: usize) -> Option<FileRecord> {
        self.inner.borrow().visible.get(index).cloned()
    }

    /// Applies `filter` to the full listing and returns the new card grid.
    pub fn apply_filter<Tz>(&self, filter: &FileFilter, tz: &Tz) -> Vec<FileRecord>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut inner = self.inner.borrow_mut();
        inner.visible = filter_files(&inner.all, filter, tz);
        inner.visible.clone()
    }

    /// Runs a search and remembers its matches for dropdown selection.
    pub fn search(&self, keyword: &str, limit: usize) -> Vec<FileRecord> {
        let mut inner = self.inner.borrow_mut();
        inner.matches = search_files(&inner.all, keyword, limit);
        inner.matches.clone()
    }

    /// Dropdown entry at `index`.
    pub fn match_at(&self, index: usize) -> Option<FileRecord> {
        self.inner.borrow().matches.get(index).cloned()
    }
}

/// Normalizes raw search input: trimmed and lowercased.
pub fn search_keyword(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Up to `limit` files whose name contains `keyword`, ignoring case.
pub fn search_files(files: &[FileRecord], keyword: &str, limit: usize) -> Vec<FileRecord> {
    let keyword = search_keyword(keyword);
    if keyword.is_empty() {
        return Vec::new();
    }
    files
        .iter()
        .filter(|file| file.file_name.to_lowercase().contains(&keyword))
        .take(limit)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Card grid filter; every field is optional.
pub struct FileFilter {
    /// Category derived from the MIME type.
    pub category: Option<FileCategory>,
    /// First upload day, inclusive.
    pub start: Option<NaiveDate>,
    /// Last upload day, inclusive.
    pub end: Option<NaiveDate>,
}

impl FileFilter {
    /// Builds a filter from raw `<select>` / `<input type="date">` values; blanks mean unset.
    pub fn from_inputs(category: &str, start: &str, end: &str) -> Self {
        let date = |raw: &str| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok();
        Self {
            category: FileCategory::from_token(category.trim()),
            start: date(start),
            end: date(end),
        }
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Files matching `filter`, with day bounds evaluated in `tz`.
///
/// With a day bound set, files whose upload time is missing or unparseable are excluded.
pub fn filter_files<Tz>(files: &[FileRecord], filter: &FileFilter, tz: &Tz) -> Vec<FileRecord>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    files
        .iter()
        .filter(|file| {
            filter
                .category
                .map_or(true, |category| file.category() == category)
        })
        .filter(|file| {
            if filter.start.is_none() && filter.end.is_none() {
                return true;
            }
            let Some(day) = file
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .map(|created| created.with_timezone(tz).date_naive())
            else {
                return false;
            };
            filter.start.map_or(true, |start| day >= start)
                && filter.end.map_or(true, |end| day <= end)
        })
        .cloned()
        .collect()
}
