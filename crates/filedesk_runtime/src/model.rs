//! Router domain types: page names, the route table, router state, and navigation errors.

use std::fmt;

use platform_host::FetchError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Logical page name; doubles as the address fragment.
pub struct PageName(String);

impl PageName {
    /// Wraps a page name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrowed name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One routed page.
pub struct RouteEntry {
    /// Logical page name.
    pub page: PageName,
    /// Fragment URL path.
    pub fragment: String,
    /// Sidebar label.
    pub label: String,
    /// Sidebar icon token.
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Read-only mapping from page name to fragment URL, in sidebar order.
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Builds a table; a later duplicate page name is ignored.
    pub fn new(entries: impl IntoIterator<Item = RouteEntry>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            if table.resolve(entry.page.as_str()).is_none() {
                table.entries.push(entry);
            }
        }
        table
    }

    /// Entries in sidebar order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Looks up a page.
    pub fn resolve(&self, page: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.page.as_str() == page)
    }

    /// Page to open on startup: the hash when it names a routed page, otherwise `default`.
    ///
    /// A leading `#` on `hash` is ignored.
    pub fn initial_page(&self, hash: &str, default: &PageName) -> PageName {
        let hash = hash.strip_prefix('#').unwrap_or(hash);
        match self.resolve(hash) {
            Some(entry) if !hash.is_empty() => entry.page.clone(),
            _ => default.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What started a navigation.
pub enum NavigationTrigger {
    /// Sidebar link click.
    Link,
    /// External address-fragment change (back/forward, edited URL).
    HashChange,
    /// First navigation after boot.
    Initial,
    /// Programmatic call.
    Api,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Router state machine phase.
pub enum RouterPhase {
    /// No navigation yet.
    #[default]
    Idle,
    /// Fragment fetch in flight.
    Loading {
        /// Page being loaded.
        page: PageName,
        /// Attempt number of this load.
        attempt: u64,
    },
    /// Page rendered and activated.
    Active(PageName),
    /// Last navigation failed; a placeholder is shown.
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Router state owned by [`crate::Router`] and updated by [`crate::reduce_router`].
pub struct RouterState {
    /// Current phase.
    pub phase: RouterPhase,
    /// Latest navigation attempt; only its completion may render.
    pub attempt: u64,
    /// Hash the router wrote whose `hashchange` echo has not arrived yet.
    pub synced_hash: Option<String>,
}

impl RouterState {
    /// Page currently active, if any.
    pub fn active_page(&self) -> Option<&PageName> {
        match &self.phase {
            RouterPhase::Active(page) => Some(page),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// In-place placeholder rendered when a navigation fails.
pub enum Placeholder {
    /// The page name is not routed.
    NotFound,
    /// The fragment fetch failed.
    LoadFailed,
}

impl Placeholder {
    /// Heading line.
    pub const fn heading(self) -> &'static str {
        match self {
            Self::NotFound => "404 - Page not found",
            Self::LoadFailed => "Failed to load page",
        }
    }

    /// Detail line.
    pub const fn detail(self) -> &'static str {
        match self {
            Self::NotFound => "Please check that the address is correct",
            Self::LoadFailed => "Please try again later",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Terminal failure of one navigation attempt.
pub enum NavigationError {
    /// The requested page is not in the route table.
    #[error("page not found: {0}")]
    UnknownPage(PageName),
    /// The fragment could not be fetched.
    #[error("failed to load page {page}: {source}")]
    Fetch {
        /// Page whose fragment failed.
        page: PageName,
        /// Underlying fetch failure.
        #[source]
        source: FetchError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Broadcast once a page fragment is on screen.
pub struct PageActivation {
    /// Page that became active.
    pub page: PageName,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(page: &str) -> RouteEntry {
        RouteEntry {
            page: PageName::new(page),
            fragment: format!("/pages/{page}.html"),
            label: page.to_string(),
            icon: "file".to_string(),
        }
    }

    #[test]
    fn initial_page_prefers_a_routed_hash() {
        let table = RouteTable::new([entry("upload"), entry("myfile")]);
        let default = PageName::new("myfile");

        assert_eq!(table.initial_page("#upload", &default), PageName::new("upload"));
        assert_eq!(table.initial_page("upload", &default), PageName::new("upload"));
        assert_eq!(table.initial_page("#nope", &default), default);
        assert_eq!(table.initial_page("", &default), default);
    }

    #[test]
    fn duplicate_pages_keep_the_first_entry() {
        let mut second = entry("myfile");
        second.fragment = "/other.html".to_string();
        let table = RouteTable::new([entry("myfile"), second]);

        assert_eq!(table.entries().len(), 1);
        assert_eq!(
            table.resolve("myfile").map(|entry| entry.fragment.as_str()),
            Some("/pages/myfile.html")
        );
    }

    #[test]
    fn navigation_errors_render_their_cause() {
        let err = NavigationError::Fetch {
            page: PageName::new("stats"),
            source: FetchError::Status(500),
        };

        assert_eq!(
            err.to_string(),
            "failed to load page stats: HTTP error! status: 500"
        );
    }
}
