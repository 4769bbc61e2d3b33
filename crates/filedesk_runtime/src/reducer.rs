//! Router actions, side-effect intents, and the pure transition engine.

use platform_host::FetchError;

use crate::model::{
    NavigationError, NavigationTrigger, PageName, Placeholder, RouteTable, RouterPhase,
    RouterState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inputs accepted by [`reduce_router`].
pub enum RouterAction {
    /// Start a navigation.
    Navigate {
        /// Requested page.
        page: PageName,
        /// What requested it.
        trigger: NavigationTrigger,
    },
    /// The browser reported an address-fragment change.
    HashChanged {
        /// New fragment, without the leading `#`.
        hash: String,
    },
    /// A fragment fetch finished.
    FragmentLoaded {
        /// Page the fragment belongs to.
        page: PageName,
        /// Attempt that started the fetch.
        attempt: u64,
        /// Fragment body.
        body: String,
    },
    /// A fragment fetch failed.
    FragmentFailed {
        /// Page the fragment belongs to.
        page: PageName,
        /// Attempt that started the fetch.
        attempt: u64,
        /// Failure.
        error: FetchError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side effects requested by [`reduce_router`], in execution order.
pub enum RouterEffect {
    /// Fetch a fragment and report back with the same attempt.
    FetchFragment {
        /// Page being loaded.
        page: PageName,
        /// Fragment URL.
        url: String,
        /// Attempt number.
        attempt: u64,
    },
    /// Replace the container content with a fragment body.
    ReplaceContent(String),
    /// Replace the container content with a failure placeholder.
    ShowPlaceholder(Placeholder),
    /// Write the address fragment.
    SetLocationHash(PageName),
    /// Mark the navigation item of this page as active.
    HighlightNavigation(PageName),
    /// Broadcast the page activation.
    EmitActivation(PageName),
    /// Report a failed navigation.
    LogError(NavigationError),
    /// Report a superseded fetch completion.
    LogStale {
        /// Page of the discarded completion.
        page: PageName,
        /// Its attempt number.
        attempt: u64,
    },
}

/// Applies a [`RouterAction`] and returns the effects the driver must run.
///
/// Every navigation bumps the attempt counter, so only the completion of the latest attempt
/// renders; older completions yield [`RouterEffect::LogStale`] and nothing else. A
/// `HashChanged` equal to the hash the router just wrote is its own echo and is ignored, as is a
/// change to an empty or unrouted hash.
pub fn reduce_router(
    state: &mut RouterState,
    table: &RouteTable,
    action: RouterAction,
) -> Vec<RouterEffect> {
    match action {
        RouterAction::Navigate { page, .. } => {
            state.attempt += 1;
            let Some(entry) = table.resolve(page.as_str()) else {
                state.phase = RouterPhase::Error;
                return vec![
                    RouterEffect::ShowPlaceholder(Placeholder::NotFound),
                    RouterEffect::LogError(NavigationError::UnknownPage(page)),
                ];
            };
            let url = entry.fragment.clone();
            state.phase = RouterPhase::Loading {
                page: page.clone(),
                attempt: state.attempt,
            };
            vec![RouterEffect::FetchFragment {
                page,
                url,
                attempt: state.attempt,
            }]
        }
        RouterAction::HashChanged { hash } => {
            if state.synced_hash.take().as_deref() == Some(hash.as_str()) {
                return Vec::new();
            }
            if hash.is_empty() || table.resolve(&hash).is_none() {
                return Vec::new();
            }
            reduce_router(
                state,
                table,
                RouterAction::Navigate {
                    page: PageName::new(hash),
                    trigger: NavigationTrigger::HashChange,
                },
            )
        }
        RouterAction::FragmentLoaded {
            page,
            attempt,
            body,
        } => {
            if attempt != state.attempt {
                return vec![RouterEffect::LogStale { page, attempt }];
            }
            state.phase = RouterPhase::Active(page.clone());
            state.synced_hash = Some(page.as_str().to_string());
            vec![
                RouterEffect::ReplaceContent(body),
                RouterEffect::SetLocationHash(page.clone()),
                RouterEffect::HighlightNavigation(page.clone()),
                RouterEffect::EmitActivation(page),
            ]
        }
        RouterAction::FragmentFailed {
            page,
            attempt,
            error,
        } => {
            if attempt != state.attempt {
                return vec![RouterEffect::LogStale { page, attempt }];
            }
            state.phase = RouterPhase::Error;
            vec![
                RouterEffect::ShowPlaceholder(Placeholder::LoadFailed),
                RouterEffect::LogError(NavigationError::Fetch {
                    page,
                    source: error,
                }),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::RouteEntry;

    fn table() -> RouteTable {
        RouteTable::new(["upload", "myfile", "stats"].map(|page| RouteEntry {
            page: PageName::new(page),
            fragment: format!("/pages/{page}.html"),
            label: page.to_string(),
            icon: "file".to_string(),
        }))
    }

    fn navigate(page: &str) -> RouterAction {
        RouterAction::Navigate {
            page: PageName::new(page),
            trigger: NavigationTrigger::Link,
        }
    }

    fn loaded(page: &str, attempt: u64) -> RouterAction {
        RouterAction::FragmentLoaded {
            page: PageName::new(page),
            attempt,
            body: format!("<h2>{page}</h2>"),
        }
    }

    #[test]
    fn navigate_to_known_page_fetches_its_fragment() {
        let mut state = RouterState::default();

        let effects = reduce_router(&mut state, &table(), navigate("myfile"));

        assert_eq!(
            effects,
            vec![RouterEffect::FetchFragment {
                page: PageName::new("myfile"),
                url: "/pages/myfile.html".to_string(),
                attempt: 1,
            }]
        );
        assert_eq!(
            state.phase,
            RouterPhase::Loading {
                page: PageName::new("myfile"),
                attempt: 1
            }
        );
    }

    #[test]
    fn successful_load_renders_then_syncs_hash_highlight_and_activation() {
        let mut state = RouterState::default();
        reduce_router(&mut state, &table(), navigate("stats"));

        let effects = reduce_router(&mut state, &table(), loaded("stats", 1));

        let stats = PageName::new("stats");
        assert_eq!(
            effects,
            vec![
                RouterEffect::ReplaceContent("<h2>stats</h2>".to_string()),
                RouterEffect::SetLocationHash(stats.clone()),
                RouterEffect::HighlightNavigation(stats.clone()),
                RouterEffect::EmitActivation(stats.clone()),
            ]
        );
        assert_eq!(state.active_page(), Some(&stats));
    }

    #[test]
    fn unknown_page_shows_not_found_without_hash_or_activation() {
        let mut state = RouterState::default();

        let effects = reduce_router(&mut state, &table(), navigate("missing"));

        assert_eq!(
            effects,
            vec![
                RouterEffect::ShowPlaceholder(Placeholder::NotFound),
                RouterEffect::LogError(NavigationError::UnknownPage(PageName::new("missing"))),
            ]
        );
        assert_eq!(state.phase, RouterPhase::Error);
    }

    #[test]
    fn fetch_failure_shows_load_failed_placeholder() {
        let mut state = RouterState::default();
        reduce_router(&mut state, &table(), navigate("upload"));

        let effects = reduce_router(
            &mut state,
            &table(),
            RouterAction::FragmentFailed {
                page: PageName::new("upload"),
                attempt: 1,
                error: FetchError::Status(503),
            },
        );

        assert_eq!(effects[0], RouterEffect::ShowPlaceholder(Placeholder::LoadFailed));
        assert!(matches!(
            effects[1],
            RouterEffect::LogError(NavigationError::Fetch { .. })
        ));
        assert_eq!(state.synced_hash, None);
    }

    #[test]
    fn only_the_latest_attempt_may_render() {
        let mut state = RouterState::default();
        reduce_router(&mut state, &table(), navigate("myfile"));
        reduce_router(&mut state, &table(), navigate("stats"));

        let late = reduce_router(&mut state, &table(), loaded("stats", 2));
        let stale = reduce_router(&mut state, &table(), loaded("myfile", 1));

        assert_eq!(late.len(), 4);
        assert_eq!(
            stale,
            vec![RouterEffect::LogStale {
                page: PageName::new("myfile"),
                attempt: 1
            }]
        );
        assert_eq!(state.active_page(), Some(&PageName::new("stats")));
    }

    #[test]
    fn repeated_navigation_to_the_active_page_refetches() {
        let mut state = RouterState::default();
        reduce_router(&mut state, &table(), navigate("myfile"));
        reduce_router(&mut state, &table(), loaded("myfile", 1));

        let effects = reduce_router(&mut state, &table(), navigate("myfile"));

        assert!(matches!(
            effects.as_slice(),
            [RouterEffect::FetchFragment { attempt: 2, .. }]
        ));
    }

    #[test]
    fn hash_echo_is_ignored_once_and_external_changes_navigate() {
        let mut state = RouterState::default();
        reduce_router(&mut state, &table(), navigate("myfile"));
        reduce_router(&mut state, &table(), loaded("myfile", 1));

        let echo = reduce_router(
            &mut state,
            &table(),
            RouterAction::HashChanged {
                hash: "myfile".to_string(),
            },
        );
        let back = reduce_router(
            &mut state,
            &table(),
            RouterAction::HashChanged {
                hash: "upload".to_string(),
            },
        );

        assert!(echo.is_empty());
        assert!(matches!(
            back.as_slice(),
            [RouterEffect::FetchFragment { attempt: 2, .. }]
        ));
    }

    #[test]
    fn unrouted_hash_changes_are_ignored() {
        let mut state = RouterState::default();

        for hash in ["", "nowhere"] {
            let effects = reduce_router(
                &mut state,
                &table(),
                RouterAction::HashChanged {
                    hash: hash.to_string(),
                },
            );
            assert!(effects.is_empty());
        }
        assert_eq!(state.attempt, 0);
    }
}
