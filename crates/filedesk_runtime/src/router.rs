//! Router driver: runs [`reduce_router`] effects against a fragment source and a view.

use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt,
    rc::Rc,
};

use leptos::logging;
use platform_host::FragmentSource;

use crate::activation::ActivationBus;
use crate::model::{
    NavigationTrigger, PageActivation, PageName, Placeholder, RouteTable, RouterState,
};
use crate::reducer::{reduce_router, RouterAction, RouterEffect};

/// DOM boundary the router renders through.
pub trait RouterView {
    /// Replaces the page container content with a fragment body.
    fn replace_content(&self, html: &str);
    /// Replaces the page container content with a failure placeholder.
    fn show_placeholder(&self, placeholder: Placeholder);
    /// Writes the address fragment.
    fn set_location_hash(&self, page: &PageName);
    /// Marks exactly the navigation item for `page` as active.
    fn highlight_navigation(&self, page: &PageName);
}

struct RouterInner {
    table: RouteTable,
    source: Rc<dyn FragmentSource>,
    view: Rc<dyn RouterView>,
    activations: ActivationBus,
    state: RefCell<RouterState>,
}

#[derive(Clone)]
/// Hash-based page router.
///
/// Navigations may overlap; each one runs to completion, but only the latest attempt renders.
pub struct Router {
    inner: Rc<RouterInner>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("state", &self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Builds a router over a route table, fragment source, view, and activation bus.
    pub fn new(
        table: RouteTable,
        source: Rc<dyn FragmentSource>,
        view: Rc<dyn RouterView>,
        activations: ActivationBus,
    ) -> Self {
        Self {
            inner: Rc::new(RouterInner {
                table,
                source,
                view,
                activations,
                state: RefCell::new(RouterState::default()),
            }),
        }
    }

    /// Route table this router resolves against.
    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }

    /// Snapshot of the router state.
    pub fn state(&self) -> RouterState {
        self.inner.state.borrow().clone()
    }

    /// Navigates to `page`. Failures render in place and are logged; this never fails.
    pub async fn navigate(&self, page: impl Into<PageName>, trigger: NavigationTrigger) {
        self.run(RouterAction::Navigate {
            page: page.into(),
            trigger,
        })
        .await;
    }

    /// Handles a browser `hashchange` to `hash` (with or without the leading `#`).
    pub async fn hash_changed(&self, hash: &str) {
        let hash = hash.strip_prefix('#').unwrap_or(hash).to_string();
        self.run(RouterAction::HashChanged { hash }).await;
    }

    /// Initial navigation: the page named by `current_hash`, or `default_page`.
    pub async fn start(&self, current_hash: &str, default_page: &PageName) {
        let page = self.inner.table.initial_page(current_hash, default_page);
        self.navigate(page, NavigationTrigger::Initial).await;
    }

    async fn run(&self, action: RouterAction) {
        let mut pending = VecDeque::from([action]);
        while let Some(action) = pending.pop_front() {
            let effects = {
                let mut state = self.inner.state.borrow_mut();
                reduce_router(&mut state, &self.inner.table, action)
            };
            for effect in effects {
                if let Some(next) = self.apply(effect).await {
                    pending.push_back(next);
                }
            }
        }
    }

    async fn apply(&self, effect: RouterEffect) -> Option<RouterAction> {
        let view = &self.inner.view;
        match effect {
            RouterEffect::FetchFragment { page, url, attempt } => {
                let result = self.inner.source.fetch_fragment(&url).await;
                return Some(match result {
                    Ok(body) => RouterAction::FragmentLoaded {
                        page,
                        attempt,
                        body,
                    },
                    Err(error) => RouterAction::FragmentFailed {
                        page,
                        attempt,
                        error,
                    },
                });
            }
            RouterEffect::ReplaceContent(html) => view.replace_content(&html),
            RouterEffect::ShowPlaceholder(placeholder) => view.show_placeholder(placeholder),
            RouterEffect::SetLocationHash(page) => view.set_location_hash(&page),
            RouterEffect::HighlightNavigation(page) => view.highlight_navigation(&page),
            RouterEffect::EmitActivation(page) => {
                self.inner.activations.emit(&PageActivation { page });
            }
            RouterEffect::LogError(err) => logging::error!("navigation failed: {err}"),
            RouterEffect::LogStale { page, attempt } => {
                logging::log!("discarding stale fragment for {page} (attempt {attempt})");
            }
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One call recorded by [`MemoryRouterView`].
pub enum ViewCall {
    /// `replace_content`.
    Content(String),
    /// `show_placeholder`.
    Placeholder(Placeholder),
    /// `set_location_hash`.
    Hash(String),
    /// `highlight_navigation`.
    Highlight(String),
}

#[derive(Debug, Clone, Default)]
/// Router view that keeps the container content, hash, and highlight in memory.
pub struct MemoryRouterView {
    calls: Rc<RefCell<Vec<ViewCall>>>,
}

impl MemoryRouterView {
    /// Every call so far, oldest first.
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }

    /// Current container content.
    pub fn content(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            ViewCall::Content(html) => Some(html.clone()),
            ViewCall::Placeholder(placeholder) => Some(placeholder.heading().to_string()),
            _ => None,
        })
    }

    /// Current address fragment.
    pub fn hash(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            ViewCall::Hash(hash) => Some(hash.clone()),
            _ => None,
        })
    }

    /// Currently highlighted page.
    pub fn highlighted(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            ViewCall::Highlight(page) => Some(page.clone()),
            _ => None,
        })
    }
}

impl RouterView for MemoryRouterView {
    fn replace_content(&self, html: &str) {
        self.calls
            .borrow_mut()
            .push(ViewCall::Content(html.to_string()));
    }

    fn show_placeholder(&self, placeholder: Placeholder) {
        self.calls
            .borrow_mut()
            .push(ViewCall::Placeholder(placeholder));
    }

    fn set_location_hash(&self, page: &PageName) {
        self.calls
            .borrow_mut()
            .push(ViewCall::Hash(page.as_str().to_string()));
    }

    fn highlight_navigation(&self, page: &PageName) {
        self.calls
            .borrow_mut()
            .push(ViewCall::Highlight(page.as_str().to_string()));
    }
}
