//! Browser host wiring: backend adapters, the router's DOM view, and the `hashchange` listener.

use std::rc::Rc;

use html_escape::encode_text;
use leptos::{
    ev, html, logging, on_cleanup, spawn_local, window, window_event_listener, NodeRef, RwSignal,
    SignalSet,
};
use platform_host::{FileApiService, FragmentSource, ToastService};
use platform_host_web::{file_api_service, fragment_source, host_strategy_name, toast_service};

use crate::config::AppConfig;
use crate::model::{NavigationTrigger, PageName, Placeholder};
use crate::router::{Router, RouterView};

#[derive(Clone)]
/// Backend adapters selected for the current build.
pub struct FiledeskHostContext {
    files: Rc<dyn FileApiService>,
    fragments: Rc<dyn FragmentSource>,
    toasts: Rc<dyn ToastService>,
    host_strategy_name: &'static str,
}

impl FiledeskHostContext {
    /// Builds the adapters for `config`'s endpoints.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            files: Rc::new(file_api_service(config.endpoints())),
            fragments: Rc::new(fragment_source()),
            toasts: Rc::new(toast_service()),
            host_strategy_name: host_strategy_name(),
        }
    }

    /// Backend file API.
    pub fn file_api_service(&self) -> Rc<dyn FileApiService> {
        self.files.clone()
    }

    /// Page fragment loader.
    pub fn fragment_source(&self) -> Rc<dyn FragmentSource> {
        self.fragments.clone()
    }

    /// Toast widget.
    pub fn toast_service(&self) -> Rc<dyn ToastService> {
        self.toasts.clone()
    }

    /// `browser` or `offline`.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy_name
    }
}

/// Markup of a navigation failure placeholder.
pub fn placeholder_html(placeholder: Placeholder) -> String {
    format!(
        r#"<div class="page-placeholder"><h1>{}</h1><p>{}</p></div>"#,
        encode_text(placeholder.heading()),
        encode_text(placeholder.detail()),
    )
}

#[derive(Clone, Copy)]
/// [`RouterView`] over the `<main>` container and the sidebar highlight signal.
pub struct BrowserRouterView {
    container: NodeRef<html::Main>,
    active_page: RwSignal<Option<String>>,
}

impl BrowserRouterView {
    /// Binds the view to the page container and the highlighted page signal.
    pub fn new(container: NodeRef<html::Main>, active_page: RwSignal<Option<String>>) -> Self {
        Self {
            container,
            active_page,
        }
    }
}

impl RouterView for BrowserRouterView {
    fn replace_content(&self, html: &str) {
        match self.container.get_untracked() {
            Some(main) => main.set_inner_html(html),
            None => logging::warn!("page container is not mounted"),
        }
    }

    fn show_placeholder(&self, placeholder: Placeholder) {
        self.replace_content(&placeholder_html(placeholder));
    }

    fn set_location_hash(&self, page: &PageName) {
        if let Err(err) = window().location().set_hash(page.as_str()) {
            logging::warn!("failed to set location hash: {err:?}");
        }
    }

    fn highlight_navigation(&self, page: &PageName) {
        self.active_page.set(Some(page.as_str().to_string()));
    }
}

/// Current address fragment including the leading `#`, or empty.
pub fn current_hash() -> String {
    window().location().hash().unwrap_or_default()
}

/// Forwards `hashchange` events to `router` for the lifetime of the current reactive owner.
pub fn install_hash_listener(router: Router) {
    let listener = window_event_listener(ev::hashchange, move |_| {
        let router = router.clone();
        spawn_local(async move { router.hash_changed(&current_hash()).await });
    });
    on_cleanup(move || listener.remove());
}

/// Runs the first navigation from the current address.
pub fn start_router(router: Router, default_page: PageName) {
    spawn_local(async move {
        router.start(&current_hash(), &default_page).await;
    });
}

/// Navigates from a sidebar click.
pub fn navigate_from_link(router: Router, page: PageName) {
    spawn_local(async move {
        router.navigate(page, NavigationTrigger::Link).await;
    });
}
