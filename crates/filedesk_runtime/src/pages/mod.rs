//! Per-page handlers bound to the fragment the router just mounted.
//!
//! The [`PageRegistry`] listens on the [`ActivationBus`]; each activation ends the previous
//! page's [`PageSession`] (detaching its listeners) and starts the next page's one.

pub mod myfile;
pub mod stats;
pub mod upload;

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use filedesk_dialog::FileDialogs;
use leptos::logging;
use platform_host::{ApiEndpoints, FileApiService};
use platform_host_web::EventListenerGuard;
use web_sys::Event;

use crate::activation::{ActivationBus, Subscription};
use crate::config::UiConfig;
use crate::model::PageActivation;
use crate::preview::PreviewPresenter;
use crate::toast::Toaster;

#[derive(Clone)]
/// Services shared by every page handler.
pub struct PageServices {
    /// Backend file API.
    pub files: Rc<dyn FileApiService>,
    /// Modal dialogs.
    pub dialogs: Rc<dyn FileDialogs>,
    /// Toast notifier.
    pub toaster: Toaster,
    /// Preview overlay.
    pub preview: Rc<dyn PreviewPresenter>,
    /// Backend URL layout, used for download links.
    pub endpoints: ApiEndpoints,
    /// UI tuning values.
    pub ui: UiConfig,
}

impl fmt::Debug for PageServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageServices")
            .field("toaster", &self.toaster)
            .field("endpoints", &self.endpoints)
            .field("ui", &self.ui)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
/// Listeners and cleanup hooks owned by the active page; dropping it detaches everything.
pub struct PageSession {
    guards: Vec<EventListenerGuard>,
    cleanups: Vec<Box<dyn FnOnce()>>,
}

impl fmt::Debug for PageSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSession")
            .field("listeners", &self.guards.len())
            .field("cleanups", &self.cleanups.len())
            .finish()
    }
}

impl PageSession {
    /// Attaches `handler` to the element with `id`; a missing element is logged and skipped.
    pub fn bind_id(&mut self, id: &str, event: &'static str, handler: impl FnMut(Event) + 'static) {
        match dom::element_by_id::<web_sys::EventTarget>(id) {
            Some(target) => self.bind(&target, event, handler),
            None => logging::warn!("#{id} is missing; {event} not bound"),
        }
    }

    /// Attaches `handler` to the document.
    pub fn bind_document(&mut self, event: &'static str, handler: impl FnMut(Event) + 'static) {
        let document = leptos::document();
        self.bind(&document, event, handler);
    }

    fn bind(
        &mut self,
        target: &web_sys::EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) {
        match platform_host_web::listen(target, event, handler) {
            Ok(guard) => self.guards.push(guard),
            Err(err) => logging::error!("failed to bind {event}: {err}"),
        }
    }

    /// Runs `cleanup` when the session ends.
    pub fn on_end(&mut self, cleanup: impl FnOnce() + 'static) {
        self.cleanups.push(Box::new(cleanup));
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.guards.len()
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
    }
}

/// Starts a page's session.
pub type PageActivator = Rc<dyn Fn(PageServices) -> PageSession>;

#[derive(Clone)]
/// Maps page names to activators and owns the current session.
pub struct PageRegistry {
    services: PageServices,
    activators: Rc<RefCell<HashMap<String, PageActivator>>>,
    current: Rc<RefCell<Option<(String, PageSession)>>>,
}

impl fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRegistry")
            .field("pages", &self.activators.borrow().keys().collect::<Vec<_>>())
            .field("active", &self.active_page())
            .finish()
    }
}

impl PageRegistry {
    /// Empty registry.
    pub fn new(services: PageServices) -> Self {
        Self {
            services,
            activators: Rc::new(RefCell::new(HashMap::new())),
            current: Rc::new(RefCell::new(None)),
        }
    }

    /// Registry with the upload, "my files" and statistics handlers.
    ///
    /// The settings page is static and has no handler.
    pub fn with_default_pages(services: PageServices) -> Self {
        let registry = Self::new(services);
        registry.register("upload", upload::activate);
        registry.register("myfile", myfile::activate);
        registry.register("stats", stats::activate);
        registry
    }

    /// Registers (or replaces) the activator for `page`.
    pub fn register(&self, page: &str, activator: impl Fn(PageServices) -> PageSession + 'static) {
        self.activators
            .borrow_mut()
            .insert(page.to_string(), Rc::new(activator));
    }

    /// Ends the current session and starts the one for `activation.page`.
    pub fn activate(&self, activation: &PageActivation) {
        let previous = self.current.borrow_mut().take();
        drop(previous);

        let page = activation.page.as_str();
        let activator = self.activators.borrow().get(page).cloned();
        match activator {
            Some(activator) => {
                logging::log!("activating page handlers for {page}");
                let session = activator(self.services.clone());
                *self.current.borrow_mut() = Some((page.to_string(), session));
            }
            None => logging::log!("no page handlers for {page}"),
        }
    }

    /// Page whose session is live.
    pub fn active_page(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|(page, _)| page.clone())
    }

    /// Subscribes the registry to `bus`.
    #[must_use = "dropping the subscription stops page activation"]
    pub fn attach(&self, bus: &ActivationBus) -> Subscription {
        let registry = self.clone();
        bus.subscribe(move |activation| registry.activate(activation))
    }
}

pub(crate) mod dom {
    //! Small DOM lookups shared by the page bindings.

    use leptos::logging;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, Event, HtmlElement};

    pub(crate) fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
        leptos::document()
            .get_element_by_id(id)?
            .dyn_into::<T>()
            .ok()
    }

    pub(crate) fn closest_in_event(event: &Event, selector: &str) -> Option<Element> {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        match target.closest(selector) {
            Ok(found) => found,
            Err(err) => {
                logging::warn!("bad selector {selector}: {err:?}");
                None
            }
        }
    }

    pub(crate) fn data_file_index(element: &Element) -> Option<usize> {
        element.get_attribute("data-file-index")?.parse().ok()
    }

    pub(crate) fn click_download_link(url: &str, file_name: &str) -> Result<(), String> {
        let document = leptos::document();
        let link = document
            .create_element("a")
            .map_err(|err| format!("{err:?}"))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "anchor is not an HtmlElement".to_string())?;
        link.set_attribute("href", url)
            .and_then(|()| link.set_attribute("download", file_name))
            .map_err(|err| format!("{err:?}"))?;
        let body = document.body().ok_or("document has no body")?;
        body.append_child(&link).map_err(|err| format!("{err:?}"))?;
        link.click();
        link.remove();
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use filedesk_dialog::ScriptedDialogs;
    use platform_host::{MemoryFileApiService, MemoryToastService};
    use pretty_assertions::assert_eq;

    use super::testing::services;
    use super::*;
    use crate::model::PageName;
    use crate::preview::MemoryPreviewPresenter;

    fn registry() -> PageRegistry {
        PageRegistry::new(services(
            &MemoryFileApiService::default(),
            &ScriptedDialogs::default(),
            &MemoryToastService::default(),
            &MemoryPreviewPresenter::default(),
        ))
    }

    fn activation(page: &str) -> PageActivation {
        PageActivation {
            page: PageName::from(page),
        }
    }

    fn recording_activator(
        name: &'static str,
        log: &Rc<RefCell<Vec<String>>>,
    ) -> impl Fn(PageServices) -> PageSession {
        let log = log.clone();
        move |_| {
            log.borrow_mut().push(format!("start {name}"));
            let mut session = PageSession::default();
            let log = log.clone();
            session.on_end(move || log.borrow_mut().push(format!("end {name}")));
            session
        }
    }

    #[test]
    fn activation_ends_the_previous_session_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = registry();
        registry.register("myfile", recording_activator("myfile", &log));
        registry.register("stats", recording_activator("stats", &log));

        registry.activate(&activation("myfile"));
        registry.activate(&activation("stats"));

        assert_eq!(
            *log.borrow(),
            vec!["start myfile", "end myfile", "start stats"]
        );
        assert_eq!(registry.active_page().as_deref(), Some("stats"));
    }

    #[test]
    fn pages_without_handlers_leave_no_session() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = registry();
        registry.register("myfile", recording_activator("myfile", &log));

        registry.activate(&activation("myfile"));
        registry.activate(&activation("setting"));

        assert_eq!(*log.borrow(), vec!["start myfile", "end myfile"]);
        assert_eq!(registry.active_page(), None);
    }

    #[test]
    fn attached_registry_follows_bus_emissions() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = registry();
        registry.register("upload", recording_activator("upload", &log));
        let bus = ActivationBus::default();

        let subscription = registry.attach(&bus);
        bus.emit(&activation("upload"));
        drop(subscription);
        bus.emit(&activation("upload"));

        assert_eq!(*log.borrow(), vec!["start upload"]);
    }
}
