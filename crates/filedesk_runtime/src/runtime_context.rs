//! Runtime provider: builds the services, router, and page registry, and exposes them as context.
//!
//! UI composition stays in [`crate::components`].

use std::rc::Rc;

use filedesk_dialog::{provide_dialog_service, LeptosDialogPlatform};
use leptos::*;

use crate::{
    activation::ActivationBus,
    config::{app_config, AppConfig},
    host::{
        install_hash_listener, navigate_from_link, start_router, BrowserRouterView,
        FiledeskHostContext,
    },
    model::PageName,
    pages::{PageRegistry, PageServices},
    preview::PreviewController,
    router::Router,
    sidebar::{is_small_screen, reduce_sidebar, SidebarAction, SidebarState},
    toast::Toaster,
};

#[derive(Clone, Copy)]
/// Leptos context shared by the shell components.
pub struct FiledeskRuntimeContext {
    /// Configuration baked in at build time.
    pub config: StoredValue<AppConfig>,
    /// Page router.
    pub router: StoredValue<Router>,
    /// Toast notifier.
    pub toaster: StoredValue<Toaster>,
    /// Page highlighted in the sidebar.
    pub active_page: RwSignal<Option<String>>,
    /// Sidebar visibility.
    pub sidebar: RwSignal<SidebarState>,
    /// Page container the router renders into.
    pub container: NodeRef<html::Main>,
    /// Preview overlay state.
    pub preview: PreviewController,
    /// Slot the dialog host renders.
    pub dialogs: LeptosDialogPlatform,
}

impl FiledeskRuntimeContext {
    /// Navigates to `page` as if its sidebar link was clicked.
    pub fn navigate(&self, page: impl Into<PageName>) {
        navigate_from_link(self.router.get_value(), page.into());
    }

    /// Applies a sidebar action.
    pub fn dispatch_sidebar(&self, action: SidebarAction) {
        self.sidebar.update(|state| reduce_sidebar(state, action));
    }

    /// Whether the viewport is at or below the small-screen breakpoint.
    pub fn small_screen(&self) -> bool {
        let width = window()
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(f64::MAX);
        let max_width = self
            .config
            .with_value(|config| config.ui.small_screen_max_width_px);
        is_small_screen(width, max_width)
    }
}

#[component]
/// Provides [`FiledeskRuntimeContext`] and starts routing from the current address.
pub fn AppProvider(children: Children) -> impl IntoView {
    let config = app_config();
    let host = FiledeskHostContext::new(&config);
    logging::log!("filedesk host strategy: {}", host.host_strategy_name());

    let (dialogs, dialog_platform) = provide_dialog_service(config.dialog_exit_delay());
    let toaster = Toaster::new(host.toast_service(), config.toast);
    let preview = PreviewController::new();
    let container = create_node_ref::<html::Main>();
    let active_page = create_rw_signal(None);

    let activations = ActivationBus::default();
    let router = Router::new(
        config.route_table(),
        host.fragment_source(),
        Rc::new(BrowserRouterView::new(container, active_page)),
        activations.clone(),
    );
    let registry = PageRegistry::with_default_pages(PageServices {
        files: host.file_api_service(),
        dialogs: Rc::new(dialogs),
        toaster: toaster.clone(),
        preview: Rc::new(preview),
        endpoints: config.endpoints(),
        ui: config.ui,
    });
    store_value(registry.attach(&activations));

    install_hash_listener(router.clone());

    let default_page = config.default_page();
    let runtime = FiledeskRuntimeContext {
        config: store_value(config),
        router: store_value(router.clone()),
        toaster: store_value(toaster),
        active_page,
        sidebar: create_rw_signal(SidebarState::default()),
        container,
        preview,
        dialogs: dialog_platform,
    };
    provide_context(runtime);

    let view = children().into_view();
    start_router(router, default_page);
    view
}

/// Returns the current [`FiledeskRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`AppProvider`].
pub fn use_filedesk_runtime() -> FiledeskRuntimeContext {
    use_context::<FiledeskRuntimeContext>().expect("FiledeskRuntimeContext context not provided")
}
