//! Browser runtime for the filedesk file manager.
//!
//! The [`Router`] loads page fragments for hash routes through the [`reduce_router`] state
//! machine and announces each mounted page on the [`ActivationBus`]. The [`pages`] registry
//! binds the handlers of the active page; [`AppProvider`] and [`AppShell`] assemble the
//! services and the shell UI.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod activation;
pub mod components;
pub mod config;
pub mod host;
pub mod model;
pub mod pages;
pub mod preview;
pub mod reducer;
pub mod router;
pub mod runtime_context;
pub mod sidebar;
pub mod toast;

pub use activation::{ActivationBus, Subscription};
pub use components::AppShell;
pub use config::{
    app_config, load_app_config, AppConfig, ConfigError, RouteConfig, ToastConfig, UiConfig,
};
pub use model::*;
pub use pages::{PageRegistry, PageServices, PageSession};
pub use preview::{MemoryPreviewPresenter, PreviewController, PreviewOverlay, PreviewPresenter};
pub use reducer::{reduce_router, RouterAction, RouterEffect};
pub use router::{MemoryRouterView, Router, RouterView, ViewCall};
pub use runtime_context::{use_filedesk_runtime, AppProvider, FiledeskRuntimeContext};
pub use sidebar::{is_small_screen, reduce_sidebar, SidebarAction, SidebarState};
pub use toast::{ToastOptions, Toaster};
