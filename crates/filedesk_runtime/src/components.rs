//! Shell composition: sidebar navigation, page container, dialog host, and preview overlay.

use filedesk_dialog::DialogHost;
use leptos::*;
use system_ui::{Icon, IconName, IconSize};

use crate::{
    model::RouteEntry,
    preview::PreviewOverlay,
    runtime_context::use_filedesk_runtime,
    sidebar::SidebarAction,
};

fn nav_icon(entry: &RouteEntry) -> IconName {
    IconName::from_token(&entry.icon).unwrap_or(IconName::File)
}

#[component]
fn NavLink(entry: RouteEntry) -> impl IntoView {
    let runtime = use_filedesk_runtime();
    let page = entry.page.as_str().to_string();
    let href = format!("#{page}");
    let is_active = {
        let page = page.clone();
        move || runtime.active_page.with(|active| active.as_deref() == Some(page.as_str()))
    };
    let on_click = {
        let page = page.clone();
        move |ev: ev::MouseEvent| {
            ev.prevent_default();
            runtime.navigate(page.as_str());
        }
    };

    view! {
        <a class="nav-link" href=href data-page=page class:active=is_active on:click=on_click>
            <Icon icon=nav_icon(&entry) size=IconSize::Sm />
            <span class="nav-label">{entry.label.clone()}</span>
        </a>
    }
}

#[component]
/// Sidebar, page container, and overlays; must render inside [`crate::AppProvider`].
pub fn AppShell() -> impl IntoView {
    let runtime = use_filedesk_runtime();
    let routes = runtime
        .router
        .with_value(|router| router.table().entries().to_vec());
    let collapsed = move || runtime.sidebar.with(|state| state.collapsed);
    let overlay_active = move || runtime.sidebar.with(|state| state.overlay_active);
    let container = runtime.container;
    let dialogs = runtime.dialogs;
    let preview = runtime.preview;

    let resize = window_event_listener(ev::resize, move |_| {
        runtime.dispatch_sidebar(SidebarAction::Resize {
            small_screen: runtime.small_screen(),
        });
    });
    on_cleanup(move || resize.remove());

    view! {
        <div class="app-shell">
            <button
                type="button"
                id="sidebar-toggle"
                class="sidebar-toggle"
                class:collapsed=collapsed
                title="Toggle sidebar"
                on:click=move |_| {
                    runtime.dispatch_sidebar(SidebarAction::Toggle {
                        small_screen: runtime.small_screen(),
                    });
                }
            >
                <Icon icon=IconName::Bars size=IconSize::Md />
            </button>
            <nav id="sidebar" class="sidebar" class:collapsed=collapsed>
                {routes
                    .into_iter()
                    .map(|entry| view! { <NavLink entry /> })
                    .collect_view()}
            </nav>
            <div
                id="sidebar-overlay"
                class="sidebar-overlay"
                class:active=overlay_active
                on:click=move |_| runtime.dispatch_sidebar(SidebarAction::Collapse)
            ></div>
            <main
                id="main-content"
                class="main-content"
                class:expanded=collapsed
                node_ref=container
            ></main>
            <DialogHost platform=dialogs />
            <PreviewOverlay controller=preview />
        </div>
    }
}
