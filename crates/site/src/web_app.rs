use filedesk_runtime::{AppProvider, AppShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="File Manager" />
        <Meta name="description" content="Upload, browse, preview and organize your files." />
        <FiledeskEntry />
    }
}

#[component]
pub fn FiledeskEntry() -> impl IntoView {
    view! {
        <AppProvider>
            <AppShell />
        </AppProvider>
    }
}
