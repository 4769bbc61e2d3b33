use super::*;

/// Returns whether a click landed on the element that owns the listener itself rather than on
/// one of its descendants.
pub fn is_backdrop_click(ev: &MouseEvent) -> bool {
    match (ev.target(), ev.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    }
}

#[component]
/// Full-viewport backdrop that toggles its `show` class with `visible`.
///
/// `on_backdrop_click` only fires for clicks on the backdrop itself, never for clicks that
/// bubble up from content.
pub fn ModalLayer(
    #[prop(into)] visible: Signal<bool>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] on_backdrop_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("dialog-overlay", layout_class)
            class:show=move || visible.get()
            data-ui-primitive="true"
            data-ui-kind="modal-layer"
            on:click=move |ev: MouseEvent| {
                if !is_backdrop_click(&ev) {
                    return;
                }
                if let Some(on_backdrop_click) = on_backdrop_click.as_ref() {
                    on_backdrop_click.call(ev);
                }
            }
        >
            {children()}
        </div>
    }
}

#[component]
/// Dialog card with a titled header and close control; children supply body and footer.
pub fn DialogSurface(
    tone: Tone,
    #[prop(into)] title: String,
    #[prop(into)] visible: Signal<bool>,
    #[prop(optional, into)] close_label: Option<String>,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let close_label = close_label.unwrap_or_else(|| "Close".to_string());
    view! {
        <div
            class=format!("dialog dialog-{}", tone.token())
            class:show=move || visible.get()
            role="dialog"
            aria-modal="true"
            data-ui-primitive="true"
            data-ui-kind="dialog"
            data-ui-tone=tone.token()
        >
            <div class="dialog-header">
                <h3 class="dialog-title">{title}</h3>
                <IconButton
                    icon=IconName::Close
                    layout_class="dialog-close"
                    title=close_label
                    on_click=Callback::new(move |_| on_close.call(()))
                />
            </div>
            {children()}
        </div>
    }
}
