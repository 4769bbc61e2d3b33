use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Role of a dialog or page button.
pub enum ButtonVariant {
    /// Primary action, painted with the tone colour.
    #[default]
    Confirm,
    /// Secondary / dismiss action.
    Cancel,
    /// Compact inline action (card toolbars).
    Quiet,
}

impl ButtonVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Quiet => "quiet",
        }
    }
}

#[component]
/// Shared button primitive emitting the `dialog-btn` class contract.
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] tone: Tone,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] title: MaybeSignal<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] leading_icon: Option<IconName>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let base = format!(
        "dialog-btn dialog-btn-{} dialog-btn-{}",
        variant.token(),
        tone.token()
    );
    let class = match layout_class {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base,
    };
    view! {
        <button
            type="button"
            class=class
            id=id
            title=move || title.get()
            disabled=move || disabled.get()
            data-ui-primitive="true"
            data-ui-kind="button"
            data-ui-variant=variant.token()
            data-ui-tone=tone.token()
            data-ui-disabled=move || bool_token(disabled.get())
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
        >
            {leading_icon.map(|icon| view! { <Icon icon size=IconSize::Sm /> })}
            {children()}
        </button>
    }
}

#[component]
/// Icon-only button (dialog close, preview close, sidebar toggle).
pub fn IconButton(
    icon: IconName,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] title: MaybeSignal<String>,
    #[prop(optional, into)] pressed: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
) -> impl IntoView {
    let label = title.clone();
    view! {
        <button
            type="button"
            class=merge_layout_class("ui-icon-button", layout_class)
            id=id
            title=move || title.get()
            aria-label=move || label.get()
            aria-pressed=move || bool_token(pressed.get())
            data-ui-primitive="true"
            data-ui-kind="icon-button"
            data-ui-pressed=move || bool_token(pressed.get())
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
        >
            <Icon icon size=IconSize::Md />
        </button>
    }
}
