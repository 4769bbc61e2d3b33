use leptos::*;
use platform_host::FileRecord;
use system_ui::{Button, ButtonVariant, Tone};

use super::file_item_row;
use crate::engine::{DialogHandle, DialogSpec};
use crate::platform::DialogContent;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Copy and tone of a yes/no confirmation.
pub struct ConfirmOptions {
    /// Header title.
    pub title: String,
    /// Body message.
    pub message: String,
    /// Label of the confirming button.
    pub confirm_text: String,
    /// Label of the cancelling button.
    pub cancel_text: String,
    /// Dialog and confirm-button tone.
    pub tone: Tone,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            title: "Confirm".to_string(),
            message: "Are you sure you want to continue?".to_string(),
            confirm_text: "OK".to_string(),
            cancel_text: "Cancel".to_string(),
            tone: Tone::Info,
        }
    }
}

/// Button actions of a confirmation dialog.
#[derive(Debug, Clone)]
pub struct ConfirmControls {
    handle: DialogHandle<bool>,
}

impl ConfirmControls {
    /// Wraps the handle of an open confirmation.
    pub fn new(handle: DialogHandle<bool>) -> Self {
        Self { handle }
    }

    /// Explicit confirmation.
    pub fn confirm(&self) {
        self.handle.close(Some(true));
    }

    /// Explicit cancellation.
    pub fn cancel(&self) {
        self.handle.close(Some(false));
    }
}

/// Collapses a confirmation result; dismissal counts as "no".
pub(crate) fn confirmed(result: Option<bool>) -> bool {
    result.unwrap_or(false)
}

fn confirm_spec(
    options: ConfirmOptions,
    body: ViewFn,
    on_close: impl FnOnce(bool) + 'static,
) -> DialogSpec<bool> {
    let ConfirmOptions {
        title,
        confirm_text,
        cancel_text,
        tone,
        ..
    } = options;
    DialogSpec::new(
        tone,
        title,
        move |handle: &DialogHandle<bool>| {
            let controls = ConfirmControls::new(handle.clone());
            DialogContent {
                body,
                footer: ViewFn::from(move || {
                    let cancel = controls.clone();
                    let confirm = controls.clone();
                    let cancel_text = cancel_text.clone();
                    let confirm_text = confirm_text.clone();
                    view! {
                        <Button
                            variant=ButtonVariant::Cancel
                            on_click=Callback::new(move |_| cancel.cancel())
                        >
                            {cancel_text}
                        </Button>
                        <Button tone=tone on_click=Callback::new(move |_| confirm.confirm())>
                            {confirm_text}
                        </Button>
                    }
                }),
            }
        },
        move |result| on_close(confirmed(result)),
    )
}

/// Builds a yes/no confirmation; `on_close` receives `false` for cancel and dismissal.
pub fn confirm_dialog(
    options: ConfirmOptions,
    on_close: impl FnOnce(bool) + 'static,
) -> DialogSpec<bool> {
    let message = options.message.clone();
    let body = ViewFn::from(move || view! { <div class="dialog-message">{message.clone()}</div> });
    confirm_spec(options, body, on_close)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a delete confirmation lists.
pub enum DeletePrompt {
    /// Exactly one file.
    Single(String),
    /// Any other count.
    Many(Vec<String>),
}

impl DeletePrompt {
    /// Chooses the singular or plural form for `names`.
    pub fn new(mut names: Vec<String>) -> Self {
        if names.len() == 1 {
            Self::Single(names.remove(0))
        } else {
            Self::Many(names)
        }
    }

    /// Lead sentence of the body.
    pub fn headline(&self) -> String {
        match self {
            Self::Single(_) => "Are you sure you want to delete this file?".to_string(),
            Self::Many(names) => {
                format!("Are you sure you want to delete these {} files?", names.len())
            }
        }
    }

    /// Listed file names.
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::Single(name) => vec![name.clone()],
            Self::Many(names) => names.clone(),
        }
    }
}

/// Builds the delete confirmation for one or more files.
pub fn delete_confirm_dialog(
    files: &[FileRecord],
    on_close: impl FnOnce(bool) + 'static,
) -> DialogSpec<bool> {
    let prompt = DeletePrompt::new(files.iter().map(|file| file.file_name.clone()).collect());
    let options = ConfirmOptions {
        title: "Delete files".to_string(),
        message: prompt.headline(),
        confirm_text: "Delete".to_string(),
        cancel_text: "Cancel".to_string(),
        tone: Tone::Danger,
    };
    let body = ViewFn::from(move || {
        let headline = prompt.headline();
        let rows = prompt
            .names()
            .into_iter()
            .map(|name| file_item_row(name, ""))
            .collect_view();
        match &prompt {
            DeletePrompt::Single(_) => view! {
                <p>{headline}</p>
                {rows}
            }
            .into_view(),
            DeletePrompt::Many(_) => view! {
                <p>{headline}</p>
                <div class="dialog-file-list">{rows}</div>
            }
            .into_view(),
        }
    });
    confirm_spec(options, body, on_close)
}
