use leptos::*;
use platform_host::FailedItem;
use system_ui::{Button, Icon, IconName, Tone};

use super::file_item_row;
use crate::engine::{DialogHandle, DialogSpec};
use crate::platform::DialogContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Overall outcome of an upload batch.
pub enum UploadTone {
    /// Nothing failed.
    Success,
    /// Some items failed.
    Partial,
    /// Nothing succeeded, including an empty batch.
    Failed,
}

impl UploadTone {
    /// Dialog tone for this outcome.
    pub const fn tone(self) -> Tone {
        match self {
            Self::Success => Tone::Success,
            Self::Partial => Tone::Warning,
            Self::Failed => Tone::Danger,
        }
    }

    /// Stable token for styling hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }

    /// Status line shown above the counts.
    pub const fn status_text(self) -> &'static str {
        match self {
            Self::Success => "All files uploaded successfully",
            Self::Partial => "Some files failed to upload",
            Self::Failed => "Upload failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Succeeded and failed items of one upload batch.
pub struct UploadSummary {
    /// Uploaded file names.
    pub succeeded: Vec<String>,
    /// Files that failed, with reasons.
    pub failed: Vec<FailedItem>,
}

impl UploadSummary {
    /// Wraps a finished batch.
    pub fn new(succeeded: Vec<String>, failed: Vec<FailedItem>) -> Self {
        Self { succeeded, failed }
    }

    /// Items in the batch.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Outcome derived from the counts.
    pub fn outcome(&self) -> UploadTone {
        if self.succeeded.is_empty() {
            UploadTone::Failed
        } else if self.failed.is_empty() {
            UploadTone::Success
        } else {
            UploadTone::Partial
        }
    }

    /// `"{ok} / {total}"`.
    pub fn count_text(&self) -> String {
        format!("{} / {}", self.succeeded.len(), self.total())
    }
}

/// Builds the upload-result dialog; `on_close` runs once the user acknowledges it.
pub fn upload_result_dialog(
    summary: UploadSummary,
    on_close: impl FnOnce() + 'static,
) -> DialogSpec<()> {
    let outcome = summary.outcome();
    DialogSpec::new(
        outcome.tone(),
        "Upload result",
        move |handle: &DialogHandle<()>| {
            let handle = handle.clone();
            DialogContent {
                body: ViewFn::from(move || {
                    let succeeded = summary
                        .succeeded
                        .iter()
                        .map(|name| file_item_row(name.clone(), "success"))
                        .collect_view();
                    let failed = summary
                        .failed
                        .iter()
                        .map(|item| {
                            view! {
                                <div class="dialog-file-item failed">
                                    <Icon icon=IconName::Error />
                                    <span>{item.name.clone()}</span>
                                    <span class="dialog-file-reason">{item.reason.clone()}</span>
                                </div>
                            }
                        })
                        .collect_view();
                    view! {
                        <div class="upload-result-summary" data-upload-outcome=outcome.token()>
                            <p class="upload-result-status">{outcome.status_text()}</p>
                            <p class="upload-result-count">
                                {format!("{} files uploaded", summary.count_text())}
                            </p>
                        </div>
                        <div class="dialog-file-list">{succeeded}{failed}</div>
                    }
                }),
                footer: ViewFn::from(move || {
                    let handle = handle.clone();
                    view! {
                        <Button
                            tone=outcome.tone()
                            on_click=Callback::new(move |_| handle.close(Some(())))
                        >
                            "OK"
                        </Button>
                    }
                }),
            }
        },
        move |_| on_close(),
    )
}
