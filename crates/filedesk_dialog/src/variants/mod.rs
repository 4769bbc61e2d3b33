//! Typed dialogs built on the base [`DialogSpec`](crate::DialogSpec) primitive.
//!
//! Each variant keeps its decision logic in plain types (controls, forms, summaries) that the
//! Leptos views call into, so the result mapping is testable without a DOM.

mod confirm;
mod info;
mod rename;
mod upload_result;

pub use confirm::{confirm_dialog, delete_confirm_dialog, ConfirmControls, ConfirmOptions, DeletePrompt};
pub use info::{file_info_dialog, FileInfoRows, INFO_FALLBACK};
pub use rename::{rename_dialog, rename_dialog_with, RenameControls, RenameForm, RenameOutcome};
pub use upload_result::{upload_result_dialog, UploadSummary, UploadTone};

use leptos::*;
use system_ui::{Icon, IconName};

/// One file row as used by the delete and upload-result bodies.
fn file_item_row(name: String, extra_class: &'static str) -> impl IntoView {
    view! {
        <div class=format!("dialog-file-item {extra_class}").trim_end().to_string()>
            <Icon icon=IconName::File />
            <span>{name}</span>
        </div>
    }
}
