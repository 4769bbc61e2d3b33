//! Awaitable dialog operations for page handlers.

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc, time::Duration};

use futures::channel::oneshot;
use leptos::{provide_context, use_context};
use platform_host::{FailedItem, FileRecord};

use crate::engine::{DialogEngine, DialogSpec};
use crate::host::LeptosDialogPlatform;
use crate::platform::DialogPlatform;
use crate::variants::{
    confirm_dialog, delete_confirm_dialog, file_info_dialog, rename_dialog_with,
    upload_result_dialog, ConfirmOptions, FileInfoRows, RenameControls, UploadSummary,
};

/// Boxed future returned by [`FileDialogs`] operations.
pub type DialogFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Dialogs the file pages ask the user through.
pub trait FileDialogs {
    /// Generic yes/no confirmation.
    fn confirm(&self, options: ConfirmOptions) -> DialogFuture<bool>;
    /// Delete confirmation for one or more files.
    fn confirm_delete(&self, files: &[FileRecord]) -> DialogFuture<bool>;
    /// Asks for a new name; `None` when cancelled or unchanged.
    fn prompt_rename(&self, file: &FileRecord) -> DialogFuture<Option<String>>;
    /// Shows file details until acknowledged.
    fn show_info(&self, file: &FileRecord) -> DialogFuture<()>;
    /// Shows the result of an upload batch until acknowledged.
    fn show_upload_result(
        &self,
        succeeded: Vec<String>,
        failed: Vec<FailedItem>,
    ) -> DialogFuture<()>;
}

/// [`FileDialogs`] backed by a [`DialogEngine`].
pub struct DialogService<P = LeptosDialogPlatform> {
    engine: DialogEngine<P>,
}

impl<P> Clone for DialogService<P> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl<P: DialogPlatform + 'static> DialogService<P> {
    /// Wraps an engine.
    pub fn new(engine: DialogEngine<P>) -> Self {
        Self { engine }
    }

    /// Engine dialogs are opened on.
    pub fn engine(&self) -> &DialogEngine<P> {
        &self.engine
    }

    /// Opens the spec `build` returns and resolves with what its close callback sends, or
    /// `fallback` if the callback is dropped unsent.
    fn ask<R: 'static, T: 'static>(
        &self,
        fallback: T,
        build: impl FnOnce(oneshot::Sender<T>) -> DialogSpec<R>,
    ) -> DialogFuture<T> {
        let (tx, rx) = oneshot::channel();
        self.engine.open(build(tx));
        Box::pin(async move { rx.await.unwrap_or(fallback) })
    }

    fn rename(
        &self,
        file: &FileRecord,
        on_ready: impl FnOnce(&RenameControls) + 'static,
    ) -> DialogFuture<Option<String>> {
        self.ask(None, |tx| rename_dialog_with(file, on_ready, reply(tx)))
    }
}

fn reply<T>(tx: oneshot::Sender<T>) -> impl FnOnce(T) {
    move |value| {
        let _ = tx.send(value);
    }
}

impl<P: DialogPlatform + 'static> FileDialogs for DialogService<P> {
    fn confirm(&self, options: ConfirmOptions) -> DialogFuture<bool> {
        self.ask(false, |tx| confirm_dialog(options, reply(tx)))
    }

    fn confirm_delete(&self, files: &[FileRecord]) -> DialogFuture<bool> {
        self.ask(false, |tx| delete_confirm_dialog(files, reply(tx)))
    }

    fn prompt_rename(&self, file: &FileRecord) -> DialogFuture<Option<String>> {
        self.rename(file, |_| ())
    }

    fn show_info(&self, file: &FileRecord) -> DialogFuture<()> {
        let rows = FileInfoRows::new(file, &chrono::Local);
        self.ask((), |tx| file_info_dialog(rows, move || reply(tx)(())))
    }

    fn show_upload_result(
        &self,
        succeeded: Vec<String>,
        failed: Vec<FailedItem>,
    ) -> DialogFuture<()> {
        let summary = UploadSummary::new(succeeded, failed);
        self.ask((), |tx| upload_result_dialog(summary, move || reply(tx)(())))
    }
}

/// Creates the browser dialog service and provides it as Leptos context.
///
/// Render [`DialogHost`](crate::DialogHost) with the returned platform.
pub fn provide_dialog_service(exit_delay: Duration) -> (DialogService, LeptosDialogPlatform) {
    let platform = LeptosDialogPlatform::new();
    let service = DialogService::new(DialogEngine::new(platform, exit_delay));
    provide_context(service.clone());
    (service, platform)
}

/// Returns the dialog service from Leptos context.
///
/// # Panics
///
/// Panics if [`provide_dialog_service`] was not called by an ancestor.
pub fn use_dialogs() -> DialogService {
    use_context::<DialogService>().expect("DialogService context not provided")
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A dialog requested from [`ScriptedDialogs`].
pub enum DialogRequest {
    /// Generic confirmation with its title.
    Confirm(String),
    /// Delete confirmation with the listed names.
    ConfirmDelete(Vec<String>),
    /// Rename prompt for a file.
    Rename(String),
    /// Info dialog for a file.
    Info(String),
    /// Upload result with its count text.
    UploadResult(String),
}

#[derive(Debug, Default)]
struct Script {
    confirms: VecDeque<bool>,
    renames: VecDeque<Option<String>>,
    requests: Vec<DialogRequest>,
}

#[derive(Debug, Clone, Default)]
/// [`FileDialogs`] that answers from queued replies and records every request.
///
/// Unscripted confirmations answer `false` and unscripted renames answer `None`.
pub struct ScriptedDialogs {
    script: Rc<RefCell<Script>>,
}

impl ScriptedDialogs {
    /// Queues the answer of the next confirmation.
    pub fn answer_confirm(&self, answer: bool) -> &Self {
        self.script.borrow_mut().confirms.push_back(answer);
        self
    }

    /// Queues the answer of the next rename prompt.
    pub fn answer_rename(&self, answer: Option<&str>) -> &Self {
        self.script
            .borrow_mut()
            .renames
            .push_back(answer.map(str::to_string));
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<DialogRequest> {
        self.script.borrow().requests.clone()
    }

    fn record(&self, request: DialogRequest) {
        self.script.borrow_mut().requests.push(request);
    }

    fn next_confirm(&self) -> bool {
        self.script.borrow_mut().confirms.pop_front().unwrap_or(false)
    }
}

impl FileDialogs for ScriptedDialogs {
    fn confirm(&self, options: ConfirmOptions) -> DialogFuture<bool> {
        self.record(DialogRequest::Confirm(options.title));
        let answer = self.next_confirm();
        Box::pin(async move { answer })
    }

    fn confirm_delete(&self, files: &[FileRecord]) -> DialogFuture<bool> {
        self.record(DialogRequest::ConfirmDelete(
            files.iter().map(|file| file.file_name.clone()).collect(),
        ));
        let answer = self.next_confirm();
        Box::pin(async move { answer })
    }

    fn prompt_rename(&self, file: &FileRecord) -> DialogFuture<Option<String>> {
        self.record(DialogRequest::Rename(file.file_name.clone()));
        let answer = self.script.borrow_mut().renames.pop_front().flatten();
        Box::pin(async move { answer })
    }

    fn show_info(&self, file: &FileRecord) -> DialogFuture<()> {
        self.record(DialogRequest::Info(file.file_name.clone()));
        Box::pin(async {})
    }

    fn show_upload_result(
        &self,
        succeeded: Vec<String>,
        failed: Vec<FailedItem>,
    ) -> DialogFuture<()> {
        let summary = UploadSummary::new(succeeded, failed);
        self.record(DialogRequest::UploadResult(summary.count_text()));
        Box::pin(async {})
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::engine::testing::{engine, RecordingPlatform};

    fn service() -> (DialogService<RecordingPlatform>, RecordingPlatform) {
        let (engine, platform) = engine();
        (DialogService::new(engine), platform)
    }

    #[test]
    fn dismissed_confirmations_resolve_false() {
        let (service, platform) = service();
        let generic = service.confirm(ConfirmOptions::default());
        let delete = service.confirm_delete(&[FileRecord::named("a.txt")]);

        platform.run_frames();
        platform.press_escape();
        platform.settle();
        platform.click_backdrop();
        platform.settle();

        assert!(!block_on(generic));
        assert!(!block_on(delete));
        assert_eq!(service.engine().active(), None);
    }

    #[test]
    fn dismissed_rename_resolves_none() {
        let _ = leptos::create_runtime();
        let (service, platform) = service();
        let renamed = service.prompt_rename(&FileRecord::named("report.pdf"));

        platform.run_frames();
        platform.press_escape();
        platform.settle();

        assert_eq!(block_on(renamed), None);
    }

    #[test]
    fn submitted_rename_resolves_the_full_name() {
        let _ = leptos::create_runtime();
        let (service, platform) = service();
        let controls = Rc::new(RefCell::new(None));
        let slot = controls.clone();
        let renamed = service.rename(&FileRecord::named("report.pdf"), move |ready| {
            *slot.borrow_mut() = Some(ready.clone());
        });

        platform.run_frames();
        let controls = controls.borrow().clone().expect("controls");
        assert!(controls.submit("final"));
        platform.settle();

        assert_eq!(block_on(renamed), Some("final.pdf".to_string()));
        assert_eq!(service.engine().active(), None);
    }

    #[test]
    fn acknowledgement_dialogs_resolve_after_close() {
        let (service, platform) = service();
        let info = service.show_info(&FileRecord::named("a.txt"));
        let upload = service.show_upload_result(vec!["a.txt".to_string()], Vec::new());

        assert_eq!(platform.mounted_title().as_deref(), Some("File info"));
        platform.run_frames();
        platform.press_escape();
        platform.settle();
        assert_eq!(platform.mounted_title().as_deref(), Some("Upload result"));
        platform.press_escape();
        platform.settle();

        block_on(info);
        block_on(upload);
    }

    #[test]
    fn scripted_dialogs_replay_answers_and_record_requests() {
        let dialogs = ScriptedDialogs::default();
        dialogs.answer_confirm(true).answer_rename(Some("b.txt"));

        assert!(block_on(dialogs.confirm_delete(&[FileRecord::named("a.txt")])));
        assert!(!block_on(dialogs.confirm(ConfirmOptions::default())));
        assert_eq!(
            block_on(dialogs.prompt_rename(&FileRecord::named("a.txt"))),
            Some("b.txt".to_string())
        );
        block_on(dialogs.show_upload_result(Vec::new(), vec![FailedItem::new("x", "y")]));

        assert_eq!(
            dialogs.requests(),
            vec![
                DialogRequest::ConfirmDelete(vec!["a.txt".to_string()]),
                DialogRequest::Confirm("Confirm".to_string()),
                DialogRequest::Rename("a.txt".to_string()),
                DialogRequest::UploadResult("0 / 1".to_string()),
            ]
        );
    }
}
