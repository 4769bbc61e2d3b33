//! Upload page: a queue fed by the file input and drop zone, uploaded sequentially.

use std::{cell::RefCell, fmt::Write, rc::Rc};

use html_escape::{encode_double_quoted_attribute, encode_text};
use leptos::{logging, spawn_local};
use platform_host::{
    format_file_size, FailedItem, FileApiService, FileCategory, FilePayload, UploadFile,
};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, FileList, HtmlButtonElement, HtmlElement, HtmlInputElement};

use super::dom::{self, closest_in_event, data_file_index};
use super::{PageServices, PageSession};

#[derive(Debug, Clone, Default)]
/// Files picked but not yet uploaded, in selection order.
pub struct UploadQueue {
    items: Rc<RefCell<Vec<UploadFile>>>,
}

impl UploadQueue {
    /// Appends `files`, skipping names already queued; returns how many were added.
    pub fn add(&self, files: impl IntoIterator<Item = UploadFile>) -> usize {
        let mut items = self.items.borrow_mut();
        let mut added = 0;
        for file in files {
            if items.iter().any(|queued| queued.name == file.name) {
                logging::log!("{} is already queued", file.name);
                continue;
            }
            items.push(file);
            added += 1;
        }
        added
    }

    /// Removes the item at `index`.
    pub fn remove(&self, index: usize) -> Option<UploadFile> {
        let mut items = self.items.borrow_mut();
        (index < items.len()).then(|| items.remove(index))
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<UploadFile> {
        self.items.borrow().get(index).cloned()
    }

    /// Snapshot of the queue.
    pub fn items(&self) -> Vec<UploadFile> {
        self.items.borrow().clone()
    }

    /// Drops queued items named like any of `sent`; returns how many were dropped.
    ///
    /// Files queued after `sent` was snapshotted stay queued.
    pub fn remove_sent(&self, sent: &[UploadFile]) -> usize {
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|queued| !sent.iter().any(|file| file.name == queued.name));
        before - items.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

/// Uploads `files` one at a time and splits the results into succeeded names and failures.
pub async fn upload_batch(
    api: &dyn FileApiService,
    files: &[UploadFile],
) -> (Vec<String>, Vec<FailedItem>) {
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for file in files {
        match api.upload_file(file).await {
            Ok(()) => succeeded.push(file.name.clone()),
            Err(err) => {
                logging::warn!("upload of {} failed: {err}", file.name);
                failed.push(FailedItem::new(&file.name, err.reason()));
            }
        }
    }
    (succeeded, failed)
}

/// Markup of the selected-files list; `data-file-index` is the queue position.
pub fn render_selected_files(files: &[UploadFile]) -> String {
    if files.is_empty() {
        return r#"<div class="selected-empty">No files selected</div>"#.to_string();
    }
    let mut html = String::new();
    for (index, file) in files.iter().enumerate() {
        let _ = write!(
            html,
            r#"<div class="selected-file-item" data-file-index="{index}"><i class="fas {icon}"></i><span class="selected-file-name" title="{title}">{name}</span><span class="selected-file-size">{size}</span><button type="button" class="selected-file-action" data-action="preview" data-file-index="{index}" title="Preview"><i class="fas fa-eye"></i></button><button type="button" class="selected-file-action" data-action="remove" data-file-index="{index}" title="Remove"><i class="fas fa-times"></i></button></div>"#,
            icon = FileCategory::from_mime(&file.mime).icon(),
            title = encode_double_quoted_attribute(&file.name),
            name = encode_text(&file.name),
            size = format_file_size(file.bytes.len() as u64),
        );
    }
    html
}

/// DOM boundary of the upload page.
pub trait UploadView {
    /// Replaces the selected-files list markup.
    fn set_selected(&self, html: &str);
    /// Enables or disables the upload button.
    fn set_upload_enabled(&self, enabled: bool);
}

#[derive(Clone)]
/// Handlers of the upload page.
pub struct UploadPage {
    services: PageServices,
    queue: UploadQueue,
    view: Rc<dyn UploadView>,
}

impl UploadPage {
    /// Binds services, queue, and view.
    pub fn new(services: PageServices, queue: UploadQueue, view: Rc<dyn UploadView>) -> Self {
        Self {
            services,
            queue,
            view,
        }
    }

    /// Shared queue.
    pub fn queue(&self) -> &UploadQueue {
        &self.queue
    }

    /// Redraws the list and the button state.
    pub fn refresh(&self) {
        let items = self.queue.items();
        self.view.set_selected(&render_selected_files(&items));
        self.view.set_upload_enabled(!items.is_empty());
    }

    /// Queues picked or dropped files.
    pub fn add_files(&self, files: Vec<UploadFile>) {
        self.queue.add(files);
        self.refresh();
    }

    /// Drops the queued item at `index`.
    pub fn remove(&self, index: usize) {
        if self.queue.remove(index).is_some() {
            self.refresh();
        }
    }

    /// Previews a queued item from its local bytes.
    pub fn preview(&self, index: usize) {
        let Some(file) = self.queue.get(index) else {
            return;
        };
        let payload = FilePayload {
            bytes: file.bytes,
            mime: file.mime,
        };
        if let Err(reason) = self.services.preview.present(&file.name, &payload, None) {
            self.services
                .toaster
                .error(format!("Unable to preview file: {reason}"));
        }
    }

    /// Uploads the queue, shows the result dialog, and unqueues the files that were sent.
    pub async fn upload(&self) {
        if self.queue.is_empty() {
            self.services.toaster.warning("Please select files to upload");
            return;
        }
        self.view.set_upload_enabled(false);
        let files = self.queue.items();
        let (succeeded, failed) = upload_batch(self.services.files.as_ref(), &files).await;
        logging::log!(
            "upload finished: {} succeeded, {} failed",
            succeeded.len(),
            failed.len()
        );
        self.services
            .dialogs
            .show_upload_result(succeeded, failed)
            .await;
        self.queue.remove_sent(&files);
        self.refresh();
    }
}

const FILE_INPUT_ID: &str = "file-input";
const DROP_ZONE_ID: &str = "drop-zone";
const SELECTED_FILES_ID: &str = "selected-files";
const UPLOAD_BUTTON_ID: &str = "upload-btn";

#[derive(Debug, Clone, Copy, Default)]
/// [`UploadView`] over the upload fragment.
pub struct DomUploadView;

impl UploadView for DomUploadView {
    fn set_selected(&self, html: &str) {
        if let Some(list) = dom::element_by_id::<HtmlElement>(SELECTED_FILES_ID) {
            list.set_inner_html(html);
        }
    }

    fn set_upload_enabled(&self, enabled: bool) {
        if let Some(button) = dom::element_by_id::<HtmlButtonElement>(UPLOAD_BUTTON_ID) {
            button.set_disabled(!enabled);
        }
    }
}

fn queue_file_list(page: &UploadPage, list: Option<FileList>) {
    let Some(list) = list else {
        return;
    };
    let picked: Vec<web_sys::File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
    if picked.is_empty() {
        return;
    }
    let page = page.clone();
    spawn_local(async move {
        let mut files = Vec::with_capacity(picked.len());
        for file in &picked {
            match platform_host_web::read_browser_file(file).await {
                Ok(upload) => files.push(upload),
                Err(err) => {
                    logging::warn!("failed to read {}: {err}", file.name());
                    page.services
                        .toaster
                        .error(format!("Unable to read {}", file.name()));
                }
            }
        }
        page.add_files(files);
    });
}

fn set_drag_over(active: bool) {
    if let Some(zone) = dom::element_by_id::<HtmlElement>(DROP_ZONE_ID) {
        let _ = zone.class_list().toggle_with_force("dragover", active);
    }
}

fn as_drag(event: &Event) -> Option<&DragEvent> {
    event.dyn_ref::<DragEvent>()
}

/// Binds the upload fragment.
pub fn activate(services: PageServices) -> PageSession {
    let page = UploadPage::new(services, UploadQueue::default(), Rc::new(DomUploadView));
    let mut session = PageSession::default();

    session.bind_id(FILE_INPUT_ID, "change", {
        let page = page.clone();
        move |event| {
            let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            queue_file_list(&page, input.files());
            input.set_value("");
        }
    });
    session.bind_id(DROP_ZONE_ID, "dragover", |event| {
        event.prevent_default();
        set_drag_over(true);
    });
    session.bind_id(DROP_ZONE_ID, "dragleave", |_| set_drag_over(false));
    session.bind_id(DROP_ZONE_ID, "drop", {
        let page = page.clone();
        move |event| {
            event.prevent_default();
            set_drag_over(false);
            let files = as_drag(&event)
                .and_then(DragEvent::data_transfer)
                .and_then(|transfer| transfer.files());
            queue_file_list(&page, files);
        }
    });
    session.bind_id(SELECTED_FILES_ID, "click", {
        let page = page.clone();
        move |event| {
            let Some(button) = closest_in_event(&event, "[data-action]") else {
                return;
            };
            let Some(index) = data_file_index(&button) else {
                return;
            };
            match button.get_attribute("data-action").as_deref() {
                Some("remove") => page.remove(index),
                Some("preview") => page.preview(index),
                other => logging::warn!("unknown upload action {other:?}"),
            }
        }
    });
    session.bind_id(UPLOAD_BUTTON_ID, "click", {
        let page = page.clone();
        move |_| {
            let page = page.clone();
            spawn_local(async move { page.upload().await });
        }
    });

    page.refresh();
    session
}
