//! "My files" operations: load, search, filter, and the per-card actions.

use std::rc::Rc;

use chrono::Local;
use leptos::logging;
use platform_host::{FailedItem, FileRecord};

use super::render::{render_file_cards, render_search_dropdown, LOADING_HTML};
use super::state::{search_keyword, FileFilter, FileListState};
use super::CardAction;
use crate::pages::PageServices;

/// DOM boundary of the "My files" page.
pub trait MyFileView {
    /// Replaces the card grid markup.
    fn set_file_list(&self, html: &str);
    /// Shows the dropdown with `html`, or hides it when `None`.
    fn set_dropdown(&self, html: Option<&str>);
    /// Shows or hides the search clear button.
    fn set_clear_visible(&self, visible: bool);
    /// Empties the search input.
    fn clear_search_input(&self);
    /// Empties the category and date controls.
    fn clear_filter_inputs(&self);
    /// Starts a browser download of `url`.
    fn start_download(&self, url: &str, file_name: &str);
}

#[derive(Clone)]
/// Handlers of the "My files" page.
pub struct MyFilePage {
    services: PageServices,
    state: FileListState,
    view: Rc<dyn MyFileView>,
}

impl MyFilePage {
    /// Binds services, state, and view.
    pub fn new(services: PageServices, state: FileListState, view: Rc<dyn MyFileView>) -> Self {
        Self {
            services,
            state,
            view,
        }
    }

    /// Shared file list.
    pub fn state(&self) -> &FileListState {
        &self.state
    }

    /// Shows the loading state, fetches the listing, and renders every file.
    ///
    /// A failed listing renders as empty.
    pub async fn load_files(&self) {
        self.view.set_file_list(LOADING_HTML);
        let files = match self.services.files.list_files().await {
            Ok(files) => files,
            Err(err) => {
                logging::warn!("failed to list files: {err}");
                Vec::new()
            }
        };
        self.state.replace(files);
        self.render_cards(&self.state.visible());
    }

    fn render_cards(&self, files: &[FileRecord]) {
        self.view.set_file_list(&render_file_cards(files, &Local));
    }

    /// Search input changed.
    pub fn search_input(&self, raw: &str) {
        self.view.set_clear_visible(!raw.is_empty());
        self.show_matches(raw);
    }

    /// Search input focused; re-shows the dropdown for a non-empty keyword.
    pub fn search_focus(&self, raw: &str) {
        if !search_keyword(raw).is_empty() {
            self.show_matches(raw);
        }
    }

    fn show_matches(&self, raw: &str) {
        let keyword = search_keyword(raw);
        if keyword.is_empty() {
            self.view.set_dropdown(None);
            return;
        }
        let matches = self
            .state
            .search(&keyword, self.services.ui.search_result_limit);
        self.view
            .set_dropdown(Some(&render_search_dropdown(&matches, &Local)));
    }

    /// Clear button pressed.
    pub fn clear_search(&self) {
        self.view.clear_search_input();
        self.view.set_clear_visible(false);
        self.view.set_dropdown(None);
    }

    /// Click outside the search box.
    pub fn dismiss_dropdown(&self) {
        self.view.set_dropdown(None);
    }

    /// Dropdown entry chosen: clears the search and previews the file.
    pub async fn select_match(&self, index: usize) {
        let Some(file) = self.state.match_at(index) else {
            return;
        };
        self.clear_search();
        self.handle_preview(&file).await;
    }

    /// Filter control changed.
    pub fn apply_filter(&self, filter: &FileFilter) {
        let visible = self.state.apply_filter(filter, &Local);
        self.render_cards(&visible);
    }

    /// Reset pressed: clears search and filters and shows every file.
    pub fn reset_filters(&self) {
        self.clear_search();
        self.view.clear_filter_inputs();
        self.apply_filter(&FileFilter::default());
    }

    /// Runs a card action on the card at `index` of the grid.
    pub async fn card_action(&self, action: CardAction, index: usize) {
        let Some(file) = self.state.visible_at(index) else {
            logging::warn!("no file card at index {index}");
            return;
        };
        match action {
            CardAction::Preview => self.handle_preview(&file).await,
            CardAction::Info => self.services.dialogs.show_info(&file).await,
            CardAction::Rename => {
                self.handle_rename(&file).await;
            }
            CardAction::Delete => {
                self.handle_delete(std::slice::from_ref(&file)).await;
            }
            CardAction::Download => self.view.start_download(
                &self.services.endpoints.download_url(&file.file_name),
                &file.file_name,
            ),
        }
    }

    /// Confirms, deletes each file in turn, reports once, and reloads.
    ///
    /// Returns whether at least one file was deleted.
    pub async fn handle_delete(&self, files: &[FileRecord]) -> bool {
        if !self.services.dialogs.confirm_delete(files).await {
            return false;
        }

        let mut deleted = 0usize;
        let mut failed = Vec::<FailedItem>::new();
        for file in files {
            match self.services.files.delete_file(&file.file_name).await {
                Ok(()) => deleted += 1,
                Err(err) => {
                    logging::warn!("delete {} failed: {err}", file.file_name);
                    failed.push(FailedItem::new(&file.file_name, err.reason()));
                }
            }
        }

        if failed.is_empty() {
            self.services
                .toaster
                .success(format!("Deleted {deleted} file(s)"));
        } else {
            self.services
                .toaster
                .error(format!("Failed to delete {} file(s)", failed.len()));
        }
        self.load_files().await;
        deleted > 0
    }

    /// Asks for a new name and renames; returns whether the rename happened.
    pub async fn handle_rename(&self, file: &FileRecord) -> bool {
        let Some(new_name) = self.services.dialogs.prompt_rename(file).await else {
            return false;
        };
        match self
            .services
            .files
            .rename_file(&file.file_name, &new_name)
            .await
        {
            Ok(()) => {
                self.services.toaster.success("Renamed successfully");
                self.load_files().await;
                true
            }
            Err(err) => {
                logging::warn!("rename {} failed: {err}", file.file_name);
                self.services
                    .toaster
                    .error(format!("Rename failed: {}", err.reason()));
                false
            }
        }
    }

    /// Fetches the file contents and opens the preview overlay.
    pub async fn handle_preview(&self, file: &FileRecord) {
        let result = match self.services.files.fetch_file(&file.file_name).await {
            Ok(payload) => self.services.preview.present(
                &file.file_name,
                &payload,
                Some(self.services.endpoints.download_url(&file.file_name)),
            ),
            Err(err) => Err(err.reason()),
        };
        if let Err(reason) = result {
            logging::warn!("preview {} failed: {reason}", file.file_name);
            self.services
                .toaster
                .error(format!("Unable to preview file: {reason}"));
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::MyFileView;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ViewEvent {
        FileList(String),
        Dropdown(Option<String>),
        ClearVisible(bool),
        ClearSearch,
        ClearFilters,
        Download(String, String),
    }

    #[derive(Clone, Default)]
    pub struct RecordingView {
        pub events: Rc<RefCell<Vec<ViewEvent>>>,
    }

    impl RecordingView {
        pub fn events(&self) -> Vec<ViewEvent> {
            self.events.borrow().clone()
        }

        pub fn last_file_list(&self) -> Option<String> {
            self.events().into_iter().rev().find_map(|event| match event {
                ViewEvent::FileList(html) => Some(html),
                _ => None,
            })
        }

        pub fn last_dropdown(&self) -> Option<Option<String>> {
            self.events().into_iter().rev().find_map(|event| match event {
                ViewEvent::Dropdown(html) => Some(html),
                _ => None,
            })
        }
    }

    impl MyFileView for RecordingView {
        fn set_file_list(&self, html: &str) {
            self.events
                .borrow_mut()
                .push(ViewEvent::FileList(html.to_string()));
        }

        fn set_dropdown(&self, html: Option<&str>) {
            self.events
                .borrow_mut()
                .push(ViewEvent::Dropdown(html.map(str::to_string)));
        }

        fn set_clear_visible(&self, visible: bool) {
            self.events
                .borrow_mut()
                .push(ViewEvent::ClearVisible(visible));
        }

        fn clear_search_input(&self) {
            self.events.borrow_mut().push(ViewEvent::ClearSearch);
        }

        fn clear_filter_inputs(&self) {
            self.events.borrow_mut().push(ViewEvent::ClearFilters);
        }

        fn start_download(&self, url: &str, file_name: &str) {
            self.events.borrow_mut().push(ViewEvent::Download(
                url.to_string(),
                file_name.to_string(),
            ));
        }
    }
}
