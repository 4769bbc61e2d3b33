//! "My files" page: card grid, search dropdown, filters, and per-card actions.

mod handlers;
pub mod render;
pub mod state;

use std::rc::Rc;

use leptos::{logging, spawn_local};
use web_sys::{Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

pub use handlers::{MyFilePage, MyFileView};
pub use state::{filter_files, search_files, search_keyword, FileFilter, FileListState};

use super::dom::{self, closest_in_event, data_file_index};
use super::{PageServices, PageSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Button on a file card.
pub enum CardAction {
    /// Open the preview overlay.
    Preview,
    /// Show the info dialog.
    Info,
    /// Rename through the prompt dialog.
    Rename,
    /// Download from the uploads path.
    Download,
    /// Delete after confirmation.
    Delete,
}

impl CardAction {
    /// Buttons in card order.
    pub const ALL: [CardAction; 5] = [
        Self::Preview,
        Self::Info,
        Self::Rename,
        Self::Download,
        Self::Delete,
    ];

    /// `data-action` value.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Info => "info",
            Self::Rename => "rename",
            Self::Download => "download",
            Self::Delete => "delete",
        }
    }

    /// Parses a `data-action` value.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.token() == token)
    }

    /// Tooltip text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Preview => "Preview",
            Self::Info => "File info",
            Self::Rename => "Rename",
            Self::Download => "Download",
            Self::Delete => "Delete",
        }
    }

    /// Font Awesome glyph.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Preview => "fa-eye",
            Self::Info => "fa-info-circle",
            Self::Rename => "fa-pen",
            Self::Download => "fa-download",
            Self::Delete => "fa-trash-alt",
        }
    }
}

const FILE_LIST_ID: &str = "file-list";
const SEARCH_INPUT_ID: &str = "search-input";
const SEARCH_CLEAR_ID: &str = "search-clear";
const SEARCH_DROPDOWN_ID: &str = "search-dropdown";
const FILTER_TYPE_ID: &str = "filter-type";
const FILTER_START_ID: &str = "filter-date-start";
const FILTER_END_ID: &str = "filter-date-end";
const FILTER_RESET_ID: &str = "filter-reset";

#[derive(Debug, Clone, Copy, Default)]
/// [`MyFileView`] over the elements of the loaded page fragment.
pub struct DomMyFileView;

impl DomMyFileView {
    fn set_display(id: &str, display: &str) {
        if let Some(element) = dom::element_by_id::<HtmlElement>(id) {
            if let Err(err) = element.style().set_property("display", display) {
                logging::warn!("failed to style #{id}: {err:?}");
            }
        }
    }
}

impl MyFileView for DomMyFileView {
    fn set_file_list(&self, html: &str) {
        match dom::element_by_id::<HtmlElement>(FILE_LIST_ID) {
            Some(list) => list.set_inner_html(html),
            None => logging::warn!("#{FILE_LIST_ID} is missing from the page"),
        }
    }

    fn set_dropdown(&self, html: Option<&str>) {
        let Some(dropdown) = dom::element_by_id::<HtmlElement>(SEARCH_DROPDOWN_ID) else {
            return;
        };
        match html {
            Some(html) => {
                dropdown.set_inner_html(html);
                Self::set_display(SEARCH_DROPDOWN_ID, "block");
            }
            None => {
                dropdown.set_inner_html("");
                Self::set_display(SEARCH_DROPDOWN_ID, "none");
            }
        }
    }

    fn set_clear_visible(&self, visible: bool) {
        Self::set_display(SEARCH_CLEAR_ID, if visible { "flex" } else { "none" });
    }

    fn clear_search_input(&self) {
        if let Some(input) = dom::element_by_id::<HtmlInputElement>(SEARCH_INPUT_ID) {
            input.set_value("");
        }
    }

    fn clear_filter_inputs(&self) {
        if let Some(select) = dom::element_by_id::<HtmlSelectElement>(FILTER_TYPE_ID) {
            select.set_value("");
        }
        for id in [FILTER_START_ID, FILTER_END_ID] {
            if let Some(input) = dom::element_by_id::<HtmlInputElement>(id) {
                input.set_value("");
            }
        }
    }

    fn start_download(&self, url: &str, file_name: &str) {
        if let Err(err) = dom::click_download_link(url, file_name) {
            logging::warn!("download of {file_name} failed: {err}");
        }
    }
}

fn read_filter() -> FileFilter {
    let category = dom::element_by_id::<HtmlSelectElement>(FILTER_TYPE_ID)
        .map(|select| select.value())
        .unwrap_or_default();
    let date = |id| {
        dom::element_by_id::<HtmlInputElement>(id)
            .map(|input| input.value())
            .unwrap_or_default()
    };
    FileFilter::from_inputs(&category, &date(FILTER_START_ID), &date(FILTER_END_ID))
}

fn search_value() -> String {
    dom::element_by_id::<HtmlInputElement>(SEARCH_INPUT_ID)
        .map(|input| input.value())
        .unwrap_or_default()
}

fn on_card_click(page: &MyFilePage, event: &Event) {
    let (action, index) = match closest_in_event(event, "[data-action]") {
        Some(button) => {
            let token = button.get_attribute("data-action").unwrap_or_default();
            let Some(action) = CardAction::from_token(&token) else {
                logging::warn!("unknown card action {token:?}");
                return;
            };
            (action, data_file_index(&button))
        }
        None => match closest_in_event(event, ".file-card") {
            Some(card) => (CardAction::Preview, data_file_index(&card)),
            None => return,
        },
    };
    let Some(index) = index else {
        return;
    };
    let page = page.clone();
    spawn_local(async move { page.card_action(action, index).await });
}

/// Binds the page to the freshly loaded fragment and starts the listing.
pub fn activate(services: PageServices) -> PageSession {
    let page = MyFilePage::new(
        services,
        FileListState::default(),
        Rc::new(DomMyFileView),
    );
    let mut session = PageSession::default();

    session.bind_id(FILE_LIST_ID, "click", {
        let page = page.clone();
        move |event| on_card_click(&page, &event)
    });
    session.bind_id(SEARCH_INPUT_ID, "input", {
        let page = page.clone();
        move |_| page.search_input(&search_value())
    });
    session.bind_id(SEARCH_INPUT_ID, "focus", {
        let page = page.clone();
        move |_| page.search_focus(&search_value())
    });
    session.bind_id(SEARCH_CLEAR_ID, "click", {
        let page = page.clone();
        move |_| page.clear_search()
    });
    session.bind_id(SEARCH_DROPDOWN_ID, "click", {
        let page = page.clone();
        move |event| {
            let Some(index) = closest_in_event(&event, ".search-result-item")
                .as_ref()
                .and_then(data_file_index)
            else {
                return;
            };
            let page = page.clone();
            spawn_local(async move { page.select_match(index).await });
        }
    });
    session.bind_document("click", {
        let page = page.clone();
        move |event| {
            if closest_in_event(&event, ".search-box").is_none() {
                page.dismiss_dropdown();
            }
        }
    });
    for id in [FILTER_TYPE_ID, FILTER_START_ID, FILTER_END_ID] {
        session.bind_id(id, "change", {
            let page = page.clone();
            move |_| page.apply_filter(&read_filter())
        });
    }
    session.bind_id(FILTER_RESET_ID, "click", {
        let page = page.clone();
        move |_| page.reset_filters()
    });

    spawn_local(async move { page.load_files().await });
    session
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tokens_parse_back() {
        for action in CardAction::ALL {
            assert_eq!(CardAction::from_token(action.token()), Some(action));
        }
        assert_eq!(CardAction::from_token("share"), None);
    }
}
