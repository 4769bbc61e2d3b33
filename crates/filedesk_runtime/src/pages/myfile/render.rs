//! HTML for the card grid and search dropdown.
//!
//! Markup is rendered into containers that live inside the fetched page fragment, so it is
//! produced as escaped HTML strings and wired through delegated `data-action` /
//! `data-file-index` attributes.

use std::fmt::{Display, Write};

use chrono::TimeZone;
use html_escape::{encode_double_quoted_attribute, encode_text};
use platform_host::{format_file_size, format_timestamp, FileRecord, TimestampFormat};

use super::CardAction;

/// Placeholder shown while the listing loads.
pub const LOADING_HTML: &str =
    r#"<div class="file-list-loading"><i class="fas fa-spinner fa-spin"></i> Loading...</div>"#;

const EMPTY_HTML: &str = r#"<div class="file-list-empty">No files found</div>"#;

fn action_button(action: CardAction, index: usize) -> String {
    format!(
        r#"<button type="button" class="file-card-action" data-action="{}" data-file-index="{index}" title="{}"><i class="fas {}"></i></button>"#,
        action.token(),
        action.label(),
        action.glyph(),
    )
}

/// Card grid for `files`; `data-file-index` is the position in `files`.
pub fn render_file_cards<Tz>(files: &[FileRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if files.is_empty() {
        return EMPTY_HTML.to_string();
    }
    let mut html = String::new();
    for (index, file) in files.iter().enumerate() {
        let name = encode_text(&file.file_name);
        let title = encode_double_quoted_attribute(&file.file_name);
        let created = format_timestamp(file.created_at.as_deref(), tz, TimestampFormat::default());
        let actions: String = CardAction::ALL
            .into_iter()
            .map(|action| action_button(action, index))
            .collect();
        let _ = write!(
            html,
            r#"<div class="file-card" data-file-index="{index}" data-category="{category}"><div class="file-card-icon"><i class="fas {icon}"></i></div><div class="file-card-name" title="{title}">{name}</div><div class="file-card-meta"><span class="file-card-size">{size}</span><span class="file-card-date">{created}</span></div><div class="file-card-actions">{actions}</div></div>"#,
            category = file.category().token(),
            icon = file.category().icon(),
            size = format_file_size(file.file_size),
        );
    }
    html
}

/// Search dropdown entries; `data-file-index` is the position in `matches`.
pub fn render_search_dropdown<Tz>(matches: &[FileRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if matches.is_empty() {
        return r#"<div class="search-result-empty">No matching files</div>"#.to_string();
    }
    matches
        .iter()
        .enumerate()
        .map(|(index, file)| {
            format!(
                r#"<div class="search-result-item" data-file-index="{index}"><i class="fas {icon}"></i><span class="search-result-name">{name}</span><span class="search-result-date">{date}</span></div>"#,
                icon = file.category().icon(),
                name = encode_text(&file.file_name),
                date = format_timestamp(file.created_at.as_deref(), tz, TimestampFormat::default()),
            )
        })
        .collect()
}
