//! Statistics page: storage totals computed from the file listing.

use std::{collections::BTreeMap, fmt::Write, rc::Rc};

use chrono::{Local, TimeZone};
use html_escape::encode_text;
use leptos::{logging, spawn_local};
use platform_host::{
    format_file_size, format_timestamp, parse_timestamp, FileApiService, FileCategory, FileRecord,
    TimestampFormat,
};
use web_sys::HtmlElement;

use super::dom;
use super::{PageServices, PageSession};

/// Entries in the "recent uploads" list.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Count and size of one category.
pub struct CategoryUsage {
    /// Number of files.
    pub count: usize,
    /// Sum of sizes in bytes.
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Aggregate storage figures.
pub struct StorageStats {
    /// Number of files.
    pub total_files: usize,
    /// Sum of sizes in bytes.
    pub total_bytes: u64,
    /// Usage per category; categories without files are absent.
    pub by_category: BTreeMap<FileCategory, CategoryUsage>,
    /// Largest file, first one wins on ties.
    pub largest: Option<FileRecord>,
    /// Most recently uploaded files, newest first; undated files are left out.
    pub recent: Vec<FileRecord>,
}

impl StorageStats {
    /// Computes the figures for `files`.
    pub fn from_files(files: &[FileRecord]) -> Self {
        let mut stats = Self {
            total_files: files.len(),
            ..Self::default()
        };
        for file in files {
            stats.total_bytes += file.file_size;
            let usage = stats.by_category.entry(file.category()).or_default();
            usage.count += 1;
            usage.bytes += file.file_size;
            if stats
                .largest
                .as_ref()
                .map_or(true, |largest| file.file_size > largest.file_size)
            {
                stats.largest = Some(file.clone());
            }
        }

        let mut dated: Vec<_> = files
            .iter()
            .filter_map(|file| {
                let created = parse_timestamp(file.created_at.as_deref()?)?;
                Some((created, file))
            })
            .collect();
        dated.sort_by(|a, b| b.0.cmp(&a.0));
        stats.recent = dated
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|(_, file)| file.clone())
            .collect();
        stats
    }
}

/// Markup rendered into `#stats-root`.
pub fn render_stats<Tz>(stats: &StorageStats, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="stats-summary"><div class="stats-card"><span class="stats-value">{}</span><span class="stats-label">Files</span></div><div class="stats-card"><span class="stats-value">{}</span><span class="stats-label">Total size</span></div></div>"#,
        stats.total_files,
        format_file_size(stats.total_bytes),
    );

    html.push_str(r#"<div class="stats-categories">"#);
    for (category, usage) in &stats.by_category {
        let _ = write!(
            html,
            r#"<div class="stats-category" data-category="{}"><i class="fas {}"></i><span class="stats-category-label">{}</span><span class="stats-category-count">{}</span><span class="stats-category-size">{}</span></div>"#,
            category.token(),
            category.icon(),
            category.label(),
            usage.count,
            format_file_size(usage.bytes),
        );
    }
    html.push_str("</div>");

    if let Some(largest) = &stats.largest {
        let _ = write!(
            html,
            r#"<div class="stats-largest"><span class="stats-label">Largest file</span><span class="stats-largest-name">{}</span><span class="stats-largest-size">{}</span></div>"#,
            encode_text(&largest.file_name),
            format_file_size(largest.file_size),
        );
    }

    html.push_str(r#"<ul class="stats-recent">"#);
    for file in &stats.recent {
        let _ = write!(
            html,
            r#"<li class="stats-recent-item"><span class="stats-recent-name">{}</span><span class="stats-recent-date">{}</span></li>"#,
            encode_text(&file.file_name),
            format_timestamp(file.created_at.as_deref(), tz, TimestampFormat::default()),
        );
    }
    html.push_str("</ul>");
    html
}

/// Lists the files and computes their statistics; a failed listing counts as empty.
pub async fn load_stats(api: &dyn FileApiService) -> StorageStats {
    match api.list_files().await {
        Ok(files) => StorageStats::from_files(&files),
        Err(err) => {
            logging::warn!("failed to list files for statistics: {err}");
            StorageStats::default()
        }
    }
}

const STATS_ROOT_ID: &str = "stats-root";

/// Fills `#stats-root` once the listing arrives.
pub fn activate(services: PageServices) -> PageSession {
    let files = Rc::clone(&services.files);
    spawn_local(async move {
        let stats = load_stats(files.as_ref()).await;
        match dom::element_by_id::<HtmlElement>(STATS_ROOT_ID) {
            Some(root) => root.set_inner_html(&render_stats(&stats, &Local)),
            None => logging::warn!("#{STATS_ROOT_ID} is missing from the page"),
        }
    });
    PageSession::default()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use futures::executor::block_on;
    use platform_host::{FetchError, MemoryFileApiService};
    use pretty_assertions::assert_eq;

    use super::*;

    fn file(name: &str, size: u64, mime: &str, created: Option<&str>) -> FileRecord {
        FileRecord {
            file_size: size,
            file_type: mime.to_string(),
            created_at: created.map(str::to_string),
            ..FileRecord::named(name)
        }
    }

    fn names(files: &[FileRecord]) -> Vec<&str> {
        files.iter().map(|file| file.file_name.as_str()).collect()
    }

    #[test]
    fn totals_and_categories_add_up() {
        let stats = StorageStats::from_files(&[
            file("a.png", 100, "image/png", None),
            file("b.jpg", 300, "image/jpeg", None),
            file("c.pdf", 50, "application/pdf", None),
        ]);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_bytes, 450);
        assert_eq!(
            stats.by_category.get(&FileCategory::Image),
            Some(&CategoryUsage {
                count: 2,
                bytes: 400
            })
        );
        assert_eq!(stats.by_category.get(&FileCategory::Video), None);
        assert_eq!(stats.largest.map(|file| file.file_name), Some("b.jpg".to_string()));
    }

    #[test]
    fn recent_keeps_the_five_newest_dated_files() {
        let files: Vec<_> = (1..=7)
            .map(|day| {
                file(
                    &format!("f{day}.txt"),
                    1,
                    "text/plain",
                    Some(&format!("2026-03-0{day}T08:00:00Z")),
                )
            })
            .chain([file("undated.txt", 1, "text/plain", None)])
            .collect();

        let stats = StorageStats::from_files(&files);

        assert_eq!(
            names(&stats.recent),
            vec!["f7.txt", "f6.txt", "f5.txt", "f4.txt", "f3.txt"]
        );
    }

    #[test]
    fn empty_listing_has_no_largest_file() {
        let stats = StorageStats::from_files(&[]);

        assert_eq!(stats, StorageStats::default());
        assert!(!render_stats(&stats, &Utc).contains("stats-largest"));
    }

    #[test]
    fn failed_listing_yields_empty_stats() {
        let api = MemoryFileApiService::with_files([FileRecord::named("a.txt")]);
        api.fail_listing(FetchError::Status(500));

        assert_eq!(block_on(load_stats(&api)), StorageStats::default());
    }

    #[test]
    fn rendering_shows_totals_and_escapes_names() {
        let stats = StorageStats::from_files(&[file(
            "<b>.png",
            2048,
            "image/png",
            Some("2026-03-01T10:00:00Z"),
        )]);

        let html = render_stats(&stats, &Utc);

        assert!(html.contains(r#"<span class="stats-value">2 KB</span>"#));
        assert!(html.contains(r#"data-category="image""#));
        assert!(html.contains("&lt;b&gt;.png"));
        assert!(html.contains("2026/03/01 10:00"));
    }
}
