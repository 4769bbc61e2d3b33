use std::fmt::Display;

use chrono::TimeZone;
use leptos::*;
use platform_host::{
    file_type_label, format_file_size, format_timestamp, FileRecord, TimestampFormat,
};
use system_ui::{Button, Tone};

use crate::engine::{DialogHandle, DialogSpec};
use crate::platform::DialogContent;

/// Placeholder for absent timestamps in the info dialog.
pub const INFO_FALLBACK: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Label/value rows shown by the file info dialog.
pub struct FileInfoRows(pub Vec<(&'static str, String)>);

impl FileInfoRows {
    /// Formats `file` with timestamps rendered in `tz`.
    pub fn new<Tz>(file: &FileRecord, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let stamp = |raw: &Option<String>| {
            format_timestamp(
                raw.as_deref(),
                tz,
                TimestampFormat {
                    fallback: INFO_FALLBACK,
                    show_seconds: true,
                },
            )
        };
        Self(vec![
            ("Name", file.file_name.clone()),
            ("Type", file_type_label(&file.file_name)),
            ("Size", format_file_size(file.file_size)),
            ("Created", stamp(&file.created_at)),
            ("Modified", stamp(&file.modified_at)),
            ("Last opened", stamp(&file.last_opened_at)),
        ])
    }
}

/// Builds the read-only info dialog; it always closes with `None`.
pub fn file_info_dialog(rows: FileInfoRows, on_close: impl FnOnce() + 'static) -> DialogSpec<()> {
    DialogSpec::new(
        Tone::Info,
        "File info",
        move |handle: &DialogHandle<()>| {
            let handle = handle.clone();
            DialogContent {
                body: ViewFn::from(move || {
                    rows.0
                        .iter()
                        .map(|(label, value)| {
                            view! {
                                <div class="file-info-row">
                                    <span class="file-info-label">{*label}</span>
                                    <span class="file-info-value">{value.clone()}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }),
                footer: ViewFn::from(move || {
                    let handle = handle.clone();
                    view! {
                        <Button on_click=Callback::new(move |_| handle.dismiss())>"OK"</Button>
                    }
                }),
            }
        },
        move |_| on_close(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rows_show_seconds_and_fallbacks() {
        let file = FileRecord {
            file_name: "photo.png".to_string(),
            file_size: 1536,
            file_type: "image/png".to_string(),
            created_at: Some("2026-03-01T10:05:09Z".to_string()),
            modified_at: None,
            last_opened_at: Some("garbled".to_string()),
        };

        let FileInfoRows(rows) = FileInfoRows::new(&file, &Utc);

        assert_eq!(
            rows,
            vec![
                ("Name", "photo.png".to_string()),
                ("Type", "PNG image".to_string()),
                ("Size", "1.5 KB".to_string()),
                ("Created", "2026/03/01 10:05:09".to_string()),
                ("Modified", "N/A".to_string()),
                ("Last opened", "N/A".to_string()),
            ]
        );
    }

    #[test]
    fn every_dismissal_path_reports_close() {
        let (engine, platform) = crate::engine::testing::engine();
        let closed = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = closed.clone();
        engine.open(file_info_dialog(
            FileInfoRows::new(&FileRecord::named("a.txt"), &Utc),
            move || counter.set(counter.get() + 1),
        ));
        platform.run_frames();

        platform.press_escape();
        platform.click_backdrop();
        platform.settle();

        assert_eq!(closed.get(), 1);
    }
}
