//! Display formatting for file sizes, timestamps, and file-type labels.

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary (1024) units and at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Options for [`format_timestamp`].
pub struct TimestampFormat<'a> {
    /// Text returned when the timestamp is absent or unparseable.
    pub fallback: &'a str,
    /// Whether to include seconds.
    pub show_seconds: bool,
}

impl Default for TimestampFormat<'_> {
    fn default() -> Self {
        Self {
            fallback: "-",
            show_seconds: false,
        }
    }
}

/// Parses a backend timestamp.
///
/// Accepts RFC 3339 and the zone-less `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` forms, the
/// latter interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Formats a backend timestamp in `tz` as `YYYY/MM/DD HH:MM[:SS]`.
pub fn format_timestamp<Tz>(raw: Option<&str>, tz: &Tz, format: TimestampFormat<'_>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(parsed) = raw.and_then(parse_timestamp) else {
        return format.fallback.to_string();
    };
    let pattern = if format.show_seconds {
        "%Y/%m/%d %H:%M:%S"
    } else {
        "%Y/%m/%d %H:%M"
    };
    parsed.with_timezone(tz).format(pattern).to_string()
}

/// Returns a short human-readable type label derived from the file extension.
pub fn file_type_label(file_name: &str) -> String {
    let extension = match file_name.rfind('.') {
        Some(index) if index > 0 && index + 1 < file_name.len() => {
            file_name[index + 1..].to_ascii_lowercase()
        }
        _ => return "File".to_string(),
    };
    let upper = extension.to_ascii_uppercase();
    match extension.as_str() {
        "pdf" => "PDF document".to_string(),
        "doc" | "docx" => "Word document".to_string(),
        "xls" | "xlsx" => "Excel spreadsheet".to_string(),
        "ppt" | "pptx" => "PowerPoint presentation".to_string(),
        "txt" | "md" => "Text document".to_string(),
        "jpg" | "jpeg" | "png" | "gif" | "webp" | "svg" | "bmp" => format!("{upper} image"),
        "mp4" | "mov" | "webm" | "mkv" | "avi" => format!("{upper} video"),
        "mp3" | "wav" | "flac" | "ogg" | "m4a" => format!("{upper} audio"),
        "zip" | "rar" | "7z" | "tar" | "gz" => format!("{upper} archive"),
        _ => format!("{upper} file"),
    }
}
