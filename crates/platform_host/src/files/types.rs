//! File records and request/response payloads exchanged with the backend file API.

use serde::{Deserialize, Serialize};

use crate::FetchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One stored file as reported by the backend listing.
pub struct FileRecord {
    /// File name including extension; doubles as the backend identifier.
    pub file_name: String,
    /// Size in bytes.
    #[serde(default)]
    pub file_size: u64,
    /// MIME type reported at upload time.
    #[serde(default)]
    pub file_type: String,
    /// Upload time (RFC 3339).
    pub created_at: Option<String>,
    /// Last modification time (RFC 3339).
    pub modified_at: Option<String>,
    /// Last time the file was opened through the API (RFC 3339).
    pub last_opened_at: Option<String>,
}

impl FileRecord {
    /// Builds a record with only a name, leaving every other field empty.
    pub fn named(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_size: 0,
            file_type: String::new(),
            created_at: None,
            modified_at: None,
            last_opened_at: None,
        }
    }

    /// Returns the coarse category derived from the MIME type.
    pub fn category(&self) -> FileCategory {
        FileCategory::from_mime(&self.file_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Coarse file category used by filters, statistics, and preview selection.
pub enum FileCategory {
    /// `image/*`
    Image,
    /// `video/*`
    Video,
    /// `audio/*`
    Audio,
    /// Text, PDF, and office formats.
    Document,
    /// Compressed archives.
    Archive,
    /// Anything else.
    Other,
}

impl FileCategory {
    /// Every category in display order.
    pub const ALL: [FileCategory; 6] = [
        Self::Image,
        Self::Video,
        Self::Audio,
        Self::Document,
        Self::Archive,
        Self::Other,
    ];

    /// Classifies a MIME type.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            return Self::Image;
        }
        if mime.starts_with("video/") {
            return Self::Video;
        }
        if mime.starts_with("audio/") {
            return Self::Audio;
        }
        if mime.starts_with("text/")
            || mime == "application/pdf"
            || mime == "application/json"
            || mime == "application/rtf"
            || mime == "application/msword"
            || mime.starts_with("application/vnd.ms-")
            || mime.starts_with("application/vnd.openxmlformats-officedocument")
            || mime.starts_with("application/vnd.oasis.opendocument")
        {
            return Self::Document;
        }
        match mime.as_str() {
            "application/zip"
            | "application/x-zip-compressed"
            | "application/x-rar-compressed"
            | "application/vnd.rar"
            | "application/x-7z-compressed"
            | "application/gzip"
            | "application/x-gzip"
            | "application/x-tar"
            | "application/x-bzip2" => Self::Archive,
            _ => Self::Other,
        }
    }

    /// Stable token used in `<select>` values and CSS hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Archive => "archive",
            Self::Other => "other",
        }
    }

    /// Parses a token produced by [`FileCategory::token`].
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.token() == token)
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "Images",
            Self::Video => "Videos",
            Self::Audio => "Audio",
            Self::Document => "Documents",
            Self::Archive => "Archives",
            Self::Other => "Other",
        }
    }

    /// Font Awesome glyph for cards and list rows.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Image => "fa-file-image",
            Self::Video => "fa-file-video",
            Self::Audio => "fa-file-audio",
            Self::Document => "fa-file-alt",
            Self::Archive => "fa-file-archive",
            Self::Other => "fa-file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Response envelope wrapped around every JSON backend reply.
pub struct ApiEnvelope<T> {
    /// Whether the backend considers the request successful.
    pub success: bool,
    /// Payload on success.
    pub data: Option<T>,
    /// Failure (or informational) message.
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Converts the envelope into a `Result`, mapping `success: false` to
    /// [`FetchError::Rejected`].
    pub fn into_result(self) -> Result<Option<T>, FetchError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(FetchError::Rejected(
                self.message
                    .unwrap_or_else(|| "request rejected by server".to_string()),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON body of the rename endpoint.
pub struct RenameRequest {
    /// Current file name.
    pub old_file_name: String,
    /// Requested file name.
    pub new_file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw file contents fetched for preview.
pub struct FilePayload {
    /// Response body.
    pub bytes: Vec<u8>,
    /// Response content type, `application/octet-stream` when absent.
    pub mime: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// File selected by the user and queued for upload.
pub struct UploadFile {
    /// File name as picked.
    pub name: String,
    /// Browser-reported MIME type.
    pub mime: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// An item that failed as part of a batch, with a reason.
pub struct FailedItem {
    /// Item (file) name.
    pub name: String,
    /// User-facing failure reason.
    pub reason: String,
}

impl FailedItem {
    /// Builds a failure entry.
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
