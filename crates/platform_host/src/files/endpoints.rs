//! URL layout of the backend file API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Base URL and path prefixes for the backend file API.
pub struct ApiEndpoints {
    /// Origin prefix; empty for same-origin deployments.
    pub base_url: String,
    /// Path of the file collection resource.
    pub files_path: String,
    /// Path under which raw uploads are served for download.
    pub uploads_path: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            files_path: "/api/files".to_string(),
            uploads_path: "/uploads".to_string(),
        }
    }
}

impl ApiEndpoints {
    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// `GET` listing URL.
    pub fn list_url(&self) -> String {
        format!("{}{}", self.base(), self.files_path)
    }

    /// Per-file URL used for fetch and delete.
    pub fn file_url(&self, file_name: &str) -> String {
        format!("{}/file/{}", self.list_url(), urlencoding::encode(file_name))
    }

    /// `PUT` rename URL.
    pub fn rename_url(&self) -> String {
        format!("{}/rename", self.list_url())
    }

    /// `POST` multipart upload URL.
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.list_url())
    }

    /// Direct download URL for a stored file.
    pub fn download_url(&self, file_name: &str) -> String {
        format!(
            "{}{}/{}",
            self.base(),
            self.uploads_path,
            urlencoding::encode(file_name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_urls_percent_encode_names() {
        let endpoints = ApiEndpoints::default();

        assert_eq!(endpoints.list_url(), "/api/files");
        assert_eq!(
            endpoints.file_url("my report #2.pdf"),
            "/api/files/file/my%20report%20%232.pdf"
        );
        assert_eq!(endpoints.rename_url(), "/api/files/rename");
        assert_eq!(endpoints.upload_url(), "/api/files/upload");
        assert_eq!(endpoints.download_url("a b.png"), "/uploads/a%20b.png");
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let endpoints = ApiEndpoints {
            base_url: "https://files.example.com/".to_string(),
            ..ApiEndpoints::default()
        };

        assert_eq!(endpoints.list_url(), "https://files.example.com/api/files");
    }
}
