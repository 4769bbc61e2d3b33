//! `fetch`-backed adapter for the backend file API.

use platform_host::{
    ApiEndpoints, FetchError, FileApiFuture, FileApiService, FilePayload, FileRecord, UploadFile,
};

use crate::bridge;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Backend file API adapter that talks to the REST endpoints through `window.fetch`.
pub struct HttpFileApiService {
    endpoints: ApiEndpoints,
}

impl HttpFileApiService {
    /// Creates an adapter for `endpoints`.
    pub fn new(endpoints: ApiEndpoints) -> Self {
        Self { endpoints }
    }

    /// Endpoint layout this adapter calls.
    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }
}

impl FileApiService for HttpFileApiService {
    fn list_files<'a>(&'a self) -> FileApiFuture<'a, Result<Vec<FileRecord>, FetchError>> {
        Box::pin(bridge::list_files(&self.endpoints))
    }

    fn delete_file<'a>(&'a self, file_name: &'a str) -> FileApiFuture<'a, Result<(), FetchError>> {
        Box::pin(bridge::delete_file(&self.endpoints, file_name))
    }

    fn rename_file<'a>(
        &'a self,
        old_file_name: &'a str,
        new_file_name: &'a str,
    ) -> FileApiFuture<'a, Result<(), FetchError>> {
        Box::pin(bridge::rename_file(
            &self.endpoints,
            old_file_name,
            new_file_name,
        ))
    }

    fn fetch_file<'a>(
        &'a self,
        file_name: &'a str,
    ) -> FileApiFuture<'a, Result<FilePayload, FetchError>> {
        Box::pin(bridge::fetch_file(&self.endpoints, file_name))
    }

    fn upload_file<'a>(
        &'a self,
        upload: &'a UploadFile,
    ) -> FileApiFuture<'a, Result<(), FetchError>> {
        Box::pin(bridge::upload_file(&self.endpoints, upload))
    }
}

/// Reads a picked or dropped browser file into an [`UploadFile`].
///
/// # Errors
///
/// Returns the JS error message when the file cannot be read, or an explanation on non-wasm
/// targets.
pub async fn read_browser_file(file: &web_sys::File) -> Result<UploadFile, String> {
    bridge::read_browser_file(file).await
}
