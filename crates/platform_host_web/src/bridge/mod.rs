//! Browser capability bridge for `platform_host_web` service adapters.
//!
//! Domain calls (fragments, backend files, object URLs, notifications) are expressed here over
//! the target-split transport in `interop`.

mod interop;

use platform_host::{
    ApiEndpoints, ApiEnvelope, FetchError, FilePayload, FileRecord, RenameRequest, UploadFile,
};
use serde_json::Value;

use interop::Method;

pub(crate) use interop::{js_error_to_string, read_browser_file};
#[cfg(target_arch = "wasm32")]
pub(crate) use interop::{show_notify, NotifyInstance};

/// Multipart field name the upload endpoint reads.
const UPLOAD_FIELD: &str = "file";

pub async fn load_fragment(url: &str) -> Result<String, FetchError> {
    interop::fetch_text(url).await
}

pub async fn list_files(endpoints: &ApiEndpoints) -> Result<Vec<FileRecord>, FetchError> {
    let envelope: ApiEnvelope<Vec<FileRecord>> =
        interop::request_json(Method::Get, &endpoints.list_url(), None).await?;
    Ok(envelope.into_result()?.unwrap_or_default())
}

pub async fn delete_file(endpoints: &ApiEndpoints, file_name: &str) -> Result<(), FetchError> {
    let envelope: ApiEnvelope<Value> =
        interop::request_json(Method::Delete, &endpoints.file_url(file_name), None).await?;
    envelope.into_result().map(|_| ())
}

pub async fn rename_file(
    endpoints: &ApiEndpoints,
    old_file_name: &str,
    new_file_name: &str,
) -> Result<(), FetchError> {
    let body = serde_json::to_string(&RenameRequest {
        old_file_name: old_file_name.to_string(),
        new_file_name: new_file_name.to_string(),
    })
    .map_err(|err| FetchError::Decode(err.to_string()))?;
    let envelope: ApiEnvelope<Value> =
        interop::request_json(Method::Put, &endpoints.rename_url(), Some(&body)).await?;
    envelope.into_result().map(|_| ())
}

pub async fn fetch_file(endpoints: &ApiEndpoints, file_name: &str) -> Result<FilePayload, FetchError> {
    interop::fetch_bytes(&endpoints.file_url(file_name)).await
}

pub async fn upload_file(endpoints: &ApiEndpoints, upload: &UploadFile) -> Result<(), FetchError> {
    let envelope: ApiEnvelope<Value> =
        interop::post_multipart(&endpoints.upload_url(), UPLOAD_FIELD, upload).await?;
    envelope.into_result().map(|_| ())
}

pub fn create_object_url(bytes: &[u8], mime: &str) -> Result<String, String> {
    interop::create_object_url(bytes, mime)
}

pub fn revoke_object_url(url: &str) -> Result<(), String> {
    interop::revoke_object_url(url)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_api_public_calls_are_unavailable_off_wasm() {
        let endpoints = ApiEndpoints::default();
        let upload = UploadFile {
            name: "a.txt".to_string(),
            mime: "text/plain".to_string(),
            bytes: b"hi".to_vec(),
        };

        assert!(matches!(
            block_on(list_files(&endpoints)),
            Err(FetchError::Unavailable(_))
        ));
        assert!(matches!(
            block_on(delete_file(&endpoints, "a.txt")),
            Err(FetchError::Unavailable(_))
        ));
        assert!(matches!(
            block_on(rename_file(&endpoints, "a.txt", "b.txt")),
            Err(FetchError::Unavailable(_))
        ));
        assert!(matches!(
            block_on(fetch_file(&endpoints, "a.txt")),
            Err(FetchError::Unavailable(_))
        ));
        assert!(matches!(
            block_on(upload_file(&endpoints, &upload)),
            Err(FetchError::Unavailable(_))
        ));
        assert!(matches!(
            block_on(load_fragment("/pages/myfile.html")),
            Err(FetchError::Unavailable(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn object_urls_are_refused_off_wasm_but_revoke_is_harmless() {
        assert!(create_object_url(b"png", "image/png").is_err());
        assert_eq!(revoke_object_url("blob:abc"), Ok(()));
    }
}
