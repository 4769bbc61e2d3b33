use platform_host::{FetchError, FilePayload, UploadFile};
use serde::de::DeserializeOwned;

use super::Method;

fn unsupported() -> FetchError {
    FetchError::Unavailable("browser fetch is only available when compiled for wasm32".to_string())
}

pub async fn fetch_text(_url: &str) -> Result<String, FetchError> {
    Err(unsupported())
}

pub async fn request_json<T: DeserializeOwned>(
    _method: Method,
    _url: &str,
    _json_body: Option<&str>,
) -> Result<T, FetchError> {
    Err(unsupported())
}

pub async fn fetch_bytes(_url: &str) -> Result<FilePayload, FetchError> {
    Err(unsupported())
}

pub async fn post_multipart<T: DeserializeOwned>(
    _url: &str,
    _field: &str,
    _upload: &UploadFile,
) -> Result<T, FetchError> {
    Err(unsupported())
}

pub fn create_object_url(_bytes: &[u8], _mime: &str) -> Result<String, String> {
    Err("object URLs are only available when compiled for wasm32".to_string())
}

pub fn revoke_object_url(_url: &str) -> Result<(), String> {
    Ok(())
}

pub async fn read_browser_file(_file: &web_sys::File) -> Result<UploadFile, String> {
    Err("browser files are only available when compiled for wasm32".to_string())
}
