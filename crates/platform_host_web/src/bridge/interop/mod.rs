//! Shared transport interop for browser bridge domains.
//!
//! Calls are routed to target-specific implementations so the bridge domain modules stay
//! target-agnostic.

use platform_host::{FetchError, FilePayload, UploadFile};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

#[cfg(target_arch = "wasm32")]
pub use wasm::NotifyInstance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// HTTP method used by [`request_json`].
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    imp::fetch_text(url).await
}

pub async fn request_json<T: DeserializeOwned>(
    method: Method,
    url: &str,
    json_body: Option<&str>,
) -> Result<T, FetchError> {
    imp::request_json(method, url, json_body).await
}

pub async fn fetch_bytes(url: &str) -> Result<FilePayload, FetchError> {
    imp::fetch_bytes(url).await
}

pub async fn post_multipart<T: DeserializeOwned>(
    url: &str,
    field: &str,
    upload: &UploadFile,
) -> Result<T, FetchError> {
    imp::post_multipart(url, field, upload).await
}

pub fn create_object_url(bytes: &[u8], mime: &str) -> Result<String, String> {
    imp::create_object_url(bytes, mime)
}

pub fn revoke_object_url(url: &str) -> Result<(), String> {
    imp::revoke_object_url(url)
}

#[cfg(target_arch = "wasm32")]
pub fn show_notify(options: &crate::notifications::NotifyOptions) -> Result<NotifyInstance, String> {
    imp::show_notify(options)
}

pub async fn read_browser_file(file: &web_sys::File) -> Result<UploadFile, String> {
    imp::read_browser_file(file).await
}

pub fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}
