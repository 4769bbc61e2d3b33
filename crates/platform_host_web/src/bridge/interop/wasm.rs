use js_sys::{Array, Uint8Array};
use platform_host::{FetchError, FilePayload, UploadFile};
use serde::de::DeserializeOwned;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, Response, Url};

use super::{js_error_to_string, Method};
use crate::notifications::NotifyOptions;

#[wasm_bindgen]
extern "C" {
    /// Simple-Notify toast instance; the class is loaded globally by the host page.
    #[derive(Debug, Clone)]
    #[wasm_bindgen(js_name = Notify)]
    pub type NotifyInstance;

    #[wasm_bindgen(constructor, js_class = "Notify", catch)]
    fn new(options: &JsValue) -> Result<NotifyInstance, JsValue>;

    #[wasm_bindgen(method, js_class = "Notify")]
    pub fn close(this: &NotifyInstance);
}

fn network(err: JsValue) -> FetchError {
    FetchError::Network(js_error_to_string(err))
}

fn decode(err: impl ToString) -> FetchError {
    FetchError::Decode(err.to_string())
}

fn build_request(
    method: Method,
    url: &str,
    body: Option<&JsValue>,
    content_type: Option<&str>,
) -> Result<Request, FetchError> {
    let init = RequestInit::new();
    init.set_method(method.as_str());
    if let Some(body) = body {
        init.set_body(body);
    }
    let request = Request::new_with_str_and_init(url, &init).map_err(network)?;
    if let Some(content_type) = content_type {
        request
            .headers()
            .set("Content-Type", content_type)
            .map_err(network)?;
    }
    Ok(request)
}

async fn send(request: &Request) -> Result<Response, FetchError> {
    let window =
        web_sys::window().ok_or_else(|| FetchError::Unavailable("window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(network)?;
    value.dyn_into::<Response>().map_err(|err| decode(js_error_to_string(err)))
}

/// Decodes a JSON reply whatever its status; a body that is not JSON on a failed status is
/// reported as that status.
async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    let ok = response.ok();
    let pending = response.json().map_err(network)?;
    let value = match JsFuture::from(pending).await {
        Ok(value) => value,
        Err(_) if !ok => return Err(FetchError::Status(status)),
        Err(err) => return Err(decode(js_error_to_string(err))),
    };
    serde_wasm_bindgen::from_value(value).map_err(|err| {
        if ok {
            decode(err)
        } else {
            FetchError::Status(status)
        }
    })
}

fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<Blob, JsValue> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let response = send(&build_request(Method::Get, url, None, None)?).await?;
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    let text = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?;
    text.as_string()
        .ok_or_else(|| decode("response body is not text"))
}

pub async fn request_json<T: DeserializeOwned>(
    method: Method,
    url: &str,
    json_body: Option<&str>,
) -> Result<T, FetchError> {
    let body = json_body.map(JsValue::from_str);
    let content_type = json_body.map(|_| "application/json");
    let response = send(&build_request(method, url, body.as_ref(), content_type)?).await?;
    decode_json(response).await
}

pub async fn fetch_bytes(url: &str) -> Result<FilePayload, FetchError> {
    let response = send(&build_request(Method::Get, url, None, None)?).await?;
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    let mime = response
        .headers()
        .get("content-type")
        .ok()
        .flatten()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let buffer = JsFuture::from(response.array_buffer().map_err(network)?)
        .await
        .map_err(network)?;
    Ok(FilePayload {
        bytes: Uint8Array::new(&buffer).to_vec(),
        mime,
    })
}

pub async fn post_multipart<T: DeserializeOwned>(
    url: &str,
    field: &str,
    upload: &UploadFile,
) -> Result<T, FetchError> {
    let form = FormData::new().map_err(network)?;
    let blob = bytes_to_blob(&upload.bytes, &upload.mime).map_err(network)?;
    form.append_with_blob_and_filename(field, &blob, &upload.name)
        .map_err(network)?;
    let body: JsValue = form.into();
    let response = send(&build_request(Method::Post, url, Some(&body), None)?).await?;
    decode_json(response).await
}

pub fn create_object_url(bytes: &[u8], mime: &str) -> Result<String, String> {
    let blob = bytes_to_blob(bytes, mime).map_err(js_error_to_string)?;
    Url::create_object_url_with_blob(&blob).map_err(js_error_to_string)
}

pub fn revoke_object_url(url: &str) -> Result<(), String> {
    Url::revoke_object_url(url).map_err(js_error_to_string)
}

pub fn show_notify(options: &NotifyOptions) -> Result<NotifyInstance, String> {
    let value = serde_wasm_bindgen::to_value(options).map_err(|err| err.to_string())?;
    NotifyInstance::new(&value).map_err(js_error_to_string)
}

pub async fn read_browser_file(file: &web_sys::File) -> Result<UploadFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(js_error_to_string)?;
    Ok(UploadFile {
        name: file.name(),
        mime: file.type_(),
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}
