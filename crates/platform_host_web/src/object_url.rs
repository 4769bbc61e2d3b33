//! Blob object URLs for previewing fetched file contents.

use platform_host::FilePayload;

use crate::bridge;

/// Creates a `blob:` URL holding `payload`.
///
/// # Errors
///
/// Returns the JS error message when the blob or URL cannot be created.
pub fn create_object_url(payload: &FilePayload) -> Result<String, String> {
    bridge::create_object_url(&payload.bytes, &payload.mime)
}

/// Releases a URL returned by [`create_object_url`].
///
/// # Errors
///
/// Returns the JS error message when the browser refuses the revoke.
pub fn revoke_object_url(url: &str) -> Result<(), String> {
    bridge::revoke_object_url(url)
}
