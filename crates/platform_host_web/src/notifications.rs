//! Toast adapter over the Simple-Notify `Notify` class.

use platform_host::{ToastHandle, ToastRequest, ToastService};
use serde::Serialize;

const EFFECT: &str = "slide";
const SPEED_MS: u32 = 200;
const POSITION: &str = "right top";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Option object handed to `new Notify(...)`.
pub struct NotifyOptions {
    /// `success`, `error`, `warning` or `info`.
    pub status: &'static str,
    /// Heading.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Enter/exit animation.
    pub effect: &'static str,
    /// Animation speed in milliseconds.
    pub speed: u32,
    /// Whether the status icon is shown.
    pub show_icon: bool,
    /// Whether the close button is shown.
    pub show_close_button: bool,
    /// Whether the toast closes on its own.
    pub autoclose: bool,
    /// Auto-close delay in milliseconds.
    pub autotimeout: u32,
    /// Screen corner.
    pub position: &'static str,
}

impl From<&ToastRequest> for NotifyOptions {
    fn from(request: &ToastRequest) -> Self {
        Self {
            status: request.kind.token(),
            title: request.title.clone(),
            text: request.message.clone(),
            effect: EFFECT,
            speed: SPEED_MS,
            show_icon: true,
            show_close_button: true,
            autoclose: request.duration_ms > 0,
            autotimeout: request.duration_ms,
            position: POSITION,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser toast service backed by the globally loaded `Notify` class.
pub struct NotifyToastService;

impl ToastService for NotifyToastService {
    fn show(&self, request: &ToastRequest) -> Result<ToastHandle, String> {
        let options = NotifyOptions::from(request);

        #[cfg(target_arch = "wasm32")]
        {
            let instance = crate::bridge::show_notify(&options)?;
            return Ok(ToastHandle::new(move || instance.close()));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = options;
            Err("Notify is only available when compiled for wasm32".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use platform_host::ToastKind;

    use super::*;

    #[test]
    fn notify_options_match_widget_contract() {
        let request = ToastRequest {
            message: "Deleted 2 file(s)".to_string(),
            kind: ToastKind::Success,
            duration_ms: 2000,
            title: String::new(),
        };

        let value = serde_json::to_value(NotifyOptions::from(&request)).expect("encode");

        assert_eq!(
            value,
            json!({
                "status": "success",
                "title": "",
                "text": "Deleted 2 file(s)",
                "effect": "slide",
                "speed": 200,
                "showIcon": true,
                "showCloseButton": true,
                "autoclose": true,
                "autotimeout": 2000,
                "position": "right top"
            })
        );
    }

    #[test]
    fn zero_duration_disables_autoclose() {
        let request = ToastRequest {
            message: "Uploading".to_string(),
            kind: ToastKind::from_token("progress"),
            duration_ms: 0,
            title: "Upload".to_string(),
        };

        let options = NotifyOptions::from(&request);

        assert!(!options.autoclose);
        assert_eq!(options.status, "info");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn notify_is_unavailable_off_wasm() {
        let request = ToastRequest {
            message: "x".to_string(),
            kind: ToastKind::Info,
            duration_ms: 1,
            title: String::new(),
        };

        assert!(NotifyToastService.show(&request).is_err());
    }
}
