//! Fire-and-forget toast notifier used by the page handlers.

use std::{fmt, rc::Rc};

use leptos::logging;
use platform_host::{ToastHandle, ToastKind, ToastRequest, ToastService};

use crate::config::ToastConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Options for [`Toaster::show`]; unset fields take the configured defaults.
pub struct ToastOptions {
    /// Body text.
    pub message: String,
    /// Status.
    pub kind: ToastKind,
    /// Auto-close delay in milliseconds; `None` uses the default duration.
    pub duration_ms: Option<u32>,
    /// Heading; empty for none.
    pub title: String,
}

impl ToastOptions {
    /// Options for a message of the given kind.
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            ..Self::default()
        }
    }
}

#[derive(Clone)]
/// Shows toasts through a [`ToastService`]; failures are logged, never returned.
pub struct Toaster {
    service: Rc<dyn ToastService>,
    config: ToastConfig,
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toaster")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Toaster {
    /// Wraps a toast service.
    pub fn new(service: Rc<dyn ToastService>, config: ToastConfig) -> Self {
        Self { service, config }
    }

    /// Shows a toast; the handle closes it early.
    pub fn show(&self, options: ToastOptions) -> ToastHandle {
        let request = ToastRequest {
            message: options.message,
            kind: options.kind,
            duration_ms: options
                .duration_ms
                .unwrap_or(self.config.default_duration_ms),
            title: options.title,
        };
        match self.service.show(&request) {
            Ok(handle) => handle,
            Err(err) => {
                logging::warn!("toast dispatch failed: {err}");
                ToastHandle::detached()
            }
        }
    }

    fn shortcut(&self, kind: ToastKind, message: impl Into<String>) -> ToastHandle {
        self.show(ToastOptions {
            duration_ms: Some(self.config.shortcut_duration_ms),
            ..ToastOptions::new(kind, message)
        })
    }

    /// Success toast with the shortcut duration.
    pub fn success(&self, message: impl Into<String>) -> ToastHandle {
        self.shortcut(ToastKind::Success, message)
    }

    /// Error toast with the shortcut duration.
    pub fn error(&self, message: impl Into<String>) -> ToastHandle {
        self.shortcut(ToastKind::Error, message)
    }

    /// Warning toast with the shortcut duration.
    pub fn warning(&self, message: impl Into<String>) -> ToastHandle {
        self.shortcut(ToastKind::Warning, message)
    }

    /// Info toast with the shortcut duration.
    pub fn info(&self, message: impl Into<String>) -> ToastHandle {
        self.shortcut(ToastKind::Info, message)
    }
}
