//! Toast notification contracts plus no-op and recording adapters.

use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Visual status of a toast.
pub enum ToastKind {
    /// Completed operation.
    Success,
    /// Failed operation.
    Error,
    /// Partial or risky outcome.
    Warning,
    /// Neutral information.
    #[default]
    Info,
}

impl ToastKind {
    /// Status token understood by the notification widget.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Parses a status token; unknown tokens map to [`ToastKind::Info`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single toast to display.
pub struct ToastRequest {
    /// Body text.
    pub message: String,
    /// Status.
    pub kind: ToastKind,
    /// Auto-close delay in milliseconds; `0` keeps the toast until dismissed.
    pub duration_ms: u32,
    /// Optional heading; empty for none.
    pub title: String,
}

/// Early-close handle returned by [`ToastService::show`].
#[derive(Clone, Default)]
pub struct ToastHandle {
    close: Option<Rc<dyn Fn()>>,
}

impl ToastHandle {
    /// Wraps a close callback.
    pub fn new(close: impl Fn() + 'static) -> Self {
        Self {
            close: Some(Rc::new(close)),
        }
    }

    /// Handle that closes nothing.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Closes the toast before its timeout.
    pub fn close(&self) {
        if let Some(close) = &self.close {
            close();
        }
    }
}

impl fmt::Debug for ToastHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastHandle")
            .field("attached", &self.close.is_some())
            .finish()
    }
}

/// Host service that renders transient notifications.
pub trait ToastService {
    /// Displays `request`.
    ///
    /// # Errors
    ///
    /// Returns a host-specific message when the notification widget is unavailable.
    fn show(&self, request: &ToastRequest) -> Result<ToastHandle, String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Toast service that discards every request.
pub struct NoopToastService;

impl ToastService for NoopToastService {
    fn show(&self, _request: &ToastRequest) -> Result<ToastHandle, String> {
        Ok(ToastHandle::detached())
    }
}

#[derive(Debug, Clone, Default)]
/// Toast service that records requests and early closes for assertions.
pub struct MemoryToastService {
    shown: Rc<RefCell<Vec<ToastRequest>>>,
    closed: Rc<RefCell<Vec<usize>>>,
}

impl MemoryToastService {
    /// Requests shown so far, oldest first.
    pub fn shown(&self) -> Vec<ToastRequest> {
        self.shown.borrow().clone()
    }

    /// Indexes (into [`MemoryToastService::shown`]) of toasts closed through their handle.
    pub fn closed(&self) -> Vec<usize> {
        self.closed.borrow().clone()
    }
}

impl ToastService for MemoryToastService {
    fn show(&self, request: &ToastRequest) -> Result<ToastHandle, String> {
        let index = {
            let mut shown = self.shown.borrow_mut();
            shown.push(request.clone());
            shown.len() - 1
        };
        let closed = self.closed.clone();
        Ok(ToastHandle::new(move || closed.borrow_mut().push(index)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unknown_kind_tokens_fall_back_to_info() {
        assert_eq!(ToastKind::from_token("error"), ToastKind::Error);
        assert_eq!(ToastKind::from_token("fatal"), ToastKind::Info);
        assert_eq!(ToastKind::default().token(), "info");
    }

    #[test]
    fn memory_service_records_requests_and_closes() {
        let service = MemoryToastService::default();
        let request = ToastRequest {
            message: "Saved".to_string(),
            kind: ToastKind::Success,
            duration_ms: 2000,
            title: String::new(),
        };

        let handle = service.show(&request).expect("show");
        handle.close();
        ToastHandle::detached().close();

        assert_eq!(service.shown(), vec![request]);
        assert_eq!(service.closed(), vec![0]);
    }
}
