//! Host boundary the dialog engine drives: node mounting, visibility, timers, and the cancel key.

use std::{fmt, rc::Rc, time::Duration};

use leptos::ViewFn;
use system_ui::Tone;

use crate::queue::DialogId;

#[derive(Clone, Default)]
/// Variant-supplied markup for the dialog body and footer.
pub struct DialogContent {
    /// Body view.
    pub body: ViewFn,
    /// Footer (button row) view.
    pub footer: ViewFn,
}

#[derive(Clone)]
/// A dialog handed to the platform for display.
pub struct MountedDialog {
    /// Dialog id.
    pub id: DialogId,
    /// Tone applied to the dialog card.
    pub tone: Tone,
    /// Header title.
    pub title: String,
    /// Body and footer views.
    pub content: DialogContent,
    /// Closes the dialog without a result; wired to the close control and the backdrop.
    pub dismiss: Rc<dyn Fn()>,
}

impl fmt::Debug for MountedDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedDialog")
            .field("id", &self.id)
            .field("tone", &self.tone)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Detaches a cancel-key listener when dropped.
pub struct CancelKeyListener {
    detach: Option<Box<dyn FnOnce()>>,
}

impl CancelKeyListener {
    /// Wraps a detach callback.
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }
}

impl Drop for CancelKeyListener {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for CancelKeyListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelKeyListener")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

/// Services the dialog engine needs from its host.
///
/// The browser host renders through Leptos signals and browser timers; tests substitute a
/// recording implementation that runs frames and timers on demand.
pub trait DialogPlatform {
    /// Attaches `dialog` in its hidden state.
    fn mount(&self, dialog: MountedDialog);
    /// Applies or removes the visible state.
    fn set_visible(&self, id: DialogId, visible: bool);
    /// Removes the dialog nodes.
    fn unmount(&self, id: DialogId);
    /// Runs `callback` on the next animation frame.
    fn request_frame(&self, callback: Box<dyn FnOnce()>);
    /// Runs `callback` after `delay`.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>);
    /// Calls `on_cancel` whenever the cancel key (Escape) is pressed, until the returned guard
    /// is dropped.
    fn listen_cancel_key(&self, on_cancel: Rc<dyn Fn()>) -> CancelKeyListener;
}
