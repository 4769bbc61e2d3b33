//! Modal dialog engine for the filedesk pages.
//!
//! [`DialogEngine`] keeps one dialog on screen at a time and drives each through the
//! [`lifecycle`] reducer: mount hidden, show on the next frame, hide on close, unmount after the
//! exit delay, then deliver the result exactly once. Typed variants live in [`variants`], and
//! [`DialogService`] turns them into awaitable operations for page handlers.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod engine;
mod host;
pub mod lifecycle;
pub mod platform;
pub mod queue;
mod service;
pub mod variants;

pub use engine::{DialogEngine, DialogHandle, DialogSpec, DEFAULT_EXIT_DELAY};
pub use host::{DialogHost, LeptosDialogPlatform};
pub use lifecycle::{reduce_dialog, DialogAction, DialogEffect, DialogPhase};
pub use platform::{CancelKeyListener, DialogContent, DialogPlatform, MountedDialog};
pub use queue::{DialogId, DialogQueue};
pub use service::{
    provide_dialog_service, use_dialogs, DialogFuture, DialogRequest, DialogService, FileDialogs,
    ScriptedDialogs,
};
pub use variants::{ConfirmOptions, UploadSummary};
