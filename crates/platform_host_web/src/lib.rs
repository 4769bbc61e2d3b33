//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate wires the backend file API and page fragments to `window.fetch`, toasts to the
//! Simple-Notify widget, and provides RAII DOM listeners and blob object URLs.
//!
//! Transport glue lives under `bridge/`, with `bridge::interop` split into wasm and non-wasm
//! implementations so every adapter also compiles (and fails cleanly) on the host target.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
mod bridge;
pub mod dom;
pub mod files;
pub mod fragments;
pub mod notifications;
pub mod object_url;

pub use adapters::{
    file_api_service, fragment_source, host_strategy_name, selected_host_strategy, toast_service,
    FileApiServiceAdapter, FragmentSourceAdapter, HostStrategy, ToastServiceAdapter,
};
pub use dom::{listen, EventListenerGuard};
pub use files::{read_browser_file, HttpFileApiService};
pub use fragments::HttpFragmentSource;
pub use notifications::{NotifyOptions, NotifyToastService};
pub use object_url::{create_object_url, revoke_object_url};
