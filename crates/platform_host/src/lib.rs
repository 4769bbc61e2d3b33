//! Typed host-domain contracts and shared models used by the runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the backend file
//! records and API contract, the fragment source used by the router, the toast service contract,
//! and the fetch error taxonomy. Concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fetch;
pub mod files;
pub mod fragments;
pub mod notifications;

pub use fetch::FetchError;
pub use files::endpoints::ApiEndpoints;
pub use files::format::{
    file_type_label, format_file_size, format_timestamp, parse_timestamp, TimestampFormat,
};
pub use files::service::{
    FileApiFuture, FileApiService, MemoryFileApiService, NoopFileApiService,
};
pub use files::types::{
    ApiEnvelope, FailedItem, FileCategory, FilePayload, FileRecord, RenameRequest, UploadFile,
};
pub use fragments::{FragmentFuture, FragmentSource, MemoryFragmentSource, NoopFragmentSource};
pub use notifications::{
    MemoryToastService, NoopToastService, ToastHandle, ToastKind, ToastRequest, ToastService,
};
