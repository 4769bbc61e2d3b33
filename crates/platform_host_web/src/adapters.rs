use platform_host::{
    ApiEndpoints, FetchError, FileApiFuture, FileApiService, FilePayload, FileRecord,
    FragmentFuture, FragmentSource, NoopFileApiService, NoopFragmentSource, NoopToastService,
    ToastHandle, ToastRequest, ToastService, UploadFile,
};

use crate::{HttpFileApiService, HttpFragmentSource, NotifyToastService};

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// `fetch` and `Notify` backed adapters.
    Browser,
    /// No-op adapters for builds without a backend.
    Offline,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "offline-host")]
    {
        HostStrategy::Offline
    }

    #[cfg(not(feature = "offline-host"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Offline => "offline",
    }
}

/// Adapter enum that erases the concrete backend behind [`FileApiService`].
#[derive(Debug, Clone)]
pub enum FileApiServiceAdapter {
    /// REST backend over `fetch`.
    Browser(HttpFileApiService),
    /// No backend.
    Offline(NoopFileApiService),
}

impl FileApiService for FileApiServiceAdapter {
    fn list_files<'a>(&'a self) -> FileApiFuture<'a, Result<Vec<FileRecord>, FetchError>> {
        match self {
            Self::Browser(service) => service.list_files(),
            Self::Offline(service) => service.list_files(),
        }
    }

    fn delete_file<'a>(&'a self, file_name: &'a str) -> FileApiFuture<'a, Result<(), FetchError>> {
        match self {
            Self::Browser(service) => service.delete_file(file_name),
            Self::Offline(service) => service.delete_file(file_name),
        }
    }

    fn rename_file<'a>(
        &'a self,
        old_file_name: &'a str,
        new_file_name: &'a str,
    ) -> FileApiFuture<'a, Result<(), FetchError>> {
        match self {
            Self::Browser(service) => service.rename_file(old_file_name, new_file_name),
            Self::Offline(service) => service.rename_file(old_file_name, new_file_name),
        }
    }

    fn fetch_file<'a>(
        &'a self,
        file_name: &'a str,
    ) -> FileApiFuture<'a, Result<FilePayload, FetchError>> {
        match self {
            Self::Browser(service) => service.fetch_file(file_name),
            Self::Offline(service) => service.fetch_file(file_name),
        }
    }

    fn upload_file<'a>(
        &'a self,
        upload: &'a UploadFile,
    ) -> FileApiFuture<'a, Result<(), FetchError>> {
        match self {
            Self::Browser(service) => service.upload_file(upload),
            Self::Offline(service) => service.upload_file(upload),
        }
    }
}

/// Adapter enum that erases the concrete fragment loader behind [`FragmentSource`].
#[derive(Debug, Clone, Copy)]
pub enum FragmentSourceAdapter {
    /// Same-origin `fetch`.
    Browser(HttpFragmentSource),
    /// No network.
    Offline(NoopFragmentSource),
}

impl FragmentSource for FragmentSourceAdapter {
    fn fetch_fragment<'a>(&'a self, url: &'a str) -> FragmentFuture<'a, Result<String, FetchError>> {
        match self {
            Self::Browser(source) => source.fetch_fragment(url),
            Self::Offline(source) => source.fetch_fragment(url),
        }
    }
}

/// Adapter enum that erases the concrete toast widget behind [`ToastService`].
#[derive(Debug, Clone, Copy)]
pub enum ToastServiceAdapter {
    /// Simple-Notify widget.
    Browser(NotifyToastService),
    /// Discards toasts.
    Offline(NoopToastService),
}

impl ToastService for ToastServiceAdapter {
    fn show(&self, request: &ToastRequest) -> Result<ToastHandle, String> {
        match self {
            Self::Browser(service) => service.show(request),
            Self::Offline(service) => service.show(request),
        }
    }
}

/// Builds the file API adapter for the selected host strategy.
pub fn file_api_service(endpoints: ApiEndpoints) -> FileApiServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => FileApiServiceAdapter::Browser(HttpFileApiService::new(endpoints)),
        HostStrategy::Offline => FileApiServiceAdapter::Offline(NoopFileApiService),
    }
}

/// Builds the fragment source for the selected host strategy.
pub fn fragment_source() -> FragmentSourceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => FragmentSourceAdapter::Browser(HttpFragmentSource),
        HostStrategy::Offline => FragmentSourceAdapter::Offline(NoopFragmentSource),
    }
}

/// Builds the toast service for the selected host strategy.
pub fn toast_service() -> ToastServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => ToastServiceAdapter::Browser(NotifyToastService),
        HostStrategy::Offline => ToastServiceAdapter::Offline(NoopToastService),
    }
}
