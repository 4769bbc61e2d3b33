//! Backend file API contract plus no-op and in-memory adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use super::types::{FilePayload, FileRecord, UploadFile};
use crate::FetchError;

/// Object-safe boxed future used by [`FileApiService`] async methods.
pub type FileApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for the backend file collection.
pub trait FileApiService {
    /// Lists every stored file.
    fn list_files<'a>(&'a self) -> FileApiFuture<'a, Result<Vec<FileRecord>, FetchError>>;

    /// Deletes one file by name.
    fn delete_file<'a>(&'a self, file_name: &'a str) -> FileApiFuture<'a, Result<(), FetchError>>;

    /// Renames a file.
    fn rename_file<'a>(
        &'a self,
        old_file_name: &'a str,
        new_file_name: &'a str,
    ) -> FileApiFuture<'a, Result<(), FetchError>>;

    /// Fetches the raw contents of a file for preview.
    fn fetch_file<'a>(
        &'a self,
        file_name: &'a str,
    ) -> FileApiFuture<'a, Result<FilePayload, FetchError>>;

    /// Uploads one file.
    fn upload_file<'a>(&'a self, upload: &'a UploadFile)
        -> FileApiFuture<'a, Result<(), FetchError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// File API adapter for targets without a backend.
pub struct NoopFileApiService;

impl NoopFileApiService {
    fn unsupported(op: &str) -> FetchError {
        FetchError::Unavailable(format!("file api: {op}"))
    }
}

impl FileApiService for NoopFileApiService {
    fn list_files<'a>(&'a self) -> FileApiFuture<'a, Result<Vec<FileRecord>, FetchError>> {
        Box::pin(async { Err(Self::unsupported("list_files")) })
    }

    fn delete_file<'a>(&'a self, _file_name: &'a str) -> FileApiFuture<'a, Result<(), FetchError>> {
        Box::pin(async { Err(Self::unsupported("delete_file")) })
    }

    fn rename_file<'a>(
        &'a self,
        _old_file_name: &'a str,
        _new_file_name: &'a str,
    ) -> FileApiFuture<'a, Result<(), FetchError>> {
        Box::pin(async { Err(Self::unsupported("rename_file")) })
    }

    fn fetch_file<'a>(
        &'a self,
        _file_name: &'a str,
    ) -> FileApiFuture<'a, Result<FilePayload, FetchError>> {
        Box::pin(async { Err(Self::unsupported("fetch_file")) })
    }

    fn upload_file<'a>(
        &'a self,
        _upload: &'a UploadFile,
    ) -> FileApiFuture<'a, Result<(), FetchError>> {
        Box::pin(async { Err(Self::unsupported("upload_file")) })
    }
}

#[derive(Debug, Default)]
struct MemoryFiles {
    records: Vec<FileRecord>,
    contents: HashMap<String, FilePayload>,
    rejections: HashMap<String, String>,
    listing_error: Option<FetchError>,
}

#[derive(Debug, Clone, Default)]
/// In-memory file API used by handler tests and offline demos.
///
/// Names registered through [`MemoryFileApiService::reject`] fail every mutating or fetching
/// call with [`FetchError::Rejected`].
pub struct MemoryFileApiService {
    inner: Rc<RefCell<MemoryFiles>>,
}

impl MemoryFileApiService {
    /// Creates a service pre-populated with `records`.
    pub fn with_files(records: impl IntoIterator<Item = FileRecord>) -> Self {
        let service = Self::default();
        service.inner.borrow_mut().records = records.into_iter().collect();
        service
    }

    /// Stores preview contents for a file name.
    pub fn set_contents(&self, file_name: &str, payload: FilePayload) {
        self.inner
            .borrow_mut()
            .contents
            .insert(file_name.to_string(), payload);
    }

    /// Makes every call naming `file_name` fail with `reason`.
    pub fn reject(&self, file_name: &str, reason: &str) {
        self.inner
            .borrow_mut()
            .rejections
            .insert(file_name.to_string(), reason.to_string());
    }

    /// Makes the listing call fail.
    pub fn fail_listing(&self, error: FetchError) {
        self.inner.borrow_mut().listing_error = Some(error);
    }

    /// Returns a snapshot of the stored records.
    pub fn records(&self) -> Vec<FileRecord> {
        self.inner.borrow().records.clone()
    }

    fn check(&self, file_name: &str) -> Result<(), FetchError> {
        match self.inner.borrow().rejections.get(file_name) {
            Some(reason) => Err(FetchError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

impl FileApiService for MemoryFileApiService {
    fn list_files<'a>(&'a self) -> FileApiFuture<'a, Result<Vec<FileRecord>, FetchError>> {
        Box::pin(async move {
            let inner = self.inner.borrow();
            match &inner.listing_error {
                Some(err) => Err(err.clone()),
                None => Ok(inner.records.clone()),
            }
        })
    }

    fn delete_file<'a>(&'a self, file_name: &'a str) -> FileApiFuture<'a, Result<(), FetchError>> {
        Box::pin(async move {
            self.check(file_name)?;
            let mut inner = self.inner.borrow_mut();
            let before = inner.records.len();
            inner.records.retain(|record| record.file_name != file_name);
            if inner.records.len() == before {
                return Err(FetchError::Rejected(format!("{file_name} not found")));
            }
            inner.contents.remove(file_name);
            Ok(())
        })
    }

    fn rename_file<'a>(
        &'a self,
        old_file_name: &'a str,
        new_file_name: &'a str,
    ) -> FileApiFuture<'a, Result<(), FetchError>> {
        Box::pin(async move {
            self.check(old_file_name)?;
            let mut inner = self.inner.borrow_mut();
            if inner
                .records
                .iter()
                .any(|record| record.file_name == new_file_name)
            {
                return Err(FetchError::Rejected(format!(
                    "{new_file_name} already exists"
                )));
            }
            let record = inner
                .records
                .iter_mut()
                .find(|record| record.file_name == old_file_name)
                .ok_or_else(|| FetchError::Rejected(format!("{old_file_name} not found")))?;
            record.file_name = new_file_name.to_string();
            if let Some(payload) = inner.contents.remove(old_file_name) {
                inner.contents.insert(new_file_name.to_string(), payload);
            }
            Ok(())
        })
    }

    fn fetch_file<'a>(
        &'a self,
        file_name: &'a str,
    ) -> FileApiFuture<'a, Result<FilePayload, FetchError>> {
        Box::pin(async move {
            self.check(file_name)?;
            self.inner
                .borrow()
                .contents
                .get(file_name)
                .cloned()
                .ok_or(FetchError::Status(404))
        })
    }

    fn upload_file<'a>(
        &'a self,
        upload: &'a UploadFile,
    ) -> FileApiFuture<'a, Result<(), FetchError>> {
        Box::pin(async move {
            self.check(&upload.name)?;
            let mut inner = self.inner.borrow_mut();
            inner.records.retain(|record| record.file_name != upload.name);
            inner.records.push(FileRecord {
                file_name: upload.name.clone(),
                file_size: upload.bytes.len() as u64,
                file_type: upload.mime.clone(),
                created_at: None,
                modified_at: None,
                last_opened_at: None,
            });
            inner.contents.insert(
                upload.name.clone(),
                FilePayload {
                    bytes: upload.bytes.clone(),
                    mime: upload.mime.clone(),
                },
            );
            Ok(())
        })
    }
}
