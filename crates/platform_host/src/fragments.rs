//! HTML fragment source contract used by the router, plus no-op and in-memory adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use crate::FetchError;

/// Object-safe boxed future used by [`FragmentSource`].
pub type FragmentFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Loads page fragments by URL.
pub trait FragmentSource {
    /// Fetches the fragment body at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for non-success responses and [`FetchError::Network`] when
    /// no response arrives.
    fn fetch_fragment<'a>(&'a self, url: &'a str) -> FragmentFuture<'a, Result<String, FetchError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Fragment source for targets without a network.
pub struct NoopFragmentSource;

impl FragmentSource for NoopFragmentSource {
    fn fetch_fragment<'a>(&'a self, url: &'a str) -> FragmentFuture<'a, Result<String, FetchError>> {
        Box::pin(async move { Err(FetchError::Unavailable(format!("fragment {url}"))) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory fragment source keyed by URL; unknown URLs answer `404`.
pub struct MemoryFragmentSource {
    fragments: Rc<RefCell<HashMap<String, String>>>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl MemoryFragmentSource {
    /// Registers a fragment body for `url`.
    pub fn insert(&self, url: impl Into<String>, body: impl Into<String>) {
        self.fragments.borrow_mut().insert(url.into(), body.into());
    }

    /// Builds a source from `(url, body)` pairs.
    pub fn from_pairs<I, U, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (U, B)>,
        U: Into<String>,
        B: Into<String>,
    {
        let source = Self::default();
        for (url, body) in pairs {
            source.insert(url, body);
        }
        source
    }

    /// URLs requested so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl FragmentSource for MemoryFragmentSource {
    fn fetch_fragment<'a>(&'a self, url: &'a str) -> FragmentFuture<'a, Result<String, FetchError>> {
        Box::pin(async move {
            self.requests.borrow_mut().push(url.to_string());
            self.fragments
                .borrow()
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(404))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_source_serves_registered_fragments_and_records_requests() {
        let source = MemoryFragmentSource::from_pairs([("/pages/myfile.html", "<h1>Files</h1>")]);

        assert_eq!(
            block_on(source.fetch_fragment("/pages/myfile.html")),
            Ok("<h1>Files</h1>".to_string())
        );
        assert_eq!(
            block_on(source.fetch_fragment("/pages/missing.html")),
            Err(FetchError::Status(404))
        );
        assert_eq!(
            source.requests(),
            vec![
                "/pages/myfile.html".to_string(),
                "/pages/missing.html".to_string()
            ]
        );
    }
}
