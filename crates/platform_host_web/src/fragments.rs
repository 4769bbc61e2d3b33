//! `fetch`-backed page fragment source.

use platform_host::{FetchError, FragmentFuture, FragmentSource};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Loads router fragments from the same origin with `GET`.
pub struct HttpFragmentSource;

impl FragmentSource for HttpFragmentSource {
    fn fetch_fragment<'a>(&'a self, url: &'a str) -> FragmentFuture<'a, Result<String, FetchError>> {
        Box::pin(bridge::load_fragment(url))
    }
}
