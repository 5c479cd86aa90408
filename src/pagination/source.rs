//! Data-source seam for paginated queries

use async_trait::async_trait;
use thiserror::Error;

use super::types::{Page, PageRequest};

/// The only failure the pagination core knows about.
///
/// The cause is opaque; it comes from whatever transport backs the source.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Fetch failed: {0}")]
    FetchFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FetchError {
    pub fn failed<E>(cause: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        FetchError::FetchFailed(cause.into())
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Trait for anything that can serve pages of `T`
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// Fetch the page identified by `request`
    async fn fetch_page(&self, request: PageRequest) -> FetchResult<Page<T>>;

    /// Fetch a follow-up page. Whether it is appended is the caller's
    /// decision, not the source's.
    async fn fetch_more(&self, request: PageRequest) -> FetchResult<Page<T>> {
        self.fetch_page(request).await
    }
}
