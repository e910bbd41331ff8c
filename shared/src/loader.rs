use async_trait::async_trait;
use std::future::Future;

use crate::error::LoadError;
use crate::page::{PageRequest, PageResult};

/// Fetches one page of rows for the grid.
///
/// Loaders run on a single-threaded event loop, so the returned futures are
/// not required to be `Send`. Any closure of the shape
/// `Fn(PageRequest) -> impl Future<Output = Result<PageResult<R>, LoadError>>`
/// is a loader.
#[async_trait(?Send)]
pub trait PageLoader<R> {
    async fn load_page(&self, request: PageRequest) -> Result<PageResult<R>, LoadError>;
}

#[async_trait(?Send)]
impl<R, F, Fut> PageLoader<R> for F
where
    R: 'static,
    F: Fn(PageRequest) -> Fut,
    Fut: Future<Output = Result<PageResult<R>, LoadError>> + 'static,
{
    async fn load_page(&self, request: PageRequest) -> Result<PageResult<R>, LoadError> {
        (self)(request).await
    }
}
