//! Fetch orchestration for an incrementally loaded collection.
//!
//! The controller decides which cursor to request next, folds results into
//! its [`PageStore`], and exposes `status`/`has_more` to whatever renders the
//! list. All operations take `&self` and may overlap: the merge that
//! completes last wins, and nothing in flight is ever cancelled.

use tokio::sync::RwLock;
use tracing::{debug, trace, warn};

use super::{
    source::{FetchResult, PageSource},
    store::PageStore,
    types::{CollectionState, FetchStatus, Page, PageRequest},
};

/// Page size and start page used when the server gives no cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub limit: u32,
    pub default_page: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            default_page: 1,
        }
    }
}

impl PaginationConfig {
    pub fn new(limit: u32, default_page: u32) -> Self {
        Self {
            limit,
            default_page,
        }
    }

    /// The first-page request used by `refresh`
    pub fn first_request(&self) -> PageRequest {
        PageRequest::new(self.limit, self.default_page)
    }

    fn fallback_next_page(&self) -> u32 {
        self.default_page.saturating_add(1)
    }
}

/// Result of a `load_more` call
#[derive(Debug, Clone, PartialEq)]
pub enum LoadMore<T> {
    /// A page was fetched and appended
    Fetched(Page<T>),
    /// Another operation was in flight; nothing was requested
    InFlight,
    /// The latest page had no `next` cursor; nothing was requested
    Exhausted,
}

#[derive(Debug)]
struct ControllerState<T> {
    store: PageStore<T>,
    status: FetchStatus,
    has_more: bool,
}

/// Drives a [`PageSource`] and owns the collection it produces
pub struct FetchController<T, S> {
    source: S,
    config: PaginationConfig,
    state: RwLock<ControllerState<T>>,
}

impl<T, S> FetchController<T, S>
where
    T: Clone + Send + Sync,
    S: PageSource<T>,
{
    pub fn new(source: S, config: PaginationConfig) -> Self {
        Self {
            source,
            config,
            state: RwLock::new(ControllerState {
                store: PageStore::new(),
                status: FetchStatus::Idle,
                has_more: true,
            }),
        }
    }

    /// Load the page named by `request` and replace the collection with it
    pub async fn load_first(&self, request: PageRequest) -> FetchResult<Page<T>> {
        self.state.write().await.status = FetchStatus::Loading;
        debug!("Loading first page: limit={} page={}", request.limit, request.page);

        let page = self.source.fetch_page(request).await?;

        let mut state = self.state.write().await;
        state.store.replace(page.clone());
        state.has_more = page.links.has_next();
        state.status = FetchStatus::Idle;
        debug!("First page loaded with {} items", page.items.len());

        Ok(page)
    }

    /// Re-request the default first page and replace the collection.
    ///
    /// `has_more` is taken from the collection being replaced, before the
    /// request goes out, and is not re-derived from the incoming page. The
    /// next `load_more` corrects it. Status returns to idle whether or not
    /// the request succeeds.
    pub async fn refresh(&self) -> FetchResult<Page<T>> {
        {
            let mut state = self.state.write().await;
            state.status = FetchStatus::Refreshing;
            state.has_more = state.store.next_cursor().is_some();
        }

        let request = self.config.first_request();
        debug!("Refreshing: limit={} page={}", request.limit, request.page);
        let result = self.source.fetch_page(request).await;

        let mut state = self.state.write().await;
        match &result {
            Ok(page) => {
                state.store.replace(page.clone());
                debug!("Refresh replaced collection with {} items", page.items.len());
            }
            Err(e) => warn!("Refresh failed: {}", e),
        }
        state.status = FetchStatus::Idle;

        result
    }

    /// Fetch the page after the current one and append it.
    ///
    /// Does nothing while another operation is in flight or once the latest
    /// page carries no `next` cursor.
    pub async fn load_more(&self) -> FetchResult<LoadMore<T>> {
        let request = {
            let mut state = self.state.write().await;
            if state.status.is_busy() {
                trace!("load_more skipped: {:?} in flight", state.status);
                return Ok(LoadMore::InFlight);
            }

            state.has_more = true;
            let Some(next) = state.store.next_cursor() else {
                state.has_more = false;
                trace!("load_more skipped: no next cursor");
                return Ok(LoadMore::Exhausted);
            };

            state.status = FetchStatus::Loading;
            next.resolve(self.config.limit, self.config.fallback_next_page())
        };

        debug!("Loading more: limit={} page={}", request.limit, request.page);
        let page = self.source.fetch_more(request).await?;

        let mut state = self.state.write().await;
        state.store.append(page.clone());
        state.has_more = page.links.has_next();
        state.status = FetchStatus::Idle;
        debug!(
            "Appended {} items, collection now holds {}",
            page.items.len(),
            state.store.len()
        );

        Ok(LoadMore::Fetched(page))
    }

    /// Return to idle after a failed request left the status in flight
    pub async fn reset_status(&self) {
        self.state.write().await.status = FetchStatus::Idle;
    }

    /// Snapshot of the accumulated collection
    pub async fn state(&self) -> CollectionState<T> {
        self.state.read().await.store.state().clone()
    }

    pub async fn status(&self) -> FetchStatus {
        self.state.read().await.status
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.store.len()
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
