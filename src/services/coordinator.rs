//! Search coordinator: turns query changes into employee service requests.
//!
//! Every request takes a generation number before its first await. A response
//! is applied to the [`ResultCache`] only while its generation is still the
//! latest issued, so a slow early response can never overwrite a later one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::domain::query::{DateRange, SearchParams, SearchQuery};
use crate::domain::types::Position;
use crate::dto::directory::DirectoryView;
use crate::forms::date_range::DateRangeForm;
use crate::models::config::DirectoryConfig;
use crate::repository::EmployeeReader;
use crate::repository::errors::RepositoryError;
use crate::services::cache::{Listing, ResultCache};
use crate::services::debounce::Debouncer;
use crate::services::query_state::{QueryState, QueryUpdate};
use crate::services::{ServiceError, ServiceResult};

/// Message shown to the user when a listing request fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch employees. Please try again.";

/// The shape of a listing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchRequest {
    /// Active employees only, paginated.
    ActiveListing { page: u32, size: u32 },
    /// Name/position search, with the date range attached when one is applied.
    Search(SearchParams),
    /// Full, unpaginated set hired within the range.
    HiredBetween(DateRange),
}

impl SearchRequest {
    /// Request for browsing the current query: the search endpoint, or the
    /// plain active listing when no filter is set.
    pub fn for_query(query: &SearchQuery) -> Self {
        if query.has_text_filter() || query.has_date_filter() {
            SearchRequest::Search(SearchParams::from_query(query))
        } else {
            SearchRequest::ActiveListing {
                page: query.page,
                size: query.size,
            }
        }
    }

    /// Request used to refresh after a mutation. An applied date filter
    /// reloads the full hire-date set.
    pub fn for_refresh(query: &SearchQuery) -> Self {
        match query.date_range {
            Some(range) => SearchRequest::HiredBetween(range),
            None => Self::for_query(query),
        }
    }

    async fn send<R>(self, repo: &R) -> Result<Listing, RepositoryError>
    where
        R: EmployeeReader + ?Sized,
    {
        match self {
            SearchRequest::ActiveListing { page, size } => repo
                .search_employees(SearchParams::active_listing(page, size))
                .await
                .map(Listing::Paged),
            SearchRequest::Search(params) => {
                repo.search_employees(params).await.map(Listing::Paged)
            }
            SearchRequest::HiredBetween(range) => {
                repo.list_hired_between(range).await.map(Listing::Unpaged)
            }
        }
    }
}

/// What happened to a dispatched request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The response replaced the result cache.
    Applied { generation: u64 },
    /// A newer request was issued first (or the coordinator shut down); the
    /// response was dropped.
    Stale { generation: u64 },
}

impl Dispatch {
    pub fn is_applied(&self) -> bool {
        matches!(self, Dispatch::Applied { .. })
    }
}

struct Shared<R: ?Sized> {
    state: Mutex<QueryState>,
    cache: watch::Sender<ResultCache>,
    issued: AtomicU64,
    closed: AtomicBool,
    repo: Arc<R>,
}

impl<R> Shared<R>
where
    R: EmployeeReader + ?Sized,
{
    fn ensure_open(&self) -> ServiceResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ServiceError::Closed);
        }
        Ok(())
    }

    /// Mutates the query and reserves a generation in one step.
    fn transition<F>(
        &self,
        request_for: F,
        change: impl FnOnce(&mut QueryState) -> ServiceResult<()>,
    ) -> ServiceResult<(u64, SearchRequest)>
    where
        F: FnOnce(&SearchQuery) -> SearchRequest,
    {
        self.ensure_open()?;
        let mut state = self.state.lock();
        change(&mut state)?;
        let request = request_for(state.query());
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok((generation, request))
    }

    /// When a paged response lands past the last page, which happens when a
    /// mutation empties the page being viewed, moves the query back to the
    /// last page and reserves a generation for one refetch.
    fn past_last_page(
        &self,
        generation: u64,
        result: &Result<Listing, RepositoryError>,
    ) -> Option<(u64, SearchRequest)> {
        let Ok(Listing::Paged(page)) = result else {
            return None;
        };
        if page.is_consistent() {
            return None;
        }

        let mut state = self.state.lock();
        if self.closed.load(Ordering::SeqCst) || self.issued.load(Ordering::SeqCst) != generation {
            return None;
        }
        state.set_page(page.total_pages.saturating_sub(1));
        let request = SearchRequest::for_query(state.query());
        let next = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Some((next, request))
    }

    async fn execute(&self, generation: u64, request: SearchRequest) -> ServiceResult<Dispatch> {
        log::debug!("Dispatching request #{generation}: {request:?}");
        let mut generation = generation;
        let mut result = request.send(self.repo.as_ref()).await;

        if let Some((next, request)) = self.past_last_page(generation, &result) {
            log::debug!("Page past the end, refetching as #{next}: {request:?}");
            generation = next;
            result = request.send(self.repo.as_ref()).await;
        }

        let latest = self.issued.load(Ordering::SeqCst);
        if generation != latest || self.closed.load(Ordering::SeqCst) {
            log::debug!("Discarding stale response #{generation}, latest is #{latest}");
            return Ok(Dispatch::Stale { generation });
        }

        match result {
            Ok(listing) => {
                self.cache
                    .send_modify(|cache| cache.replace(listing, generation));
                Ok(Dispatch::Applied { generation })
            }
            Err(err) => {
                log::error!("Failed to fetch employees: {err}");
                self.cache
                    .send_modify(|cache| cache.record_error(FETCH_FAILED_MESSAGE));
                Err(err.into())
            }
        }
    }
}

/// Owns the query state, the result cache and the name-search debouncer.
pub struct SearchCoordinator<R: ?Sized> {
    shared: Arc<Shared<R>>,
    debouncer: Debouncer,
}

impl<R> SearchCoordinator<R>
where
    R: EmployeeReader + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, page_size: u32, debounce: Duration) -> ServiceResult<Self> {
        let state = QueryState::new(page_size)?;
        let (cache, _) = watch::channel(ResultCache::new(page_size));
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                cache,
                issued: AtomicU64::new(0),
                closed: AtomicBool::new(false),
                repo,
            }),
            debouncer: Debouncer::new(debounce),
        })
    }

    pub fn from_config(repo: Arc<R>, config: &DirectoryConfig) -> ServiceResult<Self> {
        Self::new(repo, config.default_page_size, config.search_debounce())
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.shared.repo
    }

    /// Receiver notified on every cache replacement or recorded error.
    pub fn subscribe(&self) -> watch::Receiver<ResultCache> {
        self.shared.cache.subscribe()
    }

    pub fn query(&self) -> SearchQuery {
        self.shared.state.lock().query().clone()
    }

    pub fn results(&self) -> ResultCache {
        self.shared.cache.borrow().clone()
    }

    /// Consistent snapshot of query and results for rendering.
    pub fn view(&self) -> DirectoryView {
        DirectoryView::new(self.query(), &self.results())
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Fetches the listing for the current query.
    pub async fn load(&self) -> ServiceResult<Dispatch> {
        self.dispatch(SearchRequest::for_query, |_| Ok(())).await
    }

    /// Updates the name filter and schedules a search after the quiet period.
    ///
    /// Each call restarts the timer; only the last value is searched.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, which runs the timer.
    pub fn set_name(&self, name: impl Into<String>) -> ServiceResult<()> {
        self.shared.ensure_open()?;
        self.shared.state.lock().set_name(name);

        let shared = Arc::clone(&self.shared);
        self.debouncer.schedule(async move {
            let (generation, request) =
                match shared.transition(SearchRequest::for_query, |_| Ok(())) {
                    Ok(reserved) => reserved,
                    Err(_) => return,
                };
            if let Err(err) = shared.execute(generation, request).await {
                log::warn!("Name search failed: {err}");
            }
        });
        Ok(())
    }

    /// Changes the position filter immediately. A pending name search stays
    /// scheduled.
    pub async fn set_position(&self, position: Option<Position>) -> ServiceResult<Dispatch> {
        self.dispatch(SearchRequest::for_query, |state| {
            state.set_position(position);
            Ok(())
        })
        .await
    }

    /// Moves to a zero-based page.
    pub async fn go_to_page(&self, page: u32) -> ServiceResult<Dispatch> {
        let total_pages = self.results().total_pages().unwrap_or(0);
        if total_pages > 0 && page >= total_pages {
            return Err(ServiceError::PageOutOfRange {
                page: page.saturating_add(1),
                total_pages,
            });
        }
        self.dispatch(SearchRequest::for_query, |state| {
            state.set_page(page);
            Ok(())
        })
        .await
    }

    /// Changes the page size and returns to the first page.
    pub async fn set_page_size(&self, size: u32) -> ServiceResult<Dispatch> {
        self.dispatch(SearchRequest::for_query, |state| state.set_size(size))
            .await
    }

    /// Applies several query changes in one dispatch.
    pub async fn update(&self, update: QueryUpdate) -> ServiceResult<Dispatch> {
        self.dispatch(SearchRequest::for_query, |state| state.apply(update))
            .await
    }

    /// Validates the form and loads everyone hired within the range.
    ///
    /// An invalid form dispatches nothing and leaves the query untouched.
    pub async fn apply_date_filter(&self, form: DateRangeForm) -> ServiceResult<Dispatch> {
        let range = DateRange::try_from(form).map_err(|err| {
            log::warn!("Rejected date filter: {err}");
            err
        })?;
        self.apply_date_range(range).await
    }

    pub async fn apply_date_range(&self, range: DateRange) -> ServiceResult<Dispatch> {
        self.dispatch(SearchRequest::for_refresh, |state| {
            state.set_date_range(Some(range));
            Ok(())
        })
        .await
    }

    /// Drops every filter and reloads the first page of active employees.
    pub async fn clear_filters(&self) -> ServiceResult<Dispatch> {
        self.debouncer.cancel();
        self.dispatch(SearchRequest::for_query, |state| {
            state.clear_filters();
            Ok(())
        })
        .await
    }

    /// Reloads after a mutation, keeping the applied date filter if any.
    pub async fn refresh(&self) -> ServiceResult<Dispatch> {
        self.dispatch(SearchRequest::for_refresh, |_| Ok(())).await
    }

    /// Records a failure of an operation outside the listing itself.
    pub fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.shared
            .cache
            .send_modify(|cache| cache.record_error(message));
    }

    /// Cancels the pending name search and drops any response still in
    /// flight. Later calls fail with [`ServiceError::Closed`].
    pub fn shutdown(&self) {
        if !self.shared.closed.swap(true, Ordering::SeqCst) {
            log::info!("Shutting down search coordinator");
        }
        self.debouncer.shutdown();
    }

    async fn dispatch<F>(
        &self,
        request_for: F,
        change: impl FnOnce(&mut QueryState) -> ServiceResult<()>,
    ) -> ServiceResult<Dispatch>
    where
        F: FnOnce(&SearchQuery) -> SearchRequest,
    {
        let (generation, request) = self.shared.transition(request_for, change)?;
        self.shared.execute(generation, request).await
    }
}

impl<R: ?Sized> Drop for SearchCoordinator<R> {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn unfiltered_query_uses_active_listing() {
        let mut query = SearchQuery::new(10);
        query.page = 2;
        assert_eq!(
            SearchRequest::for_query(&query),
            SearchRequest::ActiveListing { page: 2, size: 10 }
        );
        assert_eq!(SearchRequest::for_refresh(&query), SearchRequest::for_query(&query));
    }

    #[test]
    fn text_filter_uses_search() {
        let mut query = SearchQuery::new(5);
        query.name = "Jane".into();
        query.position = Some(Position::Engineer);

        let SearchRequest::Search(params) = SearchRequest::for_query(&query) else {
            panic!("expected a search request");
        };
        assert_eq!(params.name.as_deref(), Some("Jane"));
        assert_eq!(params.position, Some(Position::Engineer));
        assert_eq!(params.active, Some(true));
        assert_eq!(params.start_date, None);
    }

    #[test]
    fn date_filter_browses_with_search_and_refreshes_with_hired() {
        let mut query = SearchQuery::new(5);
        query.date_range = Some(range());
        query.page = 1;

        let SearchRequest::Search(params) = SearchRequest::for_query(&query) else {
            panic!("expected a search request");
        };
        assert_eq!(params.start_date, Some(range().start()));
        assert_eq!(params.end_date, Some(range().end()));
        assert_eq!(params.page, Some(1));

        assert_eq!(
            SearchRequest::for_refresh(&query),
            SearchRequest::HiredBetween(range())
        );
    }
}
