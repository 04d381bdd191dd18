//! Result-set bookkeeping for a paged image search.
//!
//! [`ResultSetPaginator`] never performs I/O itself. Every navigation
//! operation hands back a [`FetchTicket`] describing the page to request;
//! the caller resolves it against a data source, now or later, and passes
//! the outcome to [`ResultSetPaginator::complete`]. Only one ticket is live
//! at a time, and a ticket superseded by a newer search is discarded on
//! completion.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::domain::search::{FilterSet, PageResult};
use crate::domain::types::SearchText;
use crate::pagination::PageControls;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ImageReader, ImageSearchQuery};

#[derive(Debug, Error)]
pub enum PaginatorError {
    #[error("failed to fetch page {page}: {source}")]
    FetchFailed {
        page: usize,
        #[source]
        source: RepositoryError,
    },

    #[error("page {page} is outside 1..={total_pages}")]
    InvalidPageRequest { page: usize, total_pages: usize },
}

/// How a fetched page is applied to the displayed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Replace,
    Append,
}

/// A fetch issued by the paginator and not yet resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    mode: RenderMode,
    query: ImageSearchQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn page(&self) -> usize {
        self.query.pagination.map_or(1, |p| p.page)
    }

    /// Request to send to the data source.
    pub fn query(&self) -> &ImageSearchQuery {
        &self.query
    }
}

/// Page to hand to the rendering layer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderUpdate {
    pub mode: RenderMode,
    pub result: PageResult,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Applied(RenderUpdate),
    /// The ticket belonged to a superseded request; nothing changed.
    Stale,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub total_pages: usize,
    pub loaded_pages: BTreeSet<usize>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            loaded_pages: BTreeSet::new(),
        }
    }
}

#[derive(Debug)]
pub struct ResultSetPaginator {
    per_page: usize,
    search: SearchText,
    filters: FilterSet,
    state: PaginationState,
    in_flight: Option<u64>,
    last_seq: u64,
}

impl ResultSetPaginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page,
            search: SearchText::default(),
            filters: FilterSet::default(),
            state: PaginationState::default(),
            in_flight: None,
            last_seq: 0,
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn search_text(&self) -> &SearchText {
        &self.search
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Controls for the current position.
    pub fn controls(&self) -> PageControls {
        PageControls::new(self.state.current_page, self.state.total_pages)
    }

    fn issue(&mut self, page: usize, mode: RenderMode) -> FetchTicket {
        self.last_seq += 1;
        self.in_flight = Some(self.last_seq);
        FetchTicket {
            seq: self.last_seq,
            mode,
            query: ImageSearchQuery::new(self.search.clone())
                .filters(self.filters)
                .paginate(page, self.per_page),
        }
    }

    /// Starts a new search for page 1. Any outstanding fetch is superseded.
    pub fn search(&mut self, search: impl Into<SearchText>, filters: FilterSet) -> FetchTicket {
        self.search = search.into();
        self.filters = filters;
        self.state = PaginationState::default();
        if let Some(seq) = self.in_flight {
            log::debug!("Search supersedes in-flight request #{seq}");
        }
        self.issue(1, RenderMode::Replace)
    }

    /// Requests page `page` to replace the displayed set.
    ///
    /// Returns `Ok(None)` while a fetch is in flight or when `page` is already
    /// current.
    pub fn go_to_page(&mut self, page: usize) -> Result<Option<FetchTicket>, PaginatorError> {
        if self.is_loading() || page == self.state.current_page {
            return Ok(None);
        }
        if page == 0 || page > self.state.total_pages {
            return Err(PaginatorError::InvalidPageRequest {
                page,
                total_pages: self.state.total_pages,
            });
        }
        Ok(Some(self.issue(page, RenderMode::Replace)))
    }

    /// Requests the page after the current one to be appended.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        let next = self.state.current_page + 1;
        if self.is_loading()
            || self.state.current_page >= self.state.total_pages
            || self.state.loaded_pages.contains(&next)
        {
            return None;
        }
        Some(self.issue(next, RenderMode::Append))
    }

    /// Applies the data source outcome for `ticket`.
    ///
    /// A failure clears the loading marker and leaves the rest of the state
    /// untouched so the same operation can be retried.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: RepositoryResult<PageResult>,
    ) -> Result<Completion, PaginatorError> {
        if self.in_flight != Some(ticket.seq) {
            log::debug!("Discarding stale response for request #{}", ticket.seq);
            return Ok(Completion::Stale);
        }
        self.in_flight = None;

        let page = ticket.page();
        let result = outcome.map_err(|source| PaginatorError::FetchFailed { page, source })?;

        let total_pages = result.total_pages;
        self.state.total_pages = total_pages;
        self.state.current_page = page.clamp(1, total_pages.max(1));

        if ticket.mode == RenderMode::Replace {
            self.state.loaded_pages.clear();
        }
        self.state.loaded_pages.insert(page);
        self.state
            .loaded_pages
            .retain(|&loaded| loaded <= total_pages);

        Ok(Completion::Applied(RenderUpdate {
            mode: ticket.mode,
            result,
        }))
    }

    /// Resolves `ticket` synchronously against `repo`.
    pub fn fetch_with<R>(
        &mut self,
        repo: &R,
        ticket: FetchTicket,
    ) -> Result<Completion, PaginatorError>
    where
        R: ImageReader + ?Sized,
    {
        let outcome = repo.search_images(ticket.query());
        self.complete(ticket, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Category;
    use crate::repository::InMemoryRepository;

    fn repo() -> InMemoryRepository {
        InMemoryRepository::with_sample_catalog(100).unwrap()
    }

    fn applied(completion: Completion) -> RenderUpdate {
        match completion {
            Completion::Applied(update) => update,
            Completion::Stale => panic!("expected applied completion"),
        }
    }

    #[test]
    fn search_issues_page_one_replace() {
        let mut paginator = ResultSetPaginator::new(20);
        let ticket = paginator.search(" nature ", FilterSet::default().category(Category::Nature));

        assert_eq!(ticket.page(), 1);
        assert_eq!(ticket.mode(), RenderMode::Replace);
        assert_eq!(ticket.query().search.as_str(), "nature");
        assert_eq!(ticket.query().filters.category, Some(Category::Nature));
        assert!(paginator.is_loading());
    }

    #[test]
    fn search_resets_state() {
        let repo = repo();
        let mut paginator = ResultSetPaginator::new(20);
        let ticket = paginator.search("", FilterSet::default());
        paginator.fetch_with(&repo, ticket).unwrap();
        let ticket = paginator.load_more().unwrap();
        paginator.fetch_with(&repo, ticket).unwrap();
        assert_eq!(paginator.state().current_page, 2);

        paginator.search("food", FilterSet::default());

        assert_eq!(paginator.state().current_page, 1);
        assert!(paginator.state().loaded_pages.is_empty());
        assert_eq!(paginator.state().total_pages, 0);
    }

    #[test]
    fn go_to_current_page_is_noop() {
        let repo = repo();
        let mut paginator = ResultSetPaginator::new(20);
        let ticket = paginator.search("", FilterSet::default());
        paginator.fetch_with(&repo, ticket).unwrap();

        assert!(matches!(paginator.go_to_page(1), Ok(None)));
        assert!(!paginator.is_loading());
    }

    #[test]
    fn go_to_page_rejects_out_of_range() {
        let repo = repo();
        let mut paginator = ResultSetPaginator::new(20);
        let ticket = paginator.search("", FilterSet::default());
        paginator.fetch_with(&repo, ticket).unwrap();

        let err = paginator.go_to_page(6).unwrap_err();
        assert!(matches!(
            err,
            PaginatorError::InvalidPageRequest {
                page: 6,
                total_pages: 5
            }
        ));
        assert!(matches!(
            paginator.go_to_page(0),
            Err(PaginatorError::InvalidPageRequest { page: 0, .. })
        ));
        assert!(!paginator.is_loading());
        assert_eq!(paginator.state().current_page, 1);
    }

    #[test]
    fn go_to_page_ignored_while_loading() {
        let mut paginator = ResultSetPaginator::new(20);
        paginator.search("", FilterSet::default());
        assert!(matches!(paginator.go_to_page(2), Ok(None)));
    }

    #[test]
    fn replace_resets_loaded_pages_to_displayed_page() {
        let repo = repo();
        let mut paginator = ResultSetPaginator::new(20);
        let ticket = paginator.search("", FilterSet::default());
        paginator.fetch_with(&repo, ticket).unwrap();
        let ticket = paginator.load_more().unwrap();
        paginator.fetch_with(&repo, ticket).unwrap();

        let ticket = paginator.go_to_page(4).unwrap().unwrap();
        paginator.fetch_with(&repo, ticket).unwrap();

        assert_eq!(paginator.state().current_page, 4);
        assert_eq!(
            paginator.state().loaded_pages.iter().copied().collect::<Vec<_>>(),
            vec![4]
        );
    }

    #[test]
    fn load_more_appends_and_advances() {
        let repo = repo();
        let mut paginator = ResultSetPaginator::new(20);
        let ticket = paginator.search("", FilterSet::default());
        paginator.fetch_with(&repo, ticket).unwrap();

        let ticket = paginator.load_more().unwrap();
        assert_eq!(ticket.page(), 2);
        assert_eq!(ticket.mode(), RenderMode::Append);

        let update = applied(paginator.fetch_with(&repo, ticket).unwrap());
        assert_eq!(update.mode, RenderMode::Append);
        assert_eq!(update.result.items[0].id.get(), 21);
        assert_eq!(paginator.state().current_page, 2);
        assert_eq!(
            paginator.state().loaded_pages.iter().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn load_more_before_first_page_resolves_is_noop() {
        let mut paginator = ResultSetPaginator::new(20);
        paginator.search("", FilterSet::default());
        assert!(paginator.load_more().is_none());
    }

    #[test]
    fn failure_keeps_state_and_clears_loading() {
        let repo = repo();
        let mut paginator = ResultSetPaginator::new(20);
        let ticket = paginator.search("", FilterSet::default());
        paginator.fetch_with(&repo, ticket).unwrap();
        let before = paginator.state().clone();

        let ticket = paginator.load_more().unwrap();
        let err = paginator
            .complete(ticket, Err(RepositoryError::Unavailable("timeout".into())))
            .unwrap_err();

        assert!(matches!(err, PaginatorError::FetchFailed { page: 2, .. }));
        assert_eq!(paginator.state(), &before);
        assert!(!paginator.is_loading());

        let retry = paginator.load_more().unwrap();
        assert_eq!(retry.page(), 2);
    }

    #[test]
    fn stale_response_is_discarded() {
        let repo = repo();
        let mut paginator = ResultSetPaginator::new(20);
        let first = paginator.search("nature", FilterSet::default());
        let second = paginator.search("food", FilterSet::default());

        let stale_outcome = repo.search_images(first.query());
        let completion = paginator.complete(first, stale_outcome).unwrap();
        assert_eq!(completion, Completion::Stale);
        assert!(paginator.is_loading());
        assert_eq!(paginator.state().total_pages, 0);

        let update = applied(paginator.fetch_with(&repo, second).unwrap());
        assert!(
            update
                .result
                .items
                .iter()
                .all(|image| image.category == Category::Food)
        );
        assert!(!paginator.is_loading());
    }

    #[test]
    fn shrinking_result_prunes_loaded_pages() {
        let mut paginator = ResultSetPaginator::new(10);
        let ticket = paginator.search("", FilterSet::default());
        let full = InMemoryRepository::with_sample_catalog(30).unwrap();
        paginator.fetch_with(&full, ticket).unwrap();
        let ticket = paginator.load_more().unwrap();
        paginator.fetch_with(&full, ticket).unwrap();

        let ticket = paginator.load_more().unwrap();
        let shrunk = InMemoryRepository::with_sample_catalog(15).unwrap();
        paginator.fetch_with(&shrunk, ticket).unwrap();

        let state = paginator.state();
        assert_eq!(state.total_pages, 2);
        assert!(state.current_page <= 2);
        assert!(state.loaded_pages.iter().all(|&p| p <= 2));
    }
}
