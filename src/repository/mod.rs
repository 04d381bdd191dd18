use crate::{
    domain::{
        image::Image,
        search::{FilterSet, PageResult},
        types::{Category, ImageId, SearchText},
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use memory::InMemoryRepository;

/// Remote query term standing in for a blank search.
pub const TRENDING_QUERY: &str = "trending";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Request sent to a data source: text query, filters and the page to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSearchQuery {
    pub search: SearchText,
    pub filters: FilterSet,
    pub pagination: Option<Pagination>,
}

impl ImageSearchQuery {
    pub fn new(search: impl Into<SearchText>) -> Self {
        Self {
            search: search.into(),
            filters: FilterSet::default(),
            pagination: None,
        }
    }

    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// Query-string pairs in the remote API contract:
    /// `q`, `page`, `per_page`, `category`, `orientation`, `size`.
    /// A blank search is sent as `q=trending`.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let q = if self.search.is_empty() {
            TRENDING_QUERY
        } else {
            self.search.as_str()
        };
        let mut pairs = vec![("q", q.to_string())];
        if let Some(pagination) = self.pagination {
            pairs.push(("page", pagination.page.to_string()));
            pairs.push(("per_page", pagination.per_page.to_string()));
        }
        pairs.extend(
            self.filters
                .to_pairs()
                .into_iter()
                .map(|(name, value)| (name, value.to_string())),
        );
        pairs
    }
}

/// Provider of paged image results.
pub trait ImageReader {
    fn search_images(&self, query: &ImageSearchQuery) -> RepositoryResult<PageResult>;
    fn get_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<Image>>;
    fn count_by_category(&self) -> RepositoryResult<Vec<(Category, usize)>>;
}
