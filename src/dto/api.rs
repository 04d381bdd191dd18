//! DTOs exposed by the image search API endpoints.

use serde::Serialize;

use crate::domain::search::PageResult;
use crate::domain::types::Category;

/// Body returned by `/api/v1/images`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesResponse {
    #[serde(flatten)]
    pub result: PageResult,
    /// Whether a page after `page` exists.
    pub has_more: bool,
}

impl From<PageResult> for ImagesResponse {
    fn from(result: PageResult) -> Self {
        let has_more = result.has_more();
        Self { result, has_more }
    }
}

/// Number of catalog images in a category.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
