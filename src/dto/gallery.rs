use serde::Serialize;

use crate::domain::image::Image;
use crate::domain::search::FilterSet;
use crate::domain::types::{Platform, ViewMode};
use crate::pagination::Paginated;

/// Data required to render the gallery template.
#[derive(Serialize)]
pub struct GalleryPageData {
    /// Page of images with its navigation controls.
    pub images: Paginated<Image>,
    /// `Trending Images` or `Results for "<q>"`.
    pub title: String,
    /// `<total> results found`.
    pub summary: String,
    /// Search query echoed back to the template when present.
    pub search_query: Option<String>,
    pub filters: FilterSet,
    pub view: ViewMode,
    pub platform: Platform,
    pub per_page: usize,
}
