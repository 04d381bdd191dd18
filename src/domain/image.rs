use serde::{Deserialize, Serialize};

use crate::domain::search::FilterSet;
use crate::domain::types::{Category, ImageId, Orientation, SearchText};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub full_size: String,
    pub category: Category,
    pub orientation: Orientation,
    pub width: u32,
    pub height: u32,
    /// Dimensions formatted as `WxH`.
    pub size: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
    pub author: String,
    pub downloads: u32,
    pub likes: u32,
}

impl Image {
    /// Builds a catalog image with the standard title, description, URLs and tags.
    #[must_use]
    pub fn new(id: ImageId, category: Category, orientation: Orientation) -> Self {
        let (width, height) = orientation.dimensions();
        let n = id.get();
        Self {
            id,
            title: format!("Beautiful {category} image {n}"),
            description: format!(
                "High-quality {category} photograph perfect for your projects. \
                 Professional {orientation} composition with excellent lighting and detail."
            ),
            thumbnail: format!("https://picsum.photos/400/300?random={n}"),
            full_size: format!("https://picsum.photos/{width}/{height}?random={n}"),
            category,
            orientation,
            width,
            height,
            size: format!("{width}x{height}"),
            kind: "JPEG".to_string(),
            tags: vec![
                category.to_string(),
                orientation.to_string(),
                "high-quality".to_string(),
                "professional".to_string(),
            ],
            author: String::new(),
            downloads: 0,
            likes: 0,
        }
    }

    /// Text match against title, description, or any tag.
    pub fn matches_text(&self, query: &SearchText) -> bool {
        query.matches(&self.title)
            || query.matches(&self.description)
            || self.tags.iter().any(|tag| query.matches(tag))
    }

    /// Exact match on every filter that is set. `size` is not an image attribute
    /// and is forwarded to remote sources only.
    pub fn matches_filters(&self, filters: &FilterSet) -> bool {
        filters.category.is_none_or(|category| category == self.category)
            && filters
                .orientation
                .is_none_or(|orientation| orientation == self.orientation)
    }

    pub fn matches(&self, query: &SearchText, filters: &FilterSet) -> bool {
        self.matches_text(query) && self.matches_filters(filters)
    }
}
