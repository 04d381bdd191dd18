//! Filters and paged results shared by every data source.

use serde::{Deserialize, Serialize};

use crate::domain::image::Image;
use crate::domain::types::{Category, Orientation, SizeFilter, TypeConstraintError};

/// Active filter selections applied alongside the text query.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSet {
    pub category: Option<Category>,
    pub orientation: Option<Orientation>,
    pub size: Option<SizeFilter>,
}

/// Parses an optional raw filter value; blank means unset.
fn parse_filter<T>(raw: Option<&str>) -> Result<Option<T>, TypeConstraintError>
where
    T: std::str::FromStr<Err = TypeConstraintError>,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value.parse().map(Some),
        None => Ok(None),
    }
}

impl FilterSet {
    /// Builds a filter set from raw query-string values.
    pub fn from_raw(
        category: Option<&str>,
        orientation: Option<&str>,
        size: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            category: parse_filter(category)?,
            orientation: parse_filter(orientation)?,
            size: parse_filter(size)?,
        })
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn size(mut self, size: SizeFilter) -> Self {
        self.size = Some(size);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.orientation.is_none() && self.size.is_none()
    }

    /// `(name, value)` pairs for every filter that is set.
    pub fn to_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str()));
        }
        if let Some(orientation) = self.orientation {
            pairs.push(("orientation", orientation.as_str()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.as_str()));
        }
        pairs
    }
}

/// Number of pages needed for `total` items; zero when `per_page` is zero.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total.div_ceil(per_page)
    }
}

/// One page of a filtered result set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub items: Vec<Image>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl PageResult {
    /// Offset/limit slice of `matches` for a 1-based `page`.
    pub fn slice(matches: &[Image], page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let total = matches.len();
        let start = (page - 1).saturating_mul(per_page).min(total);
        let end = start.saturating_add(per_page).min(total);
        Self {
            items: matches[start..end].to_vec(),
            total,
            page,
            total_pages: total_pages(total, per_page),
        }
    }

    pub fn empty(page: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: page.max(1),
            total_pages: 0,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ImageId;

    fn catalog(n: u32) -> Vec<Image> {
        (1..=n)
            .map(|id| {
                Image::new(
                    ImageId::new(id).unwrap(),
                    Category::Nature,
                    Orientation::Square,
                )
            })
            .collect()
    }

    #[test]
    fn blank_filters_are_unset() {
        let filters = FilterSet::from_raw(Some(""), Some("  "), None).unwrap();
        assert!(filters.is_empty());
    }

    #[test]
    fn unknown_filter_value_is_rejected() {
        assert!(FilterSet::from_raw(Some("dinosaurs"), None, None).is_err());
    }

    #[test]
    fn pairs_skip_unset_filters() {
        let filters = FilterSet::default()
            .category(Category::Food)
            .size(SizeFilter::Small);
        assert_eq!(filters.to_pairs(), vec![("category", "food"), ("size", "small")]);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn slice_returns_requested_window() {
        let images = catalog(45);
        let page = PageResult::slice(&images, 3, 20);
        assert_eq!(page.total, 45);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id.get(), 41);
        assert!(!page.has_more());
    }

    #[test]
    fn slice_past_the_end_is_empty() {
        let images = catalog(10);
        let page = PageResult::slice(&images, 4, 5);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 4);
    }

    #[test]
    fn page_result_serializes_camel_case() {
        let value = serde_json::to_value(PageResult::empty(1)).unwrap();
        assert_eq!(value["totalPages"], 0);
        assert_eq!(value["page"], 1);
    }
}
