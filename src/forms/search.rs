//! Search parameters shared by the gallery page and the JSON API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::search::FilterSet;
use crate::domain::types::{Platform, SearchText, ViewMode};
use crate::forms::FormError;

/// Raw query string: `q`, `category`, `orientation`, `size`, `page`,
/// `per_page`, `view`, `platform`.
#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct SearchParams {
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPayload {
    pub search: SearchText,
    pub filters: FilterSet,
    pub page: usize,
    pub per_page: Option<usize>,
    pub view: ViewMode,
    pub platform: Option<Platform>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl TryFrom<SearchParams> for SearchPayload {
    type Error = FormError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        params.validate()?;

        let filters = FilterSet::from_raw(
            params.category.as_deref(),
            params.orientation.as_deref(),
            params.size.as_deref(),
        )?;

        let view = non_blank(params.view.as_ref())
            .map(str::parse::<ViewMode>)
            .transpose()?
            .unwrap_or_default();

        let platform = non_blank(params.platform.as_ref())
            .map(str::parse::<Platform>)
            .transpose()?;

        Ok(Self {
            search: SearchText::new(params.q.unwrap_or_default()),
            filters,
            page: params.page.unwrap_or(1),
            per_page: params.per_page,
            view,
            platform,
        })
    }
}

impl SearchPayload {
    /// Carries the search across page links, without `page`.
    pub fn link_params(&self) -> SearchParams {
        SearchParams {
            q: Some(self.search.as_str().to_string()).filter(|q| !q.is_empty()),
            category: self.filters.category.map(|c| c.to_string()),
            orientation: self.filters.orientation.map(|o| o.to_string()),
            size: self.filters.size.map(|s| s.to_string()),
            page: None,
            per_page: self.per_page,
            view: Some(self.view.to_string()),
            platform: self.platform.map(|p| p.to_string()),
        }
    }
}
