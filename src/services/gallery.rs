//! Services assembling search results for the gallery page and the API.

use serde::Deserialize;

use crate::domain::search::PageResult;
use crate::domain::types::Platform;
use crate::dto::gallery::GalleryPageData;
use crate::forms::search::SearchPayload;
use crate::pagination::Paginated;
use crate::repository::{ImageReader, ImageSearchQuery};
use crate::services::{ServiceError, ServiceResult};

/// Page size for each platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct PageSizes {
    pub desktop: usize,
    pub mobile: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            desktop: 20,
            mobile: 15,
        }
    }
}

impl PageSizes {
    pub fn for_platform(&self, platform: Platform) -> usize {
        match platform {
            Platform::Desktop => self.desktop,
            Platform::Mobile => self.mobile,
        }
    }
}

/// Picks the platform (explicit parameter wins over detection) and its page size.
pub fn resolve_page_size(
    payload: &SearchPayload,
    sizes: PageSizes,
    detected: Platform,
) -> (Platform, usize) {
    let platform = payload.platform.unwrap_or(detected);
    let per_page = payload
        .per_page
        .unwrap_or_else(|| sizes.for_platform(platform));
    (platform, per_page)
}

/// Fetches the requested page, rejecting pages past the end of the results.
///
/// Page 1 is always valid, even for an empty result.
pub fn search_images<R>(
    repo: &R,
    payload: &SearchPayload,
    per_page: usize,
) -> ServiceResult<PageResult>
where
    R: ImageReader + ?Sized,
{
    let query = ImageSearchQuery::new(payload.search.clone())
        .filters(payload.filters)
        .paginate(payload.page, per_page);

    let result = repo.search_images(&query).map_err(|err| {
        log::error!("Failed to search images: {err}");
        err
    })?;

    if payload.page > result.total_pages.max(1) {
        return Err(ServiceError::InvalidPage {
            page: payload.page,
            total_pages: result.total_pages,
        });
    }

    Ok(result)
}

/// Loads the images and navigation controls for the gallery page.
pub fn load_gallery_page<R>(
    repo: &R,
    payload: &SearchPayload,
    sizes: PageSizes,
    detected: Platform,
) -> ServiceResult<GalleryPageData>
where
    R: ImageReader + ?Sized,
{
    let (platform, per_page) = resolve_page_size(payload, sizes, detected);
    let result = search_images(repo, payload, per_page)?;

    let search_query = Some(payload.search.as_str().to_string()).filter(|q| !q.is_empty());
    let title = match &search_query {
        Some(q) => format!("Results for \"{q}\""),
        None => "Trending Images".to_string(),
    };
    let summary = format!("{} results found", result.total);

    let images = Paginated::new(result.items, result.page, result.total, result.total_pages);

    Ok(GalleryPageData {
        images,
        title,
        summary,
        search_query,
        filters: payload.filters,
        view: payload.view,
        platform,
        per_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::image::Image;
    use crate::domain::search::FilterSet;
    use crate::domain::types::{Category, ImageId, Orientation, SearchText, ViewMode};
    use crate::repository::Pagination;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn payload(q: &str, page: usize) -> SearchPayload {
        SearchPayload {
            search: SearchText::new(q),
            filters: FilterSet::default(),
            page,
            per_page: None,
            view: ViewMode::Grid,
            platform: None,
        }
    }

    fn page_of(total: usize, page: usize, per_page: usize) -> PageResult {
        let images: Vec<Image> = (1..=total as u32)
            .map(|id| Image::new(ImageId::new(id).unwrap(), Category::Nature, Orientation::Square))
            .collect();
        PageResult::slice(&images, page, per_page)
    }

    #[test]
    fn explicit_platform_wins_over_detection() {
        let mut p = payload("", 1);
        p.platform = Some(Platform::Mobile);
        assert_eq!(
            resolve_page_size(&p, PageSizes::default(), Platform::Desktop),
            (Platform::Mobile, 15)
        );

        p.per_page = Some(7);
        assert_eq!(
            resolve_page_size(&p, PageSizes::default(), Platform::Desktop),
            (Platform::Mobile, 7)
        );
    }

    #[test]
    fn search_forwards_query_and_pagination() {
        let mut repo = MockRepository::new();
        repo.expect_search_images()
            .withf(|q| {
                q.search.as_str() == "nature"
                    && q.pagination == Some(Pagination { page: 2, per_page: 15 })
            })
            .times(1)
            .returning(|_| Ok(page_of(40, 2, 15)));

        let result = search_images(&repo, &payload(" nature ", 2), 15).unwrap();

        assert_eq!(result.page, 2);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.items.len(), 15);
    }

    #[test]
    fn page_past_the_end_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_search_images()
            .returning(|q| Ok(page_of(30, q.pagination.unwrap().page, 20)));

        let result = search_images(&repo, &payload("", 3), 20);

        assert!(matches!(
            result,
            Err(ServiceError::InvalidPage {
                page: 3,
                total_pages: 2
            })
        ));
    }

    #[test]
    fn first_page_of_empty_result_is_valid() {
        let mut repo = MockRepository::new();
        repo.expect_search_images()
            .returning(|_| Ok(PageResult::empty(1)));

        let result = search_images(&repo, &payload("nothing", 1), 20).unwrap();

        assert_eq!(result.total, 0);
    }

    #[test]
    fn repository_failure_becomes_internal_error() {
        let mut repo = MockRepository::new();
        repo.expect_search_images()
            .returning(|_| Err(RepositoryError::Unavailable("catalog offline".into())));

        let result = search_images(&repo, &payload("", 1), 20);

        assert!(matches!(result, Err(ServiceError::Internal(_))));
    }

    #[test]
    fn gallery_titles_follow_query() {
        let mut repo = MockRepository::new();
        repo.expect_search_images()
            .returning(|_| Ok(page_of(12, 1, 20)));

        let trending =
            load_gallery_page(&repo, &payload("", 1), PageSizes::default(), Platform::Desktop)
                .unwrap();
        assert_eq!(trending.title, "Trending Images");
        assert_eq!(trending.summary, "12 results found");
        assert_eq!(trending.search_query, None);
        assert_eq!(trending.per_page, 20);
        assert!(!trending.images.visible);

        let searched = load_gallery_page(
            &repo,
            &payload("nature", 1),
            PageSizes::default(),
            Platform::Mobile,
        )
        .unwrap();
        assert_eq!(searched.title, "Results for \"nature\"");
        assert_eq!(searched.platform, Platform::Mobile);
        assert_eq!(searched.per_page, 15);
    }
}
