//! In-memory catalog used as the default data source.

use std::sync::Arc;

use crate::domain::image::Image;
use crate::domain::search::PageResult;
use crate::domain::types::{Category, ImageId, Orientation};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ImageReader, ImageSearchQuery};

/// Ordered, immutable image catalog. Cloning shares the underlying storage.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRepository {
    images: Arc<Vec<Image>>,
}

impl InMemoryRepository {
    pub fn new(images: Vec<Image>) -> Self {
        Self {
            images: Arc::new(images),
        }
    }

    /// Deterministic catalog of `count` images with ids `1..=count`.
    pub fn with_sample_catalog(count: u32) -> RepositoryResult<Self> {
        let images = (1..=count)
            .map(sample_image)
            .collect::<RepositoryResult<Vec<_>>>()?;
        log::info!("Generated sample catalog with {} images", images.len());
        Ok(Self::new(images))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Category and orientation cycle through their variants so every filter
/// combination is populated.
fn sample_image(n: u32) -> RepositoryResult<Image> {
    let id = ImageId::new(n)?;
    let index = (n - 1) as usize;
    let category = Category::ALL[index % Category::ALL.len()];
    let orientation = Orientation::ALL[index % Orientation::ALL.len()];

    let mut image = Image::new(id, category, orientation);
    let seed = u64::from(n);
    image.author = format!("Photographer {}", (seed * 37) % 50 + 1);
    image.downloads = ((seed * 7_919) % 10_000) as u32;
    image.likes = ((seed * 104_729) % 5_000) as u32;
    Ok(image)
}

impl ImageReader for InMemoryRepository {
    fn search_images(&self, query: &ImageSearchQuery) -> RepositoryResult<PageResult> {
        let matches: Vec<Image> = self
            .images
            .iter()
            .filter(|image| image.matches(&query.search, &query.filters))
            .cloned()
            .collect();

        let result = match query.pagination {
            Some(pagination) => PageResult::slice(&matches, pagination.page, pagination.per_page),
            None => {
                let total = matches.len();
                PageResult {
                    items: matches,
                    total,
                    page: 1,
                    total_pages: usize::from(total > 0),
                }
            }
        };

        Ok(result)
    }

    fn get_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<Image>> {
        Ok(self.images.iter().find(|image| image.id == id).cloned())
    }

    fn count_by_category(&self) -> RepositoryResult<Vec<(Category, usize)>> {
        Ok(Category::ALL
            .iter()
            .map(|&category| {
                let count = self
                    .images
                    .iter()
                    .filter(|image| image.category == category)
                    .count();
                (category, count)
            })
            .collect())
    }
}
