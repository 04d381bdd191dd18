//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::image::Image;
use crate::domain::search::PageResult;
use crate::domain::types::{Category, ImageId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ImageReader, ImageSearchQuery};

mock! {
    pub Repository {}

    impl ImageReader for Repository {
        fn search_images(&self, query: &ImageSearchQuery) -> RepositoryResult<PageResult>;
        fn get_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<Image>>;
        fn count_by_category(&self) -> RepositoryResult<Vec<(Category, usize)>>;
    }
}
