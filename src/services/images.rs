use crate::domain::image::Image;
use crate::domain::types::ImageId;
use crate::dto::api::CategoryCount;
use crate::repository::ImageReader;
use crate::services::{ServiceError, ServiceResult};

/// Fetches a single image for the detail view.
pub fn get_image<R>(repo: &R, image_id: u32) -> ServiceResult<Image>
where
    R: ImageReader + ?Sized,
{
    let image_id = ImageId::new(image_id)?;

    repo.get_image_by_id(image_id)?
        .ok_or(ServiceError::NotFound)
}

/// Lists every category with the number of images in it.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryCount>>
where
    R: ImageReader + ?Sized,
{
    let counts = repo.count_by_category().map_err(|err| {
        log::error!("Failed to count categories: {err}");
        err
    })?;

    Ok(counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect())
}
