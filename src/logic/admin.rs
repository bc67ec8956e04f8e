use thiserror::Error;

use crate::logic::images::{ImageKind, ImageLifecycle};
use crate::logic::validate::{
    validate_create_category, validate_create_product, validate_update_category,
    validate_update_product, ValidationError,
};
use crate::model::{
    Category, CreateCategoryRequest, CreateProductRequest, Id, Product, UpdateCategoryRequest,
    UpdateProductRequest,
};
use crate::store::traits::{CategoryStore, ProductStore};

/// Failures of an admin submission, in the order the pipeline can hit
/// them: validation, then upload, then persistence.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Error uploading image: {0:#}")]
    Upload(anyhow::Error),
    #[error("Database Error: {0:#}")]
    Persistence(anyhow::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
}

pub async fn create_category<S: CategoryStore>(
    store: &S,
    images: &ImageLifecycle,
    request: CreateCategoryRequest,
) -> Result<Category, AdminError> {
    validate_create_category(&request)?;

    let mut main_image = request.main_image.clone();
    if let Some(upload) = &request.new_image {
        main_image = upload_single(images, ImageKind::Category, upload).await?;
    }

    let category = request.into_category(main_image);
    store
        .insert_category(category.clone())
        .await
        .map_err(AdminError::Persistence)?;

    Ok(category)
}

pub async fn update_category<S: CategoryStore>(
    store: &S,
    images: &ImageLifecycle,
    id: &Id,
    request: UpdateCategoryRequest,
) -> Result<Category, AdminError> {
    validate_update_category(&request)?;

    let existing = store
        .get_category(id)
        .await
        .map_err(AdminError::Persistence)?
        .ok_or(AdminError::NotFound("Category"))?;

    let mut main_image = request.main_image.clone();
    if let Some(upload) = &request.new_image {
        main_image = upload_single(images, ImageKind::Category, upload).await?;
    }

    let category = request.apply(&existing, main_image);
    store
        .update_category(category.clone())
        .await
        .map_err(AdminError::Persistence)?;

    Ok(category)
}

/// Two-phase delete: storage objects first (best effort), then the row.
///
/// A storage failure is logged and never blocks the row delete; a row
/// failure after a successful storage delete leaves the record alive with
/// dangling image references. Neither direction is transactional.
pub async fn delete_category<S: CategoryStore>(
    store: &S,
    images: &ImageLifecycle,
    id: &Id,
    known_image: Option<String>,
) -> Result<(), AdminError> {
    // Re-fetch when the caller has no image URL on hand.
    let target_image = match known_image {
        Some(url) => Some(url),
        None => store
            .get_category(id)
            .await
            .map_err(AdminError::Persistence)?
            .map(|category| category.main_image),
    };

    if let Some(url) = target_image.filter(|url| !url.is_empty()) {
        images.remove_for_urls(std::slice::from_ref(&url)).await;
    }

    let deleted = store
        .delete_category(id)
        .await
        .map_err(AdminError::Persistence)?;
    if !deleted {
        return Err(AdminError::NotFound("Category"));
    }

    Ok(())
}

pub async fn create_product<S: ProductStore>(
    store: &S,
    images: &ImageLifecycle,
    request: CreateProductRequest,
) -> Result<Product, AdminError> {
    validate_create_product(&request)?;

    let mut urls = request.images.clone();
    let uploaded = images
        .upload_images(ImageKind::Product, &request.new_images)
        .await
        .map_err(AdminError::Upload)?;
    urls.extend(uploaded);

    let product = request.into_product(urls);
    store
        .insert_product(product.clone())
        .await
        .map_err(AdminError::Persistence)?;

    Ok(product)
}

pub async fn update_product<S: ProductStore>(
    store: &S,
    images: &ImageLifecycle,
    id: &Id,
    request: UpdateProductRequest,
) -> Result<Product, AdminError> {
    validate_update_product(&request)?;

    let existing = store
        .get_product(id)
        .await
        .map_err(AdminError::Persistence)?
        .ok_or(AdminError::NotFound("Product"))?;

    let mut urls = request.images.clone();
    let uploaded = images
        .upload_images(ImageKind::Product, &request.new_images)
        .await
        .map_err(AdminError::Upload)?;
    urls.extend(uploaded);

    let product = request.apply(&existing, urls);
    store
        .update_product(product.clone())
        .await
        .map_err(AdminError::Persistence)?;

    Ok(product)
}

/// Two-phase delete for products; see [`delete_category`] for the
/// consistency caveats. All stored images are removed in one batch.
pub async fn delete_product<S: ProductStore>(
    store: &S,
    images: &ImageLifecycle,
    id: &Id,
    known_images: Vec<String>,
) -> Result<(), AdminError> {
    let target_images = if known_images.is_empty() {
        store
            .get_product(id)
            .await
            .map_err(AdminError::Persistence)?
            .map(|product| product.images)
            .unwrap_or_default()
    } else {
        known_images
    };

    images.remove_for_urls(&target_images).await;

    let deleted = store
        .delete_product(id)
        .await
        .map_err(AdminError::Persistence)?;
    if !deleted {
        return Err(AdminError::NotFound("Product"));
    }

    Ok(())
}

async fn upload_single(
    images: &ImageLifecycle,
    kind: ImageKind,
    upload: &crate::model::NewImage,
) -> Result<String, AdminError> {
    let mut urls = images
        .upload_images(kind, std::slice::from_ref(upload))
        .await
        .map_err(AdminError::Upload)?;
    Ok(urls.remove(0))
}
