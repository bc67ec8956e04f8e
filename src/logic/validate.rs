use thiserror::Error;

use crate::model::{
    CreateCategoryRequest, CreateProductRequest, UpdateCategoryRequest, UpdateProductRequest,
};

/// Required-field failures, raised before any upload or store call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Please create and select a category first.")]
    MissingCategory,
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

pub fn validate_create_category(request: &CreateCategoryRequest) -> Result<(), ValidationError> {
    require(&request.name, "name")
}

pub fn validate_update_category(request: &UpdateCategoryRequest) -> Result<(), ValidationError> {
    require(&request.name, "name")?;
    require(&request.slug, "slug")
}

pub fn validate_create_product(request: &CreateProductRequest) -> Result<(), ValidationError> {
    require(&request.title, "title")?;
    if request.category_id.trim().is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    require(&request.sku, "sku")?;
    require(&request.description, "description")
}

pub fn validate_update_product(request: &UpdateProductRequest) -> Result<(), ValidationError> {
    require(&request.title, "title")?;
    require(&request.slug, "slug")?;
    if request.category_id.trim().is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    require(&request.sku, "sku")?;
    require(&request.description, "description")
}
