use crate::model::category::default_published;
use crate::model::{generate_id, slugify, Id, NewImage, TechnicalSpec};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MATERIAL: &str = "316L Stainless Steel";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub category_id: Id,
    pub title: String,
    pub slug: String,
    pub sku: String,
    pub material: String,
    pub description: String,
    /// Free text; either a JSON list of label/value rows or anything else.
    /// Read through [`Product::technical_spec_rows`].
    pub technical_specs: String,
    /// Ordered public URLs; the first is the primary image.
    pub images: Vec<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Interpret `technical_specs` as a JSON list of label/value rows.
    ///
    /// The stored format was never schema-enforced, so anything that fails
    /// to parse falls back to a Material/SKU pair built from the product
    /// itself instead of surfacing an error.
    pub fn technical_spec_rows(&self) -> Vec<TechnicalSpec> {
        match serde_json::from_str::<Vec<TechnicalSpec>>(&self.technical_specs) {
            Ok(rows) => rows,
            Err(_) => vec![
                TechnicalSpec {
                    label: "Material".to_string(),
                    value: self.material.clone(),
                },
                TechnicalSpec {
                    label: "SKU".to_string(),
                    value: self.sku.clone(),
                },
            ],
        }
    }
}

/// Admin listing row: a product joined with its category's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
}

/// Parent-category fields needed for the breadcrumb on a detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
}

/// Fully assembled public detail page payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
    pub category_slug: String,
    /// Parsed spec rows, fallback included.
    pub specs: Vec<TechnicalSpec>,
}

/// Command object for the product create form. Images resolve in two
/// parts: `images` are URLs kept from a previous edit, `new_images` are
/// uploaded first and appended in submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub category_id: Id,
    pub sku: String,
    #[serde(default = "default_material")]
    pub material: String,
    pub description: String,
    #[serde(default)]
    pub technical_specs: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub new_images: Vec<NewImage>,
}

impl CreateProductRequest {
    pub fn into_product(self, images: Vec<String>) -> Product {
        let slug = if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            self.slug.trim().to_string()
        };

        Product {
            id: generate_id(),
            category_id: self.category_id,
            title: self.title,
            slug,
            sku: self.sku,
            material: self.material,
            description: self.description,
            technical_specs: self.technical_specs,
            images,
            is_published: self.is_published,
            created_at: Utc::now(),
        }
    }
}

/// Command object for the product edit form; replaces the record wholesale,
/// last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub title: String,
    pub slug: String,
    pub category_id: Id,
    pub sku: String,
    #[serde(default = "default_material")]
    pub material: String,
    pub description: String,
    #[serde(default)]
    pub technical_specs: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub new_images: Vec<NewImage>,
}

impl UpdateProductRequest {
    pub fn apply(self, existing: &Product, images: Vec<String>) -> Product {
        Product {
            id: existing.id.clone(),
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            sku: self.sku,
            material: self.material,
            description: self.description,
            technical_specs: self.technical_specs,
            images,
            is_published: self.is_published,
            created_at: existing.created_at,
        }
    }
}

fn default_material() -> String {
    DEFAULT_MATERIAL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(technical_specs: &str) -> Product {
        Product {
            id: "p-1".to_string(),
            category_id: "c-1".to_string(),
            title: "Lobster Clasp".to_string(),
            slug: "lobster-clasp".to_string(),
            sku: "LC-316-12".to_string(),
            material: DEFAULT_MATERIAL.to_string(),
            description: "Spring-loaded clasp.".to_string(),
            technical_specs: technical_specs.to_string(),
            images: Vec::new(),
            is_published: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_spec_rows_parse_json_list() {
        let rows = product(r#"[{"label":"Grade","value":"316L"}]"#).technical_spec_rows();
        assert_eq!(
            rows,
            vec![TechnicalSpec {
                label: "Grade".to_string(),
                value: "316L".to_string(),
            }]
        );
    }

    #[test]
    fn test_spec_rows_fall_back_to_material_and_sku() {
        let rows = product("not json").technical_spec_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Material");
        assert_eq!(rows[0].value, DEFAULT_MATERIAL);
        assert_eq!(rows[1].label, "SKU");
        assert_eq!(rows[1].value, "LC-316-12");
    }

    #[test]
    fn test_spec_rows_accept_empty_list() {
        assert!(product("[]").technical_spec_rows().is_empty());
    }

    #[test]
    fn test_create_derives_slug_from_title() {
        let request = CreateProductRequest {
            title: "Spring Ring".to_string(),
            slug: String::new(),
            category_id: "c-1".to_string(),
            sku: "SR-1".to_string(),
            material: DEFAULT_MATERIAL.to_string(),
            description: "Round clasp.".to_string(),
            technical_specs: String::new(),
            is_published: true,
            images: Vec::new(),
            new_images: Vec::new(),
        };
        assert_eq!(request.into_product(Vec::new()).slug, "spring-ring");
    }
}
