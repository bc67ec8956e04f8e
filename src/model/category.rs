use crate::model::{generate_id, slugify, Id, NewImage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Public URL of the cover image, or empty when none is set.
    pub main_image: String,
    /// Ascending listing position on the public catalog.
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Command object for the category create form.
///
/// `slug` may be left empty; it is then derived from `name`. `new_image`
/// is uploaded before the insert and replaces `main_image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_published")]
    pub is_published: bool,
    /// Existing image URL to keep; empty for none.
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub new_image: Option<NewImage>,
}

impl CreateCategoryRequest {
    pub fn into_category(self, main_image: String) -> Category {
        let slug = if self.slug.trim().is_empty() {
            slugify(&self.name)
        } else {
            self.slug.trim().to_string()
        };

        Category {
            id: generate_id(),
            name: self.name,
            slug,
            description: self.description,
            main_image,
            sort_order: self.sort_order,
            is_published: self.is_published,
            created_at: Utc::now(),
        }
    }
}

/// Command object for the category edit form. The slug travels as-is and a
/// rename never re-derives it; last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_published")]
    pub is_published: bool,
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub new_image: Option<NewImage>,
}

impl UpdateCategoryRequest {
    pub fn apply(self, existing: &Category, main_image: String) -> Category {
        Category {
            id: existing.id.clone(),
            name: self.name,
            slug: self.slug,
            description: self.description,
            main_image,
            sort_order: self.sort_order,
            is_published: self.is_published,
            created_at: existing.created_at,
        }
    }
}

pub(crate) fn default_published() -> bool {
    true
}
