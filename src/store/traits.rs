use crate::model::{
    AdminUser, Category, CategoryRef, Id, Product, ProductWithCategory, Session,
};
use anyhow::Result;
use chrono::{DateTime, Utc};

#[async_trait::async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories for the admin console, drafts included, ordered by
    /// sort_order then recency.
    async fn list_categories(&self) -> Result<Vec<Category>>;
    /// Published categories in public display order.
    async fn list_published_categories(&self) -> Result<Vec<Category>>;
    async fn get_category(&self, id: &Id) -> Result<Option<Category>>;
    async fn get_published_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;
    async fn insert_category(&self, category: Category) -> Result<()>;
    async fn update_category(&self, category: Category) -> Result<()>;
    async fn delete_category(&self, id: &Id) -> Result<bool>;
    /// Row count, optionally restricted to records created since an instant.
    async fn count_categories(&self, created_since: Option<DateTime<Utc>>) -> Result<i64>;
}

#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// All products for the admin console with their category names, newest
    /// first.
    async fn list_products(&self) -> Result<Vec<ProductWithCategory>>;
    async fn list_published_products_for_category(
        &self,
        category_id: &Id,
    ) -> Result<Vec<Product>>;
    async fn get_product(&self, id: &Id) -> Result<Option<Product>>;
    /// Product by slug joined with its parent category for the breadcrumb.
    /// Slug uniqueness is assumed, not enforced.
    async fn get_product_detail_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<(Product, CategoryRef)>>;
    async fn insert_product(&self, product: Product) -> Result<()>;
    async fn update_product(&self, product: Product) -> Result<()>;
    async fn delete_product(&self, id: &Id) -> Result<bool>;
    async fn count_products(&self, created_since: Option<DateTime<Utc>>) -> Result<i64>;
}

pub trait Store: CategoryStore + ProductStore + Send + Sync {}
impl<T: CategoryStore + ProductStore + Send + Sync> Store for T {}

/// Binary object storage: upload by path, public URL derivation, batch
/// removal. One bucket, type-specific path prefixes.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;
    fn public_url(&self, path: &str) -> String;
    async fn remove(&self, paths: &[String]) -> Result<()>;
}

/// External auth service. Session mechanics live entirely on its side; we
/// only exchange credentials for tokens and tokens for users.
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;
    /// Resolve a bearer token to its user, or `None` when the token is
    /// unknown, revoked, or expired.
    async fn fetch_user(&self, access_token: &str) -> Result<Option<AdminUser>>;
    async fn sign_out(&self, access_token: &str) -> Result<()>;
}
