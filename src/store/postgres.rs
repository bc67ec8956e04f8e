use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::model::{Category, CategoryRef, Id, Product, ProductWithCategory};
use crate::store::traits::{CategoryStore, ProductStore};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn category_from_row(row: &PgRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        description: row.get("description"),
        main_image: row.get("main_image"),
        sort_order: row.get("sort_order"),
        is_published: row.get("is_published"),
        created_at: row.get("created_at"),
    }
}

fn product_from_row(row: &PgRow) -> Product {
    Product {
        id: row.get("id"),
        category_id: row.get("category_id"),
        title: row.get("title"),
        slug: row.get("slug"),
        sku: row.get("sku"),
        material: row.get("material"),
        description: row.get("description"),
        technical_specs: row.get("technical_specs"),
        images: row.get("images"),
        is_published: row.get("is_published"),
        created_at: row.get("created_at"),
    }
}

const CATEGORY_COLUMNS: &str =
    "id, name, slug, description, main_image, sort_order, is_published, created_at";

const PRODUCT_COLUMNS: &str = "id, category_id, title, slug, sku, material, description, \
     technical_specs, images, is_published, created_at";

#[async_trait::async_trait]
impl CategoryStore for PostgresStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY sort_order ASC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories")?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    async fn list_published_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE is_published = TRUE \
             ORDER BY sort_order ASC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list published categories")?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    async fn get_category(&self, id: &Id) -> Result<Option<Category>> {
        let row = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch category")?;

        Ok(row.as_ref().map(category_from_row))
    }

    async fn get_published_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let row = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = $1 AND is_published = TRUE"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch category by slug")?;

        Ok(row.as_ref().map(category_from_row))
    }

    async fn insert_category(&self, category: Category) -> Result<()> {
        sqlx::query(
            "INSERT INTO categories (id, name, slug, description, main_image, sort_order, is_published, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.main_image)
        .bind(category.sort_order)
        .bind(category.is_published)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert category")?;

        Ok(())
    }

    async fn update_category(&self, category: Category) -> Result<()> {
        sqlx::query(
            "UPDATE categories SET name = $2, slug = $3, description = $4, main_image = $5, \
             sort_order = $6, is_published = $7 WHERE id = $1",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.main_image)
        .bind(category.sort_order)
        .bind(category.is_published)
        .execute(&self.pool)
        .await
        .context("Failed to update category")?;

        Ok(())
    }

    async fn delete_category(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete category")?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_categories(&self, created_since: Option<DateTime<Utc>>) -> Result<i64> {
        let row = match created_since {
            Some(since) => {
                sqlx::query("SELECT COUNT(*) AS count FROM categories WHERE created_at >= $1")
                    .bind(since)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS count FROM categories")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .context("Failed to count categories")?;

        Ok(row.get("count"))
    }
}

#[async_trait::async_trait]
impl ProductStore for PostgresStore {
    async fn list_products(&self) -> Result<Vec<ProductWithCategory>> {
        let rows = sqlx::query(
            "SELECT p.id, p.category_id, p.title, p.slug, p.sku, p.material, p.description, \
             p.technical_specs, p.images, p.is_published, p.created_at, c.name AS category_name \
             FROM products p LEFT JOIN categories c ON c.id = p.category_id \
             ORDER BY p.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list products")?;

        Ok(rows
            .iter()
            .map(|row| ProductWithCategory {
                product: product_from_row(row),
                category_name: row.get("category_name"),
            })
            .collect())
    }

    async fn list_published_products_for_category(
        &self,
        category_id: &Id,
    ) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE category_id = $1 AND is_published = TRUE ORDER BY created_at DESC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list products for category")?;

        Ok(rows.iter().map(product_from_row).collect())
    }

    async fn get_product(&self, id: &Id) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch product")?;

        Ok(row.as_ref().map(product_from_row))
    }

    async fn get_product_detail_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<(Product, CategoryRef)>> {
        let row = sqlx::query(
            "SELECT p.id, p.category_id, p.title, p.slug, p.sku, p.material, p.description, \
             p.technical_specs, p.images, p.is_published, p.created_at, \
             c.name AS category_name, c.slug AS category_slug \
             FROM products p JOIN categories c ON c.id = p.category_id \
             WHERE p.slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch product by slug")?;

        Ok(row.map(|row| {
            (
                product_from_row(&row),
                CategoryRef {
                    name: row.get("category_name"),
                    slug: row.get("category_slug"),
                },
            )
        }))
    }

    async fn insert_product(&self, product: Product) -> Result<()> {
        sqlx::query(
            "INSERT INTO products (id, category_id, title, slug, sku, material, description, \
             technical_specs, images, is_published, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&product.id)
        .bind(&product.category_id)
        .bind(&product.title)
        .bind(&product.slug)
        .bind(&product.sku)
        .bind(&product.material)
        .bind(&product.description)
        .bind(&product.technical_specs)
        .bind(&product.images)
        .bind(product.is_published)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert product")?;

        Ok(())
    }

    async fn update_product(&self, product: Product) -> Result<()> {
        sqlx::query(
            "UPDATE products SET category_id = $2, title = $3, slug = $4, sku = $5, \
             material = $6, description = $7, technical_specs = $8, images = $9, \
             is_published = $10 WHERE id = $1",
        )
        .bind(&product.id)
        .bind(&product.category_id)
        .bind(&product.title)
        .bind(&product.slug)
        .bind(&product.sku)
        .bind(&product.material)
        .bind(&product.description)
        .bind(&product.technical_specs)
        .bind(&product.images)
        .bind(product.is_published)
        .execute(&self.pool)
        .await
        .context("Failed to update product")?;

        Ok(())
    }

    async fn delete_product(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete product")?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_products(&self, created_since: Option<DateTime<Utc>>) -> Result<i64> {
        let row = match created_since {
            Some(since) => {
                sqlx::query("SELECT COUNT(*) AS count FROM products WHERE created_at >= $1")
                    .bind(since)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS count FROM products")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .context("Failed to count products")?;

        Ok(row.get("count"))
    }
}
