#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use tower::ServiceExt;

use atelier_catalog::config::EmailConfig;
use atelier_catalog::handlers::AppState;
use atelier_catalog::mail::Mailer;
use atelier_catalog::model::{
    AdminUser, Category, CategoryRef, Id, Product, ProductWithCategory, Session,
};
use atelier_catalog::routes::create_router;
use atelier_catalog::store::traits::{
    AuthGateway, CategoryStore, ObjectStore, ProductStore,
};
use atelier_catalog::{ImageLifecycle, SessionCache};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_EMAIL: &str = "operator@example.com";
pub const TEST_PASSWORD: &str = "correct-horse";

/// In-memory store mirroring the SQL ordering contracts.
#[derive(Default)]
pub struct MemoryStore {
    pub categories: Mutex<Vec<Category>>,
    pub products: Mutex<Vec<Product>>,
    /// When set, every count query fails.
    pub fail_counts: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.categories.lock().unwrap().clone();
        categories.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(categories)
    }

    async fn list_published_categories(&self) -> Result<Vec<Category>> {
        let mut categories = self.list_categories().await?;
        categories.retain(|category| category.is_published);
        Ok(categories)
    }

    async fn get_category(&self, id: &Id) -> Result<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|category| &category.id == id)
            .cloned())
    }

    async fn get_published_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|category| category.slug == slug && category.is_published)
            .cloned())
    }

    async fn insert_category(&self, category: Category) -> Result<()> {
        self.categories.lock().unwrap().push(category);
        Ok(())
    }

    async fn update_category(&self, category: Category) -> Result<()> {
        let mut categories = self.categories.lock().unwrap();
        if let Some(existing) = categories.iter_mut().find(|c| c.id == category.id) {
            *existing = category;
        }
        Ok(())
    }

    async fn delete_category(&self, id: &Id) -> Result<bool> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|category| &category.id != id);
        Ok(categories.len() < before)
    }

    async fn count_categories(&self, created_since: Option<DateTime<Utc>>) -> Result<i64> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(anyhow!("count query failed"));
        }
        let categories = self.categories.lock().unwrap();
        Ok(categories
            .iter()
            .filter(|category| created_since.map_or(true, |since| category.created_at >= since))
            .count() as i64)
    }
}

#[async_trait::async_trait]
impl ProductStore for MemoryStore {
    async fn list_products(&self) -> Result<Vec<ProductWithCategory>> {
        let categories = self.categories.lock().unwrap().clone();
        let mut products = self.products.lock().unwrap().clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(products
            .into_iter()
            .map(|product| {
                let category_name = categories
                    .iter()
                    .find(|category| category.id == product.category_id)
                    .map(|category| category.name.clone());
                ProductWithCategory {
                    product,
                    category_name,
                }
            })
            .collect())
    }

    async fn list_published_products_for_category(
        &self,
        category_id: &Id,
    ) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|product| &product.category_id == category_id && product.is_published)
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn get_product(&self, id: &Id) -> Result<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|product| &product.id == id)
            .cloned())
    }

    async fn get_product_detail_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<(Product, CategoryRef)>> {
        let product = self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|product| product.slug == slug)
            .cloned();

        let Some(product) = product else {
            return Ok(None);
        };

        let category = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|category| category.id == product.category_id)
            .map(|category| CategoryRef {
                name: category.name.clone(),
                slug: category.slug.clone(),
            });

        Ok(category.map(|category| (product, category)))
    }

    async fn insert_product(&self, product: Product) -> Result<()> {
        self.products.lock().unwrap().push(product);
        Ok(())
    }

    async fn update_product(&self, product: Product) -> Result<()> {
        let mut products = self.products.lock().unwrap();
        if let Some(existing) = products.iter_mut().find(|p| p.id == product.id) {
            *existing = product;
        }
        Ok(())
    }

    async fn delete_product(&self, id: &Id) -> Result<bool> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|product| &product.id != id);
        Ok(products.len() < before)
    }

    async fn count_products(&self, created_since: Option<DateTime<Utc>>) -> Result<i64> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(anyhow!("count query failed"));
        }
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .filter(|product| created_since.map_or(true, |since| product.created_at >= since))
            .count() as i64)
    }
}

/// Object store double that records calls and injects failures.
#[derive(Default)]
pub struct RecordingObjectStore {
    pub uploaded: Mutex<Vec<String>>,
    /// One entry per batch-remove call.
    pub removed: Mutex<Vec<Vec<String>>>,
    /// Fail the upload with this zero-based index.
    pub fail_upload_at: Mutex<Option<usize>>,
    pub fail_remove: AtomicBool,
}

impl RecordingObjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ObjectStore for RecordingObjectStore {
    async fn upload(&self, path: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<()> {
        let mut uploaded = self.uploaded.lock().unwrap();
        if *self.fail_upload_at.lock().unwrap() == Some(uploaded.len()) {
            return Err(anyhow!("upload rejected by storage"));
        }
        uploaded.push(path.to_string());
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://demo.supabase.co/storage/v1/object/public/images/{path}")
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(anyhow!("storage offline"));
        }
        self.removed.lock().unwrap().push(paths.to_vec());
        Ok(())
    }
}

/// Auth double: one fixed operator, one valid token, revocable.
pub struct StaticAuthGateway {
    pub signed_out: AtomicBool,
}

impl StaticAuthGateway {
    pub fn new() -> Self {
        Self {
            signed_out: AtomicBool::new(false),
        }
    }

    fn operator() -> AdminUser {
        AdminUser {
            id: "operator-1".to_string(),
            email: TEST_EMAIL.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl AuthGateway for StaticAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        if email == TEST_EMAIL && password == TEST_PASSWORD {
            self.signed_out.store(false, Ordering::SeqCst);
            return Ok(Session {
                access_token: TEST_TOKEN.to_string(),
                user: Self::operator(),
            });
        }
        Err(anyhow!("Invalid login credentials"))
    }

    async fn fetch_user(&self, access_token: &str) -> Result<Option<AdminUser>> {
        if access_token == TEST_TOKEN && !self.signed_out.load(Ordering::SeqCst) {
            return Ok(Some(Self::operator()));
        }
        Ok(None)
    }

    async fn sign_out(&self, _access_token: &str) -> Result<()> {
        self.signed_out.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<MemoryStore>,
    pub objects: Arc<RecordingObjectStore>,
    pub auth: Arc<StaticAuthGateway>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let objects = Arc::new(RecordingObjectStore::new());
    let auth = Arc::new(StaticAuthGateway::new());

    let state = AppState {
        store: Arc::clone(&store),
        images: Arc::new(ImageLifecycle::new(
            Arc::clone(&objects) as Arc<dyn ObjectStore>,
            "supabase.co",
            "images",
        )),
        auth: Arc::clone(&auth) as Arc<dyn AuthGateway>,
        sessions: Arc::new(SessionCache::new()),
        mailer: Arc::new(Mailer::new(&EmailConfig::default(), None)),
    };

    TestApp {
        router: create_router::<MemoryStore>().with_state(state),
        store,
        objects,
        auth,
    }
}

/// Fire one request at the router and decode the JSON response.
pub async fn request(
    router: &axum::Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

pub fn category(name: &str, slug: &str, sort_order: i32, is_published: bool) -> Category {
    Category {
        id: atelier_catalog::model::generate_id(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        main_image: String::new(),
        sort_order,
        is_published,
        created_at: Utc::now(),
    }
}

pub fn product(category_id: &str, title: &str, slug: &str, is_published: bool) -> Product {
    Product {
        id: atelier_catalog::model::generate_id(),
        category_id: category_id.to_string(),
        title: title.to_string(),
        slug: slug.to_string(),
        sku: format!("SKU-{slug}"),
        material: "316L Stainless Steel".to_string(),
        description: "Precision hardware.".to_string(),
        technical_specs: String::new(),
        images: Vec::new(),
        is_published,
        created_at: Utc::now(),
    }
}
