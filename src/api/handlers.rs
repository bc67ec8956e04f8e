use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logic::{catalog, ImageLifecycle};
use crate::mail::{MailError, Mailer};
use crate::model::{Category, Product, ProductDetail};
use crate::store::traits::{AuthGateway, Store};
use crate::store::SessionCache;

/// Shared state handed to every handler: the relational store plus the
/// external collaborators.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub images: Arc<ImageLifecycle>,
    pub auth: Arc<dyn AuthGateway>,
    pub sessions: Arc<SessionCache>,
    pub mailer: Arc<Mailer>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            images: Arc::clone(&self.images),
            auth: Arc::clone(&self.auth),
            sessions: Arc::clone(&self.sessions),
            mailer: Arc::clone(&self.mailer),
        }
    }
}

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            detail: None,
        }
    }

    pub fn with_detail(message: &str, detail: String) -> Self {
        Self {
            error: message.to_string(),
            detail: Some(detail),
        }
    }
}

/// Public category page: the category plus its published products.
#[derive(Debug, Serialize)]
pub struct CategoryPageResponse {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

/// Published categories in display order. A store failure is logged and
/// renders as an empty catalog, never as an error page.
pub async fn list_catalog_categories<S: Store>(
    State(state): State<AppState<S>>,
) -> Json<ListResponse<Category>> {
    match catalog::published_categories(&*state.store).await {
        Ok(items) => Json(ListResponse::new(items)),
        Err(error) => {
            log::error!("Error fetching categories: {error:#}");
            Json(ListResponse::empty())
        }
    }
}

pub async fn get_catalog_category<S: Store>(
    State(state): State<AppState<S>>,
    Path(category_slug): Path<String>,
) -> Result<Json<CategoryPageResponse>, (StatusCode, Json<ErrorResponse>)> {
    match catalog::category_with_products(&*state.store, &category_slug).await {
        Ok(Some((category, products))) => Ok(Json(CategoryPageResponse { category, products })),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Category not found")),
        )),
        Err(error) => {
            // Visitors get a not-found page, not a stack trace.
            log::error!("Error fetching category '{category_slug}': {error:#}");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Category not found")),
            ))
        }
    }
}

pub async fn get_catalog_product<S: Store>(
    State(state): State<AppState<S>>,
    Path((_category_slug, product_slug)): Path<(String, String)>,
) -> Result<Json<ProductDetail>, (StatusCode, Json<ErrorResponse>)> {
    match catalog::product_detail(&*state.store, &product_slug).await {
        Ok(Some(detail)) => Ok(Json(detail)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Product Not Found")),
        )),
        Err(error) => {
            log::error!("Error fetching product '{product_slug}': {error:#}");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Product Not Found")),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

pub async fn send_contact_inquiry<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    if request.name.is_empty() || request.email.is_empty() || request.message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required fields")),
        ));
    }

    match state
        .mailer
        .send_contact_inquiry(
            &request.name,
            &request.email,
            request.subject.as_deref(),
            &request.message,
        )
        .await
    {
        Ok(id) => Ok(Json(serde_json::json!({ "id": id }))),
        Err(error) => Err(mail_error_response(error)),
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default)]
    pub email: String,
}

pub async fn subscribe_newsletter<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<NewsletterRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    if request.email.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Email is required")),
        ));
    }

    match state.mailer.send_newsletter_signup(&request.email).await {
        Ok(id) => Ok(Json(
            serde_json::json!({ "success": true, "data": { "id": id } }),
        )),
        Err(error) => Err(mail_error_response(error)),
    }
}

fn mail_error_response(error: MailError) -> (StatusCode, Json<ErrorResponse>) {
    match error {
        MailError::Provider(message) => {
            log::error!("Email provider error: {message}");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(&message)))
        }
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(&other.to_string())),
        ),
    }
}
