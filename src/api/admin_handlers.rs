use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::api::handlers::{AppState, ErrorResponse, ListResponse};
use crate::api::session_extractor::AdminContext;
use crate::logic::admin::{self, AdminError};
use crate::model::{
    Category, CreateCategoryRequest, CreateProductRequest, Id, LoginRequest, Product,
    ProductWithCategory, Session, UpdateCategoryRequest, UpdateProductRequest,
};
use crate::store::traits::{AuthGateway, CategoryStore, ProductStore, Store};

pub async fn admin_login<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Session>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth.sign_in(&request.email, &request.password).await {
        Ok(session) => {
            state
                .sessions
                .put(&session.access_token, session.user.clone())
                .await;
            Ok(Json(session))
        }
        Err(error) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(&error.to_string())),
        )),
    }
}

pub async fn admin_logout<S: Store>(
    ctx: AdminContext,
    State(state): State<AppState<S>>,
) -> Json<serde_json::Value> {
    state.sessions.remove(&ctx.token).await;
    if let Err(error) = state.auth.sign_out(&ctx.token).await {
        log::error!("Sign-out error: {error:#}");
    }

    Json(serde_json::json!({ "redirect_to": "/admin/login" }))
}

#[derive(Debug, Default, Serialize)]
pub struct DashboardStats {
    pub categories: i64,
    pub products: i64,
    pub new_categories: i64,
    pub new_products: i64,
}

/// The four dashboard counts, fetched concurrently and awaited jointly.
/// If any one fails the whole set renders as zeros; stats are never
/// partially populated.
pub async fn get_dashboard_stats<S: Store>(
    _ctx: AdminContext,
    State(state): State<AppState<S>>,
) -> Json<DashboardStats> {
    let month_start = current_month_start();

    let counts = tokio::try_join!(
        state.store.count_categories(None),
        state.store.count_products(None),
        state.store.count_categories(Some(month_start)),
        state.store.count_products(Some(month_start)),
    );

    match counts {
        Ok((categories, products, new_categories, new_products)) => Json(DashboardStats {
            categories,
            products,
            new_categories,
            new_products,
        }),
        Err(error) => {
            log::error!("Error fetching stats: {error:#}");
            Json(DashboardStats::default())
        }
    }
}

fn current_month_start() -> DateTime<Utc> {
    let now = Utc::now();
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Admin listing, drafts included. Errors log and render as an empty list;
/// nothing is retried.
pub async fn list_admin_categories<S: Store>(
    _ctx: AdminContext,
    State(state): State<AppState<S>>,
) -> Json<ListResponse<Category>> {
    match state.store.list_categories().await {
        Ok(items) => Json(ListResponse::new(items)),
        Err(error) => {
            log::error!("Error fetching categories: {error:#}");
            Json(ListResponse::empty())
        }
    }
}

pub async fn create_admin_category<S: Store>(
    _ctx: AdminContext,
    State(state): State<AppState<S>>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), (StatusCode, Json<ErrorResponse>)> {
    match admin::create_category(&*state.store, &state.images, request).await {
        Ok(category) => Ok((StatusCode::CREATED, Json(category))),
        Err(error) => Err(admin_error_response(error)),
    }
}

pub async fn update_admin_category<S: Store>(
    _ctx: AdminContext,
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>, (StatusCode, Json<ErrorResponse>)> {
    match admin::update_category(&*state.store, &state.images, &id, request).await {
        Ok(category) => Ok(Json(category)),
        Err(error) => Err(admin_error_response(error)),
    }
}

pub async fn delete_admin_category<S: Store>(
    _ctx: AdminContext,
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    // No client-held copy on this side, so the image URL is re-fetched.
    match admin::delete_category(&*state.store, &state.images, &id, None).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(admin_error_response(error)),
    }
}

pub async fn list_admin_products<S: Store>(
    _ctx: AdminContext,
    State(state): State<AppState<S>>,
) -> Json<ListResponse<ProductWithCategory>> {
    match state.store.list_products().await {
        Ok(items) => Json(ListResponse::new(items)),
        Err(error) => {
            log::error!("Error fetching products: {error:#}");
            Json(ListResponse::empty())
        }
    }
}

pub async fn create_admin_product<S: Store>(
    _ctx: AdminContext,
    State(state): State<AppState<S>>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), (StatusCode, Json<ErrorResponse>)> {
    match admin::create_product(&*state.store, &state.images, request).await {
        Ok(product) => Ok((StatusCode::CREATED, Json(product))),
        Err(error) => Err(admin_error_response(error)),
    }
}

pub async fn update_admin_product<S: Store>(
    _ctx: AdminContext,
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, (StatusCode, Json<ErrorResponse>)> {
    match admin::update_product(&*state.store, &state.images, &id, request).await {
        Ok(product) => Ok(Json(product)),
        Err(error) => Err(admin_error_response(error)),
    }
}

pub async fn delete_admin_product<S: Store>(
    _ctx: AdminContext,
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match admin::delete_product(&*state.store, &state.images, &id, Vec::new()).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(admin_error_response(error)),
    }
}

fn admin_error_response(error: AdminError) -> (StatusCode, Json<ErrorResponse>) {
    match &error {
        AdminError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(&error.to_string())),
        ),
        AdminError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(&error.to_string())),
        ),
        AdminError::Upload(source) => {
            log::error!("Image upload error: {source:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(&error.to_string())),
            )
        }
        AdminError::Persistence(source) => {
            log::error!("Persistence error: {source:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_detail(
                    "Database Error",
                    format!("{source:#}"),
                )),
            )
        }
    }
}
