use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::api::handlers::AppState;
use crate::api::{admin_handlers, handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<AppState<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Public catalog
        .route(
            "/catalog/categories",
            get(handlers::list_catalog_categories::<S>),
        )
        .route(
            "/catalog/categories/:category_slug",
            get(handlers::get_catalog_category::<S>),
        )
        .route(
            "/catalog/products/:category_slug/:product_slug",
            get(handlers::get_catalog_product::<S>),
        )
        // Email relay
        .route("/api/contact", post(handlers::send_contact_inquiry::<S>))
        .route("/api/newsletter", post(handlers::subscribe_newsletter::<S>))
        // Admin session
        .route("/admin/login", post(admin_handlers::admin_login::<S>))
        .route("/admin/logout", post(admin_handlers::admin_logout::<S>))
        // Admin dashboard
        .route(
            "/admin/dashboard/stats",
            get(admin_handlers::get_dashboard_stats::<S>),
        )
        // Admin categories
        .route(
            "/admin/categories",
            get(admin_handlers::list_admin_categories::<S>),
        )
        .route(
            "/admin/categories",
            post(admin_handlers::create_admin_category::<S>),
        )
        .route(
            "/admin/categories/:id",
            put(admin_handlers::update_admin_category::<S>),
        )
        .route(
            "/admin/categories/:id",
            delete(admin_handlers::delete_admin_category::<S>),
        )
        // Admin products
        .route(
            "/admin/products",
            get(admin_handlers::list_admin_products::<S>),
        )
        .route(
            "/admin/products",
            post(admin_handlers::create_admin_product::<S>),
        )
        .route(
            "/admin/products/:id",
            put(admin_handlers::update_admin_product::<S>),
        )
        .route(
            "/admin/products/:id",
            delete(admin_handlers::delete_admin_product::<S>),
        )
}
