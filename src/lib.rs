pub mod api;
pub mod config;
pub mod logic;
pub mod mail;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export logic types
pub use logic::{AdminError, ImageKind, ImageLifecycle, ValidationError};

// Export all model types
pub use model::*;

// Export store types
pub use store::{HttpAuthGateway, HttpObjectStore, PostgresStore, SessionCache, Store};

/// Build the shared application state from configuration and a connected
/// store.
pub fn build_state(
    config: &config::AppConfig,
    store: std::sync::Arc<PostgresStore>,
) -> api::handlers::AppState<PostgresStore> {
    use std::sync::Arc;

    let objects = Arc::new(HttpObjectStore::new(
        &config.storage.endpoint,
        &config.storage.bucket,
        &config.storage_service_key(),
    ));

    api::handlers::AppState {
        store,
        images: Arc::new(ImageLifecycle::new(
            objects,
            &config.storage.public_host,
            &config.storage.bucket,
        )),
        auth: Arc::new(HttpAuthGateway::new(
            &config.auth.endpoint,
            &config.auth_api_key(),
        )),
        sessions: Arc::new(SessionCache::new()),
        mailer: Arc::new(mail::Mailer::new(&config.email, config.email_api_key())),
    }
}

// Function for integration testing
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level only (suppress DEBUG logs)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    // Load configuration
    let config = crate::config::AppConfig::load()?;

    // Connect to PostgreSQL
    let database_url = config.database_url()?;
    let postgres_store = PostgresStore::new(
        &database_url,
        config.database.max_connections.unwrap_or(20),
    )
    .await?;

    // Run migrations
    postgres_store.migrate().await?;

    let state = build_state(&config, Arc::new(postgres_store));
    let app = crate::api::routes::create_router().with_state(state);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;

    serve(listener, app).await?;

    Ok(())
}
