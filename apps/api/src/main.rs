use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use pvz_api::api::{build_router, AppState};
use pvz_api::auth::jwt::TokenIssuer;
use pvz_api::config::AppConfig;
use pvz_api::infrastructure::metrics::PrometheusMetrics;
use pvz_api::infrastructure::repositories::PostgresStore;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env().expect("Invalid configuration");
    tracing::debug!(?config, "configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database connected successfully");

    let store = Arc::new(PostgresStore::new(pool));
    let tokens = Arc::new(TokenIssuer::new(config.jwt_secret.clone(), config.token_ttl));
    let metrics = Arc::new(
        PrometheusMetrics::new(&prometheus::Registry::new())
            .expect("Failed to register metrics"),
    );
    let app = build_router(AppState::new(store, tokens, metrics, config.service));

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
