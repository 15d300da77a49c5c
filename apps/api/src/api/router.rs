use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{auth, metrics, products, pvz, receptions};
use super::middleware::track_metrics;
use super::state::AppState;

/// Builds the HTTP router with all routes, middleware and shared state
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check and metrics
        .route("/health", get(auth::health_check))
        .route("/metrics", get(metrics::metrics))
        // Auth routes
        .route("/dummyLogin", post(auth::dummy_login))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // PVZ routes
        .route("/pvz", post(pvz::create_pvz).get(pvz::list_pvz))
        .route(
            "/pvz/:pvz_id/close_last_reception",
            post(receptions::close_last_reception),
        )
        .route(
            "/pvz/:pvz_id/delete_last_product",
            post(products::delete_last_product),
        )
        // Reception and product routes
        .route("/receptions", post(receptions::create_reception))
        .route("/products", post(products::create_product))
        // Middleware
        .layer(middleware::from_fn_with_state(state.clone(), track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
