pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::SecurityConfig;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(account_routes())
        .merge(catalog_routes())
        .merge(protected_routes(state.clone()))
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/register", post(handlers::auth::register))
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::catalog::products_list))
        .route("/products/:id", get(handlers::catalog::products_by_category))
        .route("/product/:id", get(handlers::catalog::product_get))
        .route("/categories", get(handlers::catalog::categories_list))
        .route("/categories/:id", get(handlers::catalog::category_name))
}

// Bearer verification applies only to this group.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/me", get(handlers::auth::whoami))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::bearer_auth,
        ))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}
