// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{progress, search, secrets, topics};
use crate::state::AppState;

/// Assembles the main application router.
///
/// * Merges all sub-routers (topics, secrets, search, progress).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (storage + config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
        "http://localhost:5173".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let topic_routes = Router::new()
        .route("/", get(topics::list_topics))
        .route("/{label}", get(topics::get_topic));

    let secret_routes = Router::new().route("/", get(secrets::list_secrets));

    let search_routes = Router::new()
        .route("/questions", get(search::search_questions))
        .route("/secrets", get(search::search_secrets));

    let progress_routes = Router::new()
        .route("/", post(progress::update_progress).delete(progress::reset_progress))
        .route("/{topic_label}", get(progress::get_progress));

    Router::new()
        .nest("/api/topics", topic_routes)
        .nest("/api/secrets", secret_routes)
        .nest("/api/search", search_routes)
        .nest("/api/progress", progress_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
