pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(pages::handle_index))
        .route(
            "/recommendation",
            get(pages::handle_form).post(pages::handle_form_submit),
        )
        .route("/result", get(pages::handle_result))
        .route("/privacy", get(pages::handle_privacy))
        .route("/terms", get(pages::handle_terms))
        .route("/about", get(pages::handle_about))
        // JSON API
        .route("/api/v1/catalog", get(handlers::handle_catalog))
        .route("/api/v1/submissions", post(handlers::handle_submit))
        .route(
            "/api/v1/submissions/latest",
            get(handlers::handle_latest),
        )
        .route(
            "/api/v1/submissions/latest/report.pdf",
            get(handlers::handle_latest_document),
        )
        .route(
            "/api/v1/submissions/:id",
            get(handlers::handle_get_submission),
        )
        .with_state(state)
}
