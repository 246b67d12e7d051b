//! Contains all the routes that this application can handle.

mod api;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};

use crate::AppState;

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .merge(api_routes(app_state))
        .route("/health-check", get(health_check))
}

/// API - Routes under the "/api" prefix
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/", get(api::root))
        .route("/api/status", post(api::status_create).get(api::status_list))
        .route("/api/contact", post(api::contact_create))
        .route("/api/contacts", get(api::contact_list))
        .route(
            "/api/newsletter",
            post(api::newsletter_create).get(api::newsletter_list),
        )
        .with_state(app_state)
}
