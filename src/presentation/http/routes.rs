//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{create_trace_layer, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/users", user_routes())
        .nest("/chats", chat_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .layer(create_trace_layer())
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/me",
            get(handlers::user::get_current_user).put(handlers::user::update_current_user),
        )
        .route("/{user_id}", get(handlers::user::get_user))
        .route("/{user_id}/chats", get(handlers::user::get_user_chats))
}

/// Chat and message routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::chat::list_chats).post(handlers::chat::create_chat),
        )
        .route(
            "/{chat_id}",
            get(handlers::chat::get_chat)
                .put(handlers::chat::update_chat)
                .delete(handlers::chat::delete_chat),
        )
        .route(
            "/{chat_id}/users",
            get(handlers::chat::get_chat_users).post(handlers::chat::add_chat_user),
        )
        .route(
            "/{chat_id}/users/{user_id}",
            delete(handlers::chat::remove_chat_user),
        )
        .route(
            "/{chat_id}/messages",
            get(handlers::message::get_messages).post(handlers::message::send_message),
        )
        .route(
            "/{chat_id}/messages/{message_id}",
            put(handlers::message::update_message).delete(handlers::message::delete_message),
        )
}
