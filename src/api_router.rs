//! API Router
//!
//! Combines the REST endpoints from all modules into a unified router.

use axum::{routing::get, Json, Router};
use std::sync::Arc;

use crate::shared::state::AppState;

async fn service_banner() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "IT Support Agent API is running" }))
}

/// Configure all API routes from all modules
pub fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(service_banner))
        .merge(crate::tickets::configure_tickets_routes())
        .merge(crate::chat::configure_chat_routes())
        .merge(crate::policies::configure_policies_routes())
        .merge(crate::analytics::configure_analytics_routes())
}
