//! HTTP REST API routes

mod generation_routes;

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/characters", post(generation_routes::create_character))
        .route("/api/equipments", post(generation_routes::create_equipment))
}
