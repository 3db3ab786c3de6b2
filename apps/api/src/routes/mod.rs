pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advice::handlers as advice;
use crate::crops::handlers as crops;
use crate::diagnosis::handlers as diagnosis;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Crop reference data
        .route("/api/crops", get(crops::handle_list_crops))
        .route("/api/crops/:id", get(crops::handle_get_crop))
        // Advisory flows
        .route("/api/advice/crops", post(advice::handle_suggest_crops))
        .route(
            "/api/advice/crops/location",
            post(advice::handle_suggest_crops_by_location),
        )
        .route(
            "/api/advice/fertilizers",
            post(advice::handle_suggest_fertilizers),
        )
        .route(
            "/api/advice/irrigation",
            post(advice::handle_irrigation_advice),
        )
        .route("/api/advice/pests", post(advice::handle_pest_management))
        .route("/api/advice/main-crop", post(advice::handle_main_crop))
        .route("/api/diagnose", post(diagnosis::handle_diagnose))
        .with_state(state)
}
