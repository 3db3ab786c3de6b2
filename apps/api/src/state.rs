use std::sync::Arc;

use crate::crops::store::CropStore;
use crate::flow::Advisor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Advisor,
    pub crops: Arc<dyn CropStore>,
}
