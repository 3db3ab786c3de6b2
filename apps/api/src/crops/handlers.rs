use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::crops::models::{CropQuery, CropRecord};
use crate::errors::AppError;
use crate::schema::{validate_contract, ValidationError};
use crate::state::AppState;

// Query strings are read as plain strings so a non-numeric `ph` is reported
// in the same error shape as every other validation failure.
fn parse_query(params: &HashMap<String, String>) -> Result<CropQuery, ValidationError> {
    let ph = match params.get("ph").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            raw.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| ValidationError::new("ph", "ph must be a number"))?,
        ),
        None => None,
    };
    let query = CropQuery { ph };
    validate_contract(&query)?;
    Ok(query)
}

/// GET /api/crops
pub async fn handle_list_crops(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<CropRecord>>, AppError> {
    let query = parse_query(&params)?;
    let crops = match query.ph {
        Some(ph) => state.crops.by_ph(ph).await?,
        None => state.crops.all().await?,
    };
    debug!(count = crops.len(), ph = ?query.ph, "listed crops");
    Ok(Json(crops))
}

/// GET /api/crops/:id
pub async fn handle_get_crop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CropRecord>, AppError> {
    state
        .crops
        .by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Crop '{id}' not found")))
}
