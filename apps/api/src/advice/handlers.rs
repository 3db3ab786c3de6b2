use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::advice::models::{
    CropAdvice, FertilizerAdvice, FertilizerInput, IrrigationAdvice, IrrigationInput,
    LocationInput, MainCrop, PestManagementAdvice, PestManagementInput, RegionInput,
    SuggestCropsInput,
};
use crate::errors::AppError;
use crate::schema::parse_contract;
use crate::state::AppState;

// Bodies are taken as raw JSON and checked by the schema layer. Malformed
// JSON is turned into the same 400 error shape via `From<JsonRejection>`.

/// POST /api/advice/crops
pub async fn handle_suggest_crops(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CropAdvice>, AppError> {
    let Json(body) = payload?;
    let input: SuggestCropsInput = parse_contract(body)?;
    Ok(Json(state.advisor.suggest_crops(&input).await?))
}

/// POST /api/advice/crops/location
pub async fn handle_suggest_crops_by_location(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CropAdvice>, AppError> {
    let Json(body) = payload?;
    let input: LocationInput = parse_contract(body)?;
    Ok(Json(state.advisor.suggest_crops_based_on_location(&input).await?))
}

/// POST /api/advice/fertilizers
pub async fn handle_suggest_fertilizers(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FertilizerAdvice>, AppError> {
    let Json(body) = payload?;
    let input: FertilizerInput = parse_contract(body)?;
    Ok(Json(state.advisor.suggest_fertilizers(&input).await?))
}

/// POST /api/advice/irrigation
pub async fn handle_irrigation_advice(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<IrrigationAdvice>, AppError> {
    let Json(body) = payload?;
    let input: IrrigationInput = parse_contract(body)?;
    Ok(Json(state.advisor.advise_on_irrigation_practices(&input).await?))
}

/// POST /api/advice/pests
pub async fn handle_pest_management(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PestManagementAdvice>, AppError> {
    let Json(body) = payload?;
    let input: PestManagementInput = parse_contract(body)?;
    Ok(Json(state.advisor.suggest_pest_management_strategies(&input).await?))
}

/// POST /api/advice/main-crop
pub async fn handle_main_crop(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MainCrop>, AppError> {
    let Json(body) = payload?;
    let input: RegionInput = parse_contract(body)?;
    Ok(Json(state.advisor.get_main_crop_for_region(&input).await?))
}
