use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::diagnosis::models::{DiagnosisInput, PlantDiagnosis};
use crate::errors::AppError;
use crate::schema::parse_contract;
use crate::state::AppState;

/// POST /api/diagnose
pub async fn handle_diagnose(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PlantDiagnosis>, AppError> {
    let Json(body) = payload?;
    let input: DiagnosisInput = parse_contract(body)?;
    Ok(Json(state.advisor.diagnose_plant_health(&input).await?))
}
