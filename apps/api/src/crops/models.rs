use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::advice::models::{PH_MAX, PH_MIN};
use crate::schema::{optional, range, Contract, ObjectSchema, ValidationError};

/// Agronomic reference entry for one crop. Read-only once seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CropRecord {
    pub id: String,
    pub category: String,
    pub scientific_name: String,
    pub soil_type: String,
    pub ph_min: f64,
    pub ph_max: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub rainfall_min: f64,
    pub rainfall_max: f64,
    pub season: String,
    pub fertilizers: String,
    pub irrigation: String,
    pub pests: Vec<String>,
}

impl CropRecord {
    /// Inclusive on both ends.
    pub fn contains_ph(&self, ph: f64) -> bool {
        self.ph_min <= ph && ph <= self.ph_max
    }

    pub fn check(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() || self.id != normalize_id(&self.id) {
            return Err(ValidationError::new(
                "id",
                format!("crop id '{}' must be trimmed lowercase", self.id),
            ));
        }
        for (field, min, max) in [
            ("ph", self.ph_min, self.ph_max),
            ("temp", self.temp_min, self.temp_max),
            ("rainfall", self.rainfall_min, self.rainfall_max),
        ] {
            if min > max {
                return Err(ValidationError::new(
                    format!("{field}_min"),
                    format!("{}: {field}_min {min} exceeds {field}_max {max}", self.id),
                ));
            }
        }
        Ok(())
    }
}

/// Crop ids are stored lowercase; lookups accept any casing.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// `GET /api/crops` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
}

impl Contract for CropQuery {
    fn schema() -> ObjectSchema {
        ObjectSchema::new().field(optional(range(
            "ph",
            "Soil pH the crop must tolerate.",
            PH_MIN,
            PH_MAX,
        )))
    }
}
