use serde::{Deserialize, Serialize};

use crate::schema::{
    boolean, data_uri, object, string_list, text, Contract, ObjectSchema, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisInput {
    pub photo_data_uri: String,
}

impl Contract for DiagnosisInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new().field(data_uri(
            "photoDataUri",
            "A photo of a plant, as a data URI that must include a MIME type and use Base64 \
             encoding. Expected format: 'data:<mimetype>;base64,<encoded_data>'.",
        ))
    }
}

/// A titled, ordered list of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub title: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantDiagnosis {
    pub is_plant: bool,
    pub plant_name: String,
    pub is_healthy: bool,
    pub disease: String,
    pub remedy: ActionPlan,
    pub care_tips: ActionPlan,
}

fn action_plan(title: &'static str, steps: &'static str) -> ObjectSchema {
    ObjectSchema::new()
        .field(text("title", title))
        .field(string_list("steps", steps))
}

impl Contract for PlantDiagnosis {
    fn schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(boolean("isPlant", "Whether the image contains a plant."))
            .field(text("plantName", "The common name of the identified plant."))
            .field(boolean("isHealthy", "Whether the plant appears to be healthy."))
            .field(text(
                "disease",
                "The identified disease or pest, or a statement that the plant is healthy.",
            ))
            .field(object(
                "remedy",
                "A step-by-step treatment plan for the identified issue.",
                action_plan(
                    "A short, actionable title for the remedy.",
                    "A list of steps to take to address the issue.",
                ),
            ))
            .field(object(
                "careTips",
                "General care tips for this type of plant.",
                action_plan(
                    "A short, actionable title for general care tips.",
                    "A list of general care tips for this type of plant to prevent future issues.",
                ),
            ))
    }

    fn check(&self) -> Result<(), ValidationError> {
        if self.is_plant && self.plant_name.trim().is_empty() {
            return Err(ValidationError::new(
                "plantName",
                "plantName must not be empty when isPlant is true",
            ));
        }
        Ok(())
    }
}
