use serde::{Deserialize, Serialize};

use crate::schema::{
    at_least, blank_as_none, data_uri, non_empty, number, one_of, optional, range, Contract,
    ObjectSchema,
};

/// Soil pH is only meaningful on the 0–14 scale.
pub const PH_MIN: f64 = 0.0;
pub const PH_MAX: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Winter,
    Rainy,
}

impl Season {
    pub const NAMES: &'static [&'static str] = &["Summer", "Winter", "Rainy"];

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Winter => "Winter",
            Season::Rainy => "Rainy",
        }
    }

    /// The Indian cropping season the user-facing name corresponds to.
    pub fn cropping_season(self) -> &'static str {
        match self {
            Season::Rainy => "Kharif",
            Season::Winter => "Rabi",
            Season::Summer => "Zaid",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// suggestCrops
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestCropsInput {
    pub soil_type: String,
    pub soil_ph: f64,
    /// Average temperature in °C.
    pub temperature: f64,
    /// Average rainfall in mm.
    pub rainfall: f64,
    pub season: Season,
    pub region: String,
    /// Language code for the answer, e.g. "en", "hi", "mr".
    pub language: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub photo_data_uri: Option<String>,
}

impl Contract for SuggestCropsInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(non_empty("soilType", "The type of soil."))
            .field(range("soilPh", "The pH of the soil.", PH_MIN, PH_MAX))
            .field(number("temperature", "Average temperature in °C."))
            .field(at_least("rainfall", "Average rainfall in mm.", 0.0))
            .field(one_of("season", "The current growing season.", Season::NAMES))
            .field(non_empty("region", "The region where the crops will be grown."))
            .field(non_empty(
                "language",
                "The language for the response (e.g. \"en\", \"hi\", \"mr\").",
            ))
            .field(optional(non_empty(
                "crop",
                "An optional specific crop to get advice for.",
            )))
            .field(optional(data_uri(
                "photoDataUri",
                "An optional photo of the farmland as a base64 data URI.",
            )))
    }
}

/// Four-part advice returned by both crop suggestion flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAdvice {
    pub recommended_crops: String,
    pub fertilizers: String,
    pub irrigation: String,
    pub pest_management: String,
}

impl Contract for CropAdvice {
    fn schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(non_empty(
                "recommendedCrops",
                "A list of recommended crops for the given conditions.",
            ))
            .field(non_empty("fertilizers", "Fertilizer suggestions for the crops."))
            .field(non_empty("irrigation", "Irrigation advice for the crops."))
            .field(non_empty("pestManagement", "Pest management tips for the crops."))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// suggestCropsBasedOnLocation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInput {
    pub location: String,
}

impl Contract for LocationInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new().field(non_empty(
            "location",
            "The location for which to suggest crops.",
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// suggestFertilizers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerInput {
    pub crop: String,
    pub soil_type: String,
    pub soil_ph: f64,
}

impl Contract for FertilizerInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(non_empty("crop", "The recommended crop."))
            .field(non_empty("soilType", "The type of soil."))
            .field(range("soilPh", "The pH of the soil.", PH_MIN, PH_MAX))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerAdvice {
    pub fertilizer_suggestions: String,
}

impl Contract for FertilizerAdvice {
    fn schema() -> ObjectSchema {
        ObjectSchema::new().field(non_empty(
            "fertilizerSuggestions",
            "Suggestions for fertilizers to use for the crop and soil conditions.",
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// adviseOnIrrigationPractices
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationInput {
    pub crop: String,
    pub location: String,
}

impl Contract for IrrigationInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(non_empty("crop", "The crop for which to provide irrigation advice."))
            .field(non_empty("location", "The location where the crop is being grown."))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationAdvice {
    pub irrigation_advice: String,
}

impl Contract for IrrigationAdvice {
    fn schema() -> ObjectSchema {
        ObjectSchema::new().field(non_empty("irrigationAdvice", "Advice on irrigation practices."))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// suggestPestManagementStrategies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestManagementInput {
    pub crop: String,
    pub region: String,
}

impl Contract for PestManagementInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(non_empty("crop", "The name of the crop."))
            .field(non_empty("region", "The region where the crop is grown."))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PestManagementAdvice {
    pub pest_management_strategies: String,
}

impl Contract for PestManagementAdvice {
    fn schema() -> ObjectSchema {
        ObjectSchema::new().field(non_empty(
            "pestManagementStrategies",
            "Basic pest management strategies for the crop.",
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// getMainCropForRegion
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionInput {
    pub region: String,
}

impl Contract for RegionInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new().field(non_empty("region", "The region in India."))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainCrop {
    pub crop_name: String,
}

impl Contract for MainCrop {
    fn schema() -> ObjectSchema {
        ObjectSchema::new().field(non_empty("cropName", "The main crop grown in the region."))
    }
}
