// All LLM prompt constants for the advice module, plus their renderers.
// Templates use `{placeholder}` slots filled by `fill_template`.

use crate::advice::models::{
    FertilizerInput, IrrigationInput, LocationInput, PestManagementInput, RegionInput,
    SuggestCropsInput,
};
use crate::llm_client::media::parse_data_uri;
use crate::llm_client::prompts::{fill_template, language_instruction, FARMER_FRIENDLY_INSTRUCTION};
use crate::llm_client::Prompt;

pub const ADVISOR_SYSTEM: &str = "You are an AI-powered agriculture advisor helping farmers in India \
    choose the best crops and look after them.";

pub const EXPERT_SYSTEM: &str = "You are an expert agriculture advisor.";

pub const REGIONAL_EXPERT_SYSTEM: &str = "You are an agricultural expert for India.";

/// Crop suggestion template.
/// Replace: {soil_type}, {soil_ph}, {temperature}, {rainfall}, {season},
///          {cropping_season}, {region}, {crop_section}, {photo_section},
///          {farmer_instruction}, {language_instruction}
pub const SUGGEST_CROPS_TEMPLATE: &str = r#"The user will provide seasons as 'Summer', 'Winter', or 'Rainy'. Map these to the Indian agricultural seasons:
- 'Rainy' corresponds to the Kharif season (monsoon crops).
- 'Winter' corresponds to the Rabi season (winter crops).
- 'Summer' corresponds to the Zaid season (summer crops).

Based on the following conditions, recommend the most suitable crops to grow.
- Soil Type: {soil_type}
- Soil pH: {soil_ph}
- Average Temperature: {temperature}°C
- Rainfall: {rainfall} mm
- Season: {season} ({cropping_season})
- Region: {region}
{crop_section}{photo_section}
Provide four distinct outputs:
1. recommendedCrops: Suggest a list of the most suitable crops. If a specific crop was provided, confirm its suitability.
2. fertilizers: Suggest suitable fertilizers for the recommended crops.
3. irrigation: Provide irrigation practices for the recommended crops.
4. pestManagement: Offer pest management tips for the recommended crops.

{farmer_instruction}

{language_instruction}"#;

/// Replace: {crop}
pub const CROP_FOCUS_SECTION: &str = "- Specific Crop: {crop}
Focus your recommendations on this specific crop if it is suitable for the other conditions.
";

pub const FARMLAND_IMAGE_SECTION: &str = "- Farmland Image: attached above.
Use the image to visually assess the land and refine your recommendations.
";

/// Replace: {location}, {farmer_instruction}
pub const LOCATION_TEMPLATE: &str = r#"Recommend the most suitable crops based on the location: {location}.
Also suggest correct fertilizers, irrigation practices, and basic pest management for the chosen crops.

{farmer_instruction}"#;

/// Replace: {crop}, {soil_type}, {soil_ph}
pub const FERTILIZER_TEMPLATE: &str = r#"Based on the recommended crop, soil type and pH, suggest the best fertilizers to use.

Crop: {crop}
Soil Type: {soil_type}
Soil pH: {soil_ph}

Provide a concise list of fertilizer suggestions optimized for the specified conditions."#;

/// Replace: {crop}, {location}
pub const IRRIGATION_TEMPLATE: &str = r#"Provide irrigation advice for the specified crop and location.

Crop: {crop}
Location: {location}

Format your response in a short, simple, and practical way that is easy for farmers to understand and apply.
Focus on the key irrigation practices that will optimize water usage and promote healthy crop growth.

Example advice: Water deeply but infrequently, allowing the soil to dry slightly between waterings. Use drip irrigation to deliver water directly to the roots and minimize water loss through evaporation."#;

/// Replace: {crop}, {region}
pub const PEST_MANAGEMENT_TEMPLATE: &str = r#"Provide basic pest management strategies for the following crop in the specified region.

Crop: {crop}
Region: {region}"#;

/// Replace: {region}
pub const MAIN_CROP_TEMPLATE: &str = r#"Given a region, name the single most prominent crop grown there.

Region: {region}

Respond with only the name of the crop. For example, if the region is Punjab, the crop is "Wheat"."#;

pub fn render_suggest_crops(input: &SuggestCropsInput) -> Prompt {
    let soil_ph = input.soil_ph.to_string();
    let temperature = input.temperature.to_string();
    let rainfall = input.rainfall.to_string();
    let crop_section = input
        .crop
        .as_deref()
        .map(|crop| fill_template(CROP_FOCUS_SECTION, &[("crop", crop)]))
        .unwrap_or_default();
    // A present photo has already passed the input schema's data URI check.
    let photo = input
        .photo_data_uri
        .as_deref()
        .and_then(|uri| parse_data_uri(uri).ok());
    let photo_section = if photo.is_some() {
        FARMLAND_IMAGE_SECTION
    } else {
        ""
    };
    let language = language_instruction(&input.language);

    let text = fill_template(
        SUGGEST_CROPS_TEMPLATE,
        &[
            ("soil_type", input.soil_type.as_str()),
            ("soil_ph", soil_ph.as_str()),
            ("temperature", temperature.as_str()),
            ("rainfall", rainfall.as_str()),
            ("season", input.season.as_str()),
            ("cropping_season", input.season.cropping_season()),
            ("region", input.region.as_str()),
            ("crop_section", crop_section.as_str()),
            ("photo_section", photo_section),
            ("farmer_instruction", FARMER_FRIENDLY_INSTRUCTION),
            ("language_instruction", language.as_str()),
        ],
    );

    let prompt = Prompt::new(ADVISOR_SYSTEM, text);
    match photo {
        Some(image) => prompt.with_image(image),
        None => prompt,
    }
}

pub fn render_location(input: &LocationInput) -> Prompt {
    let text = fill_template(
        LOCATION_TEMPLATE,
        &[
            ("location", input.location.as_str()),
            ("farmer_instruction", FARMER_FRIENDLY_INSTRUCTION),
        ],
    );
    Prompt::new(ADVISOR_SYSTEM, text)
}

pub fn render_fertilizers(input: &FertilizerInput) -> Prompt {
    let soil_ph = input.soil_ph.to_string();
    let text = fill_template(
        FERTILIZER_TEMPLATE,
        &[
            ("crop", input.crop.as_str()),
            ("soil_type", input.soil_type.as_str()),
            ("soil_ph", soil_ph.as_str()),
        ],
    );
    Prompt::new(EXPERT_SYSTEM, text)
}

pub fn render_irrigation(input: &IrrigationInput) -> Prompt {
    let text = fill_template(
        IRRIGATION_TEMPLATE,
        &[("crop", input.crop.as_str()), ("location", input.location.as_str())],
    );
    Prompt::new(EXPERT_SYSTEM, text)
}

pub fn render_pest_management(input: &PestManagementInput) -> Prompt {
    let text = fill_template(
        PEST_MANAGEMENT_TEMPLATE,
        &[("crop", input.crop.as_str()), ("region", input.region.as_str())],
    );
    Prompt::new(EXPERT_SYSTEM, text)
}

pub fn render_main_crop(input: &RegionInput) -> Prompt {
    let text = fill_template(MAIN_CROP_TEMPLATE, &[("region", input.region.as_str())]);
    Prompt::new(REGIONAL_EXPERT_SYSTEM, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::models::Season;

    fn punjab() -> SuggestCropsInput {
        SuggestCropsInput {
            soil_type: "Alluvial".to_string(),
            soil_ph: 6.5,
            temperature: 28.0,
            rainfall: 700.0,
            season: Season::Rainy,
            region: "Punjab".to_string(),
            language: "en".to_string(),
            crop: None,
            photo_data_uri: None,
        }
    }

    #[test]
    fn test_suggest_crops_interpolates_conditions() {
        let prompt = render_suggest_crops(&punjab());
        assert!(prompt.text.contains("- Soil Type: Alluvial"));
        assert!(prompt.text.contains("- Soil pH: 6.5"));
        assert!(prompt.text.contains("- Average Temperature: 28°C"));
        assert!(prompt.text.contains("- Rainfall: 700 mm"));
        assert!(prompt.text.contains("- Season: Rainy (Kharif)"));
        assert!(prompt.text.contains("- Region: Punjab"));
        assert!(!prompt.text.contains('{'), "unfilled placeholder in:\n{}", prompt.text);
    }

    #[test]
    fn test_crop_focus_present_only_when_crop_given() {
        let without = render_suggest_crops(&punjab());
        assert!(!without.text.contains("Specific Crop"));
        assert!(!without.text.contains("Focus your recommendations"));

        let with = render_suggest_crops(&SuggestCropsInput {
            crop: Some("Basmati Rice".to_string()),
            ..punjab()
        });
        assert!(with.text.contains("- Specific Crop: Basmati Rice"));
        assert!(with.text.contains("Focus your recommendations on this specific crop"));
    }

    #[test]
    fn test_photo_section_and_attachment_only_when_photo_given() {
        let without = render_suggest_crops(&punjab());
        assert!(without.images.is_empty());
        assert!(!without.text.contains("Farmland Image"));

        let with = render_suggest_crops(&SuggestCropsInput {
            photo_data_uri: Some("data:image/jpeg;base64,aGVsbG8=".to_string()),
            ..punjab()
        });
        assert_eq!(with.images.len(), 1);
        assert_eq!(with.images[0].media_type, "image/jpeg");
        assert!(with.text.contains("Farmland Image"));
    }

    #[test]
    fn test_language_instruction_follows_input() {
        let prompt = render_suggest_crops(&SuggestCropsInput {
            language: "mr".to_string(),
            ..punjab()
        });
        assert!(prompt.text.contains("requested language: Marathi"));
    }

    #[test]
    fn test_user_text_with_braces_is_inserted_verbatim() {
        let prompt = render_suggest_crops(&SuggestCropsInput {
            region: "{crop_section}".to_string(),
            ..punjab()
        });
        assert!(prompt.text.contains("- Region: {crop_section}"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(render_suggest_crops(&punjab()), render_suggest_crops(&punjab()));
    }

    #[test]
    fn test_other_templates_fill_every_placeholder() {
        let prompts = [
            render_location(&LocationInput {
                location: "Nashik".to_string(),
            }),
            render_fertilizers(&FertilizerInput {
                crop: "Wheat".to_string(),
                soil_type: "Loamy".to_string(),
                soil_ph: 7.0,
            }),
            render_irrigation(&IrrigationInput {
                crop: "Cotton".to_string(),
                location: "Vidarbha".to_string(),
            }),
            render_pest_management(&PestManagementInput {
                crop: "Chickpea".to_string(),
                region: "Madhya Pradesh".to_string(),
            }),
            render_main_crop(&RegionInput {
                region: "Punjab".to_string(),
            }),
        ];
        for prompt in prompts {
            assert!(!prompt.text.contains('{'), "unfilled placeholder in:\n{}", prompt.text);
            assert!(prompt.images.is_empty());
        }
    }

    #[test]
    fn test_fertilizer_prompt_contents() {
        let prompt = render_fertilizers(&FertilizerInput {
            crop: "Wheat".to_string(),
            soil_type: "Loamy".to_string(),
            soil_ph: 7.0,
        });
        assert!(prompt.text.contains("Crop: Wheat"));
        assert!(prompt.text.contains("Soil Type: Loamy"));
        assert!(prompt.text.contains("Soil pH: 7"));
    }
}
