use crate::diagnosis::models::DiagnosisInput;
use crate::llm_client::media::parse_data_uri;
use crate::llm_client::Prompt;

pub const PATHOLOGIST_SYSTEM: &str = "You are an expert plant pathologist and botanist.";

pub const DIAGNOSIS_PROMPT: &str = r#"Your task is to analyze the attached image of a plant, identify it, assess its health, and provide a detailed diagnosis and treatment plan.

1. Identification: Determine if the image contains a plant. If it does, identify the common name of the plant. If it is not a plant, set 'isPlant' to false, leave the other text fields empty and stop.
2. Health Assessment: Examine the plant for any signs of disease, pests, or nutrient deficiencies. Determine if the plant is healthy or not.
3. Diagnosis: If the plant is not healthy, identify the specific disease, pest, or issue. If the plant is healthy, state that clearly.
4. Remedy: Provide a clear, step-by-step treatment plan to resolve the identified issue. If the plant is healthy, provide a simple statement that no remedy is needed.
5. Care Tips: Provide a list of general care tips for this specific type of plant to help the user maintain its health and prevent future problems."#;

pub fn render_diagnosis(input: &DiagnosisInput) -> Prompt {
    let prompt = Prompt::new(PATHOLOGIST_SYSTEM, DIAGNOSIS_PROMPT.to_string());
    // The input schema has already accepted this data URI, so parsing succeeds here.
    match parse_data_uri(&input.photo_data_uri) {
        Ok(image) => prompt.with_image(image),
        Err(_) => prompt,
    }
}
