// Image-only plant health diagnosis.

pub mod handlers;
pub mod models;
pub mod prompts;

use crate::flow::{Advisor, Flow, FlowError};
use crate::llm_client::Prompt;
use models::{DiagnosisInput, PlantDiagnosis};

pub struct DiagnosePlantHealth;

impl Flow for DiagnosePlantHealth {
    const NAME: &'static str = "diagnose_plant_health";
    type Input = DiagnosisInput;
    type Output = PlantDiagnosis;

    fn render(input: &DiagnosisInput) -> Prompt {
        prompts::render_diagnosis(input)
    }
}

impl Advisor {
    pub async fn diagnose_plant_health(
        &self,
        input: &DiagnosisInput,
    ) -> Result<PlantDiagnosis, FlowError> {
        self.run::<DiagnosePlantHealth>(input).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::llm_client::fake::FakeModel;

    fn leaf() -> DiagnosisInput {
        DiagnosisInput {
            photo_data_uri: "data:image/jpeg;base64,aGVsbG8=".to_string(),
        }
    }

    #[tokio::test]
    async fn test_diagnosis_round_trip_through_model() {
        let reply = json!({
            "isPlant": true,
            "plantName": "Tomato",
            "isHealthy": false,
            "disease": "Early blight",
            "remedy": {"title": "Control early blight", "steps": ["Remove infected leaves"]},
            "careTips": {"title": "Keep tomatoes healthy", "steps": ["Water at the base"]}
        });
        let model = Arc::new(FakeModel::replying(reply.clone()));
        let advisor = Advisor::new(model.clone());

        let diagnosis = advisor.diagnose_plant_health(&leaf()).await.unwrap();

        assert_eq!(serde_json::to_value(&diagnosis).unwrap(), reply);
        let prompt = model.last_prompt().unwrap();
        assert_eq!(prompt.images.len(), 1);
        assert_eq!(model.last_constraint().unwrap().name, "diagnose_plant_health");
    }

    #[tokio::test]
    async fn test_plant_without_name_is_output_error() {
        let model = Arc::new(FakeModel::replying(json!({
            "isPlant": true,
            "plantName": "",
            "isHealthy": true,
            "disease": "Healthy",
            "remedy": {"title": "None needed", "steps": []},
            "careTips": {"title": "Care", "steps": []}
        })));
        let advisor = Advisor::new(model);

        let err = advisor.diagnose_plant_health(&leaf()).await.unwrap_err();
        match err {
            FlowError::OutputValidation(e) => assert_eq!(e.field, "plantName"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_care_tips_is_output_error() {
        let model = Arc::new(FakeModel::replying(json!({
            "isPlant": true,
            "plantName": "Tomato",
            "isHealthy": false,
            "disease": "Early blight",
            "remedy": {"title": "Control early blight", "steps": ["Remove infected leaves"]}
        })));
        let advisor = Advisor::new(model.clone());

        let err = advisor.diagnose_plant_health(&leaf()).await.unwrap_err();

        match err {
            FlowError::OutputValidation(e) => assert_eq!(e.field, "careTips"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_reply_is_output_error() {
        let advisor = Advisor::new(Arc::new(FakeModel::replying(json!({}))));

        let err = advisor.diagnose_plant_health(&leaf()).await.unwrap_err();

        match err {
            FlowError::OutputValidation(e) => assert_eq!(e.field, "isPlant"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unsupported_image_never_reaches_model() {
        let model = Arc::new(FakeModel::replying(json!({})));
        let advisor = Advisor::new(model.clone());
        let input = DiagnosisInput {
            photo_data_uri: "data:image/tiff;base64,aGVsbG8=".to_string(),
        };

        let err = advisor.diagnose_plant_health(&input).await.unwrap_err();
        assert!(matches!(err, FlowError::InputValidation(_)));
        assert_eq!(model.call_count(), 0);
    }
}
