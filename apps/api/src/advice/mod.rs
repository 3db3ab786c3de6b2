// Text advisory flows: crop, fertilizer, irrigation and pest advice.
// All model calls go through `flow::Advisor`; nothing here touches HTTP clients.

pub mod handlers;
pub mod models;
pub mod prompts;

use crate::flow::{Advisor, Flow, FlowError};
use crate::llm_client::Prompt;
use models::{
    CropAdvice, FertilizerAdvice, FertilizerInput, IrrigationAdvice, IrrigationInput,
    LocationInput, MainCrop, PestManagementAdvice, PestManagementInput, RegionInput,
    SuggestCropsInput,
};

/// Multi-factor crop recommendation, optionally photo-assisted and crop-focused.
pub struct SuggestCrops;

impl Flow for SuggestCrops {
    const NAME: &'static str = "suggest_crops";
    type Input = SuggestCropsInput;
    type Output = CropAdvice;

    fn render(input: &SuggestCropsInput) -> Prompt {
        prompts::render_suggest_crops(input)
    }
}

pub struct SuggestCropsBasedOnLocation;

impl Flow for SuggestCropsBasedOnLocation {
    const NAME: &'static str = "suggest_crops_based_on_location";
    type Input = LocationInput;
    type Output = CropAdvice;

    fn render(input: &LocationInput) -> Prompt {
        prompts::render_location(input)
    }
}

pub struct SuggestFertilizers;

impl Flow for SuggestFertilizers {
    const NAME: &'static str = "suggest_fertilizers";
    type Input = FertilizerInput;
    type Output = FertilizerAdvice;

    fn render(input: &FertilizerInput) -> Prompt {
        prompts::render_fertilizers(input)
    }
}

pub struct AdviseOnIrrigationPractices;

impl Flow for AdviseOnIrrigationPractices {
    const NAME: &'static str = "advise_on_irrigation_practices";
    type Input = IrrigationInput;
    type Output = IrrigationAdvice;

    fn render(input: &IrrigationInput) -> Prompt {
        prompts::render_irrigation(input)
    }
}

pub struct SuggestPestManagementStrategies;

impl Flow for SuggestPestManagementStrategies {
    const NAME: &'static str = "suggest_pest_management_strategies";
    type Input = PestManagementInput;
    type Output = PestManagementAdvice;

    fn render(input: &PestManagementInput) -> Prompt {
        prompts::render_pest_management(input)
    }
}

pub struct GetMainCropForRegion;

impl Flow for GetMainCropForRegion {
    const NAME: &'static str = "get_main_crop_for_region";
    type Input = RegionInput;
    type Output = MainCrop;

    fn render(input: &RegionInput) -> Prompt {
        prompts::render_main_crop(input)
    }
}

impl Advisor {
    pub async fn suggest_crops(&self, input: &SuggestCropsInput) -> Result<CropAdvice, FlowError> {
        self.run::<SuggestCrops>(input).await
    }

    pub async fn suggest_crops_based_on_location(
        &self,
        input: &LocationInput,
    ) -> Result<CropAdvice, FlowError> {
        self.run::<SuggestCropsBasedOnLocation>(input).await
    }

    pub async fn suggest_fertilizers(
        &self,
        input: &FertilizerInput,
    ) -> Result<FertilizerAdvice, FlowError> {
        self.run::<SuggestFertilizers>(input).await
    }

    pub async fn advise_on_irrigation_practices(
        &self,
        input: &IrrigationInput,
    ) -> Result<IrrigationAdvice, FlowError> {
        self.run::<AdviseOnIrrigationPractices>(input).await
    }

    pub async fn suggest_pest_management_strategies(
        &self,
        input: &PestManagementInput,
    ) -> Result<PestManagementAdvice, FlowError> {
        self.run::<SuggestPestManagementStrategies>(input).await
    }

    pub async fn get_main_crop_for_region(
        &self,
        input: &RegionInput,
    ) -> Result<MainCrop, FlowError> {
        self.run::<GetMainCropForRegion>(input).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::llm_client::fake::FakeModel;
    use crate::schema::parse_contract;
    use models::Season;

    fn advisor_replying(value: serde_json::Value) -> (Advisor, Arc<FakeModel>) {
        let model = Arc::new(FakeModel::replying(value));
        (Advisor::new(model.clone()), model)
    }

    fn punjab() -> SuggestCropsInput {
        parse_contract(json!({
            "soilType": "Alluvial",
            "soilPh": 6.5,
            "temperature": 28,
            "rainfall": 700,
            "season": "Rainy",
            "region": "Punjab",
            "language": "en"
        }))
        .unwrap()
    }

    fn punjab_advice() -> serde_json::Value {
        json!({
            "recommendedCrops": "Rice, Maize",
            "fertilizers": "NPK 10:26:26",
            "irrigation": "Flood irrigation",
            "pestManagement": "Monitor for stem borer"
        })
    }

    #[tokio::test]
    async fn test_suggest_crops_returns_model_answer_verbatim() {
        let (advisor, model) = advisor_replying(punjab_advice());

        let advice = advisor.suggest_crops(&punjab()).await.unwrap();

        assert_eq!(
            advice,
            CropAdvice {
                recommended_crops: "Rice, Maize".to_string(),
                fertilizers: "NPK 10:26:26".to_string(),
                irrigation: "Flood irrigation".to_string(),
                pest_management: "Monitor for stem borer".to_string(),
            }
        );
        assert_eq!(serde_json::to_value(&advice).unwrap(), punjab_advice());
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_suggest_crops_sends_output_schema() {
        let (advisor, model) = advisor_replying(punjab_advice());
        advisor.suggest_crops(&punjab()).await.unwrap();

        let constraint = model.last_constraint().unwrap();
        assert_eq!(constraint.name, "suggest_crops");
        assert_eq!(
            constraint.schema["required"],
            json!(["recommendedCrops", "fertilizers", "irrigation", "pestManagement"])
        );
    }

    #[tokio::test]
    async fn test_suggest_crops_rejects_out_of_range_ph_without_calling_model() {
        let (advisor, model) = advisor_replying(punjab_advice());
        let input = SuggestCropsInput {
            soil_ph: 15.0,
            ..punjab()
        };

        let err = advisor.suggest_crops(&input).await.unwrap_err();

        match err {
            FlowError::InputValidation(e) => assert_eq!(e.message, "soilPh must be ≤ 14"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_suggest_crops_missing_output_field_fails() {
        let mut partial = punjab_advice();
        partial.as_object_mut().unwrap().remove("irrigation");
        let (advisor, _) = advisor_replying(partial);

        let err = advisor.suggest_crops(&punjab()).await.unwrap_err();

        match err {
            FlowError::OutputValidation(e) => assert_eq!(e.field, "irrigation"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_suggest_crops_focus_reaches_model() {
        let (advisor, model) = advisor_replying(punjab_advice());
        let input = SuggestCropsInput {
            crop: Some("Basmati Rice".to_string()),
            season: Season::Rainy,
            ..punjab()
        };

        advisor.suggest_crops(&input).await.unwrap();

        assert!(model.last_prompt().unwrap().text.contains("Basmati Rice"));
    }

    #[tokio::test]
    async fn test_location_flow_pass_through_and_missing_field() {
        let (advisor, _) = advisor_replying(punjab_advice());
        let input = LocationInput {
            location: "Ludhiana".to_string(),
        };
        let advice = advisor.suggest_crops_based_on_location(&input).await.unwrap();
        assert_eq!(advice.recommended_crops, "Rice, Maize");

        let (advisor, _) = advisor_replying(json!({"recommendedCrops": "Rice"}));
        let err = advisor
            .suggest_crops_based_on_location(&input)
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::OutputValidation(_)));
    }

    #[tokio::test]
    async fn test_fertilizer_flow() {
        let reply = json!({"fertilizerSuggestions": "Urea top-dressing at 30 and 60 DAS"});
        let (advisor, _) = advisor_replying(reply.clone());
        let input = FertilizerInput {
            crop: "Wheat".to_string(),
            soil_type: "Loamy".to_string(),
            soil_ph: 7.0,
        };

        let advice = advisor.suggest_fertilizers(&input).await.unwrap();
        assert_eq!(serde_json::to_value(&advice).unwrap(), reply);

        let (advisor, _) = advisor_replying(json!({}));
        assert!(matches!(
            advisor.suggest_fertilizers(&input).await.unwrap_err(),
            FlowError::OutputValidation(_)
        ));
    }

    #[tokio::test]
    async fn test_irrigation_flow() {
        let reply = json!({"irrigationAdvice": "Use drip irrigation at flowering."});
        let (advisor, _) = advisor_replying(reply.clone());
        let input = IrrigationInput {
            crop: "Cotton".to_string(),
            location: "Vidarbha".to_string(),
        };

        let advice = advisor.advise_on_irrigation_practices(&input).await.unwrap();
        assert_eq!(serde_json::to_value(&advice).unwrap(), reply);

        let (advisor, _) = advisor_replying(json!({"irrigation": "wrong key"}));
        assert!(matches!(
            advisor.advise_on_irrigation_practices(&input).await.unwrap_err(),
            FlowError::OutputValidation(_)
        ));
    }

    #[tokio::test]
    async fn test_pest_management_flow() {
        let reply = json!({"pestManagementStrategies": "Use pheromone traps for pod borer."});
        let (advisor, _) = advisor_replying(reply.clone());
        let input = PestManagementInput {
            crop: "Chickpea".to_string(),
            region: "Madhya Pradesh".to_string(),
        };

        let advice = advisor
            .suggest_pest_management_strategies(&input)
            .await
            .unwrap();
        assert_eq!(serde_json::to_value(&advice).unwrap(), reply);

        let (advisor, _) = advisor_replying(json!({"pestManagementStrategies": 7}));
        assert!(matches!(
            advisor
                .suggest_pest_management_strategies(&input)
                .await
                .unwrap_err(),
            FlowError::OutputValidation(_)
        ));
    }

    #[tokio::test]
    async fn test_main_crop_flow() {
        let (advisor, model) = advisor_replying(json!({"cropName": "Wheat"}));
        let input = RegionInput {
            region: "Punjab".to_string(),
        };

        let main = advisor.get_main_crop_for_region(&input).await.unwrap();
        assert_eq!(main.crop_name, "Wheat");
        assert!(model.last_prompt().unwrap().text.contains("Region: Punjab"));

        let (advisor, _) = advisor_replying(json!({"cropName": ""}));
        assert!(matches!(
            advisor.get_main_crop_for_region(&input).await.unwrap_err(),
            FlowError::OutputValidation(_)
        ));
    }

    #[tokio::test]
    async fn test_pest_management_missing_field_fails() {
        let (advisor, _) = advisor_replying(json!({}));
        let input = PestManagementInput {
            crop: "Chickpea".to_string(),
            region: "Madhya Pradesh".to_string(),
        };

        let err = advisor
            .suggest_pest_management_strategies(&input)
            .await
            .unwrap_err();

        match err {
            FlowError::OutputValidation(e) => assert_eq!(e.field, "pestManagementStrategies"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_main_crop_missing_field_fails() {
        let (advisor, _) = advisor_replying(json!({"crop": "Wheat"}));
        let input = RegionInput {
            region: "Punjab".to_string(),
        };

        let err = advisor.get_main_crop_for_region(&input).await.unwrap_err();

        match err {
            FlowError::OutputValidation(e) => assert_eq!(e.field, "cropName"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let advisor = Advisor::new(Arc::new(FakeModel::failing(500, "internal")));
        let input = RegionInput {
            region: "Punjab".to_string(),
        };
        assert!(matches!(
            advisor.get_main_crop_for_region(&input).await.unwrap_err(),
            FlowError::ExternalCall(_)
        ));
    }
}
