//! Flow runner: validate input → render prompt → call model → validate output.
//!
//! Each advisory operation is a zero-sized type implementing `Flow`. The
//! `Advisor` owns the model handle and runs any flow against it. Nothing is
//! shared between invocations and a failed model call is never retried.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::llm_client::{GenerativeModel, LlmError, OutputConstraint, Prompt};
use crate::schema::{parse_contract, validate_contract, Contract, ValidationError};

#[derive(Debug, Error)]
pub enum FlowError {
    /// The request violated its schema; the model was not called.
    #[error("invalid input: {0}")]
    InputValidation(ValidationError),

    #[error("model call failed: {0}")]
    ExternalCall(#[from] LlmError),

    /// The model answered, but not in the declared shape.
    #[error("model output rejected: {0}")]
    OutputValidation(ValidationError),
}

pub trait Flow {
    /// Stable identifier used in logs and as the output constraint name.
    const NAME: &'static str;

    type Input: Contract + Serialize + DeserializeOwned + Send + Sync;
    type Output: Contract + Serialize + DeserializeOwned + Send;

    /// Pure rendering; every field it reads is guaranteed by the input schema.
    fn render(input: &Self::Input) -> Prompt;

    fn constraint() -> OutputConstraint {
        OutputConstraint::new(Self::NAME, Self::Output::schema().to_json_schema())
    }
}

#[derive(Clone)]
pub struct Advisor {
    model: Arc<dyn GenerativeModel>,
}

impl Advisor {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Runs `F` on a typed input. The input is validated here even if it was
    /// parsed from a request body, so values built in code get the same checks.
    pub async fn run<F: Flow>(&self, input: &F::Input) -> Result<F::Output, FlowError> {
        let span = info_span!("flow", flow = F::NAME, request_id = %Uuid::new_v4());
        async {
            validate_contract(input).map_err(reject_input)?;
            self.execute::<F>(input).await
        }
        .instrument(span)
        .await
    }

    async fn execute<F: Flow>(&self, input: &F::Input) -> Result<F::Output, FlowError> {
        let prompt = F::render(input);
        let constraint = F::constraint();
        debug!(
            images = prompt.images.len(),
            "rendered prompt ({} chars)",
            prompt.text.len()
        );

        let raw = self
            .model
            .complete(&prompt, &constraint)
            .await
            .map_err(|e| {
                error!("model call failed: {e}");
                FlowError::ExternalCall(e)
            })?;

        let output = parse_contract::<F::Output>(raw).map_err(|e| {
            error!(field = %e.field, "model output rejected: {e}");
            FlowError::OutputValidation(e)
        })?;

        info!("flow completed");
        Ok(output)
    }
}

fn reject_input(e: ValidationError) -> FlowError {
    warn!(field = %e.field, "rejected input: {e}");
    FlowError::InputValidation(e)
}
