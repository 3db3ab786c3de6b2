//! Fake generative model for tests.
//!
//! Returns a fixed reply for every call and records each prompt it receives,
//! so flows can be exercised without network access.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{GenerativeModel, LlmError, OutputConstraint, Prompt};

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Fail { status: u16, message: String },
}

#[derive(Debug)]
pub struct FakeModel {
    reply: Reply,
    calls: Mutex<Vec<(Prompt, OutputConstraint)>>,
}

impl FakeModel {
    /// Answers every call with `value`.
    pub fn replying(value: Value) -> Self {
        Self {
            reply: Reply::Json(value),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with an API error.
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Reply::Fail {
                status,
                message: message.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.calls.lock().unwrap().last().map(|(p, _)| p.clone())
    }

    pub fn last_constraint(&self) -> Option<OutputConstraint> {
        self.calls.lock().unwrap().last().map(|(_, c)| c.clone())
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn complete(
        &self,
        prompt: &Prompt,
        constraint: &OutputConstraint,
    ) -> Result<Value, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.clone(), constraint.clone()));

        match &self.reply {
            Reply::Json(value) => Ok(value.clone()),
            Reply::Fail { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fake_model_replies_and_records() {
        let model = FakeModel::replying(json!({"cropName": "Wheat"}));
        let prompt = Prompt::new("system", "Region: Punjab".to_string());
        let constraint = OutputConstraint::new("main_crop", json!({"type": "object"}));

        let reply = model.complete(&prompt, &constraint).await.unwrap();

        assert_eq!(reply, json!({"cropName": "Wheat"}));
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.last_prompt().unwrap().text, "Region: Punjab");
        assert_eq!(model.last_constraint().unwrap().name, "main_crop");
    }

    #[tokio::test]
    async fn test_fake_model_failing() {
        let model = FakeModel::failing(503, "overloaded");
        let prompt = Prompt::new("system", "anything".to_string());
        let constraint = OutputConstraint::new("x", json!({}));

        let err = model.complete(&prompt, &constraint).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }
}
