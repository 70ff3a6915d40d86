//! Review Generator: pluggable, trait-based source of raw review text.
//!
//! Default: `LlmReviewGenerator` (chat completions via `llm_client`).
//! Tests swap in a fixed-text stub.
//!
//! `AppState` holds an `Arc<dyn ReviewGenerator>`.

use async_trait::async_trait;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::{ChatResponse, LlmClient, LlmError};
use crate::reviews::options::GenerationOptions;

/// Model parameters forwarded to the generator for a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
}

impl From<&GenerationOptions> for GenerationParams {
    fn from(options: &GenerationOptions) -> Self {
        Self {
            model: options.model.clone(),
            temperature: options.temperature,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Produces raw, newline-separated review text for a prompt.
///
/// Implementations return `AppError::Generation` on any upstream failure,
/// including a blank completion.
#[async_trait]
pub trait ReviewGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmReviewGenerator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmReviewGenerator {
    llm: LlmClient,
}

impl LlmReviewGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ReviewGenerator for LlmReviewGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, AppError> {
        let response = self
            .llm
            .complete(prompt, &params.model, params.temperature)
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        completion_text(&response)
    }
}

/// First-choice content, rejecting missing or whitespace-only completions.
fn completion_text(response: &ChatResponse) -> Result<String, AppError> {
    match response.text().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => {
            warn!("Model returned a blank completion");
            Err(AppError::Generation(LlmError::EmptyContent.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(content: serde_json::Value) -> ChatResponse {
        serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        }))
        .unwrap()
    }

    #[test]
    fn test_completion_text_trims_content() {
        let text = completion_text(&response(json!("\n와인이 좋았어요\n친절했습니다\n"))).unwrap();
        assert_eq!(text, "와인이 좋았어요\n친절했습니다");
    }

    #[test]
    fn test_blank_completion_is_generation_failure() {
        assert!(matches!(
            completion_text(&response(json!("  \n "))),
            Err(AppError::Generation(_))
        ));
        assert!(matches!(
            completion_text(&response(json!(null))),
            Err(AppError::Generation(_))
        ));
    }

    #[test]
    fn test_no_choices_is_generation_failure() {
        let empty: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(matches!(
            completion_text(&empty),
            Err(AppError::Generation(_))
        ));
    }

    #[test]
    fn test_params_from_options() {
        let mut options = GenerationOptions::with_model("gpt-4o-mini");
        options.temperature = 0.3;
        let params = GenerationParams::from(&options);
        assert_eq!(params.model, "gpt-4o-mini");
        assert_eq!(params.temperature, 0.3);
    }
}
