//! Axum route handlers for the Reviews API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::reviews::options::{clamp_count, GenerationOptions, OptionOverrides};
use crate::reviews::service::generate_reviews;
use crate::state::AppState;

const DEFAULT_FILE_REVIEW_COUNT: u64 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub summary: Option<String>,
    #[serde(default = "default_request_count")]
    pub n: u64,
    pub temperature: Option<f32>,
    pub model: Option<String>,
    pub emoji: Option<bool>,
    #[serde(alias = "minPct")]
    pub min_fraction: Option<f64>,
    #[serde(alias = "maxPct")]
    pub max_fraction: Option<f64>,
}

fn default_request_count() -> u64 {
    1
}

impl GenerateRequest {
    fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            temperature: self.temperature,
            model: self.model.clone(),
            emoji: self.emoji,
            min_fraction: self.min_fraction,
            max_fraction: self.max_fraction,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub reviews: Vec<String>,
    pub options: GenerationOptions,
}

#[derive(Debug, Serialize)]
pub struct GenerateFromFileResponse {
    pub summary: String,
    pub reviews: Vec<String>,
    pub options: GenerationOptions,
}

/// Multipart fields collected from an upload request.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Bytes>,
    n: Option<u64>,
    overrides: OptionOverrides,
}

impl UploadForm {
    /// Applies one text field. Blank values and unknown names are ignored.
    fn apply_field(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }

        match name {
            "n" => self.n = Some(parse_field(name, value)?),
            "temperature" => self.overrides.temperature = Some(parse_field(name, value)?),
            "model" => self.overrides.model = Some(value.to_string()),
            "emoji" => self.overrides.emoji = Some(value != "false"),
            "minFraction" | "minPct" => {
                self.overrides.min_fraction = Some(parse_field(name, value)?)
            }
            "maxFraction" | "maxPct" => {
                self.overrides.max_fraction = Some(parse_field(name, value)?)
            }
            _ => {}
        }
        Ok(())
    }
}

fn parse_field<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Validation(format!("{name} must be a number, got '{value}'")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate
///
/// Regenerates reviews from a summary the caller already holds
/// (typically to replace selected rows).
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let summary = request
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InputMissing("summary is required".to_string()))?;

    let options = GenerationOptions::resolve(request.overrides(), &state.config.default_model)?;
    let n = clamp_count(request.n);

    let reviews = generate_reviews(state.generator.as_ref(), summary, n, &options).await?;

    Ok(Json(GenerateResponse { reviews, options }))
}

/// POST /api/generate-from-file
///
/// Multipart upload: a `file` part with the business document plus optional
/// text fields. Extracts the summary, then generates reviews from it.
pub async fn handle_generate_from_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateFromFileResponse>, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file data: {e}")))?;
            form.file = Some(bytes);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))?;
            form.apply_field(&name, &value)?;
        }
    }

    let file = form
        .file
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::InputMissing("file is required".to_string()))?;

    let options = GenerationOptions::resolve(form.overrides, &state.config.default_model)?;
    let n = clamp_count(form.n.unwrap_or(DEFAULT_FILE_REVIEW_COUNT));

    info!("Extracting summary from upload ({} bytes)", file.len());
    let extractor = Arc::clone(&state.extractor);
    let max_chars = state.config.max_summary_chars;
    let summary = tokio::task::spawn_blocking(move || extractor.extract_text(&file, max_chars))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    let reviews = generate_reviews(state.generator.as_ref(), &summary, n, &options).await?;

    Ok(Json(GenerateFromFileResponse {
        summary,
        reviews,
        options,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults() {
        let request: GenerateRequest = serde_json::from_str(r#"{"summary": "카페"}"#).unwrap();
        assert_eq!(request.n, 1);
        assert!(request.emoji.is_none());
    }

    #[test]
    fn test_generate_request_accepts_aliases() {
        let request: GenerateRequest = serde_json::from_str(
            r#"{"summary": "카페", "n": 4, "emoji": false, "minPct": 0.2, "maxFraction": 0.4}"#,
        )
        .unwrap();
        let overrides = request.overrides();
        assert_eq!(overrides.emoji, Some(false));
        assert_eq!(overrides.min_fraction, Some(0.2));
        assert_eq!(overrides.max_fraction, Some(0.4));
    }

    #[test]
    fn test_upload_form_parses_fields() {
        let mut form = UploadForm::default();
        form.apply_field("n", "25").unwrap();
        form.apply_field("temperature", "0.9").unwrap();
        form.apply_field("model", "gpt-4o").unwrap();
        form.apply_field("emoji", "false").unwrap();
        form.apply_field("minPct", "0.05").unwrap();
        form.apply_field("maxFraction", " 0.25 ").unwrap();

        assert_eq!(form.n, Some(25));
        assert_eq!(form.overrides.temperature, Some(0.9));
        assert_eq!(form.overrides.model.as_deref(), Some("gpt-4o"));
        assert_eq!(form.overrides.emoji, Some(false));
        assert_eq!(form.overrides.min_fraction, Some(0.05));
        assert_eq!(form.overrides.max_fraction, Some(0.25));
    }

    #[test]
    fn test_upload_form_emoji_only_disabled_by_false() {
        let mut form = UploadForm::default();
        form.apply_field("emoji", "true").unwrap();
        assert_eq!(form.overrides.emoji, Some(true));
        form.apply_field("emoji", "no").unwrap();
        assert_eq!(form.overrides.emoji, Some(true));
    }

    #[test]
    fn test_upload_form_blank_and_unknown_fields_ignored() {
        let mut form = UploadForm::default();
        form.apply_field("n", "  ").unwrap();
        form.apply_field("shop_name", "whatever").unwrap();
        assert!(form.n.is_none());
        assert!(form.overrides.model.is_none());
    }

    #[test]
    fn test_upload_form_rejects_unparsable_numbers() {
        let mut form = UploadForm::default();
        assert!(matches!(
            form.apply_field("n", "ten"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            form.apply_field("temperature", "warm"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            form.apply_field("maxPct", "15%"),
            Err(AppError::Validation(_))
        ));
    }
}
