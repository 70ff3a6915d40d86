//! Per-request generation options.
//!
//! Callers send optional overrides; anything absent falls back to the
//! service defaults. The resolved options are echoed back in responses.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::reviews::appender::{AppendOptions, DEFAULT_FALLBACK_PROBABILITY};
use crate::reviews::quota::SpreadConstraints;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MIN_FRACTION: f64 = 0.10;
pub const DEFAULT_MAX_FRACTION: f64 = 0.15;

/// Upper bound on reviews produced by one request.
pub const MAX_REVIEWS: usize = 200;

/// Optional overrides as they arrive from a request body or form.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionOverrides {
    pub temperature: Option<f32>,
    pub model: Option<String>,
    pub emoji: Option<bool>,
    #[serde(alias = "minPct")]
    pub min_fraction: Option<f64>,
    #[serde(alias = "maxPct")]
    pub max_fraction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub temperature: f32,
    pub model: String,
    pub emoji: bool,
    pub min_fraction: f64,
    pub max_fraction: f64,
}

impl GenerationOptions {
    pub fn with_model(model: &str) -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            model: model.to_string(),
            emoji: true,
            min_fraction: DEFAULT_MIN_FRACTION,
            max_fraction: DEFAULT_MAX_FRACTION,
        }
    }

    /// Applies `overrides` on top of the defaults and validates the result.
    /// A blank model name counts as absent.
    pub fn resolve(overrides: OptionOverrides, default_model: &str) -> Result<Self, AppError> {
        let defaults = Self::with_model(default_model);

        let options = Self {
            temperature: overrides.temperature.unwrap_or(defaults.temperature),
            model: overrides
                .model
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or(defaults.model),
            emoji: overrides.emoji.unwrap_or(defaults.emoji),
            min_fraction: overrides.min_fraction.unwrap_or(defaults.min_fraction),
            max_fraction: overrides.max_fraction.unwrap_or(defaults.max_fraction),
        };

        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Validation(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        for (name, value) in [
            ("minFraction", self.min_fraction),
            ("maxFraction", self.max_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(AppError::Validation(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        if self.max_fraction < self.min_fraction {
            return Err(AppError::Validation(format!(
                "maxFraction ({}) must not be below minFraction ({})",
                self.max_fraction, self.min_fraction
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AppError::Validation("model cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn spread_constraints(&self) -> SpreadConstraints {
        SpreadConstraints {
            min_fraction: self.min_fraction,
            max_fraction: self.max_fraction,
            ..SpreadConstraints::default()
        }
    }

    pub fn append_options(&self) -> AppendOptions {
        AppendOptions {
            enable: self.emoji,
            fallback_probability: DEFAULT_FALLBACK_PROBABILITY,
        }
    }
}

/// Clamps a requested review count to `[1, MAX_REVIEWS]`.
pub fn clamp_count(n: u64) -> usize {
    n.clamp(1, MAX_REVIEWS as u64) as usize
}
