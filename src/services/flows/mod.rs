//! Prompt flows: each pairs a typed input, a prompt template and a typed output, and
//! issues exactly one model call per invocation.

pub mod course;
pub mod exercise_solver;
pub mod lesson_summary;
pub mod practice_problem;
pub mod presentation;
pub mod question_answer;
pub mod quiz;

use std::sync::Arc;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    services::model_service::{
        GenerationRequest, HarmBlockThreshold, HarmCategory, ModelProvider, SafetySetting,
    },
};

pub const DEFAULT_STUDENT_LEVEL: &str = "Première G1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SafetyProfile {
    /// Provider defaults, no settings sent.
    ProviderDefault,
    /// `BLOCK_ONLY_HIGH` on the four harm categories.
    BlockOnlyHigh,
}

impl SafetyProfile {
    pub fn settings(self) -> Vec<SafetySetting> {
        match self {
            SafetyProfile::ProviderDefault => Vec::new(),
            SafetyProfile::BlockOnlyHigh => [
                HarmCategory::HarmCategoryDangerousContent,
                HarmCategory::HarmCategoryHateSpeech,
                HarmCategory::HarmCategoryHarassment,
                HarmCategory::HarmCategorySexuallyExplicit,
            ]
            .into_iter()
            .map(|category| SafetySetting {
                category,
                threshold: HarmBlockThreshold::BlockOnlyHigh,
            })
            .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FlowDefinition {
    pub name: &'static str,
    pub safety: SafetyProfile,
    pub temperature: Option<f32>,
    pub empty_output_message: &'static str,
}

pub struct FlowRunner {
    provider: Arc<dyn ModelProvider>,
    model: String,
}

impl FlowRunner {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` (and `image`, a data URI) once and returns the reply checked
    /// against `T`'s schema and validation rules.
    pub async fn run<T>(
        &self,
        flow: &FlowDefinition,
        prompt: String,
        image: Option<String>,
    ) -> AppResult<T>
    where
        T: DeserializeOwned + JsonSchema + Validate,
    {
        let output_schema = serde_json::to_value(schemars::schema_for!(T))
            .map_err(|e| AppError::InternalError(format!("Failed to build output schema: {}", e)))?;

        let request = GenerationRequest {
            flow: flow.name,
            model: self.model.clone(),
            prompt,
            image,
            output_schema,
            safety_settings: flow.safety.settings(),
            temperature: flow.temperature,
        };

        log::info!("Running flow {} with model {}", flow.name, self.model);

        let raw = self
            .provider
            .generate(request)
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::EmptyOutput(flow.empty_output_message.to_string()))?;

        let output: T = parse_structured(&raw)?;
        output.validate().map_err(|e| {
            log::warn!("Flow {} returned output failing validation: {}", flow.name, e);
            AppError::MalformedOutput(e.to_string())
        })?;

        log::debug!("Flow {} completed", flow.name);
        Ok(output)
    }
}

/// Parses a JSON reply, tolerating a surrounding Markdown code fence.
fn parse_structured<T: DeserializeOwned>(raw: &str) -> AppResult<T> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    Ok(serde_json::from_str(body)?)
}
