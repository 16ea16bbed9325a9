use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::{
    constants::mcq_prompt::{mcq_system_instruction, mcq_user_prompt, strict_mcq_system_instruction},
    errors::{AppError, AppResult},
    models::domain::{
        mcq::{StrictMcq, StrictMcqBatch},
        McqRecord,
    },
    services::{
        generation_orchestrator::ProgressReporter,
        model_service::{StructuredModel, StructuredRequest},
    },
};

static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("JSON_ARRAY is a valid regex pattern"));

/// How the model's reply is turned into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Take the widest `[...]` span in the reply, tolerating text around it.
    #[default]
    Lenient,
    /// Request schema-constrained output and reject anything that does not match it.
    Strict,
}

pub struct McqGenerator {
    model: Arc<dyn StructuredModel>,
    mode: ExtractionMode,
}

impl McqGenerator {
    pub fn new(model: Arc<dyn StructuredModel>, mode: ExtractionMode) -> Self {
        Self { model, mode }
    }

    /// Generates up to `count` questions for one chunk. Failures are reported
    /// through `reporter` as warnings and yield an empty list.
    pub async fn generate(
        &self,
        chunk: &str,
        count: u32,
        reporter: &dyn ProgressReporter,
    ) -> Vec<McqRecord> {
        match self.try_generate(chunk, count).await {
            Ok(records) => records,
            Err(e) => {
                let message = match e {
                    AppError::ModelError(_) => e.to_string(),
                    other => format!("Model API error: {}", other),
                };
                log::warn!("{}", message);
                reporter.warn(message);
                Vec::new()
            }
        }
    }

    async fn try_generate(&self, chunk: &str, count: u32) -> AppResult<Vec<McqRecord>> {
        let request = self.build_request(chunk, count)?;
        let raw = self.model.generate_structured(&request).await?;

        match self.mode {
            ExtractionMode::Lenient => parse_lenient(&raw),
            ExtractionMode::Strict => parse_strict(&raw),
        }
    }

    fn build_request(&self, chunk: &str, count: u32) -> AppResult<StructuredRequest> {
        let (system, schema) = match self.mode {
            ExtractionMode::Lenient => (mcq_system_instruction(count), None),
            ExtractionMode::Strict => (
                strict_mcq_system_instruction(count),
                Some(serde_json::to_value(schemars::schema_for!(StrictMcqBatch))?),
            ),
        };

        Ok(StructuredRequest {
            system,
            user: mcq_user_prompt(chunk, count),
            schema,
        })
    }
}

/// Greedy `[` .. `]` span of the reply, or `"[]"` when there is none.
pub fn extract_json_payload(raw: &str) -> &str {
    JSON_ARRAY.find(raw).map(|m| m.as_str()).unwrap_or("[]")
}

/// Decodes the reply's JSON array. Object elements become records, whatever
/// their field types; anything else in the array is skipped.
pub fn parse_lenient(raw: &str) -> AppResult<Vec<McqRecord>> {
    let items: Vec<serde_json::Value> = serde_json::from_str(extract_json_payload(raw))
        .map_err(|e| AppError::ModelError(format!("Model returned invalid JSON: {}", e)))?;

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::Object(fields) => Some(McqRecord::from(fields)),
            other => {
                log::debug!("Skipping non-object MCQ entry: {}", other);
                None
            }
        })
        .collect())
}

pub fn parse_strict(raw: &str) -> AppResult<Vec<McqRecord>> {
    let batch: StrictMcqBatch = serde_json::from_str(raw.trim()).map_err(|e| {
        AppError::ModelError(format!("Model output does not match the MCQ schema: {}", e))
    })?;

    batch
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, mcq)| check_answer_bounds(i, mcq).map(McqRecord::from))
        .collect()
}

fn check_answer_bounds(position: usize, mcq: StrictMcq) -> AppResult<StrictMcq> {
    let in_range = usize::try_from(mcq.correct_option)
        .map(|i| i < mcq.options.len())
        .unwrap_or(false);

    if in_range {
        Ok(mcq)
    } else {
        Err(AppError::ModelError(format!(
            "Question {} has correct_option {} but only {} options",
            position + 1,
            mcq.correct_option,
            mcq.options.len()
        )))
    }
}
