use serde::Deserialize;
use std::num::NonZeroUsize;
use validator::Validate;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::domain::GenerationSettings;

/// Query parameters accompanying a PDF upload.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateParams {
    #[validate(length(max = 200))]
    pub page_range: Option<String>,

    #[validate(range(min = 1, max = 20))]
    pub mcqs_per_chunk: Option<u32>,

    #[validate(range(min = 500, max = 4000))]
    pub chunk_size: Option<usize>,
}

impl GenerateParams {
    pub fn into_settings(self, config: &Config) -> AppResult<GenerationSettings> {
        self.validate()?;

        let chunk_size = self.chunk_size.unwrap_or(config.default_chunk_size);
        let chunk_size = NonZeroUsize::new(chunk_size).ok_or_else(|| {
            AppError::ValidationError("chunk_size must be greater than zero".to_string())
        })?;

        Ok(GenerationSettings {
            page_range: self.page_range.filter(|r| !r.trim().is_empty()),
            mcqs_per_chunk: self.mcqs_per_chunk.unwrap_or(config.default_mcqs_per_chunk).max(1),
            chunk_size,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,

    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

impl SearchParams {
    pub fn limit(&self, config: &Config) -> usize {
        self.limit.unwrap_or(config.default_search_limit).clamp(1, 50)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// Records produced by the most recent generation run.
    #[default]
    Last,
    /// Every record in the session store.
    All,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub scope: ExportScope,
}
