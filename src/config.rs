use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub hf_token: SecretString,
    pub model_api_base: String,
    pub model_id: String,
    pub model_max_tokens: u32,
    pub model_temperature: f32,
    pub model_strict_json: bool,
    pub default_mcqs_per_chunk: u32,
    pub default_chunk_size: usize,
    pub default_search_limit: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_var("WEB_SERVER_PORT", 8080),
            hf_token: SecretString::from(env::var("HF_TOKEN").unwrap_or_default()),
            model_api_base: env::var("MODEL_API_BASE")
                .unwrap_or_else(|_| "https://router.huggingface.co/v1".to_string()),
            model_id: env::var("MODEL_ID")
                .unwrap_or_else(|_| "meta-llama/Llama-3.1-8B-Instruct:fireworks-ai".to_string()),
            model_max_tokens: parse_var("MODEL_MAX_TOKENS", 2048),
            model_temperature: parse_var("MODEL_TEMPERATURE", 0.1),
            model_strict_json: env::var("MODEL_STRICT_JSON")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            default_mcqs_per_chunk: parse_var("DEFAULT_MCQS_PER_CHUNK", 5),
            default_chunk_size: parse_var("DEFAULT_CHUNK_SIZE", 2000),
            default_search_limit: parse_var("DEFAULT_SEARCH_LIMIT", 5),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 20 * 1024 * 1024),
        }
    }

    /// Rejects configurations that cannot reach the inference endpoint.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        if self.hf_token.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "HF_TOKEN is not set. Export the inference API token before starting the server."
                    .to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.model_temperature) {
            return Err(AppError::ValidationError(format!(
                "MODEL_TEMPERATURE must be between 0 and 2, got {}",
                self.model_temperature
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            hf_token: SecretString::from("hf_test_token".to_string()),
            model_api_base: "http://127.0.0.1:9/v1".to_string(),
            model_id: "test-model".to_string(),
            model_max_tokens: 2048,
            model_temperature: 0.1,
            model_strict_json: false,
            default_mcqs_per_chunk: 5,
            default_chunk_size: 2000,
            default_search_limit: 5,
            max_upload_bytes: 1024 * 1024,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.model_api_base.is_empty());
        assert!(!config.model_id.is_empty());
        assert!(config.default_chunk_size > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.model_id, "test-model");
        assert_eq!(config.default_mcqs_per_chunk, 5);
        assert_eq!(config.default_chunk_size, 2000);
        assert!(config.validate_for_production().is_ok());
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let mut config = Config::test_config();
        config.hf_token = SecretString::from(String::new());

        assert!(matches!(
            config.validate_for_production(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_out_of_range_temperature_fails_validation() {
        let mut config = Config::test_config();
        config.model_temperature = 3.5;

        assert!(config.validate_for_production().is_err());
    }
}
