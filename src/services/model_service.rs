use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::{config::Config, constants::mcq_prompt::STRICT_SCHEMA_NAME, errors::AppResult};

/// One structured-output request: instruction, prompt with the chunk embedded,
/// and an optional JSON schema the response has to satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub system: String,
    pub user: String,
    pub schema: Option<serde_json::Value>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StructuredModel: Send + Sync {
    /// Returns the raw text payload of the model's reply.
    async fn generate_structured(&self, request: &StructuredRequest) -> AppResult<String>;
}

/// Chat-completions client for any OpenAI-compatible endpoint
/// (the Hugging Face router by default).
pub struct OpenAiCompatModel {
    client: Client<OpenAIConfig>,
    model_id: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiCompatModel {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.hf_token.expose_secret())
            .with_api_base(&config.model_api_base);

        Self {
            client: Client::with_config(openai_config),
            model_id: config.model_id.clone(),
            max_tokens: config.model_max_tokens,
            temperature: config.model_temperature,
        }
    }
}

fn response_format(schema: Option<&serde_json::Value>) -> ResponseFormat {
    match schema {
        Some(schema) => ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: Some("Multiple-choice questions generated from a text chunk".to_string()),
                name: STRICT_SCHEMA_NAME.to_string(),
                schema: Some(schema.clone()),
                strict: Some(true),
            },
        },
        None => ResponseFormat::JsonObject,
    }
}

#[async_trait]
impl StructuredModel for OpenAiCompatModel {
    async fn generate_structured(&self, request: &StructuredRequest) -> AppResult<String> {
        log::debug!(
            "Calling model {} (system {} chars, prompt {} chars)",
            self.model_id,
            request.system.len(),
            request.user.len()
        );

        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(request.system.as_str())
                    .build()?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(request.user.as_str())
                    .build()?,
            ),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_id)
            .messages(messages)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .response_format(response_format(request.schema.as_ref()))
            .build()?;

        let response = self.client.chat().create(chat_request).await?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        log::debug!("Model {} returned {} chars", self.model_id, content.len());
        Ok(content)
    }
}
