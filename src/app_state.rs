use std::sync::Arc;

use crate::{
    config::Config,
    repositories::InMemorySessionRepository,
    services::{
        generation_orchestrator::GenerationOrchestrator,
        mcq_generator::{ExtractionMode, McqGenerator},
        mcq_service::McqService,
        model_service::{OpenAiCompatModel, StructuredModel},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub mcq_service: Arc<McqService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let model = Arc::new(OpenAiCompatModel::new(&config));
        Self::with_model(config, model)
    }

    /// Wires the pipeline around any model implementation.
    pub fn with_model(config: Config, model: Arc<dyn StructuredModel>) -> Self {
        let mode = if config.model_strict_json {
            ExtractionMode::Strict
        } else {
            ExtractionMode::Lenient
        };
        log::info!(
            "Using model {} at {} ({:?} JSON extraction)",
            config.model_id,
            config.model_api_base,
            mode
        );

        let generator = Arc::new(McqGenerator::new(model, mode));
        let sessions = Arc::new(InMemorySessionRepository::new());
        let mcq_service = Arc::new(McqService::new(
            sessions,
            GenerationOrchestrator::new(generator),
        ));

        Self {
            mcq_service,
            config: Arc::new(config),
        }
    }
}
