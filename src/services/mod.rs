pub mod chunker;
pub mod generation_orchestrator;
pub mod http_helpers;
pub mod mcq_generator;
pub mod mcq_service;
pub mod mcq_store;
pub mod model_service;
pub mod page_selector;
pub mod text_extractor;
