use chrono::{DateTime, Utc};
use serde::Serialize;
use std::num::NonZeroUsize;

/// Resolved knobs for one generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationSettings {
    pub page_range: Option<String>,
    pub mcqs_per_chunk: u32,
    pub chunk_size: NonZeroUsize,
}

/// Live state of a session's generation run, polled by the progress endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GenerationProgress {
    pub running: bool,
    pub completed_chunks: usize,
    pub total_chunks: usize,
    pub fraction: f32,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl GenerationProgress {
    pub fn start(total_chunks: usize) -> Self {
        Self {
            running: true,
            total_chunks,
            started_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    pub fn advance(&mut self, completed: usize, total: usize) {
        self.completed_chunks = completed;
        self.total_chunks = total;
        self.fraction = if total == 0 {
            1.0
        } else {
            completed as f32 / total as f32
        };
    }

    pub fn finish(&mut self) {
        self.running = false;
        self.finished_at = Some(Utc::now());
    }
}
