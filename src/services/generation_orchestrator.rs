use std::sync::Arc;

use crate::{models::domain::McqRecord, services::mcq_generator::McqGenerator};

/// Receives progress and per-chunk warnings while a run is in flight.
pub trait ProgressReporter: Send + Sync {
    fn progress(&self, completed: usize, total: usize);
    fn warn(&self, message: String);
}

pub struct GenerationOrchestrator {
    generator: Arc<McqGenerator>,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<McqGenerator>) -> Self {
        Self { generator }
    }

    /// Runs the generator over `chunks` one at a time, in order, and
    /// concatenates the results. A failed chunk contributes nothing.
    pub async fn run<S: AsRef<str>>(
        &self,
        chunks: &[S],
        count_per_chunk: u32,
        reporter: &dyn ProgressReporter,
    ) -> Vec<McqRecord> {
        let total = chunks.len();
        let mut records = Vec::new();

        for (index, chunk) in chunks.iter().enumerate() {
            let generated = self
                .generator
                .generate(chunk.as_ref(), count_per_chunk, reporter)
                .await;
            log::info!(
                "Chunk {}/{} produced {} MCQs",
                index + 1,
                total,
                generated.len()
            );
            records.extend(generated);
            reporter.progress(index + 1, total);
        }

        records
    }
}
