use crate::{
    errors::{AppError, AppResult},
    models::domain::McqRecord,
};

/// Append-only, insertion-ordered collection of a session's questions.
#[derive(Debug, Clone, Default)]
pub struct McqStore {
    records: Vec<McqRecord>,
}

impl McqStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, records: impl IntoIterator<Item = McqRecord>) {
        self.records.extend(records);
    }

    pub fn all(&self) -> &[McqRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// First `limit` records whose question contains `query`, ignoring case.
    pub fn search(&self, query: &str, limit: usize) -> AppResult<Vec<&McqRecord>> {
        if query.trim().is_empty() {
            return Err(AppError::ValidationError("Enter a keyword first!".to_string()));
        }

        let needle = query.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|record| record.question.to_lowercase().contains(&needle))
            .take(limit)
            .collect())
    }
}
