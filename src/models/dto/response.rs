use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::mcq::option_label;
use crate::models::domain::McqRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McqOptionView {
    pub label: String,
    pub text: String,
}

/// Display form of a record: numbered, lettered options, defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McqView {
    pub number: usize,
    pub question: String,
    pub options: Vec<McqOptionView>,
    pub answer: String,
    pub answer_in_range: bool,
}

impl McqView {
    pub fn from_record(number: usize, record: &McqRecord) -> Self {
        McqView {
            number,
            question: record.display_question().to_string(),
            options: record
                .options
                .iter()
                .enumerate()
                .map(|(i, text)| McqOptionView {
                    label: option_label(i as i64),
                    text: text.clone(),
                })
                .collect(),
            answer: record.answer_label(),
            answer_in_range: record.has_valid_answer(),
        }
    }

    /// Numbers views from 1 in the order given.
    pub fn list<'a>(records: impl IntoIterator<Item = &'a McqRecord>) -> Vec<McqView> {
        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| McqView::from_record(i + 1, record))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDto {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub mcq_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub chunk_count: usize,
    pub generated_count: usize,
    pub questions: Vec<McqView>,
    pub warnings: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_in_session: usize,
    pub results: Vec<McqView>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteSessionResponse {
    pub message: String,
}
