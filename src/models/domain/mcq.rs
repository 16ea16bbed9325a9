use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single multiple-choice question as returned by the model.
///
/// Decoding never fails on an object. A missing or mistyped field falls back
/// to a display default, and the mistyped value stays in `extra` under its own
/// key so an export writes the record back out unchanged.
#[derive(Clone, Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct McqRecord {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: Option<i64>,
    pub extra: Map<String, Value>,
}

const QUESTION: &str = "question";
const OPTIONS: &str = "options";
const CORRECT_OPTION: &str = "correct_option";

impl From<Map<String, Value>> for McqRecord {
    fn from(mut extra: Map<String, Value>) -> Self {
        let question = match extra.remove(QUESTION) {
            Some(Value::String(question)) => question,
            Some(other) => {
                let shown = scalar_text(&other).unwrap_or_default();
                extra.insert(QUESTION.to_string(), other);
                shown
            }
            None => String::new(),
        };

        let options = match extra.remove(OPTIONS) {
            Some(Value::Array(items)) if items.iter().all(Value::is_string) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect(),
            Some(other) => {
                let shown = match &other {
                    Value::Array(items) => items
                        .iter()
                        .map(|item| scalar_text(item).unwrap_or_else(|| item.to_string()))
                        .collect(),
                    _ => Vec::new(),
                };
                extra.insert(OPTIONS.to_string(), other);
                shown
            }
            None => Vec::new(),
        };

        let correct_option = match extra.remove(CORRECT_OPTION) {
            Some(Value::Number(n)) if n.is_i64() => n.as_i64(),
            Some(Value::Null) | None => None,
            Some(other) => {
                let index = match &other {
                    Value::String(text) => text.trim().parse::<i64>().ok(),
                    _ => None,
                };
                extra.insert(CORRECT_OPTION.to_string(), other);
                index
            }
        };

        McqRecord {
            question,
            options,
            correct_option,
            extra,
        }
    }
}

impl From<McqRecord> for Map<String, Value> {
    fn from(record: McqRecord) -> Self {
        let mut map = record.extra;
        map.entry(QUESTION)
            .or_insert_with(|| Value::String(record.question));
        map.entry(OPTIONS).or_insert_with(|| {
            Value::Array(record.options.into_iter().map(Value::String).collect())
        });
        if let Some(index) = record.correct_option {
            map.entry(CORRECT_OPTION).or_insert_with(|| Value::from(index));
        }
        map
    }
}

/// Text shown for a scalar JSON value; `None` for arrays and objects.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

impl McqRecord {
    pub fn new(question: &str, options: &[&str], correct_option: i64) -> Self {
        McqRecord {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_option: Some(correct_option),
            extra: Map::new(),
        }
    }

    pub fn display_question(&self) -> &str {
        if self.question.trim().is_empty() {
            "N/A"
        } else {
            &self.question
        }
    }

    /// Index of the correct answer, `0` when the model left it out.
    pub fn answer_index(&self) -> i64 {
        self.correct_option.unwrap_or(0)
    }

    pub fn answer_label(&self) -> String {
        option_label(self.answer_index())
    }

    pub fn has_valid_answer(&self) -> bool {
        matches!(self.correct_option, Some(i) if i >= 0 && (i as usize) < self.options.len())
    }
}

/// Letter label for a zero-based option index (`0` -> `A`); `?` past `Z`.
pub fn option_label(index: i64) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => "?".to_string(),
    }
}

/// Shape the model must produce when strict structured output is enabled.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StrictMcqBatch {
    pub questions: Vec<StrictMcq>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StrictMcq {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: i64,
}

impl From<StrictMcq> for McqRecord {
    fn from(mcq: StrictMcq) -> Self {
        McqRecord {
            question: mcq.question,
            options: mcq.options,
            correct_option: Some(mcq.correct_option),
            extra: Map::new(),
        }
    }
}
