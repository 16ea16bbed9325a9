pub const EXPORT_FILE_NAME: &str = "intellektai_mcqs.json";

pub const STRICT_SCHEMA_NAME: &str = "mcq_batch";

pub fn mcq_system_instruction(count: u32) -> String {
    format!(
        "You are an expert educational assistant. Generate exactly {count} multiple-choice questions (MCQs) from the provided text. \
You MUST return a valid JSON array of objects with the keys: 'question', 'options' (array of 4 strings), and 'correct_option' (0-based index). \
Return JSON only, no explanations, intro, or markdown fences."
    )
}

/// Variant used with schema-constrained output, where the top level must be an object.
pub fn strict_mcq_system_instruction(count: u32) -> String {
    format!(
        "You are an expert educational assistant. Generate exactly {count} multiple-choice questions (MCQs) from the provided text. \
You MUST return a single JSON object with one key 'questions' holding an array of objects with the keys: 'question', 'options' (array of 4 strings), and 'correct_option' (0-based index into 'options'). \
Return JSON only, no explanations, intro, or markdown fences."
    )
}

pub fn mcq_user_prompt(chunk: &str, count: u32) -> String {
    format!("Text:\n{chunk}\n\nGenerate {count} MCQs based on the text above.\n")
}
