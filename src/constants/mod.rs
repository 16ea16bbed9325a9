pub mod mcq_prompt;
