pub mod generation;
pub mod mcq;

pub use generation::{GenerationProgress, GenerationSettings};
pub use mcq::McqRecord;
