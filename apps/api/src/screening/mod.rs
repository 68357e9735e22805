// Screening engine: text extraction, keyword space, TF–IDF similarity,
// section quality heuristic and the ATS decision rule.
// CPU-bound scoring must run inside tokio::task::spawn_blocking.

pub mod decision;
pub mod engine;
pub mod extractor;
pub mod handlers;
pub mod keywords;
pub mod quality;
pub mod similarity;
pub mod stopwords;
pub mod thresholds;
pub mod vocabulary;

// Re-export the public API consumed by other modules (handlers, state).
pub use decision::AtsStatus;
pub use engine::{BatchDocument, ScoringResult, ScreeningEngine};
pub use quality::QualityLabel;
pub use thresholds::ScreeningThresholds;
