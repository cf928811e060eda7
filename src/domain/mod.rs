pub mod adapters;
pub mod extraction;
pub mod models;

pub use adapters::ExtractionNormalizer;
pub use extraction::RawExtraction;
pub use models::{
    Grade, Issue, IssueKind, PageFacts, Recommendation, ScoreReport, Severity,
};
