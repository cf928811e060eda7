pub mod analyzer;
pub mod batch;
pub mod report_store;
pub mod scoring;
pub mod throttle;

pub use analyzer::{analyze_page, validate_url, FailurePolicy, PageAnalyzer, PageOutcome};
pub use batch::{BatchAnalyzer, BatchEntry, BatchReport, CommonIssue, TopPerformer};
pub use report_store::ReportStore;
pub use scoring::{QuickCheck, QuickFacts, QuickReport, Rubric, RubricPreset, ScoringEngine};
pub use throttle::{FixedDelay, NoThrottle, Throttle};
