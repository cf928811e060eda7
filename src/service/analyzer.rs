//! Single-page analysis: extraction, normalization and scoring.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::domain::{ExtractionNormalizer, PageFacts, ScoreReport};
use crate::error::{AppError, Result};
use crate::extractor::PageExtractor;
use crate::service::scoring::ScoringEngine;

/// Normalize a raw extraction and score it with the canonical rubric.
pub fn analyze_page(url: &str, raw_extraction: Value) -> ScoreReport {
    let facts = ExtractionNormalizer::normalize_value(url, raw_extraction);
    ScoringEngine::default().score(&facts)
}

/// What a failed extraction turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// A score-0 report carrying one diagnostic issue.
    #[default]
    Placeholder,
    /// Empty facts run through the rubric like any other page.
    EmptyFacts,
}

impl FailurePolicy {
    pub fn apply(&self, engine: &ScoringEngine, url: &str, error: &AppError) -> ScoreReport {
        match self {
            FailurePolicy::Placeholder => ScoreReport::extraction_failed(url, error),
            FailurePolicy::EmptyFacts => engine.score(&PageFacts::empty(url)),
        }
    }
}

/// Outcome of analyzing one URL. Extraction failures are kept alongside the
/// report the failure policy produced for them.
#[derive(Debug)]
pub struct PageOutcome {
    pub report: ScoreReport,
    pub error: Option<AppError>,
}

impl PageOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Combines an extractor with the scoring engine for one URL at a time.
#[derive(Clone)]
pub struct PageAnalyzer {
    extractor: Arc<dyn PageExtractor>,
    engine: ScoringEngine,
    policy: FailurePolicy,
}

impl PageAnalyzer {
    pub fn new(extractor: Arc<dyn PageExtractor>, engine: ScoringEngine) -> Self {
        Self {
            extractor,
            engine,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Extract and normalize without scoring.
    pub async fn facts(&self, url: &str) -> Result<PageFacts> {
        let parsed = validate_url(url)?;
        let raw = self.extractor.extract(parsed.as_str()).await?;
        // the report keeps the caller's spelling of the URL
        Ok(ExtractionNormalizer::normalize(url, raw))
    }

    /// Extract and score, failing on any extraction error.
    pub async fn analyze(&self, url: &str) -> Result<ScoreReport> {
        let facts = self.facts(url).await?;
        Ok(self.engine.score(&facts))
    }

    /// Extract and score; extraction errors go through the failure policy.
    pub async fn analyze_or_fallback(&self, url: &str) -> PageOutcome {
        match self.analyze(url).await {
            Ok(report) => PageOutcome { report, error: None },
            Err(error) => {
                log::warn!(
                    "[ANALYZE] {} failed via {}: {}",
                    url,
                    self.extractor.name(),
                    error
                );
                PageOutcome {
                    report: self.policy.apply(&self.engine, url, &error),
                    error: Some(error),
                }
            }
        }
    }
}

/// Only absolute http(s) URLs are sent to the extraction service.
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| AppError::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(AppError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            url, scheme
        ))),
    }
}
