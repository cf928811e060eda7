//! Batch analysis of many URLs with a comparative summary.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{IssueKind, ScoreReport, Severity};
use crate::service::analyzer::PageAnalyzer;
use crate::service::throttle::{NoThrottle, Throttle};

const COMMON_ISSUE_LIMIT: usize = 5;

// ====== Batch report ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub url: String,
    pub report: ScoreReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonIssue {
    pub kind: IssueKind,
    pub count: usize,
    /// Share of successful pages with this issue, one decimal place.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub url: String,
    pub score: u8,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub batch_id: String,
    pub analyzed_at: DateTime<Utc>,
    pub total_urls: usize,
    pub successful: usize,
    pub failed: usize,
    /// Mean over successful pages only; `None` when every page failed.
    pub average_score: Option<f64>,
    pub common_issues: Vec<CommonIssue>,
    pub top_performer: Option<TopPerformer>,
    pub results: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn compile(batch_id: String, analyzed_at: DateTime<Utc>, results: Vec<BatchEntry>) -> Self {
        let successful: Vec<&ScoreReport> = results
            .iter()
            .filter(|entry| entry.is_success())
            .map(|entry| &entry.report)
            .collect();

        let average_score = (!successful.is_empty()).then(|| {
            let sum: u32 = successful.iter().map(|r| r.overall_score as u32).sum();
            round1(sum as f64 / successful.len() as f64)
        });

        Self {
            batch_id,
            analyzed_at,
            total_urls: results.len(),
            successful: successful.len(),
            failed: results.len() - successful.len(),
            average_score,
            common_issues: common_issues(&successful),
            top_performer: top_performer(&successful),
            results,
        }
    }
}

/// Most frequent critical and warning issue kinds across pages.
fn common_issues(reports: &[&ScoreReport]) -> Vec<CommonIssue> {
    let mut counts: HashMap<IssueKind, usize> = HashMap::new();
    for report in reports {
        for issue in &report.issues {
            if matches!(issue.severity, Severity::Critical | Severity::Warning) {
                *counts.entry(issue.kind).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<(IssueKind, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(COMMON_ISSUE_LIMIT)
        .map(|(kind, count)| CommonIssue {
            kind,
            count,
            percentage: round1(count as f64 * 100.0 / reports.len() as f64),
        })
        .collect()
}

/// First page with the highest score.
fn top_performer(reports: &[&ScoreReport]) -> Option<TopPerformer> {
    let best = reports.iter().copied().fold(None::<&ScoreReport>, |best, report| match best {
        Some(b) if b.overall_score >= report.overall_score => Some(b),
        _ => Some(report),
    })?;

    Some(TopPerformer {
        url: best.url.clone(),
        score: best.overall_score,
        strengths: strengths(best),
    })
}

fn strengths(report: &ScoreReport) -> Vec<String> {
    let mut strengths = Vec::new();
    if report.has_title && report.has_meta_description {
        strengths.push("Complete metadata".to_string());
    }
    if report.h1_count == 1 {
        strengths.push("Proper H1 usage".to_string());
    }
    if report.structured_data_count > 0 {
        strengths.push("Structured data implementation".to_string());
    }
    strengths
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ====== Batch driver ======

/// Runs a `PageAnalyzer` over many URLs. Extraction failures never abort the
/// batch; results keep input order.
pub struct BatchAnalyzer {
    analyzer: PageAnalyzer,
    throttle: Arc<dyn Throttle>,
    concurrency: usize,
}

impl BatchAnalyzer {
    pub fn new(analyzer: PageAnalyzer) -> Self {
        Self {
            analyzer,
            throttle: Arc::new(NoThrottle),
            concurrency: 1,
        }
    }

    pub fn with_throttle(mut self, throttle: Arc<dyn Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn run(&self, urls: &[String]) -> BatchReport {
        let batch_id = Uuid::new_v4().to_string();
        log::info!(
            "[BATCH] {} starting: {} URLs, concurrency {}",
            batch_id,
            urls.len(),
            self.concurrency
        );

        let results: Vec<BatchEntry> = stream::iter(urls.iter().enumerate())
            .map(|(index, url)| async move {
                self.throttle.acquire().await;
                log::info!("[BATCH] Analyzing {}/{}: {}", index + 1, urls.len(), url);
                let outcome = self.analyzer.analyze_or_fallback(url).await;
                BatchEntry {
                    url: url.clone(),
                    error: outcome.error.map(|e| e.to_string()),
                    report: outcome.report,
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let report = BatchReport::compile(batch_id, Utc::now(), results);
        log::info!(
            "[BATCH] {} complete: {} succeeded, {} failed",
            report.batch_id,
            report.successful,
            report.failed
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageFacts;
    use crate::service::scoring::ScoringEngine;
    use crate::service::throttle::FixedDelay;
    use crate::test_utils::fixtures;
    use crate::test_utils::mocks::RoutedExtractor;
    use std::time::Duration;

    fn entry(report: ScoreReport) -> BatchEntry {
        BatchEntry { url: report.url.clone(), report, error: None }
    }

    fn failed(url: &str) -> BatchEntry {
        BatchEntry {
            url: url.to_string(),
            report: ScoreReport::extraction_failed(url, "timeout"),
            error: Some("timeout".to_string()),
        }
    }

    fn compile(results: Vec<BatchEntry>) -> BatchReport {
        BatchReport::compile("batch".to_string(), Utc::now(), results)
    }

    #[test]
    fn test_summary_excludes_failures_from_average() {
        let engine = ScoringEngine::default();
        let good = engine.score(&fixtures::well_optimized_facts());
        let empty = engine.score(&PageFacts::empty("https://empty.test/"));

        let report = compile(vec![entry(good), entry(empty), failed("https://down.test/")]);

        assert_eq!(report.total_urls, 3);
        assert_eq!(report.successful, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.average_score, Some(50.0));
    }

    #[test]
    fn test_all_failed_has_no_average_or_top_performer() {
        let report = compile(vec![failed("https://a.test/"), failed("https://b.test/")]);
        assert_eq!(report.average_score, None);
        assert!(report.top_performer.is_none());
        assert!(report.common_issues.is_empty());
    }

    #[test]
    fn test_common_issues_rank_critical_and_warning_only() {
        let engine = ScoringEngine::default();
        let mut short_title = fixtures::well_optimized_facts();
        short_title.url = "https://short.test/".into();
        short_title.seo.title = Some("Short".into());

        let report = compile(vec![
            entry(engine.score(&PageFacts::empty("https://one.test/"))),
            entry(engine.score(&PageFacts::empty("https://two.test/"))),
            entry(engine.score(&short_title)),
        ]);

        let kinds: Vec<IssueKind> = report.common_issues.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::MissingTitle,
                IssueKind::MissingMetaDescription,
                IssueKind::MissingH1,
                IssueKind::TitleLength
            ]
        );
        assert_eq!(report.common_issues[0].count, 2);
        assert_eq!(report.common_issues[0].percentage, 66.7);
        assert_eq!(report.common_issues[3].percentage, 33.3);
    }

    #[test]
    fn test_top_performer_is_first_best_with_strengths() {
        let engine = ScoringEngine::default();
        let mut first = fixtures::well_optimized_facts();
        first.url = "https://first.test/".into();
        let mut second = fixtures::well_optimized_facts();
        second.url = "https://second.test/".into();

        let report = compile(vec![
            entry(engine.score(&PageFacts::empty("https://empty.test/"))),
            entry(engine.score(&first)),
            entry(engine.score(&second)),
        ]);

        let top = report.top_performer.unwrap();
        assert_eq!(top.url, "https://first.test/");
        assert_eq!(top.score, 100);
        assert_eq!(
            top.strengths,
            vec!["Complete metadata", "Proper H1 usage", "Structured data implementation"]
        );
    }

    #[test]
    fn test_strengths_follow_page_facts_when_rows_are_disabled() {
        use crate::service::scoring::{Points, Rubric, RubricWeights};

        let engine = ScoringEngine::new(Rubric {
            weights: RubricWeights {
                structured_data: 0,
                title: Points::new(0, 0),
                ..Default::default()
            },
            ..Default::default()
        });
        let mut facts = fixtures::well_optimized_facts();
        facts.seo.title = None;
        facts.technical.structured_data.clear();

        let page = engine.score(&facts);
        assert!(!page.has_issue(IssueKind::MissingTitle));
        assert!(!page.has_issue(IssueKind::MissingStructuredData));

        let top = compile(vec![entry(page)]).top_performer.unwrap();
        assert_eq!(top.strengths, vec!["Proper H1 usage"]);
    }

    #[test]
    fn test_batch_report_json_shape() {
        let report = compile(vec![failed("https://down.test/")]);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("batchId").is_some());
        assert!(value.get("analyzedAt").is_some());
        assert_eq!(value["totalUrls"], 1);
        assert_eq!(value["results"][0]["error"], "timeout");
    }

    fn analyzer() -> PageAnalyzer {
        let extractor = RoutedExtractor::new()
            .route("https://good.test/", fixtures::well_optimized_extraction())
            .route("https://empty.test/", serde_json::json!({}));
        PageAnalyzer::new(Arc::new(extractor), ScoringEngine::default())
    }

    #[tokio::test]
    async fn test_run_keeps_input_order_and_survives_failures() {
        let urls: Vec<String> = [
            "https://good.test/",
            "https://down.test/",
            "not a url",
            "https://empty.test/",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let report = BatchAnalyzer::new(analyzer()).with_concurrency(3).run(&urls).await;

        let order: Vec<&str> = report.results.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(order, urls.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(report.successful, 2);
        assert_eq!(report.failed, 2);
        assert!(report.results[1].report.is_extraction_failure());
        assert!(report.results[2].error.as_deref().unwrap().contains("Invalid URL"));
        assert_eq!(report.average_score, Some(50.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_spaces_extractions_with_fixed_delay() {
        let urls = vec!["https://good.test/".to_string(); 3];
        let start = tokio::time::Instant::now();

        let report = BatchAnalyzer::new(analyzer())
            .with_throttle(Arc::new(FixedDelay::from_millis(2000)))
            .with_concurrency(3)
            .run(&urls)
            .await;

        assert_eq!(report.successful, 3);
        assert!(start.elapsed() >= Duration::from_millis(4000));
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let batch = BatchAnalyzer::new(analyzer()).with_concurrency(0);
        assert_eq!(batch.concurrency, 1);
    }
}
