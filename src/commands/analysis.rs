//! Command handlers behind the CLI subcommands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{input, render};
use crate::config::Settings;
use crate::domain::ExtractionNormalizer;
use crate::extractor::FirecrawlExtractor;
use crate::service::{
    BatchAnalyzer, FixedDelay, NoThrottle, PageAnalyzer, QuickCheck, ReportStore, ScoringEngine,
    Throttle,
};

/// Settings and output options shared by every command.
pub struct CommandContext {
    pub settings: Settings,
    pub json: bool,
    pub save: bool,
}

impl CommandContext {
    pub fn engine(&self) -> ScoringEngine {
        ScoringEngine::new(self.settings.rubric.to_rubric())
    }

    fn analyzer(&self) -> Result<PageAnalyzer> {
        if self.settings.extractor.api_key.is_none() {
            log::warn!("[EXTRACT] No API key configured; set FIRECRAWL_API_KEY or extractor.api_key");
        }
        let extractor = FirecrawlExtractor::new(&self.settings.extractor)
            .context("Failed to build extraction client")?;
        Ok(PageAnalyzer::new(Arc::new(extractor), self.engine())
            .with_failure_policy(self.settings.batch.failure_policy))
    }

    /// Print a report and save it when requested.
    fn emit<T: Serialize>(&self, identifier: &str, report: &T, text: impl Fn(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            print!("{}", text(report));
        }

        if self.save {
            let path = ReportStore::new(&self.settings.reports_dir)
                .save(identifier, report)
                .context("Failed to save report")?;
            if !self.json {
                println!("\nReport saved to {}", path.display());
            }
        }
        Ok(())
    }
}

pub async fn analyze(ctx: &CommandContext, url: &str) -> Result<()> {
    crate::service::validate_url(url)?;
    let analyzer = ctx.analyzer()?;

    log::info!("Analyzing {}", url);
    let outcome = analyzer.analyze_or_fallback(url).await;
    ctx.emit(url, &outcome.report, render::score_report)?;

    match outcome.error {
        Some(error) => Err(error).context(format!("Extraction failed for {}", url)),
        None => Ok(()),
    }
}

pub fn score(ctx: &CommandContext, file: &Path, url: Option<&str>) -> Result<()> {
    let loaded = input::load_extraction(file, url)?;
    let facts = ExtractionNormalizer::normalize_value(&loaded.url, loaded.extraction);
    let report = ctx.engine().score(&facts);
    ctx.emit(&loaded.url, &report, render::score_report)
}

pub fn quick(ctx: &CommandContext, file: &Path, url: Option<&str>) -> Result<()> {
    let loaded = input::load_extraction(file, url)?;
    let facts = ExtractionNormalizer::normalize_value(&loaded.url, loaded.extraction);
    let report = QuickCheck::from_page(&facts);
    ctx.emit(&loaded.url, &report, render::quick_report)
}

pub async fn batch(
    ctx: &CommandContext,
    urls_file: &Path,
    concurrency: Option<usize>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let urls = input::load_url_list(urls_file)?;
    let batch_settings = &ctx.settings.batch;
    let delay = delay_ms.unwrap_or(batch_settings.delay_between_requests);
    let throttle: Arc<dyn Throttle> = if delay == 0 {
        Arc::new(NoThrottle)
    } else {
        Arc::new(FixedDelay::from_millis(delay))
    };

    let report = BatchAnalyzer::new(ctx.analyzer()?)
        .with_throttle(throttle)
        .with_concurrency(concurrency.unwrap_or(batch_settings.concurrency))
        .run(&urls)
        .await;

    let identifier = format!("batch-{}", report.batch_id);
    ctx.emit(&identifier, &report, render::batch_report)
}
