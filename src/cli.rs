use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CONFIG_FILE_NAME;
use crate::service::scoring::RubricPreset;

/// Heuristic SEO scoring for web pages
///
/// Scores a page's extracted SEO data against a weighted rubric and prints a
/// grade, the issues found and prioritized recommendations.
#[derive(Debug, Parser)]
#[command(name = "seo-scorer", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (missing file means defaults)
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Rubric preset, replacing any configured weights
    #[arg(long, global = true, value_enum)]
    pub preset: Option<RubricPreset>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also save each report under the configured reports directory
    #[arg(long, global = true)]
    pub save: bool,

    /// API key for the extraction service
    #[arg(long, global = true, env = "FIRECRAWL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Trace-level logging for this crate
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract and score a live URL
    Analyze {
        /// Page to analyze
        url: String,
    },

    /// Score an extraction result saved as JSON
    Score {
        /// JSON file holding the extraction
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// URL to report (defaults to the file's "url" field, then its path)
        #[arg(long)]
        url: Option<String>,
    },

    /// Presence-only quick score of an extraction saved as JSON
    Quick {
        /// JSON file holding the extraction
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// URL to report (defaults to the file's "url" field, then its path)
        #[arg(long)]
        url: Option<String>,
    },

    /// Analyze every URL in a file and compare the results
    Batch {
        /// One URL per line; blank lines and '#' comments are skipped
        #[arg(value_name = "URLS_FILE")]
        urls_file: PathBuf,

        /// Pages analyzed at once (overrides batch.concurrency)
        #[arg(long)]
        concurrency: Option<usize>,

        /// Milliseconds between extraction calls (overrides batch.delay_between_requests)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}
