//! Runtime settings, loaded from an optional TOML file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::service::scoring::{Rubric, RubricPreset, RubricWeights, Thresholds};
use crate::service::FailurePolicy;

pub const CONFIG_FILE_NAME: &str = "seo-scorer.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub extractor: ExtractorSettings,
    pub batch: BatchSettings,
    pub rubric: RubricSettings,
    pub reports_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extractor: ExtractorSettings::default(),
            batch: BatchSettings::default(),
            rubric: RubricSettings::default(),
            reports_dir: PathBuf::from("reports"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub only_main_content: bool,
    /// Maximum age of a cached scrape the service may return.
    pub max_age_ms: u64,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.firecrawl.dev".to_string(),
            api_key: None,
            timeout_secs: 60,
            only_main_content: true,
            max_age_ms: 3_600_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Minimum spacing between extraction calls, in milliseconds.
    pub delay_between_requests: u64,
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            delay_between_requests: 2000,
            concurrency: 1,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Rubric selection. `weights`, when given, replaces the preset's weights;
/// rows it leaves out fall back to the canonical table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricSettings {
    pub preset: RubricPreset,
    pub weights: Option<RubricWeights>,
    pub thresholds: Thresholds,
}

impl RubricSettings {
    pub fn to_rubric(&self) -> Rubric {
        Rubric {
            weights: self
                .weights
                .clone()
                .unwrap_or_else(|| self.preset.weights()),
            thresholds: self.thresholds,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A file that does not exist yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let settings = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(contents).context("Failed to parse settings")?;
        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.batch.concurrency == 0 {
            return Err(AppError::config("batch.concurrency must be at least 1"));
        }
        if self.extractor.timeout_secs == 0 {
            return Err(AppError::config("extractor.timeout_secs must be at least 1"));
        }
        url::Url::parse(&self.extractor.endpoint).map_err(|e| {
            AppError::config(format!("extractor.endpoint is not a valid URL: {}", e))
        })?;
        self.rubric
            .to_rubric()
            .validate()
            .map_err(|e| AppError::config(format!("rubric: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.batch.delay_between_requests, 2000);
        assert_eq!(settings.batch.concurrency, 1);
        assert_eq!(settings.batch.failure_policy, FailurePolicy::Placeholder);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
reports_dir = "out"

[batch]
concurrency = 4
failure_policy = "empty_facts"

[rubric]
preset = "extended"

[rubric.thresholds]
min_word_count = 500
"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.reports_dir, PathBuf::from("out"));
        assert_eq!(settings.batch.concurrency, 4);
        assert_eq!(settings.batch.delay_between_requests, 2000);
        assert_eq!(settings.batch.failure_policy, FailurePolicy::EmptyFacts);

        let rubric = settings.rubric.to_rubric();
        assert_eq!(rubric.weights, RubricWeights::extended());
        assert_eq!(rubric.thresholds.min_word_count, 500);
        assert_eq!(rubric.thresholds.title_length.max, 60);
        assert!(settings.extractor.only_main_content);
    }

    #[test]
    fn test_weight_overrides_replace_preset() {
        let settings = Settings::from_toml_str(
            "[rubric]\npreset = \"extended\"\n[rubric.weights]\nrobots = 0\n",
        )
        .unwrap();
        let weights = settings.rubric.to_rubric().weights;
        assert_eq!(weights.robots, 0);
        assert_eq!(weights.heading_hierarchy.full, 0);
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let err = Settings::from_toml_str("[batch]\nconcurrency = 0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("concurrency"));
    }

    #[test]
    fn test_inverted_threshold_is_rejected() {
        let err = Settings::from_toml_str(
            "[rubric.thresholds.title_length]\nmin = 80\nmax = 20\n",
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("title_length"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(Settings::from_toml_str("[batch\nconcurrency = ").is_err());
    }
}
