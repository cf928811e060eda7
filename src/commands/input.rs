//! Reading command inputs from disk.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// One URL per line. Blank lines and lines starting with `#` are skipped.
pub fn parse_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn load_url_list(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list {}", path.display()))?;
    let urls = parse_url_list(&contents);
    if urls.is_empty() {
        anyhow::bail!("{} contains no URLs", path.display());
    }
    Ok(urls)
}

/// A saved extraction plus the URL it belongs to.
pub struct ExtractionFile {
    pub url: String,
    pub extraction: Value,
}

/// Load an extraction JSON file. The URL comes from `url_override`, then a
/// top-level `"url"` string in the file, then the file path.
pub fn load_extraction(path: &Path, url_override: Option<&str>) -> Result<ExtractionFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let extraction: Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let url = url_override
        .map(str::to_string)
        .or_else(|| extraction.get("url").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| path.display().to_string());

    Ok(ExtractionFile { url, extraction })
}
