use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::PageExtractor;
use crate::config::ExtractorSettings;
use crate::domain::RawExtraction;
use crate::error::{AppError, Result};

const SERVICE: &str = "firecrawl";

const EXTRACTION_PROMPT: &str = "Analyze this webpage comprehensively for SEO. Extract:
1. All SEO meta tags (title, description, keywords, canonical, robots, etc.)
2. Complete heading hierarchy (H1-H6)
3. All images with alt text, titles, and dimensions
4. Internal and external links with anchor text
5. Social media meta tags (Open Graph, Twitter Cards)
6. Content metrics (word count, reading time, paragraphs)
7. Technical SEO elements (structured data, hreflang, breadcrumbs)

Provide detailed, accurate data for comprehensive SEO analysis.";

/// Client for a Firecrawl-compatible `/v1/scrape` endpoint.
pub struct FirecrawlExtractor {
    client: reqwest::Client,
    scrape_url: String,
    api_key: Option<String>,
    only_main_content: bool,
    max_age_ms: u64,
}

impl FirecrawlExtractor {
    pub fn new(settings: &ExtractorSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            scrape_url: format!("{}/v1/scrape", settings.endpoint.trim_end_matches('/')),
            api_key: settings.api_key.clone().filter(|key| !key.trim().is_empty()),
            only_main_content: settings.only_main_content,
            max_age_ms: settings.max_age_ms,
        })
    }

    fn request_body(&self, url: &str) -> Value {
        json!({
            "url": url,
            "formats": ["extract", "markdown"],
            "extract": {
                "schema": extraction_schema(),
                "prompt": EXTRACTION_PROMPT,
            },
            "onlyMainContent": self.only_main_content,
            "maxAge": self.max_age_ms,
        })
    }
}

#[async_trait]
impl PageExtractor for FirecrawlExtractor {
    async fn extract(&self, url: &str) -> Result<RawExtraction> {
        log::debug!("[EXTRACT] POST {} for {}", self.scrape_url, url);

        let mut request = self.client.post(&self.scrape_url).json(&self.request_body(url));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[EXTRACT] {} answered {} for {}", SERVICE, status, url);
            return Err(AppError::extraction(
                SERVICE,
                format!("HTTP {}: {}", status, body.trim()),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::extraction(SERVICE, format!("invalid JSON response: {}", e)))?;

        parse_scrape_response(body)
    }

    fn name(&self) -> &'static str {
        SERVICE
    }
}

/// Unwrap either the `{success, data: {...}}` envelope or a flat body.
fn parse_scrape_response(body: Value) -> Result<RawExtraction> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("service reported failure");
        return Err(AppError::extraction(SERVICE, message));
    }

    let payload = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => &body,
    };

    // newer API versions return the structured result under `json`
    let extract = payload
        .get("extract")
        .or_else(|| payload.get("json"))
        .filter(|value| value.is_object())
        .cloned()
        .ok_or_else(|| AppError::extraction(SERVICE, "response contained no extraction"))?;

    let raw = RawExtraction::from_value(extract);
    Ok(match payload.get("markdown").and_then(Value::as_str) {
        Some(markdown) => raw.with_fallback_word_count(markdown_word_count(markdown)),
        None => raw,
    })
}

/// Whitespace-separated token count of a markdown document.
pub fn markdown_word_count(markdown: &str) -> u32 {
    markdown.split_whitespace().count() as u32
}

fn extraction_schema() -> Value {
    let string = json!({ "type": "string" });
    let number = json!({ "type": "number" });
    let strings = json!({ "type": "array", "items": string });
    let link = json!({
        "type": "object",
        "properties": { "url": string, "text": string, "title": string }
    });

    json!({
        "type": "object",
        "properties": {
            "seo": {
                "type": "object",
                "properties": {
                    "title": string,
                    "metaDescription": string,
                    "metaKeywords": string,
                    "canonicalUrl": string,
                    "robots": string,
                    "viewport": string,
                    "charset": string,
                    "lang": string
                }
            },
            "headings": {
                "type": "object",
                "properties": {
                    "h1": strings, "h2": strings, "h3": strings,
                    "h4": strings, "h5": strings, "h6": strings
                }
            },
            "images": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "src": string, "alt": string, "title": string,
                        "width": number, "height": number
                    }
                }
            },
            "links": {
                "type": "object",
                "properties": {
                    "internal": { "type": "array", "items": link },
                    "external": { "type": "array", "items": link }
                }
            },
            "social": {
                "type": "object",
                "properties": {
                    "openGraph": {
                        "type": "object",
                        "properties": {
                            "title": string, "description": string, "image": string,
                            "url": string, "type": string, "siteName": string
                        }
                    },
                    "twitter": {
                        "type": "object",
                        "properties": {
                            "card": string, "title": string, "description": string,
                            "image": string, "creator": string, "site": string
                        }
                    }
                }
            },
            "content": {
                "type": "object",
                "properties": {
                    "wordCount": number,
                    "readingTime": number,
                    "paragraphs": number,
                    "sentences": number
                }
            },
            "technical": {
                "type": "object",
                "properties": {
                    "structuredData": { "type": "array" },
                    "hreflang": { "type": "array" },
                    "breadcrumbs": { "type": "array" },
                    "forms": number,
                    "iframes": number
                }
            }
        }
    })
}
