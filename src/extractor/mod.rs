//! Page extraction collaborators.
//!
//! Fetching and rendering a page is delegated to an external service that
//! returns structured SEO data. The scorer only depends on the
//! `PageExtractor` trait, so tests and alternative services plug in here.

mod firecrawl;

pub use firecrawl::{markdown_word_count, FirecrawlExtractor};

use async_trait::async_trait;

use crate::domain::RawExtraction;
use crate::error::Result;

/// Strategy trait for obtaining a raw extraction for one URL.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Fetch the page and return whatever structured data the service found.
    async fn extract(&self, url: &str) -> Result<RawExtraction>;

    /// Human-readable name for this extractor.
    fn name(&self) -> &'static str;
}
