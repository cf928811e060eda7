//! Adapter layer for converting raw extraction results into `PageFacts`.
//!
//! Every conversion here is total: absent or null values become the canonical
//! empty value of their type (`None`, empty vec, 0).

use serde_json::Value;

use crate::domain::extraction::{
    RawContent, RawExtraction, RawHeadings, RawImage, RawLink, RawLinks, RawOpenGraph, RawSeo,
    RawSocial, RawTechnical, RawTwitter,
};
use crate::domain::models::{
    ContentMetrics, Headings, Image, LinkRef, Links, OpenGraph, PageFacts, SeoMeta, Social,
    Technical, TwitterCard,
};

/// Fills in defaults for a raw extraction.
pub struct ExtractionNormalizer;

impl ExtractionNormalizer {
    pub fn normalize(url: &str, raw: RawExtraction) -> PageFacts {
        PageFacts {
            url: url.to_string(),
            seo: raw.seo.map(SeoMeta::from).unwrap_or_default(),
            headings: raw.headings.map(Headings::from).unwrap_or_default(),
            images: raw
                .images
                .unwrap_or_default()
                .into_iter()
                .map(Image::from)
                .collect(),
            links: raw.links.map(Links::from).unwrap_or_default(),
            social: raw.social.map(Social::from).unwrap_or_default(),
            content: raw.content.map(ContentMetrics::from).unwrap_or_default(),
            technical: raw.technical.map(Technical::from).unwrap_or_default(),
        }
    }

    /// Normalize straight from JSON, whatever its shape.
    pub fn normalize_value(url: &str, value: Value) -> PageFacts {
        Self::normalize(url, RawExtraction::from_value(value))
    }
}

// ============================================================================
// FIELD HELPERS
// ============================================================================

/// Trimmed text, or `None` when nothing is left.
fn text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Text kept as delivered, or `None` when it is blank. Rubric lengths are
/// measured on this form.
fn measured_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn count(value: Option<f64>) -> u32 {
    value.map(|v| v.max(0.0).round() as u32).unwrap_or(0)
}

fn dimension(value: Option<f64>) -> Option<u32> {
    value.filter(|v| *v > 0.0).map(|v| v.round() as u32)
}

fn texts(values: Option<Vec<String>>) -> Vec<String> {
    values.unwrap_or_default()
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<RawSeo> for SeoMeta {
    fn from(raw: RawSeo) -> Self {
        Self {
            title: measured_text(raw.title),
            meta_description: measured_text(raw.meta_description),
            canonical_url: text(raw.canonical_url),
            robots: text(raw.robots),
            meta_keywords: text(raw.meta_keywords),
            viewport: text(raw.viewport),
            lang: text(raw.lang),
        }
    }
}

impl From<RawHeadings> for Headings {
    fn from(raw: RawHeadings) -> Self {
        Self {
            h1: texts(raw.h1),
            h2: texts(raw.h2),
            h3: texts(raw.h3),
            h4: texts(raw.h4),
            h5: texts(raw.h5),
            h6: texts(raw.h6),
        }
    }
}

impl From<RawImage> for Image {
    fn from(raw: RawImage) -> Self {
        Self {
            src: raw.src.unwrap_or_default(),
            // alt is kept verbatim; blank detection belongs to the rubric
            alt: raw.alt.unwrap_or_default(),
            title: text(raw.title),
            width: dimension(raw.width),
            height: dimension(raw.height),
        }
    }
}

impl From<RawLink> for LinkRef {
    fn from(raw: RawLink) -> Self {
        Self {
            url: raw.url.unwrap_or_default(),
            text: text(raw.text),
            title: text(raw.title),
        }
    }
}

impl From<RawLinks> for Links {
    fn from(raw: RawLinks) -> Self {
        let convert = |links: Option<Vec<RawLink>>| -> Vec<LinkRef> {
            links
                .unwrap_or_default()
                .into_iter()
                .map(LinkRef::from)
                .collect()
        };
        Self {
            internal: convert(raw.internal),
            external: convert(raw.external),
        }
    }
}

impl From<RawOpenGraph> for OpenGraph {
    fn from(raw: RawOpenGraph) -> Self {
        Self {
            title: text(raw.title),
            description: text(raw.description),
            image: text(raw.image),
            url: text(raw.url),
            og_type: text(raw.og_type),
            site_name: text(raw.site_name),
        }
    }
}

impl From<RawTwitter> for TwitterCard {
    fn from(raw: RawTwitter) -> Self {
        Self {
            card: text(raw.card),
            title: text(raw.title),
            description: text(raw.description),
            image: text(raw.image),
            creator: text(raw.creator),
            site: text(raw.site),
        }
    }
}

impl From<RawSocial> for Social {
    fn from(raw: RawSocial) -> Self {
        Self {
            open_graph: raw.open_graph.map(OpenGraph::from).unwrap_or_default(),
            twitter: raw.twitter.map(TwitterCard::from).unwrap_or_default(),
        }
    }
}

impl From<RawContent> for ContentMetrics {
    fn from(raw: RawContent) -> Self {
        Self {
            word_count: count(raw.word_count),
            reading_time: count(raw.reading_time),
            paragraphs: count(raw.paragraphs),
            sentences: count(raw.sentences),
        }
    }
}

impl From<RawTechnical> for Technical {
    fn from(raw: RawTechnical) -> Self {
        Self {
            structured_data: raw
                .structured_data
                .unwrap_or_default()
                .into_iter()
                .filter(|entry| !entry.is_null())
                .collect(),
            hreflang: texts(raw.hreflang),
            breadcrumbs: texts(raw.breadcrumbs),
            forms: count(raw.forms),
            iframes: count(raw.iframes),
        }
    }
}
