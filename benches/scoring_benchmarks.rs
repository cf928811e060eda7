// benches/scoring_benchmarks.rs
use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::{hint::black_box, sync::Arc, time::Duration};
use tokio::runtime::Runtime;

use async_trait::async_trait;
use seo_scorer::{
    analyze_page,
    domain::RawExtraction,
    extractor::PageExtractor,
    service::{BatchAnalyzer, PageAnalyzer, RubricPreset},
    ExtractionNormalizer, ScoringEngine,
};

fn sample_extraction() -> serde_json::Value {
    let images: Vec<serde_json::Value> = (0..40)
        .map(|i| {
            let alt = if i % 3 == 0 { "" } else { "Tool" };
            json!({ "src": format!("/img/{}.jpg", i), "alt": alt })
        })
        .collect();
    let internal: Vec<serde_json::Value> = (0..60)
        .map(|i| json!({ "url": format!("/p/{}", i) }))
        .collect();

    json!({
        "seo": {
            "title": "Acme Widgets | Handmade Tools for Your Workshop",
            "metaDescription": "Acme builds durable, handmade workshop tools from recycled steel. Browse chisels, planes and mallets, each one tested by craftspeople before it ships.",
            "canonicalUrl": "https://acme.test/",
            "robots": "index, follow"
        },
        "headings": { "h1": ["Handmade Tools"], "h2": ["Why Acme", "Process"] },
        "images": images,
        "links": { "internal": internal, "external": [ { "url": "https://example.org" } ] },
        "social": { "openGraph": { "title": "Acme" }, "twitter": { "card": "summary" } },
        "content": { "wordCount": 1200 },
        "technical": { "structuredData": [ { "@type": "Organization" } ] }
    })
}

struct InMemoryExtractor(serde_json::Value);

#[async_trait]
impl PageExtractor for InMemoryExtractor {
    async fn extract(&self, _url: &str) -> seo_scorer::Result<RawExtraction> {
        Ok(RawExtraction::from_value(self.0.clone()))
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

fn bench_scoring(c: &mut Criterion) {
    let raw = sample_extraction();
    let facts = ExtractionNormalizer::normalize_value("https://acme.test/", raw.clone());
    let canonical = ScoringEngine::default();
    let extended = ScoringEngine::with_preset(RubricPreset::Extended);

    c.bench_function("normalize", |b| {
        b.iter(|| ExtractionNormalizer::normalize_value("https://acme.test/", black_box(raw.clone())))
    });
    c.bench_function("score_canonical", |b| b.iter(|| canonical.score(black_box(&facts))));
    c.bench_function("score_extended", |b| b.iter(|| extended.score(black_box(&facts))));
    c.bench_function("analyze_page", |b| {
        b.iter(|| analyze_page("https://acme.test/", black_box(raw.clone())))
    });
}

fn bench_batch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let analyzer = PageAnalyzer::new(
        Arc::new(InMemoryExtractor(sample_extraction())),
        ScoringEngine::default(),
    );
    let batch = BatchAnalyzer::new(analyzer).with_concurrency(8);
    let urls: Vec<String> = (0..100).map(|i| format!("https://acme.test/p/{}", i)).collect();

    c.bench_function("batch_100_unthrottled", |b| {
        b.to_async(&rt).iter(|| async { black_box(batch.run(&urls).await) });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5));
    targets = bench_scoring, bench_batch
}

criterion_main!(benches);
