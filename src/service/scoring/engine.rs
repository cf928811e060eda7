//! Scoring engine - maps `PageFacts` to a `ScoreReport`.
//!
//! Each rubric row is evaluated independently and either passes, earns
//! partial credit, or fails. Any row that does not pass yields exactly one
//! issue and one recommendation.

use super::rubric::{Check, LengthRange, Rubric, RubricPreset, Thresholds};
use crate::domain::models::{
    Grade, Issue, IssueKind, PageFacts, Recommendation, ScoreReport, Severity,
};

pub const MAX_SCORE: u32 = 100;

/// Pure, deterministic scorer. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    rubric: Rubric,
}

/// Result of a single rubric row.
struct Outcome {
    points: u8,
    finding: Option<(IssueKind, String)>,
}

impl Outcome {
    fn pass(points: u8) -> Self {
        Self {
            points,
            finding: None,
        }
    }

    fn fail(points: u8, kind: IssueKind, message: String) -> Self {
        Self {
            points,
            finding: Some((kind, message)),
        }
    }
}

impl ScoringEngine {
    pub fn new(rubric: Rubric) -> Self {
        Self { rubric }
    }

    pub fn with_preset(preset: RubricPreset) -> Self {
        Self::new(Rubric::from_preset(preset))
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn score(&self, facts: &PageFacts) -> ScoreReport {
        let mut total: u32 = 0;
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        for check in Check::ALL {
            if check.max_points(&self.rubric.weights) == 0 {
                continue;
            }

            let outcome = self.evaluate(check, facts);
            total += outcome.points as u32;

            if let Some((kind, message)) = outcome.finding {
                issues.push(Issue {
                    kind,
                    message,
                    severity: severity_of(kind),
                });
                recommendations.push(recommend(kind, &self.rubric.thresholds));
            }
        }

        // stable: equal priorities keep rubric order
        recommendations.sort_by_key(|r| r.priority);

        let overall_score = total.min(MAX_SCORE) as u8;
        tracing::trace!(url = %facts.url, total, overall_score, "page scored");

        ScoreReport {
            url: facts.url.clone(),
            overall_score,
            grade: Grade::from_score(overall_score),
            issues,
            recommendations,
            h1_count: facts.headings.h1.len(),
            h2_count: facts.headings.h2.len(),
            image_count: facts.images.len(),
            link_count: facts.links.total(),
            word_count: facts.content.word_count,
            has_title: facts.seo.title.is_some(),
            has_meta_description: facts.seo.meta_description.is_some(),
            structured_data_count: facts.technical.structured_data.len(),
        }
    }

    fn evaluate(&self, check: Check, facts: &PageFacts) -> Outcome {
        let weights = &self.rubric.weights;
        let thresholds = &self.rubric.thresholds;

        match check {
            Check::Title => match facts.seo.title.as_deref() {
                None => Outcome::fail(0, IssueKind::MissingTitle, "Missing page title".into()),
                Some(title) => {
                    let len = title.chars().count();
                    if thresholds.title_length.contains(len) {
                        Outcome::pass(weights.title.full)
                    } else {
                        Outcome::fail(
                            weights.title.partial,
                            IssueKind::TitleLength,
                            length_message("Title", len, thresholds.title_length),
                        )
                    }
                }
            },
            Check::MetaDescription => match facts.seo.meta_description.as_deref() {
                None => Outcome::fail(
                    0,
                    IssueKind::MissingMetaDescription,
                    "Missing meta description".into(),
                ),
                Some(desc) => {
                    let len = desc.chars().count();
                    if thresholds.meta_description_length.contains(len) {
                        Outcome::pass(weights.meta_description.full)
                    } else {
                        Outcome::fail(
                            weights.meta_description.partial,
                            IssueKind::MetaDescriptionLength,
                            length_message(
                                "Meta description",
                                len,
                                thresholds.meta_description_length,
                            ),
                        )
                    }
                }
            },
            Check::H1 => match facts.headings.h1.len() {
                1 => Outcome::pass(weights.h1.full),
                0 => Outcome::fail(0, IssueKind::MissingH1, "Missing H1 tag".into()),
                n => Outcome::fail(
                    weights.h1.partial,
                    IssueKind::MultipleH1,
                    format!("Multiple H1 tags found ({}). Should have exactly one.", n),
                ),
            },
            Check::WordCount => {
                let words = facts.content.word_count;
                if words >= thresholds.min_word_count {
                    Outcome::pass(weights.word_count)
                } else {
                    Outcome::fail(
                        0,
                        IssueKind::ThinContent,
                        format!(
                            "Content too short ({} words). Aim for at least {} words.",
                            words, thresholds.min_word_count
                        ),
                    )
                }
            }
            Check::ImageAlt => {
                if facts.images.is_empty() {
                    return Outcome::fail(
                        0,
                        IssueKind::NoImages,
                        "No images found. Consider adding relevant images.".into(),
                    );
                }
                match facts.images_missing_alt() {
                    0 => Outcome::pass(weights.images.full),
                    missing => Outcome::fail(
                        weights.images.partial,
                        IssueKind::ImagesMissingAlt,
                        format!(
                            "{} of {} images missing alt text",
                            missing,
                            facts.images.len()
                        ),
                    ),
                }
            }
            Check::OpenGraph => gate(
                facts.social.open_graph.title.is_some(),
                weights.open_graph,
                IssueKind::MissingOpenGraph,
                "Missing Open Graph tags",
            ),
            Check::TwitterCard => gate(
                facts.social.twitter.card.is_some(),
                weights.twitter_card,
                IssueKind::MissingTwitterCard,
                "Missing Twitter Card tags",
            ),
            Check::Canonical => gate(
                facts.seo.canonical_url.is_some(),
                weights.canonical,
                IssueKind::MissingCanonical,
                "Missing canonical URL",
            ),
            Check::StructuredData => gate(
                !facts.technical.structured_data.is_empty(),
                weights.structured_data,
                IssueKind::MissingStructuredData,
                "No structured data found",
            ),
            Check::Robots => gate(
                facts.seo.robots.is_some(),
                weights.robots,
                IssueKind::MissingRobots,
                "Missing robots meta tag",
            ),
            Check::Links => {
                let internal = facts.links.internal.len();
                let external = facts.links.external.len();
                if internal > 0 && external > 0 {
                    Outcome::pass(weights.links.full)
                } else {
                    // a page with no links at all earns nothing
                    let points = if internal + external > 0 { weights.links.partial } else { 0 };
                    Outcome::fail(
                        points,
                        IssueKind::WeakLinking,
                        format!(
                            "Improve internal and external linking ({} internal, {} external)",
                            internal, external
                        ),
                    )
                }
            }
            Check::HeadingHierarchy => {
                let headings = &facts.headings;
                if headings.has_proper_hierarchy() {
                    Outcome::pass(weights.heading_hierarchy.full)
                } else {
                    let any = [
                        &headings.h1,
                        &headings.h2,
                        &headings.h3,
                        &headings.h4,
                        &headings.h5,
                        &headings.h6,
                    ]
                    .iter()
                    .any(|level| !level.is_empty());
                    let points = if any { weights.heading_hierarchy.partial } else { 0 };
                    Outcome::fail(
                        points,
                        IssueKind::HeadingHierarchy,
                        "Improve heading hierarchy (H1 > H2 > H3...)".into(),
                    )
                }
            }
        }
    }
}

fn gate(passed: bool, points: u8, kind: IssueKind, message: &str) -> Outcome {
    if passed {
        Outcome::pass(points)
    } else {
        Outcome::fail(0, kind, message.to_string())
    }
}

fn length_message(field: &str, len: usize, range: LengthRange) -> String {
    format!(
        "{} length ({} chars) should be between {}-{} characters",
        field, len, range.min, range.max
    )
}

/// Severity classification for each kind of finding.
pub fn severity_of(kind: IssueKind) -> Severity {
    match kind {
        IssueKind::MissingTitle
        | IssueKind::MissingMetaDescription
        | IssueKind::MissingH1
        | IssueKind::ExtractionFailed => Severity::Critical,
        IssueKind::TitleLength
        | IssueKind::MetaDescriptionLength
        | IssueKind::MultipleH1
        | IssueKind::ImagesMissingAlt => Severity::Warning,
        IssueKind::HeadingHierarchy => Severity::Warning,
        IssueKind::ThinContent
        | IssueKind::NoImages
        | IssueKind::MissingOpenGraph
        | IssueKind::MissingTwitterCard
        | IssueKind::MissingCanonical
        | IssueKind::MissingStructuredData
        | IssueKind::MissingRobots
        | IssueKind::WeakLinking => Severity::Suggestion,
    }
}

/// The actionable counterpart of a finding.
fn recommend(kind: IssueKind, thresholds: &Thresholds) -> Recommendation {
    let title = thresholds.title_length;
    let desc = thresholds.meta_description_length;

    let (priority, action, impact) = match kind {
        IssueKind::MissingTitle => (
            1,
            format!("Add a unique, descriptive page title ({}-{} characters)", title.min, title.max),
            "Critical for search visibility",
        ),
        IssueKind::MissingMetaDescription => (
            1,
            format!("Write a compelling meta description ({}-{} characters)", desc.min, desc.max),
            "Improves click-through rates from search results",
        ),
        IssueKind::MissingH1 => (
            1,
            "Add a single H1 tag with your primary keyword".to_string(),
            "Essential for content hierarchy and SEO",
        ),
        IssueKind::ExtractionFailed => (
            1,
            "Check that the URL is reachable and try again".to_string(),
            "No SEO data could be collected for this page",
        ),
        IssueKind::TitleLength => (
            2,
            format!("Adjust the page title to {}-{} characters", title.min, title.max),
            "Keeps the full title visible in search results",
        ),
        IssueKind::MetaDescriptionLength => (
            2,
            format!("Adjust the meta description to {}-{} characters", desc.min, desc.max),
            "Prevents truncated or thin search snippets",
        ),
        IssueKind::MultipleH1 => (
            2,
            "Keep exactly one H1 tag per page".to_string(),
            "Gives search engines a single clear topic",
        ),
        IssueKind::ImagesMissingAlt => (
            2,
            "Add descriptive alt text to all images".to_string(),
            "Improves accessibility and image search visibility",
        ),
        IssueKind::ThinContent => (
            2,
            format!("Expand content to at least {} words", thresholds.min_word_count),
            "Provides more context for search engines",
        ),
        IssueKind::NoImages => (
            3,
            "Add relevant images with descriptive alt text".to_string(),
            "Makes the page more engaging and eligible for image search",
        ),
        IssueKind::MissingOpenGraph => (
            3,
            "Add Open Graph tags (og:title, og:description, og:image)".to_string(),
            "Controls how the page looks when shared on social media",
        ),
        IssueKind::MissingTwitterCard => (
            3,
            "Add Twitter Card meta tags".to_string(),
            "Enables rich previews when shared on Twitter/X",
        ),
        IssueKind::MissingCanonical => (
            3,
            "Declare a canonical URL".to_string(),
            "Prevents duplicate content from splitting ranking signals",
        ),
        IssueKind::MissingStructuredData => (
            3,
            "Implement structured data (Schema.org)".to_string(),
            "Enables rich snippets in search results",
        ),
        IssueKind::MissingRobots => (
            3,
            "Add a robots meta tag stating indexing intent".to_string(),
            "Makes crawler behaviour explicit",
        ),
        IssueKind::WeakLinking => (
            3,
            "Link to related internal pages and authoritative external sources".to_string(),
            "Helps crawlers discover content and builds topical context",
        ),
        IssueKind::HeadingHierarchy => (
            3,
            "Nest headings in order (H1 > H2 > H3)".to_string(),
            "Clarifies document structure for readers and crawlers",
        ),
    };

    Recommendation {
        priority,
        action,
        impact: impact.to_string(),
    }
}
