//! Page facts and score reports - the engine's input and output value objects

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ====== Normalized input: PageFacts ======

/// Fully defaulted view of an extraction result.
///
/// Optional strings are `None` when absent or blank, sequences are empty and
/// counters are zero. Scoring code never has to guard against missing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFacts {
    pub url: String,
    pub seo: SeoMeta,
    pub headings: Headings,
    pub images: Vec<Image>,
    pub links: Links,
    pub social: Social,
    pub content: ContentMetrics,
    pub technical: Technical,
}

impl PageFacts {
    /// Facts for a page nothing could be extracted from.
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn images_missing_alt(&self) -> usize {
        self.images.iter().filter(|img| !img.has_alt()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub robots: Option<String>,
    pub meta_keywords: Option<String>,
    pub viewport: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    /// H1 exists exactly once and H3s never appear without H2s.
    pub fn has_proper_hierarchy(&self) -> bool {
        self.h1.len() == 1 && (self.h3.is_empty() || !self.h2.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    /// Raw alt text, empty when the attribute was absent.
    pub alt: String,
    pub title: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Image {
    /// Empty and whitespace-only alt text both count as missing.
    pub fn has_alt(&self) -> bool {
        !self.alt.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkRef {
    pub url: String,
    pub text: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    pub internal: Vec<LinkRef>,
    pub external: Vec<LinkRef>,
}

impl Links {
    pub fn total(&self) -> usize {
        self.internal.len() + self.external.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
    pub site_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwitterCard {
    pub card: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub creator: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetrics {
    pub word_count: u32,
    pub reading_time: u32,
    pub paragraphs: u32,
    pub sentences: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technical {
    pub structured_data: Vec<Value>,
    pub hreflang: Vec<String>,
    pub breadcrumbs: Vec<String>,
    pub forms: u32,
    pub iframes: u32,
}

// ====== Enums ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Suggestion,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
        }
    }
}

/// What a rubric check found wrong with the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingTitle,
    TitleLength,
    MissingMetaDescription,
    MetaDescriptionLength,
    MissingH1,
    MultipleH1,
    ThinContent,
    NoImages,
    ImagesMissingAlt,
    MissingOpenGraph,
    MissingTwitterCard,
    MissingCanonical,
    MissingStructuredData,
    MissingRobots,
    WeakLinking,
    HeadingHierarchy,
    ExtractionFailed,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingTitle => "missing_title",
            IssueKind::TitleLength => "title_length",
            IssueKind::MissingMetaDescription => "missing_meta_description",
            IssueKind::MetaDescriptionLength => "meta_description_length",
            IssueKind::MissingH1 => "missing_h1",
            IssueKind::MultipleH1 => "multiple_h1",
            IssueKind::ThinContent => "thin_content",
            IssueKind::NoImages => "no_images",
            IssueKind::ImagesMissingAlt => "images_missing_alt",
            IssueKind::MissingOpenGraph => "missing_open_graph",
            IssueKind::MissingTwitterCard => "missing_twitter_card",
            IssueKind::MissingCanonical => "missing_canonical",
            IssueKind::MissingStructuredData => "missing_structured_data",
            IssueKind::MissingRobots => "missing_robots",
            IssueKind::WeakLinking => "weak_linking",
            IssueKind::HeadingHierarchy => "heading_hierarchy",
            IssueKind::ExtractionFailed => "extraction_failed",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade, a step function of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            50..=59 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ====== Output: ScoreReport ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: u8,
    pub action: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub url: String,
    pub overall_score: u8,
    pub grade: Grade,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
    pub h1_count: usize,
    pub h2_count: usize,
    pub image_count: usize,
    pub link_count: usize,
    pub word_count: u32,
    #[serde(default)]
    pub has_title: bool,
    #[serde(default)]
    pub has_meta_description: bool,
    #[serde(default)]
    pub structured_data_count: usize,
}

impl ScoreReport {
    /// Placeholder for a page the extraction service could not deliver.
    pub fn extraction_failed(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            url: url.into(),
            overall_score: 0,
            grade: Grade::F,
            issues: vec![Issue {
                kind: IssueKind::ExtractionFailed,
                message: format!("Unable to analyze this website: {}", reason),
                severity: Severity::Critical,
            }],
            recommendations: vec![Recommendation {
                priority: 1,
                action: "Check that the URL is reachable and try again".to_string(),
                impact: "No SEO data could be collected for this page".to_string(),
            }],
            h1_count: 0,
            h2_count: 0,
            image_count: 0,
            link_count: 0,
            word_count: 0,
            has_title: false,
            has_meta_description: false,
            structured_data_count: 0,
        }
    }

    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    pub fn count_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn is_extraction_failure(&self) -> bool {
        self.has_issue(IssueKind::ExtractionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_thresholds_are_exact_at_boundaries() {
        assert_eq!(Grade::from_score(100), Grade::APlus);
        assert_eq!(Grade::from_score(90), Grade::APlus);
        assert_eq!(Grade::from_score(89), Grade::A);
        assert_eq!(Grade::from_score(80), Grade::A);
        assert_eq!(Grade::from_score(79), Grade::B);
        assert_eq!(Grade::from_score(70), Grade::B);
        assert_eq!(Grade::from_score(69), Grade::C);
        assert_eq!(Grade::from_score(60), Grade::C);
        assert_eq!(Grade::from_score(59), Grade::D);
        assert_eq!(Grade::from_score(50), Grade::D);
        assert_eq!(Grade::from_score(49), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(serde_json::to_string(&Grade::F).unwrap(), "\"F\"");
    }

    #[test]
    fn whitespace_alt_counts_as_missing() {
        let img = |alt: &str| Image { src: "/a.png".into(), alt: alt.into(), ..Default::default() };
        assert!(!img("").has_alt());
        assert!(!img("   \t\n").has_alt());
        assert!(img("Logo").has_alt());
    }

    #[test]
    fn heading_hierarchy_requires_single_h1_and_h2_before_h3() {
        let mut headings = Headings { h1: vec!["Main".into()], ..Default::default() };
        assert!(headings.has_proper_hierarchy());

        headings.h3 = vec!["Orphan".into()];
        assert!(!headings.has_proper_hierarchy());

        headings.h2 = vec!["Section".into()];
        assert!(headings.has_proper_hierarchy());

        headings.h1.push("Second".into());
        assert!(!headings.has_proper_hierarchy());
    }

    #[test]
    fn placeholder_report_has_single_diagnostic_issue() {
        let report = ScoreReport::extraction_failed("https://example.com", "timeout");
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.grade, Grade::F);
        assert_eq!(report.issues.len(), 1);
        assert!(report.is_extraction_failure());
        assert!(report.issues[0].message.contains("timeout"));
    }

    #[test]
    fn report_json_uses_camel_case_fields() {
        let report = ScoreReport::extraction_failed("https://example.com", "boom");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["overallScore"], 0);
        assert_eq!(value["grade"], "F");
        assert_eq!(value["issues"][0]["kind"], "extraction_failed");
        assert_eq!(value["issues"][0]["severity"], "critical");
        assert!(value.get("h1Count").is_some());
    }
}
