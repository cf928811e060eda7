//! The rubric table: which checks run, what they are worth, and the
//! thresholds they compare against.

use serde::{Deserialize, Serialize};

/// Points for a check that can award partial credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    pub full: u8,
    pub partial: u8,
}

impl Points {
    pub const fn new(full: u8, partial: u8) -> Self {
        Self { full, partial }
    }
}

/// Weights for every rubric row. A row with a maximum of 0 is not evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricWeights {
    pub title: Points,
    pub meta_description: Points,
    pub h1: Points,
    pub word_count: u8,
    pub images: Points,
    pub open_graph: u8,
    pub twitter_card: u8,
    pub canonical: u8,
    pub structured_data: u8,
    pub robots: u8,
    pub links: Points,
    pub heading_hierarchy: Points,
}

impl Default for RubricWeights {
    fn default() -> Self {
        Self {
            title: Points::new(15, 5),
            meta_description: Points::new(15, 5),
            h1: Points::new(10, 5),
            word_count: 15,
            images: Points::new(10, 5),
            open_graph: 5,
            twitter_card: 5,
            canonical: 5,
            structured_data: 5,
            robots: 5,
            links: Points::new(10, 5),
            heading_hierarchy: Points::new(0, 0),
        }
    }
}

impl RubricWeights {
    /// Variant that trades technical and link points for a heading
    /// hierarchy check.
    pub fn extended() -> Self {
        Self {
            canonical: 3,
            structured_data: 4,
            robots: 3,
            links: Points::new(5, 2),
            heading_hierarchy: Points::new(10, 5),
            ..Self::default()
        }
    }

    fn partial_rows(&self) -> [(&'static str, Points); 6] {
        [
            ("title", self.title),
            ("meta_description", self.meta_description),
            ("h1", self.h1),
            ("images", self.images),
            ("links", self.links),
            ("heading_hierarchy", self.heading_hierarchy),
        ]
    }
}

/// Inclusive character-length range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub title_length: LengthRange,
    pub meta_description_length: LengthRange,
    pub min_word_count: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            title_length: LengthRange::new(30, 60),
            meta_description_length: LengthRange::new(120, 160),
            min_word_count: 300,
        }
    }
}

/// Named weight sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RubricPreset {
    #[default]
    Canonical,
    Extended,
}

impl RubricPreset {
    pub fn weights(&self) -> RubricWeights {
        match self {
            RubricPreset::Canonical => RubricWeights::default(),
            RubricPreset::Extended => RubricWeights::extended(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    pub weights: RubricWeights,
    pub thresholds: Thresholds,
}

impl Rubric {
    pub fn from_preset(preset: RubricPreset) -> Self {
        Self {
            weights: preset.weights(),
            thresholds: Thresholds::default(),
        }
    }

    /// Sum of full-credit points over every row.
    pub fn max_points(&self) -> u32 {
        Check::ALL
            .iter()
            .map(|check| check.max_points(&self.weights) as u32)
            .sum()
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, points) in self.weights.partial_rows() {
            if points.partial > points.full {
                return Err(format!(
                    "{} partial credit ({}) exceeds full credit ({})",
                    name, points.partial, points.full
                ));
            }
        }
        for (name, range) in [
            ("title_length", self.thresholds.title_length),
            ("meta_description_length", self.thresholds.meta_description_length),
        ] {
            if range.min > range.max {
                return Err(format!(
                    "{} minimum ({}) is greater than maximum ({})",
                    name, range.min, range.max
                ));
            }
        }
        Ok(())
    }
}

/// One row of the rubric, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    Title,
    MetaDescription,
    H1,
    WordCount,
    ImageAlt,
    OpenGraph,
    TwitterCard,
    Canonical,
    StructuredData,
    Robots,
    Links,
    HeadingHierarchy,
}

impl Check {
    pub const ALL: [Check; 12] = [
        Check::Title,
        Check::MetaDescription,
        Check::H1,
        Check::WordCount,
        Check::ImageAlt,
        Check::OpenGraph,
        Check::TwitterCard,
        Check::Canonical,
        Check::StructuredData,
        Check::Robots,
        Check::Links,
        Check::HeadingHierarchy,
    ];

    pub fn max_points(&self, weights: &RubricWeights) -> u8 {
        match self {
            Check::Title => weights.title.full,
            Check::MetaDescription => weights.meta_description.full,
            Check::H1 => weights.h1.full,
            Check::WordCount => weights.word_count,
            Check::ImageAlt => weights.images.full,
            Check::OpenGraph => weights.open_graph,
            Check::TwitterCard => weights.twitter_card,
            Check::Canonical => weights.canonical,
            Check::StructuredData => weights.structured_data,
            Check::Robots => weights.robots,
            Check::Links => weights.links.full,
            Check::HeadingHierarchy => weights.heading_hierarchy.full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_presets_sum_to_one_hundred() {
        assert_eq!(Rubric::from_preset(RubricPreset::Canonical).max_points(), 100);
        assert_eq!(Rubric::from_preset(RubricPreset::Extended).max_points(), 100);
    }

    #[test]
    fn canonical_preset_skips_heading_hierarchy() {
        let weights = RubricPreset::Canonical.weights();
        assert_eq!(Check::HeadingHierarchy.max_points(&weights), 0);
    }

    #[test]
    fn partial_credit_above_full_is_rejected() {
        let mut rubric = Rubric::default();
        rubric.weights.links = Points::new(4, 6);
        let err = rubric.validate().unwrap_err();
        assert!(err.contains("links"));
    }

    #[test]
    fn inverted_length_range_is_rejected() {
        let mut rubric = Rubric::default();
        rubric.thresholds.title_length = LengthRange::new(70, 10);
        assert!(rubric.validate().unwrap_err().contains("title_length"));
        assert!(Rubric::default().validate().is_ok());
    }

    #[test]
    fn partial_weight_override_keeps_canonical_defaults() {
        let weights: RubricWeights = toml::from_str("robots = 0\nword_count = 20").unwrap();
        assert_eq!(weights.robots, 0);
        assert_eq!(weights.word_count, 20);
        assert_eq!(weights.title, Points::new(15, 5));
    }
}
