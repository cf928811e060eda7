//! Quick check: a coarse score over a handful of presence signals.

use serde::{Deserialize, Serialize};

use crate::domain::models::{Grade, PageFacts};

/// The reduced signal set a quick check looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickFacts {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_count: u32,
    pub image_count: u32,
    pub word_count: u32,
    pub has_open_graph: bool,
    pub has_twitter_cards: bool,
}

impl From<&PageFacts> for QuickFacts {
    fn from(facts: &PageFacts) -> Self {
        Self {
            title: facts.seo.title.clone(),
            meta_description: facts.seo.meta_description.clone(),
            h1_count: facts.headings.h1.len() as u32,
            image_count: facts.images.len() as u32,
            word_count: facts.content.word_count,
            has_open_graph: facts.social.open_graph.title.is_some(),
            has_twitter_cards: facts.social.twitter.card.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReport {
    pub url: String,
    pub quick_score: u8,
    pub grade: Grade,
    #[serde(flatten)]
    pub facts: QuickFacts,
}

pub struct QuickCheck;

impl QuickCheck {
    const TITLE: u32 = 25;
    const META_DESCRIPTION: u32 = 25;
    const SINGLE_H1: u32 = 20;
    const WORD_COUNT: u32 = 15;
    const OPEN_GRAPH: u32 = 8;
    const TWITTER: u32 = 7;

    const MIN_WORDS: u32 = 300;

    pub fn score(facts: &QuickFacts) -> u8 {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|s| !s.trim().is_empty());

        let mut score = 0;
        if present(&facts.title) {
            score += Self::TITLE;
        }
        if present(&facts.meta_description) {
            score += Self::META_DESCRIPTION;
        }
        if facts.h1_count == 1 {
            score += Self::SINGLE_H1;
        }
        if facts.word_count >= Self::MIN_WORDS {
            score += Self::WORD_COUNT;
        }
        if facts.has_open_graph {
            score += Self::OPEN_GRAPH;
        }
        if facts.has_twitter_cards {
            score += Self::TWITTER;
        }
        score.min(100) as u8
    }

    pub fn run(url: impl Into<String>, facts: QuickFacts) -> QuickReport {
        let quick_score = Self::score(&facts);
        QuickReport {
            url: url.into(),
            quick_score,
            grade: Grade::from_score(quick_score),
            facts,
        }
    }

    pub fn from_page(facts: &PageFacts) -> QuickReport {
        Self::run(facts.url.clone(), QuickFacts::from(facts))
    }
}
