//! Rubric-based scoring of normalized page facts.
//!
//! This module provides two scorers:
//! - **Full**: `ScoringEngine`, the weighted rubric with issues and recommendations
//! - **Quick**: `QuickCheck`, a presence-only score over a reduced signal set
//!
//! Both are synchronous and pure.

mod engine;
mod quick;
mod rubric;

pub use engine::{severity_of, ScoringEngine, MAX_SCORE};
pub use quick::{QuickCheck, QuickFacts, QuickReport};
pub use rubric::{Check, LengthRange, Points, Rubric, RubricPreset, RubricWeights, Thresholds};
