// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod lifecycle;
pub mod service;
pub mod test_utils;

pub use domain::{ExtractionNormalizer, Grade, PageFacts, ScoreReport};
pub use error::{AppError, Result};
pub use service::{analyze_page, ScoringEngine};
