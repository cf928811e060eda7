//! Shared test utilities and fixtures
//!
//! This module provides common test helpers to reduce duplication
//! and make tests more robust against implementation changes.


/// Helper assertions for tests
#[cfg(test)]
pub mod assertions {
    use crate::domain::{IssueKind, ScoreReport};

    /// Checks if a report contains a specific issue kind
    pub fn has_issue(report: &ScoreReport, kind: IssueKind) -> bool {
        report.has_issue(kind)
    }

    /// Finds the message for an issue kind, if present
    pub fn issue_message(report: &ScoreReport, kind: IssueKind) -> Option<&str> {
        report
            .issues
            .iter()
            .find(|i| i.kind == kind)
            .map(|i| i.message.as_str())
    }

    /// Asserts that a report contains the expected issue
    #[macro_export]
    macro_rules! assert_has_issue {
        ($report:expr, $kind:expr) => {
            assert!(
                $crate::test_utils::assertions::has_issue($report, $kind),
                "Expected to find issue '{}' but it was not present",
                $kind
            );
        };
    }

    /// Asserts that a report does NOT contain the specified issue
    #[macro_export]
    macro_rules! assert_no_issue {
        ($report:expr, $kind:expr) => {
            assert!(
                !$crate::test_utils::assertions::has_issue($report, $kind),
                "Expected NOT to find issue '{}' but it was present",
                $kind
            );
        };
    }
}

/// In-process extractors standing in for the extraction service
#[cfg(test)]
pub mod mocks {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::domain::RawExtraction;
    use crate::error::{AppError, Result};
    use crate::extractor::PageExtractor;

    /// Returns the same payload for every URL and counts calls.
    pub struct StaticExtractor {
        payload: Value,
        calls: AtomicUsize,
    }

    impl StaticExtractor {
        pub fn new(payload: Value) -> Self {
            Self {
                payload,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageExtractor for StaticExtractor {
        async fn extract(&self, _url: &str) -> Result<RawExtraction> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawExtraction::from_value(self.payload.clone()))
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    /// Always fails as if the service were unreachable.
    pub struct FailingExtractor;

    #[async_trait]
    impl PageExtractor for FailingExtractor {
        async fn extract(&self, _url: &str) -> Result<RawExtraction> {
            Err(AppError::network("connection refused"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// Per-URL payloads; unknown URLs fail.
    #[derive(Default)]
    pub struct RoutedExtractor {
        routes: HashMap<String, Value>,
    }

    impl RoutedExtractor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(mut self, url: &str, payload: Value) -> Self {
            self.routes.insert(url.to_string(), payload);
            self
        }
    }

    #[async_trait]
    impl PageExtractor for RoutedExtractor {
        async fn extract(&self, url: &str) -> Result<RawExtraction> {
            self.routes
                .get(url)
                .cloned()
                .map(RawExtraction::from_value)
                .ok_or_else(|| AppError::extraction("routed", format!("no page at {}", url)))
        }

        fn name(&self) -> &'static str {
            "routed"
        }
    }
}
