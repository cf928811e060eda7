//! Plain-text summaries for terminal output.

use std::fmt::Write;

use crate::domain::ScoreReport;
use crate::service::{BatchReport, QuickReport};

pub fn score_report(report: &ScoreReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "URL: {}", report.url);
    let _ = writeln!(out, "Overall Score: {}/100 ({})", report.overall_score, report.grade);
    let _ = writeln!(
        out,
        "H1: {}  H2: {}  Images: {}  Links: {}  Words: {}",
        report.h1_count, report.h2_count, report.image_count, report.link_count, report.word_count
    );

    if !report.issues.is_empty() {
        let _ = writeln!(out, "\nIssues:");
        for issue in &report.issues {
            let _ = writeln!(out, "  [{}] {}", issue.severity.as_str(), issue.message);
        }
    }

    if !report.recommendations.is_empty() {
        let _ = writeln!(out, "\nRecommendations:");
        for (i, rec) in report.recommendations.iter().enumerate() {
            let _ = writeln!(out, "  {}. (P{}) {} - {}", i + 1, rec.priority, rec.action, rec.impact);
        }
    }
    out
}

pub fn quick_report(report: &QuickReport) -> String {
    let facts = &report.facts;
    let mut out = String::new();
    let _ = writeln!(out, "URL: {}", report.url);
    let _ = writeln!(out, "Quick Score: {}/100 ({})", report.quick_score, report.grade);
    let _ = writeln!(out, "Title: {}", facts.title.as_deref().unwrap_or("No title"));
    let _ = writeln!(
        out,
        "Meta description: {}",
        facts.meta_description.as_deref().unwrap_or("No meta description")
    );
    let _ = writeln!(
        out,
        "H1: {}  Images: {}  Words: {}  Open Graph: {}  Twitter: {}",
        facts.h1_count,
        facts.image_count,
        facts.word_count,
        yes_no(facts.has_open_graph),
        yes_no(facts.has_twitter_cards)
    );
    out
}

pub fn batch_report(report: &BatchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Batch {}", report.batch_id);
    let _ = writeln!(
        out,
        "Analyzed: {}  Successful: {}  Failed: {}",
        report.total_urls, report.successful, report.failed
    );
    match report.average_score {
        Some(avg) => {
            let _ = writeln!(out, "Average Score: {:.1}", avg);
        }
        None => {
            let _ = writeln!(out, "Average Score: n/a");
        }
    }

    if !report.common_issues.is_empty() {
        let _ = writeln!(out, "\nCommon Issues:");
        for (i, issue) in report.common_issues.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {}: {} pages ({:.1}%)",
                i + 1,
                issue.kind,
                issue.count,
                issue.percentage
            );
        }
    }

    if let Some(top) = &report.top_performer {
        let _ = writeln!(out, "\nTop Performer: {} ({}/100)", top.url, top.score);
        if !top.strengths.is_empty() {
            let _ = writeln!(out, "Strengths: {}", top.strengths.join(", "));
        }
    }

    let _ = writeln!(out, "\nResults:");
    for entry in &report.results {
        match &entry.error {
            None => {
                let _ = writeln!(
                    out,
                    "  {:>3} {:<2} {}",
                    entry.report.overall_score, entry.report.grade, entry.url
                );
            }
            Some(error) => {
                let _ = writeln!(out, "  --- -- {} ({})", entry.url, error);
            }
        }
    }
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
