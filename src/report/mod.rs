//! Turns a [`ScanResult`] into something a person can read.
//!
//! The scanner knows nothing about these formats; the binary hands its
//! result here once the scan is over.
use crate::aggregate::{ProbeOutcome, ScanResult};
use colored::Colorize;
use itertools::Itertools;

pub mod html;

pub use html::{render_html, write_html_report};

const SEPARATOR: &str = "--------------------------------";

/// One report line for an outcome, without colour.
///
/// A probe that failed reads the same as a profile that does not exist.
pub fn outcome_line(outcome: &ProbeOutcome) -> String {
    match (&outcome.url, outcome.exists) {
        (Some(url), true) => format!("FOUND | {}: {url}", outcome.platform_name),
        _ => format!("Not Found | {}", outcome.platform_name),
    }
}

/// Plain text report: one line per platform, then the total.
pub fn render_text(result: &ScanResult) -> String {
    let mut report = String::new();
    for outcome in &result.outcomes {
        report.push_str(&outcome_line(outcome));
        report.push('\n');
    }
    report.push('\n');
    report.push_str(SEPARATOR);
    report.push('\n');
    report.push_str(&format!("Total Profiles Found: {}\n", result.total_found));
    report
}

/// Coloured terminal report. Falls back to [`render_text`] when accessible.
pub fn render_terminal(result: &ScanResult, accessible: bool) -> String {
    if accessible {
        return render_text(result);
    }

    let mut report = String::new();
    for outcome in &result.outcomes {
        let line = match (&outcome.url, outcome.exists) {
            (Some(url), true) => format!(
                "{} | {}: {}",
                "✔ FOUND".green().bold(),
                outcome.platform_name,
                url.cyan()
            ),
            _ => format!("{} | {}", "❌ Not Found".red(), outcome.platform_name),
        };
        report.push_str(&line);
        report.push('\n');
    }
    report.push('\n');
    report.push_str(SEPARATOR);
    report.push('\n');
    report.push_str(&format!(
        "Total Profiles Found: {}\n",
        result.total_found.to_string().green()
    ));
    report
}

/// Greppable form: `subject -> [url,url]`.
pub fn render_greppable(result: &ScanResult) -> String {
    let urls = result
        .found()
        .filter_map(|outcome| outcome.url.as_deref())
        .join(",");
    format!("{} -> [{urls}]", result.subject)
}
