//! Self-contained HTML report.
use crate::aggregate::ScanResult;
use anyhow::Context;
use chrono::{DateTime, Local};
use log::info;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const STYLE: &str = "\
body { font-family: Arial; margin: 20px; background: #f5f5f5; }
h1 { color: #2b5797; }
h3 { color: #333; }
pre { background: #eee; padding: 10px; border-radius: 5px; white-space: pre-wrap; word-wrap: break-word; }
.box { border: 1px solid #ccc; padding: 10px; margin-bottom: 15px; background: white; }
a { color: #1a0dab; text-decoration: none; }
a:hover { text-decoration: underline; }";

/// Escapes text for use in HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders one box per scan. Found profile URLs become links.
pub fn render_html(results: &[ScanResult], generated: DateTime<Local>) -> String {
    let mut page = String::new();
    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>CyberEye OSINT Report</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <h1>CyberEye OSINT Report</h1>\n<small>Generated: {}</small>\n<hr>\n",
        generated.format("%Y-%m-%d %H:%M:%S")
    );

    for (idx, result) in results.iter().enumerate() {
        let _ = write!(
            page,
            "<div class='box'><h3>Username {}: {}</h3><pre>",
            idx + 1,
            escape(&result.subject)
        );
        for outcome in &result.outcomes {
            let platform = escape(&outcome.platform_name);
            match (&outcome.url, outcome.exists) {
                (Some(url), true) => {
                    let url = escape(url);
                    let _ = writeln!(
                        page,
                        "✅ FOUND | {platform}: <a href=\"{url}\" target=\"_blank\">{url}</a>"
                    );
                }
                _ => {
                    let _ = writeln!(page, "❌ Not Found | {platform}");
                }
            }
        }
        let _ = write!(
            page,
            "\n--------------------------------\nTotal Profiles Found: {}\n</pre></div>\n",
            result.total_found
        );
    }

    page.push_str("</body>\n</html>\n");
    page
}

/// Writes the report into `dir`, creating it if needed, and returns the
/// path of the new file.
pub fn write_html_report(dir: &Path, results: &[ScanResult]) -> anyhow::Result<PathBuf> {
    let generated = Local::now();
    fs::create_dir_all(dir)
        .with_context(|| format!("Could not create report directory {}", dir.display()))?;

    let path = dir.join(format!(
        "cybereye_report_{}.html",
        generated.format("%Y%m%d_%H%M%S")
    ));
    fs::write(&path, render_html(results, generated))
        .with_context(|| format!("Could not write report {}", path.display()))?;

    info!("HTML report written to {}", path.display());
    Ok(path)
}
