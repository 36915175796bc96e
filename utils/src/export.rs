use chart_defs::{DiffReport, DiffStatistics};
use chrono::Local;

/// Top-N cutoff for the per-kind breakdown in export documents
const EXPORT_KIND_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Label of the older chart revision (e.g. "1.2.0" or a git ref)
    pub old_version: String,
    /// Label of the newer chart revision
    pub new_version: String,
    pub include_statistics: bool,
}

/// Plain-text export: header, optional statistics section, and the full
/// filtered diff body verbatim.
pub fn export_text(report: &DiffReport, options: &ExportOptions) -> String {
    let mut out = String::new();
    out.push_str("Chart Diff Report\n");
    out.push_str(&format!(
        "Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "Versions: {} -> {}\n",
        options.old_version, options.new_version
    ));
    out.push('\n');

    if options.include_statistics {
        if let Some(stats) = &report.statistics {
            out.push_str(&text_statistics(stats));
            out.push('\n');
        }
    }

    out.push_str("Diff\n");
    out.push_str("----\n");
    out.push_str(&report.filtered_text);
    out.push('\n');
    out
}

fn text_statistics(stats: &DiffStatistics) -> String {
    let mut out = String::new();
    out.push_str("Statistics\n");
    out.push_str("----------\n");
    out.push_str(&format!(
        "Resources: {} total ({} added, {} removed, {} modified, {} unchanged)\n",
        stats.summary.total_resources,
        stats.summary.resources_added,
        stats.summary.resources_removed,
        stats.summary.resources_modified,
        stats.summary.resources_unchanged,
    ));
    out.push_str(&format!("Change groups: {}\n", stats.summary.total_changes));
    out.push_str(&format!("Impact: {}\n", stats.impact.level));
    out.push_str(&format!(
        "Lines: +{} -{} ~{} ({} total)\n",
        stats.lines.added, stats.lines.removed, stats.lines.unchanged, stats.lines.total
    ));

    if !stats.by_kind.is_empty() {
        out.push_str("\nChanges by kind:\n");
        for entry in stats.by_kind.iter().take(EXPORT_KIND_LIMIT) {
            out.push_str(&format!("  {}: {}\n", entry.kind, entry.count));
        }
    }
    if !stats.impact.critical_changes.is_empty() {
        out.push_str("\nCritical changes:\n");
        for change in &stats.impact.critical_changes {
            out.push_str(&format!("  {}: {}\n", change.resource, change.field));
        }
    }
    if !stats.impact.breaking_changes.is_empty() {
        out.push_str("\nBreaking changes:\n");
        for change in &stats.impact.breaking_changes {
            out.push_str(&format!(
                "  {}: {} (severity: {})\n",
                change.resource, change.field, change.severity
            ));
        }
    }
    out
}

/// Markdown export with the same sections as the text format, diff body in
/// a fenced block.
pub fn export_markdown(report: &DiffReport, options: &ExportOptions) -> String {
    let mut out = String::new();
    out.push_str("# Chart Diff Report\n\n");
    out.push_str(&format!(
        "- **Generated**: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "- **Versions**: `{}` -> `{}`\n\n",
        options.old_version, options.new_version
    ));

    if options.include_statistics {
        if let Some(stats) = &report.statistics {
            out.push_str(&markdown_statistics(stats));
        }
    }

    out.push_str("## Diff\n\n");
    out.push_str("```diff\n");
    out.push_str(&report.filtered_text);
    out.push_str("\n```\n");
    out
}

fn markdown_statistics(stats: &DiffStatistics) -> String {
    let mut out = String::new();
    out.push_str("## Statistics\n\n");
    out.push_str("| Metric | Count |\n|---|---|\n");
    out.push_str(&format!(
        "| Total resources | {} |\n",
        stats.summary.total_resources
    ));
    out.push_str(&format!("| Added | {} |\n", stats.summary.resources_added));
    out.push_str(&format!(
        "| Removed | {} |\n",
        stats.summary.resources_removed
    ));
    out.push_str(&format!(
        "| Modified | {} |\n",
        stats.summary.resources_modified
    ));
    out.push_str(&format!(
        "| Unchanged | {} |\n",
        stats.summary.resources_unchanged
    ));
    out.push_str(&format!("| Impact | {} |\n", stats.impact.level));
    out.push_str(&format!(
        "| Lines | +{} / -{} / ~{} of {} |\n\n",
        stats.lines.added, stats.lines.removed, stats.lines.unchanged, stats.lines.total
    ));

    if !stats.by_kind.is_empty() {
        out.push_str("### Changes by kind\n\n");
        out.push_str("| Kind | Count |\n|---|---|\n");
        for entry in stats.by_kind.iter().take(EXPORT_KIND_LIMIT) {
            out.push_str(&format!("| {} | {} |\n", entry.kind, entry.count));
        }
        out.push('\n');
    }
    if !stats.impact.critical_changes.is_empty() {
        out.push_str("### Critical changes\n\n");
        for change in &stats.impact.critical_changes {
            out.push_str(&format!("- `{}`: {}\n", change.resource, change.field));
        }
        out.push('\n');
    }
    if !stats.impact.breaking_changes.is_empty() {
        out.push_str("### Breaking changes\n\n");
        for change in &stats.impact.breaking_changes {
            out.push_str(&format!(
                "- `{}`: {} (severity: {})\n",
                change.resource, change.field, change.severity
            ));
        }
        out.push('\n');
    }
    out
}

/// JSON export of the whole report, for the web layer.
pub fn export_json(report: &DiffReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
