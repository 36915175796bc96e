use chart_defs::{DiffReport, ImpactLevel};
use colored::Colorize;
use prettytable::{row, Table};

/// Print summary statistics: totals, impact, per-kind and per-category
/// breakdowns, flagged changes.
pub fn handle_stats(report: &DiffReport) {
    let Some(stats) = &report.statistics else {
        println!("No changes detected.");
        return;
    };

    let impact = match stats.impact.level {
        ImpactLevel::High => "high".red().bold(),
        ImpactLevel::Medium => "medium".yellow(),
        ImpactLevel::Low => "low".green(),
    };
    println!("Impact: {}", impact);
    println!(
        "Lines: +{} -{} ~{} ({} total)",
        stats.lines.added, stats.lines.removed, stats.lines.unchanged, stats.lines.total
    );
    println!();

    let mut summary = Table::new();
    summary.add_row(row!["Total resources", stats.summary.total_resources]);
    summary.add_row(row!["Added", stats.summary.resources_added]);
    summary.add_row(row!["Removed", stats.summary.resources_removed]);
    summary.add_row(row!["Modified", stats.summary.resources_modified]);
    summary.add_row(row!["Unchanged", stats.summary.resources_unchanged]);
    summary.add_row(row!["Change groups", stats.summary.total_changes]);
    summary.printstd();

    if !stats.by_kind.is_empty() {
        println!();
        let mut table = Table::new();
        table.add_row(row!["Kind", "Count", "Added", "Removed", "Modified"]);
        for entry in &stats.by_kind {
            table.add_row(row![
                entry.kind,
                entry.count,
                entry.added,
                entry.removed,
                entry.modified
            ]);
        }
        table.printstd();
    }

    if !stats.by_category.is_empty() {
        println!();
        let mut table = Table::new();
        table.add_row(row!["Category", "Resources"]);
        for entry in &stats.by_category {
            table.add_row(row![entry.category, entry.count]);
        }
        table.printstd();
    }

    if !stats.impact.critical_changes.is_empty() {
        println!("\n{}", "Critical changes:".yellow().bold());
        for change in &stats.impact.critical_changes {
            println!("  {}: {}", change.resource, change.field);
        }
    }
    if !stats.impact.breaking_changes.is_empty() {
        println!("\n{}", "Breaking changes:".red().bold());
        for change in &stats.impact.breaking_changes {
            println!(
                "  {}: {} (severity: {})",
                change.resource, change.field, change.severity
            );
        }
    }
}
