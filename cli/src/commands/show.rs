use chart_defs::{DiffLine, DiffReport};
use colored::Colorize;

/// Print the filtered diff grouped by category, in rank order.
pub fn handle_show(report: &DiffReport) {
    if !report.has_changes {
        println!("No changes detected.");
        return;
    }

    for group in &report.categories {
        println!("{}", group.category.bold().underline());
        for change in &group.changes {
            let mut heading = format!("{}/{}", change.kind, change.name);
            if let Some(ns) = &change.namespace {
                heading.push_str(&format!(" (namespace: {})", ns));
            }
            println!("  {}", heading.cyan());
            for line in &change.lines {
                match DiffLine::classify(line) {
                    DiffLine::Addition => println!("    {}", line.green()),
                    DiffLine::Removal => println!("    {}", line.red()),
                    DiffLine::Header => println!("    {}", line.yellow()),
                    DiffLine::Context => println!("    {}", line),
                }
            }
            println!();
        }
    }
}
