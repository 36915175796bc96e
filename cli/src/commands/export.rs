use anyhow::{bail, Context, Result};
use chart_defs::DiffReport;
use chart_utils::{export_json, export_markdown, export_text, ExportOptions};

/// Render an export document in the requested format, to stdout or a file.
pub fn handle_export(
    report: &DiffReport,
    format: &str,
    old_version: &str,
    new_version: &str,
    include_statistics: bool,
    output: Option<&str>,
) -> Result<()> {
    let options = ExportOptions {
        old_version: old_version.to_string(),
        new_version: new_version.to_string(),
        include_statistics,
    };

    let document = match format {
        "text" => export_text(report, &options),
        "markdown" => export_markdown(report, &options),
        "json" => export_json(report).context("Failed to serialize report")?,
        other => bail!(
            "Unknown export format '{}', expected text, markdown or json",
            other
        ),
    };

    match output {
        Some(path) => std::fs::write(path, document)
            .with_context(|| format!("Failed to write {}", path))?,
        None => print!("{}", document),
    }
    Ok(())
}
