use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use chart_defs::{DiffReport, FilterOptions};
use log::warn;

use crate::InputArgs;

/// Read the raw diff, assemble filter options and run the pipeline.
pub fn load_report(args: &InputArgs) -> Result<DiffReport> {
    let raw = read_input(&args.input)?;
    let options = build_options(args)?;
    if let Err(e) = options.validate() {
        // The pipeline skips a bad pattern on its own; surface it early
        warn!("{}", e);
    }
    Ok(chart_utils::process_diff(&raw, &options))
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read diff from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read diff file {}", path))
    }
}

/// Filter-file values form the base; command-line flags override them.
fn build_options(args: &InputArgs) -> Result<FilterOptions> {
    let mut options = match &args.filter_file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read filter file {}", path))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse filter file {}", path))?
        }
        None => FilterOptions::default(),
    };

    if args.ignore_labels {
        options.ignore_labels = true;
    }
    if let Some(mode) = &args.secret_handling {
        options.secret_handling = mode.parse()?;
    }
    if let Some(context_lines) = args.context_lines {
        options.context_lines = context_lines;
    }
    if !args.suppress_kinds.is_empty() {
        options.suppress_kinds = args.suppress_kinds.clone();
    }
    if let Some(pattern) = &args.suppress_regex {
        options.suppress_regex = Some(pattern.clone());
    }

    Ok(options)
}
