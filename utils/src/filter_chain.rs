use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chart_defs::{DiffLine, FilterOptions, ResourceChange, SecretHandling};
use log::warn;
use regex::Regex;

use crate::segmenter::HeaderPattern;

/// Matches `data: <value>` / `value: <value>` lines, keeping the diff
/// marker and indentation so replacements preserve the line shape.
const SECRET_LINE_PATTERN: &str = r"^(?P<prefix>[+\- ]?\s*)(?P<key>data|value):\s+(?P<value>\S.*)$";

/// Apply the text-level filter passes in order: metadata suppression, kind
/// suppression, regex suppression, secret handling. Runs on the flattened
/// text BEFORE re-segmentation so filtered content reaches neither the
/// display nor the statistics.
pub fn apply_text_filters(raw: &str, options: &FilterOptions) -> String {
    let mut text = raw.to_string();

    if options.ignore_labels {
        text = strip_metadata_blocks(&text);
    }
    if !options.suppress_kinds.is_empty() {
        text = strip_suppressed_kinds(&text, options);
    }
    if let Some(pattern) = &options.suppress_regex {
        text = strip_matching_lines(&text, pattern);
    }
    match options.secret_handling {
        SecretHandling::Suppress => text = redact_secret_values(&text),
        SecretHandling::Decode => text = decode_secret_values(&text),
        SecretHandling::Show => {}
    }

    text
}

/// Remove every block whose header path contains `metadata.`, covering
/// labels, annotations, managed fields and nested
/// `spec.template.metadata.*` entries. Whole blocks go, interior blank
/// lines included, until a non-metadata header line ends the skip.
fn strip_metadata_blocks(text: &str) -> String {
    let headers = HeaderPattern::new();
    let mut kept: Vec<&str> = Vec::new();
    let mut skipping = false;

    for line in text.lines() {
        if let Some(header) = headers.parse(line) {
            skipping = header.path.contains("metadata.");
        }
        if !skipping {
            kept.push(line);
        }
    }
    kept.join("\n")
}

/// Drop every line of a block whose kind is in the suppression set. The
/// decision is re-evaluated at each header line.
fn strip_suppressed_kinds(text: &str, options: &FilterOptions) -> String {
    let headers = HeaderPattern::new();
    let mut kept: Vec<&str> = Vec::new();
    let mut skipping = false;

    for line in text.lines() {
        if let Some(header) = headers.parse(line) {
            skipping = options.suppresses_kind(&header.kind);
        }
        if !skipping {
            kept.push(line);
        }
    }
    kept.join("\n")
}

/// Drop any line matching the pattern. An invalid pattern logs a warning
/// and leaves the text untouched (fail-open).
fn strip_matching_lines(text: &str, pattern: &str) -> String {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => {
            warn!("Ignoring invalid suppression regex '{}': {}", pattern, err);
            return text.to_string();
        }
    };

    text.lines()
        .filter(|line| !re.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn secret_line_regex() -> Regex {
    Regex::new(SECRET_LINE_PATTERN).expect("hard-coded secret pattern compiles")
}

fn redact_secret_values(text: &str) -> String {
    let secret_re = secret_line_regex();
    text.lines()
        .map(|line| match secret_re.captures(line) {
            Some(caps) if looks_like_secret(&caps["key"], &caps["value"]) => {
                format!("{}{}: [REDACTED]", &caps["prefix"], &caps["key"])
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Heuristic for encoded or opaque secret material: `data:` values with an
/// embedded colon, `value:` entries that are long or wholly base64
/// alphabet.
fn looks_like_secret(key: &str, value: &str) -> bool {
    match key {
        "data" => value.contains(':'),
        _ => value.len() > 20 || is_base64_alphabet(value),
    }
}

fn is_base64_alphabet(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
}

/// Append the decoded payload to `value:` lines carrying valid base64.
/// Lines that fail to decode are left untouched.
fn decode_secret_values(text: &str) -> String {
    let secret_re = secret_line_regex();
    text.lines()
        .map(|line| {
            if let Some(caps) = secret_re.captures(line) {
                if &caps["key"] == "value" {
                    if let Some(decoded) = decode_base64(caps["value"].trim()) {
                        return format!(
                            "{}value: {} (decoded from base64)",
                            &caps["prefix"], decoded
                        );
                    }
                }
            }
            line.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_base64(value: &str) -> Option<String> {
    let bytes = BASE64.decode(value).ok()?;
    String::from_utf8(bytes).ok()
}

/// Context trimming: keep changed lines plus up to `context` lines around
/// each, with a literal "..." between non-adjacent kept ranges. Groups
/// without any changed line are left untouched.
pub fn trim_context(change: &mut ResourceChange, context: usize) {
    let changed: Vec<usize> = change
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| DiffLine::classify(line).is_change())
        .map(|(i, _)| i)
        .collect();
    if changed.is_empty() {
        return;
    }

    let mut keep = vec![false; change.lines.len()];
    for &i in &changed {
        let start = i.saturating_sub(context);
        let end = (i + context).min(change.lines.len() - 1);
        for flag in keep[start..=end].iter_mut() {
            *flag = true;
        }
    }

    let mut trimmed = Vec::new();
    let mut last_kept: Option<usize> = None;
    for (i, line) in change.lines.iter().enumerate() {
        if !keep[i] {
            continue;
        }
        if let Some(prev) = last_kept {
            if i > prev + 1 {
                trimmed.push("...".to_string());
            }
        }
        trimmed.push(line.clone());
        last_kept = Some(i);
    }
    change.lines = trimmed;
}
