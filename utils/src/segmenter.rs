use chart_defs::{DiffLine, ResourceChange};
use regex::Regex;

use crate::categorizer::categorize;

/// A line of the form `path (kind/namespace/name)` emitted by the
/// path-oriented diff producer. The identifier must contain at least one
/// slash, so parenthesized prose inside a diff body cannot open a group.
const HEADER_PATTERN: &str = r"^(?P<path>[^()]*)\((?P<id>[^()]*/[^()]*)\)\s*$";

pub(crate) struct HeaderLine {
    pub path: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
}

/// Compiled matcher for resource-identifier header lines, shared by the
/// segmenter, the filter chain and the statistics aggregator.
pub(crate) struct HeaderPattern {
    regex: Regex,
}

impl HeaderPattern {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(HEADER_PATTERN).expect("hard-coded header pattern compiles"),
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.parse(line).is_some()
    }

    /// Parse a header line. Addition/removal lines never match: a change
    /// line that happens to end in parenthesized slashed text is body, not
    /// a group header.
    pub fn parse(&self, line: &str) -> Option<HeaderLine> {
        if DiffLine::classify(line) != DiffLine::Context {
            return None;
        }
        let caps = self.regex.captures(line)?;
        let (kind, namespace, name) = parse_identifier(&caps["id"]);
        Some(HeaderLine {
            path: caps["path"].trim().to_string(),
            kind,
            name,
            namespace,
        })
    }
}

/// Split a slash-separated resource identifier into kind, namespace and
/// name. Never fails: unexpected shapes degrade to best-effort values.
fn parse_identifier(id: &str) -> (String, Option<String>, String) {
    let parts: Vec<&str> = id.split('/').map(str::trim).collect();
    let (kind, namespace, name) = match parts.as_slice() {
        [kind, namespace, name] => (*kind, Some(*namespace), *name),
        // apiVersion/kind/namespace/name; the apiVersion is not kept
        [_, kind, namespace, name] => (*kind, Some(*namespace), *name),
        [kind, name] => (*kind, None, *name),
        parts => (
            parts.first().copied().unwrap_or(""),
            None,
            parts.last().copied().unwrap_or(""),
        ),
    };

    let kind = if kind.is_empty() { "Unknown" } else { kind };
    let name = if name.is_empty() { "unknown" } else { name };
    let namespace = namespace.and_then(ResourceChange::normalize_namespace);
    (kind.to_string(), namespace, name.to_string())
}

/// A `+++`/`---` file header as emitted by unified diff tools. A bare
/// `---` is a YAML document separator and does not count.
fn is_unified_header(line: &str) -> bool {
    (line.starts_with("+++") || line.starts_with("---"))
        && line.trim() != "---"
        && line.trim() != "+++"
}

/// Split raw diff text into per-resource change groups. Three ordered
/// attempts: path-oriented headers, line-oriented sections, and a single
/// catch-all wrapping the whole text. Whitespace-only input yields no
/// groups. Never fails.
pub fn segment(raw: &str) -> Vec<ResourceChange> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let groups = segment_path_oriented(raw);
    if !groups.is_empty() {
        return groups;
    }

    let groups = segment_sections(raw);
    if !groups.is_empty() {
        return groups;
    }

    vec![catch_all_group(raw)]
}

fn segment_path_oriented(raw: &str) -> Vec<ResourceChange> {
    let headers = HeaderPattern::new();
    let lines: Vec<&str> = raw.lines().collect();
    let mut groups: Vec<ResourceChange> = Vec::new();
    let mut current: Option<ResourceChange> = None;

    for (i, line) in lines.iter().enumerate() {
        if let Some(header) = headers.parse(line) {
            if let Some(group) = current.take() {
                groups.push(group);
            }
            current = Some(open_group(header, line));
        } else if current.is_some() {
            // Close before a following header so trailing blank lines do
            // not leak into the next group.
            if line.trim().is_empty() && next_nonblank_is_header(&lines, i + 1, &headers) {
                if let Some(group) = current.take() {
                    groups.push(group);
                }
            } else if let Some(group) = current.as_mut() {
                group.lines.push(line.to_string());
            }
        } else if groups.is_empty() && is_unified_header(line) {
            // Unified-diff content with no identifiers anywhere: one
            // synthetic group absorbs it all.
            current = Some(ResourceChange {
                category: categorize("", "Unknown"),
                path: String::new(),
                kind: "Unknown".to_string(),
                name: "all".to_string(),
                namespace: None,
                lines: vec![line.to_string()],
            });
        }
        // Anything else before the first group is discarded.
    }

    if let Some(group) = current.take() {
        groups.push(group);
    }
    groups
}

fn open_group(header: HeaderLine, line: &str) -> ResourceChange {
    ResourceChange {
        category: categorize(&header.path, &header.kind),
        path: header.path,
        kind: header.kind,
        name: header.name,
        namespace: header.namespace,
        lines: vec![line.to_string()],
    }
}

fn next_nonblank_is_header(lines: &[&str], from: usize, headers: &HeaderPattern) -> bool {
    lines
        .iter()
        .skip(from)
        .find(|l| !l.trim().is_empty())
        .is_some_and(|l| headers.is_match(l))
}

/// Fallback for diff text without resource identifiers: split on `---`
/// separators and read embedded `kind:` / `name:` / `namespace:` fields.
fn segment_sections(raw: &str) -> Vec<ResourceChange> {
    let mut groups = Vec::new();
    let mut section: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if line.trim() == "---" {
            if let Some(group) = section_group(&section) {
                groups.push(group);
            }
            section.clear();
        } else {
            section.push(line);
        }
    }
    if let Some(group) = section_group(&section) {
        groups.push(group);
    }
    groups
}

fn section_group(section: &[&str]) -> Option<ResourceChange> {
    let mut kind: Option<String> = None;
    let mut name: Option<String> = None;
    let mut namespace: Option<String> = None;

    for line in section {
        let stripped = strip_diff_marker(line);
        if let Some(value) = field_value(stripped, "kind") {
            kind.get_or_insert(value);
        } else if let Some(value) = field_value(stripped, "name") {
            // A name before any kind belongs to some nested object
            if kind.is_some() && name.is_none() {
                name = Some(value);
            }
        } else if let Some(value) = field_value(stripped, "namespace") {
            namespace.get_or_insert(value);
        }
    }

    let kind = kind?;
    Some(ResourceChange {
        category: categorize("", &kind),
        path: String::new(),
        kind,
        name: name.unwrap_or_else(|| "unknown".to_string()),
        namespace: namespace.as_deref().and_then(ResourceChange::normalize_namespace),
        lines: section.iter().map(|l| l.to_string()).collect(),
    })
}

fn strip_diff_marker(line: &str) -> &str {
    line.strip_prefix('+')
        .or_else(|| line.strip_prefix('-'))
        .unwrap_or(line)
        .trim_start()
}

fn field_value(line: &str, field: &str) -> Option<String> {
    let rest = line.strip_prefix(field)?.strip_prefix(':')?;
    Some(strip_quotes(rest.trim()).to_string())
}

fn strip_quotes(value: &str) -> &str {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    stripped.unwrap_or(value)
}

/// Last resort: neither format was recognized, wrap the whole text.
fn catch_all_group(raw: &str) -> ResourceChange {
    ResourceChange {
        category: "All Changes".to_string(),
        path: String::new(),
        kind: "All Resources".to_string(),
        name: "all".to_string(),
        namespace: None,
        lines: raw.lines().map(|l| l.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_BLOCKS: &str = "\
metadata.labels.foo  (v1/ServiceAccount/default/svc-account)
- old
+ new

spec.replicas  (v1/Deployment/ns1/my-app)
- 1
+ 3
";

    #[test]
    fn test_segments_path_oriented_blocks() {
        let groups = segment(TWO_BLOCKS);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].kind, "ServiceAccount");
        assert_eq!(groups[0].name, "svc-account");
        assert_eq!(groups[0].namespace, None);
        assert_eq!(groups[0].path, "metadata.labels.foo");
        assert_eq!(groups[0].category, "Metadata & Tags");
        // The trailing blank line stays out of the first group
        assert_eq!(
            groups[0].lines,
            vec![
                "metadata.labels.foo  (v1/ServiceAccount/default/svc-account)",
                "- old",
                "+ new",
            ]
        );

        assert_eq!(groups[1].kind, "Deployment");
        assert_eq!(groups[1].name, "my-app");
        assert_eq!(groups[1].namespace, Some("ns1".to_string()));
        assert_eq!(groups[1].category, "Scaling");
    }

    #[test]
    fn test_three_part_identifier() {
        let groups = segment("spec.ports  (Service/prod/gateway)\n- 80\n+ 8080\n");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, "Service");
        assert_eq!(groups[0].namespace, Some("prod".to_string()));
        assert_eq!(groups[0].name, "gateway");
    }

    #[test]
    fn test_two_part_identifier_best_effort() {
        let groups = segment("rules  (ClusterRole/admin)\n+ get\n");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, "ClusterRole");
        assert_eq!(groups[0].name, "admin");
        assert_eq!(groups[0].namespace, None);
    }

    #[test]
    fn test_malformed_identifier_degrades() {
        let groups = segment("weird  ( / )\n+ x\n");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, "Unknown");
        assert_eq!(groups[0].name, "unknown");
    }

    #[test]
    fn test_blank_gap_within_block_is_kept() {
        let raw = "\
spec.template  (v1/Deployment/default/web)
- a

+ b
";
        let groups = segment(raw);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lines.len(), 4);
        assert_eq!(groups[0].lines[2], "");
    }

    #[test]
    fn test_change_lines_never_open_groups() {
        let raw = "\
spec.containers  (v1/Pod/default/app)
+ url: (http://example.com/path)
- url: (http://example.com/old)
";
        let groups = segment(raw);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lines.len(), 3);
    }

    #[test]
    fn test_unified_header_opens_synthetic_group() {
        let raw = "\
--- a/manifests.yaml
+++ b/manifests.yaml
@@ -1,3 +1,3 @@
-replicas: 1
+replicas: 3
";
        let groups = segment(raw);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, "Unknown");
        assert_eq!(groups[0].name, "all");
        assert_eq!(groups[0].lines.len(), 5);
    }

    #[test]
    fn test_fallback_sections() {
        let raw = "kind: Service\nname: my-svc\n---\nkind: Deployment\nname: my-app\n";
        let groups = segment(raw);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, "Service");
        assert_eq!(groups[0].name, "my-svc");
        assert_eq!(groups[0].category, "Services");
        assert_eq!(groups[1].kind, "Deployment");
        assert_eq!(groups[1].name, "my-app");
        assert_eq!(groups[1].category, "Workloads");
    }

    #[test]
    fn test_fallback_strips_markers_and_quotes() {
        let raw = "+kind: \"ConfigMap\"\n+name: 'app-config'\n+namespace: default\n";
        let groups = segment(raw);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, "ConfigMap");
        assert_eq!(groups[0].name, "app-config");
        assert_eq!(groups[0].namespace, None);
    }

    #[test]
    fn test_fallback_requires_kind() {
        let raw = "name: orphan\n---\nkind: Secret\nname: creds\nnamespace: vault\n";
        let groups = segment(raw);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, "Secret");
        assert_eq!(groups[0].namespace, Some("vault".to_string()));
    }

    #[test]
    fn test_catch_all_wraps_unrecognized_text() {
        let raw = "something changed\nsomewhere\n";
        let groups = segment(raw);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "All Changes");
        assert_eq!(groups[0].kind, "All Resources");
        assert_eq!(groups[0].name, "all");
        assert_eq!(groups[0].lines.len(), 2);
    }

    #[test]
    fn test_whitespace_only_yields_no_groups() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\n  \n").is_empty());
    }
}
