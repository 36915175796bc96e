use std::collections::{HashMap, HashSet};

use chart_defs::{
    BreakingChange, CategoryStats, ChangeSummary, CriticalChange, DiffLine, DiffStatistics,
    ImpactAssessment, ImpactLevel, KindStats, LineStats, ResourceChange,
};

use crate::segmenter::HeaderPattern;

/// Flagged critical/breaking changes are truncated to the first ones found
const MAX_FLAGGED_CHANGES: usize = 10;

/// Fold the filtered change groups into a statistics snapshot. Pure and
/// stateless: recomputed fully on every invocation.
pub fn aggregate(groups: &[ResourceChange], filtered_text: &str) -> DiffStatistics {
    let headers = HeaderPattern::new();
    let mut summary = ChangeSummary {
        total_changes: groups.len(),
        ..Default::default()
    };
    let mut seen: HashSet<String> = HashSet::new();
    let mut by_kind: HashMap<String, KindStats> = HashMap::new();
    let mut by_category: HashMap<String, HashSet<String>> = HashMap::new();
    let mut lines = LineStats::default();
    let mut critical: Vec<CriticalChange> = Vec::new();
    let mut breaking: Vec<BreakingChange> = Vec::new();

    for group in groups {
        let key = group.key();
        if seen.insert(key.clone()) {
            summary.total_resources += 1;
        }
        by_category
            .entry(group.category.clone())
            .or_default()
            .insert(key.clone());

        let mut has_additions = false;
        let mut has_removals = false;
        for line in &group.lines {
            match DiffLine::classify(line) {
                DiffLine::Addition => {
                    lines.added += 1;
                    has_additions = true;
                }
                DiffLine::Removal => {
                    lines.removed += 1;
                    has_removals = true;
                    if line.contains("required:") || line.contains("requiredFields:") {
                        breaking.push(BreakingChange {
                            resource: key.clone(),
                            field: group.path.clone(),
                            severity: "high".to_string(),
                        });
                    }
                }
                DiffLine::Header => {}
                DiffLine::Context => {
                    // Identifier headers and trim separators are structure,
                    // not manifest content
                    if !line.trim().is_empty()
                        && line.trim() != "..."
                        && !headers.is_match(line)
                    {
                        lines.unchanged += 1;
                    }
                }
            }
            scan_critical(line, &key, &mut critical);
        }

        let kind_entry = by_kind
            .entry(group.kind.clone())
            .or_insert_with(|| KindStats {
                kind: group.kind.clone(),
                ..Default::default()
            });
        kind_entry.count += 1;
        match (has_additions, has_removals) {
            (true, true) => {
                summary.resources_modified += 1;
                kind_entry.modified += 1;
            }
            (true, false) => {
                summary.resources_added += 1;
                kind_entry.added += 1;
            }
            (false, true) => {
                summary.resources_removed += 1;
                kind_entry.removed += 1;
            }
            (false, false) => {
                summary.resources_unchanged += 1;
                kind_entry.unchanged += 1;
            }
        }
    }

    lines.total = filtered_text.lines().count();
    critical.truncate(MAX_FLAGGED_CHANGES);
    breaking.truncate(MAX_FLAGGED_CHANGES);

    let mut by_kind: Vec<KindStats> = by_kind.into_values().collect();
    by_kind.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.kind.cmp(&b.kind)));

    let mut by_category: Vec<CategoryStats> = by_category
        .into_iter()
        .map(|(category, resources)| CategoryStats {
            category,
            count: resources.len(),
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.cmp(&b.category))
    });

    let level = if summary.resources_removed > 0 || !breaking.is_empty() || critical.len() > 5 {
        ImpactLevel::High
    } else if summary.resources_modified > 0 || !critical.is_empty() {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    };

    DiffStatistics {
        summary,
        by_kind,
        by_category,
        lines,
        impact: ImpactAssessment {
            level,
            critical_changes: critical,
            breaking_changes: breaking,
        },
    }
}

/// Substring heuristics for changes likely to affect runtime behavior,
/// applied to every line regardless of add/remove state.
fn scan_critical(line: &str, resource: &str, critical: &mut Vec<CriticalChange>) {
    if line.contains("spec.replicas") {
        critical.push(CriticalChange {
            resource: resource.to_string(),
            field: "replicas".to_string(),
        });
    }
    if line.contains("spec.template.spec.containers") && line.contains("image:") {
        critical.push(CriticalChange {
            resource: resource.to_string(),
            field: "image".to_string(),
        });
    }
    if line.contains("spec.resources") {
        critical.push(CriticalChange {
            resource: resource.to_string(),
            field: "resources".to_string(),
        });
    }
}
