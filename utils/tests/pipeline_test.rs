use chart_defs::{FilterOptions, ImpactLevel, SecretHandling};
use chart_utils::{export_markdown, export_text, process_diff, ExportOptions};

/// A realistic path-oriented diff as the external producer emits it: a
/// handful of resources across several categories, secrets included.
fn sample_diff() -> String {
    [
        "metadata.labels.helm.sh/chart  (v1/ServiceAccount/default/web-sa)",
        "- web-1.0.0",
        "+ web-1.1.0",
        "",
        "spec.replicas  (apps/v1/Deployment/prod/web)",
        "- 2",
        "+ 4",
        "",
        "spec.template.spec.containers.0.image  (apps/v1/Deployment/prod/web)",
        "- nginx:1.24",
        "+ nginx:1.25",
        "",
        "spec.ports.0.port  (v1/Service/prod/web)",
        "- 80",
        "+ 8080",
        "",
        "data.api-token  (v1/Secret/prod/web-credentials)",
        "+ value: QWxhZGRpbjpvcGVuc2VzYW1l",
        "",
        "metadata.annotations.checksum  (v1/ConfigMap/prod/web-config)",
        "- abc123",
        "+ def456",
        "",
    ]
    .join("\n")
}

#[test]
fn full_pipeline_segments_and_categorizes() {
    let report = process_diff(&sample_diff(), &FilterOptions::default());

    assert!(report.has_changes);
    assert_eq!(report.changes.len(), 6);

    let categories: Vec<&str> = report
        .categories
        .iter()
        .map(|g| g.category.as_str())
        .collect();
    assert_eq!(
        categories,
        vec![
            "Container & Image",
            "Scaling",
            "Service Configuration",
            "Configuration Data",
            "Metadata & Tags",
        ]
    );

    let stats = report.statistics.expect("non-empty diff has statistics");
    // Deployment/web/prod appears in two groups but counts once
    assert_eq!(stats.summary.total_resources, 5);
    assert_eq!(stats.summary.total_changes, 6);
    assert_eq!(stats.by_kind[0].kind, "Deployment");
    assert_eq!(stats.by_kind[0].count, 2);

    // The image header carries the containers path but no `image:` cue, so
    // only the replicas change is flagged
    let fields: Vec<&str> = stats
        .impact
        .critical_changes
        .iter()
        .map(|c| c.field.as_str())
        .collect();
    assert_eq!(fields, vec!["replicas"]);
    assert_eq!(stats.impact.level, ImpactLevel::Medium);
}

#[test]
fn full_pipeline_applies_all_filters_before_statistics() {
    let options = FilterOptions {
        ignore_labels: true,
        suppress_kinds: vec!["service".to_string()],
        suppress_regex: Some(r"checksum".to_string()),
        secret_handling: SecretHandling::Suppress,
        ..Default::default()
    };
    let report = process_diff(&sample_diff(), &options);

    // Both metadata blocks and the Service block are gone; the regex only
    // removed the already-filtered ConfigMap header line
    assert_eq!(report.changes.len(), 3);
    assert!(report.changes.iter().all(|c| c.kind != "Service"));
    assert!(!report.filtered_text.contains("metadata."));
    assert!(report.filtered_text.contains("value: [REDACTED]"));
    assert!(!report.filtered_text.contains("QWxhZGRpbjpvcGVuc2VzYW1l"));

    // Two of the surviving groups belong to the same Deployment
    let stats = report.statistics.expect("non-empty diff has statistics");
    assert_eq!(stats.summary.total_resources, 2);
    assert!(stats.by_kind.iter().all(|k| k.kind != "ServiceAccount"));
}

#[test]
fn secret_decode_round_trip() {
    let options = FilterOptions {
        secret_handling: SecretHandling::Decode,
        ..Default::default()
    };
    let report = process_diff(&sample_diff(), &options);
    assert!(report
        .filtered_text
        .contains("value: Aladdin:opensesame (decoded from base64)"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let options = FilterOptions {
        ignore_labels: true,
        secret_handling: SecretHandling::Decode,
        context_lines: 1,
        suppress_kinds: vec!["ConfigMap".to_string()],
        suppress_regex: Some("^unused$".to_string()),
    };
    let first = process_diff(&sample_diff(), &options);
    let second = process_diff(&sample_diff(), &options);
    assert_eq!(first, second);
    assert_eq!(
        export_markdown(&first, &export_options()).lines().count(),
        export_markdown(&second, &export_options()).lines().count()
    );
}

#[test]
fn exports_embed_the_filtered_body_verbatim() {
    let report = process_diff(&sample_diff(), &FilterOptions::default());
    let text = export_text(&report, &export_options());
    let markdown = export_markdown(&report, &export_options());

    assert!(text.contains(&report.filtered_text));
    assert!(markdown.contains(&report.filtered_text));
    assert!(text.contains("Versions: 0.9.0 -> 1.0.0"));
    assert!(markdown.contains("`0.9.0` -> `1.0.0`"));
}

fn export_options() -> ExportOptions {
    ExportOptions {
        old_version: "0.9.0".to_string(),
        new_version: "1.0.0".to_string(),
        include_statistics: true,
    }
}
