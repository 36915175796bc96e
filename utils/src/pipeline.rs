use chart_defs::{DiffReport, FilterOptions, ResourceChange};
use log::debug;

use crate::{categorizer, filter_chain, segmenter, statistics};

/// Run the full pipeline over one comparison result: text filters,
/// segmentation, categorization, context trimming, statistics. Pure and
/// synchronous; running twice on the same input yields identical output.
pub fn process_diff(raw: &str, options: &FilterOptions) -> DiffReport {
    let filtered_text = filter_chain::apply_text_filters(raw, options);

    // The fallback route has no identifier lines for the kind filter to
    // act on, so suppressed kinds are dropped again at the group level.
    let mut changes: Vec<ResourceChange> = segmenter::segment(&filtered_text)
        .into_iter()
        .filter(|change| !options.suppresses_kind(&change.kind))
        .collect();
    debug!("segmented {} change groups", changes.len());

    for change in &mut changes {
        filter_chain::trim_context(change, options.context_lines);
    }

    let statistics = if changes.is_empty() {
        None
    } else {
        Some(statistics::aggregate(&changes, &filtered_text))
    };
    let categories = categorizer::group_by_category(&changes);
    let has_changes = !changes.is_empty();

    DiffReport {
        changes,
        categories,
        statistics,
        filtered_text,
        has_changes,
    }
}
