use serde::{Deserialize, Serialize};

use crate::resource_change::ResourceChange;
use crate::statistics::DiffStatistics;

/// Everything the view and export layers need from one comparison pass.
/// Discarded wholesale when the next comparison result arrives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffReport {
    /// Filtered change groups in source order
    pub changes: Vec<ResourceChange>,
    /// The same groups bucketed by category, in display rank order
    pub categories: Vec<CategoryGroup>,
    /// Absent when the filtered diff contains no change groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DiffStatistics>,
    /// The filtered diff text, used verbatim as the export body
    pub filtered_text: String,
    pub has_changes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryGroup {
    pub category: String,
    pub changes: Vec<ResourceChange>,
}
