use serde::{Deserialize, Serialize};

/// Coarse severity classification for a whole comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::High => write!(f, "high"),
            ImpactLevel::Medium => write!(f, "medium"),
            ImpactLevel::Low => write!(f, "low"),
        }
    }
}

/// A field change likely to affect runtime behavior (replicas, image,
/// resource limits)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CriticalChange {
    /// Identity key of the owning resource
    pub resource: String,
    pub field: String,
}

/// Removal of a required field, flagged heuristically
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakingChange {
    pub resource: String,
    /// Changed-field path of the block the removal was seen in
    pub field: String,
    pub severity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChangeSummary {
    /// Distinct resources, keyed by kind/name[/namespace]
    pub total_resources: usize,
    pub resources_added: usize,
    pub resources_removed: usize,
    pub resources_modified: usize,
    pub resources_unchanged: usize,
    /// Change groups, counting repeat entries for the same resource
    pub total_changes: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KindStats {
    pub kind: String,
    pub count: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryStats {
    pub category: String,
    /// Distinct resources that contributed to this category
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LineStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    /// Line count of the whole filtered diff text
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImpactAssessment {
    pub level: ImpactLevel,
    /// At most the first 10 flagged critical changes, in encounter order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub critical_changes: Vec<CriticalChange>,
    /// At most the first 10 flagged breaking changes, in encounter order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaking_changes: Vec<BreakingChange>,
}

/// Read-only snapshot over the filtered change collection, recomputed from
/// scratch for every comparison result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffStatistics {
    pub summary: ChangeSummary,
    pub by_kind: Vec<KindStats>,
    pub by_category: Vec<CategoryStats>,
    pub lines: LineStats,
    pub impact: ImpactAssessment,
}
