mod errors;
mod filter;
mod report;
mod resource_change;
mod statistics;

pub use errors::FilterConfigError;
pub use filter::{FilterOptions, SecretHandling, DEFAULT_CONTEXT_LINES};
pub use report::{CategoryGroup, DiffReport};
pub use resource_change::{resource_key, DiffLine, ResourceChange};
pub use statistics::{
    BreakingChange, CategoryStats, ChangeSummary, CriticalChange, DiffStatistics, ImpactAssessment,
    ImpactLevel, KindStats, LineStats,
};
