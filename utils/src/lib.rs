mod categorizer;
mod export;
mod filter_chain;
mod logging;
mod pipeline;
mod segmenter;
mod statistics;

pub use categorizer::{categorize, category_rank, group_by_category};
pub use export::{export_json, export_markdown, export_text, ExportOptions};
pub use filter_chain::{apply_text_filters, trim_context};
pub use logging::setup_logging;
pub use pipeline::process_diff;
pub use segmenter::segment;
pub use statistics::aggregate;
