pub mod export;
pub mod show;
pub mod stats;
