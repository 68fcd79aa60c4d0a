//! Event replay pipeline.

mod replay;
mod stats;

pub use replay::{Pipeline, PipelineConfig};
pub use stats::PipelineStats;
