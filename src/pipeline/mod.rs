// Data processing pipeline: loading, filtering/normalization, features and labels

pub mod ingestion;
pub mod pipeline;
pub mod processing;

// Re-export key types from each stage
pub use ingestion::{LoadReport, Loader, RawTable};
pub use pipeline::{Pipeline, PipelineResult};
