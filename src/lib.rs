pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod types;

pub use config::{Config, DuplicatePolicy};
pub use error::{LoadError, Result, SchemaError, ScreenError};
pub use pipeline::{Pipeline, PipelineResult};
pub use types::{CleanedPosting, InternshipTable};
