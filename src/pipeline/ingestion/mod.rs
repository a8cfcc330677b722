// Pipeline ingestion: reading the source table

pub mod loader;

pub use loader::{LoadReport, Loader, RawTable};
