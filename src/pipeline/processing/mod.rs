// Pipeline processing: internship filtering, salary parsing, imputation and labeling

pub mod engine;
pub mod impute;
pub mod label;
pub mod normalize;
pub mod salary;

pub use engine::{FeatureEngine, FeatureOutput};
pub use label::{LabelAssessment, Signal};
pub use normalize::FilterNormalizer;
