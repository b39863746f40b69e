pub mod enums;
pub mod error;
pub mod report;
pub mod snapshot;

// Re-export the core types to provide a clean public API.
pub use enums::{CriterionKind, Metric};
pub use error::CoreError;
pub use report::{CriterionResult, EvaluationReport};
pub use snapshot::{MetricSnapshot, MetricValue};
