//! # Evaluation Engine
//!
//! Applies an `InvestorProfile` to a `MetricSnapshot` and produces an
//! `EvaluationReport`.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** no I/O, no shared state. Snapshots come from an acquisition
//!   source upstream and reports go to whatever renders them downstream.
//! - **Profile Agnostic:** profiles are data. The engine walks the declared
//!   criteria in order, counts passes and compares against the threshold; it never
//!   branches on which profile it is running.
//! - **Fail Loud on Configuration:** a structurally invalid profile is an error,
//!   never a failing report. Missing data is not an error.

pub mod error;
pub mod evaluation;

pub use error::EngineError;
pub use evaluation::{EvaluationEngine, evaluate};
