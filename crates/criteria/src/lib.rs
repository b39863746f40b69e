//! # Criteria Library
//!
//! The catalog of named financial tests that investor profiles are built from.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** every test is a side-effect free function of a `MetricSnapshot`
//!   and a threshold. Nothing here performs I/O or holds state.
//! - **Missing Data Fails:** a test whose inputs are absent or not numeric evaluates
//!   to `false`. Tests never panic and never return errors, so every criterion always
//!   contributes to a report.
//! - **Open Extension:** profiles bind any `Predicate`, so a new test can be a closure
//!   or a new type without touching the engine.
//!
//! ## Public API
//!
//! - `Predicate`: the trait the engine evaluates.
//! - `Criterion`: the built-in tests with their thresholds.
//! - `predicates`: the same tests as free functions.

pub mod criterion;
pub mod predicates;

pub use criterion::Criterion;

use core_types::MetricSnapshot;

/// A pass/fail test over a metric snapshot.
///
/// Implemented by [`Criterion`] and by any `Fn(&MetricSnapshot) -> bool`. The
/// `Send + Sync` bounds allow profiles to be shared across the worker threads of a
/// batch evaluation.
pub trait Predicate: Send + Sync {
    fn test(&self, snapshot: &MetricSnapshot) -> bool;

    /// A short human-readable description of the rule, used in listings.
    fn describe(&self) -> String {
        "custom predicate".to_string()
    }
}

impl<F> Predicate for F
where
    F: Fn(&MetricSnapshot) -> bool + Send + Sync,
{
    fn test(&self, snapshot: &MetricSnapshot) -> bool {
        self(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Metric;
    use rust_decimal_macros::dec;

    #[test]
    fn closures_are_predicates() {
        let has_positive_margin = |s: &MetricSnapshot| {
            s.number(Metric::ProfitMargins)
                .is_some_and(|m| m > dec!(0))
        };
        let snapshot = MetricSnapshot::new("X").with(Metric::ProfitMargins, dec!(0.01));

        assert!(has_positive_margin.test(&snapshot));
        assert_eq!(has_positive_margin.describe(), "custom predicate");
    }
}
