use crate::error::EngineError;
use core_types::{CriterionResult, EvaluationReport, MetricSnapshot};
use profiles::InvestorProfile;
use rayon::prelude::*;

/// A stateless evaluator that applies investor profiles to metric snapshots.
///
/// Identical inputs always produce identical reports, so a single instance can be
/// shared freely across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct EvaluationEngine;

impl EvaluationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Applies `profile` to `snapshot`.
    ///
    /// Every criterion is evaluated, in declared order, even once the verdict is
    /// settled: the per-criterion breakdown is part of the report.
    ///
    /// # Errors
    ///
    /// `EngineError::InvalidProfile` if the profile has no criteria or its pass
    /// threshold exceeds the number of criteria. Missing or malformed metrics are
    /// never errors; the affected criteria simply fail.
    pub fn evaluate(
        &self,
        profile: &InvestorProfile,
        snapshot: &MetricSnapshot,
    ) -> Result<EvaluationReport, EngineError> {
        check(profile)?;
        Ok(self.evaluate_checked(profile, snapshot))
    }

    /// Evaluates every profile against every snapshot.
    ///
    /// Snapshots are spread across the rayon thread pool. The outer vector follows
    /// the order of `snapshots`, each inner vector the order of `profiles`. All
    /// profiles are checked before any work is dispatched.
    pub fn evaluate_batch(
        &self,
        profiles: &[&InvestorProfile],
        snapshots: &[MetricSnapshot],
    ) -> Result<Vec<Vec<EvaluationReport>>, EngineError> {
        for profile in profiles {
            check(profile)?;
        }

        tracing::info!(
            profiles = profiles.len(),
            snapshots = snapshots.len(),
            threads = rayon::current_num_threads(),
            "Starting batch evaluation"
        );

        Ok(snapshots
            .par_iter()
            .map(|snapshot| {
                profiles
                    .iter()
                    .map(|profile| self.evaluate_checked(profile, snapshot))
                    .collect()
            })
            .collect())
    }

    fn evaluate_checked(&self, profile: &InvestorProfile, snapshot: &MetricSnapshot) -> EvaluationReport {
        let results: Vec<CriterionResult> = profile
            .criteria()
            .iter()
            .map(|binding| {
                let passed = binding.test(snapshot);
                tracing::debug!(
                    profile = profile.name(),
                    symbol = snapshot.symbol(),
                    criterion = binding.name(),
                    passed,
                    "Criterion evaluated"
                );
                CriterionResult::new(binding.name(), passed)
            })
            .collect();

        let report = EvaluationReport::from_results(
            profile.name(),
            snapshot.symbol(),
            profile.pass_threshold(),
            results,
        );

        tracing::info!(
            profile = %report.profile_name,
            symbol = %report.symbol,
            passed = report.passed_count,
            total = report.total_count,
            overall_pass = report.overall_pass,
            "Profile evaluated"
        );

        report
    }
}

/// Applies `profile` to `snapshot` with a default engine.
pub fn evaluate(
    profile: &InvestorProfile,
    snapshot: &MetricSnapshot,
) -> Result<EvaluationReport, EngineError> {
    EvaluationEngine::new().evaluate(profile, snapshot)
}

fn check(profile: &InvestorProfile) -> Result<(), EngineError> {
    match profile.defect() {
        Some(defect) => Err(EngineError::InvalidProfile {
            profile: profile.name().to_string(),
            defect,
        }),
        None => Ok(()),
    }
}
