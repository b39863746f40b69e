use serde::{Deserialize, Serialize};

/// The outcome of a single criterion within a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub name: String,
    pub passed: bool,
}

impl CriterionResult {
    pub fn new(name: impl Into<String>, passed: bool) -> Self {
        Self {
            name: name.into(),
            passed,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.passed { "PASS" } else { "FAIL" }
    }
}

/// The result of applying one investor profile to one metric snapshot.
///
/// Results are kept in the profile's declared criterion order. The counts and
/// the verdict are derived from the results when the report is built, so they
/// can never disagree with the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub profile_name: String,
    pub symbol: String,
    pub results: Vec<CriterionResult>,
    pub passed_count: usize,
    pub total_count: usize,
    pub pass_threshold: usize,
    pub overall_pass: bool,
}

impl EvaluationReport {
    pub fn from_results(
        profile_name: impl Into<String>,
        symbol: impl Into<String>,
        pass_threshold: usize,
        results: Vec<CriterionResult>,
    ) -> Self {
        let passed_count = results.iter().filter(|r| r.passed).count();
        let total_count = results.len();

        Self {
            profile_name: profile_name.into(),
            symbol: symbol.into(),
            results,
            passed_count,
            total_count,
            pass_threshold,
            overall_pass: passed_count >= pass_threshold,
        }
    }

    pub fn verdict_label(&self) -> &'static str {
        if self.overall_pass { "PASS" } else { "FAIL" }
    }

    /// Names of the criteria that did not pass, in declared order.
    pub fn failed_criteria(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_verdict_follow_results() {
        let report = EvaluationReport::from_results(
            "quality",
            "KO",
            2,
            vec![
                CriterionResult::new("a", true),
                CriterionResult::new("b", false),
                CriterionResult::new("c", true),
            ],
        );

        assert_eq!(report.passed_count, 2);
        assert_eq!(report.total_count, 3);
        assert!(report.overall_pass);
        assert_eq!(report.verdict_label(), "PASS");
        assert_eq!(report.failed_criteria().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn zero_threshold_always_passes() {
        let report =
            EvaluationReport::from_results("lenient", "X", 0, vec![CriterionResult::new("a", false)]);
        assert!(report.overall_pass);
    }
}
