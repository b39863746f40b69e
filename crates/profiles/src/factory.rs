use crate::error::ProfileError;
use crate::profile::{CriterionBinding, InvestorProfile};
use configuration::{ProfileDefinition, Thresholds};
use criteria::Criterion;

/// Creates an investor profile from a declarative `[[profiles]]` definition.
///
/// Criteria without an explicit `threshold` use the global `thresholds`. The
/// resulting profile is validated, so a configuration bug is reported here rather
/// than on the first evaluation.
pub fn build_profile(
    definition: &ProfileDefinition,
    thresholds: &Thresholds,
) -> Result<InvestorProfile, ProfileError> {
    let profile = definition.criteria.iter().fold(
        InvestorProfile::new(definition.name.trim(), definition.pass_threshold),
        |profile, entry| {
            let threshold = entry
                .threshold
                .unwrap_or_else(|| thresholds.for_kind(entry.kind));
            let criterion = Criterion::new(entry.kind, threshold);
            let name = entry.name.as_deref().unwrap_or(entry.kind.name());
            profile.with_criterion(CriterionBinding::new(name, criterion))
        },
    );

    profile.validate()?;
    tracing::debug!(
        profile = profile.name(),
        criteria = profile.criteria().len(),
        pass_threshold = profile.pass_threshold(),
        "Built profile from configuration"
    );

    Ok(profile)
}
