use crate::profile::InvestorProfile;
use configuration::Thresholds;
use core_types::CriterionKind;
use criteria::Criterion;

pub const VALUE_PROFILE: &str = "value";
pub const QUALITY_PROFILE: &str = "quality";

/// Value-oriented profile in the Buffett tradition: 4 of 6 criteria must pass.
pub fn value_oriented(thresholds: &Thresholds) -> InvestorProfile {
    build(
        InvestorProfile::new(VALUE_PROFILE, 4).with_description(
            "Buffett-style value: high returns, low leverage, reasonable price",
        ),
        &[
            CriterionKind::ReturnOnEquity,
            CriterionKind::DebtToEquity,
            CriterionKind::ProfitMargin,
            CriterionKind::EpsGrowth,
            CriterionKind::ForwardPe,
            CriterionKind::SustainableGrowthRate,
        ],
        thresholds,
    )
}

/// Quality-oriented profile in the Munger tradition: 3 of 5 criteria must pass.
pub fn quality_oriented(thresholds: &Thresholds) -> InvestorProfile {
    build(
        InvestorProfile::new(QUALITY_PROFILE, 3).with_description(
            "Munger-style quality: wide margins, cash generation, fair price to book",
        ),
        &[
            CriterionKind::OperatingMargin,
            CriterionKind::PriceToBook,
            CriterionKind::DebtToEquity,
            CriterionKind::ReturnOnEquity,
            CriterionKind::FreeCashFlow,
        ],
        thresholds,
    )
}

fn build(
    profile: InvestorProfile,
    kinds: &[CriterionKind],
    thresholds: &Thresholds,
) -> InvestorProfile {
    kinds.iter().fold(profile, |profile, kind| {
        profile.with_criterion(Criterion::from_thresholds(*kind, thresholds))
    })
}
