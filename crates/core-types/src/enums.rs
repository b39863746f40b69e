use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A financial metric that the criteria library knows how to read.
///
/// The serialized form is the key used by market-data providers
/// (e.g. `returnOnEquity`), which is also the key accepted in snapshot files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "returnOnEquity")]
    ReturnOnEquity,
    #[serde(rename = "debtToEquity")]
    DebtToEquity,
    #[serde(rename = "profitMargins")]
    ProfitMargins,
    #[serde(rename = "earningsQuarterlyGrowth")]
    EarningsQuarterlyGrowth,
    #[serde(rename = "forwardPE")]
    ForwardPe,
    #[serde(rename = "payoutRatio")]
    PayoutRatio,
    #[serde(rename = "operatingMargins")]
    OperatingMargins,
    #[serde(rename = "priceToBook")]
    PriceToBook,
    #[serde(rename = "freeCashflow")]
    FreeCashflow,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::ReturnOnEquity,
        Metric::DebtToEquity,
        Metric::ProfitMargins,
        Metric::EarningsQuarterlyGrowth,
        Metric::ForwardPe,
        Metric::PayoutRatio,
        Metric::OperatingMargins,
        Metric::PriceToBook,
        Metric::FreeCashflow,
    ];

    /// Returns the provider key for this metric.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::ReturnOnEquity => "returnOnEquity",
            Metric::DebtToEquity => "debtToEquity",
            Metric::ProfitMargins => "profitMargins",
            Metric::EarningsQuarterlyGrowth => "earningsQuarterlyGrowth",
            Metric::ForwardPe => "forwardPE",
            Metric::PayoutRatio => "payoutRatio",
            Metric::OperatingMargins => "operatingMargins",
            Metric::PriceToBook => "priceToBook",
            Metric::FreeCashflow => "freeCashflow",
        }
    }

    /// Looks up a metric by its provider key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.key() == key)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Identifies one of the built-in financial tests.
///
/// Used by configuration files to declare profiles, so the serialized form is the
/// snake_case criterion name (e.g. `sustainable_growth_rate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    ReturnOnEquity,
    DebtToEquity,
    ProfitMargin,
    EpsGrowth,
    ForwardPe,
    SustainableGrowthRate,
    OperatingMargin,
    PriceToBook,
    FreeCashFlow,
}

impl CriterionKind {
    pub const ALL: [CriterionKind; 9] = [
        CriterionKind::ReturnOnEquity,
        CriterionKind::DebtToEquity,
        CriterionKind::ProfitMargin,
        CriterionKind::EpsGrowth,
        CriterionKind::ForwardPe,
        CriterionKind::SustainableGrowthRate,
        CriterionKind::OperatingMargin,
        CriterionKind::PriceToBook,
        CriterionKind::FreeCashFlow,
    ];

    /// The canonical criterion name, as shown in reports.
    pub fn name(&self) -> &'static str {
        match self {
            CriterionKind::ReturnOnEquity => "return_on_equity",
            CriterionKind::DebtToEquity => "debt_to_equity",
            CriterionKind::ProfitMargin => "profit_margin",
            CriterionKind::EpsGrowth => "eps_growth",
            CriterionKind::ForwardPe => "forward_pe",
            CriterionKind::SustainableGrowthRate => "sustainable_growth_rate",
            CriterionKind::OperatingMargin => "operating_margin",
            CriterionKind::PriceToBook => "price_to_book",
            CriterionKind::FreeCashFlow => "free_cash_flow",
        }
    }

    /// The metrics this criterion reads. If any is absent the criterion fails.
    pub fn required_metrics(&self) -> &'static [Metric] {
        match self {
            CriterionKind::ReturnOnEquity => &[Metric::ReturnOnEquity],
            CriterionKind::DebtToEquity => &[Metric::DebtToEquity],
            CriterionKind::ProfitMargin => &[Metric::ProfitMargins],
            CriterionKind::EpsGrowth => &[Metric::EarningsQuarterlyGrowth],
            CriterionKind::ForwardPe => &[Metric::ForwardPe],
            CriterionKind::SustainableGrowthRate => &[Metric::ReturnOnEquity, Metric::PayoutRatio],
            CriterionKind::OperatingMargin => &[Metric::OperatingMargins],
            CriterionKind::PriceToBook => &[Metric::PriceToBook],
            CriterionKind::FreeCashFlow => &[Metric::FreeCashflow],
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CriterionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| CoreError::UnknownCriterion(s.to_string()))
    }
}
