use crate::Predicate;
use crate::predicates;
use configuration::Thresholds;
use core_types::{CriterionKind, MetricSnapshot};
use rust_decimal::Decimal;
use serde::Serialize;

/// A built-in financial test together with the threshold it compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criterion {
    ReturnOnEquity { min: Decimal },
    DebtToEquity { max: Decimal },
    ProfitMargin { min: Decimal },
    EpsGrowth { min: Decimal },
    ForwardPe { max: Decimal },
    SustainableGrowthRate { min: Decimal },
    OperatingMargin { min: Decimal },
    PriceToBook { max: Decimal },
    FreeCashFlow { min: Decimal },
}

impl Criterion {
    /// Creates the criterion identified by `kind` with an explicit threshold.
    pub fn new(kind: CriterionKind, threshold: Decimal) -> Self {
        match kind {
            CriterionKind::ReturnOnEquity => Criterion::ReturnOnEquity { min: threshold },
            CriterionKind::DebtToEquity => Criterion::DebtToEquity { max: threshold },
            CriterionKind::ProfitMargin => Criterion::ProfitMargin { min: threshold },
            CriterionKind::EpsGrowth => Criterion::EpsGrowth { min: threshold },
            CriterionKind::ForwardPe => Criterion::ForwardPe { max: threshold },
            CriterionKind::SustainableGrowthRate => {
                Criterion::SustainableGrowthRate { min: threshold }
            }
            CriterionKind::OperatingMargin => Criterion::OperatingMargin { min: threshold },
            CriterionKind::PriceToBook => Criterion::PriceToBook { max: threshold },
            CriterionKind::FreeCashFlow => Criterion::FreeCashFlow { min: threshold },
        }
    }

    /// Creates the criterion with its configured threshold.
    pub fn from_thresholds(kind: CriterionKind, thresholds: &Thresholds) -> Self {
        Self::new(kind, thresholds.for_kind(kind))
    }

    pub fn kind(&self) -> CriterionKind {
        match self {
            Criterion::ReturnOnEquity { .. } => CriterionKind::ReturnOnEquity,
            Criterion::DebtToEquity { .. } => CriterionKind::DebtToEquity,
            Criterion::ProfitMargin { .. } => CriterionKind::ProfitMargin,
            Criterion::EpsGrowth { .. } => CriterionKind::EpsGrowth,
            Criterion::ForwardPe { .. } => CriterionKind::ForwardPe,
            Criterion::SustainableGrowthRate { .. } => CriterionKind::SustainableGrowthRate,
            Criterion::OperatingMargin { .. } => CriterionKind::OperatingMargin,
            Criterion::PriceToBook { .. } => CriterionKind::PriceToBook,
            Criterion::FreeCashFlow { .. } => CriterionKind::FreeCashFlow,
        }
    }

    pub fn threshold(&self) -> Decimal {
        match *self {
            Criterion::ReturnOnEquity { min }
            | Criterion::ProfitMargin { min }
            | Criterion::EpsGrowth { min }
            | Criterion::SustainableGrowthRate { min }
            | Criterion::OperatingMargin { min }
            | Criterion::FreeCashFlow { min } => min,
            Criterion::DebtToEquity { max }
            | Criterion::ForwardPe { max }
            | Criterion::PriceToBook { max } => max,
        }
    }
}

impl Predicate for Criterion {
    fn test(&self, snapshot: &MetricSnapshot) -> bool {
        match *self {
            Criterion::ReturnOnEquity { min } => predicates::return_on_equity(snapshot, min),
            Criterion::DebtToEquity { max } => predicates::debt_to_equity(snapshot, max),
            Criterion::ProfitMargin { min } => predicates::profit_margin(snapshot, min),
            Criterion::EpsGrowth { min } => predicates::eps_growth(snapshot, min),
            Criterion::ForwardPe { max } => predicates::forward_pe(snapshot, max),
            Criterion::SustainableGrowthRate { min } => {
                predicates::sustainable_growth_rate(snapshot, min)
            }
            Criterion::OperatingMargin { min } => predicates::operating_margin(snapshot, min),
            Criterion::PriceToBook { max } => predicates::price_to_book(snapshot, max),
            Criterion::FreeCashFlow { min } => predicates::free_cash_flow(snapshot, min),
        }
    }

    fn describe(&self) -> String {
        match *self {
            Criterion::ReturnOnEquity { min } => format!("returnOnEquity >= {min}"),
            Criterion::DebtToEquity { max } => format!("debtToEquity < {max}"),
            Criterion::ProfitMargin { min } => format!("profitMargins >= {min}"),
            Criterion::EpsGrowth { min } => format!("earningsQuarterlyGrowth >= {min}"),
            Criterion::ForwardPe { max } => format!("forwardPE <= {max}"),
            Criterion::SustainableGrowthRate { min } => {
                format!("returnOnEquity * (1 - payoutRatio) >= {min}")
            }
            Criterion::OperatingMargin { min } => format!("operatingMargins >= {min}"),
            Criterion::PriceToBook { max } => format!("priceToBook <= {max}"),
            Criterion::FreeCashFlow { min } => format!("freeCashflow > {min}"),
        }
    }
}
