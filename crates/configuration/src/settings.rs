use crate::error::ConfigError;
use core_types::CriterionKind;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `config.toml` is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingSettings,
    pub data_source: DataSourceSettings,
    pub output: OutputSettings,
    pub thresholds: Thresholds,
    /// Additional investor profiles, registered after the built-in ones.
    pub profiles: Vec<ProfileDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set (e.g. "info", "engine=debug").
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Settings for the market-data source that produces metric snapshots.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSourceSettings {
    pub base_url: String,
    /// Visited once per session to obtain the cookie the crumb endpoint requires.
    pub cookie_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// When set, snapshots are read from `<snapshot_dir>/<SYMBOL>.json` instead of the network.
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; tenet/0.1)".to_string(),
            snapshot_dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// Parameters for the built-in criteria.
///
/// Ratios are fractions (0.15 means 15%), except `max_debt_to_equity`, which
/// providers report as a percentage (50 means 0.5x).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub min_return_on_equity: Decimal,
    pub max_debt_to_equity: Decimal,
    pub min_profit_margin: Decimal,
    pub min_eps_growth: Decimal,
    pub max_forward_pe: Decimal,
    pub min_sustainable_growth_rate: Decimal,
    pub min_operating_margin: Decimal,
    pub max_price_to_book: Decimal,
    pub min_free_cash_flow: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_return_on_equity: dec!(0.15),
            max_debt_to_equity: dec!(50),
            min_profit_margin: dec!(0.10),
            min_eps_growth: dec!(0.10),
            max_forward_pe: dec!(15),
            min_sustainable_growth_rate: dec!(0.10),
            min_operating_margin: dec!(0.20),
            max_price_to_book: dec!(3),
            min_free_cash_flow: Decimal::ZERO,
        }
    }
}

impl Thresholds {
    /// The configured parameter for a given criterion.
    pub fn for_kind(&self, kind: CriterionKind) -> Decimal {
        match kind {
            CriterionKind::ReturnOnEquity => self.min_return_on_equity,
            CriterionKind::DebtToEquity => self.max_debt_to_equity,
            CriterionKind::ProfitMargin => self.min_profit_margin,
            CriterionKind::EpsGrowth => self.min_eps_growth,
            CriterionKind::ForwardPe => self.max_forward_pe,
            CriterionKind::SustainableGrowthRate => self.min_sustainable_growth_rate,
            CriterionKind::OperatingMargin => self.min_operating_margin,
            CriterionKind::PriceToBook => self.max_price_to_book,
            CriterionKind::FreeCashFlow => self.min_free_cash_flow,
        }
    }
}

/// A declarative investor profile from the `[[profiles]]` tables.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDefinition {
    pub name: String,
    pub pass_threshold: usize,
    pub criteria: Vec<CriterionDefinition>,
}

/// One entry of a profile's ordered criterion list.
#[derive(Debug, Clone, Deserialize)]
pub struct CriterionDefinition {
    pub kind: CriterionKind,
    /// Display name in reports. Defaults to the criterion's canonical name.
    #[serde(default)]
    pub name: Option<String>,
    /// Overrides the global threshold for this profile only.
    #[serde(default)]
    pub threshold: Option<Decimal>,
}

impl Config {
    /// Checks the invariants that deserialization alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_source.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "data_source.timeout_secs must be greater than zero".to_string(),
            ));
        }

        for profile in &self.profiles {
            if profile.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "every [[profiles]] entry needs a non-empty name".to_string(),
                ));
            }
        }

        Ok(())
    }
}
