use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, CriterionDefinition, DataSourceSettings, LoggingSettings, OutputFormat,
    OutputSettings, ProfileDefinition, Thresholds,
};

/// Prefix for environment overrides, e.g. `TENET_THRESHOLDS__MAX_FORWARD_PE=18`.
pub const ENV_PREFIX: &str = "TENET";

/// Loads the application configuration.
///
/// The TOML file at `path` is optional; environment variables prefixed with
/// `TENET_` override it, using `__` to separate nested keys. The result is
/// validated before it is returned.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path.as_ref()).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

/// Parses configuration from an in-memory TOML document, without environment overrides.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CriterionKind;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_document_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.data_source.timeout_secs, 10);
        assert_eq!(config.data_source.cookie_url, "https://fc.yahoo.com");
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn threshold_overrides_and_profiles_are_parsed() {
        let config = load_config_from_str(
            r#"
            [thresholds]
            max_forward_pe = 18
            min_return_on_equity = 0.2

            [[profiles]]
            name = "cash-machine"
            pass_threshold = 1
            criteria = [
                { kind = "free_cash_flow" },
                { kind = "operating_margin", name = "fat_margins", threshold = 0.3 },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.thresholds.max_forward_pe, dec!(18));
        assert_eq!(config.thresholds.min_return_on_equity, dec!(0.2));
        assert_eq!(config.thresholds.max_price_to_book, dec!(3));

        let profile = &config.profiles[0];
        assert_eq!(profile.name, "cash-machine");
        assert_eq!(profile.pass_threshold, 1);
        assert_eq!(profile.criteria[0].kind, CriterionKind::FreeCashFlow);
        assert_eq!(profile.criteria[1].name.as_deref(), Some("fat_margins"));
        assert_eq!(profile.criteria[1].threshold, Some(dec!(0.3)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = load_config_from_str("[data_source]\ntimeout_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_criterion_kind_fails_to_load() {
        let err = load_config_from_str(
            r#"
            [[profiles]]
            name = "broken"
            pass_threshold = 1
            criteria = [{ kind = "dividend_yield" }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn threshold_lookup_matches_fields() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.for_kind(CriterionKind::DebtToEquity), dec!(50));
        assert_eq!(thresholds.for_kind(CriterionKind::FreeCashFlow), dec!(0));
    }
}
