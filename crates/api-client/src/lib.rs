use crate::error::ApiError;
use async_trait::async_trait;
use configuration::DataSourceSettings;
use core_types::MetricSnapshot;
use std::path::PathBuf;

pub mod error;
pub mod file_source;
pub mod responses;
pub mod yahoo;
// --- Public API ---
pub use file_source::JsonFileSource;
pub use yahoo::YahooFinanceClient;

/// The interface for anything that can produce a metric snapshot for a symbol.
///
/// This trait is the contract the application composes ahead of the evaluation
/// engine, allowing the underlying implementation (live or file-backed) to be
/// swapped out. The engine itself never sees it.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetches the current metrics for `symbol`.
    ///
    /// Fails with `ApiError::DataUnavailable` when the symbol is unknown or the
    /// upstream source cannot be reached.
    async fn fetch_snapshot(&self, symbol: &str) -> Result<MetricSnapshot, ApiError>;
}

/// Creates the configured snapshot source.
///
/// A snapshot directory (from the command line or `data_source.snapshot_dir`)
/// selects the file-backed source; otherwise the live Yahoo Finance client is used.
pub fn create_source(
    settings: &DataSourceSettings,
    snapshot_dir: Option<PathBuf>,
) -> Result<Box<dyn SnapshotSource>, ApiError> {
    match snapshot_dir.or_else(|| settings.snapshot_dir.clone()) {
        Some(directory) => {
            let source = JsonFileSource::new(directory);
            tracing::debug!(directory = %source.directory().display(), "Using file snapshot source");
            Ok(Box::new(source))
        }
        None => Ok(Box::new(YahooFinanceClient::new(settings)?)),
    }
}

/// Trims and upper-cases a ticker symbol.
///
/// Only characters that appear in exchange tickers are accepted (letters, digits,
/// `.`, `-`, `^`, `=`), which also keeps symbols safe to use in URLs and file names.
pub fn normalize_symbol(raw: &str) -> Result<String, ApiError> {
    let symbol = raw.trim().to_ascii_uppercase();
    let valid = !symbol.is_empty()
        && !symbol.starts_with('.')
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

    if valid {
        Ok(symbol)
    } else {
        Err(ApiError::InvalidSymbol(raw.to_string()))
    }
}
