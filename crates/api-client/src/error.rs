use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build the HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("No data available for '{symbol}': {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid symbol: '{0}'")]
    InvalidSymbol(String),
}

impl ApiError {
    pub(crate) fn unavailable(symbol: &str, reason: impl ToString) -> Self {
        ApiError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        }
    }
}
