use crate::error::ApiError;
use crate::responses::{FinanceErrorEnvelope, MODULES, QuoteSummaryEnvelope, flatten_modules};
use crate::{SnapshotSource, normalize_symbol};
use async_trait::async_trait;
use configuration::DataSourceSettings;
use core_types::MetricSnapshot;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// A snapshot source backed by the Yahoo Finance quoteSummary endpoint.
///
/// quoteSummary only answers requests that carry a session cookie and the matching
/// "crumb" token. The client obtains both on first use, shares the crumb across
/// clones, and renews it once when a request is rejected with 401.
#[derive(Clone)]
pub struct YahooFinanceClient {
    client: reqwest::Client,
    base_url: String,
    cookie_url: String,
    crumb: Arc<Mutex<Option<String>>>,
}

impl YahooFinanceClient {
    pub fn new(settings: &DataSourceSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self::with_client(client, settings))
    }

    /// Uses a preconfigured HTTP client. It must keep cookies between requests.
    pub fn with_client(client: reqwest::Client, settings: &DataSourceSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            cookie_url: settings.cookie_url.clone(),
            crumb: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the cached crumb, or performs the handshake when there is none or
    /// the cached one is `rejected`.
    async fn crumb(&self, symbol: &str, rejected: Option<&str>) -> Result<String, ApiError> {
        let mut cached = self.crumb.lock().await;
        if let Some(current) = cached.as_deref() {
            if Some(current) != rejected {
                return Ok(current.to_string());
            }
        }

        let crumb = self.request_crumb(symbol).await?;
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    async fn request_crumb(&self, symbol: &str) -> Result<String, ApiError> {
        // The cookie endpoint typically answers 404; only the Set-Cookie header matters.
        self.client
            .get(&self.cookie_url)
            .send()
            .await
            .map_err(|e| ApiError::unavailable(symbol, e))?;

        let response = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::unavailable(symbol, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::unavailable(symbol, e))?;

        let crumb = body.trim();
        if !status.is_success() || crumb.is_empty() || crumb.starts_with(['<', '{']) {
            return Err(ApiError::unavailable(
                symbol,
                format!("could not obtain a session crumb (HTTP {status})"),
            ));
        }

        tracing::debug!("Obtained Yahoo Finance session crumb");
        Ok(crumb.to_string())
    }

    async fn quote_summary(&self, symbol: &str, crumb: &str) -> Result<(StatusCode, String), ApiError> {
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol);
        tracing::debug!(%symbol, %url, "Fetching quote summary");

        let response = self
            .client
            .get(&url)
            .query(&[("modules", MODULES.join(",")), ("crumb", crumb.to_string())])
            .send()
            .await
            .map_err(|e| ApiError::unavailable(symbol, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::unavailable(symbol, e))?;
        Ok((status, body))
    }
}

#[async_trait]
impl SnapshotSource for YahooFinanceClient {
    async fn fetch_snapshot(&self, symbol: &str) -> Result<MetricSnapshot, ApiError> {
        let symbol = normalize_symbol(symbol)?;

        let crumb = self.crumb(&symbol, None).await?;
        let (mut status, mut body) = self.quote_summary(&symbol, &crumb).await?;
        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(%symbol, "Crumb rejected, renewing session");
            let renewed = self.crumb(&symbol, Some(&crumb)).await?;
            (status, body) = self.quote_summary(&symbol, &renewed).await?;
        }

        let snapshot = parse_quote_summary(&symbol, status, &body)?;
        tracing::info!(%symbol, metrics = snapshot.len(), "Fetched metric snapshot");
        Ok(snapshot)
    }
}

/// Turns a quoteSummary response body into a snapshot.
///
/// Unknown symbols come back either as an `error` object (usually with a 404) or as
/// an empty `result`; rejected sessions come back as a `finance.error` object. All
/// of these are reported as `DataUnavailable`.
pub fn parse_quote_summary(
    symbol: &str,
    status: StatusCode,
    body: &str,
) -> Result<MetricSnapshot, ApiError> {
    let envelope = match serde_json::from_str::<QuoteSummaryEnvelope>(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            if let Ok(rejected) = serde_json::from_str::<FinanceErrorEnvelope>(body) {
                let error = rejected.finance.error;
                return Err(ApiError::unavailable(
                    symbol,
                    format!("{}: {}", error.code, error.description),
                ));
            }
            if !status.is_success() {
                return Err(ApiError::unavailable(symbol, format!("HTTP {status}")));
            }
            return Err(ApiError::Deserialization(e.to_string()));
        }
    };

    if let Some(error) = envelope.quote_summary.error {
        return Err(ApiError::unavailable(
            symbol,
            format!("{}: {}", error.code, error.description),
        ));
    }
    if !status.is_success() {
        return Err(ApiError::unavailable(symbol, format!("HTTP {status}")));
    }

    let result = envelope
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| ApiError::unavailable(symbol, "no quote summary returned"))?;

    Ok(MetricSnapshot::from_fields(symbol, flatten_modules(&result)))
}
