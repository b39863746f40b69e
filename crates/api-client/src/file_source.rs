use crate::error::ApiError;
use crate::{SnapshotSource, normalize_symbol};
use async_trait::async_trait;
use core_types::MetricSnapshot;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Reads snapshots from `<directory>/<SYMBOL>.json`.
///
/// Each file holds a flat JSON object keyed by provider metric names, e.g.
/// `{"returnOnEquity": 0.2, "debtToEquity": "n/a"}`. Useful offline and for
/// evaluating figures that did not come from a live provider.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    directory: PathBuf,
}

impl JsonFileSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.directory.join(format!("{symbol}.json"))
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSource {
    async fn fetch_snapshot(&self, symbol: &str) -> Result<MetricSnapshot, ApiError> {
        let symbol = normalize_symbol(symbol)?;
        let path = self.path_for(&symbol);

        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ApiError::unavailable(&symbol, format!("cannot read {}: {e}", path.display()))
        })?;
        let fields: Map<String, Value> = serde_json::from_str(&text)
            .map_err(|e| ApiError::Deserialization(format!("{}: {e}", path.display())))?;

        let snapshot =
            MetricSnapshot::from_fields(symbol.as_str(), fields.iter().map(|(k, v)| (k.as_str(), v)));
        tracing::info!(%symbol, path = %path.display(), metrics = snapshot.len(), "Loaded metric snapshot");
        Ok(snapshot)
    }
}
