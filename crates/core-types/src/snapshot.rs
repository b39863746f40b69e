use crate::enums::Metric;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A single metric value after normalization at the acquisition boundary.
///
/// Providers are loosely typed: a ratio may arrive as a JSON number, as a numeric
/// string, or as a placeholder such as `"n/a"`. Anything that reads as a number
/// becomes `Number`; everything else is kept verbatim as `Malformed` so that
/// predicates can fail it without aborting the evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricValue {
    Number(Decimal),
    Malformed(String),
}

impl MetricValue {
    /// Normalizes a raw JSON value. `null` means the metric is absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => {
                let text = n.to_string();
                Some(parse_decimal(&text).map_or(Self::Malformed(text), Self::Number))
            }
            Value::String(s) => Some(Self::from(s.as_str())),
            other => Some(Self::Malformed(other.to_string())),
        }
    }

    /// Returns the numeric value, or `None` if the value could not be interpreted.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            MetricValue::Number(value) => Some(*value),
            MetricValue::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, MetricValue::Malformed(_))
    }
}

impl From<Decimal> for MetricValue {
    fn from(value: Decimal) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(raw: &str) -> Self {
        parse_decimal(raw.trim()).map_or_else(|| MetricValue::Malformed(raw.to_string()), MetricValue::Number)
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Number(value) => match value.to_f64() {
                Some(float) => serializer.serialize_f64(float),
                None => serializer.serialize_str(&value.to_string()),
            },
            MetricValue::Malformed(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        MetricValue::from_json(&raw).ok_or_else(|| de::Error::custom("metric value must not be null"))
    }
}

/// Accepts plain decimal notation and the exponent notation some providers emit
/// for very large or very small figures.
fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// An immutable set of financial metrics for one subject at one point in time.
///
/// Snapshots are built by an acquisition source and only ever read by the
/// criteria library. A metric that is not present is unknown, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    symbol: String,
    #[serde(default)]
    metrics: BTreeMap<Metric, MetricValue>,
}

impl MetricSnapshot {
    /// Creates an empty snapshot for `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style setter, consumed while the snapshot is being assembled.
    pub fn with(mut self, metric: Metric, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(metric, value.into());
        self
    }

    /// Normalizes raw provider fields into a snapshot.
    ///
    /// Keys that do not name a known [`Metric`] are ignored, `null` values are
    /// treated as absent, and when a key appears more than once the first
    /// non-null occurrence wins.
    pub fn from_fields<'a, I>(symbol: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut metrics = BTreeMap::new();
        for (key, raw) in fields {
            let Some(metric) = Metric::from_key(key) else {
                continue;
            };
            if metrics.contains_key(&metric) {
                continue;
            }
            if let Some(value) = MetricValue::from_json(raw) {
                if value.is_malformed() {
                    tracing::debug!(%metric, ?value, "Metric value is not numeric");
                }
                metrics.insert(metric, value);
            }
        }

        Self {
            symbol: symbol.into(),
            metrics,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn get(&self, metric: Metric) -> Option<&MetricValue> {
        self.metrics.get(&metric)
    }

    /// The numeric value of `metric`, or `None` if it is absent or malformed.
    pub fn number(&self, metric: Metric) -> Option<Decimal> {
        self.get(metric).and_then(MetricValue::as_decimal)
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.metrics.contains_key(&metric)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &MetricValue)> {
        self.metrics.iter().map(|(metric, value)| (*metric, value))
    }
}
