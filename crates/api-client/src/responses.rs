use serde::Deserialize;
use serde_json::{Map, Value};

/// The quoteSummary modules that carry the metrics the criteria read.
///
/// When a key appears in more than one module, the earlier module wins.
pub const MODULES: [&str; 3] = ["financialData", "defaultKeyStatistics", "summaryDetail"];

static ABSENT: Value = Value::Null;

/// Top-level body of `GET /v10/finance/quoteSummary/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryEnvelope {
    pub quote_summary: QuoteSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub error: Option<QuoteSummaryError>,
}

/// Error object returned for unknown symbols and similar failures.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

/// Body of requests rejected before reaching quoteSummary, e.g. a missing or
/// expired crumb: `{"finance":{"error":{"code":"Unauthorized",...}}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FinanceErrorEnvelope {
    pub finance: FinanceError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinanceError {
    pub error: QuoteSummaryError,
}

/// Flattens the modules of one quoteSummary result into `(key, value)` pairs.
///
/// Fields arrive as `{"raw": 0.15, "fmt": "15.00%"}`, or as `{}` when the
/// provider has no figure; the latter maps to `null`, i.e. absent.
pub fn flatten_modules(result: &Map<String, Value>) -> Vec<(&str, &Value)> {
    MODULES
        .iter()
        .filter_map(|module| result.get(*module).and_then(Value::as_object))
        .flat_map(|fields| fields.iter())
        .map(|(key, value)| (key.as_str(), raw_value(value)))
        .collect()
}

fn raw_value(value: &Value) -> &Value {
    match value {
        Value::Object(field) => field.get("raw").unwrap_or(&ABSENT),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_values_are_extracted_and_empty_fields_are_absent() {
        let result = json!({
            "financialData": {
                "returnOnEquity": { "raw": 1.5, "fmt": "150%" },
                "freeCashflow": {},
                "currentPrice": { "raw": 190.1 }
            },
            "summaryDetail": {
                "payoutRatio": { "raw": 0.15 },
                "maxAge": 1
            }
        });
        let fields = flatten_modules(result.as_object().unwrap());

        assert!(fields.contains(&("returnOnEquity", &json!(1.5))));
        assert!(fields.contains(&("freeCashflow", &Value::Null)));
        assert!(fields.contains(&("payoutRatio", &json!(0.15))));
        assert!(fields.contains(&("maxAge", &json!(1))));
    }

    #[test]
    fn earlier_modules_come_first() {
        let result = json!({
            "summaryDetail": { "forwardPE": { "raw": 30.0 } },
            "defaultKeyStatistics": { "forwardPE": { "raw": 28.0 } }
        });
        let fields = flatten_modules(result.as_object().unwrap());
        assert_eq!(fields[0], ("forwardPE", &json!(28.0)));
    }
}
