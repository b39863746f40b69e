use api_client::error::ApiError;
use api_client::{JsonFileSource, SnapshotSource};
use core_types::{Metric, MetricValue};
use rust_decimal_macros::dec;
use std::fs;

fn source_with(files: &[(&str, &str)]) -> (tempfile::TempDir, JsonFileSource) {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in files {
        fs::write(dir.path().join(name), body).unwrap();
    }
    let source = JsonFileSource::new(dir.path());
    (dir, source)
}

#[tokio::test]
async fn loads_a_snapshot_by_upper_cased_symbol() {
    let (_dir, source) = source_with(&[(
        "KO.json",
        r#"{
            "returnOnEquity": 0.42,
            "debtToEquity": "160.5",
            "forwardPE": "n/a",
            "payoutRatio": null,
            "longName": "The Coca-Cola Company"
        }"#,
    )]);

    let snapshot = source.fetch_snapshot(" ko ").await.unwrap();

    assert_eq!(snapshot.symbol(), "KO");
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.number(Metric::ReturnOnEquity), Some(dec!(0.42)));
    assert_eq!(snapshot.number(Metric::DebtToEquity), Some(dec!(160.5)));
    assert_eq!(
        snapshot.get(Metric::ForwardPe),
        Some(&MetricValue::Malformed("n/a".to_string()))
    );
    assert!(!snapshot.contains(Metric::PayoutRatio));
}

#[tokio::test]
async fn missing_file_is_data_unavailable() {
    let (_dir, source) = source_with(&[]);

    match source.fetch_snapshot("ZZZZ").await {
        Err(ApiError::DataUnavailable { symbol, .. }) => assert_eq!(symbol, "ZZZZ"),
        other => panic!("expected DataUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_is_a_deserialization_error() {
    let (_dir, source) = source_with(&[("BAD.json", "[1, 2, 3]")]);

    assert!(matches!(
        source.fetch_snapshot("BAD").await,
        Err(ApiError::Deserialization(_))
    ));
}

#[tokio::test]
async fn path_traversal_is_rejected_before_touching_the_disk() {
    let (_dir, source) = source_with(&[]);

    assert!(matches!(
        source.fetch_snapshot("../secrets").await,
        Err(ApiError::InvalidSymbol(_))
    ));
}

#[tokio::test]
async fn sources_are_usable_as_trait_objects() {
    let (_dir, source) = source_with(&[("MSFT.json", r#"{"operatingMargins": 0.45}"#)]);
    let source: Box<dyn SnapshotSource> = Box::new(source);

    let snapshot = source.fetch_snapshot("msft").await.unwrap();
    assert_eq!(snapshot.number(Metric::OperatingMargins), Some(dec!(0.45)));
}
