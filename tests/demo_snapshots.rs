//! End-to-end runs over the bundled `config.toml` and `demos/snapshots`.

use api_client::{JsonFileSource, SnapshotSource};
use core_types::EvaluationReport;
use engine::EvaluationEngine;
use profiles::ProfileRegistry;
use std::path::PathBuf;

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn registry() -> ProfileRegistry {
    let config = configuration::load_config(root().join("config.toml")).unwrap();
    ProfileRegistry::from_config(&config).unwrap()
}

async fn evaluate_all(symbol: &str) -> Vec<EvaluationReport> {
    let registry = registry();
    let source = JsonFileSource::new(root().join("demos").join("snapshots"));
    let snapshot = source.fetch_snapshot(symbol).await.unwrap();

    let profiles = registry.select::<&str>(&[]).unwrap();
    EvaluationEngine::new()
        .evaluate_batch(&profiles, std::slice::from_ref(&snapshot))
        .unwrap()
        .remove(0)
}

#[test]
fn sample_configuration_registers_the_extra_profile_after_the_builtins() {
    let names: Vec<_> = registry().iter().map(|p| p.name().to_string()).collect();
    assert_eq!(names, ["value", "quality", "balance-sheet"]);
}

#[tokio::test]
async fn strong_company_passes_value_and_quality() {
    let reports = evaluate_all("valu").await;

    assert_eq!(reports[0].profile_name, "value");
    assert_eq!((reports[0].passed_count, reports[0].total_count), (6, 6));
    assert!(reports[0].overall_pass);

    assert_eq!((reports[1].passed_count, reports[1].total_count), (5, 5));
    assert!(reports[1].overall_pass);

    // Leverage under 30 and price-to-book at most 1.5 are stricter than the globals.
    let balance = &reports[2];
    assert_eq!(balance.results[0].name, "low_leverage");
    assert!(!balance.results[0].passed);
    assert_eq!(balance.passed_count, 1);
    assert!(!balance.overall_pass);
}

#[tokio::test]
async fn mixed_company_fails_value_but_passes_quality() {
    let reports = evaluate_all("KO").await;

    let value = &reports[0];
    assert_eq!(value.passed_count, 3);
    assert!(!value.overall_pass);
    let failed: Vec<_> = value.failed_criteria().collect();
    assert_eq!(failed, ["debt_to_equity", "forward_pe", "sustainable_growth_rate"]);

    let quality = &reports[1];
    assert_eq!(quality.passed_count, 3);
    assert!(quality.overall_pass);
}

#[tokio::test]
async fn sparse_snapshot_fails_without_errors() {
    let reports = evaluate_all("THIN").await;
    for report in &reports {
        assert_eq!(report.passed_count, 0, "{}", report.profile_name);
        assert!(!report.overall_pass);
    }
}
