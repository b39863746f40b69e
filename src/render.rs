use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use core_types::{EvaluationReport, MetricSnapshot, MetricValue};
use profiles::{InvestorProfile, ProfileRegistry};

/// The outcome for one symbol of a batch run.
#[derive(Debug)]
pub struct BatchRow {
    pub symbol: String,
    pub outcome: Result<Vec<EvaluationReport>, String>,
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn verdict_cell(passed: bool) -> Cell {
    if passed {
        Cell::new("PASS").fg(Color::Green)
    } else {
        Cell::new("FAIL").fg(Color::Red)
    }
}

/// "4 of 6 passed (needs 4)"
pub fn summary_line(report: &EvaluationReport) -> String {
    format!(
        "{} of {} passed (needs {})",
        report.passed_count, report.total_count, report.pass_threshold
    )
}

/// One row per profile, for a symbol evaluated against several profiles.
pub fn summary_table(evaluations: &[(&InvestorProfile, EvaluationReport)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Profile", "Passed", "Verdict"]);
    for (_, report) in evaluations {
        table.add_row(vec![
            Cell::new(&report.profile_name),
            Cell::new(format!("Passed {} of {}", report.passed_count, report.total_count)),
            verdict_cell(report.overall_pass),
        ]);
    }
    table
}

/// The per-criterion breakdown of one report, in declared order.
pub fn breakdown_table(profile: &InvestorProfile, report: &EvaluationReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Criterion", "Rule", "Result"]);
    for (binding, result) in profile.criteria().iter().zip(&report.results) {
        table.add_row(vec![
            Cell::new(&result.name),
            Cell::new(binding.describe()),
            verdict_cell(result.passed),
        ]);
    }
    table
}

/// The metrics the snapshot carries, in a stable order.
pub fn metrics_table(snapshot: &MetricSnapshot) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    for (metric, value) in snapshot.iter() {
        let cell = match value {
            MetricValue::Number(number) => Cell::new(number),
            MetricValue::Malformed(raw) => Cell::new(format!("{raw} (not numeric)")).fg(Color::Yellow),
        };
        table.add_row(vec![Cell::new(metric), cell]);
    }
    table
}

pub fn print_evaluation(snapshot: &MetricSnapshot, evaluations: &[(&InvestorProfile, EvaluationReport)]) {
    println!("\nEvaluation of {}", snapshot.symbol());
    println!("{}", metrics_table(snapshot));
    if evaluations.len() > 1 {
        println!("{}", summary_table(evaluations));
    }

    for (profile, report) in evaluations {
        match profile.description() {
            Some(description) => println!("\n{} ({description})", profile.name()),
            None => println!("\n{}", profile.name()),
        }
        println!("{}", breakdown_table(profile, report));
        println!("Overall: {}, {}", report.verdict_label(), summary_line(report));
    }
}

/// Symbols in input order, one column per profile.
pub fn batch_table(profiles: &[&InvestorProfile], rows: &[BatchRow]) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Symbol")];
    header.extend(profiles.iter().map(|profile| Cell::new(profile.name())));
    table.set_header(header);

    for row in rows {
        let mut cells = vec![Cell::new(&row.symbol)];
        match &row.outcome {
            Ok(reports) => {
                cells.extend(reports.iter().map(|report| verdict_cell(report.overall_pass)))
            }
            Err(reason) => cells.push(Cell::new(format!("unavailable: {reason}")).fg(Color::Yellow)),
        }
        table.add_row(cells);
    }
    table
}

pub fn print_batch(profiles: &[&InvestorProfile], rows: &[BatchRow]) {
    println!("{}", batch_table(profiles, rows));
    for row in rows {
        if let Ok(reports) = &row.outcome {
            for report in reports {
                println!(
                    "{} / {}: {}, {}",
                    row.symbol,
                    report.profile_name,
                    report.verdict_label(),
                    summary_line(report)
                );
            }
        }
    }
}

pub fn profiles_table(registry: &ProfileRegistry) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Profile", "Threshold", "Criteria", "Description"]);
    for profile in registry.iter() {
        let criteria = profile
            .criteria()
            .iter()
            .map(|binding| format!("{}: {}", binding.name(), binding.describe()))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(profile.name()),
            Cell::new(format!("{} of {}", profile.pass_threshold(), profile.criteria().len())),
            Cell::new(criteria),
            Cell::new(profile.description().unwrap_or("")),
        ]);
    }
    table
}
