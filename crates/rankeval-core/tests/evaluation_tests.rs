//! End-to-end evaluation over files on disk.

use rankeval_core::export::{export_reports, ExportFormat};
use rankeval_core::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const QRELS: &str = "\
Q1 0 d1 2
Q1 0 d2 1
Q1 0 d3 0
Q3 0 a 0
Q3 0 b 0
";

const RUN: &str = "\
Q1\td2\t1
Q1\td1\t2
Q1\td3\t3
Q2\td1\t1
Q3\tb\t1
Q3\ta\t2
";

fn write_inputs(dir: &TempDir) -> (PathBuf, PathBuf) {
    let qrels = dir.path().join("qrels.txt");
    let run = dir.path().join("run.tsv");
    fs::write(&qrels, QRELS).unwrap();
    fs::write(&run, RUN).unwrap();
    (qrels, run)
}

fn evaluator(metrics: &[&str]) -> (TempDir, Evaluator) {
    let dir = TempDir::new().unwrap();
    let (qrels, run) = write_inputs(&dir);
    let config = EvalConfig::new(qrels, run).with_metrics(metrics.iter().copied());
    let evaluator = Evaluator::from_config(&config).expect("inputs should load");
    (dir, evaluator)
}

#[test]
fn ndcg_scenario_and_aggregate_denominator() {
    let (_dir, evaluator) = evaluator(&["ndcg_cut_3"]);
    let reports = evaluator.evaluate_all().unwrap();
    let report = &reports[0];

    let q1 = report.per_query.get("Q1").unwrap();
    let expected = (1.0 + 2.0 / 3f64.log2()) / (2.0 + 1.0 / 3f64.log2());
    assert!((q1 - expected).abs() < 1e-12, "NDCG@3(Q1) = {q1}");
    // Unjudged query and all-zero query both score 0 but still count.
    assert_eq!(report.per_query.get("Q2"), Some(0.0));
    assert_eq!(report.per_query.get("Q3"), Some(0.0));

    assert_eq!(report.aggregate.query_count, 3);
    assert!((report.aggregate.mean - q1 / 3.0).abs() < 1e-12);
}

#[test]
fn recall_scenario() {
    let dir = TempDir::new().unwrap();
    let qrels = dir.path().join("qrels.txt");
    let run = dir.path().join("run.tsv");
    fs::write(&qrels, "Q1 0 d1 2\nQ1 0 d2 1\nQ1 0 d3 0\n").unwrap();
    fs::write(&run, "Q1\td2\t1\nQ1\td3\t2\nQ1\tzz\t3\n").unwrap();

    let config = EvalConfig::new(qrels, run).with_metrics(["recall_cut_1000"]);
    let reports = Evaluator::from_config(&config).unwrap().evaluate_all().unwrap();
    assert!((reports[0].aggregate.mean - 0.5).abs() < 1e-12);
}

#[test]
fn reports_follow_metric_order() {
    let (_dir, evaluator) = evaluator(&["recall_cut_1000", "ndcg_cut_10", "mrr_cut_10"]);
    let reports = evaluator.evaluate_all().unwrap();
    let names: Vec<String> = reports.iter().map(|r| r.metric.name()).collect();
    assert_eq!(names, ["recall_cut_1000", "ndcg_cut_10", "mrr_cut_10"]);

    for report in &reports {
        let qids: Vec<&str> = report.per_query.iter().map(|s| s.qid.as_str()).collect();
        assert_eq!(qids, ["Q1", "Q2", "Q3"]);
    }
}

#[test]
fn evaluation_is_deterministic() {
    let (_a, first) = evaluator(&["ndcg_cut_10", "recall_cut_2"]);
    let (_b, second) = evaluator(&["ndcg_cut_10", "recall_cut_2"]);

    let first = first.evaluate_all().unwrap();
    let second = second.evaluate_all().unwrap();
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.per_query, b.per_query);
        assert_eq!(a.aggregate, b.aggregate);
    }
}

#[test]
fn every_score_is_in_unit_interval() {
    let (_dir, evaluator) = evaluator(&[
        "ndcg_cut_1",
        "ndcg_cut_1000",
        "recall_cut_1",
        "recall_cut_5",
        "precision_cut_2",
        "mrr_cut_3",
    ]);
    for report in evaluator.evaluate_all().unwrap() {
        for entry in &report.per_query {
            assert!(
                (0.0..=1.0).contains(&entry.score),
                "{} gave {} for {}",
                report.metric,
                entry.score,
                entry.qid
            );
        }
    }
}

#[test]
fn malformed_run_line_aborts_loading() {
    let dir = TempDir::new().unwrap();
    let (qrels, run) = write_inputs(&dir);
    fs::write(&run, "Q1\td1\t1\nQ1 d2 2\n").unwrap();

    let err = Evaluator::from_config(&EvalConfig::new(qrels, run)).unwrap_err();
    match err {
        EvalError::Parse { line, content, .. } => {
            assert_eq!(line, 2);
            assert_eq!(content, "Q1 d2 2");
        }
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn strict_duplicates_reject_repeated_judgments() {
    let dir = TempDir::new().unwrap();
    let (qrels, run) = write_inputs(&dir);
    fs::write(&qrels, "Q1 0 d1 2\nQ1 0 d1 1\n").unwrap();

    let lenient = EvalConfig::new(&qrels, &run);
    let evaluator = Evaluator::from_config(&lenient).unwrap();
    assert_eq!(evaluator.judgments().duplicates(), 1);
    assert_eq!(evaluator.judgments().label("Q1", "d1"), 1);

    let strict = lenient.with_duplicate_policy(DuplicatePolicy::Reject);
    assert!(Evaluator::from_config(&strict).unwrap_err().is_parse());
}

#[test]
fn empty_run_is_an_empty_input_error() {
    let dir = TempDir::new().unwrap();
    let (qrels, run) = write_inputs(&dir);
    fs::write(&run, "").unwrap();

    let evaluator = Evaluator::from_config(&EvalConfig::new(qrels, run)).unwrap();
    let err = evaluator.evaluate_all().unwrap_err();
    assert!(matches!(err, EvalError::EmptyInput { .. }));
}

#[test]
fn export_writes_csv_and_json() {
    let (dir, evaluator) = evaluator(&["ndcg_cut_10", "recall_cut_1000"]);
    let reports = evaluator.evaluate_all().unwrap();

    let csv_path = dir.path().join("scores.csv");
    export_reports(&csv_path, ExportFormat::Csv, &reports).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("qid,ndcg@10,recall@1000"));
    assert_eq!(lines.count(), 3);

    let json_path = dir.path().join("scores.json");
    export_reports(&json_path, ExportFormat::Json, &reports).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(2));
    assert_eq!(value[1]["metric"], "recall_cut_1000");
}
