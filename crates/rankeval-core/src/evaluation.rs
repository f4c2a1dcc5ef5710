//! End-to-end evaluation from an explicit configuration value.

use crate::aggregate::EvaluationReport;
use crate::engine::MetricEngine;
use crate::error::{EvalError, Result};
use crate::judgments::{DuplicatePolicy, JudgmentSet};
use crate::metric::MetricSpec;
use crate::run::RankedRun;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Metric evaluated when none is configured.
pub const DEFAULT_METRIC: &str = "ndcg_cut_10";

/// Everything needed to evaluate one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Qrels file: `qid iter docid label`.
    pub qrels: PathBuf,
    /// Run file: `qid<TAB>docid<TAB>rank`.
    pub run: PathBuf,
    /// Metric names such as `ndcg_cut_10`.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

fn default_metrics() -> Vec<String> {
    vec![DEFAULT_METRIC.to_string()]
}

impl EvalConfig {
    pub fn new(qrels: impl Into<PathBuf>, run: impl Into<PathBuf>) -> Self {
        Self {
            qrels: qrels.into(),
            run: run.into(),
            metrics: default_metrics(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Parse every configured metric name.
    pub fn metric_specs(&self) -> Result<Vec<MetricSpec>> {
        if self.metrics.is_empty() {
            return Err(EvalError::configuration("no metrics configured"));
        }
        self.metrics.iter().map(|name| MetricSpec::parse(name)).collect()
    }
}

/// Loaded inputs plus the metrics to compute over them.
#[derive(Debug, Clone)]
pub struct Evaluator {
    judgments: JudgmentSet,
    run: RankedRun,
    metrics: Vec<MetricSpec>,
}

impl Evaluator {
    /// Build an evaluator from in-memory inputs.
    pub fn new(judgments: JudgmentSet, run: RankedRun, metrics: Vec<MetricSpec>) -> Self {
        Self {
            judgments,
            run,
            metrics,
        }
    }

    /// Validate metric names, then load both input files.
    pub fn from_config(config: &EvalConfig) -> Result<Self> {
        let metrics = config.metric_specs()?;
        let judgments = JudgmentSet::from_path(&config.qrels, config.duplicate_policy)?;
        let run = RankedRun::from_path(&config.run)?;

        info!(
            "Loaded {} judged queries and {} run queries",
            judgments.len(),
            run.len()
        );

        let evaluator = Self::new(judgments, run, metrics);
        let unjudged = evaluator.unjudged_queries();
        if unjudged > 0 {
            warn!(
                "{} of {} run queries have no judgments and score 0",
                unjudged,
                evaluator.run.len()
            );
        }
        Ok(evaluator)
    }

    /// Number of run queries that have no judgments at all.
    pub fn unjudged_queries(&self) -> usize {
        self.run
            .query_ids()
            .iter()
            .filter(|qid| self.judgments.get(qid).is_none())
            .count()
    }

    pub fn judgments(&self) -> &JudgmentSet {
        &self.judgments
    }

    pub fn run(&self) -> &RankedRun {
        &self.run
    }

    pub fn metrics(&self) -> &[MetricSpec] {
        &self.metrics
    }

    pub fn engine(&self) -> MetricEngine<'_> {
        MetricEngine::new(&self.judgments, &self.run)
    }

    /// One report per configured metric, in configuration order.
    pub fn evaluate_all(&self) -> Result<Vec<EvaluationReport>> {
        let engine = self.engine();
        self.metrics.iter().map(|&spec| engine.report(spec)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metric_is_ndcg_at_ten() {
        let config = EvalConfig::new("qrels.txt", "run.tsv");
        assert_eq!(config.metric_specs().unwrap(), vec![MetricSpec::parse("ndcg_cut_10").unwrap()]);
    }

    #[test]
    fn invalid_metric_fails_before_loading() {
        // Paths do not exist: the metric error must win.
        let config = EvalConfig::new("/nonexistent/qrels", "/nonexistent/run")
            .with_metrics(["ndcg_cut_10", "ndcg@10"]);
        let err = Evaluator::from_config(&config).unwrap_err();
        assert!(matches!(err, EvalError::Configuration(_)));
    }

    #[test]
    fn empty_metric_list_is_rejected() {
        let config = EvalConfig::new("q", "r").with_metrics(Vec::<String>::new());
        assert!(config.metric_specs().is_err());
    }

    #[test]
    fn counts_run_queries_without_judgments() {
        let judgments =
            JudgmentSet::load("Q1 0 d1 1\n".as_bytes(), "qrels", DuplicatePolicy::LastWins).unwrap();
        let run = RankedRun::load("Q1\td1\t1\nQ2\td1\t1\nQ3\td2\t1\n".as_bytes(), "run").unwrap();
        let metrics = vec![
            MetricSpec::parse("ndcg_cut_10").unwrap(),
            MetricSpec::parse("recall_cut_1000").unwrap(),
        ];
        let evaluator = Evaluator::new(judgments, run, metrics);

        assert_eq!(evaluator.unjudged_queries(), 2);
        // The count does not depend on how many metrics are evaluated.
        assert_eq!(evaluator.evaluate_all().unwrap().len(), 2);
        assert_eq!(evaluator.unjudged_queries(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let config = EvalConfig::new("/nonexistent/qrels", "/nonexistent/run");
        let err = Evaluator::from_config(&config).unwrap_err();
        assert!(matches!(err, EvalError::Io { .. }));
    }
}
