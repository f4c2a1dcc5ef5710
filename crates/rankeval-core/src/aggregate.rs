//! Aggregation of per-query scores.

use crate::error::{EvalError, Result};
use crate::metric::MetricSpec;
use serde::Serialize;

/// Score of a single query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerQueryScore {
    pub qid: String,
    pub score: f64,
}

impl PerQueryScore {
    pub fn new(qid: impl Into<String>, score: f64) -> Self {
        Self {
            qid: qid.into(),
            score,
        }
    }
}

/// Per-query scores of one metric, in run order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerQueryScores {
    metric: MetricSpec,
    scores: Vec<PerQueryScore>,
}

impl PerQueryScores {
    pub fn new(metric: MetricSpec, scores: Vec<PerQueryScore>) -> Self {
        Self { metric, scores }
    }

    pub fn metric(&self) -> MetricSpec {
        self.metric
    }

    /// Score of one query, if it was in the run.
    pub fn get(&self, qid: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.qid == qid).map(|s| s.score)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PerQueryScore> {
        self.scores.iter()
    }

    pub fn as_slice(&self) -> &[PerQueryScore] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<'a> IntoIterator for &'a PerQueryScores {
    type Item = &'a PerQueryScore;
    type IntoIter = std::slice::Iter<'a, PerQueryScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.iter()
    }
}

/// Mean score over all queries of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateScore {
    pub mean: f64,
    /// Number of queries the mean was taken over, judged or not.
    pub query_count: usize,
}

/// One metric's complete result, ready for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub metric: MetricSpec,
    pub aggregate: AggregateScore,
    pub per_query: PerQueryScores,
}

/// Arithmetic mean of per-query scores.
///
/// Fails with [`EvalError::EmptyInput`] when there are no queries.
pub fn summarize(scores: &PerQueryScores) -> Result<AggregateScore> {
    let n = scores.len();
    if n == 0 {
        return Err(EvalError::EmptyInput {
            metric: scores.metric().name(),
        });
    }

    let total: f64 = scores.iter().map(|s| s.score).sum();
    Ok(AggregateScore {
        mean: total / n as f64,
        query_count: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> MetricSpec {
        MetricSpec::parse("ndcg_cut_10").unwrap()
    }

    #[test]
    fn mean_over_all_queries() {
        let scores = PerQueryScores::new(
            spec(),
            vec![
                PerQueryScore::new("Q1", 1.0),
                PerQueryScore::new("Q2", 0.0),
                PerQueryScore::new("Q3", 0.5),
            ],
        );
        let agg = summarize(&scores).unwrap();
        assert!((agg.mean - 0.5).abs() < 1e-12);
        assert_eq!(agg.query_count, 3);
    }

    #[test]
    fn empty_input_is_an_error() {
        let scores = PerQueryScores::new(spec(), Vec::new());
        let err = summarize(&scores).unwrap_err();
        assert!(matches!(err, EvalError::EmptyInput { ref metric } if metric == "ndcg_cut_10"));
    }

    #[test]
    fn per_query_detail_is_unmodified() {
        let scores = PerQueryScores::new(
            spec(),
            vec![PerQueryScore::new("B", 0.25), PerQueryScore::new("A", 0.75)],
        );
        summarize(&scores).unwrap();
        let qids: Vec<&str> = scores.iter().map(|s| s.qid.as_str()).collect();
        assert_eq!(qids, ["B", "A"]);
        assert_eq!(scores.get("A"), Some(0.75));
        assert_eq!(scores.get("C"), None);
    }
}
