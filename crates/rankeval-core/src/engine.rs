//! Metric computation.
//!
//! Every metric is a pure function of a query's ranking truncated to `k` and
//! its relevance judgments. [`score_query`] is the single dispatch point over
//! [`MetricFamily`]; adding a family touches this module and `metric` only.
//!
//! A document id repeated inside one ranking earns credit only at its first
//! occurrence. Later copies still take up their rank but count as
//! non-relevant, which keeps all scores within [0, 1].

use crate::aggregate::{summarize, EvaluationReport, PerQueryScore, PerQueryScores};
use crate::error::Result;
use crate::judgments::{ideal_labels, relevant_count, JudgmentSet, QueryJudgments, RelevanceLabel};
use crate::metric::{MetricFamily, MetricSpec};
use crate::run::RankedRun;
use std::collections::HashSet;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluates metrics for one run against one judgment set.
#[derive(Debug, Clone, Copy)]
pub struct MetricEngine<'a> {
    judgments: &'a JudgmentSet,
    run: &'a RankedRun,
}

impl<'a> MetricEngine<'a> {
    pub fn new(judgments: &'a JudgmentSet, run: &'a RankedRun) -> Self {
        Self { judgments, run }
    }

    /// Per-query scores for every query in the run.
    pub fn evaluate(&self, spec: MetricSpec) -> PerQueryScores {
        evaluate(self.judgments, self.run, spec)
    }

    /// Per-query scores plus their mean.
    pub fn report(&self, spec: MetricSpec) -> Result<EvaluationReport> {
        let per_query = self.evaluate(spec);
        let aggregate = summarize(&per_query)?;
        Ok(EvaluationReport {
            metric: spec,
            aggregate,
            per_query,
        })
    }
}

/// Score every query present in `run`, in run order.
///
/// Queries without judgments score 0.
pub fn evaluate(judgments: &JudgmentSet, run: &RankedRun, spec: MetricSpec) -> PerQueryScores {
    let score_one = |qid: &String| {
        let ranking = run.ranking(qid).unwrap_or(&[]);
        let score = match judgments.get(qid) {
            Some(judged) => score_query(spec.family, ranking, judged, spec.k),
            None => 0.0,
        };
        PerQueryScore::new(qid.clone(), score)
    };

    #[cfg(feature = "parallel")]
    let scores: Vec<PerQueryScore> = run.query_ids().par_iter().map(score_one).collect();
    #[cfg(not(feature = "parallel"))]
    let scores: Vec<PerQueryScore> = run.query_ids().iter().map(score_one).collect();

    debug!("Evaluated {} over {} queries", spec, scores.len());

    PerQueryScores::new(spec, scores)
}

/// Score a single ranking with the given metric family.
pub fn score_query(
    family: MetricFamily,
    ranking: &[String],
    judgments: &QueryJudgments,
    k: usize,
) -> f64 {
    match family {
        MetricFamily::Ndcg => ndcg_at_k(ranking, judgments, k),
        MetricFamily::Recall => recall_at_k(ranking, judgments, k),
        MetricFamily::Precision => precision_at_k(ranking, judgments, k),
        MetricFamily::Mrr => reciprocal_rank_at_k(ranking, judgments, k),
    }
}

/// Labels of the top-k documents, 0 for unjudged docs and repeated ids.
fn ranked_labels(ranking: &[String], judgments: &QueryJudgments, k: usize) -> Vec<RelevanceLabel> {
    let mut seen: HashSet<&str> = HashSet::new();
    ranking
        .iter()
        .take(k)
        .map(|docid| {
            if seen.insert(docid.as_str()) {
                judgments.get(docid).copied().unwrap_or(0)
            } else {
                0
            }
        })
        .collect()
}

/// Discounted cumulative gain: `sum(label[i] / log2(i + 2))`.
pub fn dcg(labels: &[RelevanceLabel]) -> f64 {
    labels
        .iter()
        .enumerate()
        .map(|(i, &label)| label as f64 / (i as f64 + 2.0).log2())
        .sum()
}

/// NDCG@k with linear gain. 0 when the ideal DCG is not positive.
pub fn ndcg_at_k(ranking: &[String], judgments: &QueryJudgments, k: usize) -> f64 {
    let gain = dcg(&ranked_labels(ranking, judgments, k));

    let mut ideal = ideal_labels(judgments);
    ideal.truncate(k);
    let ideal_gain = dcg(&ideal);

    if ideal_gain > 0.0 {
        gain / ideal_gain
    } else {
        0.0
    }
}

/// Recall@k: relevant documents in the top k over all relevant documents.
pub fn recall_at_k(ranking: &[String], judgments: &QueryJudgments, k: usize) -> f64 {
    let total_relevant = relevant_count(judgments);
    if total_relevant == 0 {
        return 0.0;
    }
    let retrieved_relevant = ranked_labels(ranking, judgments, k)
        .into_iter()
        .filter(|&label| label > 0)
        .count();
    retrieved_relevant as f64 / total_relevant as f64
}

/// Precision@k: relevant documents in the top k over k.
pub fn precision_at_k(ranking: &[String], judgments: &QueryJudgments, k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    let hits = ranked_labels(ranking, judgments, k)
        .into_iter()
        .filter(|&label| label > 0)
        .count();
    hits as f64 / k as f64
}

/// Reciprocal rank of the first relevant document within the top k.
pub fn reciprocal_rank_at_k(ranking: &[String], judgments: &QueryJudgments, k: usize) -> f64 {
    ranked_labels(ranking, judgments, k)
        .iter()
        .position(|&label| label > 0)
        .map_or(0.0, |i| 1.0 / (i as f64 + 1.0))
}
