//! # rankeval core
//!
//! Evaluates a ranked retrieval run against graded relevance judgments.
//!
//! - **judgments** loads qrels into a `qid -> docid -> label` index
//! - **run** loads a run, keeping each query's rank order
//! - **engine** computes NDCG, Recall, Precision and MRR at a cutoff
//! - **aggregate** averages per-query scores over the queries in the run
//!
//! ## Quick Start
//!
//! ```rust
//! use rankeval_core::prelude::*;
//!
//! let qrels = "Q1 0 d1 2\nQ1 0 d2 1\nQ1 0 d3 0\n";
//! let run = "Q1\td2\t1\nQ1\td1\t2\nQ1\td3\t3\n";
//!
//! let judgments = JudgmentSet::load(qrels.as_bytes(), "qrels", DuplicatePolicy::LastWins).unwrap();
//! let run = RankedRun::load(run.as_bytes(), "run").unwrap();
//!
//! let spec: MetricSpec = "ndcg_cut_3".parse().unwrap();
//! let report = MetricEngine::new(&judgments, &run).report(spec).unwrap();
//! let expected = (1.0 + 2.0 / 3f64.log2()) / (2.0 + 1.0 / 3f64.log2());
//! assert!((report.aggregate.mean - expected).abs() < 1e-12);
//! ```

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod judgments;
pub mod metric;
pub mod prelude;
pub mod run;

pub use aggregate::{summarize, AggregateScore, EvaluationReport, PerQueryScore, PerQueryScores};
pub use engine::{evaluate, score_query, MetricEngine};
pub use error::{EvalError, Result};
pub use evaluation::{EvalConfig, Evaluator};
pub use judgments::{DuplicatePolicy, JudgmentSet, RelevanceLabel};
pub use metric::{MetricFamily, MetricSpec};
pub use run::RankedRun;
