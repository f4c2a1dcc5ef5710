//! Convenience re-exports.
//!
//! ```rust
//! use rankeval_core::prelude::*;
//! ```

pub use crate::aggregate::{summarize, AggregateScore, EvaluationReport, PerQueryScore, PerQueryScores};
pub use crate::engine::{evaluate, MetricEngine};
pub use crate::error::EvalError;
pub use crate::evaluation::{EvalConfig, Evaluator, DEFAULT_METRIC};
pub use crate::export::{export_reports, ExportFormat};
pub use crate::judgments::{DuplicatePolicy, JudgmentSet, RelevanceLabel};
pub use crate::metric::{MetricFamily, MetricSpec};
pub use crate::run::RankedRun;
