//! Relevance judgments (qrels).
//!
//! A qrels file holds one judgment per line:
//!
//! ```text
//! query_id  iteration  document_id  relevance
//! Q1        0          d1           2
//! ```
//!
//! Fields are separated by any ASCII whitespace. The iteration column is
//! ignored. Labels are base-10 integers; 0 means "judged not relevant" and
//! documents that were never judged look up as 0.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Graded relevance of a document for a query.
pub type RelevanceLabel = i64;

/// Judgments for a single query: docid -> label.
pub type QueryJudgments = HashMap<String, RelevanceLabel>;

/// What to do when a (qid, docid) pair is judged more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later line overwrites the earlier one (logged and counted).
    #[default]
    LastWins,
    /// A repeated pair is a parse error.
    Reject,
}

/// All judgments of an evaluation, indexed by query then document.
#[derive(Debug, Clone, Default)]
pub struct JudgmentSet {
    queries: HashMap<String, QueryJudgments>,
    duplicates: usize,
}

impl JudgmentSet {
    /// Create an empty judgment set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load judgments from a qrels file.
    pub fn from_path(path: impl AsRef<Path>, policy: DuplicatePolicy) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| EvalError::io(path, e))?;
        Self::load(BufReader::new(file), &path.display().to_string(), policy)
    }

    /// Parse judgments from any buffered reader.
    ///
    /// `source_name` only appears in error messages.
    pub fn load<R: BufRead>(reader: R, source_name: &str, policy: DuplicatePolicy) -> Result<Self> {
        let mut set = JudgmentSet::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| EvalError::io(source_name, e))?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_ascii_whitespace().collect();
            let [qid, _iteration, docid, label] = fields[..] else {
                return Err(EvalError::parse(
                    source_name,
                    line_no,
                    trimmed,
                    format!("expected 4 whitespace-separated fields, found {}", fields.len()),
                ));
            };

            let label: RelevanceLabel = label.parse().map_err(|_| {
                EvalError::parse(
                    source_name,
                    line_no,
                    trimmed,
                    format!("relevance label {:?} is not an integer", label),
                )
            })?;

            if let Some(previous) = set.insert(qid, docid, label) {
                if policy == DuplicatePolicy::Reject {
                    return Err(EvalError::parse(
                        source_name,
                        line_no,
                        trimmed,
                        format!("duplicate judgment for ({}, {})", qid, docid),
                    ));
                }
                warn!(
                    "{}:{}: judgment for ({}, {}) overwrites label {} with {}",
                    source_name, line_no, qid, docid, previous, label
                );
            }
        }

        debug!(
            "Loaded {} judged queries from {} ({} duplicates)",
            set.len(),
            source_name,
            set.duplicates
        );
        Ok(set)
    }

    /// Insert a judgment, returning the label it replaced, if any.
    pub fn insert(&mut self, qid: &str, docid: &str, label: RelevanceLabel) -> Option<RelevanceLabel> {
        let previous = self
            .queries
            .entry(qid.to_string())
            .or_default()
            .insert(docid.to_string(), label);
        if previous.is_some() {
            self.duplicates += 1;
        }
        previous
    }

    /// Judgments for one query, or `None` if the query was never judged.
    pub fn get(&self, qid: &str) -> Option<&QueryJudgments> {
        self.queries.get(qid)
    }

    /// Label of a document; 0 when the query or document is unjudged.
    pub fn label(&self, qid: &str, docid: &str) -> RelevanceLabel {
        self.get(qid)
            .and_then(|docs| docs.get(docid))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents judged relevant (label > 0) for a query.
    pub fn relevant_count(&self, qid: &str) -> usize {
        self.get(qid).map_or(0, relevant_count)
    }

    /// Number of judged queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// How many lines overwrote an earlier judgment of the same pair.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

/// Count of documents with a positive label.
pub(crate) fn relevant_count(judgments: &QueryJudgments) -> usize {
    judgments.values().filter(|&&label| label > 0).count()
}

/// Labels sorted in descending order. The sort is stable.
pub(crate) fn ideal_labels(judgments: &QueryJudgments) -> Vec<RelevanceLabel> {
    let mut labels: Vec<RelevanceLabel> = judgments.values().copied().collect();
    labels.sort_by(|a, b| b.cmp(a));
    labels
}
