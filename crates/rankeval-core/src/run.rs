//! Ranked runs.
//!
//! A run file holds one retrieved document per line, strictly tab-separated:
//!
//! ```text
//! query_id<TAB>document_id<TAB>rank-or-score
//! ```
//!
//! Line order is rank order: the n-th line seen for a query is that query's
//! n-th ranked result, whatever the third column says. Duplicate document ids
//! are kept as separate ranks.

use crate::error::{EvalError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// A system's ranked documents per query.
#[derive(Debug, Clone, Default)]
pub struct RankedRun {
    /// Query ids in order of first appearance.
    order: Vec<String>,
    rankings: HashMap<String, Vec<String>>,
}

impl RankedRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a run from a tab-separated file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| EvalError::io(path, e))?;
        Self::load(BufReader::new(file), &path.display().to_string())
    }

    /// Parse a run from any buffered reader.
    pub fn load<R: BufRead>(reader: R, source_name: &str) -> Result<Self> {
        let mut run = RankedRun::new();
        let mut entries = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| EvalError::io(source_name, e))?;
            let trimmed = line.trim_end();
            if trimmed.trim_start().is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split('\t').collect();
            let [qid, docid, _rank] = fields[..] else {
                return Err(EvalError::parse(
                    source_name,
                    line_no,
                    trimmed,
                    format!("expected 3 tab-separated fields, found {}", fields.len()),
                ));
            };
            let (qid, docid) = (qid.trim(), docid.trim());
            if qid.is_empty() || docid.is_empty() {
                return Err(EvalError::parse(
                    source_name,
                    line_no,
                    trimmed,
                    "empty query or document id",
                ));
            }

            run.push(qid, docid);
            entries += 1;
        }

        debug!(
            "Loaded run from {}: {} queries, {} entries",
            source_name,
            run.len(),
            entries
        );
        Ok(run)
    }

    /// Append a document at the next rank of a query.
    pub fn push(&mut self, qid: &str, docid: &str) {
        match self.rankings.get_mut(qid) {
            Some(docs) => docs.push(docid.to_string()),
            None => {
                self.order.push(qid.to_string());
                self.rankings.insert(qid.to_string(), vec![docid.to_string()]);
            }
        }
    }

    /// Ranked document ids of a query (rank 1 first).
    pub fn ranking(&self, qid: &str) -> Option<&[String]> {
        self.rankings.get(qid).map(Vec::as_slice)
    }

    /// Query ids in order of first appearance.
    pub fn query_ids(&self) -> &[String] {
        &self.order
    }

    /// (qid, ranking) pairs in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.order
            .iter()
            .map(move |qid| (qid.as_str(), self.rankings[qid].as_slice()))
    }

    /// Number of distinct queries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
