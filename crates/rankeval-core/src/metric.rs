//! Metric names and families.
//!
//! Metrics are named `<family>_cut_<k>`, e.g. `ndcg_cut_10` or
//! `recall_cut_1000`. The cutoff is the integer after the last underscore.

use crate::error::{EvalError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The closed set of supported metric families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFamily {
    /// Normalized discounted cumulative gain.
    Ndcg,
    /// Fraction of all relevant documents found in the top k.
    Recall,
    /// Fraction of the top k that is relevant.
    Precision,
    /// Reciprocal rank of the first relevant document in the top k.
    Mrr,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 4] = [
        MetricFamily::Ndcg,
        MetricFamily::Recall,
        MetricFamily::Precision,
        MetricFamily::Mrr,
    ];

    /// Prefix used in metric names (`ndcg` in `ndcg_cut_10`).
    pub fn name(self) -> &'static str {
        match self {
            MetricFamily::Ndcg => "ndcg",
            MetricFamily::Recall => "recall",
            MetricFamily::Precision => "precision",
            MetricFamily::Mrr => "mrr",
        }
    }

    /// Human-readable label used in reports (`NDCG`).
    pub fn display_name(self) -> &'static str {
        match self {
            MetricFamily::Ndcg => "NDCG",
            MetricFamily::Recall => "Recall",
            MetricFamily::Precision => "P",
            MetricFamily::Mrr => "MRR",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MetricFamily::Ndcg => "normalized discounted cumulative gain over graded labels",
            MetricFamily::Recall => "relevant documents in the top k / all relevant documents",
            MetricFamily::Precision => "relevant documents in the top k / k",
            MetricFamily::Mrr => "1 / rank of the first relevant document within the top k",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ndcg" => Some(MetricFamily::Ndcg),
            "recall" => Some(MetricFamily::Recall),
            "precision" | "p" => Some(MetricFamily::Precision),
            "mrr" => Some(MetricFamily::Mrr),
            _ => None,
        }
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A metric family evaluated at a cutoff depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricSpec {
    pub family: MetricFamily,
    /// Cutoff depth, always positive.
    pub k: usize,
}

impl MetricSpec {
    pub fn new(family: MetricFamily, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(EvalError::configuration(format!(
                "cutoff for {} must be positive",
                family
            )));
        }
        Ok(Self { family, k })
    }

    /// Parse a `<family>_cut_<k>` metric name.
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = |reason: &str| {
            EvalError::configuration(format!(
                "invalid metric name {:?}: {} (expected <family>_cut_<k>)",
                name, reason
            ))
        };

        let (head, k) = name
            .trim()
            .rsplit_once('_')
            .ok_or_else(|| invalid("missing cutoff"))?;
        let family = head
            .strip_suffix("_cut")
            .ok_or_else(|| invalid("missing \"_cut\""))?;
        let family =
            MetricFamily::from_name(family).ok_or_else(|| invalid("unknown metric family"))?;
        let k: usize = k
            .parse()
            .map_err(|_| invalid("cutoff is not a non-negative integer"))?;
        if k == 0 {
            return Err(invalid("cutoff must be positive"));
        }

        Ok(Self { family, k })
    }

    /// Canonical metric name, e.g. `ndcg_cut_10`.
    pub fn name(&self) -> String {
        format!("{}_cut_{}", self.family.name(), self.k)
    }

    /// Short label for reports, e.g. `NDCG@10`.
    pub fn label(&self) -> String {
        format!("{}@{}", self.family.display_name(), self.k)
    }

    /// Lowercase column header, e.g. `ndcg@10`.
    pub fn column_name(&self) -> String {
        format!("{}@{}", self.family.name(), self.k)
    }
}

impl FromStr for MetricSpec {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        MetricSpec::parse(s)
    }
}

impl fmt::Display for MetricSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_cut_{}", self.family.name(), self.k)
    }
}

impl Serialize for MetricSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_names() {
        let ndcg: MetricSpec = "ndcg_cut_10".parse().unwrap();
        assert_eq!(ndcg, MetricSpec { family: MetricFamily::Ndcg, k: 10 });

        let recall = MetricSpec::parse("recall_cut_1000").unwrap();
        assert_eq!(recall.family, MetricFamily::Recall);
        assert_eq!(recall.k, 1000);
    }

    #[test]
    fn family_is_case_insensitive() {
        assert_eq!(MetricSpec::parse("NDCG_cut_5").unwrap().family, MetricFamily::Ndcg);
        assert_eq!(MetricSpec::parse("P_cut_5").unwrap().family, MetricFamily::Precision);
        assert_eq!(MetricSpec::parse("mrr_cut_10").unwrap().family, MetricFamily::Mrr);
    }

    #[test]
    fn rejects_malformed_names() {
        for name in [
            "ndcg",
            "ndcg_10",
            "ndcg_cut_",
            "ndcg_cut_ten",
            "ndcg_cut_-3",
            "ndcg_cut_0",
            "map_cut_10",
            "",
        ] {
            let err = MetricSpec::parse(name).unwrap_err();
            assert!(
                matches!(err, EvalError::Configuration(_)),
                "{name:?} should be a configuration error"
            );
        }
    }

    #[test]
    fn name_round_trips_and_is_deterministic() {
        let a = MetricSpec::parse("ndcg_cut_10").unwrap();
        let b = MetricSpec::parse(&a.name()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "ndcg_cut_10");
        assert_eq!(a.label(), "NDCG@10");
        assert_eq!(a.column_name(), "ndcg@10");
    }

    #[test]
    fn new_rejects_zero_cutoff() {
        assert!(MetricSpec::new(MetricFamily::Recall, 0).is_err());
        assert!(MetricSpec::new(MetricFamily::Recall, 1).is_ok());
    }
}
