//! Writing evaluation reports to CSV or JSON.

use crate::aggregate::EvaluationReport;
use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Output encodings for per-query scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `qid,<metric>@<k>,...` with one row per query.
    #[default]
    Csv,
    /// Pretty-printed array of reports, aggregates included.
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(EvalError::configuration(format!(
                "unsupported export format {:?} (use csv or json)",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("csv"),
            ExportFormat::Json => f.write_str("json"),
        }
    }
}

/// Write per-query scores as CSV, one column per report.
///
/// Rows follow the query order of the first report. A query missing from a
/// later report leaves that cell empty.
pub fn write_csv<W: Write>(writer: W, reports: &[EvaluationReport]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["qid".to_string()];
    header.extend(reports.iter().map(|r| r.metric.column_name()));
    csv.write_record(&header)?;

    let Some(first) = reports.first() else {
        csv.flush().map_err(|e| EvalError::Export(e.to_string()))?;
        return Ok(());
    };

    let lookups: Vec<HashMap<&str, f64>> = reports
        .iter()
        .map(|r| r.per_query.iter().map(|s| (s.qid.as_str(), s.score)).collect())
        .collect();

    for entry in first.per_query.iter() {
        let mut row = Vec::with_capacity(reports.len() + 1);
        row.push(entry.qid.clone());
        for lookup in &lookups {
            row.push(
                lookup
                    .get(entry.qid.as_str())
                    .map(|score| score.to_string())
                    .unwrap_or_default(),
            );
        }
        csv.write_record(&row)?;
    }

    csv.flush().map_err(|e| EvalError::Export(e.to_string()))?;
    Ok(())
}

/// Write reports as pretty-printed JSON.
pub fn write_json<W: Write>(writer: W, reports: &[EvaluationReport]) -> Result<()> {
    serde_json::to_writer_pretty(writer, reports)?;
    Ok(())
}

/// Write reports to `path` in the given format.
pub fn export_reports(path: &Path, format: ExportFormat, reports: &[EvaluationReport]) -> Result<()> {
    let file = File::create(path).map_err(|e| EvalError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => write_csv(&mut writer, reports)?,
        ExportFormat::Json => write_json(&mut writer, reports)?,
    }
    writer.flush().map_err(|e| EvalError::io(path, e))?;

    debug!(
        "Exported {} report(s) as {} to {}",
        reports.len(),
        format,
        path.display()
    );
    Ok(())
}
