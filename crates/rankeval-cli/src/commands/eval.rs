//! Evaluate a run against relevance judgments.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use rankeval_core::export::{export_reports, ExportFormat};
use rankeval_core::prelude::*;
use std::path::PathBuf;

use crate::config::Config;

/// Command-line values for `rankeval eval`; unset ones fall back to the config file.
#[derive(Debug, Default)]
pub struct EvalArgs {
    pub qrels: Option<PathBuf>,
    pub run: Option<PathBuf>,
    pub metrics: Vec<String>,
    pub output: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub strict_duplicates: bool,
    pub per_query: bool,
}

/// Where and how to write per-query scores.
#[derive(Debug, PartialEq)]
pub struct ExportTarget {
    pub path: PathBuf,
    pub format: ExportFormat,
}

/// Combine CLI arguments with the project config into an evaluation config.
pub fn resolve(args: &EvalArgs, config: &Config) -> Result<(EvalConfig, Option<ExportTarget>)> {
    let Some(qrels) = args.qrels.clone().or_else(|| config.input.qrels.clone()) else {
        bail!("No qrels file given. Pass {} or set input.qrels", "--qrels".cyan());
    };
    let Some(run) = args.run.clone().or_else(|| config.input.run.clone()) else {
        bail!("No run file given. Pass {} or set input.run", "--run".cyan());
    };

    let metrics = if args.metrics.is_empty() {
        config.metrics.names.clone()
    } else {
        args.metrics.clone()
    };

    let policy = if args.strict_duplicates || config.judgments.strict_duplicates {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::LastWins
    };

    let target = args
        .output
        .clone()
        .or_else(|| config.output.path.clone())
        .map(|path| {
            let format = args
                .format
                .or_else(|| ExportFormat::from_path(&path))
                .unwrap_or(config.output.format);
            ExportTarget { path, format }
        });

    let eval_config = EvalConfig::new(qrels, run)
        .with_metrics(metrics)
        .with_duplicate_policy(policy);
    Ok((eval_config, target))
}

pub fn run(args: EvalArgs) -> Result<()> {
    let config = Config::load()?;
    let per_query = args.per_query || config.output.per_query;
    let (eval_config, target) = resolve(&args, &config)?;

    println!(
        "{} Evaluating {} against {}",
        "→".blue(),
        eval_config.run.display().to_string().cyan(),
        eval_config.qrels.display().to_string().cyan()
    );

    let evaluator = Evaluator::from_config(&eval_config).context("Failed to load evaluation inputs")?;
    if evaluator.judgments().duplicates() > 0 {
        println!(
            "  {} {} duplicate judgment(s) overwritten (last one wins)",
            "•".yellow(),
            evaluator.judgments().duplicates()
        );
    }

    let reports = evaluator.evaluate_all()?;
    println!();
    for report in &reports {
        println!(
            "{}: {}",
            report.metric.label().white().bold(),
            report.aggregate.mean.to_string().green()
        );
    }
    println!(
        "  {} queries in run, {} judged, {} without judgments",
        evaluator.run().len().to_string().cyan(),
        evaluator.judgments().len().to_string().cyan(),
        evaluator.unjudged_queries().to_string().yellow()
    );

    if per_query {
        print_per_query(&reports);
    }

    if let Some(target) = target {
        export_reports(&target.path, target.format, &reports)
            .with_context(|| format!("Failed to export scores to {}", target.path.display()))?;
        println!();
        println!(
            "{} Individual query scores saved to: {}",
            "✓".green().bold(),
            target.path.display().to_string().cyan()
        );
    }

    Ok(())
}

fn print_per_query(reports: &[EvaluationReport]) {
    let Some(first) = reports.first() else {
        return;
    };

    println!();
    let header: Vec<String> = reports.iter().map(|r| format!("{:>12}", r.metric.label())).collect();
    println!("  {:<20}{}", "qid".blue().bold(), header.join("").blue().bold());

    for (i, entry) in first.per_query.iter().enumerate() {
        let cells: Vec<String> = reports
            .iter()
            .map(|r| {
                r.per_query
                    .as_slice()
                    .get(i)
                    .map(|s| format!("{:>12.4}", s.score))
                    .unwrap_or_else(|| format!("{:>12}", "-"))
            })
            .collect();
        println!("  {:<20}{}", entry.qid, cells.join(""));
    }
}
