//! rankeval CLI - score ranked runs against relevance judgments.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rankeval_core::export::ExportFormat;
use std::path::PathBuf;
use tracing::Level;

use commands::eval::EvalArgs;

#[derive(Parser)]
#[command(name = "rankeval")]
#[command(author, version, about = "rankeval - IR metrics for ranked runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a run against relevance judgments
    Eval {
        /// Qrels file: `qid iter docid label`, whitespace separated
        #[arg(long)]
        qrels: Option<PathBuf>,

        /// Run file: `qid<TAB>docid<TAB>rank`
        #[arg(long)]
        run: Option<PathBuf>,

        /// Metric name such as ndcg_cut_10 (repeatable)
        #[arg(short, long = "metric")]
        metrics: Vec<String>,

        /// Write per-query scores to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (csv or json); defaults to the output extension
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Reject qrels that judge the same document twice
        #[arg(long)]
        strict_duplicates: bool,

        /// Print the per-query score table
        #[arg(long)]
        per_query: bool,
    },

    /// Write a default rankeval.toml
    Init {
        /// Project directory (default: current directory)
        path: Option<String>,
    },

    /// List supported metric families
    Metrics,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Eval {
            qrels,
            run,
            metrics,
            output,
            format,
            strict_duplicates,
            per_query,
        } => commands::eval::run(EvalArgs {
            qrels,
            run,
            metrics,
            output,
            format,
            strict_duplicates,
            per_query,
        }),
        Commands::Init { path } => commands::init::run(path),
        Commands::Metrics => commands::metrics::run(),
    }
}

/// Logs go to stderr so stdout only carries the report.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
