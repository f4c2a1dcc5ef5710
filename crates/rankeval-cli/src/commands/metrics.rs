//! List supported metric families.

use anyhow::Result;
use colored::Colorize;
use rankeval_core::{MetricFamily, MetricSpec};

pub fn run() -> Result<()> {
    println!("{}", "Supported metrics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    for family in MetricFamily::ALL {
        println!(
            "  {:<20} {}",
            pattern(family).cyan(),
            family.description()
        );
    }
    println!();
    println!("Example: {}", "rankeval eval -m ndcg_cut_10 -m recall_cut_1000".dimmed());
    Ok(())
}

fn pattern(family: MetricFamily) -> String {
    format!("{}_cut_<k>", family.name())
}
