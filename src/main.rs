use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lotplan::report::Report;
use lotplan::{PlanOutcome, parse_file, solve};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Solve a lot-sized production plan from a fixed-layout input file.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the plan input file.
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let problem = parse_file(&args.input)
        .with_context(|| format!("reading plan from {}", args.input.display()))?;
    info!(
        products = problem.product_count(),
        materials = problem.material_count(),
        "problem loaded"
    );

    match solve(&problem) {
        PlanOutcome::Optimal(solution) => print!("{}", Report::new(&problem, &solution)),
        PlanOutcome::Unsolved(status) => {
            println!("No optimal plan: solver finished with status {status:?}");
        }
    }
    Ok(())
}
