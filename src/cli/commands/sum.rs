//! Sum command implementation
//!
//! Sums 1..=N with the fork/join task and checks the answer against a
//! sequential pass over the same numbers.

use std::time::Instant;

use anyhow::{Result, bail};
use clap::Args;
use serde_json::json;

use super::Context;
use crate::parallel::ForkJoinPool;
use crate::task::{fork_join_sum, naturals, sequential_sum};

#[derive(Args, Debug, Default)]
pub struct SumArgs {
    /// Sum the natural numbers 1..=N
    #[arg(short, long)]
    pub n: Option<u64>,

    /// Ranges at or below this many elements are summed sequentially
    #[arg(short, long)]
    pub threshold: Option<usize>,
}

/// Execute the sum command
pub fn execute(args: SumArgs, ctx: &Context<'_>) -> Result<()> {
    let settings = ctx.settings(json!({
        "sum": { "n": args.n, "threshold": args.threshold }
    }))?;
    let output = ctx.output;
    let pool = ForkJoinPool::new(&settings.pool)?;

    let numbers = naturals(settings.sum.n);
    output.verbose(&format!("Prepared {} numbers", numbers.len()));

    let start = Instant::now();
    let total = fork_join_sum(&pool, numbers.clone(), settings.sum.threshold)?;
    let elapsed = start.elapsed();

    let expected = sequential_sum(&numbers);
    if total != expected {
        bail!("fork/join sum {total} differs from sequential sum {expected}");
    }

    output.header("Fork/join sum");
    output.table_row("Range", &format!("1..={}", settings.sum.n));
    output.table_row("Threshold", &settings.sum.threshold.to_string());
    output.table_row("Workers", &pool.parallelism().to_string());
    output.table_row("Elapsed", &format!("{:.3} ms", elapsed.as_secs_f64() * 1000.0));
    output.result(&total.to_string());
    output.success("Matches the sequential sum");

    Ok(())
}
