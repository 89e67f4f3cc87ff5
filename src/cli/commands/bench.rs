//! Bench command implementation
//!
//! Runs each summation strategy several times over 1..=N and reports the
//! fastest run, with the result it produced. Range strategies never build
//! the numbers; the others sum a prepared slice.

use std::time::{Duration, Instant};

use anyhow::{Context as _, Result, bail};
use clap::Args;
use rayon::prelude::*;
use serde_json::json;

use super::Context;
use crate::parallel::ForkJoinPool;
use crate::task::{fork_join_sum, naturals, sequential_sum};

#[derive(Args, Debug, Default)]
pub struct BenchArgs {
    /// Sum the natural numbers 1..=N
    #[arg(short, long)]
    pub n: Option<u64>,

    /// Runs per strategy; the fastest is reported
    #[arg(short, long)]
    pub runs: Option<usize>,

    /// Fork/join leaf size
    #[arg(short, long)]
    pub threshold: Option<usize>,
}

/// Fastest observed run of one strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement<R> {
    pub fastest: Duration,
    pub result: R,
}

/// Run `f` `runs` times and keep the fastest duration and its result
pub fn measure_perf<R, F>(runs: usize, mut f: F) -> Result<Measurement<R>>
where
    F: FnMut() -> Result<R>,
{
    let mut best: Option<Measurement<R>> = None;
    for run in 0..runs {
        let start = Instant::now();
        let result = f()?;
        let elapsed = start.elapsed();
        tracing::trace!(run, ?elapsed, "bench run");

        if best.as_ref().is_none_or(|b| elapsed < b.fastest) {
            best = Some(Measurement {
                fastest: elapsed,
                result,
            });
        }
    }
    best.context("at least one run is required")
}

/// Execute the bench command
pub fn execute(args: BenchArgs, ctx: &Context<'_>) -> Result<()> {
    let settings = ctx.settings(json!({
        "sum": { "n": args.n, "threshold": args.threshold },
        "bench": { "runs": args.runs }
    }))?;
    let output = ctx.output;
    let pool = ForkJoinPool::new(&settings.pool)?;

    let n = settings.sum.n;
    let runs = settings.bench.runs;
    let threshold = settings.sum.threshold;
    let numbers = naturals(n);

    output.header("Summation strategies");
    output.table_row("Range", &format!("1..={n}"));
    output.table_row("Runs", &runs.to_string());
    output.table_row("Workers", &pool.parallelism().to_string());

    let last = n as i64;
    let strategies: Vec<(&str, Measurement<i64>)> = vec![
        (
            "Iterative loop",
            measure_perf(runs, || {
                let mut acc = 0_i64;
                for i in 1..=last {
                    acc = acc.wrapping_add(i);
                }
                Ok(acc)
            })?,
        ),
        (
            "Sequential fold",
            measure_perf(runs, || Ok(sequential_sum(&numbers)))?,
        ),
        (
            "Range sum",
            measure_perf(runs, || Ok((1..=last).fold(0, i64::wrapping_add)))?,
        ),
        (
            "Parallel range sum",
            measure_perf(runs, || {
                Ok(pool.invoke(|| {
                    Ok((1..=last).into_par_iter().reduce(|| 0, i64::wrapping_add))
                })?)
            })?,
        ),
        (
            "Rayon parallel iterator",
            measure_perf(runs, || {
                Ok(pool.invoke(|| {
                    Ok(numbers.par_iter().copied().reduce(|| 0, i64::wrapping_add))
                })?)
            })?,
        ),
        (
            "Fork/join task",
            measure_perf(runs, || Ok(fork_join_sum(&pool, numbers.clone(), threshold)?))?,
        ),
    ];

    let expected = strategies[0].1.result;
    for (name, measurement) in &strategies {
        output.table_row(
            name,
            &format!(
                "{:.3} ms (result {})",
                measurement.fastest.as_secs_f64() * 1000.0,
                measurement.result
            ),
        );
        if measurement.result != expected {
            bail!("{name} produced {} instead of {expected}", measurement.result);
        }
    }

    let (fastest, _) = strategies
        .iter()
        .min_by_key(|(_, m)| m.fastest)
        .context("no strategies measured")?;
    output.result(&format!("Fastest: {fastest}"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_perf_keeps_a_result_per_run() {
        let mut calls = 0;
        let m = measure_perf(5, || {
            calls += 1;
            Ok(calls)
        })
        .unwrap();
        assert_eq!(calls, 5);
        assert!((1..=5).contains(&m.result));
    }

    #[test]
    fn test_measure_perf_propagates_errors() {
        let err = measure_perf(3, || -> Result<()> { bail!("strategy broke") }).unwrap_err();
        assert!(err.to_string().contains("strategy broke"));
    }

    #[test]
    fn test_measure_perf_requires_a_run() {
        assert!(measure_perf(0, || Ok(1)).is_err());
    }
}
