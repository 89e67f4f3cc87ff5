use std::sync::Arc;

use super::compute::RangeReduction;
use super::range::{RangeTask, Threshold};
use crate::error::Result;
use crate::parallel::ForkJoinPool;

/// Sum `numbers` on the pool, splitting ranges larger than `threshold`
///
/// Addition wraps on overflow. Wrapping addition is associative, so the result
/// is the same for every threshold and equals [`sequential_sum`].
pub fn fork_join_sum(
    pool: &ForkJoinPool,
    numbers: impl Into<Arc<[i64]>>,
    threshold: usize,
) -> Result<i64> {
    let threshold = Threshold::new(threshold)?;
    let numbers = numbers.into();
    tracing::debug!(len = numbers.len(), %threshold, "fork/join sum");

    let reduction = RangeReduction::new(
        pool.clone(),
        threshold,
        |leaf: &[i64]| Ok(sequential_sum(leaf)),
        |left: i64, right: i64| Ok(left.wrapping_add(right)),
    );
    reduction.invoke(RangeTask::new(numbers))
}

/// Single-threaded sum with the same wrapping behavior as [`fork_join_sum`]
pub fn sequential_sum(numbers: &[i64]) -> i64 {
    numbers.iter().fold(0_i64, |acc, &n| acc.wrapping_add(n))
}

/// The natural numbers `1..=n`, the workload the CLI and harness sum
pub fn naturals(n: u64) -> Arc<[i64]> {
    (1..=n as i64).collect::<Vec<_>>().into()
}
