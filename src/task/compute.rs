use std::sync::Arc;

use anyhow::Context;

use super::range::{RangeTask, Threshold};
use crate::error::{ForkJoinError, Result};
use crate::parallel::ForkJoinPool;

type LeafFn<T, R> = dyn Fn(&[T]) -> anyhow::Result<R> + Send + Sync;
type CombineFn<R> = dyn Fn(R, R) -> anyhow::Result<R> + Send + Sync;

/// A divide-and-conquer reduction: how to compute a leaf and how to merge two halves
///
/// The threshold is fixed here and inherited unchanged by every subtask.
pub struct RangeReduction<T, R> {
    pool: ForkJoinPool,
    threshold: Threshold,
    leaf: Box<LeafFn<T, R>>,
    combine: Box<CombineFn<R>>,
}

impl<T, R> RangeReduction<T, R>
where
    T: Send + Sync + 'static,
    R: Send + 'static,
{
    pub fn new<L, C>(pool: ForkJoinPool, threshold: Threshold, leaf: L, combine: C) -> Self
    where
        L: Fn(&[T]) -> anyhow::Result<R> + Send + Sync + 'static,
        C: Fn(R, R) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        Self {
            pool,
            threshold,
            leaf: Box::new(leaf),
            combine: Box::new(combine),
        }
    }

    /// Run `task` as the root of the reduction and wait for the result
    pub fn invoke(self, task: RangeTask<T>) -> Result<R> {
        let reduction = Arc::new(self);
        let pool = reduction.pool.clone();
        pool.invoke(|| compute(&reduction, task))
    }
}

/// Compute one task: sequentially at or below the threshold, otherwise fork the
/// left half, compute the right half here, then join the left half
pub fn compute<T, R>(reduction: &Arc<RangeReduction<T, R>>, task: RangeTask<T>) -> Result<R>
where
    T: Send + Sync + 'static,
    R: Send + 'static,
{
    if reduction.threshold.is_leaf(task.len()) {
        return (reduction.leaf)(task.as_slice())
            .with_context(|| format!("computing range [{}, {})", task.start(), task.end()))
            .map_err(ForkJoinError::Computation);
    }

    let (left_task, right_task) = task.split();
    tracing::trace!(
        start = left_task.start(),
        mid = left_task.end(),
        end = right_task.end(),
        "splitting range task"
    );

    let forked = Arc::clone(reduction);
    let left = reduction.pool.fork(move || compute(&forked, left_task));
    let right = compute(reduction, right_task)?;
    let left = left.join()?;

    (reduction.combine)(left, right).map_err(ForkJoinError::Computation)
}
