//! Parallel reduction over splittable sequences
//!
//! The driver asks a [`Splittable`] sequence to split while its partitions are
//! larger than the threshold. Each split forks the prefix, reduces the remainder
//! on the current thread, joins the prefix and combines `prefix ⊕ remainder`, so
//! results are always merged in sequence order even though partitions finish in
//! any order. A partition that cannot or should not split is traversed
//! sequentially from a fresh identity.

use std::sync::Arc;

use crate::error::{ForkJoinError, Result};
use crate::parallel::ForkJoinPool;
use crate::sequence::Splittable;
use crate::task::Threshold;

pub mod word_count;

pub use word_count::{
    SAMPLE_SENTENCE, WordCountConfig, WordCounter, count_words, count_words_sequentially,
    count_words_with,
};

type AccumulateFn<T, A> = dyn Fn(A, T) -> anyhow::Result<A> + Send + Sync;
type CombineFn<A> = dyn Fn(A, A) -> anyhow::Result<A> + Send + Sync;

/// Identity, per-element accumulation and partition combination for one reduction
pub struct Reducer<T, A> {
    identity: A,
    accumulate: Box<AccumulateFn<T, A>>,
    combine: Box<CombineFn<A>>,
    threshold: Threshold,
}

impl<T, A> Reducer<T, A>
where
    T: 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Build a reducer; partitions at or below `threshold` elements are not split
    pub fn new<F, C>(identity: A, accumulate: F, combine: C, threshold: usize) -> Result<Self>
    where
        F: Fn(A, T) -> anyhow::Result<A> + Send + Sync + 'static,
        C: Fn(A, A) -> anyhow::Result<A> + Send + Sync + 'static,
    {
        Ok(Self {
            identity,
            accumulate: Box::new(accumulate),
            combine: Box::new(combine),
            threshold: Threshold::new(threshold)?,
        })
    }

    /// Reduce `sequence` on `pool`, blocking until the result is available
    pub fn reduce<S>(self, pool: &ForkJoinPool, sequence: S) -> Result<A>
    where
        S: Splittable<Item = T> + 'static,
    {
        tracing::debug!(
            size = sequence.estimate_size(),
            threshold = %self.threshold,
            "parallel reduce"
        );
        let reducer = Arc::new(self);
        pool.invoke(|| reduce_partition(pool, &reducer, sequence))
    }

    fn should_split<S: Splittable>(&self, sequence: &S) -> bool {
        // Without an exact size the threshold cannot be applied
        !sequence.characteristics().sized || !self.threshold.is_leaf(sequence.estimate_size())
    }

    fn traverse<S>(&self, mut sequence: S) -> Result<A>
    where
        S: Splittable<Item = T>,
    {
        let mut state = self.identity.clone();
        while let Some(item) = sequence.try_advance() {
            state = (self.accumulate)(state, item).map_err(ForkJoinError::Computation)?;
        }
        Ok(state)
    }
}

fn reduce_partition<S, A>(
    pool: &ForkJoinPool,
    reducer: &Arc<Reducer<S::Item, A>>,
    mut sequence: S,
) -> Result<A>
where
    S: Splittable + 'static,
    S::Item: 'static,
    A: Clone + Send + Sync + 'static,
{
    if reducer.should_split(&sequence) {
        if let Some(prefix) = sequence.try_split() {
            let forked_pool = pool.clone();
            let forked_reducer = Arc::clone(reducer);
            let left = pool.fork(move || reduce_partition(&forked_pool, &forked_reducer, prefix));
            let right = reduce_partition(pool, reducer, sequence)?;
            let left = left.join()?;
            return (reducer.combine)(left, right).map_err(ForkJoinError::Computation);
        }
    }
    reducer.traverse(sequence)
}

/// Reduce a splittable sequence on `pool`
///
/// `identity` seeds every partition, `accumulate` folds one element into a
/// partition's state and `combine` merges two adjacent partitions, left first.
/// `threshold` must be at least 1.
pub fn parallel_reduce<S, A, F, C>(
    pool: &ForkJoinPool,
    sequence: S,
    identity: A,
    accumulate: F,
    combine: C,
    threshold: usize,
) -> Result<A>
where
    S: Splittable + 'static,
    S::Item: 'static,
    A: Clone + Send + Sync + 'static,
    F: Fn(A, S::Item) -> anyhow::Result<A> + Send + Sync + 'static,
    C: Fn(A, A) -> anyhow::Result<A> + Send + Sync + 'static,
{
    Reducer::new(identity, accumulate, combine, threshold)?.reduce(pool, sequence)
}
