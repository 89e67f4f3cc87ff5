//! Divide-and-conquer tasks over contiguous ranges
//!
//! A task is a plain record, a shared slice plus `[start, end)`, and the
//! recursion lives in free functions: a range at or below the [`Threshold`] is
//! reduced sequentially, anything larger is split at its midpoint, the left half
//! is forked, the right half is computed on the current thread and the left
//! result is joined last.

pub mod compute;
pub mod range;
pub mod sum;

pub use compute::RangeReduction;
pub use range::{RangeTask, Threshold};
pub use sum::{fork_join_sum, naturals, sequential_sum};
