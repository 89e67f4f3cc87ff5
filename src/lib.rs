//! # forkjoin - Fork/join reductions on a work-stealing pool
//!
//! Divide-and-conquer over indexable data and splittable sequences: a task
//! either solves its piece directly or splits, forks one half, computes the
//! other and joins.
//!
//! ## Features
//!
//! - **Fork/join tasks**: [`ForkJoinPool::fork`] and [`ForkHandle::join`] over a rayon pool
//! - **Range reductions**: [`fork_join_sum`] and the generic [`task::RangeReduction`]
//! - **Splittable sequences**: [`sequence::Splittable`], with word-boundary splitting
//!   in [`sequence::WordSequence`]
//! - **Ordered parallel reduce**: [`parallel_reduce`] and [`count_words`]
//!
//! ## Quick Start
//!
//! ```bash
//! # Sum 1..=10,000,000 with fork/join
//! forkjoin sum
//!
//! # Count words without ever splitting one
//! forkjoin words "the quick brown fox"
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod parallel;
pub mod reduce;
pub mod sequence;
pub mod task;

pub use cli::{Cli, Output};
pub use config::{ForkJoinConfig, Settings};
pub use error::{ForkJoinError, Result};
pub use parallel::{ForkHandle, ForkJoinPool, PoolConfig};
pub use reduce::{WordCounter, count_words, parallel_reduce};
pub use task::{fork_join_sum, sequential_sum};
