//! Fork/join execution engine
//!
//! This module owns the worker threads that every divide-and-conquer computation in the
//! crate runs on. It knows nothing about what the work is: callers hand it closures.
//!
//! # Architecture Responsibilities
//!
//! ## What This Module Does:
//! - **Resource Discovery**: Sizes the pool from the available CPU cores using `num_cpus::get()`
//! - **Work Stealing**: Runs tasks on a rayon thread pool, so idle workers steal forked work
//! - **Fork/Join**: `fork` submits a task asynchronously, `join` waits for its result
//! - **Fault Propagation**: Panics inside tasks are caught and surfaced as errors at the join point
//!
//! ## What This Module Does NOT Do:
//! - **Splitting**: Deciding where or whether to split work belongs to `task` and `reduce`
//! - **Combination**: Merging results is done by the caller after `join`
//! - **Cancellation**: A forked task always runs to completion
//!
//! # Join Protocol
//!
//! ```text
//! join(handle)
//!   ├─ task still unclaimed?  → run it inline on the joining thread
//!   └─ task already running   → help run other pool work until the result arrives,
//!                               block on the result only when there is nothing to help with
//! ```
//!
//! Running an unclaimed task inline means a join never waits on work that nobody
//! has started, so nested fork/join cannot deadlock even on a single-thread pool.
//!
//! # Example Usage
//!
//! ```rust
//! use forkjoin::parallel::{ForkJoinPool, PoolConfig};
//!
//! let pool = ForkJoinPool::new(&PoolConfig::with_threads(2)).unwrap();
//! let total = pool
//!     .invoke(|| {
//!         let left = pool.fork(|| Ok((1..=50).sum::<i64>()));
//!         let right: i64 = (51..=100).sum();
//!         Ok(left.join()? + right)
//!     })
//!     .unwrap();
//! assert_eq!(total, 5050);
//! ```

pub mod fork;
pub mod pool;

// Re-export main types for easier access
pub use fork::ForkHandle;
pub use pool::{ForkJoinPool, PoolConfig, calculate_optimal_workers};
