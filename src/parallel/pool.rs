use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use super::fork::ForkHandle;
use crate::error::{ForkJoinError, Result};

static COMMON_POOL: OnceLock<ForkJoinPool> = OnceLock::new();

/// Configuration for the worker pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of worker threads (0 = derive from CPU cores)
    pub threads: usize,
    /// Percentage of CPU cores to use when `threads` is 0 (1-100)
    pub thread_percentage: u8,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            thread_percentage: 100,
        }
    }
}

impl PoolConfig {
    /// Fixed-size pool with exactly `threads` workers
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.thread_percentage == 0 || self.thread_percentage > 100 {
            return Err(ForkJoinError::invalid(format!(
                "thread_percentage must be between 1 and 100, got {}",
                self.thread_percentage
            )));
        }
        Ok(())
    }

    /// Number of workers this configuration resolves to on the current machine
    pub fn resolve_workers(&self) -> usize {
        calculate_optimal_workers(self.threads, self.thread_percentage)
    }
}

/// Calculate the worker count from system resources and configuration
///
/// # Algorithm
/// ```text
/// 1. An explicit thread count wins: threads_config if threads_config > 0
/// 2. Otherwise detect available CPU cores: num_cpus::get()
/// 3. Apply percentage: cores * thread_percentage / 100
/// 4. Ensure minimum: max(1, result)
/// ```
///
/// # Examples
/// ```rust
/// use forkjoin::parallel::calculate_optimal_workers;
///
/// assert_eq!(calculate_optimal_workers(3, 50), 3); // Explicit count is honored
///
/// let workers = calculate_optimal_workers(0, 75);
/// assert!(workers >= 1); // Always at least 1 worker
/// ```
pub fn calculate_optimal_workers(threads_config: usize, thread_percentage: u8) -> usize {
    if threads_config > 0 {
        return threads_config;
    }

    let available_cores = num_cpus::get();
    std::cmp::max(1, (available_cores * thread_percentage as usize) / 100)
}

/// Work-stealing pool that runs fork/join computations
///
/// Cloning is cheap and yields a handle to the same workers, which is how
/// forked tasks reach the pool they were forked on.
#[derive(Clone)]
pub struct ForkJoinPool {
    inner: Arc<rayon::ThreadPool>,
}

impl fmt::Debug for ForkJoinPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForkJoinPool")
            .field("parallelism", &self.parallelism())
            .finish()
    }
}

impl ForkJoinPool {
    pub fn new(config: &PoolConfig) -> Result<Self> {
        config.validate()?;
        let workers = config.resolve_workers();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("forkjoin-worker-{index}"))
            .build()?;

        tracing::debug!(workers, "built fork/join pool");
        Ok(Self {
            inner: Arc::new(pool),
        })
    }

    /// Process-wide pool sized to the available hardware concurrency
    pub fn common() -> Result<&'static ForkJoinPool> {
        if let Some(pool) = COMMON_POOL.get() {
            return Ok(pool);
        }
        let pool = ForkJoinPool::new(&PoolConfig::default())?;
        // A racing initializer may win; its pool is the one everybody shares
        Ok(COMMON_POOL.get_or_init(|| pool))
    }

    /// Number of worker threads
    pub fn parallelism(&self) -> usize {
        self.inner.current_num_threads()
    }

    /// Run a root task on the pool and block until it completes
    ///
    /// The calling thread is not a worker; it waits while the root task and
    /// everything it forks execute on the pool.
    pub fn invoke<T, F>(&self, root: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send,
        T: Send,
    {
        let result = self
            .inner
            .install(|| panic::catch_unwind(AssertUnwindSafe(root)))
            .unwrap_or_else(|payload| Err(ForkJoinError::from_panic(payload)));

        if let Err(err) = &result {
            if err.is_fault() {
                tracing::warn!("root task failed: {err}");
            }
        }
        result
    }

    /// Submit a task for asynchronous execution; collect it with [`ForkHandle::join`]
    pub fn fork<T, F>(&self, task: F) -> ForkHandle<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        ForkHandle::spawn(&self.inner, task)
    }
}
