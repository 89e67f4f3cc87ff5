//! Error types for fork/join computations

use std::any::Any;

/// Errors surfaced by the pool, tasks and reducers
#[derive(Debug, thiserror::Error)]
pub enum ForkJoinError {
    /// A threshold, granularity, pool setting or task range was rejected at construction
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker pool could not be started
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),

    /// A leaf, accumulate or combine step failed
    #[error("computation fault: {0:#}")]
    Computation(anyhow::Error),

    /// A task panicked while running on the pool
    #[error("task panicked: {0}")]
    Panicked(String),
}

/// Result type alias for fork/join operations
pub type Result<T> = std::result::Result<T, ForkJoinError>;

impl ForkJoinError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ForkJoinError::InvalidConfig(message.into())
    }

    /// Convert a caught panic payload into an error, keeping the message when there is one
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        ForkJoinError::Panicked(message)
    }

    /// Whether this error came from user code rather than from setup
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            ForkJoinError::Computation(_) | ForkJoinError::Panicked(_)
        )
    }
}
