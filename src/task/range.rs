use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::Arc;

use crate::error::{ForkJoinError, Result};

/// Sequential cutoff: ranges at or below this size are not split further
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Threshold(NonZeroUsize);

impl Threshold {
    /// Rejects 0, which would split forever
    pub fn new(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(Threshold)
            .ok_or_else(|| ForkJoinError::invalid("threshold must be at least 1"))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Whether a range of `len` elements should be computed sequentially
    pub fn is_leaf(self, len: usize) -> bool {
        len <= self.get()
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view over `data[start..end]`
pub struct RangeTask<T> {
    data: Arc<[T]>,
    start: usize,
    end: usize,
}

impl<T> Clone for RangeTask<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            start: self.start,
            end: self.end,
        }
    }
}

impl<T> fmt::Debug for RangeTask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeTask")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("backing_len", &self.data.len())
            .finish()
    }
}

impl<T> RangeTask<T> {
    /// Root task covering the whole sequence
    pub fn new(data: Arc<[T]>) -> Self {
        let end = data.len();
        Self {
            data,
            start: 0,
            end,
        }
    }

    /// Task over `data[range]`; the range must lie within the data
    pub fn with_range(data: Arc<[T]>, range: Range<usize>) -> Result<Self> {
        if range.start > range.end || range.end > data.len() {
            return Err(ForkJoinError::invalid(format!(
                "task range [{}, {}) is outside a sequence of length {}",
                range.start,
                range.end,
                data.len()
            )));
        }
        Ok(Self {
            data,
            start: range.start,
            end: range.end,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data[self.start..self.end]
    }

    /// Split at the midpoint: the left half takes ⌈len/2⌉ elements, the right ⌊len/2⌋
    pub fn split(&self) -> (Self, Self) {
        let mid = self.start + self.len().div_ceil(2);
        let left = Self {
            data: Arc::clone(&self.data),
            start: self.start,
            end: mid,
        };
        let right = Self {
            data: Arc::clone(&self.data),
            start: mid,
            end: self.end,
        };
        (left, right)
    }
}
