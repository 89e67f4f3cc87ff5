//! Splittable sequences
//!
//! A [`Splittable`] source yields its elements one at a time and, on request,
//! hands off a prefix of itself so the prefix and the remainder can be traversed
//! independently. The reducer in [`crate::reduce`] uses these splits as partition
//! boundaries.

use serde::Serialize;

pub mod slice;
pub mod words;

pub use slice::SliceSequence;
pub use words::WordSequence;

/// Default minimum size below which sequences refuse to split
pub const DEFAULT_MIN_SPLIT: usize = 10;

/// Capabilities a sequence declares to the driver traversing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Characteristics {
    /// Element order is meaningful and splits are prefixes
    pub ordered: bool,
    /// `estimate_size` is exact
    pub sized: bool,
    /// Handles produced by `try_split` are `sized` as well
    pub subsized: bool,
    /// No element is ever absent or null
    pub nonnull: bool,
    /// The backing data cannot change during traversal
    pub immutable: bool,
}

impl Characteristics {
    /// Ordered, exact-size, immutable source of present values
    pub const fn exact_immutable() -> Self {
        Self {
            ordered: true,
            sized: true,
            subsized: true,
            nonnull: true,
            immutable: true,
        }
    }
}

/// A source of elements that can report its size and carve off a prefix
pub trait Splittable: Sized + Send {
    type Item;

    /// Consume and return the next element, or `None` once exhausted
    fn try_advance(&mut self) -> Option<Self::Item>;

    /// Split off a prefix of the remaining elements
    ///
    /// `None` means the sequence prefers to be traversed sequentially from here;
    /// it is not an error and should not be retried.
    fn try_split(&mut self) -> Option<Self>;

    /// Number of elements left to traverse
    fn estimate_size(&self) -> usize;

    fn characteristics(&self) -> Characteristics;

    /// Whether another element is available
    fn has_remaining(&self) -> bool {
        self.estimate_size() > 0
    }
}

/// Validate a split granularity
pub(crate) fn check_min_split(min_split: usize) -> crate::Result<usize> {
    if min_split == 0 {
        return Err(crate::ForkJoinError::InvalidConfig(
            "minimum split size must be at least 1".to_string(),
        ));
    }
    Ok(min_split)
}
