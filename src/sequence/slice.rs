use std::sync::Arc;

use super::{Characteristics, DEFAULT_MIN_SPLIT, Splittable, check_min_split};
use crate::error::Result;

/// Splittable view over a shared slice, split at the midpoint
pub struct SliceSequence<T> {
    data: Arc<[T]>,
    cursor: usize,
    end: usize,
    min_split: usize,
}

impl<T> SliceSequence<T> {
    pub fn new(data: impl Into<Arc<[T]>>) -> Self {
        let data = data.into();
        let end = data.len();
        Self {
            data,
            cursor: 0,
            end,
            min_split: DEFAULT_MIN_SPLIT,
        }
    }

    pub fn with_min_split(data: impl Into<Arc<[T]>>, min_split: usize) -> Result<Self> {
        let min_split = check_min_split(min_split)?;
        Ok(Self {
            min_split,
            ..Self::new(data)
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

impl<T> Splittable for SliceSequence<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;

    fn try_advance(&mut self) -> Option<T> {
        let item = self.data[self.cursor..self.end].first()?.clone();
        self.cursor += 1;
        Some(item)
    }

    fn try_split(&mut self) -> Option<Self> {
        let remaining = self.end - self.cursor;
        if remaining < self.min_split.max(2) {
            return None;
        }
        let midpoint = self.cursor + remaining / 2;
        let prefix = Self {
            data: Arc::clone(&self.data),
            cursor: self.cursor,
            end: midpoint,
            min_split: self.min_split,
        };
        self.cursor = midpoint;
        Some(prefix)
    }

    fn estimate_size(&self) -> usize {
        self.end - self.cursor
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::exact_immutable()
    }
}
