use std::sync::Arc;

use super::{Characteristics, DEFAULT_MIN_SPLIT, Splittable, check_min_split};
use crate::error::Result;

/// Character sequence that only splits on whitespace
///
/// Handles produced by splitting share the same backing buffer; each one covers
/// `[cursor, end)` of it.
#[derive(Debug, Clone)]
pub struct WordSequence {
    chars: Arc<[char]>,
    cursor: usize,
    end: usize,
    min_split: usize,
}

impl WordSequence {
    pub fn new(text: &str) -> Self {
        Self::from_chars(text.chars().collect::<Vec<_>>().into(), DEFAULT_MIN_SPLIT)
    }

    /// Sequence that refuses to split when fewer than `min_split` characters remain
    pub fn with_min_split(text: &str, min_split: usize) -> Result<Self> {
        let min_split = check_min_split(min_split)?;
        Ok(Self::from_chars(
            text.chars().collect::<Vec<_>>().into(),
            min_split,
        ))
    }

    fn from_chars(chars: Arc<[char]>, min_split: usize) -> Self {
        let end = chars.len();
        Self {
            chars,
            cursor: 0,
            end,
            min_split,
        }
    }

    /// Position of the next unconsumed character in the backing text
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// One past the last character this handle covers
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn min_split(&self) -> usize {
        self.min_split
    }

    /// The characters not yet consumed
    pub fn remaining(&self) -> &[char] {
        &self.chars[self.cursor..self.end]
    }
}

impl Splittable for WordSequence {
    type Item = char;

    fn try_advance(&mut self) -> Option<char> {
        if self.cursor >= self.end {
            return None;
        }
        let c = self.chars[self.cursor];
        self.cursor += 1;
        Some(c)
    }

    /// Splits at the first whitespace at or after the midpoint of the remaining range
    ///
    /// Only the part after the midpoint is searched; a tail without whitespace
    /// leaves the sequence unsplit even if earlier whitespace exists.
    fn try_split(&mut self) -> Option<Self> {
        let remaining = self.end - self.cursor;
        if remaining < self.min_split {
            return None;
        }

        let midpoint = self.cursor + remaining / 2;
        let boundary = (midpoint..self.end).find(|&pos| self.chars[pos].is_whitespace())?;

        let prefix = Self {
            chars: Arc::clone(&self.chars),
            cursor: self.cursor,
            end: boundary,
            min_split: self.min_split,
        };
        tracing::trace!(from = self.cursor, boundary, end = self.end, "split word sequence");
        self.cursor = boundary;
        Some(prefix)
    }

    fn estimate_size(&self) -> usize {
        self.end - self.cursor
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::exact_immutable()
    }
}
