use serde::{Deserialize, Serialize};

use super::parallel_reduce;
use crate::error::Result;
use crate::parallel::ForkJoinPool;
use crate::sequence::{DEFAULT_MIN_SPLIT, WordSequence};

/// Sample text used by the CLI when no input is given
pub const SAMPLE_SENTENCE: &str = " Nel   mezzo del cammin  di nostra  vita \
mi  ritrovai in una  selva oscura \
che la  dritta via era   smarrita ";

/// Partial word count of one partition
///
/// `last_space` records whether the partition so far ends in whitespace, so the
/// next non-whitespace character starts a new word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCounter {
    count: usize,
    last_space: bool,
}

impl Default for WordCounter {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl WordCounter {
    pub const IDENTITY: WordCounter = WordCounter {
        count: 0,
        last_space: true,
    };

    pub fn new(count: usize, last_space: bool) -> Self {
        Self { count, last_space }
    }

    pub fn accumulate(self, c: char) -> Self {
        if c.is_whitespace() {
            Self {
                last_space: true,
                ..self
            }
        } else if self.last_space {
            Self {
                count: self.count + 1,
                last_space: false,
            }
        } else {
            self
        }
    }

    /// Merge with the partition that immediately follows this one
    pub fn combine(self, right: Self) -> Self {
        Self {
            count: self.count + right.count,
            last_space: right.last_space,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn last_space(&self) -> bool {
        self.last_space
    }
}

/// Tuning for the parallel word count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCountConfig {
    /// Sequences shorter than this are never split
    pub min_split: usize,
    /// Partitions at or below this many characters are traversed sequentially
    pub threshold: usize,
}

impl Default for WordCountConfig {
    fn default() -> Self {
        Self {
            min_split: DEFAULT_MIN_SPLIT,
            threshold: DEFAULT_MIN_SPLIT,
        }
    }
}

/// Count whitespace-separated words on the pool with default tuning
pub fn count_words(pool: &ForkJoinPool, text: &str) -> Result<usize> {
    count_words_with(pool, text, &WordCountConfig::default())
}

pub fn count_words_with(pool: &ForkJoinPool, text: &str, config: &WordCountConfig) -> Result<usize> {
    let sequence = WordSequence::with_min_split(text, config.min_split)?;
    let counter = parallel_reduce(
        pool,
        sequence,
        WordCounter::IDENTITY,
        |counter, c| Ok(counter.accumulate(c)),
        |left, right| Ok(left.combine(right)),
        config.threshold,
    )?;
    Ok(counter.count())
}

/// Single-threaded word count
pub fn count_words_sequentially(text: &str) -> usize {
    let mut counter = 0;
    let mut last_space = true;
    for c in text.chars() {
        if c.is_whitespace() {
            last_space = true;
        } else {
            if last_space {
                counter += 1;
            }
            last_space = false;
        }
    }
    counter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::PoolConfig;

    fn pool() -> ForkJoinPool {
        ForkJoinPool::new(&PoolConfig::with_threads(4)).unwrap()
    }

    #[test]
    fn test_accumulate_transitions() {
        let state = WordCounter::IDENTITY.accumulate('a');
        assert_eq!(state, WordCounter::new(1, false));
        assert_eq!(state.accumulate('b'), WordCounter::new(1, false));
        assert_eq!(state.accumulate(' '), WordCounter::new(1, true));
        assert_eq!(state.accumulate(' ').accumulate('c'), WordCounter::new(2, false));
        assert!(WordCounter::IDENTITY.last_space());
        assert!(!state.last_space());
        assert!(state.accumulate('\u{00A0}').last_space());
    }

    #[test]
    fn test_combine_keeps_right_trailing_state() {
        let left = WordCounter::new(3, false);
        let right = WordCounter::new(2, true);
        assert_eq!(left.combine(right), WordCounter::new(5, true));
        assert_eq!(right.combine(left), WordCounter::new(5, false));
        assert_eq!(WordCounter::IDENTITY.combine(left), left);
    }

    #[test]
    fn test_sample_sentence() {
        assert_eq!(count_words_sequentially(SAMPLE_SENTENCE), 19);
        assert_eq!(count_words(&pool(), SAMPLE_SENTENCE).unwrap(), 19);
    }

    #[test]
    fn test_quick_brown_fox() {
        let config = WordCountConfig {
            min_split: 10,
            threshold: 1,
        };
        assert_eq!(count_words_with(&pool(), "the quick brown fox", &config).unwrap(), 4);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(count_words(&pool(), "").unwrap(), 0);
        assert_eq!(count_words_sequentially(""), 0);
    }

    #[test]
    fn test_mixed_whitespace() {
        let text = "alpha\tbeta\n\ngamma \u{2003}delta\r\nepsilon";
        assert_eq!(count_words_sequentially(text), 5);
        let config = WordCountConfig {
            min_split: 2,
            threshold: 1,
        };
        assert_eq!(count_words_with(&pool(), text, &config).unwrap(), 5);
    }

    #[test]
    fn test_matches_sequential_count_for_varied_tuning() {
        let pool = pool();
        let text: String = (0..3_000)
            .map(|i| match (i * 31) % 11 {
                0 | 1 => ' ',
                2 => '\n',
                _ => char::from(b'a' + (i % 26) as u8),
            })
            .collect();
        let expected = count_words_sequentially(&text);

        for (min_split, threshold) in [(1, 1), (2, 3), (10, 10), (64, 1), (500, 200), (10_000, 1)] {
            let config = WordCountConfig {
                min_split,
                threshold,
            };
            assert_eq!(
                count_words_with(&pool, &text, &config).unwrap(),
                expected,
                "min_split {min_split}, threshold {threshold}"
            );
        }
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let zero_split = WordCountConfig {
            min_split: 0,
            threshold: 1,
        };
        assert!(count_words_with(&pool(), "a b", &zero_split).is_err());

        let zero_threshold = WordCountConfig {
            min_split: 10,
            threshold: 0,
        };
        assert!(count_words_with(&pool(), "a b", &zero_threshold).is_err());
    }
}
