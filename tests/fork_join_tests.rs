//! Cross-module behavior of the fork/join pool, range tasks and reducers

use forkjoin::reduce::{WordCounter, count_words_sequentially};
use forkjoin::sequence::{SliceSequence, WordSequence};
use forkjoin::task::{RangeReduction, RangeTask, Threshold, naturals};
use forkjoin::{
    ForkJoinError, ForkJoinPool, PoolConfig, fork_join_sum, parallel_reduce, sequential_sum,
};

fn pools() -> Vec<ForkJoinPool> {
    [1, 2, 4]
        .into_iter()
        .map(|threads| ForkJoinPool::new(&PoolConfig::with_threads(threads)).unwrap())
        .collect()
}

#[test]
fn test_sum_is_independent_of_threshold_and_pool_size() {
    let numbers: Vec<i64> = (1..=10_000).collect();
    for pool in pools() {
        for threshold in [1, 2, 7, 100, 10_000, 50_000] {
            assert_eq!(
                fork_join_sum(&pool, numbers.clone(), threshold).unwrap(),
                50_005_000,
                "threads={} threshold={threshold}",
                pool.parallelism()
            );
        }
    }
}

#[test]
fn test_sum_with_overflowing_partials_matches_sequential() {
    let mut numbers = vec![i64::MAX, i64::MAX, -3, i64::MIN, 7, i64::MIN];
    numbers.extend((1..=50).map(|i| if i % 2 == 0 { i64::MAX - i } else { i64::MIN + i }));
    let expected = sequential_sum(&numbers);

    for pool in pools() {
        for threshold in 1..=numbers.len() {
            assert_eq!(
                fork_join_sum(&pool, numbers.clone(), threshold).unwrap(),
                expected,
                "threads={} threshold={threshold}",
                pool.parallelism()
            );
        }
    }
}

#[test]
fn test_word_count_matches_sequential_for_every_split_setting() {
    let text = "  Lorem ipsum\tdolor sit amet,\nconsectetur   adipiscing elit; sed do \
                eiusmod tempor incididunt ut labore et dolore magna aliqua.  ";
    let expected = count_words_sequentially(text);
    assert_eq!(expected, 19);

    for pool in pools() {
        for min_split in [1, 2, 3, 10, 200] {
            for threshold in [1, 4, 16, 1_000] {
                let sequence = WordSequence::with_min_split(text, min_split).unwrap();
                let counter = parallel_reduce(
                    &pool,
                    sequence,
                    WordCounter::IDENTITY,
                    |acc: WordCounter, c: char| Ok(acc.accumulate(c)),
                    |left: WordCounter, right: WordCounter| Ok(left.combine(right)),
                    threshold,
                )
                .unwrap();
                assert_eq!(counter.count(), expected, "min_split={min_split} threshold={threshold}");
            }
        }
    }
}

#[test]
fn test_reduce_keeps_encounter_order() {
    let letters: Vec<char> = "abcdefghijklmnopqrstuvwxyz".chars().collect();
    for pool in pools() {
        let joined = parallel_reduce(
            &pool,
            SliceSequence::with_min_split(letters.clone(), 2).unwrap(),
            String::new(),
            |mut acc: String, c: char| {
                acc.push(c);
                Ok(acc)
            },
            |left: String, right: String| Ok(left + &right),
            3,
        )
        .unwrap();
        assert_eq!(joined, "abcdefghijklmnopqrstuvwxyz");
    }
}

#[test]
fn test_faults_reach_the_caller() {
    let pool = ForkJoinPool::new(&PoolConfig::with_threads(4)).unwrap();
    let reduction = RangeReduction::new(
        pool.clone(),
        Threshold::new(4).unwrap(),
        |leaf: &[i64]| {
            if leaf.contains(&13) {
                anyhow::bail!("unlucky leaf");
            }
            Ok(leaf.iter().sum::<i64>())
        },
        |a: i64, b: i64| Ok(a + b),
    );
    let err = reduction.invoke(RangeTask::new(naturals(100))).unwrap_err();
    assert!(matches!(err, ForkJoinError::Computation(_)));
    assert!(err.is_fault());
    assert!(err.to_string().contains("unlucky leaf"));

    let err = parallel_reduce(
        &pool,
        SliceSequence::new((0..1_000).collect::<Vec<u32>>()),
        0_u32,
        |acc: u32, x: u32| {
            if x == 777 {
                panic!("element 777 rejected");
            }
            Ok(acc + x)
        },
        |a: u32, b: u32| Ok(a + b),
        8,
    )
    .unwrap_err();
    assert!(matches!(err, ForkJoinError::Panicked(ref msg) if msg.contains("777")));
}

#[test]
fn test_common_pool_is_shared() {
    let first = ForkJoinPool::common().unwrap();
    let second = ForkJoinPool::common().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(fork_join_sum(first, vec![1, 2, 3], 1).unwrap(), 6);
}
