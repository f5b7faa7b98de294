//! Concurrent cross-book frequency aggregation
//!
//! `GlobalFrequency` is the only shared mutable state in the whole pipeline.
//! It wraps a sharded concurrent map so workers merging different books never
//! contend on a single lock; each add-or-insert is atomic per key. Ranking
//! consumes the map by value, so a ranked report can only ever be built from
//! a table no worker can still touch.

use dashmap::DashMap;
use serde::Serialize;

use crate::text::LocalFrequency;

/// One row of the ranked report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub word: String,
    pub count: u64,
}

/// Word counts aggregated across all books.
#[derive(Debug, Default)]
pub struct GlobalFrequency {
    counts: DashMap<String, u64>,
}

impl GlobalFrequency {
    pub fn new() -> Self {
        Self {
            counts: DashMap::new(),
        }
    }

    /// Merge one book's counts into the global table.
    ///
    /// Safe to call from many workers at once; the final value of every key
    /// is the sum of all contributions regardless of interleaving.
    pub fn merge(&self, local: LocalFrequency) {
        for (word, count) in local {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }

    /// Number of distinct words seen so far.
    pub fn distinct_words(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts.
    pub fn total_words(&self) -> u64 {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }

    /// Consume the frozen table and return the `top_n` most frequent words.
    ///
    /// Ordering is deterministic: count descending, then word ascending under
    /// byte ordering. No locale-dependent collation.
    pub fn into_ranked(self, top_n: usize) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = self
            .counts
            .into_iter()
            .map(|(word, count)| RankedEntry { word, count })
            .collect();

        entries.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        entries.truncate(top_n);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::counter;

    fn local(pairs: &[(&str, u64)]) -> LocalFrequency {
        pairs
            .iter()
            .map(|(word, count)| (word.to_string(), *count))
            .collect()
    }

    fn snapshot(global: GlobalFrequency) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = global
            .into_ranked(usize::MAX)
            .into_iter()
            .map(|entry| (entry.word, entry.count))
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn merge_is_commutative() {
        let a = local(&[("cat", 2), ("dog", 1)]);
        let b = local(&[("dog", 2), ("bird", 1)]);

        let forward = GlobalFrequency::new();
        forward.merge(a.clone());
        forward.merge(b.clone());

        let backward = GlobalFrequency::new();
        backward.merge(b);
        backward.merge(a);

        assert_eq!(snapshot(forward), snapshot(backward));
    }

    #[test]
    fn concurrent_merges_sum_per_key() {
        let global = GlobalFrequency::new();
        let workers = 8;
        let merges_per_worker = 50;

        crossbeam::thread::scope(|s| {
            let global = &global;
            for _ in 0..workers {
                s.spawn(move |_| {
                    for _ in 0..merges_per_worker {
                        global.merge(local(&[("shared", 1), ("word", 2)]));
                    }
                });
            }
        })
        .unwrap();

        let expected = (workers * merges_per_worker) as u64;
        assert_eq!(global.total_words(), expected * 3);
        let ranked = global.into_ranked(10);
        assert_eq!(
            ranked,
            vec![
                RankedEntry {
                    word: "word".into(),
                    count: expected * 2
                },
                RankedEntry {
                    word: "shared".into(),
                    count: expected
                },
            ]
        );
    }

    #[test]
    fn total_equals_sum_of_local_totals() {
        let locals = vec![
            counter::count("cat dog cat"),
            counter::count("dog dog bird"),
            counter::count("... nothing here but, punctuation ..."),
        ];
        let expected: u64 = locals
            .iter()
            .map(|local| local.values().sum::<u64>())
            .sum();

        let global = GlobalFrequency::new();
        for local in locals {
            global.merge(local);
        }

        assert_eq!(global.total_words(), expected);
    }

    #[test]
    fn ranking_breaks_ties_alphabetically() {
        let global = GlobalFrequency::new();
        global.merge(local(&[("banana", 3), ("cherry", 1), ("apple", 3)]));

        let ranked = global.into_ranked(2);
        assert_eq!(
            ranked,
            vec![
                RankedEntry {
                    word: "apple".into(),
                    count: 3
                },
                RankedEntry {
                    word: "banana".into(),
                    count: 3
                },
            ]
        );
    }

    #[test]
    fn ranking_truncates_to_requested_length() {
        let global = GlobalFrequency::new();
        global.merge(local(&[("a", 5), ("b", 4), ("c", 3), ("d", 2), ("e", 1)]));

        assert_eq!(global.into_ranked(3).len(), 3);
    }

    #[test]
    fn empty_table_ranks_to_empty_report() {
        assert!(GlobalFrequency::new().into_ranked(10).is_empty());
    }
}
