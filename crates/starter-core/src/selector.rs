//! Weighted random employee selection with cumulative-probability bucketing.
//!
//! Every draw reshuffles the catalog, takes one uniform threshold `r` in
//! `[0, 1)` and walks the shuffled records accumulating weight. Each record
//! contributes two adjacent buckets, primary then shard:
//!
//! ```text
//! 0 ── A.probability ── A.shard ── B.probability ── B.shard ── ... ── 1
//! ```
//!
//! The first bucket whose running total exceeds `r` wins (`r < acc`, so a
//! threshold sitting exactly on a boundary belongs to the next bucket). If the
//! catalog's weights sum to less than `r`, the draw produces nothing.

use rand::Rng;
use tracing::{debug, info};

use crate::employee::{ProbabilityGroup, ProbabilityRecord, SelectedEntry};

/// Source of randomness for shuffling and threshold draws.
///
/// Every [`rand::Rng`] is a `RandomSource`; tests substitute scripted sources
/// to force exact thresholds and permutations.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, bound)`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Fisher–Yates shuffle driven by `rng`.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for current in (1..items.len()).rev() {
        let pick = rng.next_index(current + 1);
        items.swap(current, pick);
    }
}

/// Walk `records` in order and return the entry whose bucket contains `threshold`.
pub fn draw<'a, I>(records: I, threshold: f64) -> Option<SelectedEntry>
where
    I: IntoIterator<Item = &'a ProbabilityRecord>,
{
    let mut acc = 0.0;
    for record in records {
        acc += record.probability;
        if threshold < acc {
            return Some(SelectedEntry::from_record(record, false));
        }
        acc += record.shard_probability;
        if threshold < acc {
            return Some(SelectedEntry::from_record(record, true));
        }
    }
    None
}

/// Draw `limit` independent weighted selections from `catalog`.
///
/// `group` has already been applied when the catalog was mapped; it is only
/// recorded here. Blank-name records are skipped. Draws that fall past the
/// catalog's total weight are dropped, so the result may be shorter than
/// `limit`.
pub fn select_employees<R: RandomSource + ?Sized>(
    catalog: &[ProbabilityRecord],
    limit: usize,
    group: ProbabilityGroup,
    rng: &mut R,
) -> Vec<SelectedEntry> {
    info!(limit, group = %group, catalog = catalog.len(), "selecting employees");

    let mut working: Vec<&ProbabilityRecord> = catalog.iter().filter(|r| r.is_valid()).collect();
    let mut selected = Vec::with_capacity(limit);

    for _ in 0..limit {
        shuffle(&mut working, rng);
        let threshold = rng.next_f64();
        match draw(working.iter().copied(), threshold) {
            Some(entry) => selected.push(entry),
            None => debug!(threshold, "draw exceeded catalog weight, no entry"),
        }
    }

    info!(selected = selected.len(), "selected employees");
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, VecDeque};

    /// Replays fixed thresholds and shuffle indices.
    struct Scripted {
        thresholds: VecDeque<f64>,
        indices: VecDeque<usize>,
    }

    impl Scripted {
        fn new(thresholds: &[f64], indices: &[usize]) -> Self {
            Self {
                thresholds: thresholds.iter().copied().collect(),
                indices: indices.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            self.thresholds.pop_front().expect("threshold script exhausted")
        }

        fn next_index(&mut self, bound: usize) -> usize {
            let index = self.indices.pop_front().expect("index script exhausted");
            assert!(index < bound, "scripted index {index} out of bound {bound}");
            index
        }
    }

    fn record(name: &str, probability: f64, shard: f64) -> ProbabilityRecord {
        ProbabilityRecord::new(name, "R", probability, shard)
    }

    fn entry(name: &str, is_shard: bool) -> SelectedEntry {
        SelectedEntry {
            name: name.into(),
            grade: "R".into(),
            is_shard,
        }
    }

    #[test]
    fn boundary_belongs_to_next_bucket() {
        let catalog = [record("A", 0.25, 0.25), record("B", 0.5, 0.0)];

        assert_eq!(draw(&catalog, 0.0), Some(entry("A", false)));
        assert_eq!(draw(&catalog, 0.2499), Some(entry("A", false)));
        assert_eq!(draw(&catalog, 0.25), Some(entry("A", true)));
        assert_eq!(draw(&catalog, 0.5), Some(entry("B", false)));
        assert_eq!(draw(&catalog, 0.9999), Some(entry("B", false)));
    }

    #[test]
    fn zero_weight_bucket_never_wins() {
        let catalog = [record("A", 0.0, 0.5), record("B", 0.5, 0.0)];
        assert_eq!(draw(&catalog, 0.0), Some(entry("A", true)));
        assert_eq!(draw(&catalog, 0.5), Some(entry("B", false)));
    }

    #[test]
    fn short_catalog_draw_is_a_no_op() {
        let catalog = [record("A", 0.25, 0.25)];
        let mut rng = Scripted::new(&[0.9], &[]);
        let selected = select_employees(&catalog, 1, ProbabilityGroup::GoldCoin, &mut rng);
        assert!(selected.is_empty());
    }

    #[test]
    fn short_draws_do_not_stop_later_draws() {
        let catalog = [record("A", 0.25, 0.25)];
        let mut rng = Scripted::new(&[0.9, 0.3, 0.6, 0.1], &[]);
        let selected = select_employees(&catalog, 4, ProbabilityGroup::GoldCoin, &mut rng);
        assert_eq!(selected, vec![entry("A", true), entry("A", false)]);
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let selected = select_employees(&[], 5, ProbabilityGroup::IsCoin, &mut rng);
        assert!(selected.is_empty());
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let catalog = [record("A", 1.0, 0.0)];
        let mut rng = Scripted::new(&[], &[]);
        assert!(select_employees(&catalog, 0, ProbabilityGroup::GoldCoin, &mut rng).is_empty());
    }

    #[test]
    fn blank_names_are_excluded_before_sampling() {
        let catalog = [record("  ", 1.0, 0.0), record("B", 1.0, 0.0)];
        // Only one valid record remains, so the shuffle consumes no indices.
        let mut rng = Scripted::new(&[0.5], &[]);
        let selected = select_employees(&catalog, 1, ProbabilityGroup::GoldCoin, &mut rng);
        assert_eq!(selected, vec![entry("B", false)]);
    }

    #[test]
    fn catalog_is_reshuffled_every_draw() {
        let catalog = [record("A", 0.5, 0.0), record("B", 0.5, 0.0)];
        // Draw 1 keeps [A, B]; draw 2 swaps to [B, A]. Same threshold both times.
        let mut rng = Scripted::new(&[0.1, 0.1], &[1, 0]);
        let selected = select_employees(&catalog, 2, ProbabilityGroup::GoldCoin, &mut rng);
        assert_eq!(selected, vec![entry("A", false), entry("B", false)]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_covers_every_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..6_000 {
            let mut items = vec![1u8, 2, 3];
            shuffle(&mut items, &mut rng);
            *seen.entry(items).or_default() += 1;
        }
        assert_eq!(seen.len(), 6);
        for (perm, count) in &seen {
            assert!(
                (800..1200).contains(count),
                "permutation {perm:?} drawn {count} times"
            );
        }
    }

    #[test]
    fn frequencies_converge_to_declared_weights() {
        let catalog = [
            record("A", 0.10, 0.20),
            record("B", 0.30, 0.00),
            record("C", 0.15, 0.25),
        ];
        let draws = 200_000;
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_employees(&catalog, draws, ProbabilityGroup::GoldCoin, &mut rng);

        // Weights sum to 1.0, so every draw lands somewhere.
        assert_eq!(selected.len(), draws);

        let mut counts: HashMap<(String, bool), usize> = HashMap::new();
        for e in selected {
            *counts.entry((e.name, e.is_shard)).or_default() += 1;
        }

        for r in &catalog {
            for (is_shard, expected) in [(false, r.probability), (true, r.shard_probability)] {
                let observed = counts
                    .get(&(r.name.clone(), is_shard))
                    .copied()
                    .unwrap_or(0) as f64
                    / draws as f64;
                assert!(
                    (observed - expected).abs() < 0.01,
                    "{} shard={is_shard}: expected {expected}, observed {observed}",
                    r.name
                );
            }
        }
    }
}
