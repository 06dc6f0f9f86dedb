//! Split finding and gain computation.
//!
//! For each tree node, the best split is found by:
//! 1. Enumerating candidate thresholds per feature (midpoints between
//!    consecutive distinct sorted values)
//! 2. Computing the Gini gain for each candidate
//! 3. Selecting the split with maximum gain (if strictly above `min_gain`)
//!
//! # Gain Formula
//!
//! The gain from a split measures the reduction in weighted Gini impurity:
//!
//! ```text
//! gain = gini(S) - (|L|/|S|) * gini(L) - (|R|/|S|) * gini(R)
//! ```
//!
//! # Determinism
//!
//! Ties break to the lowest feature index, then the lowest threshold.
//! Per-feature candidate scans may run in parallel, but each feature's best
//! is computed independently and the winner is reduced sequentially in
//! feature order, so the result never depends on thread scheduling.

use crate::data::FeaturesView;
use crate::repr::{ClassCounts, ClassLabel};
use crate::utils::Parallelism;

// ============================================================================
// SplitCandidate
// ============================================================================

/// A winning split, with the index partition it induces.
///
/// Samples with `feature value <= threshold` go left, the rest go right.
/// Both partitions are non-empty: a one-sided split has zero gain and is
/// never selected.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitCandidate {
    /// Feature index to split on.
    pub feature: u32,
    /// Threshold value (`<=` goes left).
    pub threshold: f32,
    /// Gini gain over leaving the node unsplit.
    pub gain: f64,
    /// Sample indices that go left.
    pub left: Vec<u32>,
    /// Sample indices that go right.
    pub right: Vec<u32>,
}

/// Best candidate found on a single feature during the threshold sweep.
#[derive(Debug, Clone, Copy)]
struct FeatureBest {
    feature: u32,
    threshold: f32,
    gain: f64,
}

// ============================================================================
// GreedySplitFinder
// ============================================================================

/// Exhaustive greedy split finder over raw feature values.
///
/// Re-sorts the node's samples per feature on every call, which costs
/// `O(m · n log n)` per node. That is the documented ceiling of this
/// engine; callers that need large-n throughput should pre-bucket
/// features upstream.
#[derive(Debug, Clone, Copy)]
pub struct GreedySplitFinder {
    /// A split is accepted only when `gain > min_gain`.
    ///
    /// The default of `0.0` still rejects zero-gain (degenerate) splits,
    /// which is what prevents no-op recursion on unsplittable nodes.
    pub min_gain: f64,
}

impl Default for GreedySplitFinder {
    fn default() -> Self {
        Self { min_gain: 0.0 }
    }
}

impl GreedySplitFinder {
    pub fn new(min_gain: f64) -> Self {
        Self { min_gain }
    }

    /// Find the best split for the samples in `indices`.
    ///
    /// Returns `None` when fewer than 2 samples are present, when the node
    /// is already pure, or when no candidate improves on the unsplit node
    /// by more than `min_gain` (which covers the all-features-identical
    /// case: no candidate thresholds exist at all).
    pub fn best_split(
        &self,
        features: FeaturesView<'_>,
        labels: &[ClassLabel],
        indices: &[u32],
        parallelism: Parallelism,
    ) -> Option<SplitCandidate> {
        if indices.len() < 2 {
            return None;
        }

        let parent = ClassCounts::from_labels(indices.iter().map(|&i| labels[i as usize]));
        if parent.is_pure() {
            return None;
        }
        let parent_gini = parent.gini();

        // Evaluate features independently; reduce in feature order below.
        let per_feature: Vec<Option<FeatureBest>> =
            parallelism.maybe_par_map(0..features.n_features(), |feature| {
                self.best_for_feature(features, labels, indices, &parent, parent_gini, feature)
            });

        let mut winner: Option<FeatureBest> = None;
        for candidate in per_feature.into_iter().flatten() {
            match winner {
                // Strict > keeps the lowest feature index on equal gain;
                // the per-feature sweep already kept the lowest threshold.
                Some(best) if candidate.gain > best.gain => winner = Some(candidate),
                None => winner = Some(candidate),
                _ => {}
            }
        }

        let winner = winner?;
        let (left, right) = partition(features, indices, winner.feature, winner.threshold);
        debug_assert!(!left.is_empty() && !right.is_empty());

        Some(SplitCandidate {
            feature: winner.feature,
            threshold: winner.threshold,
            gain: winner.gain,
            left,
            right,
        })
    }

    /// Sweep one feature's sorted values, tracking the best threshold.
    fn best_for_feature(
        &self,
        features: FeaturesView<'_>,
        labels: &[ClassLabel],
        indices: &[u32],
        parent: &ClassCounts,
        parent_gini: f64,
        feature: usize,
    ) -> Option<FeatureBest> {
        let values = features.feature(feature);
        let n = indices.len();

        // Sort by value, then by index so equal values order identically
        // across runs.
        let mut sorted: Vec<u32> = indices.to_vec();
        sorted.sort_unstable_by(|&a, &b| {
            let va = values[a as usize];
            let vb = values[b as usize];
            va.partial_cmp(&vb)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });

        let mut left = ClassCounts::new();
        let mut right = parent.clone();
        let total = n as f64;

        let mut best: Option<FeatureBest> = None;

        // Move samples left one at a time; a threshold candidate exists at
        // every boundary between distinct consecutive values.
        for i in 0..n - 1 {
            let label = labels[sorted[i] as usize];
            left.add(label);
            right.remove(label);

            let lo = values[sorted[i] as usize];
            let hi = values[sorted[i + 1] as usize];
            if lo == hi {
                continue;
            }

            let n_left = (i + 1) as f64;
            let n_right = (n - i - 1) as f64;
            let weighted =
                (n_left / total) * left.gini() + (n_right / total) * right.gini();
            let gain = parent_gini - weighted;

            if gain <= self.min_gain {
                continue;
            }

            // Midpoint between the distinct values, computed in f64 so the
            // `lo + hi` sum cannot overflow near f32's magnitude limits.
            // If rounding back to f32 still lands on `hi`, fall back to
            // `lo` so the `<=` partition stays consistent with the sweep
            // position.
            let mid = ((f64::from(lo) + f64::from(hi)) * 0.5) as f32;
            let threshold = if mid < hi { mid } else { lo };

            match best {
                // Strict > keeps the lowest threshold on equal gain
                // (the sweep visits thresholds in ascending order).
                Some(b) if gain > b.gain => {
                    best = Some(FeatureBest {
                        feature: feature as u32,
                        threshold,
                        gain,
                    })
                }
                None => {
                    best = Some(FeatureBest {
                        feature: feature as u32,
                        threshold,
                        gain,
                    })
                }
                _ => {}
            }
        }

        best
    }
}

/// Partition `indices` by `value <= threshold`, preserving input order.
fn partition(
    features: FeaturesView<'_>,
    indices: &[u32],
    feature: u32,
    threshold: f32,
) -> (Vec<u32>, Vec<u32>) {
    let values = features.feature(feature as usize);
    let mut left = Vec::new();
    let mut right = Vec::new();
    for &idx in indices {
        if values[idx as usize] <= threshold {
            left.push(idx);
        } else {
            right.push(idx);
        }
    }
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn find(
        features: ndarray::ArrayView2<'_, f32>,
        labels: &[ClassLabel],
    ) -> Option<SplitCandidate> {
        let indices: Vec<u32> = (0..labels.len() as u32).collect();
        GreedySplitFinder::default().best_split(
            FeaturesView::from_array(features),
            labels,
            &indices,
            Parallelism::Sequential,
        )
    }

    #[test]
    fn splits_separable_feature_at_midpoint() {
        // Single feature, clean class boundary between 1.0 and 2.0.
        let features = array![[0.0f32, 1.0, 2.0, 3.0]];
        let split = find(features.view(), &[0, 0, 1, 1]).unwrap();

        assert_eq!(split.feature, 0);
        assert_abs_diff_eq!(split.threshold, 1.5);
        assert_abs_diff_eq!(split.gain, 0.5);
        assert_eq!(split.left, vec![0, 1]);
        assert_eq!(split.right, vec![2, 3]);
    }

    #[test]
    fn none_for_pure_node() {
        let features = array![[0.0f32, 1.0, 2.0]];
        assert!(find(features.view(), &[7, 7, 7]).is_none());
    }

    #[test]
    fn none_for_single_sample() {
        let features = array![[0.0f32]];
        assert!(find(features.view(), &[0]).is_none());
    }

    #[test]
    fn none_when_all_feature_vectors_identical() {
        // Mixed labels but no candidate threshold on any feature.
        let features = array![[1.0f32, 1.0, 1.0, 1.0], [5.0, 5.0, 5.0, 5.0]];
        assert!(find(features.view(), &[0, 1, 0, 1]).is_none());
    }

    #[test]
    fn ties_break_to_lowest_feature() {
        // Features 0 and 1 are copies; both separate perfectly.
        let features = array![[0.0f32, 0.0, 1.0, 1.0], [0.0, 0.0, 1.0, 1.0]];
        let split = find(features.view(), &[0, 0, 1, 1]).unwrap();
        assert_eq!(split.feature, 0);
    }

    #[test]
    fn ties_break_to_lowest_threshold() {
        // Labels symmetric around the middle sample: splitting at either
        // boundary yields gain 1/9, so the lower threshold must win.
        let features = array![[0.0f32, 1.0, 2.0]];
        let split = find(features.view(), &[0, 1, 0]).unwrap();
        assert_abs_diff_eq!(split.threshold, 0.5);
    }

    #[test]
    fn splits_extreme_magnitude_values() {
        // Summing these in f32 overflows to -inf; the midpoint must still
        // land strictly between the two values.
        let features = array![[-3.4e38f32, -3.0e38]];
        let split = find(features.view(), &[0, 1]).unwrap();

        assert!(split.threshold.is_finite());
        assert!(-3.4e38 < split.threshold && split.threshold < -3.0e38);
        assert_eq!(split.left, vec![0]);
        assert_eq!(split.right, vec![1]);

        let features = array![[3.0e38f32, 3.4e38]];
        let split = find(features.view(), &[1, 0]).unwrap();
        assert!(split.threshold.is_finite());
        assert_eq!(split.left, vec![0]);
        assert_eq!(split.right, vec![1]);
    }

    #[test]
    fn parallel_matches_sequential() {
        let features = array![
            [0.3f32, 2.1, 1.7, 0.9, 3.3, 2.8, 0.1, 1.2],
            [5.0, 4.2, 3.9, 4.8, 1.1, 0.7, 5.5, 3.0],
            [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
        ];
        let labels: Vec<ClassLabel> = vec![0, 1, 1, 0, 1, 1, 0, 0];
        let indices: Vec<u32> = (0..8).collect();
        let finder = GreedySplitFinder::default();

        let seq = finder.best_split(
            FeaturesView::from_array(features.view()),
            &labels,
            &indices,
            Parallelism::Sequential,
        );
        let par = finder.best_split(
            FeaturesView::from_array(features.view()),
            &labels,
            &indices,
            Parallelism::Parallel,
        );
        assert_eq!(seq, par);
    }

    #[test]
    fn min_gain_rejects_weak_splits() {
        let features = array![[0.0f32, 1.0, 2.0, 3.0]];
        let labels: Vec<ClassLabel> = vec![0, 0, 1, 1];
        let indices: Vec<u32> = (0..4).collect();

        // Best possible gain is 0.5; a higher floor rejects everything.
        let finder = GreedySplitFinder::new(0.6);
        assert!(
            finder
                .best_split(
                    FeaturesView::from_array(features.view()),
                    &labels,
                    &indices,
                    Parallelism::Sequential,
                )
                .is_none()
        );
    }

    #[test]
    fn partition_respects_threshold_inclusive() {
        let features = array![[0.0f32, 1.5, 3.0]];
        let view = FeaturesView::from_array(features.view());
        let (left, right) = partition(view, &[0, 1, 2], 0, 1.5);
        assert_eq!(left, vec![0, 1]);
        assert_eq!(right, vec![2]);
    }
}
