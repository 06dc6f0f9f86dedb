//! Label histograms and leaf payloads.

use std::collections::BTreeMap;

use super::ClassLabel;

// =============================================================================
// ClassCounts
// =============================================================================

/// Histogram of class labels over a set of samples.
///
/// Backed by a `BTreeMap` so iteration is always in ascending label order,
/// which is what makes [`majority`](Self::majority) tie-breaking (smallest
/// label wins) deterministic for free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCounts {
    counts: BTreeMap<ClassLabel, u32>,
    total: u32,
}

impl ClassCounts {
    /// Empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from a stream of labels.
    pub fn from_labels(labels: impl IntoIterator<Item = ClassLabel>) -> Self {
        let mut counts = Self::new();
        for label in labels {
            counts.add(label);
        }
        counts
    }

    /// Record one observation of `label`.
    #[inline]
    pub fn add(&mut self, label: ClassLabel) {
        *self.counts.entry(label).or_insert(0) += 1;
        self.total += 1;
    }

    /// Remove one observation of `label`.
    ///
    /// Used by the split sweep to move a sample from the right partition to
    /// the left without rebuilding histograms.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `label` has a positive count.
    #[inline]
    pub fn remove(&mut self, label: ClassLabel) {
        let count = self.counts.get_mut(&label);
        debug_assert!(
            matches!(&count, Some(c) if **c > 0),
            "removing label {label} with no observations"
        );
        if let Some(c) = count {
            *c -= 1;
            self.total -= 1;
            if *c == 0 {
                self.counts.remove(&label);
            }
        }
    }

    /// Total number of observations.
    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of distinct labels observed.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }

    /// Count for a specific label (0 if never observed).
    #[inline]
    pub fn count(&self, label: ClassLabel) -> u32 {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Whether every observation has the same label (or the set is empty).
    #[inline]
    pub fn is_pure(&self) -> bool {
        self.counts.len() <= 1
    }

    /// Gini impurity: `1 - Σ p_c²`.
    ///
    /// Empty sets are defined as pure (impurity 0). A perfectly balanced
    /// set of `k` classes scores `1 - 1/k`.
    pub fn gini(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = f64::from(self.total);
        let sum_sq: f64 = self
            .counts
            .values()
            .map(|&c| {
                let p = f64::from(c) / total;
                p * p
            })
            .sum();
        1.0 - sum_sq
    }

    /// Majority label, ties broken by smallest label value.
    ///
    /// Returns `None` for an empty histogram.
    pub fn majority(&self) -> Option<ClassLabel> {
        let mut best: Option<(ClassLabel, u32)> = None;
        for (&label, &count) in &self.counts {
            match best {
                // Strict > keeps the earliest (smallest) label on ties.
                Some((_, best_count)) if count > best_count => best = Some((label, count)),
                None => best = Some((label, count)),
                _ => {}
            }
        }
        best.map(|(label, _)| label)
    }

    /// Iterate `(label, count)` pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassLabel, u32)> + '_ {
        self.counts.iter().map(|(&l, &c)| (l, c))
    }
}

// =============================================================================
// ClassLeaf
// =============================================================================

/// Terminal node payload: the predicted label plus the training-label
/// distribution that produced it.
///
/// Keeping the distribution lets callers recompute the majority (and its
/// tie-break) from the leaf alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLeaf {
    label: ClassLabel,
    counts: ClassCounts,
}

impl ClassLeaf {
    /// Build a leaf from a non-empty histogram.
    ///
    /// The predicted label is the majority with smallest-label tie-break.
    /// Returns `None` for an empty histogram.
    pub fn from_counts(counts: ClassCounts) -> Option<Self> {
        counts.majority().map(|label| Self { label, counts })
    }

    /// The predicted class label.
    #[inline]
    pub fn label(&self) -> ClassLabel {
        self.label
    }

    /// Distribution of training labels that reached this leaf.
    #[inline]
    pub fn counts(&self) -> &ClassCounts {
        &self.counts
    }
}
