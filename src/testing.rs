//! Deterministic synthetic datasets for tests and benches.
//!
//! All generators take an explicit seed; the fitting engine itself holds
//! no random state.

use ndarray::Array2;
use rand::prelude::*;

use crate::repr::ClassLabel;

/// Random sample-major features, uniform in `[min, max]`.
pub fn random_samples(
    n_samples: usize,
    n_features: usize,
    seed: u64,
    min: f32,
    max: f32,
) -> Array2<f32> {
    assert!(max >= min);
    let mut rng = StdRng::seed_from_u64(seed);
    let width = max - min;
    Array2::from_shape_fn((n_samples, n_features), |_| {
        min + rng.random::<f32>() * width
    })
}

/// Random labels uniform over `0..n_classes`.
pub fn random_labels(n_samples: usize, n_classes: u32, seed: u64) -> Vec<ClassLabel> {
    assert!(n_classes >= 1);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_samples)
        .map(|_| ClassLabel::from(rng.random_range(0..n_classes)))
        .collect()
}

/// Linearly separable blobs: one cluster per class, offset along every
/// feature axis, with a little uniform jitter.
///
/// Returns `(samples, labels)` with samples in sample-major layout. A tree
/// of modest depth classifies this data perfectly, which makes it a good
/// smoke-test target.
pub fn clustered_samples(
    n_samples: usize,
    n_features: usize,
    n_classes: u32,
    seed: u64,
) -> (Array2<f32>, Vec<ClassLabel>) {
    assert!(n_features >= 1 && n_classes >= 1);
    let mut rng = StdRng::seed_from_u64(seed);

    let labels: Vec<ClassLabel> = (0..n_samples)
        .map(|i| (i as u32 % n_classes) as ClassLabel)
        .collect();

    // Clusters sit 4.0 apart; jitter stays within ±1.0.
    let samples = Array2::from_shape_fn((n_samples, n_features), |(s, _)| {
        let center = labels[s] as f32 * 4.0;
        center + rng.random::<f32>() * 2.0 - 1.0
    });

    (samples, labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_are_seeded() {
        let a = random_samples(10, 3, 42, 0.0, 10.0);
        let b = random_samples(10, 3, 42, 0.0, 10.0);
        assert_eq!(a, b);

        let c = random_samples(10, 3, 43, 0.0, 10.0);
        assert_ne!(a, c);

        assert_eq!(random_labels(20, 2, 7), random_labels(20, 2, 7));
    }

    #[test]
    fn clustered_labels_cycle_classes() {
        let (samples, labels) = clustered_samples(9, 2, 3, 1);
        assert_eq!(samples.nrows(), 9);
        assert_eq!(labels, vec![0, 1, 2, 0, 1, 2, 0, 1, 2]);
    }
}
