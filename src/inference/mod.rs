//! Read-only tree inference.
//!
//! [`TreePredictor`] walks a fitted [`Tree`] from root to leaf for each
//! sample. Traversal is pure: the tree is immutable and no per-call state
//! exists, so batch prediction shards freely across threads.

use crate::data::{SampleAccessor, SamplesView};
use crate::repr::{ClassLabel, Tree, TreeView};
use crate::utils::Parallelism;

/// Errors raised when a prediction request doesn't match the fitted tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    #[error("sample has {got} features, tree was fitted on {expected}")]
    FeatureCountMismatch { expected: usize, got: usize },

    #[error("tree has no nodes")]
    EmptyTree,
}

/// Batch predictor over a fitted tree.
///
/// Borrowing the tree keeps the predictor trivially cheap to create; hosts
/// that want concurrent readers can share one `Tree` and give each reader
/// its own predictor.
#[derive(Debug, Clone, Copy)]
pub struct TreePredictor<'t> {
    tree: &'t Tree,
}

impl<'t> TreePredictor<'t> {
    pub fn new(tree: &'t Tree) -> Self {
        Self { tree }
    }

    /// The tree this predictor reads.
    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    /// Check a sample width against the tree's fitted dimensionality.
    fn check_width(&self, got: usize) -> Result<(), PredictError> {
        if self.tree.n_nodes() == 0 {
            return Err(PredictError::EmptyTree);
        }
        if got < self.tree.n_features() {
            return Err(PredictError::FeatureCountMismatch {
                expected: self.tree.n_features(),
                got,
            });
        }
        Ok(())
    }

    /// Classify a single sample.
    pub fn predict_one<S: SampleAccessor>(&self, sample: &S) -> Result<ClassLabel, PredictError> {
        self.check_width(sample.n_features())?;
        Ok(self.tree.predict_row(sample))
    }

    /// Classify a batch of samples, preserving input order.
    ///
    /// Each traversal is independent; `parallelism` shards across samples
    /// with no cross-sample state, so the output is identical either way.
    pub fn predict_batch(
        &self,
        samples: SamplesView<'_>,
        parallelism: Parallelism,
    ) -> Result<Vec<ClassLabel>, PredictError> {
        self.check_width(samples.n_features())?;

        Ok(parallelism.maybe_par_map(0..samples.n_samples(), |row| {
            self.tree.predict_row(&samples.sample(row))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{ClassCounts, ClassLeaf, MutableTree};
    use ndarray::array;

    fn leaf_of(labels: &[ClassLabel]) -> ClassLeaf {
        ClassLeaf::from_counts(ClassCounts::from_labels(labels.iter().copied())).unwrap()
    }

    /// feat1 <= 0.5 ? (feat0 <= 1.0 ? 0 : 1) : 2, fitted on 2 features.
    fn two_level_tree() -> Tree {
        let mut tree = MutableTree::new();
        let root = tree.init_root();
        let (left, right) = tree.apply_split(root, 1, 0.5);
        let (ll, lr) = tree.apply_split(left, 0, 1.0);
        tree.make_leaf(ll, leaf_of(&[0, 0]));
        tree.make_leaf(lr, leaf_of(&[1]));
        tree.make_leaf(right, leaf_of(&[2, 2, 2]));
        tree.freeze(2, 2)
    }

    #[test]
    fn predict_one_walks_to_leaf() {
        let tree = two_level_tree();
        let predictor = TreePredictor::new(&tree);

        assert_eq!(predictor.predict_one(&[0.5f32, 0.0]).unwrap(), 0);
        assert_eq!(predictor.predict_one(&[2.0f32, 0.0]).unwrap(), 1);
        assert_eq!(predictor.predict_one(&[2.0f32, 1.0]).unwrap(), 2);
    }

    #[test]
    fn predict_one_rejects_narrow_sample() {
        let tree = two_level_tree();
        let predictor = TreePredictor::new(&tree);

        assert_eq!(
            predictor.predict_one(&[0.5f32]).unwrap_err(),
            PredictError::FeatureCountMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn predict_batch_preserves_order() {
        let tree = two_level_tree();
        let predictor = TreePredictor::new(&tree);

        let samples = array![[2.0f32, 1.0], [0.5, 0.0], [2.0, 0.0]];
        let view = SamplesView::from_array(samples.view());

        let labels = predictor
            .predict_batch(view, Parallelism::Sequential)
            .unwrap();
        assert_eq!(labels, vec![2, 0, 1]);
    }

    #[test]
    fn parallel_batch_matches_sequential() {
        let tree = two_level_tree();
        let predictor = TreePredictor::new(&tree);

        let data: Vec<f32> = (0..200).map(|i| (i % 7) as f32 * 0.3).collect();
        let view = SamplesView::from_slice(&data, 100, 2).unwrap();

        let seq = predictor
            .predict_batch(view, Parallelism::Sequential)
            .unwrap();
        let par = predictor.predict_batch(view, Parallelism::Parallel).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn empty_tree_is_rejected() {
        let tree = MutableTree::new().freeze(0, 1);
        let predictor = TreePredictor::new(&tree);

        assert_eq!(
            predictor.predict_one(&[1.0f32]).unwrap_err(),
            PredictError::EmptyTree
        );
    }

    #[test]
    fn batch_checks_width_before_traversal() {
        let tree = two_level_tree();
        let predictor = TreePredictor::new(&tree);

        let samples = array![[1.0f32], [2.0]];
        let err = predictor
            .predict_batch(SamplesView::from_array(samples.view()), Parallelism::Sequential)
            .unwrap_err();
        assert_eq!(
            err,
            PredictError::FeatureCountMismatch {
                expected: 2,
                got: 1
            }
        );
    }
}
