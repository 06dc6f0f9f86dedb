//! Recursive greedy tree fitting.
//!
//! [`TreeBuilder`] partitions a [`Dataset`] into a binary tree bounded by
//! `max_depth`, choosing the best Gini split at each node or declaring a
//! leaf when no stopping rule fires and no improving split exists.

use crate::data::{Dataset, FeaturesView};
use crate::repr::{ClassCounts, ClassLabel, ClassLeaf, MutableTree, NodeId, Tree, TreeView};
use crate::utils::Parallelism;

use super::logger::TrainingLogger;
use super::split::GreedySplitFinder;
use super::Verbosity;

// =============================================================================
// TreeParams
// =============================================================================

/// Parameters for tree fitting.
#[derive(Clone, Copy, Debug)]
pub struct TreeParams {
    /// Depth budget: root is depth 0, no leaf sits deeper than this.
    /// `0` forces a single root leaf.
    pub max_depth: usize,
    /// Minimum samples required to consider splitting a node.
    pub min_samples_split: usize,
    /// Minimum gain a split must exceed; `0.0` still rejects zero-gain
    /// splits.
    pub min_gain: f64,
    /// Verbosity for fit logging.
    pub verbosity: Verbosity,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 6,
            min_samples_split: 2,
            min_gain: 0.0,
            verbosity: Verbosity::default(),
        }
    }
}

// =============================================================================
// TreeBuilder
// =============================================================================

/// Greedy recursive-partitioning tree builder.
///
/// Fitting is deterministic: identical inputs produce structurally
/// identical trees. The only parallelism is per-feature split scoring
/// inside a single node, which reduces its winner in feature order.
pub struct TreeBuilder {
    params: TreeParams,
    finder: GreedySplitFinder,
    parallelism: Parallelism,
}

impl TreeBuilder {
    /// Create a builder.
    ///
    /// `parallelism` only affects wall-clock time, never the fitted tree.
    pub fn new(params: TreeParams, parallelism: Parallelism) -> Self {
        let finder = GreedySplitFinder::new(params.min_gain);
        Self {
            params,
            finder,
            parallelism,
        }
    }

    /// Get reference to parameters.
    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Fit a tree to the dataset.
    ///
    /// The dataset's shape invariants were enforced at construction, so
    /// fitting itself cannot fail: every index set the recursion produces
    /// is non-empty and a leaf can always be emitted.
    pub fn fit(&self, dataset: &Dataset) -> Tree {
        let features = dataset.features();
        let labels = dataset.labels();
        let logger = TrainingLogger::new(self.params.verbosity);

        logger.start_fit(dataset.n_samples(), dataset.n_features(), self.params.max_depth);

        let mut tree = MutableTree::new();
        let root = tree.init_root();
        let indices: Vec<u32> = (0..dataset.n_samples() as u32).collect();
        self.grow(&mut tree, root, features, labels, indices, 0, &logger);

        let tree = tree.freeze(self.params.max_depth, dataset.n_features());
        logger.finish_fit(tree.n_nodes(), tree.n_leaves(), tree.depth());
        debug_assert_eq!(tree.validate(), Ok(()));
        tree
    }

    /// Recursively grow the subtree rooted at `node` over `indices`.
    fn grow(
        &self,
        tree: &mut MutableTree,
        node: NodeId,
        features: FeaturesView<'_>,
        labels: &[ClassLabel],
        indices: Vec<u32>,
        depth: usize,
        logger: &TrainingLogger,
    ) {
        let counts = ClassCounts::from_labels(indices.iter().map(|&i| labels[i as usize]));

        // Stopping rules: depth budget exhausted, pure node, or too few
        // samples to split.
        let must_stop = depth == self.params.max_depth
            || counts.is_pure()
            || indices.len() < self.params.min_samples_split;

        if !must_stop {
            if let Some(split) =
                self.finder
                    .best_split(features, labels, &indices, self.parallelism)
            {
                logger.log_split(depth, split.feature, split.threshold, split.gain);
                let (left, right) = tree.apply_split(node, split.feature, split.threshold);
                self.grow(tree, left, features, labels, split.left, depth + 1, logger);
                self.grow(tree, right, features, labels, split.right, depth + 1, logger);
                return;
            }
            // No improving split: fall through to a leaf even though depth
            // budget remains.
        }

        let leaf = ClassLeaf::from_counts(counts)
            .expect("leaf built from non-empty index set");
        logger.log_leaf(depth, leaf.label(), indices.len());
        tree.make_leaf(node, leaf);
    }
}
