//! Canonical tree representation (SoA) and mutable construction API.
//!
//! This module provides:
//! - [`Tree`]: Immutable SoA tree storage for efficient traversal
//! - [`MutableTree`]: Builder for constructing trees during fitting
//! - [`TreeView`]: Read-only trait for unified tree access
//!
//! # TreeView Trait
//!
//! The [`TreeView`] trait provides a uniform interface for tree traversal,
//! implemented by both `Tree` and `MutableTree`. This enables generic
//! traversal code that works with either representation.

use crate::data::SampleAccessor;

use super::counts::ClassLeaf;
use super::{ClassLabel, NodeId};

// ============================================================================
// TreeView Trait
// ============================================================================

/// Read-only view of a tree for traversal.
///
/// Provides the minimal interface needed to walk a tree from root to leaf.
/// Implemented for both [`Tree`] and [`MutableTree`].
pub trait TreeView {
    /// Number of nodes in the tree.
    fn n_nodes(&self) -> usize;

    /// Check if a node is a leaf.
    fn is_leaf(&self, node: NodeId) -> bool;

    /// Get the feature index for a split node.
    fn split_index(&self, node: NodeId) -> u32;

    /// Get the split threshold.
    fn split_threshold(&self, node: NodeId) -> f32;

    /// Get the left child node index.
    fn left_child(&self, node: NodeId) -> NodeId;

    /// Get the right child node index.
    fn right_child(&self, node: NodeId) -> NodeId;

    /// Get the leaf payload, `None` for internal nodes (and for nodes a
    /// builder has not finished yet).
    fn leaf(&self, node: NodeId) -> Option<&ClassLeaf>;

    /// Traverse the tree to find the leaf node for a sample.
    ///
    /// At each internal node the sample descends left when
    /// `sample[feature] <= threshold`, right otherwise.
    #[inline]
    fn traverse_to_leaf<S: SampleAccessor>(&self, sample: &S) -> NodeId {
        let mut node: NodeId = 0;

        while !self.is_leaf(node) {
            let feat_idx = self.split_index(node) as usize;
            let fvalue = sample.feature(feat_idx);

            node = if fvalue <= self.split_threshold(node) {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
        }

        node
    }
}

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    #[error("tree has no nodes")]
    EmptyTree,

    #[error("node {node} {side} child {child} is out of bounds ({n_nodes} nodes)")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },

    #[error("node {node} references itself as a child")]
    SelfLoop { node: NodeId },

    #[error("node {node} is reachable by more than one path")]
    DuplicateVisit { node: NodeId },

    #[error("cycle detected at node {node}")]
    CycleDetected { node: NodeId },

    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },

    #[error("leaf node {node} has no payload")]
    MissingLeafPayload { node: NodeId },

    #[error("node {node} splits on feature {feature}, tree was fitted on {n_features}")]
    SplitIndexOutOfRange {
        node: NodeId,
        feature: u32,
        n_features: usize,
    },

    #[error("leaf at depth {depth} exceeds the depth budget {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },
}

// ============================================================================
// Tree
// ============================================================================

/// Structure-of-Arrays tree storage for efficient traversal.
///
/// Stores tree nodes in flat arrays for cache-friendly traversal. Child
/// indices are local to this tree (0 = root). Parent-owns-children holds by
/// construction: nodes are only ever reachable through their parent's child
/// slots and the arena is dropped as one allocation.
///
/// Immutable after [`MutableTree::freeze`]; safe to share across threads.
#[derive(Debug, Clone)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f32]>,
    left_children: Box<[NodeId]>,
    right_children: Box<[NodeId]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[Option<ClassLeaf>]>,
    /// Depth budget the tree was fitted with (root = depth 0).
    max_depth: usize,
    /// Feature count of the fitted dataset.
    n_features: usize,
}

impl Tree {
    /// Depth budget this tree was built with.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Feature count of the dataset this tree was fitted on.
    ///
    /// Samples handed to prediction must have at least this many features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&l| l).count()
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeId, usize)> = vec![(0, 0)];

        while let Some((node, depth)) = stack.pop() {
            if self.is_leaf(node) {
                max_depth = max_depth.max(depth);
            } else {
                stack.push((self.left_child(node), depth + 1));
                stack.push((self.right_child(node), depth + 1));
            }
        }

        max_depth
    }

    /// Classify a single sample.
    ///
    /// The caller is responsible for checking the sample's feature count
    /// against [`n_features`](Self::n_features); see
    /// [`TreePredictor`](crate::inference::TreePredictor) for the checked
    /// entry point.
    pub fn predict_row<S: SampleAccessor>(&self, sample: &S) -> ClassLabel {
        let leaf_id = self.traverse_to_leaf(sample);
        debug_assert!(self.is_leaf(leaf_id));
        match self.leaf(leaf_id) {
            Some(leaf) => leaf.label(),
            // Frozen trees always carry leaf payloads; freeze() enforces it.
            None => unreachable!("frozen tree leaf without payload"),
        }
    }

    /// Validate structural invariants for this tree.
    ///
    /// Intended for debug checks and tests. Walks the whole arena checking
    /// child bounds, acyclicity, reachability, leaf payloads, split feature
    /// ranges, and the depth budget.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        // Iterative DFS with color marking.
        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, usize, u8)> = vec![(0, 0, 0)];

        while let Some((node, depth, phase)) = stack.pop() {
            let node_usize = node as usize;

            match phase {
                0 => {
                    match color[node_usize] {
                        0 => {}
                        1 => return Err(TreeValidationError::CycleDetected { node }),
                        2 => return Err(TreeValidationError::DuplicateVisit { node }),
                        _ => unreachable!(),
                    }

                    color[node_usize] = 1;
                    stack.push((node, depth, 1));

                    if self.is_leaf(node) {
                        if self.leaf(node).is_none() {
                            return Err(TreeValidationError::MissingLeafPayload { node });
                        }
                        if depth > self.max_depth {
                            return Err(TreeValidationError::DepthExceeded {
                                depth,
                                max_depth: self.max_depth,
                            });
                        }
                    } else {
                        let feature = self.split_index(node);
                        if feature as usize >= self.n_features {
                            return Err(TreeValidationError::SplitIndexOutOfRange {
                                node,
                                feature,
                                n_features: self.n_features,
                            });
                        }

                        let left = self.left_child(node);
                        let right = self.right_child(node);

                        if left == node || right == node {
                            return Err(TreeValidationError::SelfLoop { node });
                        }
                        if left as usize >= n_nodes {
                            return Err(TreeValidationError::ChildOutOfBounds {
                                node,
                                side: "left",
                                child: left,
                                n_nodes,
                            });
                        }
                        if right as usize >= n_nodes {
                            return Err(TreeValidationError::ChildOutOfBounds {
                                node,
                                side: "right",
                                child: right,
                                n_nodes,
                            });
                        }

                        stack.push((right, depth + 1, 0));
                        stack.push((left, depth + 1, 0));
                    }
                }
                1 => {
                    color[node_usize] = 2;
                }
                _ => unreachable!(),
            }
        }

        for (i, &c) in color.iter().enumerate() {
            if c == 0 {
                return Err(TreeValidationError::UnreachableNode { node: i as NodeId });
            }
        }

        Ok(())
    }
}

impl TreeView for Tree {
    #[inline]
    fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    #[inline]
    fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    fn split_threshold(&self, node: NodeId) -> f32 {
        self.split_thresholds[node as usize]
    }

    #[inline]
    fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    fn leaf(&self, node: NodeId) -> Option<&ClassLeaf> {
        self.leaf_values[node as usize].as_ref()
    }
}

// ============================================================================
// MutableTree
// ============================================================================

/// Append-only tree builder used during fitting.
///
/// Nodes start out as unfinished placeholders; the builder either turns a
/// placeholder into a leaf with [`make_leaf`](Self::make_leaf) or into an
/// internal node with [`apply_split`](Self::apply_split), which allocates
/// two fresh placeholders for the children.
#[derive(Debug, Clone, Default)]
pub struct MutableTree {
    split_indices: Vec<u32>,
    split_thresholds: Vec<f32>,
    left_children: Vec<NodeId>,
    right_children: Vec<NodeId>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<Option<ClassLeaf>>,
}

impl MutableTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated nodes (including unfinished placeholders).
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    fn push_placeholder(&mut self) -> NodeId {
        let id = self.n_nodes() as NodeId;
        self.split_indices.push(0);
        self.split_thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(false);
        self.leaf_values.push(None);
        id
    }

    /// Allocate the root node.
    ///
    /// Must be called exactly once, before any split or leaf.
    pub fn init_root(&mut self) -> NodeId {
        debug_assert_eq!(self.n_nodes(), 0, "root must be the first node");
        self.push_placeholder()
    }

    /// Turn `node` into an internal node splitting on `(feature, threshold)`.
    ///
    /// Returns the freshly allocated `(left, right)` child placeholders.
    pub fn apply_split(&mut self, node: NodeId, feature: u32, threshold: f32) -> (NodeId, NodeId) {
        debug_assert!((node as usize) < self.n_nodes());
        debug_assert!(self.leaf_values[node as usize].is_none(), "node already finished");

        let left = self.push_placeholder();
        let right = self.push_placeholder();

        let idx = node as usize;
        self.split_indices[idx] = feature;
        self.split_thresholds[idx] = threshold;
        self.left_children[idx] = left;
        self.right_children[idx] = right;
        self.is_leaf[idx] = false;

        (left, right)
    }

    /// Turn `node` into a leaf with the given payload.
    pub fn make_leaf(&mut self, node: NodeId, leaf: ClassLeaf) {
        debug_assert!((node as usize) < self.n_nodes());
        let idx = node as usize;
        self.is_leaf[idx] = true;
        self.leaf_values[idx] = Some(leaf);
    }

    /// Freeze into an immutable [`Tree`].
    ///
    /// `max_depth` and `n_features` record the fitting context for later
    /// validation and prediction-time dimension checks.
    ///
    /// # Panics
    ///
    /// Debug-asserts that every leaf node carries a payload, i.e. the
    /// builder finished every placeholder it allocated.
    pub fn freeze(self, max_depth: usize, n_features: usize) -> Tree {
        debug_assert!(
            self.is_leaf
                .iter()
                .zip(self.leaf_values.iter())
                .all(|(&is_leaf, value)| !is_leaf || value.is_some()),
            "unfinished leaf placeholder in tree"
        );

        Tree {
            split_indices: self.split_indices.into_boxed_slice(),
            split_thresholds: self.split_thresholds.into_boxed_slice(),
            left_children: self.left_children.into_boxed_slice(),
            right_children: self.right_children.into_boxed_slice(),
            is_leaf: self.is_leaf.into_boxed_slice(),
            leaf_values: self.leaf_values.into_boxed_slice(),
            max_depth,
            n_features,
        }
    }
}

impl TreeView for MutableTree {
    #[inline]
    fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    #[inline]
    fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    fn split_threshold(&self, node: NodeId) -> f32 {
        self.split_thresholds[node as usize]
    }

    #[inline]
    fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    fn leaf(&self, node: NodeId) -> Option<&ClassLeaf> {
        self.leaf_values[node as usize].as_ref()
    }
}
