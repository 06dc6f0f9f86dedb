//! cartree: a single-tree CART classifier for Rust.
//!
//! Fits a binary decision tree to labeled numeric samples with greedy
//! Gini-impurity splitting, and classifies new samples by root-to-leaf
//! traversal.
//!
//! # Key Types
//!
//! - [`DecisionTreeModel`] / [`DecisionTreeConfig`] - High-level model with fit/predict
//! - [`TreeBuilder`] / [`TreeParams`] - Lower-level fitting over a [`Dataset`]
//! - [`Tree`] - Immutable fitted tree (SoA storage)
//! - [`TreePredictor`] - Read-only batch inference
//!
//! # Fitting
//!
//! Use `DecisionTreeConfig::builder()` to configure, then
//! `DecisionTreeModel::fit()`. See the [`model`] module for details.
//!
//! # Determinism
//!
//! `fit` and `predict` are pure functions of their arguments. Split ties
//! break to the lowest feature index, then the lowest threshold; leaf
//! majority ties break to the smallest label. Two fits over identical
//! inputs produce structurally identical trees.

// Re-export approx traits for users who want to compare impurities
pub use approx;

pub mod data;
pub mod inference;
pub mod model;
pub mod repr;
pub mod testing;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// High-level model types
pub use model::{ConfigError, DecisionTreeConfig, DecisionTreeModel};

// Fitting types
pub use training::{FitError, TreeBuilder, TreeParams, TrainingLogger, Verbosity};

// Representation types
pub use repr::{ClassCounts, ClassLabel, ClassLeaf, NodeId, Tree, TreeView};

// Inference types
pub use inference::{PredictError, TreePredictor};

// Data types (for preparing training data)
pub use data::{Dataset, DatasetError, FeaturesView, SampleAccessor, SamplesView};

// Shared utilities
pub use utils::{Parallelism, run_with_threads};
