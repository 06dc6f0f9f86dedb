//! Canonical tree representation.
//!
//! - [`ClassCounts`]: label histogram with Gini impurity and majority vote
//! - [`ClassLeaf`]: terminal node payload (predicted label + distribution)
//! - [`Tree`]: immutable SoA tree storage for efficient traversal
//! - [`MutableTree`]: append-only builder used during fitting
//! - [`TreeView`]: read-only trait for unified tree access

/// Canonical node identifier.
///
/// Internally this is just an index into the tree's SoA arrays.
pub type NodeId = u32;

/// Integer class label.
pub type ClassLabel = i64;

mod counts;
mod tree;

pub use counts::{ClassCounts, ClassLeaf};
pub use tree::{MutableTree, Tree, TreeValidationError, TreeView};
