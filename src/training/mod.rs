//! Tree fitting.
//!
//! ## Components
//!
//! - [`TreeBuilder`], [`TreeParams`]: recursive greedy fitting
//! - [`GreedySplitFinder`], [`SplitCandidate`]: Gini split search
//! - [`TrainingLogger`], [`Verbosity`]: fit-time logging

mod builder;
mod logger;
mod split;

pub use builder::{TreeBuilder, TreeParams};
pub use logger::{TrainingLogger, Verbosity};
pub use split::{GreedySplitFinder, SplitCandidate};

use crate::data::DatasetError;

/// Errors surfaced by the high-level fit entry point.
///
/// All of them are malformed-input conditions; fitting itself is total
/// once a [`Dataset`](crate::data::Dataset) exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
