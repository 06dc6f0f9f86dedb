//! High-level model API.
//!
//! [`DecisionTreeModel`] wraps the dataset plumbing, thread pool setup,
//! fitting, and prediction behind the two operations a host actually
//! calls: `fit` and `predict`. [`DecisionTreeConfig`] uses the `bon`
//! builder pattern with validation at build time.
//!
//! # Example
//!
//! ```
//! use cartree::model::{DecisionTreeConfig, DecisionTreeModel};
//! use ndarray::array;
//!
//! let samples = array![[0.0f32], [1.0], [2.0], [3.0]];
//! let labels = [0, 0, 1, 1];
//!
//! let config = DecisionTreeConfig::builder().max_depth(1).build().unwrap();
//! let model = DecisionTreeModel::fit(samples.view(), &labels, config).unwrap();
//!
//! let queries = array![[0.5f32], [2.5]];
//! assert_eq!(model.predict(queries.view()).unwrap(), vec![0, 1]);
//! ```

use bon::Builder;
use ndarray::ArrayView2;

use crate::data::{Dataset, SamplesView};
use crate::inference::{PredictError, TreePredictor};
use crate::repr::{ClassLabel, Tree};
use crate::training::{FitError, TreeBuilder, TreeParams, Verbosity};
use crate::utils::run_with_threads;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min_samples_split` must be at least 2.
    InvalidMinSamplesSplit(usize),
    /// `min_gain` must be finite and non-negative.
    InvalidMinGain(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMinSamplesSplit(v) => {
                write!(f, "min_samples_split must be at least 2, got {}", v)
            }
            Self::InvalidMinGain(v) => {
                write!(f, "min_gain must be finite and non-negative, got {}", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// DecisionTreeConfig
// =============================================================================

/// Configuration for fitting a [`DecisionTreeModel`].
///
/// # Example
///
/// ```
/// use cartree::model::DecisionTreeConfig;
///
/// // All defaults
/// let config = DecisionTreeConfig::builder().build().unwrap();
/// assert_eq!(config.max_depth, 6);
///
/// // Customized
/// let config = DecisionTreeConfig::builder()
///     .max_depth(3)
///     .min_samples_split(4)
///     .n_threads(1)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct DecisionTreeConfig {
    /// Depth budget (root = depth 0). `0` fits a single majority leaf.
    /// Default: 6.
    #[builder(default = 6)]
    pub max_depth: usize,

    /// Minimum samples required to consider splitting a node. Default: 2.
    #[builder(default = 2)]
    pub min_samples_split: usize,

    /// Minimum gain a split must strictly exceed. Default: 0.0.
    #[builder(default = 0.0)]
    pub min_gain: f64,

    /// Thread count: 0 = auto, 1 = sequential, >1 = exact count.
    /// Affects per-feature split scoring and batch prediction only;
    /// the fitted tree is identical regardless. Default: 1.
    #[builder(default = 1)]
    pub n_threads: usize,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: decision_tree_config_builder::IsComplete> DecisionTreeConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `min_samples_split < 2` or `min_gain`
    /// is negative or non-finite.
    pub fn build(self) -> Result<DecisionTreeConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl DecisionTreeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_samples_split < 2 {
            return Err(ConfigError::InvalidMinSamplesSplit(self.min_samples_split));
        }
        if !self.min_gain.is_finite() || self.min_gain < 0.0 {
            return Err(ConfigError::InvalidMinGain(self.min_gain));
        }
        Ok(())
    }

    fn to_tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_gain: self.min_gain,
            verbosity: self.verbosity,
        }
    }
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

// =============================================================================
// DecisionTreeModel
// =============================================================================

/// A fitted single-tree classifier.
///
/// Immutable after [`fit`](Self::fit); prediction is read-only, so one
/// model may serve concurrent readers without locking.
#[derive(Debug)]
pub struct DecisionTreeModel {
    tree: Tree,
    config: DecisionTreeConfig,
}

impl DecisionTreeModel {
    /// Fit a tree to sample-major features and integer labels.
    ///
    /// # Arguments
    ///
    /// * `samples` - Feature matrix `[n_samples, n_features]`
    /// * `labels` - Class labels, length = n_samples
    /// * `config` - Fit configuration
    ///
    /// # Errors
    ///
    /// Returns [`FitError`] on malformed shapes: empty data or a
    /// label/sample length mismatch.
    pub fn fit(
        samples: ArrayView2<f32>,
        labels: &[ClassLabel],
        config: DecisionTreeConfig,
    ) -> Result<Self, FitError> {
        let dataset = Dataset::from_samples(samples, labels.to_vec())?;
        let params = config.to_tree_params();

        let tree = run_with_threads(config.n_threads, |parallelism| {
            TreeBuilder::new(params, parallelism).fit(&dataset)
        });

        Ok(Self { tree, config })
    }

    /// Fit from per-sample rows (convenience for list-of-lists callers).
    pub fn fit_rows(
        rows: &[Vec<f32>],
        labels: &[ClassLabel],
        config: DecisionTreeConfig,
    ) -> Result<Self, FitError> {
        let dataset = Dataset::from_rows(rows, labels.to_vec())?;
        let params = config.to_tree_params();

        let tree = run_with_threads(config.n_threads, |parallelism| {
            TreeBuilder::new(params, parallelism).fit(&dataset)
        });

        Ok(Self { tree, config })
    }

    /// Classify a batch of sample-major queries, preserving input order.
    pub fn predict(&self, samples: ArrayView2<f32>) -> Result<Vec<ClassLabel>, PredictError> {
        let view = SamplesView::from_array(samples);
        run_with_threads(self.config.n_threads, |parallelism| {
            TreePredictor::new(&self.tree).predict_batch(view, parallelism)
        })
    }

    /// Classify a single sample.
    pub fn predict_one(&self, sample: &[f32]) -> Result<ClassLabel, PredictError> {
        TreePredictor::new(&self.tree).predict_one(&sample)
    }

    /// Get reference to the fitted tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Get reference to the fit configuration.
    pub fn config(&self) -> &DecisionTreeConfig {
        &self.config
    }
}
