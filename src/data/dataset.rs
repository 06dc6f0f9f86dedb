//! Dataset container with shape validation.

use ndarray::{Array2, ArrayView2};

use crate::repr::ClassLabel;

use super::views::FeaturesView;

/// Errors raised when a dataset violates its shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset must have at least one feature")]
    EmptyFeatures,

    #[error("dataset must have at least one sample")]
    EmptySamples,

    #[error("number of labels ({labels}) does not match number of samples ({samples})")]
    LabelLenMismatch { samples: usize, labels: usize },

    #[error("sample {sample_idx} has {got} features, expected {expected}")]
    InconsistentRow {
        sample_idx: usize,
        expected: usize,
        got: usize,
    },
}

/// Labeled training data for the tree builder.
///
/// Features are stored in **feature-major** layout: `[n_features, n_samples]`.
/// Each feature's values across all samples are contiguous in memory, which
/// is what the split finder's per-feature sorting scans want.
///
/// Labels are integer class labels, one per sample.
///
/// # Example
///
/// ```
/// use cartree::data::Dataset;
///
/// // 4 samples with a single feature, binary labels
/// let ds = Dataset::from_rows(
///     &[vec![0.0], vec![1.0], vec![2.0], vec![3.0]],
///     vec![0, 0, 1, 1],
/// ).unwrap();
///
/// assert_eq!(ds.n_samples(), 4);
/// assert_eq!(ds.n_features(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature data: `[n_features, n_samples]` (feature-major).
    features: Array2<f32>,
    /// Class labels: length = n_samples.
    labels: Vec<ClassLabel>,
}

impl Dataset {
    /// Create a dataset from feature-major data.
    ///
    /// # Arguments
    ///
    /// * `features` - Feature matrix `[n_features, n_samples]` (feature-major)
    /// * `labels` - Class labels, length = n_samples
    pub fn new(features: ArrayView2<f32>, labels: Vec<ClassLabel>) -> Result<Self, DatasetError> {
        let n_features = features.nrows();
        let n_samples = features.ncols();

        if n_features == 0 {
            return Err(DatasetError::EmptyFeatures);
        }
        if n_samples == 0 {
            return Err(DatasetError::EmptySamples);
        }
        if labels.len() != n_samples {
            return Err(DatasetError::LabelLenMismatch {
                samples: n_samples,
                labels: labels.len(),
            });
        }

        Ok(Self {
            features: features.to_owned(),
            labels,
        })
    }

    /// Create a dataset from sample-major data `[n_samples, n_features]`.
    ///
    /// Transposes into the internal feature-major layout.
    pub fn from_samples(
        samples: ArrayView2<f32>,
        labels: Vec<ClassLabel>,
    ) -> Result<Self, DatasetError> {
        let n_samples = samples.nrows();
        let n_features = samples.ncols();
        let transposed =
            Array2::from_shape_fn((n_features, n_samples), |(f, s)| samples[[s, f]]);
        Self::new(transposed.view(), labels)
    }

    /// Create a dataset from per-sample rows.
    ///
    /// Rejects ragged input: every row must have the same feature count as
    /// the first row.
    pub fn from_rows(rows: &[Vec<f32>], labels: Vec<ClassLabel>) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::EmptySamples);
        }
        let n_features = rows[0].len();
        if n_features == 0 {
            return Err(DatasetError::EmptyFeatures);
        }
        for (sample_idx, row) in rows.iter().enumerate() {
            if row.len() != n_features {
                return Err(DatasetError::InconsistentRow {
                    sample_idx,
                    expected: n_features,
                    got: row.len(),
                });
            }
        }

        let features =
            Array2::from_shape_fn((n_features, rows.len()), |(f, s)| rows[s][f]);
        Self::new(features.view(), labels)
    }

    /// Number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.ncols()
    }

    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.nrows()
    }

    /// Feature-major view of the feature matrix.
    #[inline]
    pub fn features(&self) -> FeaturesView<'_> {
        FeaturesView::from_array(self.features.view())
    }

    /// All class labels, indexed by sample.
    #[inline]
    pub fn labels(&self) -> &[ClassLabel] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn new_validates_label_len() {
        let features = array![[1.0f32, 2.0, 3.0]];
        let err = Dataset::new(features.view(), vec![0, 1]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::LabelLenMismatch {
                samples: 3,
                labels: 2
            }
        );
    }

    #[test]
    fn new_rejects_empty() {
        let no_features = Array2::<f32>::zeros((0, 3));
        assert_eq!(
            Dataset::new(no_features.view(), vec![]).unwrap_err(),
            DatasetError::EmptyFeatures
        );

        let no_samples = Array2::<f32>::zeros((2, 0));
        assert_eq!(
            Dataset::new(no_samples.view(), vec![]).unwrap_err(),
            DatasetError::EmptySamples
        );
    }

    #[test]
    fn from_samples_transposes() {
        // 3 samples, 2 features
        let samples = array![[1.0f32, 4.0], [2.0, 5.0], [3.0, 6.0]];
        let ds = Dataset::from_samples(samples.view(), vec![0, 1, 0]).unwrap();

        assert_eq!(ds.n_samples(), 3);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.features().feature(0).to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(ds.features().feature(1).to_vec(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = Dataset::from_rows(&[vec![1.0, 2.0], vec![3.0]], vec![0, 1]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::InconsistentRow {
                sample_idx: 1,
                expected: 2,
                got: 1
            }
        );
    }
}
