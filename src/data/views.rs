//! View types for algorithm access.
//!
//! These provide read-only access to feature data with the layout the
//! algorithm wants: feature-major for split finding, sample-major for
//! prediction. The API uses conceptual terms (sample, feature), not array
//! terms (row, col).

use ndarray::{ArrayView1, ArrayView2, Axis};

// =============================================================================
// FeaturesView
// =============================================================================

/// Read-only feature-major view: `[n_features, n_samples]`.
///
/// Each feature's values across all samples are contiguous, which is the
/// fast path for per-feature threshold scans during split finding.
#[derive(Clone, Copy)]
pub struct FeaturesView<'a> {
    /// Shape: [n_features, n_samples] - feature-major
    data: ArrayView2<'a, f32>,
}

impl<'a> FeaturesView<'a> {
    /// Create a features view over a feature-major array.
    pub fn from_array(data: ArrayView2<'a, f32>) -> Self {
        Self { data }
    }

    /// Number of samples (second dimension).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.ncols()
    }

    /// Number of features (first dimension).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.data.nrows()
    }

    /// Get feature value at (sample, feature).
    ///
    /// Internally accesses `[feature, sample]` due to storage layout.
    #[inline]
    pub fn get(&self, sample: usize, feature: usize) -> f32 {
        self.data[[feature, sample]]
    }

    /// Get a view of all sample values for a feature (contiguous).
    ///
    /// The returned view borrows the underlying data for `'a`, not `self`.
    #[inline]
    pub fn feature(&self, feature: usize) -> ArrayView1<'a, f32> {
        self.data.index_axis_move(Axis(0), feature)
    }

    /// Get all features for a sample.
    ///
    /// This returns a strided view; for tree traversal it is still cheap
    /// because trees touch at most `depth` features per sample.
    #[inline]
    pub fn sample(&self, sample: usize) -> ArrayView1<'a, f32> {
        self.data.index_axis_move(Axis(1), sample)
    }

    /// Get the underlying array view, shape `[n_features, n_samples]`.
    pub fn view(&self) -> ArrayView2<'a, f32> {
        self.data
    }
}

impl std::fmt::Debug for FeaturesView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeaturesView")
            .field("n_features", &self.n_features())
            .field("n_samples", &self.n_samples())
            .finish()
    }
}

// =============================================================================
// SamplesView
// =============================================================================

/// Read-only sample-major view: `[n_samples, n_features]`.
///
/// This is the caller-facing prediction layout: one row per sample.
#[derive(Clone, Copy)]
pub struct SamplesView<'a> {
    /// Shape: [n_samples, n_features] - sample-major
    data: ArrayView2<'a, f32>,
}

impl<'a> SamplesView<'a> {
    /// Create a samples view over a sample-major array.
    pub fn from_array(data: ArrayView2<'a, f32>) -> Self {
        Self { data }
    }

    /// Create from a contiguous slice in sample-major order.
    ///
    /// Data layout: `[s0_f0, s0_f1, ..., s1_f0, s1_f1, ...]`.
    ///
    /// Returns `None` if the slice length doesn't match
    /// `n_samples * n_features`.
    pub fn from_slice(data: &'a [f32], n_samples: usize, n_features: usize) -> Option<Self> {
        ArrayView2::from_shape((n_samples, n_features), data)
            .ok()
            .map(|view| Self { data: view })
    }

    /// Number of samples (first dimension).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of features (second dimension).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    /// Get feature value at (sample, feature).
    #[inline]
    pub fn get(&self, sample: usize, feature: usize) -> f32 {
        self.data[[sample, feature]]
    }

    /// Get all features for a sample (contiguous).
    #[inline]
    pub fn sample(&self, sample: usize) -> ArrayView1<'a, f32> {
        self.data.index_axis_move(Axis(0), sample)
    }

    /// Get the underlying array view, shape `[n_samples, n_features]`.
    pub fn view(&self) -> ArrayView2<'a, f32> {
        self.data
    }
}

impl std::fmt::Debug for SamplesView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplesView")
            .field("n_samples", &self.n_samples())
            .field("n_features", &self.n_features())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn features_view_axes() {
        // 2 features, 3 samples
        let data = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let view = FeaturesView::from_array(data.view());

        assert_eq!(view.n_features(), 2);
        assert_eq!(view.n_samples(), 3);
        assert_eq!(view.get(1, 0), 2.0);
        assert_eq!(view.feature(1).to_vec(), vec![4.0, 5.0, 6.0]);
        assert_eq!(view.sample(2).to_vec(), vec![3.0, 6.0]);
    }

    #[test]
    fn samples_view_axes() {
        // 3 samples, 2 features
        let data = array![[1.0f32, 4.0], [2.0, 5.0], [3.0, 6.0]];
        let view = SamplesView::from_array(data.view());

        assert_eq!(view.n_samples(), 3);
        assert_eq!(view.n_features(), 2);
        assert_eq!(view.get(1, 0), 2.0);
        assert_eq!(view.sample(0).to_vec(), vec![1.0, 4.0]);
    }

    #[test]
    fn samples_view_from_slice() {
        let flat = [1.0f32, 4.0, 2.0, 5.0, 3.0, 6.0];
        let view = SamplesView::from_slice(&flat, 3, 2).unwrap();
        assert_eq!(view.sample(1).to_vec(), vec![2.0, 5.0]);

        assert!(SamplesView::from_slice(&flat, 4, 2).is_none());
    }
}
