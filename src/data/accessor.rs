//! Sample accessor trait for tree traversal.

/// Access features for a single sample.
///
/// This trait provides read-only access to feature values for one sample
/// (row). It is implemented by `&[f32]` directly, allowing slices to be
/// used for tree traversal without wrapper types.
///
/// # Implementations
///
/// - `[f32]` / `[f32; N]`: direct slice access (zero-cost)
/// - `ndarray::ArrayView1<f32>`: contiguous or strided views
/// - Returned by [`SamplesView::sample`](super::SamplesView::sample)
pub trait SampleAccessor {
    /// Get the feature value at the given index.
    fn feature(&self, index: usize) -> f32;

    /// Number of features in this sample.
    fn n_features(&self) -> usize;
}

impl SampleAccessor for [f32] {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.len()
    }
}

// Enables `&[0.5f32, 1.0]` literals in tests and call sites.
impl<const N: usize> SampleAccessor for [f32; N] {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn n_features(&self) -> usize {
        N
    }
}

impl<T: SampleAccessor + ?Sized> SampleAccessor for &T {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        (**self).feature(index)
    }

    #[inline]
    fn n_features(&self) -> usize {
        (**self).n_features()
    }
}

impl SampleAccessor for ndarray::ArrayView1<'_, f32> {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.len()
    }
}
