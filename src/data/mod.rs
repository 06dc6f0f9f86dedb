//! Data input abstractions for feature matrices and labels.
//!
//! # Overview
//!
//! - [`Dataset`]: owned feature matrix + label vector with shape validation
//! - [`FeaturesView`]: feature-major view `[n_features, n_samples]` - features on rows
//! - [`SamplesView`]: sample-major view `[n_samples, n_features]` - samples on rows
//! - [`SampleAccessor`]: layout-agnostic access to one sample's features
//!
//! # Storage Layout
//!
//! Fitting wants feature-major data (sorting a feature's values across all
//! samples is a contiguous scan); prediction naturally consumes sample-major
//! input. The two view types make the layout explicit at the API boundary.

mod accessor;
mod dataset;
mod views;

pub use accessor::SampleAccessor;
pub use dataset::{Dataset, DatasetError};
pub use views::{FeaturesView, SamplesView};
