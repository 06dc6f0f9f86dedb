//! Fit-time logging.

/// Verbosity level for fitting output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// One summary line per fit.
    Info,
    /// Per-node split decisions.
    Debug,
}

/// Verbosity-gated logger used by [`TreeBuilder`](super::TreeBuilder).
///
/// Writes to stderr so fitting output never mixes with a host's stdout.
#[derive(Debug, Clone, Copy)]
pub struct TrainingLogger {
    verbosity: Verbosity,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn start_fit(&self, n_samples: usize, n_features: usize, max_depth: usize) {
        if self.verbosity >= Verbosity::Info {
            eprintln!(
                "[cartree] fitting: {} samples, {} features, max_depth={}",
                n_samples, n_features, max_depth
            );
        }
    }

    pub fn log_split(&self, depth: usize, feature: u32, threshold: f32, gain: f64) {
        if self.verbosity >= Verbosity::Debug {
            eprintln!(
                "[cartree]   depth {}: split feature {} at {} (gain {:.6})",
                depth, feature, threshold, gain
            );
        }
    }

    pub fn log_leaf(&self, depth: usize, label: i64, n_samples: usize) {
        if self.verbosity >= Verbosity::Debug {
            eprintln!(
                "[cartree]   depth {}: leaf label {} ({} samples)",
                depth, label, n_samples
            );
        }
    }

    pub fn finish_fit(&self, n_nodes: usize, n_leaves: usize, depth: usize) {
        if self.verbosity >= Verbosity::Info {
            eprintln!(
                "[cartree] fitted: {} nodes, {} leaves, depth {}",
                n_nodes, n_leaves, depth
            );
        }
    }
}
