//! Assorted utilities and helpers.

/// Layers narrower than this run the serial kernel even with `parallel` on.
///
/// Below a few thousand candidate sums the rayon split costs more than the scan.
pub const DEFAULT_PARALLEL_MIN_WIDTH: usize = 4096;

/// Width threshold used by [`crate::layer::ReachLayer::advance`].
#[inline]
pub fn default_parallel_min_width() -> usize {
    DEFAULT_PARALLEL_MIN_WIDTH
}

/// Checkpoint spacing for `T` layers: the integer ceiling of √T.
///
/// Used by [`crate::engine::LayerEngine::new`] so that a full checkpoint set
/// holds O(√T) frontiers and any layer can be recomputed in O(√T) steps.
#[inline]
pub fn default_block_size(num_layers: usize) -> usize {
    if num_layers <= 1 {
        return 1;
    }
    let mut root = (num_layers as f64).sqrt() as usize;
    while root * root > num_layers {
        root -= 1;
    }
    while root * root < num_layers {
        root += 1;
    }
    root
}
