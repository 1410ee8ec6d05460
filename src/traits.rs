//! Core trait definitions for layered dynamic programs.
//!
//! To drive a recurrence with [`LayerEngine`](crate::engine::LayerEngine),
//! implement [`LayeredProblem`] for a struct that captures one instance
//! (input multiset, targets, precomputed bounds).
//!
//! The trait encodes a Markov-style recurrence:
//! - Layered structure: layers 0..=T, with transitions between consecutive layers.
//! - Frontiers: a compact representation of every DP value on one layer.
//! - Extraction: reading the answer off the final frontier.
//!
//! Each frontier depends only on its predecessor and fixed problem data, so the
//! engine never keeps more than two frontiers alive.

/// Trait for a layered dynamic program instance.
///
/// Semantics:
/// - There are `T = num_layers()` steps.
/// - `init_frontier()` is the frontier at layer 0.
/// - `forward_step(i, frontier)` maps layer `i` -> layer `i+1`.
/// - `extract(frontier_T)` turns the final frontier into the answer.
pub trait LayeredProblem {
    /// Representation of the DP frontier at a layer.
    type Frontier: Clone;

    /// Value read off the final frontier.
    type Output;

    /// Number of steps `T`.
    fn num_layers(&self) -> usize;

    /// Initialize the frontier at layer 0.
    fn init_frontier(&self) -> Self::Frontier;

    /// Perform one DP step: from layer `layer` to `layer + 1`.
    ///
    /// Must only depend on `frontier_i` and fixed problem data.
    fn forward_step(&self, layer: usize, frontier_i: &Self::Frontier) -> Self::Frontier;

    /// Advance a block of layers `[a, b)` starting from `frontier_a`.
    ///
    /// The default folds [`forward_step`](Self::forward_step) over the block.
    /// Implementations may override it when several steps can be fused, as long
    /// as the returned frontier is identical to the folded one.
    fn summarize_block(&self, a: usize, b: usize, frontier_a: &Self::Frontier) -> Self::Frontier {
        let mut f = frontier_a.clone();
        for layer in a..b {
            f = self.forward_step(layer, &f);
        }
        f
    }

    /// Read the answer off the frontier at layer `T`.
    fn extract(&self, frontier_t: &Self::Frontier) -> Self::Output;
}
