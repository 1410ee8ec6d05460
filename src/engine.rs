//! Generic layered DP engine.
//!
//! The engine drives a [`LayeredProblem`] from layer 0 to layer T:
//! 1. The layers are split into blocks of `block_size` steps.
//! 2. Each block is advanced through [`LayeredProblem::summarize_block`], so at
//!    most two frontiers are alive at any time.
//! 3. The answer is read off the final frontier.
//!
//! Checkpoints taken at block boundaries let callers revisit any intermediate
//! layer in at most `block_size` steps without retaining every frontier.

use crate::blocks::{partition, Checkpoint, Checkpoints};
use crate::traits::LayeredProblem;
use crate::utils::default_block_size;

/// Layered DP engine for a given problem instance `P`.
///
/// Typical usage:
/// ```
/// use ksum_dp::{normalize, LayerEngine, Normalized};
///
/// let a = [18, 11, 21, 28, 31, -44, 38, 40, 55, 60, 62];
/// match normalize(&a, 2, 66).expect("indexable target") {
///     Normalized::Table(problem) => {
///         let engine = LayerEngine::new(problem);
///         assert!(engine.run());
///     }
///     Normalized::Decided(_) => unreachable!("needs a table"),
/// }
/// ```
pub struct LayerEngine<P: LayeredProblem> {
    problem: P,
    block_size: usize,
}

impl<P: LayeredProblem> LayerEngine<P> {
    /// Create a new engine with a heuristic block size (≈ √T).
    pub fn new(problem: P) -> Self {
        let b = default_block_size(problem.num_layers()).max(1);
        Self::with_block_size(problem, b)
    }

    /// Create a new engine with an explicit block size.
    ///
    /// # Panics
    /// Panics if `block_size == 0`.
    pub fn with_block_size(problem: P, block_size: usize) -> Self {
        assert!(block_size > 0, "block_size must be positive");
        Self {
            problem,
            block_size,
        }
    }

    /// Expose immutable reference to the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Give the problem back to the caller.
    pub fn into_problem(self) -> P {
        self.problem
    }

    /// Return the configured block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Advance from layer 0 to layer T and return the final frontier.
    pub fn final_frontier(&self) -> P::Frontier {
        let mut frontier = self.problem.init_frontier();
        for (k, block) in partition(self.problem.num_layers(), self.block_size).enumerate() {
            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!(
                "advance_block",
                block = k,
                start = block.start,
                end = block.end
            );
            #[cfg(feature = "tracing")]
            let _enter = span.enter();
            #[cfg(not(feature = "tracing"))]
            let _ = k;
            frontier = self
                .problem
                .summarize_block(block.start, block.end, &frontier);
        }
        frontier
    }

    /// Run the full DP and extract the answer from layer T.
    pub fn run(&self) -> P::Output {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "layer_run",
            layers = self.problem.num_layers(),
            block_size = self.block_size
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let frontier_t = self.final_frontier();
        self.problem.extract(&frontier_t)
    }

    /// Iterate the frontiers of layers 0..=T in order.
    ///
    /// Only the frontier about to be yielded is held; each one is computed from
    /// its predecessor on demand.
    pub fn frontiers(&self) -> Frontiers<'_, P> {
        Frontiers {
            problem: &self.problem,
            layer: 0,
            pending: Some(self.problem.init_frontier()),
        }
    }

    /// Run the DP and keep the frontier at layer 0 and at every block end.
    pub fn checkpoints(&self) -> Checkpoints<P::Frontier> {
        let t = self.problem.num_layers();
        let mut entries = Vec::with_capacity(t.div_ceil(self.block_size) + 1);
        let mut frontier = self.problem.init_frontier();
        entries.push(Checkpoint {
            layer: 0,
            frontier: frontier.clone(),
        });
        for block in partition(t, self.block_size) {
            frontier = self
                .problem
                .summarize_block(block.start, block.end, &frontier);
            entries.push(Checkpoint {
                layer: block.end,
                frontier: frontier.clone(),
            });
        }
        Checkpoints::new(self.block_size, entries)
    }

    /// Recompute the frontier at `layer`, or `None` past layer T.
    pub fn frontier_at(&self, layer: usize) -> Option<P::Frontier> {
        if layer > self.problem.num_layers() {
            return None;
        }
        let f0 = self.problem.init_frontier();
        Some(self.problem.summarize_block(0, layer, &f0))
    }

    /// Recompute the frontier at `layer` starting from the nearest checkpoint.
    ///
    /// `checkpoints` must come from [`checkpoints`](Self::checkpoints) on the
    /// same problem instance.
    pub fn frontier_from(
        &self,
        checkpoints: &Checkpoints<P::Frontier>,
        layer: usize,
    ) -> Option<P::Frontier> {
        if layer > self.problem.num_layers() {
            return None;
        }
        let cp = checkpoints.nearest(layer)?;
        Some(
            self.problem
                .summarize_block(cp.layer, layer, &cp.frontier),
        )
    }
}

/// Iterator over the frontiers of a [`LayerEngine`], see [`LayerEngine::frontiers`].
pub struct Frontiers<'a, P: LayeredProblem> {
    problem: &'a P,
    layer: usize,
    pending: Option<P::Frontier>,
}

impl<'a, P: LayeredProblem> Iterator for Frontiers<'a, P> {
    type Item = (usize, P::Frontier);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.pending.take()?;
        let layer = self.layer;
        if layer < self.problem.num_layers() {
            self.pending = Some(self.problem.forward_step(layer, &current));
            self.layer += 1;
        }
        Some((layer, current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.pending.is_some() {
            self.problem.num_layers() - self.layer + 1
        } else {
            0
        };
        (left, Some(left))
    }
}

impl<'a, P: LayeredProblem> ExactSizeIterator for Frontiers<'a, P> {}
