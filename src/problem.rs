//! The kSum feasibility recurrence as a layered DP.
//!
//! Engine layer `k` holds the sums reachable with exactly `k + 1` shifted
//! elements, so an instance with count `z` runs `z - 1` steps:
//! - layer 0 is seeded with the distinct shifted values;
//! - each step adds one more element to every reachable sum;
//! - the answer is whether the rescaled target is reachable at the last layer.

use crate::layer::ReachLayer;
use crate::traits::LayeredProblem;
use crate::utils::default_parallel_min_width;

/// A normalized kSum instance: shifted steps, element count and rescaled target.
///
/// Built by [`crate::normalize`]; every field already satisfies the
/// post-shift invariants (`count >= 1`, steps sorted, distinct and `<= target`).
#[derive(Clone, Debug)]
pub struct KSumProblem {
    count: usize,
    offset: i64,
    target: usize,
    steps: Vec<usize>,
    parallel_min_width: usize,
}

impl KSumProblem {
    pub(crate) fn new(count: usize, offset: i64, target: usize, steps: Vec<usize>) -> Self {
        debug_assert!(count >= 1, "a table instance needs at least one element");
        debug_assert!(steps.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(steps.last().map_or(true, |&e| e <= target));
        Self {
            count,
            offset,
            target,
            steps,
            parallel_min_width: default_parallel_min_width(),
        }
    }

    /// Layers at least this wide use the parallel kernel (with `parallel`).
    pub fn with_parallel_min_width(mut self, width: usize) -> Self {
        self.parallel_min_width = width;
        self
    }

    /// Number of elements to pick (`z`).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Constant subtracted from every element (`min(a)`, or 0 if all positive).
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Rescaled target `n`.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Distinct shifted element values that can still contribute to `n`.
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Table width per layer (`n + 1`).
    pub fn width(&self) -> usize {
        self.target + 1
    }

    /// Translate a shifted sum at engine layer `layer` back to the caller's domain.
    pub fn unshift(&self, layer: usize, sum: usize) -> i128 {
        sum as i128 + (layer as i128 + 1) * i128::from(self.offset)
    }
}

impl LayeredProblem for KSumProblem {
    type Frontier = ReachLayer;
    type Output = bool;

    fn num_layers(&self) -> usize {
        self.count - 1
    }

    fn init_frontier(&self) -> Self::Frontier {
        ReachLayer::seed(self.steps.iter().copied(), self.target)
    }

    fn forward_step(&self, layer: usize, frontier_i: &Self::Frontier) -> Self::Frontier {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!(
            "advance_layer",
            elements = layer + 2,
            width = frontier_i.width(),
            reachable = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();
        #[cfg(not(feature = "tracing"))]
        let _ = layer;

        let next = frontier_i.advance_with_threshold(&self.steps, self.parallel_min_width);

        #[cfg(feature = "tracing")]
        span.record("reachable", next.reachable_count());

        next
    }

    fn extract(&self, frontier_t: &Self::Frontier) -> Self::Output {
        frontier_t.contains(self.target as i128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LayerEngine;

    #[test]
    fn single_element_reads_seed_layer() {
        let p = KSumProblem::new(1, 0, 5, vec![2, 5]);
        assert_eq!(p.num_layers(), 0);
        assert!(LayerEngine::new(p.clone()).run());

        let miss = KSumProblem::new(1, 0, 4, vec![2]);
        assert!(!LayerEngine::new(miss).run());
    }

    #[test]
    fn layers_follow_the_recurrence() {
        // steps {0, 1, 3}; two elements reach {0,1,2,3,4,6}, three miss only 8
        let p = KSumProblem::new(3, -1, 9, vec![0, 1, 3]);
        let layers: Vec<_> = LayerEngine::new(p)
            .frontiers()
            .map(|(_, f)| f.iter_reachable().collect::<Vec<_>>())
            .collect();
        assert_eq!(layers[0], vec![0, 1, 3]);
        assert_eq!(layers[1], vec![0, 1, 2, 3, 4, 6]);
        assert_eq!(layers[2], vec![0, 1, 2, 3, 4, 5, 6, 7, 9]);
    }

    #[test]
    fn unshift_restores_caller_sums() {
        let p = KSumProblem::new(3, -44, 117, vec![0, 62]);
        // one element: shifted 0 is -44
        assert_eq!(p.unshift(0, 0), -44);
        // three elements: shifted 117 is -15
        assert_eq!(p.unshift(2, 117), -15);
    }

    #[test]
    fn serial_threshold_gives_same_answer() {
        let p = KSumProblem::new(4, 0, 40, vec![0, 7, 9, 13]);
        let wide = p.clone().with_parallel_min_width(usize::MAX);
        let narrow = p.with_parallel_min_width(1);
        assert_eq!(
            LayerEngine::new(wide).final_frontier(),
            LayerEngine::new(narrow).final_frontier()
        );
    }
}
