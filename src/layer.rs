//! Reachability layers for the kSum recurrence.
//!
//! A [`ReachLayer`] records, for every shifted sum in `0..=n`, whether that sum
//! can be formed from exactly `k` elements. Layers are immutable: advancing
//! produces a fresh layer and leaves the previous one untouched.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::utils::default_parallel_min_width;

/// Dense table of reachable sums for one element count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachLayer {
    reachable: Vec<bool>, // length = n + 1
}

impl ReachLayer {
    /// Build layer 1: every distinct shifted value `v <= max_sum` is reachable.
    ///
    /// Values above `max_sum` are dropped; no sum the caller can query is
    /// affected by them.
    pub fn seed<I>(values: I, max_sum: usize) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut reachable = vec![false; max_sum + 1];
        for v in values {
            if v <= max_sum {
                reachable[v] = true;
            }
        }
        Self { reachable }
    }

    /// A layer of the given width with nothing reachable.
    pub fn empty(max_sum: usize) -> Self {
        Self {
            reachable: vec![false; max_sum + 1],
        }
    }

    /// Number of candidate sums the layer covers (`n + 1`).
    #[inline]
    pub fn width(&self) -> usize {
        self.reachable.len()
    }

    /// Largest sum the layer can answer for.
    #[inline]
    pub fn max_sum(&self) -> usize {
        self.reachable.len().saturating_sub(1)
    }

    /// Whether `sum` is reachable. Sums outside `0..=n` are never reachable.
    #[inline]
    pub fn contains(&self, sum: i128) -> bool {
        usize::try_from(sum)
            .ok()
            .and_then(|idx| self.reachable.get(idx))
            .copied()
            .unwrap_or(false)
    }

    /// Number of reachable sums.
    pub fn reachable_count(&self) -> usize {
        self.reachable.iter().filter(|&&r| r).count()
    }

    /// Iterate the reachable sums in increasing order.
    pub fn iter_reachable(&self) -> impl Iterator<Item = usize> + '_ {
        self.reachable
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| r.then_some(i))
    }

    /// Build the next layer: `i` is reachable iff `i - e` was reachable here for
    /// some step `e`.
    ///
    /// `steps` are the shifted element values. Order and duplicates do not
    /// matter. Wide layers go through the parallel kernel when the `parallel`
    /// feature is enabled.
    pub fn advance(&self, steps: &[usize]) -> Self {
        self.advance_with_threshold(steps, default_parallel_min_width())
    }

    /// Like [`advance`](Self::advance), but layers narrower than `parallel_min_width`
    /// always use the serial kernel.
    pub fn advance_with_threshold(&self, steps: &[usize], parallel_min_width: usize) -> Self {
        #[cfg(feature = "parallel")]
        {
            if self.width() >= parallel_min_width {
                return self.advance_parallel(steps);
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel_min_width;
        self.advance_serial(steps)
    }

    /// Single-threaded layer advance.
    pub fn advance_serial(&self, steps: &[usize]) -> Self {
        let reachable = (0..self.width())
            .map(|i| self.reachable_from(i, steps))
            .collect();
        Self { reachable }
    }

    /// Layer advance with candidate sums split across the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn advance_parallel(&self, steps: &[usize]) -> Self {
        let reachable = (0..self.width())
            .into_par_iter()
            .map(|i| self.reachable_from(i, steps))
            .collect();
        Self { reachable }
    }

    #[inline]
    fn reachable_from(&self, sum: usize, steps: &[usize]) -> bool {
        steps
            .iter()
            .any(|&e| e <= sum && self.reachable[sum - e])
    }
}
