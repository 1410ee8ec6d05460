//! Layered dynamic programming for the generalized kSum decision problem.
//!
//! Given integers `a`, a count `z` and a target `s`, decide whether exactly `z`
//! of the values in `a` sum to `s`.
//!
//! ## Core idea
//! 1. Normalize: settle the trivial cases, then shift every element by the
//!    minimum so sums become non-negative table indices.
//! 2. Build one reachability layer per element count. Layer `k + 1` depends only
//!    on layer `k`, so the [`LayerEngine`] keeps two layers alive at a time.
//! 3. Look up the rescaled target in the final layer.
//!
//! Time is O(z · n · |a|) and space O(n), where `n` is the rescaled target.
//!
//! A value may be used again at every layer. Feasibility means some multiset
//! of exactly `z` values taken from the distinct values of `a` sums to `s`,
//! with `z <= a.len()`.
//!
//! ## Quick start
//! ```
//! let a = [18, 11, 21, 28, 31, -44, 38, 40, 55, 60, 62];
//! assert!(ksum_dp::solve(&a, 1, -44));
//! assert!(ksum_dp::solve(&a, 3, -15));
//! assert!(!ksum_dp::solve(&a, 2, -15));
//! ```
//!
//! ## Features
//! - `parallel`: split each layer's candidate sums across a rayon pool.
//! - `tracing`: emit spans for normalization, blocks and layer advances.

pub mod blocks;
pub mod builder;
pub mod engine;
pub mod error;
pub mod layer;
pub mod normalize;
pub mod problem;
pub mod traits;
pub mod utils;

pub use crate::builder::{Solver, SolverBuilder};
pub use crate::engine::LayerEngine;
pub use crate::error::KSumError;
pub use crate::layer::ReachLayer;
pub use crate::normalize::{normalize, Normalized};
pub use crate::problem::KSumProblem;
pub use crate::traits::LayeredProblem;

/// Decide whether exactly `z` elements of `a` sum to `s`.
///
/// Negative counts, counts above `a.len()` and unreachable targets are all
/// `false`; `z == 0` is `true` exactly when `s == 0`.
///
/// # Panics
/// Panics only if the rescaled target survives normalization but is too large
/// to index any table on this platform, where the table could not be
/// allocated anyway. Use [`try_solve`] to receive that case as an error.
pub fn solve(a: &[i64], z: i64, s: i64) -> bool {
    match try_solve(a, z, s) {
        Ok(found) => found,
        Err(err) => panic!("{err}"),
    }
}

/// Fallible form of [`solve`] with no width limit.
///
/// # Errors
/// [`KSumError::TargetOutOfRange`] when the rescaled target cannot index a table.
pub fn try_solve(a: &[i64], z: i64, s: i64) -> Result<bool, KSumError> {
    Solver::default().decide(a, z, s)
}
