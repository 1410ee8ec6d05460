use crate::engine::LayerEngine;
use crate::error::KSumError;
use crate::normalize::{normalize, Normalized};
use crate::utils::default_parallel_min_width;

/// Configures a [`Solver`].
///
/// ```
/// use ksum_dp::{KSumError, SolverBuilder};
///
/// let solver = SolverBuilder::new().with_max_width(64).build();
/// assert_eq!(solver.decide(&[1, 2, 3], 2, 5), Ok(true));
/// assert!(matches!(
///     solver.decide(&[1, 200], 2, 201),
///     Err(KSumError::TableTooWide { .. })
/// ));
/// ```
#[derive(Clone, Debug)]
pub struct SolverBuilder {
    max_width: Option<usize>,
    parallel_min_width: usize,
    block_size: Option<usize>,
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBuilder {
    pub fn new() -> Self {
        Self {
            max_width: None,
            parallel_min_width: default_parallel_min_width(),
            block_size: None,
        }
    }

    /// Refuse instances whose layers would need more than `max_width` entries.
    ///
    /// # Panics
    /// Panics if `max_width == 0`.
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        assert!(max_width > 0, "max_width must be positive");
        self.max_width = Some(max_width);
        self
    }

    /// Layers narrower than this run serially even with the `parallel` feature.
    pub fn with_parallel_min_width(mut self, width: usize) -> Self {
        self.parallel_min_width = width;
        self
    }

    /// Advance the engine in blocks of `block_size` layers.
    ///
    /// # Panics
    /// Panics if `block_size == 0`.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        assert!(block_size > 0, "block_size must be positive");
        self.block_size = Some(block_size);
        self
    }

    pub fn build(self) -> Solver {
        Solver {
            max_width: self.max_width,
            parallel_min_width: self.parallel_min_width,
            block_size: self.block_size,
        }
    }
}

/// Reusable kSum decider. Holds configuration only; no state survives a call.
#[derive(Clone, Debug)]
pub struct Solver {
    max_width: Option<usize>,
    parallel_min_width: usize,
    block_size: Option<usize>,
}

impl Default for Solver {
    fn default() -> Self {
        SolverBuilder::new().build()
    }
}

impl Solver {
    /// Normalize an instance and apply this solver's limits.
    ///
    /// # Errors
    /// [`KSumError::TargetOutOfRange`] if the rescaled target cannot index a
    /// table, [`KSumError::TableTooWide`] if it exceeds the configured width.
    pub fn prepare(&self, a: &[i64], z: i64, s: i64) -> Result<Normalized, KSumError> {
        match normalize(a, z, s)? {
            Normalized::Table(problem) => {
                if let Some(limit) = self.max_width {
                    if problem.width() > limit {
                        return Err(KSumError::TableTooWide {
                            width: problem.width(),
                            limit,
                        });
                    }
                }
                Ok(Normalized::Table(
                    problem.with_parallel_min_width(self.parallel_min_width),
                ))
            }
            decided => Ok(decided),
        }
    }

    /// Decide whether exactly `z` elements of `a` sum to `s`.
    ///
    /// # Errors
    /// See [`prepare`](Self::prepare). Infeasible instances are `Ok(false)`.
    pub fn decide(&self, a: &[i64], z: i64, s: i64) -> Result<bool, KSumError> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("ksum_run", len = a.len(), z, s);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        match self.prepare(a, z, s)? {
            Normalized::Decided(found) => Ok(found),
            Normalized::Table(problem) => {
                let engine = match self.block_size {
                    Some(b) => LayerEngine::with_block_size(problem, b),
                    None => LayerEngine::new(problem),
                };
                Ok(engine.run())
            }
        }
    }
}
