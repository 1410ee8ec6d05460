use thiserror::Error;

/// Reasons a kSum instance could not be decided.
///
/// Infeasibility is never an error; it is the `false` answer. These variants
/// only cover instances whose reachability table cannot or may not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KSumError {
    /// The table needs more columns than the solver was configured to allow.
    #[error("reachability table needs {width} columns, limit is {limit}")]
    TableTooWide { width: usize, limit: usize },
    /// The rescaled target is too large to index a table on this platform.
    #[error("rescaled target {target} cannot index a reachability table")]
    TargetOutOfRange { target: i128 },
}
