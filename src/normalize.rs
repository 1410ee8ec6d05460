//! Guards and the shift into the non-negative sum domain.
//!
//! Every instance passes through [`normalize`] before any table is built. The
//! guards settle the trivial cases; everything else is shifted by the minimum
//! element so that sums can index a table.

use crate::error::KSumError;
use crate::problem::KSumProblem;

/// Outcome of normalizing an instance.
#[derive(Clone, Debug)]
pub enum Normalized {
    /// A guard settled the instance without any table.
    Decided(bool),
    /// The instance needs the layered table.
    Table(KSumProblem),
}

impl Normalized {
    /// The settled answer, if a guard fired.
    pub fn decided(&self) -> Option<bool> {
        match self {
            Normalized::Decided(found) => Some(*found),
            Normalized::Table(_) => None,
        }
    }
}

#[cfg(feature = "tracing")]
fn settled(guard: &'static str, found: bool) -> Result<Normalized, KSumError> {
    tracing::debug!(guard, found, "instance settled before table construction");
    Ok(Normalized::Decided(found))
}

#[cfg(not(feature = "tracing"))]
#[inline]
fn settled(_guard: &'static str, found: bool) -> Result<Normalized, KSumError> {
    Ok(Normalized::Decided(found))
}

/// Apply the guards, shift `a` by its minimum and rescale `s`.
///
/// Guards, first match wins:
/// - `z < 0` is infeasible;
/// - `z > a.len()` is infeasible;
/// - `z == 0` is feasible exactly when `s == 0`.
///
/// Otherwise, with `m = min(a)`, the offset is `m` when `m <= 0` and `0` when
/// every element is already positive. The shifted target is `n = s - z * offset`.
/// A negative `n`, or one above `z * max(shifted)`, is infeasible. A single
/// pick (`z == 1`) is settled by membership of `n` in the shifted values.
///
/// All arithmetic runs in `i128`, so extreme `i64` inputs cannot wrap.
///
/// # Errors
/// Returns [`KSumError::TargetOutOfRange`] when `n` survives the guards but
/// cannot index a table of `n + 1` entries.
pub fn normalize(a: &[i64], z: i64, s: i64) -> Result<Normalized, KSumError> {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!(
        "normalize",
        z,
        len = a.len(),
        m = tracing::field::Empty,
        n = tracing::field::Empty
    );
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    if z < 0 {
        return settled("negative_count", false);
    }
    if (a.len() as u64) < z as u64 {
        return settled("count_exceeds_len", false);
    }
    if z == 0 {
        return settled("empty_selection", s == 0);
    }

    // z >= 1 and len >= z, so `a` is non-empty here.
    let Some(&min) = a.iter().min() else {
        return settled("count_exceeds_len", false);
    };
    let offset = if min > 0 { 0 } else { min };
    let target = i128::from(s) - i128::from(z) * i128::from(offset);

    #[cfg(feature = "tracing")]
    {
        span.record("m", min);
        span.record("n", tracing::field::display(target));
    }

    if target < 0 {
        return settled("negative_target", false);
    }

    // shifted values fit in u64: a[i] - offset <= i64::MAX - i64::MIN
    let shifted = a
        .iter()
        .map(|&x| (i128::from(x) - i128::from(offset)) as u64);
    let max_step = shifted.clone().max().unwrap_or(0);
    if target > i128::from(z) * i128::from(max_step) {
        return settled("target_above_max", false);
    }
    if z == 1 {
        return settled("single_element", shifted.clone().any(|v| i128::from(v) == target));
    }

    // a Vec holds at most isize::MAX entries, and the table needs n + 1
    let max_sum = usize::try_from(target)
        .ok()
        .filter(|&n| n < isize::MAX as usize)
        .ok_or(KSumError::TargetOutOfRange { target })?;

    let mut steps: Vec<usize> = shifted
        .filter(|&v| v <= max_sum as u64)
        .map(|v| v as usize)
        .collect();
    steps.sort_unstable();
    steps.dedup();

    Ok(Normalized::Table(KSumProblem::new(
        z as usize, offset, max_sum, steps,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(a: &[i64], z: i64, s: i64) -> KSumProblem {
        match normalize(a, z, s) {
            Ok(Normalized::Table(p)) => p,
            other => panic!("expected a table, got {other:?}"),
        }
    }

    fn decided(a: &[i64], z: i64, s: i64) -> Option<bool> {
        normalize(a, z, s).ok().and_then(|n| n.decided())
    }

    #[test]
    fn guards_fire_in_order() {
        assert_eq!(decided(&[1], -2, 3), Some(false));
        assert_eq!(decided(&[], -1, 0), Some(false));
        assert_eq!(decided(&[1], 2, 3), Some(false));
        assert_eq!(decided(&[1], 0, 0), Some(true));
        assert_eq!(decided(&[], 0, 0), Some(true));
        assert_eq!(decided(&[1], 0, 1), Some(false));
    }

    #[test]
    fn positive_arrays_are_not_shifted() {
        let p = table(&[3, 5, 9], 2, 8);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.target(), 8);
        assert_eq!(p.steps(), &[3, 5]);
    }

    #[test]
    fn negative_minimum_shifts_everything() {
        // m = -1: b = [0, 4], n = -3 - 2 * -1 = -1
        assert_eq!(decided(&[-1, 3], 2, -3), Some(false));

        // m = -44: n = -15 + 3 * 44 = 117
        let a = [18, 11, 21, 28, 31, -44, 38, 40, 55, 60, 62];
        let p = table(&a, 3, -15);
        assert_eq!(p.offset(), -44);
        assert_eq!(p.target(), 117);
        assert_eq!(p.count(), 3);
        assert!(p.steps().contains(&0));
        assert!(p.steps().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn zero_minimum_uses_zero_offset() {
        let p = table(&[0, 2, 2, 7], 2, 9);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.steps(), &[0, 2, 7]);
    }

    #[test]
    fn target_above_reach_is_pruned() {
        assert_eq!(decided(&[1, 2, 3], 2, 7), Some(false));
        assert!(decided(&[1, 2, 3], 2, 6).is_none());
    }

    #[test]
    fn extreme_values_do_not_wrap() {
        let a = [i64::MIN, i64::MAX];
        // n = MIN - 2 * MIN = 2^63, above the all-zero shifted reach
        assert_eq!(decided(&[i64::MIN, i64::MIN], 2, i64::MIN), Some(false));
        // n = MIN - 1 * MIN = 0
        assert_eq!(decided(&a, 1, i64::MIN), Some(true));
        assert_eq!(decided(&[i64::MAX, i64::MAX], 2, i64::MIN), Some(false));
    }

    #[test]
    fn single_pick_is_a_membership_test() {
        assert_eq!(decided(&[i64::MAX], 1, i64::MAX), Some(true));
        assert_eq!(decided(&[i64::MAX], 1, i64::MAX - 1), Some(false));
        assert_eq!(decided(&[5, 1 << 40], 1, 1 << 40), Some(true));
        assert_eq!(decided(&[5, 1 << 40], 1, 6), Some(false));
        // membership is checked against the shifted values
        assert_eq!(decided(&[-7, 3], 1, -7), Some(true));
        assert_eq!(decided(&[-7, 3], 1, 3), Some(true));
        assert_eq!(decided(&[-7, 3], 1, 0), Some(false));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn unindexable_target_is_an_error() {
        // n = MAX - 2 * MIN, well past usize::MAX
        let err = normalize(&[i64::MIN, i64::MAX], 2, i64::MAX).unwrap_err();
        assert!(matches!(err, KSumError::TargetOutOfRange { .. }));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn target_past_vec_capacity_is_an_error() {
        // n = MAX fits in usize but a table of n + 1 cells does not fit in a Vec
        let err = normalize(&[0, i64::MAX], 2, i64::MAX).unwrap_err();
        assert_eq!(
            err,
            KSumError::TargetOutOfRange {
                target: i128::from(i64::MAX)
            }
        );
    }
}
