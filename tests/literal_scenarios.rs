use ksum_dp::{solve, try_solve};

const A: [i64; 11] = [18, 11, 21, 28, 31, -44, 38, 40, 55, 60, 62];

#[test]
fn guard_scenarios() {
    assert!(!solve(&[1], 2, 3), "count exceeds array length");
    assert!(!solve(&[1], -2, 3), "negative count");
    assert!(solve(&[1], 0, 0), "empty selection sums to zero");
    assert!(!solve(&[1], 0, 1), "empty selection cannot sum to nonzero");
    assert!(!solve(&[-1, 3], 2, -3), "rescaled target is negative");
}

#[test]
fn mixed_sign_scenarios() {
    let cases = [
        (1, -44, true),
        (2, 67, false),
        (2, 66, true),
        (3, -15, true),
        (2, -15, false),
        (4, 13, true),
    ];
    for (z, s, expected) in cases {
        assert_eq!(solve(&A, z, s), expected, "z={z}, s={s}");
        assert_eq!(try_solve(&A, z, s), Ok(expected), "z={z}, s={s}");
    }
}

#[test]
fn feasibility_is_not_monotone_in_count() {
    // feasible at z=1, not at z=2
    assert!(solve(&[1, 5], 1, 5));
    assert!(!solve(&[1, 5], 2, 5));
    // infeasible at z=1, feasible at z=2
    assert!(!solve(&[1, 5], 1, 2));
    assert!(solve(&[1, 5], 2, 2));
}

#[test]
fn single_element_miss_is_false_not_error() {
    assert!(!solve(&[4, 9], 1, 5));
    assert!(!solve(&[-4, 9], 1, 0));
    assert!(solve(&[-4, 9], 1, 9));
}

#[test]
fn empty_array_only_satisfies_empty_selection() {
    assert!(solve(&[], 0, 0));
    assert!(!solve(&[], 0, 7));
    assert!(!solve(&[], 1, 0));
}

#[test]
fn single_pick_with_huge_values() {
    assert!(solve(&[i64::MAX], 1, i64::MAX));
    assert_eq!(try_solve(&[i64::MAX], 1, i64::MAX), Ok(true));
    assert!(solve(&[5, 1 << 40], 1, 1 << 40));
    assert!(!solve(&[5, 1 << 40], 1, (1 << 40) - 1));
    assert!(solve(&[i64::MIN, i64::MAX], 1, i64::MIN));
    assert!(!solve(&[i64::MIN, i64::MAX], 1, 0));
}
