//! Fixed battery of kSum checks. Prints a confirmation when every one holds.
//!
//! Run with:
//! `cargo run --bin ksum_selfcheck`

use ksum_dp::solve;

fn main() {
    assert!(!solve(&[1], 2, 3));
    assert!(!solve(&[1], -2, 3));
    assert!(solve(&[1], 0, 0));
    assert!(!solve(&[1], 0, 1));
    assert!(!solve(&[-1, 3], 2, -3));

    let a = [18, 11, 21, 28, 31, -44, 38, 40, 55, 60, 62];
    assert!(solve(&a, 1, -44));
    assert!(!solve(&a, 2, 67));
    assert!(solve(&a, 2, 66));
    assert!(solve(&a, 3, -15));
    assert!(!solve(&a, 2, -15));
    assert!(solve(&a, 4, 13));

    println!("All checks passed.");
}
