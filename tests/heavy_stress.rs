#![cfg(feature = "heavy")]
use ksum_dp::{solve, try_solve};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_values(rng: &mut StdRng, len: usize, range: i64) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(-range..=range)).collect()
}

#[test]
fn heavy_stress_planted_sums() {
    let mut rng = StdRng::seed_from_u64(123);
    let a = random_values(&mut rng, 400, 5_000);
    for z in [2usize, 5, 9] {
        let s: i64 = (0..z).map(|_| a[rng.gen_range(0..a.len())]).sum();
        assert!(solve(&a, z as i64, s), "planted sum missed for z={z}");
    }
}

#[test]
fn heavy_stress_many_layers() {
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_values(&mut rng, 120, 100);
    let z = 100i64;
    let s: i64 = a.iter().take(z as usize).sum();
    assert_eq!(try_solve(&a, z, s), Ok(true));
    // one past the largest reachable sum
    let max = *a.iter().max().expect("non-empty");
    assert_eq!(try_solve(&a, z, z * max + 1), Ok(false));
}
