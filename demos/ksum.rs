//! Example: deciding kSum instances and inspecting the layer trace.
//!
//! Run with:
//! `cargo run --example ksum`

use ksum_dp::{LayerEngine, Normalized, SolverBuilder};

fn main() {
    let a = [18, 11, 21, 28, 31, -44, 38, 40, 55, 60, 62];
    let solver = SolverBuilder::new().with_max_width(1 << 20).build();

    for (z, s) in [(1, -44), (2, 67), (2, 66), (3, -15), (2, -15), (4, 13)] {
        match solver.decide(&a, z, s) {
            Ok(found) => println!("z={z:>2} s={s:>4} -> {found}"),
            Err(err) => println!("z={z:>2} s={s:>4} -> error: {err}"),
        }
    }

    // Layer-by-layer view of one instance.
    let (z, s) = (3, -15);
    let problem = match solver.prepare(&a, z, s) {
        Ok(Normalized::Table(problem)) => problem,
        Ok(Normalized::Decided(found)) => {
            println!("settled without a table: {found}");
            return;
        }
        Err(err) => {
            eprintln!("cannot build table: {err}");
            return;
        }
    };
    println!(
        "\nshift offset m={}, rescaled target n={}, table width={}",
        problem.offset(),
        problem.target(),
        problem.width()
    );

    let engine = LayerEngine::new(problem);
    for (layer, frontier) in engine.frontiers() {
        let sums: Vec<i128> = frontier
            .iter_reachable()
            .map(|sum| engine.problem().unshift(layer, sum))
            .collect();
        println!(
            "{} element(s): {} reachable sums <= target, e.g. {:?}",
            layer + 1,
            sums.len(),
            &sums[..sums.len().min(8)]
        );
    }
    println!("target reachable: {}", engine.run());
}
