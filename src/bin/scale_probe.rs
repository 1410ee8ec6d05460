use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

use ksum_dp::{normalize, LayerEngine, Normalized};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("kSum Scaling Probe: Performance and Correctness Testing");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Each scenario grows one dimension of the O(z * n * |a|) bound:");
    eprintln!("  • count:  number of elements to pick (z)");
    eprintln!("  • range:  magnitude of the values, which drives the table width n");
    eprintln!("  • length: size of the input array |a|");
    eprintln!();
    eprintln!(
        "Instances with at most {} candidate multisets are checked against brute force.",
        options.verify_limit
    );
    eprintln!("Seed: {}", options.seed);
    eprintln!();
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut sys = System::new();
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut measurements = Vec::new();

    eprintln!("[1/3] Growing the element count...");
    const COUNTS: &[usize] = &[2, 4, 8, 16, 32, 64, 128];
    for (idx, &z) in COUNTS.iter().enumerate() {
        eprint!("      [{}/{}] z={z}... ", idx + 1, COUNTS.len());
        let instance = Instance::random(&mut rng, 128.max(z), z, 100);
        measurements.push(probe("ksum_count", &instance, &options, &mut sys));
    }
    eprintln!();

    eprintln!("[2/3] Growing the value range...");
    const RANGES: &[i64] = &[100, 1_000, 10_000, 100_000, 1_000_000];
    for (idx, &range) in RANGES.iter().enumerate() {
        eprint!("      [{}/{}] range=±{range}... ", idx + 1, RANGES.len());
        let instance = Instance::random(&mut rng, 32, 4, range);
        measurements.push(probe("ksum_range", &instance, &options, &mut sys));
    }
    eprintln!();

    eprintln!("[3/3] Growing the array length...");
    const LENGTHS: &[usize] = &[8, 64, 512, 4_096, 32_768];
    for (idx, &len) in LENGTHS.iter().enumerate() {
        eprint!("      [{}/{}] len={len}... ", idx + 1, LENGTHS.len());
        let instance = Instance::random(&mut rng, len, 3, 1_000);
        measurements.push(probe("ksum_length", &instance, &options, &mut sys));
    }
    eprintln!();

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scale_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: u64,
    seed: u64,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 200_000u64;
        let mut seed = 42u64;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            }
            let (key, inline) = match arg.split_once('=') {
                Some((k, v)) => (k.to_string(), Some(v.to_string())),
                None => (arg, None),
            };
            let mut value = || -> Result<String, String> {
                match &inline {
                    Some(v) => Ok(v.clone()),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {key}")),
                }
            };
            match key.as_str() {
                "--format" => format = OutputFormat::from_str(&value()?)?,
                "--verify-limit" => {
                    verify_limit = value()?
                        .parse()
                        .map_err(|_| "verify limit must be a non-negative integer".to_string())?
                }
                "--seed" => {
                    seed = value()?
                        .parse()
                        .map_err(|_| "seed must be a non-negative integer".to_string())?
                }
                _ => return Err(format!("unrecognized argument '{key}'")),
            }
        }

        Ok(Self {
            format,
            verify_limit,
            seed,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin scale_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest multiset count to brute-force (default: 200000)
  --seed <N>                    Seed for the random instances (default: 42)
  -h, --help                    Print this help message

Examples:
  cargo run --release --bin scale_probe
  cargo run --release --features parallel --bin scale_probe -- --format table
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

struct Instance {
    values: Vec<i64>,
    count: usize,
    target: i64,
}

impl Instance {
    /// Random values in `-range..=range`. The target is the sum of `count`
    /// drawn values on a coin flip, otherwise uniform over the reachable span.
    fn random(rng: &mut StdRng, len: usize, count: usize, range: i64) -> Self {
        let values: Vec<i64> = (0..len).map(|_| rng.gen_range(-range..=range)).collect();
        let target = if rng.gen_bool(0.5) {
            (0..count).map(|_| values[rng.gen_range(0..len)]).sum()
        } else {
            let span = range * count as i64;
            rng.gen_range(-span..=span)
        };
        Self {
            values,
            count,
            target,
        }
    }

    fn describe(&self) -> String {
        format!("len={},z={},s={}", self.values.len(), self.count, self.target)
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    size_desc: String,
    width: usize,
    found: bool,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

fn probe(
    scenario: &'static str,
    instance: &Instance,
    options: &Options,
    sys: &mut System,
) -> Measurement {
    let before = rss_kib(sys);
    let start = Instant::now();
    let (found, width) = match normalize(&instance.values, instance.count as i64, instance.target)
    {
        Ok(Normalized::Decided(found)) => (found, 0),
        Ok(Normalized::Table(problem)) => {
            let width = problem.width();
            (LayerEngine::new(problem).run(), width)
        }
        Err(err) => {
            eprintln!("✗ {err}");
            return Measurement {
                scenario,
                size_desc: instance.describe(),
                width: 0,
                found: false,
                wall_s: 0.0,
                rss_delta_kib: 0,
                verification_status: VerificationStatus::Failed,
                verification_detail: Some(err.to_string()),
            };
        }
    };
    let wall_s = start.elapsed().as_secs_f64();
    let after = rss_kib(sys);

    let mut distinct = instance.values.clone();
    distinct.sort_unstable();
    distinct.dedup();
    let (status, detail) = if multiset_count(distinct.len(), instance.count) <= options.verify_limit {
        let expected = brute_force(&distinct, instance.count, instance.target as i128);
        if expected == found {
            (VerificationStatus::Passed, None)
        } else {
            (
                VerificationStatus::Failed,
                Some(format!("expected {expected}, got {found}")),
            )
        }
    } else {
        (VerificationStatus::NotChecked, None)
    };

    eprintln!(
        "{} found={found}, width={width}, time={wall_s:.3}s, status={}",
        status.icon(),
        status.label()
    );

    Measurement {
        scenario,
        size_desc: instance.describe(),
        width,
        found,
        wall_s,
        rss_delta_kib: after.saturating_sub(before),
        verification_status: status,
        verification_detail: detail,
    }
}

/// C(d + z - 1, z), saturating.
fn multiset_count(distinct: usize, count: usize) -> u64 {
    if distinct == 0 {
        return u64::from(count == 0);
    }
    let mut acc: u64 = 1;
    for i in 1..=count as u64 {
        acc = acc.saturating_mul(distinct as u64 - 1 + i) / i;
    }
    acc
}

fn brute_force(distinct: &[i64], count: usize, target: i128) -> bool {
    fn go(values: &[i64], from: usize, left: usize, remaining: i128) -> bool {
        if left == 0 {
            return remaining == 0;
        }
        (from..values.len()).any(|i| go(values, i, left - 1, remaining - values[i] as i128))
    }
    go(distinct, 0, count, target)
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Test Summary");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }

    let total = measurements.len().max(1) as f64;
    eprintln!("Verification Results:");
    eprintln!("  Total probes: {}", measurements.len());
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, 100.0 * passed as f64 / total);
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, 100.0 * failed as f64 / total);
    eprintln!(
        "  ○ Not checked (> {} multisets): {} ({:.1}%)",
        options.verify_limit,
        not_checked,
        100.0 * not_checked as f64 / total
    );
    eprintln!();

    if failed > 0 {
        eprintln!("Failed Probes:");
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!("  ✗ {} ({})", m.scenario, m.size_desc);
                if let Some(ref detail) = m.verification_detail {
                    eprintln!("     Error: {detail}");
                }
            }
        }
        eprintln!();
    }

    eprintln!("Performance Statistics by Scenario:");
    eprintln!();
    let mut by_scenario: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_scenario.entry(m.scenario).or_default().push(m);
    }
    for (scenario, ms) in &by_scenario {
        let min_time = ms.iter().map(|m| m.wall_s).fold(f64::INFINITY, f64::min);
        let max_time = ms.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let max_width = ms.iter().map(|m| m.width).max().unwrap_or(0);
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        eprintln!("  {scenario}:");
        eprintln!("    Probes: {}", ms.len());
        eprintln!("    Time: min={min_time:.3}s, max={max_time:.3}s");
        eprintln!("    Widest table: {max_width} sums");
        eprintln!("    Memory: max_delta={max_mem} KiB");
        eprintln!();
    }

    eprintln!("{}", "=".repeat(80));
    if failed == 0 {
        eprintln!("✓ All verified probes agree with brute force.");
    } else {
        eprintln!("✗ {failed} probe(s) disagree with brute force. Review the errors above.");
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size_desc,width,found,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},\"{}\",{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.width,
            m.found,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .fold("scenario".len(), usize::max);
    let col2 = measurements
        .iter()
        .map(|m| m.size_desc.len())
        .fold("size".len(), usize::max);

    println!(
        "{:<col1$}  {:<col2$}  {:>10}  {:>6}  {:>10}  {:>14}  {:>12}  detail",
        "scenario", "size", "width", "found", "wall_s", "rss_delta_kib", "status",
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<10}  {:-<6}  {:-<10}  {:-<14}  {:-<12}  {:-<12}",
        "", "", "", "", "", "", "", "",
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>10}  {:>6}  {:>10.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.width,
            m.found,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"width\":{},\"found\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.size_desc,
            m.width,
            m.found,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}
