//! Print per-side frontline counts for a few random maps.
//!
//! Usage:
//!   cargo run -p frontline --example random_map -- [seed] [count]

use frontline::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    let count: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(4);

    for index in 0..count {
        let scenario = draw_map(MapCfg::default(), ReplayToken { seed, index });
        let report = match run_scenario(&scenario) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("map {index}: {e}");
                continue;
            }
        };
        for r in &report.sides {
            println!(
                "map {index} {}: hulls={} lines={} unenclosed={} rewrites={}",
                r.side, r.stats.hulls, r.stats.lines, r.stats.unenclosed, r.stats.rewrites
            );
        }
    }
}
