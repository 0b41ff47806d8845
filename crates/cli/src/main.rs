use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use frontline::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{Origin, SideStats, Sidecar};

#[derive(Parser)]
#[command(name = "frontline-cli")]
#[command(about = "Frontline generation runner")]
struct Cmd {
    /// Optional label; propagated to provenance sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run every side of a scenario file and write the JSON report
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Draw a random map and write it as a scenario file
    Generate {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 10)]
        cols: usize,
        #[arg(long, default_value_t = 8)]
        rows: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print engine version and default configuration as JSON
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_max_level(level)
        .with_target(false)
        .init();
    let tag = cmd.tag.as_deref();
    match cmd.action {
        Action::Run { input, out } => run(&input, &out, tag),
        Action::Generate {
            seed,
            index,
            cols,
            rows,
            out,
        } => {
            let cfg = MapCfg {
                cols,
                rows,
                ..MapCfg::default()
            };
            generate(cfg, ReplayToken { seed, index }, &out, tag)
        }
        Action::Report => report(tag),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

fn run(input: &Path, out: &Path, tag: Option<&str>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "run");
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let scenario: Scenario = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing scenario {}", input.display()))?;
    let report = run_scenario(&scenario)
        .with_context(|| format!("building graph from {}", input.display()))?;

    ensure_parent(out)?;
    fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let sides = SideStats::of(&report);
    for s in &sides {
        println!("{}", serde_json::to_string(s)?);
    }
    let origin = Origin::Run {
        input: input.to_path_buf(),
        input_bytes: bytes.len(),
        nodes: scenario.nodes.len(),
        graph: scenario.graph,
        frontline: scenario.frontline,
        sides,
    };
    Sidecar::new(out, origin, tag).write()?;
    Ok(())
}

fn generate(cfg: MapCfg, tok: ReplayToken, out: &Path, tag: Option<&str>) -> Result<()> {
    tracing::info!(seed = tok.seed, index = tok.index, out = %out.display(), "generate");
    let scenario = draw_map(cfg, tok);
    ensure_parent(out)?;
    fs::write(out, serde_json::to_vec_pretty(&scenario)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let origin = Origin::Generate {
        map: cfg,
        token: tok,
        nodes: scenario.nodes.len(),
    };
    Sidecar::new(out, origin, tag).write()?;
    Ok(())
}

fn report(tag: Option<&str>) -> Result<()> {
    let obj = serde_json::json!({
        "engine_version": frontline::VERSION,
        "code_rev": provenance::code_rev(),
        "tags": tag.into_iter().collect::<Vec<_>>(),
        "defaults": {
            "graph": GraphCfg::default(),
            "frontline": FrontlineCfg::default(),
            "map": MapCfg::default()
        }
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generate_then_run_writes_report_and_sidecars() {
        let dir = tempdir().unwrap();
        let map = dir.path().join("maps").join("m0.json");
        let out = dir.path().join("out").join("m0.report.json");
        let cfg = MapCfg {
            cols: 6,
            rows: 5,
            ..MapCfg::default()
        };
        generate(cfg, ReplayToken { seed: 5, index: 1 }, &map, Some("ci")).unwrap();
        assert!(map.exists());
        assert!(provenance::sidecar_path(&map).exists());

        run(&map, &out, None).unwrap();
        let report: Report = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert!(report.sides.iter().all(|r| !r.side.is_neutral()));
        let side_count = report.sides.len();
        let prov: serde_json::Value =
            serde_json::from_slice(&fs::read(provenance::sidecar_path(&out)).unwrap()).unwrap();
        assert_eq!(prov["command"], "run");
        assert_eq!(prov["nodes"], 30);
        assert_eq!(prov["sides"].as_array().unwrap().len(), side_count);
        assert_eq!(prov["input_bytes"], fs::read(&map).unwrap().len());
    }

    #[test]
    fn run_rejects_malformed_scenario() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, r#"{"nodes": [{"id": 1, "octet": [0, 0], "side": 1, "links": [4]}]}"#)
            .unwrap();
        let err = run(&input, &dir.path().join("r.json"), None).unwrap_err();
        assert!(format!("{err:#}").contains("unknown node"));
    }
}
