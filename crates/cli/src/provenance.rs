//! `<artifact>.provenance.json` sidecars: which command, inputs and engine
//! produced an output file.

use anyhow::{Context, Result};
use chrono::Utc;
use frontline::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Per-side outcome of a run, as recorded and printed.
#[derive(Clone, Debug, Serialize)]
pub struct SideStats {
    pub side: Side,
    #[serde(flatten)]
    pub stats: UpdateStats,
}

impl SideStats {
    pub fn of(report: &Report) -> Vec<Self> {
        report
            .sides
            .iter()
            .map(|r| Self {
                side: r.side,
                stats: r.stats,
            })
            .collect()
    }
}

/// Command that wrote the artifact, with the inputs it needs to be redone.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Origin {
    Generate {
        map: MapCfg,
        token: ReplayToken,
        nodes: usize,
    },
    Run {
        input: PathBuf,
        input_bytes: usize,
        nodes: usize,
        graph: GraphCfg,
        frontline: FrontlineCfg,
        sides: Vec<SideStats>,
    },
}

#[derive(Debug, Serialize)]
pub struct Sidecar {
    pub artifact: PathBuf,
    pub engine_version: &'static str,
    pub code_rev: String,
    /// RFC 3339, UTC.
    pub written_at: String,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub origin: Origin,
}

impl Sidecar {
    pub fn new(artifact: &Path, origin: Origin, tag: Option<&str>) -> Self {
        Self {
            artifact: artifact.to_path_buf(),
            engine_version: frontline::VERSION,
            code_rev: code_rev(),
            written_at: Utc::now().to_rfc3339(),
            tags: tag.into_iter().map(str::to_string).collect(),
            origin,
        }
    }

    /// Write next to the artifact; returns the sidecar path.
    pub fn write(&self) -> Result<PathBuf> {
        let path = sidecar_path(&self.artifact);
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `maps/m0.json` -> `maps/m0.provenance.json`.
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// `GIT_COMMIT` when set, else the checkout's HEAD, else `"unknown"`.
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        assert_eq!(
            sidecar_path(Path::new("out/m0.report.json")),
            Path::new("out/m0.report.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("maps/m0")),
            Path::new("maps/m0.provenance.json")
        );
    }

    #[test]
    fn run_sidecar_records_sides_and_inputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("r.json");
        let stats = UpdateStats {
            hulls: 2,
            lines: 1,
            unenclosed: 3,
            rewrites: 7,
        };
        let origin = Origin::Run {
            input: dir.path().join("m.json"),
            input_bytes: 120,
            nodes: 12,
            graph: GraphCfg::default(),
            frontline: FrontlineCfg::default(),
            sides: vec![SideStats { side: Side(1), stats }],
        };
        let path = Sidecar::new(&artifact, origin, Some("nightly"))
            .write()
            .unwrap();
        assert_eq!(path, dir.path().join("r.provenance.json"));

        let doc: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(doc["command"], "run");
        assert_eq!(doc["nodes"], 12);
        assert_eq!(doc["tags"][0], "nightly");
        assert_eq!(doc["engine_version"], frontline::VERSION);
        assert_eq!(doc["sides"][0]["side"], 1);
        assert_eq!(doc["sides"][0]["rewrites"], 7);
        assert_eq!(doc["frontline"]["min_angle"], 35.0);
        let written = doc["written_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(written).is_ok());
    }

    #[test]
    fn generate_sidecar_keeps_the_replay_token() {
        let dir = tempdir().unwrap();
        let origin = Origin::Generate {
            map: MapCfg::default(),
            token: ReplayToken { seed: 9, index: 4 },
            nodes: 80,
        };
        let path = Sidecar::new(&dir.path().join("m.json"), origin, None)
            .write()
            .unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(doc["command"], "generate");
        assert_eq!(doc["token"]["seed"], 9);
        assert_eq!(doc["token"]["index"], 4);
        assert_eq!(doc["map"]["cols"], 10);
        assert!(doc["tags"].as_array().unwrap().is_empty());
    }
}
