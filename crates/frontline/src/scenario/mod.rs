//! Scenario files and multi-side runs.
//!
//! Purpose
//! - A `Scenario` is the serde model of one map snapshot: graph and engine
//!   configuration plus the node records.
//! - `run_scenario` drives one `Frontline` per non-neutral side the way a game
//!   server would: sides in ascending order, each fed the hulls the other
//!   sides produced so far, then a second sweep so the earlier sides see the
//!   later sides' hulls too.
//!
//! Code cross-refs: `crate::frontline::Frontline::update`, `rand::draw_map`.

pub mod rand;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::frontline::{Frontline, FrontlineCfg, Hull, UpdateStats};
use crate::graph::{GraphCfg, GraphError, NodeGraph, NodeId, NodeSpec, Side};

/// Map snapshot plus configuration, as stored on disk.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub graph: GraphCfg,
    pub frontline: FrontlineCfg,
    pub nodes: Vec<NodeSpec>,
}

impl Scenario {
    pub fn build_graph(&self) -> Result<NodeGraph, GraphError> {
        NodeGraph::from_specs(&self.nodes, self.graph)
    }
}

/// Result for one side after the final sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideReport {
    pub side: Side,
    pub stats: UpdateStats,
    pub hulls: Vec<Hull>,
    /// Polylines in meters, `[x, y]` pairs.
    pub lines: Vec<Vec<[f64; 2]>>,
    pub unenclosed: Vec<NodeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sides: Vec<SideReport>,
}

impl Report {
    pub fn side(&self, side: Side) -> Option<&SideReport> {
        self.sides.iter().find(|r| r.side == side)
    }

    pub fn total_lines(&self) -> usize {
        self.sides.iter().map(|r| r.lines.len()).sum()
    }
}

const SWEEPS: usize = 2;

/// Run every non-neutral side of `scenario` to completion.
pub fn run_scenario(scenario: &Scenario) -> Result<Report, GraphError> {
    let graph = scenario.build_graph()?;
    let mut engines: Vec<Frontline> = graph
        .sides()
        .into_iter()
        .filter(|s| !s.is_neutral())
        .map(|s| Frontline::new(s, scenario.frontline))
        .collect();
    let mut stats = vec![UpdateStats::default(); engines.len()];

    for sweep in 0..SWEEPS {
        for k in 0..engines.len() {
            let enemy_hulls: Vec<Hull> = engines
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != k)
                .flat_map(|(_, f)| f.hulls().iter().cloned())
                .collect();
            stats[k] = engines[k].update(&graph, &enemy_hulls);
            info!(
                sweep,
                side = engines[k].side().0,
                hulls = stats[k].hulls,
                lines = stats[k].lines,
                "side updated"
            );
        }
    }

    let sides = engines
        .iter()
        .zip(stats)
        .map(|(f, stats)| SideReport {
            side: f.side(),
            stats,
            hulls: f.hulls().to_vec(),
            lines: f
                .lines()
                .iter()
                .map(|l| l.iter().map(|p| [p.x, p.y]).collect())
                .collect(),
            unenclosed: f.unenclosed().to_vec(),
        })
        .collect();
    Ok(Report { sides })
}
