//! Frontline engine: hulls around one side's territory and the lines drawn
//! along their enemy-facing stretches.
//!
//! Purpose
//! - `Frontline::update` rebuilds everything from the current graph snapshot:
//!   seed triangles over unenclosed friendly nodes (`builder`), refine each to
//!   a fixed point (`refine`), then walk the final hulls to emit polylines
//!   (`lines`).
//!
//! Why this design
//! - One `Run` per update carries the working sets, so an update never reads
//!   state left behind by the previous one. The `Frontline` only keeps the
//!   last results for the renderer and for the opposing side's next update.
//! - Territory is the even-odd union of a side's hulls: outer hulls run
//!   counter-clockwise, hole hulls produced by a split run clockwise. Every
//!   rewrite keeps hostile nodes outside that territory.
//!
//! Code cross-refs: `geom2::{collision_buffer, angle_between, segments_cross}`,
//! `graph::{NodeGraph, Node::is_hostile_to, Side::is_enemy_of}`.

mod builder;
mod cfg;
mod hull;
mod lines;
mod refine;
mod run;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::geom2::{point_in_polygon, Pt};
use crate::graph::{NodeGraph, NodeId, Side};

pub use cfg::FrontlineCfg;
pub use hull::{wrap, Hull};
pub use lines::{bridge_flags, walk, Polyline};

use run::Run;

/// Counters from one `Frontline::update`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStats {
    pub hulls: usize,
    pub lines: usize,
    /// Friendly nodes (dummies included) left outside every hull.
    pub unenclosed: usize,
    pub rewrites: usize,
}

/// Per-side engine; persists across updates, each update starts from scratch.
#[derive(Clone, Debug)]
pub struct Frontline {
    side: Side,
    cfg: FrontlineCfg,
    hulls: Vec<Hull>,
    lines: Vec<Polyline>,
    unenclosed: Vec<NodeId>,
}

impl Frontline {
    pub fn new(side: Side, cfg: FrontlineCfg) -> Self {
        Self {
            side,
            cfg,
            hulls: Vec::new(),
            lines: Vec::new(),
            unenclosed: Vec::new(),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn cfg(&self) -> &FrontlineCfg {
        &self.cfg
    }

    /// Hulls from the last update; feed them to the opposing side's update.
    #[inline]
    pub fn hulls(&self) -> &[Hull] {
        &self.hulls
    }

    /// Polylines from the last update, meter coordinates.
    #[inline]
    pub fn lines(&self) -> &[Polyline] {
        &self.lines
    }

    /// Friendly nodes no hull could reach in the last update.
    #[inline]
    pub fn unenclosed(&self) -> &[NodeId] {
        &self.unenclosed
    }

    /// Rebuild hulls and lines from `graph`, treating `enemy_hulls` as
    /// obstacles.
    pub fn update(&mut self, graph: &NodeGraph, enemy_hulls: &[Hull]) -> UpdateStats {
        let _span = debug_span!("update", side = self.side.0).entered();
        let mut run = Run::new(graph, self.side, self.cfg, enemy_hulls);
        while let Some(h) = run.start_hull() {
            run.refine(h);
        }
        run.hulls.retain(|h| h.len() >= 3);
        let lines = run.emit_lines();

        let stats = UpdateStats {
            hulls: run.hulls.len(),
            lines: lines.len(),
            unenclosed: run.todo.len(),
            rewrites: run.rewrites,
        };
        debug!(
            hulls = stats.hulls,
            lines = stats.lines,
            unenclosed = stats.unenclosed,
            rewrites = stats.rewrites,
            invalid_starts = run.invalid_start.len(),
            "frontline updated"
        );
        self.unenclosed = run.todo.into_iter().collect();
        self.hulls = run.hulls;
        self.lines = lines;
        stats
    }

    /// Even-odd containment of an octet point in this side's territory.
    pub fn territory_contains(&self, graph: &NodeGraph, p: Pt) -> bool {
        self.hulls
            .iter()
            .filter(|h| point_in_polygon(p, &h.octets(graph)))
            .count()
            % 2
            == 1
    }
}
