//! Random two-sided maps (jittered grid + noisy front + replay tokens).
//!
//! Model
//! - Nodes sit on a `cols × rows` grid with spacing `spacing` octets, each
//!   displaced by up to `jitter · spacing` per axis.
//! - Side 1 holds everything left of a sinusoidal front through the middle of
//!   the map, side 2 the rest; the front's amplitude is `front_noise` times
//!   the map width and its phase is random.
//! - A node turns neutral with probability `neutral_ratio`, and becomes a
//!   dummy (keeping its side) with probability `dummy_ratio`.
//! - Every node links to its `links` nearest neighbors (links are symmetrized
//!   by the graph).
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::geom2::Pt;
use crate::graph::{NodeId, NodeSpec, Side};

use super::Scenario;

/// Generator configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapCfg {
    pub cols: usize,
    pub rows: usize,
    /// Grid spacing, octets.
    pub spacing: f64,
    /// Per-axis displacement as a fraction of `spacing`. Clamped to [0, 0.45].
    pub jitter: f64,
    /// Front amplitude as a fraction of the map width.
    pub front_noise: f64,
    pub neutral_ratio: f64,
    pub dummy_ratio: f64,
    /// Nearest neighbors each node links to.
    pub links: usize,
}

impl Default for MapCfg {
    fn default() -> Self {
        Self {
            cols: 10,
            rows: 8,
            spacing: 10.0,
            jitter: 0.3,
            front_noise: 0.2,
            neutral_ratio: 0.05,
            dummy_ratio: 0.1,
            links: 3,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a map with default graph and engine configuration.
pub fn draw_map(cfg: MapCfg, tok: ReplayToken) -> Scenario {
    let mut rng = tok.to_std_rng();
    let jitter = cfg.jitter.clamp(0.0, 0.45) * cfg.spacing;
    let width = cfg.cols.saturating_sub(1) as f64 * cfg.spacing;
    let height = (cfg.rows.saturating_sub(1) as f64 * cfg.spacing).max(1e-9);
    let phase = rng.gen::<f64>() * TAU;

    let mut pts: Vec<Pt> = Vec::with_capacity(cfg.cols * cfg.rows);
    let mut nodes: Vec<NodeSpec> = Vec::with_capacity(cfg.cols * cfg.rows);
    for r in 0..cfg.rows {
        for c in 0..cfg.cols {
            let p = Pt::new(
                c as f64 * cfg.spacing + rng.gen_range(-1.0..=1.0) * jitter,
                r as f64 * cfg.spacing + rng.gen_range(-1.0..=1.0) * jitter,
            );
            let front = 0.5 * width + cfg.front_noise * width * (phase + TAU * p.y / height).sin();
            let mut side = if p.x < front { Side(1) } else { Side(2) };
            if rng.gen_bool(cfg.neutral_ratio.clamp(0.0, 1.0)) {
                side = Side::NEUTRAL;
            }
            let mut spec = NodeSpec::new(nodes.len() as u32 + 1, [p.x, p.y], side.0);
            spec.name = format!("r{r}c{c}");
            spec.dummy = rng.gen_bool(cfg.dummy_ratio.clamp(0.0, 1.0));
            pts.push(p);
            nodes.push(spec);
        }
    }

    for (i, p) in pts.iter().enumerate() {
        let mut order: Vec<usize> = (0..pts.len()).filter(|&j| j != i).collect();
        order.sort_by(|&a, &b| {
            let (da, db) = ((pts[a] - p).norm(), (pts[b] - p).norm());
            da.partial_cmp(&db)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        nodes[i].links = order
            .into_iter()
            .take(cfg.links)
            .map(|j| NodeId(j as u32 + 1))
            .collect();
    }

    Scenario {
        nodes,
        ..Scenario::default()
    }
}
