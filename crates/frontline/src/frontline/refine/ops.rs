//! The six rewrite operators.
//!
//! Notation: `h[k]` is the hull vertex at position `i + k` (wrapped). A new
//! edge `u→v` is admissible when it crosses no obstacle and passes the
//! clearance test with its hull neighbors as context (`Run::edge_ok`).
//! Territory lies left of every edge, so "outward" is a negative turn for
//! outer hulls and hole hulls alike.

use crate::geom2::{angle_between, segments_cross, signed_area, turn};
use crate::graph::NodeId;

use super::super::cfg::FrontlineCfg;
use super::super::hull::Hull;
use super::super::run::{Edit, Run};
use super::Rewrite;

fn without(hull: &Hull, dropped: &[NodeId]) -> Vec<NodeId> {
    hull.nodes()
        .iter()
        .copied()
        .filter(|id| !dropped.contains(id))
        .collect()
}

/// Swap `h[1]` for an outward todo node adjacent to `h[0]`, `h[1]` and `h[2]`.
pub(crate) struct MergeExpand;

impl Rewrite for MergeExpand {
    fn name(&self) -> &'static str {
        "merge-expand"
    }

    fn plan(&self, run: &Run<'_>, hull: &Hull, i: usize) -> Option<Edit> {
        if hull.len() <= 4 {
            return None;
        }
        let (prev, a, old, b, next) = (
            hull.at(i, -1),
            hull.at(i, 0),
            hull.at(i, 1),
            hull.at(i, 2),
            hull.at(i, 3),
        );
        if run.is_town(old) {
            return None;
        }
        let (pa, po, pb) = (run.oct(a), run.oct(old), run.oct(b));
        for &x in &run.g.node(old).nearby {
            if !run.todo.contains(&x) || !run.g.are_near(a, x) || !run.g.are_near(b, x) {
                continue;
            }
            let px = run.oct(x);
            if turn(pa, po, px) >= 0.0 || turn(po, pb, px) >= 0.0 {
                continue;
            }
            if !(run.angle_ok(prev, a, x) && run.angle_ok(a, x, b) && run.angle_ok(x, b, next)) {
                continue;
            }
            let region = vec![a, old, b, x];
            if !run.region_ok(&region, true) {
                continue;
            }
            if !(run.edge_ok(prev, a, x, b) && run.edge_ok(a, x, b, next)) {
                continue;
            }
            let mut nodes = hull.nodes().to_vec();
            nodes[hull.idx(i, 1)] = x;
            return Some(Edit {
                hull: nodes,
                dropped: vec![old],
                added: vec![x],
                region,
                spawned: None,
            });
        }
        None
    }
}

/// Drop a reflex `h[1]` by the chord `h[0]→h[2]`.
pub(crate) struct MergeTri;

impl Rewrite for MergeTri {
    fn name(&self) -> &'static str {
        "merge-tri"
    }

    fn plan(&self, run: &Run<'_>, hull: &Hull, i: usize) -> Option<Edit> {
        if hull.len() < 4 {
            return None;
        }
        let (prev, a, b, c, next) = (
            hull.at(i, -1),
            hull.at(i, 0),
            hull.at(i, 1),
            hull.at(i, 2),
            hull.at(i, 3),
        );
        if run.is_town(b) || !run.g.are_near(a, c) {
            return None;
        }
        if angle_between(run.oct(a), run.oct(b), run.oct(c)) <= 180.0 {
            return None;
        }
        if !(run.angle_ok(prev, a, c) && run.angle_ok(a, c, next)) {
            return None;
        }
        let region = vec![a, b, c];
        if !run.region_ok(&region, true) || !run.edge_ok(prev, a, c, next) {
            return None;
        }
        Some(Edit {
            hull: without(hull, &[b]),
            dropped: vec![b],
            added: Vec::new(),
            region,
            spawned: None,
        })
    }
}

/// Drop `h[1]` and `h[2]` when they dent inwards, by the chord `h[0]→h[3]`.
pub(crate) struct MergeQuad;

impl Rewrite for MergeQuad {
    fn name(&self) -> &'static str {
        "merge-quad"
    }

    fn enabled(&self, cfg: &FrontlineCfg) -> bool {
        cfg.merge_quad
    }

    fn plan(&self, run: &Run<'_>, hull: &Hull, i: usize) -> Option<Edit> {
        if hull.len() < 5 {
            return None;
        }
        let (prev, a, b, c, d, next) = (
            hull.at(i, -1),
            hull.at(i, 0),
            hull.at(i, 1),
            hull.at(i, 2),
            hull.at(i, 3),
            hull.at(i, 4),
        );
        if run.is_town(b) || run.is_town(c) || !run.g.are_near(a, d) {
            return None;
        }
        let region = vec![a, b, c, d];
        if signed_area(&run.octets(&region)) >= 0.0 {
            return None;
        }
        if !(run.angle_ok(prev, a, d) && run.angle_ok(a, d, next)) {
            return None;
        }
        if !run.region_ok(&region, true) || !run.edge_ok(prev, a, d, next) {
            return None;
        }
        Some(Edit {
            hull: without(hull, &[b, c]),
            dropped: vec![b, c],
            added: Vec::new(),
            region,
            spawned: None,
        })
    }
}

/// Fold a concave sub-arc `h[0]..h[k]` into one chord.
///
/// The far end is a hull vertex in `h[0]`'s nearby-set, at least three steps
/// away and on the shorter side of the hull.
pub(crate) struct Merge;

impl Rewrite for Merge {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn plan(&self, run: &Run<'_>, hull: &Hull, i: usize) -> Option<Edit> {
        let n = hull.len();
        if n < 4 {
            return None;
        }
        let a = hull.at(i, 0);
        let prev = hull.at(i, -1);
        for &c in &run.g.node(a).nearby {
            let Some(j) = hull.position(c) else {
                continue;
            };
            let k = hull.forward(i, j);
            if k < 3 || k >= n - k {
                continue;
            }
            let arc = hull.arc(i, j);
            let swallowed = &arc[1..k];
            if swallowed.iter().any(|&id| run.is_town(id)) {
                continue;
            }
            if signed_area(&run.octets(&arc)) >= 0.0 {
                continue;
            }
            let next = hull.at(j, 1);
            if !(run.angle_ok(prev, a, c) && run.angle_ok(a, c, next)) {
                continue;
            }
            if !run.region_ok(&arc, true) || !run.edge_ok(prev, a, c, next) {
                continue;
            }
            let dropped = swallowed.to_vec();
            return Some(Edit {
                hull: without(hull, &dropped),
                dropped,
                added: Vec::new(),
                region: arc,
                spawned: None,
            });
        }
        None
    }
}

/// Insert an outward todo node between `h[1]` and `h[2]`.
pub(crate) struct Expand;

impl Rewrite for Expand {
    fn name(&self) -> &'static str {
        "expand"
    }

    fn plan(&self, run: &Run<'_>, hull: &Hull, i: usize) -> Option<Edit> {
        let (prev, a, b, next) = (hull.at(i, 0), hull.at(i, 1), hull.at(i, 2), hull.at(i, 3));
        let (pa, pb) = (run.oct(a), run.oct(b));
        for &x in &run.g.node(a).nearby {
            if !run.todo.contains(&x) || !run.g.are_near(b, x) {
                continue;
            }
            if turn(pa, pb, run.oct(x)) >= 0.0 {
                continue;
            }
            if !(run.angle_ok(prev, a, x) && run.angle_ok(a, x, b) && run.angle_ok(x, b, next)) {
                continue;
            }
            let region = vec![a, x, b];
            if !run.region_ok(&region, true) {
                continue;
            }
            if !(run.edge_ok(prev, a, x, b) && run.edge_ok(a, x, b, next)) {
                continue;
            }
            let mut nodes = hull.nodes().to_vec();
            nodes.insert(hull.idx(i, 1) + 1, x);
            return Some(Edit {
                hull: nodes,
                dropped: Vec::new(),
                added: vec![x],
                region,
                spawned: None,
            });
        }
        None
    }
}

/// Cut a hull that wraps around an enemy pocket.
///
/// The edge `i1→i2` (`i2 = i1 + 1`) and the edge `j2→j1` (`j1 = j2 + 1`) face
/// each other across a narrow mouth: `i1` is near `j1` and `i2` is near `j2`.
/// The arc `j1..i1` closed by the chord `i1→j1` keeps the hull's orientation
/// and becomes the outer hull; the arc `i2..j2` closed by `j2→i2` has the
/// opposite orientation, encloses at least one hostile node, and becomes a
/// hole hull. The mouth quad `i1, i2, j2, j1` joins the territory.
pub(crate) struct Split;

impl Rewrite for Split {
    fn name(&self) -> &'static str {
        "split"
    }

    fn plan(&self, run: &Run<'_>, hull: &Hull, i: usize) -> Option<Edit> {
        if hull.len() < 6 {
            return None;
        }
        let sign = signed_area(&run.octets(hull.nodes()));
        if sign == 0.0 {
            return None;
        }
        let i1 = i;
        let i2 = hull.idx(i, 1);
        let (n_i1, n_i2) = (hull.at(i1, 0), hull.at(i2, 0));
        for &n_j2 in &run.g.node(n_i2).nearby {
            let Some(j2) = hull.position(n_j2) else {
                continue;
            };
            let j1 = hull.idx(j2, 1);
            if hull.forward(i2, j2) < 2 || hull.forward(j1, i1) < 2 {
                continue;
            }
            let n_j1 = hull.at(j1, 0);
            if !run.g.are_near(n_i1, n_j1) {
                continue;
            }
            let outer = hull.arc(j1, i1);
            let hole = hull.arc(i2, j2);
            if signed_area(&run.octets(&outer)) * sign <= 0.0
                || signed_area(&run.octets(&hole)) * sign >= 0.0
            {
                continue;
            }
            let (before_i1, after_j1) = (hull.at(i1, -1), hull.at(j1, 1));
            let (before_j2, after_i2) = (hull.at(j2, -1), hull.at(i2, 1));
            if !(run.angle_ok(before_i1, n_i1, n_j1)
                && run.angle_ok(n_i1, n_j1, after_j1)
                && run.angle_ok(before_j2, n_j2, n_i2)
                && run.angle_ok(n_j2, n_i2, after_i2))
            {
                continue;
            }
            if segments_cross(run.oct(n_i1), run.oct(n_j1), run.oct(n_j2), run.oct(n_i2)) {
                continue;
            }
            if !run.encloses_hostile(&hole) {
                continue;
            }
            let mouth = vec![n_i1, n_i2, n_j2, n_j1];
            if !run.region_ok(&mouth, true) {
                continue;
            }
            if !(run.edge_ok(before_i1, n_i1, n_j1, after_j1)
                && run.edge_ok(before_j2, n_j2, n_i2, after_i2))
            {
                continue;
            }
            return Some(Edit {
                hull: outer,
                dropped: Vec::new(),
                added: Vec::new(),
                region: mouth,
                spawned: Some(hole),
            });
        }
        None
    }
}
