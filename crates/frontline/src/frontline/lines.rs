//! Line emission: which parts of a finished hull are drawn as frontline.
//!
//! A vertex is lit when it faces the enemy; a vertex is kept when it or one
//! of its hull neighbors is lit. Kept runs become polylines (meters).
//!
//! Walk rules
//! - Start right after the first vertex that is not kept, so no line wraps
//!   past the start. Without such a vertex, start after a dummy run (or at 0).
//! - A dummy between two lit non-dummy neighbors (hulls above four vertices)
//!   is skipped when the bridge mask allows it; the line runs straight over
//!   it. The mask only allows a skip whose two new corners stay inside the
//!   angle window.
//! - Any other dummy may extend or end a line but never opens one.
//! - Buffers shorter than the minimum are discarded.
//! - A hull consumed end to end whose buffer neither starts nor ends on a dummy
//!   is a closed loop: it is emitted as `[last, p0, .., p(m-1), p0, p1]` so
//!   the renderer gets overlapping tails.

use tracing::trace;

use crate::geom2::{angle_between, Pt};

use super::cfg::FrontlineCfg;
use super::hull::{wrap, Hull};
use super::run::Run;

/// One drawable frontline segment, meter coordinates.
pub type Polyline = Vec<Pt>;

/// Hull positions forming each emitted line.
///
/// `lit`, `dummy` and `bridge` are parallel to the hull's vertex list;
/// `bridge[k]` permits running straight over dummy `k` (see `bridge_flags`).
/// Closed loops repeat positions as described in the module docs.
pub fn walk(lit: &[bool], dummy: &[bool], bridge: &[bool], min_points: usize) -> Vec<Vec<usize>> {
    let n = lit.len();
    debug_assert_eq!(n, dummy.len());
    debug_assert_eq!(n, bridge.len());
    if n == 0 {
        return Vec::new();
    }
    let prev = |k: usize| wrap(k, -1, n);
    let next = |k: usize| wrap(k, 1, n);
    let keep = |k: usize| lit[prev(k)] || lit[k] || lit[next(k)];
    let skip = |k: usize| {
        n > 4
            && bridge[k]
            && dummy[k]
            && lit[prev(k)]
            && lit[next(k)]
            && !dummy[prev(k)]
            && !dummy[next(k)]
    };

    let start = (0..n)
        .find(|&k| !keep(prev(k)))
        .or_else(|| (0..n).find(|&k| dummy[prev(k)] && !dummy[k]))
        .unwrap_or(0);

    let mut lines = Vec::new();
    let mut buf: Vec<usize> = Vec::new();
    let mut gap = false;
    for step in 0..n {
        let k = (start + step) % n;
        if skip(k) {
            continue;
        }
        if !keep(k) {
            gap = true;
            flush(&mut buf, &mut lines, min_points);
            continue;
        }
        if dummy[k] && buf.is_empty() {
            gap = true;
            continue;
        }
        buf.push(k);
    }

    let closed = !gap
        && buf.first().is_some_and(|&k| !dummy[k])
        && buf.last().is_some_and(|&k| !dummy[k]);
    if closed {
        let mut ring = Vec::with_capacity(buf.len() + 3);
        ring.push(buf[buf.len() - 1]);
        ring.extend_from_slice(&buf);
        ring.push(buf[0]);
        if buf.len() > 1 {
            ring.push(buf[1]);
        }
        buf = ring;
    }
    flush(&mut buf, &mut lines, min_points);
    lines
}

/// Dummies the line may skip: the corners `k-2, k-1, k+1` and
/// `k-1, k+1, k+2` both pass `cfg.angle_ok`, and neither `k-2` nor `k+2` is a
/// dummy (so two skips never share a corner).
pub fn bridge_flags(pts: &[Pt], dummy: &[bool], cfg: &FrontlineCfg) -> Vec<bool> {
    let n = pts.len();
    debug_assert_eq!(n, dummy.len());
    (0..n)
        .map(|k| {
            if n <= 4 || !dummy[k] {
                return false;
            }
            let [a, b, c, d] = [-2, -1, 1, 2].map(|o| wrap(k, o, n));
            !dummy[a]
                && !dummy[d]
                && cfg.angle_ok(angle_between(pts[a], pts[b], pts[c]))
                && cfg.angle_ok(angle_between(pts[b], pts[c], pts[d]))
        })
        .collect()
}

fn flush(buf: &mut Vec<usize>, lines: &mut Vec<Vec<usize>>, min_points: usize) {
    if buf.len() >= min_points {
        lines.push(std::mem::take(buf));
    } else {
        buf.clear();
    }
}

impl Run<'_> {
    /// Lit flag per vertex of `hull`.
    ///
    /// A non-dummy vertex is lit by a nearby non-dummy enemy (display relation)
    /// or by a nearby friendly frontline town that is on no hull. Neighbors
    /// whose connecting segment crosses one of our hull edges do not count.
    pub(crate) fn lit_flags(&self, hull: &Hull) -> Vec<bool> {
        hull.nodes()
            .iter()
            .map(|&id| {
                let v = self.g.node(id);
                if v.dummy {
                    return false;
                }
                v.nearby.iter().any(|&u| {
                    let other = self.g.node(u);
                    let lights = !other.dummy
                        && (self.side.is_enemy_of(other.side)
                            || (other.side == self.side
                                && self.is_town(u)
                                && !self.on_hull.contains(&u)));
                    lights && !self.crosses_own_hull(v.octet, other.octet)
                })
            })
            .collect()
    }

    /// Polylines for every finished hull, in hull order.
    pub(crate) fn emit_lines(&self) -> Vec<Polyline> {
        let mut out: Vec<Polyline> = Vec::new();
        for (h, hull) in self.hulls.iter().enumerate() {
            let lit = self.lit_flags(hull);
            let dummy: Vec<bool> = hull.nodes().iter().map(|&id| self.g.node(id).dummy).collect();
            let pts = hull.meters(self.g);
            let bridge = bridge_flags(&pts, &dummy, &self.cfg);
            let runs = walk(&lit, &dummy, &bridge, self.cfg.min_line_points);
            trace!(
                hull = h,
                lit = lit.iter().filter(|&&l| l).count(),
                lines = runs.len(),
                "walked hull"
            );
            out.extend(
                runs.into_iter()
                    .map(|seq| seq.into_iter().map(|k| pts[k]).collect()),
            );
        }
        out
    }
}
