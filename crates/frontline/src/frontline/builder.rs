//! Seed triangles: `StartHull` and `GetInitialTriangle`.
//!
//! A start node that cannot seed a triangle goes into the invalid-start set
//! and stays in todo; later refinement may still pick it up. Ownership and
//! obstacles only grow during a run, so a failed start never becomes valid
//! again and the search terminates.

use tracing::trace;

use crate::geom2::turn;
use crate::graph::NodeId;

use super::run::Run;

impl Run<'_> {
    /// Seed the next hull. Returns its index, or `None` when no remaining todo
    /// node can start a triangle.
    pub(crate) fn start_hull(&mut self) -> Option<usize> {
        loop {
            let a = self
                .todo
                .iter()
                .copied()
                .find(|id| !self.invalid_start.contains(id))?;
            match self.initial_triangle(a) {
                Some(tri) => {
                    let h = self.push_hull(tri.to_vec());
                    let absorbed = self.absorb(&tri);
                    trace!(hull = h, ?tri, absorbed, "seeded hull");
                    return Some(h);
                }
                None => {
                    trace!(start = %a, "no triangle from start");
                    self.invalid_start.insert(a);
                }
            }
        }
    }

    /// First admissible counter-clockwise triangle `a→b→c` over todo nodes.
    pub(crate) fn initial_triangle(&self, a: NodeId) -> Option<[NodeId; 3]> {
        for &b in &self.g.node(a).nearby {
            if !self.todo.contains(&b) || self.blocked(a, b) {
                continue;
            }
            for &c in &self.g.node(b).nearby {
                if c == a || !self.todo.contains(&c) || !self.g.are_near(a, c) {
                    continue;
                }
                if self.triangle_ok(a, b, c) {
                    return Some([a, b, c]);
                }
            }
        }
        None
    }

    fn triangle_ok(&self, a: NodeId, b: NodeId, c: NodeId) -> bool {
        if turn(self.oct(a), self.oct(b), self.oct(c)) <= 0.0 {
            return false;
        }
        if !(self.angle_ok(c, a, b) && self.angle_ok(a, b, c) && self.angle_ok(b, c, a)) {
            return false;
        }
        if self.blocked(b, c) || self.blocked(c, a) {
            return false;
        }
        if !(self.clear([c, a, b, c]) && self.clear([a, b, c, a]) && self.clear([b, c, a, b])) {
            return false;
        }
        self.region_ok(&[a, b, c], false)
    }
}
