//! Per-update working state and the predicates every operator shares.
//!
//! A `Run` borrows the graph for one `Frontline::update` call and owns the
//! mutable bookkeeping: the hulls under construction, the todo set, the
//! invalid-start set and the set of nodes currently on some hull.
//!
//! Units: crossings, angles and containment use octets; clearance buffers use
//! meters.

use std::collections::BTreeSet;

use crate::geom2::{
    angle_between, collision_buffer, point_in_polygon, polygon_crosses_segment, segments_cross,
    Pt,
};
use crate::graph::{NodeGraph, NodeId, Side};

use super::cfg::FrontlineCfg;
use super::hull::Hull;

/// Structural change proposed by an operator, applied by `Run::apply`.
#[derive(Clone, Debug)]
pub(crate) struct Edit {
    /// Vertex sequence replacing the edited hull.
    pub hull: Vec<NodeId>,
    /// Vertices leaving the boundary (they end up inside territory).
    pub dropped: Vec<NodeId>,
    /// Vertices joining the boundary (taken from todo).
    pub added: Vec<NodeId>,
    /// Polygon whose strictly-enclosed todo nodes are absorbed.
    pub region: Vec<NodeId>,
    /// Second hull produced by a split.
    pub spawned: Option<Vec<NodeId>>,
}

pub(crate) struct Run<'a> {
    pub g: &'a NodeGraph,
    pub side: Side,
    pub cfg: FrontlineCfg,
    pub hulls: Vec<Hull>,
    pub todo: BTreeSet<NodeId>,
    pub invalid_start: BTreeSet<NodeId>,
    pub on_hull: BTreeSet<NodeId>,
    pub rewrites: usize,
    /// Non-dummy nodes of our side.
    friendly: Vec<NodeId>,
    /// Strictly hostile nodes (neutral included, dummies excluded).
    hostile: Vec<NodeId>,
    /// Our frontline towns; never swallowed by a rewrite.
    towns: BTreeSet<NodeId>,
    /// Enemy links and enemy hull edges, octets.
    obstacles: Vec<(Pt, Pt)>,
    /// Enemy hull edges, meters.
    enemy_edges: Vec<(Pt, Pt)>,
    /// Enemy hull vertices, meters.
    enemy_verts: Vec<Pt>,
}

impl<'a> Run<'a> {
    pub fn new(g: &'a NodeGraph, side: Side, cfg: FrontlineCfg, enemy_hulls: &[Hull]) -> Self {
        let mut todo = BTreeSet::new();
        let mut friendly = Vec::new();
        let mut hostile = Vec::new();
        let mut towns = BTreeSet::new();
        for n in g.nodes() {
            if n.side == side {
                todo.insert(n.id);
            }
            if n.is_friendly_to(side) {
                friendly.push(n.id);
                if g.is_frontline_town(n.id) {
                    towns.insert(n.id);
                }
            }
            if n.is_hostile_to(side) {
                hostile.push(n.id);
            }
        }

        let mut obstacles: Vec<(Pt, Pt)> = g
            .enemy_links(side, cfg.max_link_distance)
            .into_iter()
            .map(|(a, b)| (g.node(a).octet, g.node(b).octet))
            .collect();
        let mut enemy_edges = Vec::new();
        let mut enemy_verts = Vec::new();
        for hull in enemy_hulls {
            // Malformed or absent nodes are skipped.
            let nodes: Vec<_> = hull.nodes().iter().filter_map(|&id| g.get(id)).collect();
            if nodes.len() < 2 {
                continue;
            }
            for k in 0..nodes.len() {
                let (u, v) = (nodes[k], nodes[(k + 1) % nodes.len()]);
                obstacles.push((u.octet, v.octet));
                enemy_edges.push((u.meter, v.meter));
            }
            enemy_verts.extend(nodes.iter().map(|n| n.meter));
        }

        Self {
            g,
            side,
            cfg,
            hulls: Vec::new(),
            todo,
            invalid_start: BTreeSet::new(),
            on_hull: BTreeSet::new(),
            rewrites: 0,
            friendly,
            hostile,
            towns,
            obstacles,
            enemy_edges,
            enemy_verts,
        }
    }

    #[inline]
    pub fn oct(&self, id: NodeId) -> Pt {
        self.g.node(id).octet
    }

    #[inline]
    pub fn met(&self, id: NodeId) -> Pt {
        self.g.node(id).meter
    }

    pub fn octets(&self, ids: &[NodeId]) -> Vec<Pt> {
        ids.iter().map(|&id| self.oct(id)).collect()
    }

    #[inline]
    pub fn is_town(&self, id: NodeId) -> bool {
        self.towns.contains(&id)
    }

    /// Territory-side angle at `v` lies within the configured range.
    pub fn angle_ok(&self, prev: NodeId, v: NodeId, next: NodeId) -> bool {
        self.cfg
            .angle_ok(angle_between(self.oct(prev), self.oct(v), self.oct(next)))
    }

    /// Segment `a–b` properly crosses one of our hull edges, an enemy hull
    /// edge or an enemy link.
    pub fn blocked(&self, a: NodeId, b: NodeId) -> bool {
        let (pa, pb) = (self.oct(a), self.oct(b));
        self.crosses_own_hull(pa, pb)
            || self
                .obstacles
                .iter()
                .any(|&(u, v)| segments_cross(pa, pb, u, v))
    }

    pub fn crosses_own_hull(&self, pa: Pt, pb: Pt) -> bool {
        self.hulls
            .iter()
            .flat_map(|h| h.edges())
            .any(|(u, v)| segments_cross(pa, pb, self.oct(u), self.oct(v)))
    }

    /// Clearance test for the candidate edge `cp[1]→cp[2]` with context
    /// vertices `cp[0]` and `cp[3]`.
    ///
    /// Fails if a friendly node (other than the four context vertices) sits in
    /// the friendly buffer, or a hostile node, an enemy hull vertex or an enemy
    /// hull edge reaches into the enemy buffer.
    pub fn clear(&self, cp: [NodeId; 4]) -> bool {
        let m = cp.map(|id| self.met(id));
        let fb = collision_buffer(m[0], m[1], m[2], m[3], self.cfg.friendly_clearance);
        if self
            .friendly
            .iter()
            .any(|id| !cp.contains(id) && point_in_polygon(self.met(*id), &fb))
        {
            return false;
        }
        let eb = collision_buffer(m[0], m[1], m[2], m[3], self.cfg.enemy_clearance);
        if self
            .hostile
            .iter()
            .any(|&id| point_in_polygon(self.met(id), &eb))
        {
            return false;
        }
        if self.enemy_verts.iter().any(|&p| point_in_polygon(p, &eb)) {
            return false;
        }
        !self
            .enemy_edges
            .iter()
            .any(|&(u, v)| polygon_crosses_segment(&eb, u, v))
    }

    /// Edge `a→b` is admissible as a new boundary edge: no crossing, and the
    /// clearance test holds with `prev`/`next` as context.
    pub fn edge_ok(&self, prev: NodeId, a: NodeId, b: NodeId, next: NodeId) -> bool {
        !self.blocked(a, b) && self.clear([prev, a, b, next])
    }

    /// The region polygon encloses no hostile node, no node already on a hull
    /// and (when `towns` is set) no frontline town. Region vertices themselves
    /// are exempt.
    pub fn region_ok(&self, region: &[NodeId], towns: bool) -> bool {
        let poly = self.octets(region);
        let outside = |id: &NodeId| region.contains(id) || !point_in_polygon(self.oct(*id), &poly);
        self.hostile.iter().all(&outside)
            && self.on_hull.iter().all(&outside)
            && (!towns || self.towns.iter().all(&outside))
    }

    /// Some hostile node lies strictly inside `region`.
    pub fn encloses_hostile(&self, region: &[NodeId]) -> bool {
        let poly = self.octets(region);
        self.hostile
            .iter()
            .any(|id| !region.contains(id) && point_in_polygon(self.oct(*id), &poly))
    }

    /// Remove todo nodes strictly inside `region`.
    pub fn absorb(&mut self, region: &[NodeId]) -> usize {
        let poly = self.octets(region);
        let inside: Vec<NodeId> = self
            .todo
            .iter()
            .copied()
            .filter(|id| !region.contains(id) && point_in_polygon(self.oct(*id), &poly))
            .collect();
        for id in &inside {
            self.todo.remove(id);
        }
        inside.len()
    }

    /// Commit a fresh hull built from todo nodes; returns its index.
    pub fn push_hull(&mut self, nodes: Vec<NodeId>) -> usize {
        for id in &nodes {
            self.todo.remove(id);
            self.on_hull.insert(*id);
        }
        self.hulls.push(Hull::new(nodes));
        self.hulls.len() - 1
    }

    /// Apply an operator's edit to hull `h`; returns the index of a spawned
    /// hull, if any.
    pub fn apply(&mut self, h: usize, edit: Edit) -> Option<usize> {
        for id in &edit.dropped {
            self.on_hull.remove(id);
        }
        for id in &edit.added {
            self.todo.remove(id);
            self.on_hull.insert(*id);
        }
        *self.hulls[h].nodes_mut() = edit.hull;
        self.absorb(&edit.region);
        self.rewrites += 1;
        edit.spawned.map(|nodes| {
            self.hulls.push(Hull::new(nodes));
            self.hulls.len() - 1
        })
    }
}
