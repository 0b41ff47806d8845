//! Graph assembly (validation, link symmetrization, nearby-sets) and queries.

use std::collections::{BTreeMap, BTreeSet};

use crate::geom2::Pt;

use super::error::GraphError;
use super::types::{GraphCfg, Node, NodeId, NodeSpec, Side};

/// Read-only snapshot of every node the engine may query during a run.
///
/// Nodes are kept in id order so that all derived iteration is reproducible.
#[derive(Clone, Debug, Default)]
pub struct NodeGraph {
    nodes: BTreeMap<NodeId, Node>,
    cfg: GraphCfg,
}

impl NodeGraph {
    /// Build a graph from raw records.
    ///
    /// Links are symmetrized; meter coordinates default to the scaled octet
    /// coordinates; nearby-sets hold every other node within
    /// `cfg.nearby_radius` octets.
    pub fn from_specs(specs: &[NodeSpec], cfg: GraphCfg) -> Result<Self, GraphError> {
        let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
        for s in specs {
            let octet = Pt::new(s.octet[0], s.octet[1]);
            let meter = match s.meter {
                Some([x, y]) => Pt::new(x, y),
                None => octet * cfg.meters_per_octet,
            };
            if !(octet.iter().all(|v| v.is_finite()) && meter.iter().all(|v| v.is_finite())) {
                return Err(GraphError::NonFiniteCoordinate(s.id));
            }
            let node = Node {
                id: s.id,
                name: s.name.clone(),
                octet,
                meter,
                side: s.side,
                dummy: s.dummy,
                nearby: BTreeSet::new(),
                linked: BTreeSet::new(),
            };
            if nodes.insert(s.id, node).is_some() {
                return Err(GraphError::DuplicateNode(s.id));
            }
        }
        for s in specs {
            for &to in &s.links {
                if to == s.id {
                    continue;
                }
                if !nodes.contains_key(&to) {
                    return Err(GraphError::UnknownLink { from: s.id, to });
                }
                if let Some(n) = nodes.get_mut(&s.id) {
                    n.linked.insert(to);
                }
                if let Some(n) = nodes.get_mut(&to) {
                    n.linked.insert(s.id);
                }
            }
        }
        let mut graph = Self { nodes, cfg };
        graph.rebuild_nearby();
        Ok(graph)
    }

    fn rebuild_nearby(&mut self) {
        let pos: Vec<(NodeId, Pt)> = self.nodes.values().map(|n| (n.id, n.octet)).collect();
        let r2 = self.cfg.nearby_radius * self.cfg.nearby_radius;
        let mut near: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        for (k, &(a, pa)) in pos.iter().enumerate() {
            for &(b, pb) in &pos[k + 1..] {
                if (pb - pa).norm_squared() <= r2 {
                    near.entry(a).or_default().insert(b);
                    near.entry(b).or_default().insert(a);
                }
            }
        }
        for (id, node) in self.nodes.iter_mut() {
            node.nearby = near.remove(id).unwrap_or_default();
        }
    }

    #[inline]
    pub fn cfg(&self) -> GraphCfg {
        self.cfg
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Node by id.
    ///
    /// Panics if `id` is not part of the graph; ids handed out by the graph
    /// itself are always valid.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[&id]
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Distinct sides present, ascending.
    pub fn sides(&self) -> Vec<Side> {
        let set: BTreeSet<Side> = self.nodes.values().map(|n| n.side).collect();
        set.into_iter().collect()
    }

    #[inline]
    pub fn are_near(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes.get(&a).is_some_and(|n| n.nearby.contains(&b))
    }

    /// Apply an ownership change between runs.
    pub fn set_side(&mut self, id: NodeId, side: Side) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode(id))?;
        node.side = side;
        Ok(())
    }

    /// A non-dummy node with a linked, non-dummy enemy neighbor (display relation).
    pub fn is_frontline_town(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if node.dummy {
            return false;
        }
        node.linked.iter().any(|l| {
            self.nodes
                .get(l)
                .is_some_and(|o| !o.dummy && node.side.is_enemy_of(o.side))
        })
    }

    /// Supply links from a `side` node to a strictly hostile node, no longer
    /// than `max_len` octets. Pairs are `(friendly, hostile)` in id order.
    pub fn enemy_links(&self, side: Side, max_len: f64) -> Vec<(NodeId, NodeId)> {
        let mut out = Vec::new();
        for node in self.nodes.values() {
            if !node.is_friendly_to(side) {
                continue;
            }
            for l in &node.linked {
                let Some(other) = self.nodes.get(l) else {
                    continue;
                };
                if !other.is_hostile_to(side) {
                    continue;
                }
                if (other.octet - node.octet).norm() <= max_len {
                    out.push((node.id, other.id));
                }
            }
        }
        out
    }
}
