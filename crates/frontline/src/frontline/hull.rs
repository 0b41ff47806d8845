//! Cyclic vertex sequence of a hull plus the wraparound index helper.

use serde::{Deserialize, Serialize};

use crate::geom2::{signed_area, Pt};
use crate::graph::{NodeGraph, NodeId};

/// Wrap `i + k` into `0..len`.
///
/// All hull index arithmetic goes through here; `len` must be non-zero.
#[inline]
pub fn wrap(i: usize, k: isize, len: usize) -> usize {
    debug_assert!(len > 0, "wrap on empty hull");
    (i as isize + k).rem_euclid(len as isize) as usize
}

/// Closed polygon over node ids; territory lies left of each directed edge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hull {
    nodes: Vec<NodeId>,
}

impl Hull {
    #[inline]
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
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
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Position `i + k`, wrapped.
    #[inline]
    pub fn idx(&self, i: usize, k: isize) -> usize {
        wrap(i, k, self.nodes.len())
    }

    /// Vertex at position `i + k`, wrapped.
    #[inline]
    pub fn at(&self, i: usize, k: isize) -> NodeId {
        self.nodes[self.idx(i, k)]
    }

    #[inline]
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == id)
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Number of forward steps from position `from` to position `to`.
    #[inline]
    pub fn forward(&self, from: usize, to: usize) -> usize {
        let n = self.nodes.len();
        (to + n - from) % n
    }

    /// Vertices from position `from` forward to `to`, both inclusive.
    pub fn arc(&self, from: usize, to: usize) -> Vec<NodeId> {
        let steps = self.forward(from, to);
        (0..=steps).map(|s| self.at(from, s as isize)).collect()
    }

    /// Directed edges `(v[k], v[k+1])`, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let n = self.nodes.len();
        (0..n).map(move |k| (self.nodes[k], self.nodes[(k + 1) % n]))
    }

    /// Octet coordinates; ids missing from `g` are skipped.
    pub fn octets(&self, g: &NodeGraph) -> Vec<Pt> {
        self.nodes
            .iter()
            .filter_map(|&id| g.get(id).map(|n| n.octet))
            .collect()
    }

    /// Meter coordinates; ids missing from `g` are skipped.
    pub fn meters(&self, g: &NodeGraph) -> Vec<Pt> {
        self.nodes
            .iter()
            .filter_map(|&id| g.get(id).map(|n| n.meter))
            .collect()
    }

    /// Signed octet area; positive for outer hulls, negative for pocket holes.
    pub fn signed_area(&self, g: &NodeGraph) -> f64 {
        signed_area(&self.octets(g))
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.nodes
    }
}

impl From<Vec<NodeId>> for Hull {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::new(nodes)
    }
}
