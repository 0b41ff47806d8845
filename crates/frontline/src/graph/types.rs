//! Node, side and configuration types for the chokepoint graph.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::geom2::Pt;

/// Stable node identifier; ordering drives every iteration in the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owning faction. `Side::NEUTRAL` owns nothing worth fighting over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Side(pub u8);

impl Side {
    pub const NEUTRAL: Side = Side(0);

    #[inline]
    pub fn is_neutral(self) -> bool {
        self == Side::NEUTRAL
    }

    /// Display relation: two distinct, non-neutral sides.
    ///
    /// Used for lighting and the frontline-town flag. Hull construction uses the
    /// stricter `Node::is_hostile_to`, under which neutral ground also blocks.
    #[inline]
    pub fn is_enemy_of(self, other: Side) -> bool {
        self != other && !self.is_neutral() && !other.is_neutral()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "side {}", self.0)
    }
}

/// A capturable map location (or a dummy padding point).
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Coarse coordinates: adjacency, angles and crossing tests.
    pub octet: Pt,
    /// Fine coordinates: clearance buffers and emitted lines.
    pub meter: Pt,
    pub side: Side,
    /// Padding point for line smoothing; never lit, never hostile.
    pub dummy: bool,
    /// Symmetric spatial proximity set (self excluded).
    pub nearby: BTreeSet<NodeId>,
    /// Symmetric supply-route adjacency.
    pub linked: BTreeSet<NodeId>,
}

impl Node {
    /// Strict build-time relation: any other side, neutral included; dummies never count.
    #[inline]
    pub fn is_hostile_to(&self, side: Side) -> bool {
        !self.dummy && self.side != side
    }

    /// Non-dummy node owned by `side`.
    #[inline]
    pub fn is_friendly_to(&self, side: Side) -> bool {
        !self.dummy && self.side == side
    }
}

/// Input record for one node, as read from a scenario file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    pub octet: [f64; 2],
    /// Defaults to `octet * GraphCfg::meters_per_octet`.
    #[serde(default)]
    pub meter: Option<[f64; 2]>,
    pub side: Side,
    #[serde(default)]
    pub dummy: bool,
    /// Supply links; symmetrized on load.
    #[serde(default)]
    pub links: Vec<NodeId>,
}

impl NodeSpec {
    pub fn new(id: u32, octet: [f64; 2], side: u8) -> Self {
        Self {
            id: NodeId(id),
            name: String::new(),
            octet,
            meter: None,
            side: Side(side),
            dummy: false,
            links: Vec::new(),
        }
    }

    pub fn linked_to(mut self, ids: &[u32]) -> Self {
        self.links.extend(ids.iter().map(|&i| NodeId(i)));
        self
    }

    pub fn as_dummy(mut self) -> Self {
        self.dummy = true;
        self
    }
}

/// Graph construction parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphCfg {
    /// Radius of the nearby-set, in octets.
    pub nearby_radius: f64,
    /// Scale used when a node carries no explicit meter coordinates.
    pub meters_per_octet: f64,
}

impl Default for GraphCfg {
    fn default() -> Self {
        Self {
            nearby_radius: 25.0,
            meters_per_octet: 800.0,
        }
    }
}
