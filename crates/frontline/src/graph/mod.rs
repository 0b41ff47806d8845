//! Chokepoint graph: the read-only world the frontline engine queries.
//!
//! Purpose
//! - Hold node positions in both unit systems, ownership, the precomputed
//!   nearby-sets and the supply links, behind deterministic (id-ordered)
//!   iteration.
//! - Derive the two per-run facts the engine needs from ownership: the
//!   frontline-town flag and the enemy links used as crossing obstacles.
//!
//! Code cross-refs: `types::{Node, NodeSpec, Side, GraphCfg}`, `build::NodeGraph`.

mod build;
mod error;
mod types;

pub use build::NodeGraph;
pub use error::GraphError;
pub use types::{GraphCfg, Node, NodeId, NodeSpec, Side};
