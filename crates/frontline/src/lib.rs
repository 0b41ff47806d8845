//! Frontline generation for a contested node map.
//!
//! Given a snapshot of capturable nodes (positions, ownership, proximity and
//! supply links), each side gets a set of hulls around its territory and the
//! polylines along their enemy-facing stretches.
//!
//! Layout
//! - `geom2`: planar predicates (bearings, crossings, containment, clearance
//!   buffers).
//! - `graph`: the read-only node graph the engine queries.
//! - `frontline`: per-side engine (seed triangles, rewrite operators, line walk).
//! - `scenario`: serde scenario files, multi-side runs, random maps.
//!
//! API Policy
//! - Internal crate; the CLI is the only consumer. Breaking changes are fine
//!   when they make the engine clearer.

pub mod frontline;
pub mod geom2;
pub mod graph;
pub mod scenario;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::frontline::{Frontline, FrontlineCfg, Hull, Polyline, UpdateStats};
    pub use crate::geom2::Pt;
    pub use crate::graph::{GraphCfg, GraphError, Node, NodeGraph, NodeId, NodeSpec, Side};
    pub use crate::scenario::rand::{draw_map, MapCfg, ReplayToken};
    pub use crate::scenario::{run_scenario, Report, Scenario, SideReport};
}
