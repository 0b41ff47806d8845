//! Planar primitives used by hull construction and line emission.
//!
//! Purpose
//! - Provide the small set of predicates the frontline engine leans on:
//!   compass bearings, territory-side angles, bearing offsets, proper segment
//!   crossings, ray-cast containment and the exterior collision buffer.
//! - Everything is a free function over `nalgebra::Vector2<f64>`; callers pick
//!   the unit system (octets for adjacency and angles, meters for clearance).
//!
//! Conventions
//! - Bearings are compass bearings in degrees: 0° points along +y, angles grow
//!   clockwise, results are normalized to [0, 360).
//! - `angle_between(p1, p2, p3)` is the clockwise sweep at `p2` from the ray
//!   towards `p1` to the ray towards `p3`. For a counter-clockwise polygon with
//!   `p1 = prev`, `p3 = next` this is the interior angle.
//!
//! Code cross-refs: `crate::frontline::Run` (clearance and crossing tests),
//! `crate::frontline::lines` (lit test).

mod angles;
mod buffer;
mod predicates;

pub use angles::{angle_between, bearing, normalize_deg, offset};
pub use buffer::collision_buffer;
pub use predicates::{
    point_in_polygon, polygon_crosses_segment, segments_cross, signed_area, turn,
};

/// Point type shared by the whole crate.
pub type Pt = nalgebra::Vector2<f64>;
