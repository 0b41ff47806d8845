//! Engine thresholds.
//!
//! Policy
//! - Defaults mirror the in-game tuning (35° spikes, 2 km / 3.5 km clearance,
//!   30-octet supply links). Scenario files may override any subset.

use serde::{Deserialize, Serialize};

/// Frontline engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontlineCfg {
    /// Sharpest territory-side angle a hull vertex may keep, in degrees.
    pub min_angle: f64,
    /// Widest territory-side angle (reflex limit), in degrees.
    pub max_angle: f64,
    /// Buffer half-width against other friendly nodes, in meters.
    pub friendly_clearance: f64,
    /// Buffer half-width against hostile nodes and hostile hulls, in meters.
    pub enemy_clearance: f64,
    /// Longer supply links are not obstacles (cross-water links), in octets.
    pub max_link_distance: f64,
    /// Enables the two-vertex dent fill.
    pub merge_quad: bool,
    /// Shorter buffers are discarded by the line walk.
    pub min_line_points: usize,
    /// Upper bound on rewrite rounds per hull before the pass is abandoned.
    pub max_refine_passes: usize,
}

impl Default for FrontlineCfg {
    fn default() -> Self {
        Self {
            min_angle: 35.0,
            max_angle: 325.0,
            friendly_clearance: 2000.0,
            enemy_clearance: 3500.0,
            max_link_distance: 30.0,
            merge_quad: false,
            min_line_points: 5,
            max_refine_passes: 100_000,
        }
    }
}

impl FrontlineCfg {
    #[inline]
    pub fn angle_ok(&self, deg: f64) -> bool {
        deg >= self.min_angle && deg <= self.max_angle
    }
}
