use super::Pt;

/// Wrap an angle in degrees into [0, 360).
#[inline]
pub fn normalize_deg(a: f64) -> f64 {
    let r = a.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Compass bearing from `p1` to `p2` in degrees (0 = +y, clockwise).
///
/// Coincident points give bearing 0.
#[inline]
pub fn bearing(p1: Pt, p2: Pt) -> f64 {
    let d = p2 - p1;
    normalize_deg(d.x.atan2(d.y).to_degrees())
}

/// Clockwise sweep at `p2` from the ray `p2→p1` to the ray `p2→p3`, in [0, 360).
///
/// With `p1`/`p3` the previous/next vertex of a counter-clockwise polygon this
/// is the interior angle at `p2`; values above 180 mark a reflex vertex.
#[inline]
pub fn angle_between(p1: Pt, p2: Pt, p3: Pt) -> f64 {
    normalize_deg(bearing(p2, p3) - bearing(p2, p1))
}

/// Point reached from `p` after travelling `distance` along compass `bearing_deg`.
#[inline]
pub fn offset(p: Pt, bearing_deg: f64, distance: f64) -> Pt {
    let b = bearing_deg.to_radians();
    Pt::new(p.x + distance * b.sin(), p.y + distance * b.cos())
}
