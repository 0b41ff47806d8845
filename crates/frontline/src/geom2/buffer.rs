use super::{angle_between, bearing, offset, Pt};

/// Exterior clearance polygon around the directed edge `cp1→cp2`.
///
/// `cp0` precedes and `cp3` follows the edge on the hull; the buffer lies on the
/// right of `cp1→cp2` (the side a counter-clockwise hull does not own) and has
/// half-width `width`. Each end is shaped by the exterior turn there:
/// - sharp (< 90°): one point on the exterior bisector at `width / sin(turn/2)`,
///   where the two offset lines meet;
/// - shallow (90°..180°): one perpendicular offset;
/// - reflex (>= 180°): the bisector point and the perpendicular offset, so the
///   corner wedge is covered.
///
/// The result is `[cp1, cp2, <cp2 end>, <cp1 end>]` with four to six vertices.
pub fn collision_buffer(cp0: Pt, cp1: Pt, cp2: Pt, cp3: Pt, width: f64) -> Vec<Pt> {
    let normal = bearing(cp1, cp2) + 90.0;
    let mut poly = Vec::with_capacity(6);
    poly.push(cp1);
    poly.push(cp2);

    let ext2 = 360.0 - angle_between(cp1, cp2, cp3);
    let bis2 = bearing(cp2, cp3) + ext2 / 2.0;
    match end_shape(ext2) {
        EndShape::Sharp(s) => poly.push(offset(cp2, bis2, width / s)),
        EndShape::Shallow => poly.push(offset(cp2, normal, width)),
        EndShape::Reflex => {
            poly.push(offset(cp2, bis2, width));
            poly.push(offset(cp2, normal, width));
        }
    }

    let ext1 = 360.0 - angle_between(cp0, cp1, cp2);
    let bis1 = bearing(cp1, cp2) + ext1 / 2.0;
    match end_shape(ext1) {
        EndShape::Sharp(s) => poly.push(offset(cp1, bis1, width / s)),
        EndShape::Shallow => poly.push(offset(cp1, normal, width)),
        EndShape::Reflex => {
            poly.push(offset(cp1, normal, width));
            poly.push(offset(cp1, bis1, width));
        }
    }
    poly
}

enum EndShape {
    /// Carries `sin(turn / 2)` for the hypotenuse.
    Sharp(f64),
    Shallow,
    Reflex,
}

fn end_shape(exterior_turn: f64) -> EndShape {
    if exterior_turn < 90.0 {
        let s = (exterior_turn / 2.0).to_radians().sin();
        if s > 1e-9 {
            return EndShape::Sharp(s);
        }
        return EndShape::Shallow;
    }
    if exterior_turn < 180.0 {
        EndShape::Shallow
    } else {
        EndShape::Reflex
    }
}
