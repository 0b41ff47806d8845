use super::Pt;

/// Orientation of `c` relative to the directed line `a→b`.
///
/// Positive when `c` lies to the left (counter-clockwise turn), negative to the
/// right, zero when collinear. Magnitude is twice the triangle area.
#[inline]
pub fn turn(a: Pt, b: Pt, c: Pt) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Proper crossing of segments `p1p2` and `q1q2`.
///
/// Touching at an endpoint, sharing an endpoint, or collinear overlap do not
/// count. Callers rely on this so that edges meeting at a hull vertex never
/// block each other.
pub fn segments_cross(p1: Pt, p2: Pt, q1: Pt, q2: Pt) -> bool {
    let d1 = turn(q1, q2, p1);
    let d2 = turn(q1, q2, p2);
    if !((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0)) {
        return false;
    }
    let d3 = turn(p1, p2, q1);
    let d4 = turn(p1, p2, q2);
    (d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0)
}

/// Ray-casting inclusion test over an implicitly closed vertex list.
///
/// Orientation-agnostic. Points on the boundary may fall either way, so callers
/// exclude the polygon's own vertices before asking.
pub fn point_in_polygon(p: Pt, poly: &[Pt]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (poly[i], poly[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shoelace area; positive for counter-clockwise vertex order.
pub fn signed_area(poly: &[Pt]) -> f64 {
    let n = poly.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        acc += a.x * b.y - b.x * a.y;
    }
    0.5 * acc
}

/// True if segment `ab` crosses any edge of `poly` or has an endpoint inside it.
pub fn polygon_crosses_segment(poly: &[Pt], a: Pt, b: Pt) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    if point_in_polygon(a, poly) || point_in_polygon(b, poly) {
        return true;
    }
    (0..n).any(|k| segments_cross(poly[k], poly[(k + 1) % n], a, b))
}
