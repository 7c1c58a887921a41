// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayvec::ArrayVec;

use crate::curve::{Curve, TOLERANCE};
use crate::floating_point::NormalizedF32Exclusive;
use crate::Point;

/// The maximum number of intersections two curves can have.
///
/// Nine is the Bezout bound for a pair of cubics.
pub(crate) const MAX_INTERSECTIONS: usize = 9;

// Steep enough that the parameter windows shrink below any practical
// tolerance, shallow enough that degenerate, nearly-coincident curves
// cannot blow the stack.
const MAX_RECURSION: usize = 16;

/// An intersection between two curves.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Intersection {
    /// The parameter on the first curve.
    pub t1: NormalizedF32Exclusive,
    /// The parameter on the second curve.
    pub t2: NormalizedF32Exclusive,
    /// The intersection point.
    pub point: Point,
}

/// Computes intersections between two curves in the open parameter interval
/// of each, ordered by the parameter on the first curve.
///
/// Line/line pairs are solved directly. Every other pair goes through
/// recursive subdivision with control-polygon bounding box pruning, in the
/// spirit of Bezier clipping: a window pair survives only while their boxes
/// overlap, and once both windows are flat the chords are intersected.
pub(crate) fn curve_intersections(
    first: &Curve,
    second: &Curve,
    max_results: usize,
) -> ArrayVec<Intersection, MAX_INTERSECTIONS> {
    let mut results = ArrayVec::new();
    if max_results == 0 {
        return results;
    }
    let max_results = max_results.min(MAX_INTERSECTIONS);

    if let (Curve::Line(l1), Curve::Line(l2)) = (first, second) {
        if let Some(hit) = segments_intersection(l1, l2) {
            push_intersection(&mut results, hit);
        }
        return results;
    }

    recurse(
        first,
        0.0,
        1.0,
        second,
        0.0,
        1.0,
        MAX_RECURSION,
        max_results,
        &mut results,
    );

    results
        .as_mut_slice()
        .sort_unstable_by(|a, b| a.t1.cmp(&b.t1));
    results.truncate(max_results);
    results
}

fn recurse(
    a: &Curve,
    ta0: f32,
    ta1: f32,
    b: &Curve,
    tb0: f32,
    tb1: f32,
    depth: usize,
    max_results: usize,
    results: &mut ArrayVec<Intersection, MAX_INTERSECTIONS>,
) {
    if results.len() >= max_results {
        return;
    }

    let (bounds_a, bounds_b) = match (a.bounds(), b.bounds()) {
        (Some(ba), Some(bb)) => (ba, bb),
        _ => return,
    };
    let bounds_a = match bounds_a.outset(TOLERANCE, TOLERANCE) {
        Some(r) => r,
        None => return,
    };
    if bounds_a.intersect(&bounds_b).is_none() {
        return;
    }

    if depth == 0 || (is_flat(a) && is_flat(b)) {
        let chord_a = [a.start_point(), a.end_point()];
        let chord_b = [b.start_point(), b.end_point()];
        if let Some((u1, u2, point)) = chords_intersection(&chord_a, &chord_b) {
            let t1 = ta0 + (ta1 - ta0) * u1;
            let t2 = tb0 + (tb1 - tb0) * u2;
            if let Some(hit) = make_intersection(t1, t2, point) {
                push_intersection(results, hit);
            }
        }
        return;
    }

    let half = NormalizedF32Exclusive::HALF;
    let (a1, a2) = a.split(half);
    let (b1, b2) = b.split(half);
    let ta_mid = (ta0 + ta1) * 0.5;
    let tb_mid = (tb0 + tb1) * 0.5;

    // Keep the first-curve windows ordered, so results come out sorted by t1.
    recurse(&a1, ta0, ta_mid, &b1, tb0, tb_mid, depth - 1, max_results, results);
    recurse(&a1, ta0, ta_mid, &b2, tb_mid, tb1, depth - 1, max_results, results);
    recurse(&a2, ta_mid, ta1, &b1, tb0, tb_mid, depth - 1, max_results, results);
    recurse(&a2, ta_mid, ta1, &b2, tb_mid, tb1, depth - 1, max_results, results);
}

fn make_intersection(t1: f32, t2: f32, point: Point) -> Option<Intersection> {
    let t1 = NormalizedF32Exclusive::new(t1)?;
    let t2 = NormalizedF32Exclusive::new(t2)?;
    Some(Intersection { t1, t2, point })
}

fn push_intersection(
    results: &mut ArrayVec<Intersection, MAX_INTERSECTIONS>,
    hit: Intersection,
) {
    // Neighboring windows can report the same root; keep one of them.
    let duplicate = results.iter().any(|r| {
        (r.t1.get() - hit.t1.get()).abs() < TOLERANCE
            && (r.t2.get() - hit.t2.get()).abs() < TOLERANCE
    });

    if !duplicate && !results.is_full() {
        results.push(hit);
    }
}

// The control polygon is never farther from the curve than it is from its
// own chord, so this bounds the curve flatness as well.
fn is_flat(curve: &Curve) -> bool {
    let max_dist_sqd = TOLERANCE * TOLERANCE;
    match curve {
        Curve::Line(_) => true,
        Curve::Cubic(pts) => {
            pt_to_line_sqd(pts[1], pts[0], pts[3]) <= max_dist_sqd
                && pt_to_line_sqd(pts[2], pts[0], pts[3]) <= max_dist_sqd
        }
        Curve::Conic { points, .. } => pt_to_line_sqd(points[1], points[0], points[2]) <= max_dist_sqd,
    }
}

// Returns the distance squared from the point to the line segment.
fn pt_to_line_sqd(pt: Point, line_start: Point, line_end: Point) -> f32 {
    let dxy = line_end - line_start;
    let ab0 = pt - line_start;
    let numer = dxy.dot(ab0);
    let denom = dxy.dot(dxy);
    let t = numer / denom;
    if t >= 0.0 && t <= 1.0 {
        let hit = Point::from_xy(
            line_start.x * (1.0 - t) + line_end.x * t,
            line_start.y * (1.0 - t) + line_end.y * t,
        );
        hit.distance_to_sqd(pt)
    } else {
        pt.distance_to_sqd(line_start)
    }
}

// The open-interval line/line case: both segment parameters must be strictly
// inside (0, 1).
fn segments_intersection(l1: &[Point; 2], l2: &[Point; 2]) -> Option<Intersection> {
    let (u1, u2, point) = chords_intersection(l1, l2)?;
    make_intersection(u1, u2, point)
}

fn chords_intersection(l1: &[Point; 2], l2: &[Point; 2]) -> Option<(f32, f32, Point)> {
    let d1 = l1[1] - l1[0];
    let d2 = l2[1] - l2[0];

    let denom = d1.cross(d2);
    if !denom.is_finite() || denom == 0.0 {
        return None;
    }

    let diff = l2[0] - l1[0];
    let u1 = diff.cross(d2) / denom;
    let u2 = diff.cross(d1) / denom;
    if !u1.is_finite() || !u2.is_finite() {
        return None;
    }

    let point = Point::from_xy(l1[0].x + d1.x * u1, l1[0].y + d1.y * u1);
    Some((u1, u2, point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point {
        Point::from_xy(x, y)
    }

    #[test]
    fn crossing_lines() {
        // The inner sides of a right-angle bend.
        let a = Curve::line(pt(0.0, 1.0), pt(10.0, 1.0));
        let b = Curve::line(pt(9.0, 0.0), pt(9.0, 10.0));

        let hits = a.intersect(&b, 1);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].t1.get() - 0.9).abs() < 1e-5);
        assert!((hits[0].t2.get() - 0.1).abs() < 1e-5);
        assert_eq!(hits[0].point, pt(9.0, 1.0));
    }

    #[test]
    fn touching_endpoints_do_not_count() {
        let a = Curve::line(pt(0.0, 0.0), pt(10.0, 0.0));
        let b = Curve::line(pt(10.0, 0.0), pt(10.0, 10.0));
        assert!(a.intersect(&b, 1).is_empty());
    }

    #[test]
    fn parallel_lines() {
        let a = Curve::line(pt(0.0, 0.0), pt(10.0, 0.0));
        let b = Curve::line(pt(0.0, 1.0), pt(10.0, 1.0));
        assert!(a.intersect(&b, 1).is_empty());
    }

    #[test]
    fn cubic_and_line() {
        let arch = Curve::cubic(pt(0.0, 0.0), pt(0.0, 2.0), pt(10.0, 2.0), pt(10.0, 0.0));
        let line = Curve::line(pt(0.0, 1.0), pt(10.0, 1.0));

        // The arch rises through y=1 and comes back down:
        // y(t) = 6t(1-t) = 1 at t = (3 - sqrt(3)) / 6 and (3 + sqrt(3)) / 6.
        let hits = arch.intersect(&line, 9);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t1.get() - 0.211325).abs() < 5e-3);
        assert!((hits[1].t1.get() - 0.788675).abs() < 5e-3);
        assert!((hits[0].point.y - 1.0).abs() < 5e-3);
        assert!(hits[0].t1 < hits[1].t1);
    }

    #[test]
    fn cubic_pair() {
        let up = Curve::cubic(pt(0.0, 0.0), pt(0.0, 2.0), pt(10.0, 2.0), pt(10.0, 0.0));
        let down = Curve::cubic(pt(0.0, 1.5), pt(0.0, -0.5), pt(10.0, -0.5), pt(10.0, 1.5));

        // Both curves share the same x(t), so they intersect where
        // 6t(1-t) = 1.5(1 - 3s) - 1.5s with s = t(1-t), i.e. s = 0.125.
        let hits = up.intersect(&down, 9);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t1.get() - 0.146447).abs() < 5e-3);
        assert!((hits[1].t1.get() - 0.853553).abs() < 5e-3);
        assert!((hits[0].point.y - 0.75).abs() < 5e-3);
    }

    #[test]
    fn disjoint_curves() {
        let a = Curve::cubic(pt(0.0, 0.0), pt(0.0, 2.0), pt(10.0, 2.0), pt(10.0, 0.0));
        let b = Curve::line(pt(0.0, 5.0), pt(10.0, 5.0));
        assert!(a.intersect(&b, 9).is_empty());
    }

    #[test]
    fn max_results_is_honored() {
        let arch = Curve::cubic(pt(0.0, 0.0), pt(0.0, 2.0), pt(10.0, 2.0), pt(10.0, 0.0));
        let line = Curve::line(pt(0.0, 1.0), pt(10.0, 1.0));
        let hits = arch.intersect(&line, 1);
        assert_eq!(hits.len(), 1);
    }
}
