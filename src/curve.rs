// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::floating_point::{NormalizedF32, NormalizedF32Exclusive, FLOAT_PI};
use crate::intersect::{curve_intersections, Intersection};
use crate::{Point, Rect};

use arrayvec::ArrayVec;

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

/// The tolerance used for coincidence and collinearity tests.
pub(crate) const TOLERANCE: f32 = 0.001;

/// A path segment in a uniform representation.
///
/// Endpoints always sit in the first and the last slot, so line, cubic and
/// conic segments can be split, reversed, offset and intersected through a
/// single interface. Curves are small `Copy` values and never allocate.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Curve {
    /// A line segment.
    Line([Point; 2]),
    /// A cubic Bezier segment.
    Cubic([Point; 4]),
    /// A conic, aka rational quadratic Bezier segment.
    Conic {
        /// Start, control and end points.
        points: [Point; 3],
        /// The conic weight. Must be finite and positive.
        weight: f32,
    },
}

impl Curve {
    /// Creates a line segment.
    pub fn line(p0: Point, p1: Point) -> Self {
        Curve::Line([p0, p1])
    }

    /// Creates a cubic segment.
    pub fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Curve::Cubic([p0, p1, p2, p3])
    }

    /// Creates a conic segment.
    pub fn conic(p0: Point, p1: Point, p2: Point, weight: f32) -> Self {
        Curve::Conic {
            points: [p0, p1, p2],
            weight,
        }
    }

    /// Returns the curve's control points. Endpoints are first and last.
    pub fn points(&self) -> &[Point] {
        match self {
            Curve::Line(pts) => pts,
            Curve::Cubic(pts) => pts,
            Curve::Conic { points, .. } => points,
        }
    }

    /// Returns the first point.
    pub fn start_point(&self) -> Point {
        self.points()[0]
    }

    /// Returns the last point.
    pub fn end_point(&self) -> Point {
        match self {
            Curve::Line(pts) => pts[1],
            Curve::Cubic(pts) => pts[3],
            Curve::Conic { points, .. } => points[2],
        }
    }

    /// Checks that all control points collapse into the start point.
    ///
    /// Such curves contribute nothing to a stroke and are skipped.
    pub fn is_degenerate(&self) -> bool {
        let start = self.start_point();
        self.points()
            .iter()
            .all(|p| p.equals_within_tolerance(start, TOLERANCE))
    }

    /// Returns the unit tangent at the start of the curve.
    ///
    /// Collapsed control legs fall back to the next control point,
    /// so only a fully degenerate curve has no tangent.
    pub fn start_tangent(&self) -> Option<Point> {
        match self {
            Curve::Line(pts) => tangent(pts[0], pts[1]),
            Curve::Cubic(pts) => tangent(pts[0], pts[1])
                .or_else(|| tangent(pts[0], pts[2]))
                .or_else(|| tangent(pts[0], pts[3])),
            Curve::Conic { points, .. } => {
                tangent(points[0], points[1]).or_else(|| tangent(points[0], points[2]))
            }
        }
    }

    /// Returns the unit tangent at the end of the curve.
    pub fn end_tangent(&self) -> Option<Point> {
        match self {
            Curve::Line(pts) => tangent(pts[0], pts[1]),
            Curve::Cubic(pts) => tangent(pts[2], pts[3])
                .or_else(|| tangent(pts[1], pts[3]))
                .or_else(|| tangent(pts[0], pts[3])),
            Curve::Conic { points, .. } => {
                tangent(points[1], points[2]).or_else(|| tangent(points[0], points[2]))
            }
        }
    }

    /// Evaluates the curve at the given parameter.
    pub fn eval(&self, t: NormalizedF32) -> Point {
        let t = t.get();
        match self {
            Curve::Line(pts) => lerp(pts[0], pts[1], t),
            Curve::Cubic(pts) => {
                let ab = lerp(pts[0], pts[1], t);
                let bc = lerp(pts[1], pts[2], t);
                let cd = lerp(pts[2], pts[3], t);
                let abc = lerp(ab, bc, t);
                let bcd = lerp(bc, cd, t);
                lerp(abc, bcd, t)
            }
            Curve::Conic { points, weight } => {
                let (xy, z) = conic_eval_homogeneous(points, *weight, t);
                Point::from_xy(xy.x / z, xy.y / z)
            }
        }
    }

    /// Splits the curve at the given parameter using De Casteljau's algorithm,
    /// with the rational variant for conics.
    pub fn split(&self, t: NormalizedF32Exclusive) -> (Curve, Curve) {
        let t = t.get();
        match self {
            Curve::Line(pts) => {
                let mid = lerp(pts[0], pts[1], t);
                (Curve::Line([pts[0], mid]), Curve::Line([mid, pts[1]]))
            }
            Curve::Cubic(pts) => {
                let (left, right) = chop_cubic(pts, t);
                (Curve::Cubic(left), Curve::Cubic(right))
            }
            Curve::Conic { points, weight } => chop_conic(points, *weight, t),
        }
    }

    /// Returns the sub-curve between the parameters `t0` and `t1`.
    ///
    /// `t0` must be less than `t1`; both are clamped to the unit interval.
    pub fn segment(&self, t0: f32, t1: f32) -> Curve {
        debug_assert!(t0 < t1);

        if t0 <= 0.0 && t1 >= 1.0 {
            return *self;
        }

        match self {
            Curve::Line(pts) => Curve::Line([
                lerp(pts[0], pts[1], t0.max(0.0)),
                lerp(pts[0], pts[1], t1.min(1.0)),
            ]),
            Curve::Cubic(pts) => {
                let mut c = *pts;
                let mut u1 = t1.min(1.0);
                if t0 > 0.0 {
                    c = chop_cubic(&c, t0).1;
                    u1 = (t1 - t0) / (1.0 - t0);
                }
                if u1 < 1.0 {
                    c = chop_cubic(&c, u1).0;
                }
                Curve::Cubic(c)
            }
            Curve::Conic { points, weight } => {
                conic_segment(points, *weight, t0.max(0.0), t1.min(1.0))
            }
        }
    }

    /// Returns the curve with its control points in reverse order.
    pub fn reverse(&self) -> Curve {
        match self {
            Curve::Line(pts) => Curve::Line([pts[1], pts[0]]),
            Curve::Cubic(pts) => Curve::Cubic([pts[3], pts[2], pts[1], pts[0]]),
            Curve::Conic { points, weight } => Curve::Conic {
                points: [points[2], points[1], points[0]],
                weight: *weight,
            },
        }
    }

    /// Returns the bounds of the control polygon.
    ///
    /// The curve itself is always contained in them, which is all the
    /// intersection pruning needs. Returns `None` for non-finite points.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(self.points())
    }

    /// Returns a same-kind curve approximating the parallel curve at the
    /// given signed distance.
    ///
    /// A positive distance shifts to the left of the travel direction.
    /// The endpoints land exactly on the ideal parallel and the endpoint
    /// tangent directions match it; the interior is only an approximation,
    /// which the stroker compensates for by subdividing curvy segments
    /// beforehand.
    pub fn offset(&self, distance: f32) -> Curve {
        let (t_start, t_end) = match (self.start_tangent(), self.end_tangent()) {
            (Some(s), Some(e)) => (s, e),
            _ => return *self,
        };
        let n_start = rotated_cw(t_start).scaled(distance);
        let n_end = rotated_cw(t_end).scaled(distance);

        match self {
            Curve::Line(pts) => Curve::Line([pts[0] + n_start, pts[1] + n_start]),
            Curve::Cubic(pts) => {
                let p0 = pts[0] + n_start;
                let p3 = pts[3] + n_end;

                // Shift the middle hull edge by its own normal and pin the
                // interior controls at the intersections with the shifted
                // end edges, so the offset keeps the endpoint tangents.
                let t_mid = tangent(pts[1], pts[2])
                    .or_else(|| tangent(pts[0], pts[3]))
                    .unwrap_or(t_start);
                let n_mid = rotated_cw(t_mid).scaled(distance);

                let p1 = line_intersect(p0, t_start, pts[1] + n_mid, t_mid)
                    .filter(|p| p.is_finite())
                    .unwrap_or(pts[1] + n_start);
                let p2 = line_intersect(p3, t_end, pts[2] + n_mid, t_mid)
                    .filter(|p| p.is_finite())
                    .unwrap_or(pts[2] + n_end);

                Curve::Cubic([p0, p1, p2, p3])
            }
            Curve::Conic { points, weight } => {
                let p0 = points[0] + n_start;
                let p2 = points[2] + n_end;

                let p1 = line_intersect(p0, t_start, p2, t_end)
                    .filter(|p| p.is_finite())
                    .unwrap_or_else(|| {
                        let mut avg = t_start + t_end;
                        if !avg.normalize() {
                            avg = t_start;
                        }
                        points[1] + rotated_cw(avg).scaled(distance)
                    });

                Curve::Conic {
                    points: [p0, p1, p2],
                    weight: *weight,
                }
            }
        }
    }

    /// Returns up to `max_results` intersections between two curves.
    ///
    /// Only intersections in the open parameter interval of each curve are
    /// reported, ordered by the parameter on `self`.
    pub fn intersect(&self, other: &Curve, max_results: usize) -> ArrayVec<Intersection, 9> {
        curve_intersections(self, other, max_results)
    }
}

pub(crate) fn lerp(a: Point, b: Point, t: f32) -> Point {
    Point::from_xy(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Returns the unit direction from `a` to `b`, if there is one.
pub(crate) fn tangent(a: Point, b: Point) -> Option<Point> {
    let mut t = b - a;
    if t.normalize() {
        Some(t)
    } else {
        None
    }
}

/// Returns the unit normal of the segment from `a` to `b`, if there is one.
pub(crate) fn normal(a: Point, b: Point) -> Option<Point> {
    let mut n = Point::from_xy(a.y - b.y, b.x - a.x);
    if n.normalize() {
        Some(n)
    } else {
        None
    }
}

/// Rotates the vector so that `normal(a, b) == rotated_cw(tangent(a, b))`.
pub(crate) fn rotated_cw(v: Point) -> Point {
    let mut v = v;
    v.rotate_cw();
    v
}

/// Returns the angle between two directions in radians, such that
/// 0 means straight continuation, > 0 a left turn and < 0 a right turn.
pub(crate) fn angle_between(t1: Point, t2: Point) -> f32 {
    let mut angle = t2.y.atan2(t2.x) - t1.y.atan2(t1.x);

    if angle > FLOAT_PI {
        angle -= 2.0 * FLOAT_PI;
    }
    if angle < -FLOAT_PI {
        angle += 2.0 * FLOAT_PI;
    }

    angle
}

/// Returns the intersection of the lines `a + t * ab` and `c + s * cd`.
///
/// Returns `None` when the lines are parallel or nearly so.
pub(crate) fn line_intersect(a: Point, ab: Point, c: Point, cd: Point) -> Option<Point> {
    let a1 = ab.y;
    let b1 = -ab.x;
    let c1 = a1 * a.x + b1 * a.y;

    let a2 = cd.y;
    let b2 = -cd.x;
    let c2 = a2 * c.x + b2 * c.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() <= TOLERANCE {
        return None;
    }

    Some(Point::from_xy(
        (b2 * c1 - b1 * c2) / det,
        (a1 * c2 - a2 * c1) / det,
    ))
}

fn chop_cubic(pts: &[Point; 4], t: f32) -> ([Point; 4], [Point; 4]) {
    let ab = lerp(pts[0], pts[1], t);
    let bc = lerp(pts[1], pts[2], t);
    let cd = lerp(pts[2], pts[3], t);
    let abc = lerp(ab, bc, t);
    let bcd = lerp(bc, cd, t);
    let abcd = lerp(abc, bcd, t);
    (
        [pts[0], ab, abc, abcd],
        [abcd, bcd, cd, pts[3]],
    )
}

// A conic is the projection of a quadratic in homogeneous coordinates,
// where the control point carries the weight: (x*w, y*w, w).
// Splitting happens on the homogeneous quadratic; the halves are brought
// back to standard form (end weights of one) by `w' = w_mid / sqrt(w_split)`.
fn chop_conic(pts: &[Point; 3], weight: f32, t: f32) -> (Curve, Curve) {
    let p0 = (pts[0], 1.0);
    let p1 = (pts[1].scaled(weight), weight);
    let p2 = (pts[2], 1.0);

    let ab = lerp3(p0, p1, t);
    let bc = lerp3(p1, p2, t);
    let abc = lerp3(ab, bc, t);

    debug_assert!(abc.1 > 0.0);
    let root = abc.1.sqrt();
    let mid = Point::from_xy(abc.0.x / abc.1, abc.0.y / abc.1);

    (
        Curve::Conic {
            points: [pts[0], project(ab), mid],
            weight: ab.1 / root,
        },
        Curve::Conic {
            points: [mid, project(bc), pts[2]],
            weight: bc.1 / root,
        },
    )
}

// Extracts a conic sub-segment by evaluating the homogeneous quadratic at
// the range ends and the range midpoint. The midpoint pins the middle
// Bernstein coefficient: b = 2*mid - (start + end) / 2.
fn conic_segment(pts: &[Point; 3], weight: f32, t0: f32, t1: f32) -> Curve {
    let (a_xy, a_z) = conic_eval_homogeneous(pts, weight, t0);
    let (d_xy, d_z) = conic_eval_homogeneous(pts, weight, (t0 + t1) * 0.5);
    let (c_xy, c_z) = conic_eval_homogeneous(pts, weight, t1);

    let b_xy = d_xy.scaled(2.0) - (a_xy + c_xy).scaled(0.5);
    let b_z = 2.0 * d_z - (a_z + c_z) * 0.5;

    debug_assert!(a_z > 0.0 && b_z > 0.0 && c_z > 0.0);

    Curve::Conic {
        points: [
            Point::from_xy(a_xy.x / a_z, a_xy.y / a_z),
            Point::from_xy(b_xy.x / b_z, b_xy.y / b_z),
            Point::from_xy(c_xy.x / c_z, c_xy.y / c_z),
        ],
        weight: b_z / (a_z * c_z).sqrt(),
    }
}

fn conic_eval_homogeneous(pts: &[Point; 3], weight: f32, t: f32) -> (Point, f32) {
    let u = 1.0 - t;
    let b0 = u * u;
    let b1 = 2.0 * u * t;
    let b2 = t * t;

    let xy = pts[0].scaled(b0) + pts[1].scaled(b1 * weight) + pts[2].scaled(b2);
    let z = b0 + b1 * weight + b2;
    (xy, z)
}

fn lerp3(a: (Point, f32), b: (Point, f32), t: f32) -> (Point, f32) {
    (lerp(a.0, b.0, t), a.1 + (b.1 - a.1) * t)
}

fn project(p: (Point, f32)) -> Point {
    Point::from_xy(p.0.x / p.1, p.0.y / p.1)
}
