// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

// The general theory of operation for the stroker:
//
// We walk the segments of the path, offsetting each segment to the left
// and right, and collect the offset segments in a left and a right contour.
// When a segment is too curvy, we subdivide it before we add the pieces.
//
// Whenever we add a segment, we need to decide if the join is a smooth
// connection, a left turn, or a right turn. For smooth connections, we just
// connect the end points of the offset curves with line segments. For sharp
// turns, we add a line join on the outer side, and intersect the offset
// curves on the inner one.
//
// Since the intersection shortens both segments, we have to delay adding
// the previous segment to the outlines until we've handled the join at its
// end. We also need to hold off on adding the initial segment until we've
// seen the end of the contour, to handle the join before the initial
// segment for closed contours.
//
// If the contour turns out to not be closed when we reach the end, we
// collect the pending segments, reverse the left contour, and connect the
// right and left contours with end caps, closing the resulting outline.

use arrayvec::ArrayVec;

use crate::curve::{angle_between, line_intersect, normal, rotated_cw, tangent, Curve, TOLERANCE};
use crate::dash::StrokeDash;
use crate::floating_point::{NonZeroPositiveF32, NormalizedF32Exclusive, FLOAT_PI};
use crate::path::PathSegment;
use crate::path_builder::PathBuilder;
use crate::scalar::Scalar;
use crate::{Path, Point};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

/// Stroke properties.
#[derive(Clone, PartialEq, Debug)]
pub struct Stroke {
    /// A stroke thickness.
    ///
    /// Must be > 0.
    ///
    /// Default: 1.0
    pub width: f32,

    /// The limit at which a sharp corner is drawn beveled or clipped.
    ///
    /// Values below 1.0 behave like 1.0.
    ///
    /// Default: 4.0
    pub miter_limit: f32,

    /// A stroke line cap.
    ///
    /// Default: Butt
    pub line_cap: LineCap,

    /// A stroke line join.
    ///
    /// Default: Miter
    pub line_join: LineJoin,

    /// A stroke dashing properties.
    ///
    /// The stroker itself ignores them; a dash expander consumes them and
    /// invokes the stroker once per dash span.
    ///
    /// Default: None
    pub dash: Option<StrokeDash>,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            width: 1.0,
            miter_limit: 4.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            dash: None,
        }
    }
}

/// Draws at the beginning and end of an open path contour.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineCap {
    /// No stroke extension.
    Butt,
    /// Adds a semicircle.
    Round,
    /// Adds a square.
    Square,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

/// Specifies how corners are drawn when a shape is stroked.
///
/// Join affects the four corners of a stroked rectangle, and the connected
/// segments in a stroked path.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineJoin {
    /// Extends to the miter limit, then falls back to a bevel.
    Miter,
    /// Extends to the miter limit, then clips the corner flat.
    MiterClip,
    /// Adds a circular arc.
    Round,
    /// Connects the outside edges with a line.
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

/// Joins with a tangent change below this angle connect the offset
/// segments with plain lines instead.
const SMOOTH_ANGLE: f32 = 5.0 * FLOAT_PI / 180.0;

const MAX_SUBDIVISION: u8 = 8;

// The previous input segment together with its two offset candidates.
// Held back until the join at its end is known, because the inner-side
// intersection may shorten either offset.
#[derive(Copy, Clone, Debug)]
struct OffsetTriple {
    c: Curve,
    l: Curve,
    r: Curve,
}

impl Path {
    /// Returns a stroked path.
    ///
    /// If you plan stroking multiple paths, you can try using [`PathStroker`]
    /// which will preserve temporary allocations required during stroking.
    /// This might improve performance a bit.
    pub fn stroke(&self, stroke: &Stroke) -> Option<Path> {
        PathStroker::new().stroke(self, stroke)
    }
}

/// A path stroker.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct PathStroker {
    half_width: f32,
    miter_limit: f32,
    line_cap: LineCap,
    line_join: LineJoin,

    // The collected stroke outline.
    builder: PathBuilder,
    // The two offset contours of the current input contour.
    left: PathBuilder,
    right: PathBuilder,

    // The first segment of the contour, kept out of the side contours until
    // we know whether the contour closes back onto it.
    first: OffsetTriple,
    pending: Option<OffsetTriple>,
    is_first_curve: bool,

    has_current_point: bool,
    contour_start: Point,
}

impl Default for PathStroker {
    fn default() -> Self {
        PathStroker::new()
    }
}

impl PathStroker {
    /// Creates a new PathStroker.
    pub fn new() -> Self {
        let stub = Curve::line(Point::zero(), Point::from_xy(1.0, 0.0));
        PathStroker {
            half_width: 0.0,
            miter_limit: 4.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,

            builder: PathBuilder::new(),
            left: PathBuilder::new(),
            right: PathBuilder::new(),

            first: OffsetTriple {
                c: stub,
                l: stub,
                r: stub,
            },
            pending: None,
            is_first_curve: false,

            has_current_point: false,
            contour_start: Point::zero(),
        }
    }

    /// Strokes the path.
    ///
    /// Can be called multiple times to reuse allocated buffers.
    ///
    /// Returns `None` when the stroke width is not a positive finite number
    /// or when the resulting outline is empty.
    pub fn stroke(&mut self, path: &Path, stroke: &Stroke) -> Option<Path> {
        let width = NonZeroPositiveF32::new(stroke.width)?;
        self.half_width = width.get().half();
        self.miter_limit = stroke.miter_limit.max(1.0);
        self.line_cap = stroke.line_cap;
        self.line_join = stroke.line_join;

        self.pending = None;
        self.is_first_curve = false;
        self.has_current_point = false;
        self.contour_start = Point::zero();

        // A wild guess at the output size: both offset contours plus joins.
        self.builder.clear();
        self.builder
            .reserve(path.verbs.len() * 3, path.points.len() * 3);
        self.left.clear();
        self.left.reserve(path.verbs.len(), path.points.len());
        self.right.clear();
        self.right.reserve(path.verbs.len(), path.points.len());

        let mut current = Point::zero();
        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    self.move_to(p);
                    current = p;
                }
                PathSegment::LineTo(p) => {
                    self.line_to(current, p);
                    current = p;
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    self.cubic_to(current, p1, p2, p3);
                    current = p3;
                }
                PathSegment::ConicTo(p1, p2, weight) => {
                    self.conic_to(current, p1, p2, weight);
                    current = p2;
                }
                PathSegment::Close => {
                    self.close(current);
                    current = self.contour_start;
                }
            }
        }

        if self.has_current_point {
            self.cap_and_connect_contours();
        }

        // Swap out the result, so the buffers can be reused.
        let mut buf = PathBuilder::new();
        core::mem::swap(&mut self.builder, &mut buf);

        buf.finish()
    }

    fn move_to(&mut self, p: Point) {
        if self.has_current_point {
            self.cap_and_connect_contours();
        }

        // Seed the first offsets from a degenerate stub anchored at the move
        // point, so contours without any usable segment still get caps.
        let stub = Curve::line(p, Point::from_xy(p.x + 1.0, p.y));
        self.first = OffsetTriple {
            c: stub,
            l: stub.offset(self.half_width),
            r: stub.offset(-self.half_width),
        };

        self.left.clear();
        self.right.clear();
        self.pending = None;
        self.is_first_curve = false;
        self.has_current_point = true;
        self.contour_start = p;
    }

    fn line_to(&mut self, p0: Point, p1: Point) {
        if !p0.is_finite() || !p1.is_finite() {
            log::warn!("skipped a non-finite line segment");
            return;
        }

        if p0.equals_within_tolerance(p1, TOLERANCE) {
            return;
        }

        self.add_curve(&Curve::line(p0, p1));
    }

    fn cubic_to(&mut self, p0: Point, p1: Point, p2: Point, p3: Point) {
        if !p0.is_finite() || !p1.is_finite() || !p2.is_finite() || !p3.is_finite() {
            log::warn!("skipped a non-finite cubic segment");
            return;
        }

        let curve = Curve::cubic(p0, p1, p2, p3);
        if curve.is_degenerate() {
            return;
        }

        self.subdivide_and_add_cubic(&curve, MAX_SUBDIVISION);
    }

    fn conic_to(&mut self, p0: Point, p1: Point, p2: Point, weight: f32) {
        if !p0.is_finite() || !p1.is_finite() || !p2.is_finite() || !weight.is_finite() {
            log::warn!("skipped a non-finite conic segment");
            return;
        }

        let curve = Curve::conic(p0, p1, p2, weight);
        if curve.is_degenerate() {
            return;
        }

        self.subdivide_and_add_conic(&curve, MAX_SUBDIVISION);
    }

    fn close(&mut self, current: Point) {
        if self.has_current_point {
            if !current.equals_within_tolerance(self.contour_start, TOLERANCE) {
                self.add_curve(&Curve::line(current, self.contour_start));
            }

            self.close_contours();
        }

        self.has_current_point = false;
    }

    // Subdivides a cubic until each piece is simple enough for its offset
    // to be trusted. The top level splits at the curvature extrema, deeper
    // levels split at the midpoint.
    fn subdivide_and_add_cubic(&mut self, curve: &Curve, level: u8) {
        if level == 0 || (level < MAX_SUBDIVISION && cubic_is_simple(curve)) {
            self.add_curve(curve);
        } else {
            let mut t = ArrayVec::<f32, 5>::new();
            t.push(0.0);
            t.push(1.0);

            if level == MAX_SUBDIVISION {
                for root in cubic_curvature_points(curve) {
                    t.push(root);
                }
                t.as_mut_slice().sort_unstable_by(|a, b| {
                    a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal)
                });
            }

            if t.len() == 2 {
                let (c1, c2) = curve.split(NormalizedF32Exclusive::HALF);
                self.subdivide_and_add_cubic(&c1, level - 1);
                self.subdivide_and_add_cubic(&c2, level - 1);
            } else {
                for i in 0..t.len() - 1 {
                    if t[i + 1] - t[i] <= 1e-6 {
                        continue;
                    }

                    let c = curve.segment(t[i], t[i + 1]);
                    self.subdivide_and_add_cubic(&c, level - 1);
                }
            }
        }
    }

    fn subdivide_and_add_conic(&mut self, curve: &Curve, level: u8) {
        if level == 0 || (level < MAX_SUBDIVISION && conic_is_simple(curve)) {
            self.add_curve(curve);
        } else {
            let (c1, c2) = curve.split(NormalizedF32Exclusive::HALF);
            self.subdivide_and_add_conic(&c1, level - 1);
            self.subdivide_and_add_conic(&c2, level - 1);
        }
    }

    // Adds a curve to the in-progress stroke. The angle between the previous
    // curve and this one determines on which side the offsets have to be
    // intersected, and on which a join has to be added.
    fn add_curve(&mut self, curve: &Curve) {
        let l = curve.offset(self.half_width);
        let r = curve.offset(-self.half_width);

        if let Some(prev) = self.pending.take() {
            let next = self.add_segments(prev, *curve, l, r);
            self.pending = Some(next);
            self.is_first_curve = false;
        } else {
            self.first = OffsetTriple { c: *curve, l, r };
            self.right.move_to_point(r.start_point());
            self.left.move_to_point(l.start_point());

            self.pending = Some(OffsetTriple { c: *curve, l, r });
            self.is_first_curve = true;
        }
    }

    // Flushes the previous segment into the side contours together with the
    // join between it and `curve`, and returns the new pending triple.
    fn add_segments(
        &mut self,
        mut prev: OffsetTriple,
        curve: Curve,
        mut l: Curve,
        mut r: Curve,
    ) -> OffsetTriple {
        let fallback = Point::from_xy(1.0, 0.0);
        let tan1 = prev.c.end_tangent().unwrap_or(fallback);
        let tan2 = curve.start_tangent().unwrap_or(fallback);
        let angle = angle_between(tan1, tan2);

        if angle.abs() < SMOOTH_ANGLE {
            // Close enough to a straight continuation.
            self.append_right(&prev.r);
            self.right.line_to_point(r.start_point());

            self.append_left(&prev.l);
            self.left.line_to_point(l.start_point());
        } else if angle > 0.0 {
            // Left turn. The right side is on the outside of the turn and
            // gets the join; the left offsets overlap and are trimmed at
            // their intersection.
            self.append_right(&prev.r);
            add_join(
                &mut self.right,
                self.line_join,
                self.half_width,
                self.miter_limit,
                curve.start_point(),
                prev.r.end_point(),
                tan1,
                r.start_point(),
                tan2,
                angle,
            );

            if let Some(hit) = prev.l.intersect(&l, 1).first() {
                prev.l = prev.l.split(hit.t1).0;
                l = l.split(hit.t2).1;
                self.append_left(&prev.l);
            } else {
                // No intersection found. A straight connector keeps the
                // outline closed and matches a bevel geometrically.
                self.append_left(&prev.l);
                self.left.line_to_point(l.start_point());
            }
        } else {
            // Right turn.
            if let Some(hit) = prev.r.intersect(&r, 1).first() {
                prev.r = prev.r.split(hit.t1).0;
                r = r.split(hit.t2).1;
                self.append_right(&prev.r);
            } else {
                self.append_right(&prev.r);
                self.right.line_to_point(r.start_point());
            }

            self.append_left(&prev.l);
            add_join(
                &mut self.left,
                self.line_join,
                self.half_width,
                self.miter_limit,
                curve.start_point(),
                prev.l.end_point(),
                tan1,
                l.start_point(),
                tan2,
                angle,
            );
        }

        OffsetTriple { c: curve, l, r }
    }

    fn append_right(&mut self, curve: &Curve) {
        if self.is_first_curve {
            // The first segment goes to the very end of the outline, so the
            // contour has to start where this segment will end.
            self.first.r = *curve;
            self.right.move_to_point(curve.end_point());
        } else {
            self.right.append_curve(curve);
        }
    }

    fn append_left(&mut self, curve: &Curve) {
        if self.is_first_curve {
            self.first.l = *curve;
            self.left.move_to_point(curve.end_point());
        } else {
            self.left.append_curve(curve);
        }
    }

    // Closes the left and the right contours and adds them to the output
    // as two separate subpaths.
    fn close_contours(&mut self) {
        if let Some(prev) = self.pending.take() {
            // Add the join between the final and the stored first segment,
            // then flush both, possibly trimmed on either end.
            let first = self.first;
            let last = self.add_segments(prev, first.c, first.l, first.r);
            self.right.append_curve(&last.r);
            self.left.append_curve(&last.l);
        }

        self.right.close();
        self.left.close();

        self.builder.push_path(&self.right);
        self.builder.push_path(&self.left);

        self.left.clear();
        self.right.clear();
        self.pending = None;
        self.is_first_curve = false;
    }

    // Creates a single closed outline from an open contour by connecting
    // the right and the reversed left contour with caps.
    fn cap_and_connect_contours(&mut self) {
        let r0 = self.first.r.start_point();
        let l0 = self.first.l.start_point();

        let (r1, l1) = match self.pending {
            Some(ref p) => (p.r.end_point(), p.l.end_point()),
            None => (r0, l0),
        };

        if let Some(pending) = self.pending {
            self.right.append_curve(&pending.r);
            self.left.append_curve(&pending.l);
        } else {
            self.right.move_to_point(r1);
        }

        // The end cap.
        add_cap(&mut self.right, self.line_cap, self.half_width, r1, l1);

        if self.pending.is_some() {
            // The left contour becomes the return leg of the outline.
            self.right.reverse_path_to(&self.left);

            if !self.is_first_curve {
                // The held-back first segment, walked backwards.
                self.right.append_curve(&self.first.l.reverse());
            }
        }

        // The start cap.
        add_cap(&mut self.right, self.line_cap, self.half_width, l0, r0);

        if self.pending.is_some() && !self.is_first_curve {
            self.right.append_curve(&self.first.r);
        }

        self.right.close();

        self.builder.push_path(&self.right);

        self.left.clear();
        self.right.clear();
        self.pending = None;
        self.is_first_curve = false;
        self.has_current_point = false;
    }
}

// Advances the sink from `a`, where the previous offset segment ended, to
// `b`, where the next one starts. `corner` is the turn point on the source
// path, `tan_a`/`tan_b` are the tangents at `a` and `b`, and `angle` is the
// signed tangent change at the corner.
fn add_join(
    builder: &mut PathBuilder,
    join: LineJoin,
    half_width: f32,
    miter_limit: f32,
    corner: Point,
    a: Point,
    tan_a: Point,
    b: Point,
    tan_b: Point,
    angle: f32,
) {
    match join {
        LineJoin::Miter | LineJoin::MiterClip => {
            let apex = match line_intersect(a, tan_a, b, tan_b) {
                Some(p) if p.is_finite() => Some(p),
                _ => None,
            };

            if let Some(apex) = apex {
                let sin_half = ((FLOAT_PI - angle.abs()).half()).sin().abs();
                if sin_half * miter_limit >= 1.0 {
                    builder.line_to_point(apex);
                    builder.line_to_point(b);
                    return;
                }

                if join == LineJoin::MiterClip {
                    if let Some(clip) = miter_clip_points(corner, apex, a, tan_a, b, tan_b) {
                        builder.line_to_point(clip.0);
                        builder.line_to_point(clip.1);
                        builder.line_to_point(b);
                        return;
                    }
                }
            }

            // Bevel fallback.
            builder.line_to_point(b);
        }
        LineJoin::Round => {
            builder.svg_arc_to(half_width, half_width, 0.0, false, angle > 0.0, b.x, b.y);
        }
        LineJoin::Bevel => {
            builder.line_to_point(b);
        }
    }
}

// The clip runs along the perpendicular bisector of the segment between the
// corner and the would-be miter apex. Near 180 degree turns the bisector is
// ill-conditioned and the construction gives up, leaving a bevel.
fn miter_clip_points(
    corner: Point,
    apex: Point,
    a: Point,
    tan_a: Point,
    b: Point,
    tan_b: Point,
) -> Option<(Point, Point)> {
    let mid = Point::from_xy(corner.x.ave(apex.x), corner.y.ave(apex.y));
    let n = normal(corner, apex)?;

    let a1 = line_intersect(a, tan_a, mid, n)?;
    let b1 = line_intersect(b, tan_b, mid, n)?;
    if !a1.is_finite() || !b1.is_finite() {
        return None;
    }

    Some((a1, b1))
}

// Connects the endpoints of the two offset contours, advancing the sink
// from `s` to `e` around the outside of the path endpoint.
fn add_cap(builder: &mut PathBuilder, cap: LineCap, half_width: f32, s: Point, e: Point) {
    match cap {
        LineCap::Butt => {
            builder.line_to_point(e);
        }
        LineCap::Round => {
            builder.svg_arc_to(half_width, half_width, 0.0, true, true, e.x, e.y);
        }
        LineCap::Square => {
            let mid = Point::from_xy(s.x.ave(e.x), s.y.ave(e.y));
            let mut d = s - mid;
            d.rotate_cw();

            builder.line_to_point(s + d);
            builder.line_to_point(e + d);
            builder.line_to_point(e);
        }
    }
}

// A cubic offset is trusted when the tangent keeps turning the same way and
// the endpoint normals stay within 60 degrees of each other.
fn cubic_is_simple(curve: &Curve) -> bool {
    let pts = curve.points();

    let (t1, t2, t3) = match (
        tangent(pts[0], pts[1]),
        tangent(pts[1], pts[2]),
        tangent(pts[2], pts[3]),
    ) {
        (Some(t1), Some(t2), Some(t3)) => (t1, t2, t3),
        // A collapsed hull edge. Let the subdivision sort it out.
        _ => return false,
    };

    let a1 = angle_between(t1, t2);
    let a2 = angle_between(t2, t3);
    if (a1 < 0.0 && a2 > 0.0) || (a1 > 0.0 && a2 < 0.0) {
        return false;
    }

    let n1 = rotated_cw(t1);
    let n2 = rotated_cw(t3);
    let s = n1.dot(n2).bound(-1.0, 1.0);
    s.acos().abs() < FLOAT_PI / 3.0
}

fn conic_is_simple(curve: &Curve) -> bool {
    let pts = curve.points();

    let (n1, n2) = match (normal(pts[0], pts[1]), normal(pts[1], pts[2])) {
        (Some(n1), Some(n2)) => (n1, n2),
        _ => return false,
    };

    let s = n1.dot(n2).bound(-1.0, 1.0);
    s.acos().abs() < FLOAT_PI / 3.0
}

// The parameters inside (0, 1) where the signed curvature of the cubic is
// zero or at an extremum. After rotating the curve so its chord lies on the
// x axis, the curvature numerator reduces to the quadratic x*t^2 + y*t + z
// below; its roots and vertex are the interesting points.
fn cubic_curvature_points(curve: &Curve) -> ArrayVec<f32, 3> {
    let mut roots = ArrayVec::new();

    let pts = curve.points();
    let aligned = align_points(pts);

    let a = aligned[2].x * aligned[1].y;
    let b = aligned[3].x * aligned[1].y;
    let c = aligned[1].x * aligned[2].y;
    let d = aligned[3].x * aligned[2].y;

    let x = -3.0 * a + 2.0 * b + 3.0 * c - d;
    let y = 3.0 * a - b - 3.0 * c;
    let z = c - a;

    if x.abs() >= TOLERANCE {
        let t = -y / (2.0 * x);
        if 0.0 < t && t < 1.0 {
            roots.push(t);
        }

        let u2 = y * y - 4.0 * x * z;
        if u2 > TOLERANCE {
            let u = u2.sqrt();

            let t = (-y + u) / (2.0 * x);
            if 0.0 < t && t < 1.0 {
                roots.push(t);
            }

            let t = (-y - u) / (2.0 * x);
            if 0.0 < t && t < 1.0 {
                roots.push(t);
            }
        }
    }

    roots
}

// Rotates and translates the points so the first one sits at the origin and
// the last one on the positive x axis.
fn align_points(pts: &[Point]) -> [Point; 4] {
    debug_assert_eq!(pts.len(), 4);

    let origin = pts[0];
    let angle = -(pts[3].y - origin.y).atan2(pts[3].x - origin.x);
    let (sin, cos) = (angle.sin(), angle.cos());

    let mut out = [Point::zero(); 4];
    for (q, p) in out.iter_mut().zip(pts.iter()) {
        let dx = p.x - origin.x;
        let dy = p.y - origin.y;
        *q = Point::from_xy(dx * cos - dy * sin, dx * sin + dy * cos);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point {
        Point::from_xy(x, y)
    }

    #[test]
    fn simple_cubics() {
        // A shallow arch turns the tangent one way and keeps the endpoint
        // normals close together.
        let flat = Curve::cubic(pt(0.0, 0.0), pt(3.0, 1.0), pt(7.0, 1.0), pt(10.0, 0.0));
        assert!(cubic_is_simple(&flat));

        // A taller arch spreads the endpoint normals past 60 degrees.
        let tall = Curve::cubic(pt(0.0, 0.0), pt(3.0, 2.0), pt(7.0, 2.0), pt(10.0, 0.0));
        assert!(!cubic_is_simple(&tall));

        // An S-curve flips the tangent turn direction.
        let s_curve = Curve::cubic(pt(0.0, 0.0), pt(1.0, 2.0), pt(8.0, -2.0), pt(10.0, 0.0));
        assert!(!cubic_is_simple(&s_curve));
    }

    #[test]
    fn simple_conics() {
        let quarter = Curve::conic(
            pt(1.0, 0.0),
            pt(1.0, 1.0),
            pt(0.0, 1.0),
            crate::SCALAR_ROOT_2_OVER_2,
        );
        assert!(!conic_is_simple(&quarter));

        let eighth = Curve::conic(
            pt(1.0, 0.0),
            pt(1.0, 0.41421357),
            pt(0.70710678, 0.70710678),
            (FLOAT_PI / 8.0).cos(),
        );
        assert!(conic_is_simple(&eighth));
    }

    #[test]
    fn curvature_points_of_an_s_curve() {
        let s_curve = Curve::cubic(pt(0.0, 0.0), pt(1.0, 2.0), pt(8.0, -2.0), pt(10.0, 0.0));
        let roots = cubic_curvature_points(&s_curve);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 0.48747).abs() < 1e-3);
    }

    #[test]
    fn symmetric_s_has_degenerate_polynomial() {
        // The leading coefficient vanishes for a perfectly symmetric S;
        // the subdivision falls back to a midpoint split then.
        let s_curve = Curve::cubic(pt(0.0, 0.0), pt(2.0, 2.0), pt(8.0, -2.0), pt(10.0, 0.0));
        let roots = cubic_curvature_points(&s_curve);
        assert!(roots.is_empty());
    }

    #[test]
    fn align_rotates_chord_onto_x_axis() {
        let pts = [pt(1.0, 1.0), pt(2.0, 3.0), pt(4.0, 3.0), pt(5.0, 5.0)];
        let aligned = align_points(&pts);
        assert_eq!(aligned[0], pt(0.0, 0.0));
        assert!(aligned[3].y.abs() < 1e-5);
        assert!(aligned[3].x > 0.0);
    }
}
