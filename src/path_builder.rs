// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use crate::curve::{Curve, TOLERANCE};
use crate::floating_point::FLOAT_PI;
use crate::path::PathVerb;
use crate::scalar::{Scalar, SCALAR_ROOT_2_OVER_2};
use crate::{Path, Point, Rect};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

/// A path builder.
///
/// This is also the sink the stroker writes its outline into: it accepts
/// moves, lines, cubics, conics and SVG-style elliptical arcs, where arcs
/// are lowered to conic segments on the fly.
#[derive(Clone, Default, Debug)]
pub struct PathBuilder {
    pub(crate) verbs: Vec<PathVerb>,
    pub(crate) points: Vec<Point>,
    pub(crate) weights: Vec<f32>,
    pub(crate) last_move_to_index: usize,
    pub(crate) move_to_required: bool,
}

impl PathBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        PathBuilder {
            verbs: Vec::new(),
            points: Vec::new(),
            weights: Vec::new(),
            last_move_to_index: 0,
            move_to_required: true,
        }
    }

    /// Creates a new builder with a specified capacity.
    ///
    /// Number of points depends on a verb type:
    ///
    /// - Move - 1
    /// - Line - 1
    /// - Cubic - 3
    /// - Conic - 2
    /// - Close - 0
    pub fn with_capacity(verbs_capacity: usize, points_capacity: usize) -> Self {
        PathBuilder {
            verbs: Vec::with_capacity(verbs_capacity),
            points: Vec::with_capacity(points_capacity),
            weights: Vec::new(),
            last_move_to_index: 0,
            move_to_required: true,
        }
    }

    pub(crate) fn reserve(&mut self, additional_verbs: usize, additional_points: usize) {
        self.verbs.reserve(additional_verbs);
        self.points.reserve(additional_points);
    }

    /// Returns the current number of segments in the builder.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Checks if the builder has any segments added.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Adds beginning of a contour.
    ///
    /// Multiple continuous MoveTo segments are not allowed.
    /// If the previous segment was also MoveTo, it will be overwritten with the current one.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if let Some(PathVerb::Move) = self.verbs.last() {
            let last_idx = self.points.len() - 1;
            self.points[last_idx] = Point::from_xy(x, y);
        } else {
            self.last_move_to_index = self.points.len();
            self.move_to_required = false;

            self.verbs.push(PathVerb::Move);
            self.points.push(Point::from_xy(x, y));
        }
    }

    pub(crate) fn move_to_point(&mut self, pt: Point) {
        self.move_to(pt.x, pt.y);
    }

    fn inject_move_to_if_needed(&mut self) {
        if self.move_to_required {
            match self.points.get(self.last_move_to_index).cloned() {
                Some(p) => self.move_to(p.x, p.y),
                None => self.move_to(0.0, 0.0),
            }
        }
    }

    /// Adds a line from the last point.
    ///
    /// - If `Path` is empty - adds Move(0, 0) first.
    /// - If `Path` ends with Close - adds Move(last_x, last_y) first.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Line);
        self.points.push(Point::from_xy(x, y));
    }

    pub(crate) fn line_to_point(&mut self, pt: Point) {
        self.line_to(pt.x, pt.y);
    }

    /// Adds a cubic curve from the last point to `x`, `y`.
    ///
    /// - If `Path` is empty - adds Move(0, 0) first.
    /// - If `Path` ends with Close - adds Move(last_x, last_y) first.
    pub fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Cubic);
        self.points.push(Point::from_xy(x1, y1));
        self.points.push(Point::from_xy(x2, y2));
        self.points.push(Point::from_xy(x, y));
    }

    pub(crate) fn cubic_to_pt(&mut self, p1: Point, p2: Point, p: Point) {
        self.cubic_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y);
    }

    /// Adds a conic (rational quadratic) curve from the last point to `x`, `y`.
    ///
    /// A conic with a non-positive or non-finite weight degenerates into lines.
    ///
    /// - If `Path` is empty - adds Move(0, 0) first.
    /// - If `Path` ends with Close - adds Move(last_x, last_y) first.
    pub fn conic_to(&mut self, x1: f32, y1: f32, x: f32, y: f32, weight: f32) {
        // check for <= 0 or NaN with this test
        if !(weight > 0.0) {
            self.line_to(x, y);
        } else if !weight.is_finite() {
            self.line_to(x1, y1);
            self.line_to(x, y);
        } else {
            self.inject_move_to_if_needed();

            self.verbs.push(PathVerb::Conic);
            self.points.push(Point::from_xy(x1, y1));
            self.points.push(Point::from_xy(x, y));
            self.weights.push(weight);
        }
    }

    pub(crate) fn conic_points_to(&mut self, pt1: Point, pt2: Point, weight: f32) {
        self.conic_to(pt1.x, pt1.y, pt2.x, pt2.y, weight);
    }

    /// Adds an SVG-style elliptical arc from the last point to `x`, `y`.
    ///
    /// `rx`/`ry` are the ellipse radii, `x_axis_rotation` is in degrees,
    /// `large_arc` and `sweep` follow the SVG arc flags. The arc is lowered
    /// into conic segments of at most 90 degrees each, so the resulting path
    /// still contains only line/cubic/conic verbs.
    ///
    /// Out-of-range parameters are handled the way the SVG spec prescribes:
    /// radii are taken by absolute value and scaled up when too small, and a
    /// degenerate arc becomes a line.
    pub fn svg_arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    ) {
        self.inject_move_to_if_needed();

        let start = match self.last_point() {
            Some(p) => p,
            None => return,
        };
        let end = Point::from_xy(x, y);

        let mut rx = rx.abs();
        let mut ry = ry.abs();
        if !rx.is_finite()
            || !ry.is_finite()
            || !x_axis_rotation.is_finite()
            || !end.is_finite()
            || rx.is_nearly_zero()
            || ry.is_nearly_zero()
            || start.equals_within_tolerance(end, TOLERANCE)
        {
            self.line_to(x, y);
            return;
        }

        let phi = x_axis_rotation * FLOAT_PI / 180.0;
        let cos_phi = phi.cos();
        let sin_phi = phi.sin();

        // Map the endpoints into the coordinate space of the unrotated ellipse.
        let dx = (start.x - end.x).half();
        let dy = (start.y - end.y).half();
        let x1p = cos_phi * dx + sin_phi * dy;
        let y1p = -sin_phi * dx + cos_phi * dy;

        // Scale the radii up when they cannot span the endpoints.
        let lambda = x1p.sqr() / rx.sqr() + y1p.sqr() / ry.sqr();
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let rx_sq = rx.sqr();
        let ry_sq = ry.sqr();
        let den = rx_sq * y1p.sqr() + ry_sq * x1p.sqr();
        let num = rx_sq * ry_sq - den;
        let radicand = (num / den).max(0.0);
        let mut coef = radicand.sqrt();
        if large_arc == sweep {
            coef = -coef;
        }

        let cxp = coef * (rx * y1p / ry);
        let cyp = -coef * (ry * x1p / rx);
        let cx = cos_phi * cxp - sin_phi * cyp + (start.x + end.x).half();
        let cy = sin_phi * cxp + cos_phi * cyp + (start.y + end.y).half();

        let theta1 = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
        let theta2 = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx);
        let mut delta = theta2 - theta1;
        if !sweep && delta > 0.0 {
            delta -= 2.0 * FLOAT_PI;
        } else if sweep && delta < 0.0 {
            delta += 2.0 * FLOAT_PI;
        }

        if delta.is_nearly_zero() {
            self.line_to(x, y);
            return;
        }

        // One conic can represent at most a quarter turn accurately.
        let n_segments = (delta.abs() / (FLOAT_PI * 0.5)).ceil() as usize;
        let n_segments = n_segments.max(1);
        let step = delta / n_segments as f32;
        let weight = (step.half()).cos();

        let map = |a: f32, scale: f32| -> Point {
            let ux = rx * a.cos() * scale;
            let uy = ry * a.sin() * scale;
            Point::from_xy(
                cx + cos_phi * ux - sin_phi * uy,
                cy + sin_phi * ux + cos_phi * uy,
            )
        };

        for i in 0..n_segments {
            let a1 = theta1 + step * i as f32;
            let mid = a1 + step.half();
            let ctrl = map(mid, weight.invert());
            let seg_end = map(a1 + step, 1.0);
            self.conic_points_to(ctrl, seg_end, weight);
        }

        // Arc math accumulates rounding errors. Land exactly on the endpoint.
        self.set_last_point(end);
    }

    /// Appends the curve, assuming the current point is the curve's start point.
    pub(crate) fn append_curve(&mut self, curve: &Curve) {
        match curve {
            Curve::Line(pts) => self.line_to_point(pts[1]),
            Curve::Cubic(pts) => self.cubic_to_pt(pts[1], pts[2], pts[3]),
            Curve::Conic { points, weight } => {
                self.conic_points_to(points[1], points[2], *weight)
            }
        }
    }

    /// Closes the current contour.
    ///
    /// A closed contour connects the first and the last Point
    /// with a line, forming a continuous loop.
    ///
    /// Does nothing when `Path` is empty or already closed.
    ///
    /// Open and closed contour will be filled the same way.
    /// Stroking an open contour will add LineCap at contour's start and end.
    /// Stroking an closed contour will add LineJoin at contour's start and end.
    pub fn close(&mut self) {
        // don't add a close if it's the first verb or a repeat
        if !self.verbs.is_empty() {
            if self.verbs.last().cloned() != Some(PathVerb::Close) {
                self.verbs.push(PathVerb::Close);
            }
        }

        self.move_to_required = true;
    }

    /// Returns the last point if any.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().cloned()
    }

    pub(crate) fn set_last_point(&mut self, pt: Point) {
        match self.points.last_mut() {
            Some(last) => *last = pt,
            None => self.move_to(pt.x, pt.y),
        }
    }

    /// Adds a rectangle contour.
    ///
    /// The contour is closed and has a clock-wise direction.
    pub fn push_rect(&mut self, rect: Rect) {
        self.move_to(rect.left(), rect.top());
        self.line_to(rect.right(), rect.top());
        self.line_to(rect.right(), rect.bottom());
        self.line_to(rect.left(), rect.bottom());
        self.close();
    }

    /// Adds an oval contour bounded by the provided rectangle.
    ///
    /// The contour is closed and has a clock-wise direction.
    /// It is built out of four conic quadrants, which represent the oval exactly.
    pub fn push_oval(&mut self, oval: Rect) {
        let cx = oval.left().half() + oval.right().half();
        let cy = oval.top().half() + oval.bottom().half();

        let oval_points = [
            Point::from_xy(cx, oval.bottom()),
            Point::from_xy(oval.left(), cy),
            Point::from_xy(cx, oval.top()),
            Point::from_xy(oval.right(), cy),
        ];

        let rect_points = [
            Point::from_xy(oval.right(), oval.bottom()),
            Point::from_xy(oval.left(), oval.bottom()),
            Point::from_xy(oval.left(), oval.top()),
            Point::from_xy(oval.right(), oval.top()),
        ];

        let weight = SCALAR_ROOT_2_OVER_2;
        self.move_to(oval_points[3].x, oval_points[3].y);
        for (p1, p2) in rect_points.iter().zip(oval_points.iter()) {
            self.conic_points_to(*p1, *p2, weight);
        }
        self.close();
    }

    /// Adds a circle contour.
    ///
    /// The contour is closed and has a clock-wise direction.
    ///
    /// Does nothing when:
    /// - `radius` <= 0
    /// - any value is not finite or really large
    pub fn push_circle(&mut self, x: f32, y: f32, r: f32) {
        if let Some(rect) = Rect::from_xywh(x - r, y - r, r + r, r + r) {
            if rect.width() > 0.0 {
                self.push_oval(rect);
            }
        }
    }

    pub(crate) fn push_path(&mut self, other: &PathBuilder) {
        if other.is_empty() {
            return;
        }

        if self.last_move_to_index != 0 {
            self.last_move_to_index = self.points.len() + other.last_move_to_index;
        }

        self.verbs.extend_from_slice(&other.verbs);
        self.points.extend_from_slice(&other.points);
        self.weights.extend_from_slice(&other.weights);
    }

    /// Appends, in a reverse order, the first contour of path ignoring path's last point.
    ///
    /// Each segment is appended with its internal control order reversed,
    /// so the geometry is retraced exactly.
    pub(crate) fn reverse_path_to(&mut self, other: &PathBuilder) {
        if other.is_empty() {
            return;
        }

        debug_assert_eq!(other.verbs[0], PathVerb::Move);

        let mut points_offset = other.points.len() - 1;
        let mut weights_offset = other.weights.len();
        for verb in other.verbs.iter().rev() {
            match verb {
                PathVerb::Move => {
                    // if the path has multiple contours, stop after reversing the last
                    break;
                }
                PathVerb::Line => {
                    // We're moving one point back manually, to prevent points_offset overflow.
                    let pt = other.points[points_offset - 1];
                    points_offset -= 1;
                    self.line_to(pt.x, pt.y);
                }
                PathVerb::Cubic => {
                    let pt1 = other.points[points_offset - 1];
                    let pt2 = other.points[points_offset - 2];
                    let pt3 = other.points[points_offset - 3];
                    points_offset -= 3;
                    self.cubic_to(pt1.x, pt1.y, pt2.x, pt2.y, pt3.x, pt3.y);
                }
                PathVerb::Conic => {
                    let ctrl = other.points[points_offset - 1];
                    let pt = other.points[points_offset - 2];
                    points_offset -= 2;
                    weights_offset -= 1;
                    self.conic_to(ctrl.x, ctrl.y, pt.x, pt.y, other.weights[weights_offset]);
                }
                PathVerb::Close => {}
            }
        }
    }

    /// Reset the builder.
    ///
    /// Memory is not deallocated.
    pub fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
        self.weights.clear();
        self.last_move_to_index = 0;
        self.move_to_required = true;
    }

    /// Finishes the builder and returns a `Path`.
    ///
    /// Returns `None` when `Path` is empty or has invalid bounds.
    pub fn finish(self) -> Option<Path> {
        if self.is_empty() {
            return None;
        }

        // Just a move to? Bail.
        if self.verbs.len() == 1 {
            return None;
        }

        let bounds = Rect::from_points(&self.points)?;

        Some(Path {
            bounds,
            verbs: self.verbs,
            points: self.points,
            weights: self.weights,
        })
    }
}
