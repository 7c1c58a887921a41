use pathstroke::{LineCap, LineJoin, Path, PathBuilder, PathSegment, PathVerb, Point, Stroke};

fn open_polyline(points: &[(f32, f32)]) -> Path {
    let mut pb = PathBuilder::new();
    pb.move_to(points[0].0, points[0].1);
    for p in &points[1..] {
        pb.line_to(p.0, p.1);
    }
    pb.finish().unwrap()
}

fn closed_polyline(points: &[(f32, f32)]) -> Path {
    let mut pb = PathBuilder::new();
    pb.move_to(points[0].0, points[0].1);
    for p in &points[1..] {
        pb.line_to(p.0, p.1);
    }
    pb.close();
    pb.finish().unwrap()
}

fn stroke_with(path: &Path, width: f32, cap: LineCap, join: LineJoin, miter_limit: f32) -> Path {
    let stroke = Stroke {
        width,
        miter_limit,
        line_cap: cap,
        line_join: join,
        dash: None,
    };
    path.stroke(&stroke).unwrap()
}

fn near(a: Point, b: Point, tolerance: f32) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}

fn contains_point(path: &Path, p: Point, tolerance: f32) -> bool {
    path.points().iter().any(|q| near(*q, p, tolerance))
}

fn count_subpaths(path: &Path) -> usize {
    path.verbs().iter().filter(|v| **v == PathVerb::Move).count()
}

// Every subpath must begin with a Move, end with a Close, and the point
// before the Close must coincide with the Move point.
fn assert_all_subpaths_closed(path: &Path) {
    let mut contour_start = None;
    let mut last_point = Point::zero();
    let mut last_was_close = true;

    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                assert!(last_was_close, "subpath without a Close");
                contour_start = Some(p);
                last_point = p;
                last_was_close = false;
            }
            PathSegment::LineTo(p) => {
                last_point = p;
                last_was_close = false;
            }
            PathSegment::CubicTo(_, _, p) | PathSegment::ConicTo(_, p, _) => {
                last_point = p;
                last_was_close = false;
            }
            PathSegment::Close => {
                let start = contour_start.expect("Close without a Move");
                assert!(
                    near(last_point, start, 1e-3),
                    "contour does not close: {:?} vs {:?}",
                    last_point,
                    start
                );
                last_was_close = true;
            }
        }
    }

    assert!(last_was_close, "trailing subpath without a Close");
}

fn assert_segments_near(path: &Path, expected: &[PathSegment]) {
    let segments: Vec<_> = path.segments().collect();
    assert_eq!(segments.len(), expected.len(), "got {:?}", path);

    for (seg, exp) in segments.iter().zip(expected.iter()) {
        let ok = match (seg, exp) {
            (PathSegment::MoveTo(a), PathSegment::MoveTo(b)) => near(*a, *b, 1e-4),
            (PathSegment::LineTo(a), PathSegment::LineTo(b)) => near(*a, *b, 1e-4),
            (PathSegment::CubicTo(a1, a2, a3), PathSegment::CubicTo(b1, b2, b3)) => {
                near(*a1, *b1, 1e-4) && near(*a2, *b2, 1e-4) && near(*a3, *b3, 1e-4)
            }
            (PathSegment::ConicTo(a1, a2, aw), PathSegment::ConicTo(b1, b2, bw)) => {
                near(*a1, *b1, 1e-4) && near(*a2, *b2, 1e-4) && (aw - bw).abs() < 1e-4
            }
            (PathSegment::Close, PathSegment::Close) => true,
            _ => false,
        };
        assert!(ok, "mismatch: {:?} vs {:?} in {:?}", seg, exp, path);
    }
}

fn pt(x: f32, y: f32) -> Point {
    Point::from_xy(x, y)
}

#[test]
fn single_line_butt_cap() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);

    assert_segments_near(
        &outline,
        &[
            PathSegment::MoveTo(pt(0.0, -1.0)),
            PathSegment::LineTo(pt(10.0, -1.0)),
            PathSegment::LineTo(pt(10.0, 1.0)),
            PathSegment::LineTo(pt(0.0, 1.0)),
            PathSegment::LineTo(pt(0.0, -1.0)),
            PathSegment::Close,
        ],
    );
}

#[test]
fn single_line_round_cap() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Round, LineJoin::Miter, 10.0);

    // A stadium: the rectangle sides plus semicircular caps, two conic
    // quarter arcs each.
    assert_eq!(
        outline.verbs(),
        &[
            PathVerb::Move,
            PathVerb::Line,
            PathVerb::Conic,
            PathVerb::Conic,
            PathVerb::Line,
            PathVerb::Conic,
            PathVerb::Conic,
            PathVerb::Close,
        ]
    );

    // The caps bulge outward by the half width.
    assert!(contains_point(&outline, pt(11.0, 0.0), 1e-3));
    assert!(contains_point(&outline, pt(-1.0, 0.0), 1e-3));

    for weight in outline.weights() {
        assert!((weight - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
    }

    assert_all_subpaths_closed(&outline);
}

#[test]
fn single_line_square_cap() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Square, LineJoin::Miter, 10.0);

    assert_segments_near(
        &outline,
        &[
            PathSegment::MoveTo(pt(0.0, -1.0)),
            PathSegment::LineTo(pt(10.0, -1.0)),
            PathSegment::LineTo(pt(11.0, -1.0)),
            PathSegment::LineTo(pt(11.0, 1.0)),
            PathSegment::LineTo(pt(10.0, 1.0)),
            PathSegment::LineTo(pt(0.0, 1.0)),
            PathSegment::LineTo(pt(-1.0, 1.0)),
            PathSegment::LineTo(pt(-1.0, -1.0)),
            PathSegment::LineTo(pt(0.0, -1.0)),
            PathSegment::Close,
        ],
    );
}

#[test]
fn l_bend_miter_join() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);

    assert_segments_near(
        &outline,
        &[
            PathSegment::MoveTo(pt(10.0, -1.0)),
            // The miter apex on the outer side of the turn.
            PathSegment::LineTo(pt(11.0, -1.0)),
            PathSegment::LineTo(pt(11.0, 0.0)),
            PathSegment::LineTo(pt(11.0, 10.0)),
            PathSegment::LineTo(pt(9.0, 10.0)),
            // The trimmed inner corner.
            PathSegment::LineTo(pt(9.0, 1.0)),
            PathSegment::LineTo(pt(0.0, 1.0)),
            PathSegment::LineTo(pt(0.0, -1.0)),
            PathSegment::LineTo(pt(10.0, -1.0)),
            PathSegment::Close,
        ],
    );
}

#[test]
fn l_bend_bevel_join() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Bevel, 10.0);

    // No miter apex; the outer corner is cut straight from (10,-1) to (11,0).
    assert!(!contains_point(&outline, pt(11.0, -1.0), 1e-3));
    assert!(contains_point(&outline, pt(11.0, 0.0), 1e-3));
    assert!(contains_point(&outline, pt(9.0, 1.0), 1e-3));
    assert_all_subpaths_closed(&outline);
}

#[test]
fn l_bend_round_join() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Round, 10.0);

    assert!(outline.verbs().contains(&PathVerb::Conic));
    // The arc control point sits at the outer corner of the turn.
    assert!(contains_point(&outline, pt(11.0, -1.0), 1e-3));
    assert_all_subpaths_closed(&outline);
}

#[test]
fn sharp_spike_exceeds_miter_limit() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.1)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 4.0);

    // The miter length factor at the spike is ~200, far above the limit,
    // so the corner must fall back to a bevel: two distinct outer vertices
    // and no faraway apex.
    for p in outline.points() {
        assert!(p.x < 12.5, "unexpected miter apex at {:?}", p);
    }
    assert_eq!(count_subpaths(&outline), 1);
    assert_all_subpaths_closed(&outline);
}

#[test]
fn sharp_spike_within_huge_miter_limit() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.1)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 300.0);

    // With a large enough limit the apex is kept, far away from the spike.
    assert!(outline.points().iter().any(|p| p.x > 100.0));
}

#[test]
fn sharp_spike_miter_clip() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.1)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::MiterClip, 4.0);

    // The clip runs through the midpoint between the corner and the apex,
    // so the outline reaches about half way to the apex (~x=110) and is cut
    // flat there.
    let max_x = outline
        .points()
        .iter()
        .map(|p| p.x)
        .fold(f32::MIN, f32::max);
    assert!(max_x > 50.0 && max_x < 150.0, "clip at x={}", max_x);
    assert_all_subpaths_closed(&outline);
}

#[test]
fn closed_triangle_has_two_outlines() {
    let path = closed_polyline(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);

    assert_eq!(count_subpaths(&outline), 2);
    assert_all_subpaths_closed(&outline);

    // The outer outline is larger than the source triangle, the inner one
    // smaller.
    let bounds = outline.bounds();
    assert!(bounds.left() < -0.9);
    assert!(bounds.bottom() > 9.0);
    // The inner corner under the apex: the apex angle is ~64 degrees, so the
    // trimmed offsets meet 1/sin(32 deg) below it on the bisector.
    assert!(contains_point(&outline, pt(5.0, 8.0 - 1.887), 0.01));
}

#[test]
fn closed_square_outlines() {
    let path = closed_polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);

    assert_eq!(count_subpaths(&outline), 2);
    assert_all_subpaths_closed(&outline);

    // Outer miter corners.
    for p in &[
        pt(11.0, -1.0),
        pt(11.0, 11.0),
        pt(-1.0, 11.0),
        pt(-1.0, -1.0),
    ] {
        assert!(contains_point(&outline, *p, 1e-3), "missing {:?}", p);
    }

    // Inner trimmed corners.
    for p in &[pt(9.0, 1.0), pt(9.0, 9.0), pt(1.0, 9.0), pt(1.0, 1.0)] {
        assert!(contains_point(&outline, *p, 1e-3), "missing {:?}", p);
    }
}

#[test]
fn collinear_segments_join_smoothly() {
    let path = open_polyline(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);

    // Just the 10x2 rectangle, possibly with redundant vertices on the
    // long edges.
    let bounds = outline.bounds();
    assert_eq!(count_subpaths(&outline), 1);
    assert!((bounds.left() - 0.0).abs() < 1e-4);
    assert!((bounds.right() - 10.0).abs() < 1e-4);
    assert!((bounds.top() + 1.0).abs() < 1e-4);
    assert!((bounds.bottom() - 1.0).abs() < 1e-4);
    assert_all_subpaths_closed(&outline);
}

#[test]
fn stroked_circle_is_an_annulus() {
    let mut pb = PathBuilder::new();
    pb.push_circle(0.0, 0.0, 10.0);
    let path = pb.finish().unwrap();

    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);

    assert_eq!(count_subpaths(&outline), 2);
    assert_all_subpaths_closed(&outline);

    // The outer ring has radius 11, the inner one radius 9.
    let bounds = outline.bounds();
    assert!((bounds.left() + 11.0).abs() < 0.1);
    assert!((bounds.right() - 11.0).abs() < 0.1);

    let mut min_radius = f32::MAX;
    let mut max_radius = f32::MIN;
    for segment in outline.segments() {
        if let PathSegment::ConicTo(_, p, _) = segment {
            min_radius = min_radius.min(p.length());
            max_radius = max_radius.max(p.length());
        }
    }
    assert!((min_radius - 9.0).abs() < 0.1, "inner {}", min_radius);
    assert!((max_radius - 11.0).abs() < 0.1, "outer {}", max_radius);
}

#[test]
fn cubic_offset_endpoints_are_exact() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.cubic_to(10.0, 5.0, 20.0, 5.0, 30.0, 0.0);
    let path = pb.finish().unwrap();

    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);

    // The offset endpoints sit exactly at start/end +- half_width along the
    // endpoint normals. Start tangent is (2,1)/sqrt(5), so its normal is
    // (-1,2)/sqrt(5).
    let inv_sqrt5 = 1.0 / 5.0f32.sqrt();
    let n_start = pt(-inv_sqrt5, 2.0 * inv_sqrt5);
    let n_end = pt(inv_sqrt5, 2.0 * inv_sqrt5);

    assert!(contains_point(&outline, n_start, 1e-3));
    assert!(contains_point(&outline, pt(-n_start.x, -n_start.y), 1e-3));
    assert!(contains_point(&outline, pt(30.0 + n_end.x, n_end.y), 1e-3));
    assert!(contains_point(&outline, pt(30.0 - n_end.x, -n_end.y), 1e-3));
    assert_all_subpaths_closed(&outline);
}

#[test]
fn reversed_path_covers_the_same_region() {
    let forward = open_polyline(&[(0.0, 0.0), (10.0, 0.0)]);
    let backward = open_polyline(&[(10.0, 0.0), (0.0, 0.0)]);

    let a = stroke_with(&forward, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);
    let b = stroke_with(&backward, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);

    // Both outlines are the same rectangle, possibly traversed differently.
    for corner in &[pt(0.0, -1.0), pt(10.0, -1.0), pt(10.0, 1.0), pt(0.0, 1.0)] {
        assert!(contains_point(&a, *corner, 1e-3));
        assert!(contains_point(&b, *corner, 1e-3));
    }
    assert_eq!(a.bounds(), b.bounds());
}

#[test]
fn width_commutes_with_scaling() {
    let small = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let big = open_polyline(&[(0.0, 0.0), (30.0, 0.0), (30.0, 30.0)]);

    let a = stroke_with(&small, 2.0, LineCap::Square, LineJoin::Miter, 10.0);
    let b = stroke_with(&big, 6.0, LineCap::Square, LineJoin::Miter, 10.0);

    assert_eq!(a.verbs(), b.verbs());
    for (p, q) in a.points().iter().zip(b.points().iter()) {
        assert!(near(pt(p.x * 3.0, p.y * 3.0), *q, 1e-2), "{:?} vs {:?}", p, q);
    }
}

#[test]
fn join_choice_is_local_to_the_corner() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let corner = pt(10.0, 0.0);
    let miter_limit = 4.0;
    let half_width = 1.0;

    let round = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Round, miter_limit);
    let bevel = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Bevel, miter_limit);

    // Points present in one outline but not the other may only appear near
    // the corner.
    let mut all = round.points().to_vec();
    all.extend_from_slice(bevel.points());
    for p in all {
        let in_round = contains_point(&round, p, 1e-3);
        let in_bevel = contains_point(&bevel, p, 1e-3);
        if in_round != in_bevel {
            assert!(
                p.distance(corner) <= miter_limit * half_width,
                "non-local join difference at {:?}",
                p
            );
        }
    }
}

#[test]
fn two_contours_give_two_outlines() {
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(10.0, 0.0);
    pb.move_to(0.0, 10.0);
    pb.line_to(10.0, 10.0);
    let path = pb.finish().unwrap();

    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 10.0);
    assert_eq!(count_subpaths(&outline), 2);
    assert_all_subpaths_closed(&outline);
}

#[test]
fn zero_length_contour_round_cap_is_a_dot() {
    let mut pb = PathBuilder::new();
    pb.move_to(5.0, 5.0);
    pb.line_to(5.0, 5.0);
    let path = pb.finish().unwrap();

    let outline = stroke_with(&path, 2.0, LineCap::Round, LineJoin::Miter, 10.0);

    // The degenerate segment is skipped; the caps alone form a circle of
    // the half width around the point.
    let bounds = outline.bounds();
    assert!((bounds.left() - 4.0).abs() < 1e-3);
    assert!((bounds.right() - 6.0).abs() < 1e-3);
    assert!((bounds.top() - 4.0).abs() < 1e-3);
    assert!((bounds.bottom() - 6.0).abs() < 1e-3);
    assert_all_subpaths_closed(&outline);
}

#[test]
fn invalid_width_is_rejected() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0)]);

    let mut stroke = Stroke::default();
    stroke.width = 0.0;
    assert!(path.stroke(&stroke).is_none());

    stroke.width = -1.0;
    assert!(path.stroke(&stroke).is_none());

    stroke.width = f32::NAN;
    assert!(path.stroke(&stroke).is_none());
}

#[test]
fn miter_limit_below_one_behaves_like_bevel() {
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Butt, LineJoin::Miter, 0.5);

    // A right angle needs a factor of sqrt(2), which a limit of one cannot
    // provide, so the apex is cut.
    assert!(!contains_point(&outline, pt(11.0, -1.0), 1e-3));
    assert_all_subpaths_closed(&outline);
}

#[test]
fn stroking_a_stroke_output_works() {
    // The stroker's own output is a valid path and can be stroked again.
    let path = open_polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let outline = stroke_with(&path, 2.0, LineCap::Round, LineJoin::Round, 4.0);
    let again = stroke_with(&outline, 0.5, LineCap::Butt, LineJoin::Miter, 4.0);

    assert!(count_subpaths(&again) >= 2);
    assert_all_subpaths_closed(&again);
}
