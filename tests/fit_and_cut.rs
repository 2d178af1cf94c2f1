#![allow(clippy::unwrap_used)]

use std::f64::consts::PI;

use approx::assert_relative_eq;
use curvecut::fitting::{CurveFitter, FitParams};
use curvecut::geometry::{ArcSegment, Bezier, CurveDomain};
use curvecut::math::{Coord, Point2, PointN};
use curvecut::operations::{create_faces, ArrangementParams, CreateFaces};
use curvecut::tessellation::{FlattenCurve, FlattenParams};
use curvecut::topology::{CutLoop, Segment};

const SCALE: f64 = 1000.0;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Flattens `curves` and quantizes every piece, tagging it with the index of
/// the curve it came from.
fn cut_segments(curves: &[Bezier], tolerance: f64) -> Vec<Segment<usize>> {
    let params = FlattenParams {
        tolerance,
        ..FlattenParams::default()
    };
    curves
        .iter()
        .enumerate()
        .flat_map(|(i, curve)| {
            FlattenCurve::new(curve, params)
                .execute()
                .unwrap()
                .into_iter()
                .filter_map(move |piece| piece.quantize(SCALE, i))
        })
        .collect()
}

fn square(min: i64, max: i64, tag: u8) -> Vec<Segment<u8>> {
    let pts = [
        Coord::new(min, min),
        Coord::new(max, min),
        Coord::new(max, max),
        Coord::new(min, max),
    ];
    (0..4)
        .map(|i| Segment::new(pts[i], pts[(i + 1) % 4], CurveDomain::unit(), tag))
        .collect()
}

#[test]
fn fitted_circle_encloses_its_area() {
    init_tracing();
    let mut fitter = CurveFitter::new(FitParams {
        closed_loop: true,
        max_error: 0.05,
        ..FitParams::default()
    })
    .unwrap();
    for i in 0..48 {
        let a = f64::from(i) / 48.0 * 2.0 * PI;
        fitter.add_point(PointN::xy(10.0 * a.cos(), 10.0 * a.sin())).unwrap();
    }
    let curves = fitter.curves().to_vec();
    assert_eq!(curves.first().unwrap().start(), curves.last().unwrap().end());

    let loops = create_faces(&cut_segments(&curves, 1e-4)).unwrap();
    assert_eq!(loops.len(), 2);

    let outer = CutLoop::outer_boundary(&loops).unwrap();
    let inner = &loops[1 - outer];
    assert!(inner.is_ccw());
    assert_eq!(inner.twice_area(), -loops[outer].twice_area());
    assert_relative_eq!(inner.area() / (SCALE * SCALE), 100.0 * PI, max_relative = 0.02);
    assert!(inner.contains(0.0, 0.0));
    assert!(!inner.contains(11.0 * SCALE, 0.0));

    // Every piece remembers which fitted curve it came from.
    let tags: Vec<usize> = inner.edges().iter().filter_map(|e| e.data).collect();
    assert_eq!(tags.len(), inner.len());
    assert!(tags.iter().all(|&t| t < curves.len()));
}

#[test]
fn stroke_crossing_a_shape_is_cut_away() {
    init_tracing();
    let mut fitter = CurveFitter::new(FitParams {
        max_error: 0.01,
        ..FitParams::default()
    })
    .unwrap();
    for i in 0..=10 {
        fitter.add_point(PointN::xy(5.0, f64::from(i) * 2.0 - 5.0)).unwrap();
    }
    let stroke = fitter.curves().to_vec();
    assert_eq!(stroke.len(), 1);
    assert!(stroke[0].is_line());

    let mut segments: Vec<Segment<u8>> = square(0, 10_000, 0);
    segments.extend(
        cut_segments(&stroke, 1e-4)
            .into_iter()
            .map(|s| Segment::new(s.start, s.end, s.range, 1)),
    );

    let arrangement = CreateFaces::new(segments, ArrangementParams::default())
        .execute()
        .unwrap();
    assert_eq!(arrangement.stats().removed_collisions, 3);
    assert!(arrangement.loops().is_empty());
}

#[test]
fn nested_squares_form_an_annulus() {
    init_tracing();
    let mut segments = square(0, 10, 0);
    segments.extend(square(4, 6, 1));
    let arrangement = CreateFaces::new(segments, ArrangementParams::default())
        .execute()
        .unwrap();
    assert_eq!(arrangement.stats().connectors, 1);
    assert_eq!(arrangement.loops().len(), 3);

    let (v, e, c) = (
        arrangement.vertex_count(),
        arrangement.segment_count(),
        arrangement.component_count(),
    );
    assert_eq!(arrangement.loops().len() + v, e + c + 1);

    let mut loops = arrangement.into_loops();
    loops.sort_by(CutLoop::cmp_by_area);
    let areas: Vec<i128> = loops.iter().map(CutLoop::twice_area).collect();
    assert_eq!(areas, vec![-200, 192, 8]);

    let annulus = &loops[1];
    assert!(annulus.contains(2.0, 5.0));
    assert!(!annulus.contains(5.0, 5.0));
    assert!(loops[2].contains(5.0, 5.0));
    assert!(loops[0].bounding_box_contains(&loops[2]));
}

#[test]
fn flattened_arc_closes_a_half_disc() {
    init_tracing();
    let arc = ArcSegment::from_bulge(Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0), 1.0).unwrap();
    let mut segments: Vec<Segment<&str>> = FlattenCurve::new(
        &arc,
        FlattenParams {
            tolerance: 1e-4,
            ..FlattenParams::default()
        },
    )
    .execute()
    .unwrap()
    .into_iter()
    .filter_map(|piece| piece.quantize(SCALE, "arc"))
    .collect();
    let (start, end) = (segments[0].start, segments[segments.len() - 1].end);
    segments.push(Segment::new(end, start, CurveDomain::unit(), "chord"));

    let loops = create_faces(&segments).unwrap();
    assert_eq!(loops.len(), 2);
    let inner = loops.iter().find(|l| l.is_ccw()).unwrap();
    assert_relative_eq!(inner.area().abs() / (SCALE * SCALE), PI / 2.0, max_relative = 0.05);
    assert!(inner.edges().iter().any(|e| e.data == Some("chord")));
}
