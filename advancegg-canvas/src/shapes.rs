//! Canonical shape generators.
//!
//! Curved shapes are emitted as cubic Bézier segments rather than polygons so
//! they stay accurate under any later transform. Each elliptical arc is split
//! into enough segments that the radial error of the approximation stays
//! below [`MAX_ARC_ERROR`] device pixels (never fewer than one segment per
//! quarter turn).

use crate::path::PathSink;
use kurbo::Point;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Largest allowed deviation, in pixels, between a true arc and its cubic approximation.
pub const MAX_ARC_ERROR: f64 = 0.5;

/// Relative radial error of a cubic approximating a quarter circle.
const QUARTER_ARC_ERROR: f64 = 2.7253e-4;

/// Rectangle as a closed subpath of four edges.
pub fn rectangle(sink: &mut impl PathSink, x: f64, y: f64, width: f64, height: f64) {
    sink.move_to(Point::new(x, y));
    sink.line_to(Point::new(x + width, y));
    sink.line_to(Point::new(x + width, y + height));
    sink.line_to(Point::new(x, y + height));
    sink.close();
}

/// Rounded rectangle: four edges joined by quarter-circle corners.
///
/// The radius is clamped to half the smaller side.
pub fn rounded_rectangle(
    sink: &mut impl PathSink,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
) {
    let r = radius.max(0.0).min(width.abs().min(height.abs()) / 2.0);
    if r <= 0.0 {
        rectangle(sink, x, y, width, height);
        return;
    }
    let (x0, x1, x2, x3) = (x, x + r, x + width - r, x + width);
    let (y0, y1, y2, y3) = (y, y + r, y + height - r, y + height);
    sink.move_to(Point::new(x1, y0));
    sink.line_to(Point::new(x2, y0));
    arc_segments(sink, Point::new(x2, y1), r, r, -FRAC_PI_2, 0.0);
    sink.line_to(Point::new(x3, y2));
    arc_segments(sink, Point::new(x2, y2), r, r, 0.0, FRAC_PI_2);
    sink.line_to(Point::new(x1, y3));
    arc_segments(sink, Point::new(x1, y2), r, r, FRAC_PI_2, PI);
    sink.line_to(Point::new(x0, y1));
    arc_segments(sink, Point::new(x1, y1), r, r, PI, PI + FRAC_PI_2);
    sink.close();
}

/// Full ellipse as a closed subpath.
pub fn ellipse(sink: &mut impl PathSink, cx: f64, cy: f64, rx: f64, ry: f64) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    sink.move_to(Point::new(cx + rx, cy));
    arc_segments(sink, Point::new(cx, cy), rx, ry, 0.0, TAU);
    sink.close();
}

/// Full circle as a closed subpath.
pub fn circle(sink: &mut impl PathSink, cx: f64, cy: f64, r: f64) {
    ellipse(sink, cx, cy, r, r);
}

/// Open elliptical arc from `angle1` to `angle2` (radians, clockwise on screen).
///
/// Angles must be finite; sweeps longer than a full turn draw one full turn.
/// Connects to the current point with a line when one exists, otherwise the
/// arc starts a new subpath.
pub fn elliptical_arc(
    sink: &mut impl PathSink,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    angle1: f64,
    angle2: f64,
) {
    if rx <= 0.0 || ry <= 0.0 || !angle1.is_finite() || !angle2.is_finite() {
        return;
    }
    let start = Point::new(cx + rx * angle1.cos(), cy + ry * angle1.sin());
    if sink.has_current_point() {
        sink.line_to(start);
    } else {
        sink.move_to(start);
    }
    arc_segments(sink, Point::new(cx, cy), rx, ry, angle1, angle2);
}

/// Line segment as a single open subpath.
pub fn line(sink: &mut impl PathSink, x1: f64, y1: f64, x2: f64, y2: f64) {
    sink.move_to(Point::new(x1, y1));
    sink.line_to(Point::new(x2, y2));
}

/// Regular polygon with `n` vertices on a circle of radius `r`.
///
/// Odd polygons point up; even ones sit on a flat bottom edge.
pub fn regular_polygon(sink: &mut impl PathSink, n: u32, cx: f64, cy: f64, r: f64, rotation: f64) {
    if n < 3 || r <= 0.0 {
        return;
    }
    let step = TAU / n as f64;
    let mut rotation = rotation - FRAC_PI_2;
    if n % 2 == 0 {
        rotation += step / 2.0;
    }
    for i in 0..n {
        let a = rotation + step * i as f64;
        let p = Point::new(cx + r * a.cos(), cy + r * a.sin());
        if i == 0 {
            sink.move_to(p);
        } else {
            sink.line_to(p);
        }
    }
    sink.close();
}

/// Upper bound on the cubic segments emitted for one arc.
const MAX_ARC_SEGMENTS: usize = 1024;

/// Number of cubic segments needed for an arc spanning `span` radians.
///
/// Spans beyond a full turn are treated as a full turn.
pub(crate) fn arc_segment_count(max_radius: f64, span: f64) -> usize {
    let span = if span.is_finite() { span.abs().min(TAU) } else { TAU };
    let mut count = ((span / FRAC_PI_2).ceil() as usize).clamp(1, 4);
    // Error shrinks with the sixth power of the segment angle.
    let mut error = max_radius * QUARTER_ARC_ERROR * (span / count as f64 / FRAC_PI_2).powi(6);
    while error > MAX_ARC_ERROR && count < MAX_ARC_SEGMENTS {
        count *= 2;
        error /= 64.0;
    }
    count
}

/// Append cubic segments for an arc; the current point must already be the arc start.
///
/// The sweep is clamped to one full turn in either direction, since a longer
/// arc only retraces the same ellipse.
fn arc_segments(sink: &mut impl PathSink, c: Point, rx: f64, ry: f64, angle1: f64, angle2: f64) {
    let span = (angle2 - angle1).clamp(-TAU, TAU);
    let count = arc_segment_count(rx.max(ry), span);
    let step = span / count as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    for i in 0..count {
        let a1 = angle1 + step * i as f64;
        let a2 = a1 + step;
        let (s1, c1) = a1.sin_cos();
        let (s2, c2) = a2.sin_cos();
        let ctrl1 = Point::new(c.x + rx * (c1 - k * s1), c.y + ry * (s1 + k * c1));
        let ctrl2 = Point::new(c.x + rx * (c2 + k * s2), c.y + ry * (s2 - k * c2));
        let end = Point::new(c.x + rx * c2, c.y + ry * s2);
        sink.curve_to(ctrl1, ctrl2, end);
    }
}
