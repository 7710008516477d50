//! Stroke outlining and dash splitting.
//!
//! A stroke is turned into a closed outline by kurbo and then filled with
//! the same nonzero scan converter as ordinary fills.

use crate::style::StrokeStyle;
use kurbo::{BezPath, PathEl, Point, StrokeOpts};

/// Outline of `path` stroked with `style`, ready for a nonzero fill.
pub(crate) fn stroke_outline(path: &BezPath, style: &StrokeStyle, tolerance: f64) -> BezPath {
    let kurbo_style = kurbo::Stroke::new(style.width)
        .with_join(style.join.into())
        .with_caps(style.cap.into())
        .with_miter_limit(style.miter_limit);
    let opts = StrokeOpts::default();
    if style.is_dashed() {
        let dashed = dash_path(path, &style.dash, style.dash_offset, tolerance);
        kurbo::stroke(dashed.iter(), &kurbo_style, &opts, tolerance)
    } else {
        kurbo::stroke(path.iter(), &kurbo_style, &opts, tolerance)
    }
}

/// Split `path` into the "on" pieces of a dash pattern.
///
/// The pattern alternates on and off lengths and repeats along each subpath,
/// restarting at the dash offset for every subpath. Odd-length patterns are
/// repeated twice so that on and off alternate across cycles.
pub(crate) fn dash_path(path: &BezPath, pattern: &[f64], offset: f64, tolerance: f64) -> BezPath {
    let mut pattern: Vec<f64> = pattern.iter().map(|d| d.max(0.0)).collect();
    if pattern.len() % 2 == 1 {
        pattern.extend_from_within(..);
    }
    let total: f64 = pattern.iter().sum();
    let mut out = BezPath::new();
    if !(total > 0.0 && total.is_finite()) {
        out.extend(path.iter());
        return out;
    }

    for polyline in polylines(path, tolerance) {
        let mut walker = DashWalker::new(&pattern, offset.rem_euclid(total));
        for pair in polyline.windows(2) {
            walker.walk(pair[0], pair[1], &mut out);
        }
    }
    out
}

/// Flatten every subpath into a point list; closed subpaths end at their start.
fn polylines(path: &BezPath, tolerance: f64) -> Vec<Vec<Point>> {
    let mut lines: Vec<Vec<Point>> = Vec::new();
    kurbo::flatten(path.iter(), tolerance, |el| match el {
        PathEl::MoveTo(p) => lines.push(vec![p]),
        PathEl::LineTo(p) => match lines.last_mut() {
            Some(line) => line.push(p),
            None => lines.push(vec![p]),
        },
        PathEl::ClosePath => {
            if let Some(line) = lines.last_mut() {
                if let Some(&first) = line.first() {
                    line.push(first);
                }
            }
        }
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    lines
}

struct DashWalker<'a> {
    pattern: &'a [f64],
    index: usize,
    remaining: f64,
    /// Whether the last emitted point continues the current dash.
    pen_down: bool,
}

impl<'a> DashWalker<'a> {
    fn new(pattern: &'a [f64], mut offset: f64) -> Self {
        let mut index = 0;
        while offset > 0.0 && offset >= pattern[index] {
            offset -= pattern[index];
            index = (index + 1) % pattern.len();
        }
        DashWalker {
            pattern,
            index,
            remaining: pattern[index] - offset,
            pen_down: false,
        }
    }

    fn is_on(&self) -> bool {
        self.index % 2 == 0
    }

    fn walk(&mut self, from: Point, to: Point, out: &mut BezPath) {
        let len = from.distance(to);
        let mut pos = 0.0;
        loop {
            if self.is_on() && !self.pen_down {
                out.move_to(from.lerp(to, if len > 0.0 { pos / len } else { 0.0 }));
                self.pen_down = true;
            }
            let step = self.remaining.min(len - pos);
            pos += step;
            self.remaining -= step;
            if self.is_on() && step > 0.0 {
                out.line_to(from.lerp(to, pos / len));
            }
            if self.remaining > 0.0 {
                break;
            }
            self.index = (self.index + 1) % self.pattern.len();
            self.remaining = self.pattern[self.index];
            self.pen_down = false;
            if pos >= len && self.remaining > 0.0 {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::LineCap;

    fn straight(len: f64) -> BezPath {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((len, 0.0));
        p
    }

    fn segments(path: &BezPath) -> Vec<(f64, f64)> {
        let round = |v: f64| (v * 1e6).round() / 1e6;
        let mut out = Vec::new();
        let mut start = 0.0;
        for el in path.iter() {
            match el {
                PathEl::MoveTo(p) => start = round(p.x),
                PathEl::LineTo(p) => {
                    out.push((start, round(p.x)));
                    start = round(p.x);
                }
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_dash_pattern_cycles() {
        let dashed = dash_path(&straight(25.0), &[5.0, 5.0], 0.0, 0.1);
        assert_eq!(segments(&dashed), vec![(0.0, 5.0), (10.0, 15.0), (20.0, 25.0)]);
    }

    #[test]
    fn test_dash_offset_shifts_pattern() {
        let dashed = dash_path(&straight(20.0), &[5.0, 5.0], 7.0, 0.1);
        assert_eq!(segments(&dashed), vec![(3.0, 8.0), (13.0, 18.0)]);
    }

    #[test]
    fn test_odd_pattern_is_doubled() {
        let dashed = dash_path(&straight(12.0), &[4.0], 0.0, 0.1);
        assert_eq!(segments(&dashed), vec![(0.0, 4.0), (8.0, 12.0)]);
    }

    #[test]
    fn test_zero_pattern_is_solid() {
        let path = straight(10.0);
        assert_eq!(dash_path(&path, &[0.0, 0.0], 0.0, 0.1), path);
    }

    #[test]
    fn test_dash_continues_across_corner() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((3.0, 0.0));
        path.line_to((3.0, 10.0));
        let dashed = dash_path(&path, &[5.0, 100.0], 0.0, 0.1);
        let moves = dashed.iter().filter(|e| matches!(e, PathEl::MoveTo(_))).count();
        assert_eq!(moves, 1);
        assert_eq!(dashed.elements().last(), Some(&PathEl::LineTo(Point::new(3.0, 2.0))));
    }

    #[test]
    fn test_outline_is_wider_than_line() {
        let style = StrokeStyle {
            width: 4.0,
            cap: LineCap::Butt,
            ..StrokeStyle::default()
        };
        let outline = stroke_outline(&straight(10.0), &style, 0.1);
        let bounds = kurbo::Shape::bounding_box(&outline);
        assert!((bounds.height() - 4.0).abs() < 1e-6);
        assert!((bounds.width() - 10.0).abs() < 1e-6);
    }
}
