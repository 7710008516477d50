//! Scan conversion of flattened outlines.
//!
//! Every pixel row is sampled on `subsamples` evenly spaced sub-scanlines.
//! On each sub-scanline the signed edge crossings are swept left to right;
//! wherever the fill rule accepts the running winding number the covered
//! interval is added to the row with exact fractional coverage at both ends.

use super::mask::CoverageMask;
use crate::style::FillRule;
use kurbo::{PathEl, Point};

/// A non-horizontal line segment with `y0 < y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    /// +1 for segments drawn downward, -1 for upward ones.
    dir: i32,
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Edge> {
        if a.y == b.y || !(a.is_finite() && b.is_finite()) {
            return None;
        }
        let (p, q, dir) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
        Some(Edge {
            x0: p.x,
            y0: p.y,
            x1: q.x,
            y1: q.y,
            dir,
        })
    }

    #[inline]
    fn x_at(&self, y: f64) -> f64 {
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }
}

/// Device-space clip rectangle in whole pixels, `left..right` by `top..bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Clip {
    pub(crate) left: i32,
    pub(crate) top: i32,
    pub(crate) right: i32,
    pub(crate) bottom: i32,
}

impl Clip {
    pub(crate) fn canvas(width: u32, height: u32) -> Clip {
        Clip {
            left: 0,
            top: 0,
            right: width.min(i32::MAX as u32) as i32,
            bottom: height.min(i32::MAX as u32) as i32,
        }
    }

    /// A clip large enough for any outline that fits in `i32` pixel space.
    pub(crate) fn unbounded() -> Clip {
        Clip {
            left: i32::MIN / 2,
            top: i32::MIN / 2,
            right: i32::MAX / 2,
            bottom: i32::MAX / 2,
        }
    }
}

/// Flatten `path` and collect its edges. Every subpath is implicitly closed.
pub(crate) fn build_edges(path: impl IntoIterator<Item = PathEl>, tolerance: f64) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut start: Option<Point> = None;
    let mut last: Option<Point> = None;
    kurbo::flatten(path, tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            close_subpath(&mut edges, start, last);
            start = Some(p);
            last = Some(p);
        }
        PathEl::LineTo(p) => {
            if let Some(l) = last {
                edges.extend(Edge::new(l, p));
            } else {
                start = Some(p);
            }
            last = Some(p);
        }
        PathEl::ClosePath => {
            close_subpath(&mut edges, start, last);
            last = start;
        }
        // flatten only emits lines
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    close_subpath(&mut edges, start, last);
    edges
}

fn close_subpath(edges: &mut Vec<Edge>, start: Option<Point>, last: Option<Point>) {
    if let (Some(s), Some(l)) = (start, last) {
        edges.extend(Edge::new(l, s));
    }
}

/// Scan-convert `edges` inside `clip` with the given fill rule.
///
/// Returns `None` when nothing inside the clip can be covered.
pub(crate) fn rasterize(
    edges: &mut [Edge],
    rule: FillRule,
    clip: Clip,
    subsamples: u32,
) -> Option<CoverageMask> {
    if edges.is_empty() {
        return None;
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for e in edges.iter() {
        min_x = min_x.min(e.x0.min(e.x1));
        max_x = max_x.max(e.x0.max(e.x1));
        min_y = min_y.min(e.y0);
        max_y = max_y.max(e.y1);
    }
    let left = (min_x.floor().max(clip.left as f64)) as i32;
    let right = (max_x.ceil().min(clip.right as f64)) as i32;
    let top = (min_y.floor().max(clip.top as f64)) as i32;
    let bottom = (max_y.ceil().min(clip.bottom as f64)) as i32;
    if left >= right || top >= bottom {
        return None;
    }

    let mut mask = CoverageMask::new(left, top, (right - left) as u32, (bottom - top) as u32);
    edges.sort_by(|a, b| a.y0.total_cmp(&b.y0));

    let samples = subsamples.max(1);
    let weight = 1.0 / samples as f32;
    let mut next = 0;
    let mut active: Vec<usize> = Vec::new();
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for row in top..bottom {
        let local_y = (row - top) as u32;
        for s in 0..samples {
            let sy = row as f64 + (s as f64 + 0.5) / samples as f64;
            while next < edges.len() && edges[next].y0 <= sy {
                active.push(next);
                next += 1;
            }
            active.retain(|&i| edges[i].y1 > sy);
            if active.is_empty() {
                continue;
            }

            crossings.clear();
            crossings.extend(
                active
                    .iter()
                    .map(|&i| &edges[i])
                    .filter(|e| e.y0 <= sy)
                    .map(|e| (e.x_at(sy), e.dir)),
            );
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let acc = mask.row_mut(local_y);
            let mut winding = 0;
            let mut span_start = 0.0;
            for &(x, dir) in &crossings {
                let was_inside = rule.is_inside(winding);
                winding += dir;
                match (was_inside, rule.is_inside(winding)) {
                    (false, true) => span_start = x,
                    (true, false) => add_span(acc, left, span_start, x, weight),
                    _ => {}
                }
            }
        }
        for c in mask.row_mut(local_y) {
            *c = c.min(1.0);
        }
    }
    Some(mask)
}

/// Add `weight` times the horizontal coverage of `[x0, x1)` to a row starting at pixel `left`.
fn add_span(acc: &mut [f32], left: i32, x0: f64, x1: f64, weight: f32) {
    let len = acc.len() as f64;
    let a = (x0 - left as f64).clamp(0.0, len);
    let b = (x1 - left as f64).clamp(0.0, len);
    if b <= a {
        return;
    }
    let ia = a.floor() as usize;
    let ib = b.floor() as usize;
    if ia == ib {
        acc[ia] += (b - a) as f32 * weight;
        return;
    }
    acc[ia] += (ia as f64 + 1.0 - a) as f32 * weight;
    for c in &mut acc[ia + 1..ib] {
        *c += weight;
    }
    if ib < acc.len() {
        acc[ib] += (b - ib as f64) as f32 * weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{BezPath, Shape};

    fn fill(path: &BezPath, clip: Clip) -> Option<CoverageMask> {
        fill_with(path, FillRule::NonZero, clip)
    }

    fn fill_with(path: &BezPath, rule: FillRule, clip: Clip) -> Option<CoverageMask> {
        let mut edges = build_edges(path.iter(), 0.1);
        rasterize(&mut edges, rule, clip, 4)
    }

    #[test]
    fn test_axis_aligned_rect_is_exact() {
        let rect = kurbo::Rect::new(2.0, 3.0, 7.0, 9.0).to_path(0.1);
        let mask = fill(&rect, Clip::canvas(10, 10)).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                let inside = (2..7).contains(&x) && (3..9).contains(&y);
                assert_eq!(mask.get(x, y), if inside { 1.0 } else { 0.0 }, "({x},{y})");
            }
        }
    }

    #[test]
    fn test_half_pixel_edge_is_half_covered() {
        let rect = kurbo::Rect::new(1.5, 0.0, 4.0, 2.0).to_path(0.1);
        let mask = fill(&rect, Clip::canvas(8, 8)).unwrap();
        assert_eq!(mask.get(1, 0), 0.5);
        assert_eq!(mask.get(2, 0), 1.0);
    }

    #[test]
    fn test_nonzero_overlapping_same_direction() {
        // Two overlapping squares wound the same way stay filled in the overlap.
        let mut path = kurbo::Rect::new(0.0, 0.0, 4.0, 4.0).to_path(0.1);
        path.extend(kurbo::Rect::new(2.0, 2.0, 6.0, 6.0).to_path(0.1));
        let mask = fill(&path, Clip::canvas(8, 8)).unwrap();
        assert_eq!(mask.get(3, 3), 1.0);
    }

    #[test]
    fn test_even_odd_overlap_same_direction_is_hole() {
        let mut path = kurbo::Rect::new(0.0, 0.0, 4.0, 4.0).to_path(0.1);
        path.extend(kurbo::Rect::new(2.0, 2.0, 6.0, 6.0).to_path(0.1));
        let mask = fill_with(&path, FillRule::EvenOdd, Clip::canvas(8, 8)).unwrap();
        assert_eq!(mask.get(3, 3), 0.0);
        assert_eq!(mask.get(1, 1), 1.0);
        assert_eq!(mask.get(5, 5), 1.0);
        assert_eq!(mask.area(), 32.0 - 8.0);
    }

    #[test]
    fn test_even_odd_pentagram_center_is_hole() {
        // A five-pointed star drawn in one stroke winds its center twice.
        let mut star = BezPath::new();
        for i in 0..5 {
            let angle = -std::f64::consts::FRAC_PI_2 + i as f64 * 4.0 * std::f64::consts::PI / 5.0;
            let p = (20.0 + 18.0 * angle.cos(), 20.0 + 18.0 * angle.sin());
            if i == 0 {
                star.move_to(p);
            } else {
                star.line_to(p);
            }
        }
        star.close_path();
        let nonzero = fill_with(&star, FillRule::NonZero, Clip::canvas(40, 40)).unwrap();
        let even_odd = fill_with(&star, FillRule::EvenOdd, Clip::canvas(40, 40)).unwrap();
        assert_eq!(nonzero.get(20, 20), 1.0);
        assert_eq!(even_odd.get(20, 20), 0.0);
        // The points are covered once, so both rules agree there.
        assert_eq!(nonzero.get(20, 5), even_odd.get(20, 5));
    }

    #[test]
    fn test_opposite_winding_cuts_hole() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((6.0, 0.0));
        path.line_to((6.0, 6.0));
        path.line_to((0.0, 6.0));
        path.close_path();
        path.move_to((2.0, 2.0));
        path.line_to((2.0, 4.0));
        path.line_to((4.0, 4.0));
        path.line_to((4.0, 2.0));
        path.close_path();
        let mask = fill(&path, Clip::canvas(8, 8)).unwrap();
        assert_eq!(mask.get(3, 3), 0.0);
        assert_eq!(mask.get(1, 1), 1.0);
    }

    #[test]
    fn test_open_subpath_is_closed_implicitly() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((4.0, 0.0));
        path.line_to((4.0, 4.0));
        path.line_to((0.0, 4.0));
        let mask = fill(&path, Clip::canvas(8, 8)).unwrap();
        assert_eq!(mask.area(), 16.0);
    }

    #[test]
    fn test_zero_area_path_covers_nothing() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((5.0, 5.0));
        let covered = fill(&path, Clip::canvas(8, 8)).map_or(0.0, |m| m.area());
        assert_eq!(covered, 0.0);
    }

    #[test]
    fn test_clip_limits_mask() {
        let rect = kurbo::Rect::new(-10.0, -10.0, 30.0, 30.0).to_path(0.1);
        let mask = fill(&rect, Clip::canvas(5, 6)).unwrap();
        assert_eq!((mask.left(), mask.top()), (0, 0));
        assert_eq!((mask.width(), mask.height()), (5, 6));
        assert_eq!(mask.area(), 30.0);
    }

    #[test]
    fn test_outside_clip_is_none() {
        let rect = kurbo::Rect::new(20.0, 20.0, 30.0, 30.0).to_path(0.1);
        assert!(fill(&rect, Clip::canvas(10, 10)).is_none());
    }

    #[test]
    fn test_circle_area_close_to_analytic() {
        let circle = kurbo::Circle::new((16.0, 16.0), 10.0).to_path(0.01);
        let mask = fill(&circle, Clip::canvas(32, 32)).unwrap();
        let expected = std::f64::consts::PI * 100.0;
        assert!((mask.area() - expected).abs() < 1.0, "area {}", mask.area());
        assert_eq!(mask.get(16, 16), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);
    }
}
