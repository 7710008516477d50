//! Path accumulation: ordered subpaths of lines, cubic curves and closes.

use kurbo::{Affine, BezPath, PathEl, Point, Rect};

/// A single drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    Close,
}

/// Destination for path commands.
///
/// Implemented by [`Path`] itself and by adapters that map points through a
/// transform before appending, so shape generators can be written once.
pub trait PathSink {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);
    fn close(&mut self);
    fn has_current_point(&self) -> bool;
}

/// An ordered list of subpaths.
///
/// A subpath is open until `close` or until the next `move_to`. A drawing
/// command issued right after `close` starts a new subpath at the start point
/// of the closed one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
    start: Option<Point>,
    current: Option<Point>,
    needs_move: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The point the next segment starts from, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    /// Remove every subpath.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// End the current subpath without closing it.
    pub fn new_sub_path(&mut self) {
        self.current = None;
        self.start = None;
        self.needs_move = false;
    }

    /// Number of subpaths (each starts with a `MoveTo`).
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    /// Append every command of `other`, mapping points through `transform`.
    pub fn extend_transformed(&mut self, other: &Path, transform: Affine) {
        for cmd in &other.commands {
            match *cmd {
                PathCommand::MoveTo(p) => self.move_to(transform * p),
                PathCommand::LineTo(p) => self.line_to(transform * p),
                PathCommand::CurveTo(c1, c2, p) => {
                    self.curve_to(transform * c1, transform * c2, transform * p)
                }
                PathCommand::Close => self.close(),
            }
        }
    }

    /// A copy of this path with every point mapped through `transform`.
    pub fn transformed(&self, transform: Affine) -> Path {
        let mut out = Path::new();
        out.extend_transformed(self, transform);
        out
    }

    /// Bounding box of all control points.
    pub fn control_bounds(&self) -> Option<Rect> {
        let mut points = Vec::with_capacity(self.commands.len() * 3);
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => points.push(p),
                PathCommand::CurveTo(c1, c2, p) => points.extend([c1, c2, p]),
                PathCommand::Close => {}
            }
        }
        let (first, rest) = points.split_first()?;
        Some(
            rest.iter()
                .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
        )
    }

    /// Convert to a kurbo path for flattening and stroking.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bez = BezPath::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => bez.move_to(p),
                PathCommand::LineTo(p) => bez.line_to(p),
                PathCommand::CurveTo(c1, c2, p) => bez.curve_to(c1, c2, p),
                PathCommand::Close => bez.close_path(),
            }
        }
        bez
    }

    /// Build from kurbo path elements. Quadratic segments are raised to cubics.
    pub fn from_elements(elements: impl IntoIterator<Item = PathEl>) -> Path {
        let mut path = Path::new();
        for el in elements {
            match el {
                PathEl::MoveTo(p) => path.move_to(p),
                PathEl::LineTo(p) => path.line_to(p),
                PathEl::QuadTo(c, p) => path.quad_to(c, p),
                PathEl::CurveTo(c1, c2, p) => path.curve_to(c1, c2, p),
                PathEl::ClosePath => path.close(),
            }
        }
        path
    }

    /// Append a quadratic segment as the equivalent cubic.
    pub fn quad_to(&mut self, c: Point, p: Point) {
        let p0 = self.current.unwrap_or(c);
        let c1 = p0 + (c - p0) * (2.0 / 3.0);
        let c2 = p + (c - p) * (2.0 / 3.0);
        self.curve_to(c1, c2, p);
    }

    /// Re-open a subpath after `close`. Returns false when there is no current point.
    fn reopen(&mut self) -> bool {
        if self.needs_move {
            if let Some(start) = self.start {
                self.commands.push(PathCommand::MoveTo(start));
            }
            self.needs_move = false;
        }
        self.current.is_some()
    }
}

impl PathSink for Path {
    fn move_to(&mut self, p: Point) {
        // Consecutive moves collapse into the last one.
        if let Some(PathCommand::MoveTo(last)) = self.commands.last_mut() {
            *last = p;
        } else {
            self.commands.push(PathCommand::MoveTo(p));
        }
        self.start = Some(p);
        self.current = Some(p);
        self.needs_move = false;
    }

    fn line_to(&mut self, p: Point) {
        if !self.reopen() {
            self.move_to(p);
            return;
        }
        self.commands.push(PathCommand::LineTo(p));
        self.current = Some(p);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        if !self.reopen() {
            self.move_to(c1);
        }
        self.commands.push(PathCommand::CurveTo(c1, c2, p));
        self.current = Some(p);
    }

    fn close(&mut self) {
        if self.current.is_none() || self.needs_move {
            return;
        }
        self.commands.push(PathCommand::Close);
        self.current = self.start;
        self.needs_move = true;
    }

    fn has_current_point(&self) -> bool {
        self.current.is_some()
    }
}

/// Adapter that maps user-space points through a transform into a device-space path.
pub(crate) struct TransformedPath<'a> {
    pub(crate) path: &'a mut Path,
    pub(crate) transform: Affine,
}

impl PathSink for TransformedPath<'_> {
    fn move_to(&mut self, p: Point) {
        self.path.move_to(self.transform * p);
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(self.transform * p);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.path
            .curve_to(self.transform * c1, self.transform * c2, self.transform * p);
    }

    fn close(&mut self) {
        self.path.close();
    }

    fn has_current_point(&self) -> bool {
        self.path.has_current_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_to_without_current_point_moves() {
        let mut path = Path::new();
        path.line_to(Point::new(3.0, 4.0));
        path.line_to(Point::new(5.0, 6.0));
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo(Point::new(3.0, 4.0)),
                PathCommand::LineTo(Point::new(5.0, 6.0)),
            ]
        );
    }

    #[test]
    fn test_close_then_line_starts_new_subpath_at_start() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path.line_to(Point::new(10.0, 10.0));
        path.close();
        assert_eq!(path.current_point(), Some(Point::new(0.0, 0.0)));
        path.line_to(Point::new(-5.0, 0.0));
        assert_eq!(path.subpath_count(), 2);
        assert_eq!(
            path.commands()[4],
            PathCommand::MoveTo(Point::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_double_close_is_ignored() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(1.0, 0.0));
        path.close();
        path.close();
        assert_eq!(
            path.commands()
                .iter()
                .filter(|c| matches!(c, PathCommand::Close))
                .count(),
            1
        );
    }

    #[test]
    fn test_consecutive_moves_collapse() {
        let mut path = Path::new();
        path.move_to(Point::new(1.0, 1.0));
        path.move_to(Point::new(2.0, 2.0));
        assert_eq!(path.commands(), &[PathCommand::MoveTo(Point::new(2.0, 2.0))]);
    }

    #[test]
    fn test_transformed_adapter() {
        let mut path = Path::new();
        let mut sink = TransformedPath {
            path: &mut path,
            transform: Affine::translate((10.0, 20.0)),
        };
        sink.move_to(Point::new(1.0, 1.0));
        sink.line_to(Point::new(2.0, 1.0));
        assert_eq!(path.current_point(), Some(Point::new(12.0, 21.0)));
    }

    #[test]
    fn test_control_bounds_include_curve_points() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.curve_to(Point::new(0.0, 50.0), Point::new(20.0, -10.0), Point::new(10.0, 0.0));
        let bounds = path.control_bounds().unwrap();
        assert_eq!(bounds, Rect::new(0.0, -10.0, 20.0, 50.0));
    }

    #[test]
    fn test_bez_path_round_trip() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(4.0, 0.0));
        path.close();
        let back = Path::from_elements(path.to_bez_path().iter());
        assert_eq!(back.commands(), path.commands());
    }
}
