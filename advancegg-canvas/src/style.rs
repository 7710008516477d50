//! Style types and enums for stroke operations.

/// Line cap style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat edge at the endpoint.
    Butt,
    /// Rounded edge extending past the endpoint.
    #[default]
    Round,
    /// Square edge extending past the endpoint.
    Square,
}

impl From<LineCap> for kurbo::Cap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => kurbo::Cap::Butt,
            LineCap::Round => kurbo::Cap::Round,
            LineCap::Square => kurbo::Cap::Square,
        }
    }
}

/// Line join style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Sharp corner, beveled past the miter limit.
    Miter,
    /// Rounded corner.
    #[default]
    Round,
    /// Beveled corner.
    Bevel,
}

impl From<LineJoin> for kurbo::Join {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => kurbo::Join::Miter,
            LineJoin::Round => kurbo::Join::Round,
            LineJoin::Bevel => kurbo::Join::Bevel,
        }
    }
}

/// Horizontal alignment of wrapped text lines within their box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Rule deciding which regions of a self-overlapping path are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Inside where the winding number is nonzero.
    #[default]
    NonZero,
    /// Inside where the winding number is odd.
    EvenOdd,
}

impl FillRule {
    #[inline]
    pub(crate) fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Stroke geometry resolved for one stroke operation, in device units.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    /// Alternating on/off lengths; empty means solid.
    pub dash: Vec<f64>,
    pub dash_offset: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::default(),
            join: LineJoin::default(),
            miter_limit: 10.0,
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl StrokeStyle {
    /// The same style with width and dash lengths multiplied by `scale`.
    pub fn scaled(&self, scale: f64) -> StrokeStyle {
        StrokeStyle {
            width: self.width * scale,
            dash: self.dash.iter().map(|d| d * scale).collect(),
            dash_offset: self.dash_offset * scale,
            ..self.clone()
        }
    }

    /// Whether the dash pattern actually produces gaps.
    pub(crate) fn is_dashed(&self) -> bool {
        !self.dash.is_empty() && self.dash.iter().sum::<f64>() > 0.0
    }
}
