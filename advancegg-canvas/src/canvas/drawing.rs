//! Fill, stroke and clear operations for Canvas.

use super::{validate_dash, Canvas};
use crate::composite;
use crate::error::CanvasResult;
use crate::paint::PaintSampler;
use crate::path::{Path, TransformedPath};
use crate::raster::CoverageMask;
use crate::shapes;
use crate::style::FillRule;

impl Canvas {
    /// Replace every pixel with the current paint. No blending takes place.
    pub fn clear(&mut self) {
        log::debug!(target: "canvas", "clear");
        let sampler = self.sampler();
        composite::fill_pixmap(&mut self.pixmap, &sampler);
    }

    /// Fill the current path with the current fill rule, then clear the path.
    pub fn fill(&mut self) {
        log::debug!(target: "canvas", "fill");
        self.fill_preserve();
        self.path.clear();
    }

    /// Fill the current path with the current fill rule and keep it.
    pub fn fill_preserve(&mut self) {
        log::debug!(target: "canvas", "fill_preserve");
        // Path coordinates are already in device space (pre-transformed)
        let rule = self.state.fill_rule;
        if let Some(mask) = self.rasterizer.fill(&self.path, rule, self.width(), self.height()) {
            self.paint_mask(&mask);
        }
    }

    /// Stroke the current path, then clear the path.
    pub fn stroke(&mut self) {
        log::debug!(target: "canvas", "stroke");
        self.stroke_preserve();
        self.path.clear();
    }

    /// Stroke the current path and keep it.
    ///
    /// Line width and dashes are in user units and scale with the transform.
    pub fn stroke_preserve(&mut self) {
        log::debug!(target: "canvas", "stroke_preserve");
        let style = self.state.device_stroke_style();
        if let Some(mask) = self
            .rasterizer
            .stroke(&self.path, &style, self.width(), self.height())
        {
            self.paint_mask(&mask);
        }
    }

    /// Stroke a single dashed line immediately with the current line style.
    ///
    /// The current path is left untouched. An empty or all-zero pattern draws
    /// a solid line.
    pub fn draw_dashed_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        pattern: &[f64],
    ) -> CanvasResult<()> {
        log::debug!(target: "canvas", "draw_dashed_line {} {} {} {} {:?}", x1, y1, x2, y2, pattern);
        validate_dash(pattern)?;
        let mut line = Path::new();
        shapes::line(
            &mut TransformedPath {
                path: &mut line,
                transform: self.state.transform,
            },
            x1,
            y1,
            x2,
            y2,
        );
        let mut state = self.state.clone();
        state.line_dash = pattern.to_vec();
        state.line_dash_offset = 0.0;
        let style = state.device_stroke_style();
        if let Some(mask) = self
            .rasterizer
            .stroke(&line, &style, self.width(), self.height())
        {
            self.paint_mask(&mask);
        }
        Ok(())
    }

    pub(crate) fn sampler(&self) -> PaintSampler {
        PaintSampler::new(&self.state.paint, self.state.global_alpha)
    }

    /// Composite the current paint through a coverage mask.
    pub(crate) fn paint_mask(&mut self, mask: &CoverageMask) {
        let sampler = self.sampler();
        composite::composite_mask(&mut self.pixmap, mask, &sampler);
    }

    /// Fill an arbitrary device-space path without touching the current one.
    pub(crate) fn fill_device_path(&mut self, path: &Path) {
        if let Some(mask) = self.rasterizer.fill(path, FillRule::NonZero, self.width(), self.height()) {
            self.paint_mask(&mask);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Canvas, FillRule, Gradient, LineCap, LineJoin, Rgba};

    fn pixel(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        canvas.get_pixel(x, y).unwrap()
    }

    #[test]
    fn test_clear_sets_every_pixel() {
        let mut canvas = Canvas::new(7, 5).unwrap();
        canvas.set_rgba(0.2, 0.4, 0.6, 1.0).unwrap();
        canvas.clear();
        let expected = Rgba::new(0.2, 0.4, 0.6, 1.0).to_rgba8();
        for y in 0..5 {
            for x in 0..7 {
                assert_eq!(pixel(&canvas, x, y), expected);
            }
        }
    }

    #[test]
    fn test_fill_rectangle_exact_pixels() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.set_rgb(0.0, 0.0, 1.0).unwrap();
        canvas.draw_rectangle(3.0, 4.0, 10.0, 6.0);
        canvas.fill();
        for y in 0..20 {
            for x in 0..20 {
                let inside = (3..13).contains(&x) && (4..10).contains(&y);
                let expected = if inside { [0, 0, 255, 255] } else { [0, 0, 0, 0] };
                assert_eq!(pixel(&canvas, x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_fill_clears_path_preserve_keeps_it() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.draw_rectangle(0.0, 0.0, 5.0, 5.0);
        canvas.fill_preserve();
        assert!(!canvas.current_path().is_empty());
        canvas.stroke();
        assert!(canvas.current_path().is_empty());
    }

    #[test]
    fn test_circle_example() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.set_rgb(1.0, 0.0, 0.0).unwrap();
        canvas.draw_circle(50.0, 50.0, 30.0);
        canvas.fill();
        assert_eq!(pixel(&canvas, 50, 50), [255, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_stroke_uses_line_width() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.set_rgb(1.0, 1.0, 1.0).unwrap();
        canvas.set_line_width(4.0).unwrap();
        canvas.set_line_cap(crate::LineCap::Butt);
        canvas.draw_line(2.0, 10.0, 18.0, 10.0);
        canvas.stroke();
        assert_eq!(pixel(&canvas, 10, 8)[3], 255);
        assert_eq!(pixel(&canvas, 10, 11)[3], 255);
        assert_eq!(pixel(&canvas, 10, 13)[3], 0);
    }

    #[test]
    fn test_dashed_line_leaves_gaps_and_path() {
        let mut canvas = Canvas::new(40, 10).unwrap();
        canvas.set_line_width(2.0).unwrap();
        canvas.set_line_cap(crate::LineCap::Butt);
        canvas.draw_rectangle(0.0, 0.0, 1.0, 1.0);
        canvas
            .draw_dashed_line(0.0, 5.0, 40.0, 5.0, &[5.0, 5.0])
            .unwrap();
        assert_eq!(pixel(&canvas, 2, 4)[3], 255);
        assert_eq!(pixel(&canvas, 7, 4)[3], 0);
        assert_eq!(pixel(&canvas, 12, 4)[3], 255);
        assert_eq!(canvas.current_path().subpath_count(), 1);
        assert!(canvas.draw_dashed_line(0.0, 0.0, 1.0, 1.0, &[-1.0]).is_err());
    }

    #[test]
    fn test_fill_with_gradient_is_monotonic() {
        let mut canvas = Canvas::new(100, 4).unwrap();
        let gradient = Gradient::new_linear(0.0, 0.0, 100.0, 0.0).unwrap();
        gradient.add_color_stop(0.0, Rgba::BLACK).unwrap();
        gradient.add_color_stop(1.0, Rgba::WHITE).unwrap();
        canvas.set_gradient(&gradient);
        canvas.draw_rectangle(0.0, 0.0, 100.0, 4.0);
        canvas.fill();
        let row: Vec<u8> = (0..100).map(|x| pixel(&canvas, x, 1)[0]).collect();
        assert!(row.windows(2).all(|w| w[0] <= w[1]));
        assert!(row[0] < 5 && row[99] > 250);
    }

    #[test]
    fn test_gradient_change_after_binding_is_visible() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let gradient = Gradient::new_linear(0.0, 0.0, 4.0, 0.0).unwrap();
        canvas.set_gradient(&gradient);
        gradient.add_color_stop(0.0, Rgba::WHITE).unwrap();
        canvas.clear();
        assert_eq!(pixel(&canvas, 3, 3), [255, 255, 255, 255]);
    }

    #[test]
    fn test_global_alpha_scales_paint() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.set_rgb(1.0, 0.0, 0.0).unwrap();
        canvas.set_global_alpha(0.5).unwrap();
        canvas.draw_rectangle(0.0, 0.0, 2.0, 2.0);
        canvas.fill();
        assert_eq!(canvas.get_pixel(0, 0).unwrap()[3], 128);
    }

    #[test]
    fn test_default_round_cap_extends_past_endpoints() {
        let draw = |cap: Option<LineCap>| {
            let mut canvas = Canvas::new(40, 20).unwrap();
            canvas.set_line_width(4.0).unwrap();
            if let Some(cap) = cap {
                canvas.set_line_cap(cap);
            }
            canvas.draw_line(10.0, 10.0, 30.0, 10.0);
            canvas.stroke();
            canvas
        };
        let round = draw(None);
        assert_eq!(pixel(&round, 30, 9)[3], 255);
        assert!(pixel(&round, 31, 9)[3] > 0);
        assert!(pixel(&round, 8, 10)[3] > 0);
        assert_eq!(pixel(&round, 33, 10)[3], 0);

        let butt = draw(Some(LineCap::Butt));
        assert_eq!(pixel(&butt, 30, 9)[3], 0);
        assert_eq!(pixel(&butt, 8, 10)[3], 0);
        assert_eq!(pixel(&butt, 29, 9)[3], 255);
    }

    #[test]
    fn test_default_round_join_covers_outer_corner() {
        let draw = |join: Option<LineJoin>| {
            let mut canvas = Canvas::new(40, 40).unwrap();
            canvas.set_line_width(6.0).unwrap();
            if let Some(join) = join {
                canvas.set_line_join(join);
            }
            canvas.move_to(10.0, 10.0);
            canvas.line_to(30.0, 10.0);
            canvas.line_to(30.0, 30.0);
            canvas.stroke();
            canvas
        };
        // Pixel (32, 7) lies outside both segment bodies, inside the radius 3
        // circle around the corner and beyond the bevel chord.
        let round = draw(None);
        assert!(pixel(&round, 32, 7)[3] > 0);
        assert_eq!(pixel(&round, 31, 8)[3], 255);
        let bevel = draw(Some(LineJoin::Bevel));
        assert_eq!(pixel(&bevel, 32, 7)[3], 0);
    }

    #[test]
    fn test_even_odd_fill_leaves_overlap_empty() {
        let mut canvas = Canvas::new(12, 12).unwrap();
        assert_eq!(canvas.fill_rule(), FillRule::NonZero);
        canvas.draw_rectangle(0.0, 0.0, 8.0, 8.0);
        canvas.draw_rectangle(4.0, 4.0, 8.0, 8.0);
        canvas.fill_preserve();
        assert_eq!(pixel(&canvas, 5, 5)[3], 255);

        canvas.clear_path();
        let mut even_odd = Canvas::new(12, 12).unwrap();
        even_odd.set_fill_rule(FillRule::EvenOdd);
        even_odd.draw_rectangle(0.0, 0.0, 8.0, 8.0);
        even_odd.draw_rectangle(4.0, 4.0, 8.0, 8.0);
        even_odd.fill();
        assert_eq!(pixel(&even_odd, 5, 5)[3], 0);
        assert_eq!(pixel(&even_odd, 1, 1)[3], 255);
        assert_eq!(pixel(&even_odd, 10, 10)[3], 255);
    }

    #[test]
    fn test_fill_rule_is_saved_and_restored() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.push();
        canvas.set_fill_rule(FillRule::EvenOdd);
        canvas.pop();
        assert_eq!(canvas.fill_rule(), FillRule::NonZero);
    }

    #[test]
    fn test_fill_with_radial_gradient_darkens_outward() {
        let mut canvas = Canvas::new(41, 41).unwrap();
        let gradient = Gradient::new_radial(20.5, 20.5, 0.0, 20.5, 20.5, 20.0).unwrap();
        gradient.add_color_stop(0.0, Rgba::WHITE).unwrap();
        gradient.add_color_stop(1.0, Rgba::BLACK).unwrap();
        canvas.set_gradient(&gradient);
        canvas.draw_rectangle(0.0, 0.0, 41.0, 41.0);
        canvas.fill();
        let row: Vec<u8> = (20..41).map(|x| pixel(&canvas, x, 20)[0]).collect();
        assert_eq!(row[0], 255);
        assert!(row.windows(2).all(|w| w[0] >= w[1]), "{row:?}");
        assert_eq!(pixel(&canvas, 0, 0), [0, 0, 0, 255]);
        // Symmetric about the center.
        assert_eq!(pixel(&canvas, 10, 20), pixel(&canvas, 30, 20));
        assert_eq!(pixel(&canvas, 20, 10), pixel(&canvas, 20, 30));
    }
}
