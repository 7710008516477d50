//! Path building and shape helpers. Nothing is drawn until `fill` or `stroke`.

use crate::resource::{Handle, HandleTable};
use advancegg_canvas::CanvasResult;

pub fn move_to(table: &mut HandleTable, id: Handle, x: f64, y: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.move_to(x, y);
    Ok(())
}

pub fn line_to(table: &mut HandleTable, id: Handle, x: f64, y: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.line_to(x, y);
    Ok(())
}

/// Append a cubic Bézier from the current point.
#[allow(clippy::too_many_arguments)]
pub fn curve_to(
    table: &mut HandleTable,
    id: Handle,
    cp1x: f64,
    cp1y: f64,
    cp2x: f64,
    cp2y: f64,
    x: f64,
    y: f64,
) -> CanvasResult<()> {
    table
        .canvas_mut(id)?
        .curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    Ok(())
}

pub fn close_path(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.close_path();
    Ok(())
}

pub fn clear_path(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.clear_path();
    Ok(())
}

// --- Shapes ---

pub fn draw_rectangle(
    table: &mut HandleTable,
    id: Handle,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) -> CanvasResult<()> {
    table.canvas_mut(id)?.draw_rectangle(x, y, w, h);
    Ok(())
}

/// Rectangle with quarter-circle corners; `r` is clamped to half the shorter side.
pub fn draw_rounded_rectangle(
    table: &mut HandleTable,
    id: Handle,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    r: f64,
) -> CanvasResult<()> {
    table.canvas_mut(id)?.draw_rounded_rectangle(x, y, w, h, r);
    Ok(())
}

pub fn draw_circle(table: &mut HandleTable, id: Handle, x: f64, y: f64, r: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.draw_circle(x, y, r);
    Ok(())
}

pub fn draw_ellipse(
    table: &mut HandleTable,
    id: Handle,
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
) -> CanvasResult<()> {
    table.canvas_mut(id)?.draw_ellipse(x, y, rx, ry);
    Ok(())
}

/// Append an open single-segment subpath; only visible once stroked.
pub fn draw_line(
    table: &mut HandleTable,
    id: Handle,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
) -> CanvasResult<()> {
    table.canvas_mut(id)?.draw_line(x1, y1, x2, y2);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_context;

    #[test]
    fn test_path_accumulates_subpaths() {
        let mut table = HandleTable::new();
        let ctx = create_context(&mut table, 10, 10);
        draw_rectangle(&mut table, ctx, 0.0, 0.0, 2.0, 2.0).unwrap();
        draw_circle(&mut table, ctx, 5.0, 5.0, 2.0).unwrap();
        move_to(&mut table, ctx, 1.0, 1.0).unwrap();
        line_to(&mut table, ctx, 4.0, 1.0).unwrap();
        curve_to(&mut table, ctx, 5.0, 2.0, 6.0, 3.0, 7.0, 4.0).unwrap();
        close_path(&mut table, ctx).unwrap();
        assert_eq!(table.canvas(ctx).unwrap().current_path().subpath_count(), 3);

        clear_path(&mut table, ctx).unwrap();
        assert!(table.canvas(ctx).unwrap().current_path().is_empty());
    }

    #[test]
    fn test_shapes_on_destroyed_context_fail() {
        let mut table = HandleTable::new();
        let ctx = create_context(&mut table, 10, 10);
        crate::destroy_context(&mut table, ctx).unwrap();
        assert!(draw_ellipse(&mut table, ctx, 5.0, 5.0, 2.0, 1.0).is_err());
        assert!(draw_line(&mut table, ctx, 0.0, 0.0, 1.0, 1.0).is_err());
    }
}
