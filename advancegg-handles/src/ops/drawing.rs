//! Operations that write pixels: clear, fill, stroke and dashed lines.

use crate::resource::{Handle, HandleTable};
use advancegg_canvas::CanvasResult;

/// Replace every pixel with the current paint.
pub fn clear(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.clear();
    Ok(())
}

/// Fill the current path with the canvas fill rule, then clear it.
pub fn fill(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.fill();
    Ok(())
}

/// Stroke the current path with the current line style, then clear it.
pub fn stroke(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.stroke();
    Ok(())
}

pub fn fill_preserve(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.fill_preserve();
    Ok(())
}

pub fn stroke_preserve(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.stroke_preserve();
    Ok(())
}

/// Stroke one dashed line right away, cycling `pattern` (on, off, ...) along it.
pub fn draw_dashed_line(
    table: &mut HandleTable,
    id: Handle,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    pattern: &[f64],
) -> CanvasResult<()> {
    table
        .canvas_mut(id)?
        .draw_dashed_line(x1, y1, x2, y2, pattern)
}

/// Straight-alpha RGBA of one pixel, or `None` outside the canvas.
pub fn get_pixel(table: &HandleTable, id: Handle, x: u32, y: u32) -> CanvasResult<Option<[u8; 4]>> {
    Ok(table.canvas(id)?.get_pixel(x, y))
}
