//! Transform operations. Each call post-multiplies the current transform.

use crate::resource::{Handle, HandleTable};
use advancegg_canvas::CanvasResult;

pub fn translate(table: &mut HandleTable, id: Handle, x: f64, y: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.translate(x, y);
    Ok(())
}

pub fn scale(table: &mut HandleTable, id: Handle, x: f64, y: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.scale(x, y);
    Ok(())
}

/// Rotate by `angle` radians, clockwise in screen space.
pub fn rotate(table: &mut HandleTable, id: Handle, angle: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.rotate(angle);
    Ok(())
}

pub fn identity(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.identity();
    Ok(())
}
