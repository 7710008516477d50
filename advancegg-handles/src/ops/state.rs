//! Paint and line-style setters, and state save/restore.

use crate::resource::{Handle, HandleTable};
use advancegg_canvas::{CanvasResult, FillRule, LineCap, LineJoin};

// --- Paint ---

/// Set an opaque solid color from components in `[0, 1]`.
pub fn set_rgb(table: &mut HandleTable, id: Handle, r: f64, g: f64, b: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.set_rgb(r, g, b)
}

pub fn set_rgba(
    table: &mut HandleTable,
    id: Handle,
    r: f64,
    g: f64,
    b: f64,
    a: f64,
) -> CanvasResult<()> {
    table.canvas_mut(id)?.set_rgba(r, g, b, a)
}

/// Set a solid color from `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
pub fn set_hex_color(table: &mut HandleTable, id: Handle, hex: &str) -> CanvasResult<()> {
    table.canvas_mut(id)?.set_hex_color(hex)
}

pub fn set_global_alpha(table: &mut HandleTable, id: Handle, alpha: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.set_global_alpha(alpha)
}

// --- Line properties ---

pub fn set_line_width(table: &mut HandleTable, id: Handle, width: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.set_line_width(width)
}

pub fn set_line_cap(table: &mut HandleTable, id: Handle, cap: LineCap) -> CanvasResult<()> {
    table.canvas_mut(id)?.set_line_cap(cap);
    Ok(())
}

pub fn set_line_join(table: &mut HandleTable, id: Handle, join: LineJoin) -> CanvasResult<()> {
    table.canvas_mut(id)?.set_line_join(join);
    Ok(())
}

/// Rule used by later fills for self-overlapping paths.
pub fn set_fill_rule(table: &mut HandleTable, id: Handle, rule: FillRule) -> CanvasResult<()> {
    table.canvas_mut(id)?.set_fill_rule(rule);
    Ok(())
}

/// Dash pattern used by every later `stroke`. An empty pattern is solid.
pub fn set_dash(
    table: &mut HandleTable,
    id: Handle,
    pattern: &[f64],
    offset: f64,
) -> CanvasResult<()> {
    table.canvas_mut(id)?.set_dash(pattern, offset)
}

// --- Save/restore ---

pub fn push(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.push();
    Ok(())
}

/// Restore the state saved by the matching `push`. Unbalanced pops are ignored.
pub fn pop(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.canvas_mut(id)?.pop();
    Ok(())
}
