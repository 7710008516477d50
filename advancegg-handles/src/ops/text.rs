//! Font loading and text drawing.

use crate::resource::{Handle, HandleTable};
use advancegg_canvas::{CanvasResult, TextAlign};
use std::path::Path;

/// Load a TrueType/OpenType font at `size` pixels, replacing the canvas's current font.
pub fn load_font_face(
    table: &mut HandleTable,
    id: Handle,
    path: impl AsRef<Path>,
    size: f64,
) -> CanvasResult<()> {
    table.canvas_mut(id)?.load_font(path, size)
}

/// Width and height of `text` in the current font.
pub fn measure_string(table: &mut HandleTable, id: Handle, text: &str) -> CanvasResult<(f64, f64)> {
    table.canvas_mut(id)?.measure_string(text)
}

/// Draw `text` with its baseline starting at `(x, y)`.
pub fn draw_string(table: &mut HandleTable, id: Handle, text: &str, x: f64, y: f64) -> CanvasResult<()> {
    table.canvas_mut(id)?.draw_string(text, x, y)
}

/// Draw `text` with `(x, y)` at fraction `(ax, ay)` of its bounding box.
#[allow(clippy::too_many_arguments)]
pub fn draw_string_anchored(
    table: &mut HandleTable,
    id: Handle,
    text: &str,
    x: f64,
    y: f64,
    ax: f64,
    ay: f64,
) -> CanvasResult<()> {
    table
        .canvas_mut(id)?
        .draw_string_anchored(text, x, y, ax, ay)
}

/// Word-wrap `text` to `width` and draw it as an anchored, aligned block.
#[allow(clippy::too_many_arguments)]
pub fn draw_string_wrapped(
    table: &mut HandleTable,
    id: Handle,
    text: &str,
    x: f64,
    y: f64,
    ax: f64,
    ay: f64,
    width: f64,
    line_spacing: f64,
    align: TextAlign,
) -> CanvasResult<()> {
    table
        .canvas_mut(id)?
        .draw_string_wrapped(text, x, y, ax, ay, width, line_spacing, align)
}

pub fn measure_multiline_string(
    table: &mut HandleTable,
    id: Handle,
    text: &str,
    line_spacing: f64,
) -> CanvasResult<(f64, f64)> {
    table.canvas_mut(id)?.measure_multiline_string(text, line_spacing)
}

pub fn word_wrap(table: &mut HandleTable, id: Handle, text: &str, width: f64) -> CanvasResult<Vec<String>> {
    table.canvas_mut(id)?.word_wrap(text, width)
}

pub fn draw_text_on_circle(
    table: &mut HandleTable,
    id: Handle,
    text: &str,
    x: f64,
    y: f64,
    radius: f64,
) -> CanvasResult<()> {
    table
        .canvas_mut(id)?
        .draw_text_on_circle(text, x, y, radius)
}
