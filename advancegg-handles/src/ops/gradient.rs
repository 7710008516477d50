//! Linear and radial gradients shared between canvases.
//!
//! A canvas bound to a gradient keeps a reference to it, so stops added
//! later are visible to every bound canvas, and destroying the handle does
//! not affect canvases that still use it.

use crate::resource::{Handle, HandleTable, Resource};
use advancegg_canvas::{CanvasResult, Gradient, Rgba};

/// Create a gradient along `(x1, y1) -> (x2, y2)` in device space.
pub fn create_linear_gradient(table: &mut HandleTable, x1: f64, y1: f64, x2: f64, y2: f64) -> Handle {
    let result = Gradient::new_linear(x1, y1, x2, y2).map(Resource::Gradient);
    table.created(result)
}

/// Create a gradient from the circle `(x0, y0, r0)` to the circle `(x1, y1, r1)`.
/// Returns `-1` if a radius is negative or any value is not finite.
pub fn create_radial_gradient(
    table: &mut HandleTable,
    x0: f64,
    y0: f64,
    r0: f64,
    x1: f64,
    y1: f64,
    r1: f64,
) -> Handle {
    let result = Gradient::new_radial(x0, y0, r0, x1, y1, r1).map(Resource::Gradient);
    table.created(result)
}

/// Add a stop at `position` in `[0, 1]` with color components in `[0, 1]`.
#[allow(clippy::too_many_arguments)]
pub fn add_color_stop(
    table: &mut HandleTable,
    id: Handle,
    position: f64,
    r: f64,
    g: f64,
    b: f64,
    a: f64,
) -> CanvasResult<()> {
    let color = Rgba::from_components(r, g, b, a)?;
    table.gradient(id)?.add_color_stop(position, color)
}

/// Make `gradient` the paint of canvas `ctx`.
pub fn set_fill_style_gradient(table: &mut HandleTable, ctx: Handle, gradient: Handle) -> CanvasResult<()> {
    let gradient = table.gradient(gradient)?.clone();
    table.canvas_mut(ctx)?.set_gradient(&gradient);
    Ok(())
}

pub fn destroy_gradient(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    table.gradient(id)?;
    table.remove(id).map(drop)
}
