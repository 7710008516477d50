//! Handle operations, grouped the same way as the canvas methods they wrap.

mod drawing;
mod gradient;
mod image_ops;
mod layers;
mod path_ops;
mod state;
mod text;
mod transform;

pub use drawing::*;
pub use gradient::*;
pub use image_ops::*;
pub use layers::*;
pub use path_ops::*;
pub use state::*;
pub use text::*;
pub use transform::*;

use crate::resource::{Handle, HandleTable, Resource};
use advancegg_canvas::{Canvas, CanvasError, CanvasResult};

// --- Canvas creation and lifecycle ---

/// Create a transparent canvas. Returns `-1` if either dimension is not
/// positive or exceeds the configured maximum.
pub fn create_context(table: &mut HandleTable, width: i64, height: i64) -> Handle {
    let result = dimensions(width, height)
        .and_then(|(w, h)| Canvas::new(w, h))
        .map(Resource::Canvas);
    table.created(result)
}

/// Destroy a canvas and free its pixels.
pub fn destroy_context(table: &mut HandleTable, id: Handle) -> CanvasResult<()> {
    match table.get(id)? {
        Resource::Canvas(_) => {
            table.remove(id)?;
            Ok(())
        }
        _ => Err(CanvasError::InvalidHandle(id)),
    }
}

/// Width and height of a canvas or layer.
pub fn context_size(table: &HandleTable, id: Handle) -> CanvasResult<(u32, u32)> {
    let canvas = table.canvas(id)?;
    Ok((canvas.width(), canvas.height()))
}

pub(crate) fn dimensions(width: i64, height: i64) -> CanvasResult<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(CanvasError::InvalidDimensions {
            width: width.clamp(0, u32::MAX as i64) as u32,
            height: height.clamp(0, u32::MAX as i64) as u32,
        }),
    }
}
