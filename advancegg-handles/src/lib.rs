//! Integer-handle operation set over the advancegg-canvas engine.
//!
//! Every canvas, gradient and layer manager lives in a [`HandleTable`] and
//! is addressed by an `i64` handle. Operations are free functions taking
//! the table and the handles they act on, which is the shape a C ABI shim
//! needs. Creation operations return [`INVALID_HANDLE`] on failure and keep
//! the error for [`HandleTable::take_last_error`]; every other operation
//! returns a `CanvasResult`.
//!
//! ```rust,no_run
//! use advancegg_handles::{self as gg, HandleTable, INVALID_HANDLE};
//!
//! # fn main() -> advancegg_canvas::CanvasResult<()> {
//! let mut table = HandleTable::new();
//! let ctx = gg::create_context(&mut table, 100, 100);
//! assert_ne!(ctx, INVALID_HANDLE);
//! gg::set_rgb(&mut table, ctx, 1.0, 0.0, 0.0)?;
//! gg::draw_circle(&mut table, ctx, 50.0, 50.0, 30.0)?;
//! gg::fill(&mut table, ctx)?;
//! gg::save_png(&mut table, ctx, "circle.png")?;
//! gg::destroy_context(&mut table, ctx)?;
//! # Ok(())
//! # }
//! ```

mod ops;
mod resource;

pub use ops::*;
pub use resource::{Handle, HandleTable, Resource, INVALID_HANDLE};
