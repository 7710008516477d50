//! Filters and file output.
//!
//! Filters leave the source canvas alone and return the handle of a new
//! canvas, or `-1` when the parameter is rejected.

use crate::resource::{Handle, HandleTable, Resource};
use advancegg_canvas::{Canvas, CanvasResult};
use std::path::Path;

fn filtered(
    table: &mut HandleTable,
    id: Handle,
    filter: impl FnOnce(&Canvas) -> CanvasResult<Canvas>,
) -> Handle {
    let result = table.canvas(id).and_then(filter).map(Resource::Canvas);
    table.created(result)
}

/// Gaussian blur with the given radius in pixels.
pub fn apply_blur(table: &mut HandleTable, id: Handle, radius: f64) -> Handle {
    filtered(table, id, |c| c.apply_blur(radius))
}

pub fn apply_grayscale(table: &mut HandleTable, id: Handle) -> Handle {
    filtered(table, id, Canvas::apply_grayscale)
}

/// Multiply color channels by `factor`, clamping at full intensity.
pub fn apply_brightness(table: &mut HandleTable, id: Handle, factor: f64) -> Handle {
    filtered(table, id, |c| c.apply_brightness(factor))
}

pub fn apply_contrast(table: &mut HandleTable, id: Handle, factor: f64) -> Handle {
    filtered(table, id, |c| c.apply_contrast(factor))
}

pub fn apply_invert(table: &mut HandleTable, id: Handle) -> Handle {
    filtered(table, id, Canvas::apply_invert)
}

pub fn apply_sepia(table: &mut HandleTable, id: Handle) -> Handle {
    filtered(table, id, Canvas::apply_sepia)
}

// --- Output ---

pub fn save_png(table: &mut HandleTable, id: Handle, path: impl AsRef<Path>) -> CanvasResult<()> {
    table.canvas(id)?.save_png(path)
}

/// Save as JPEG with `quality` in `0..=100`.
pub fn save_jpeg(
    table: &mut HandleTable,
    id: Handle,
    path: impl AsRef<Path>,
    quality: i32,
) -> CanvasResult<()> {
    table.canvas(id)?.save_jpeg(path, quality)
}

/// Create a canvas from a PNG file.
pub fn load_png(table: &mut HandleTable, path: impl AsRef<Path>) -> Handle {
    let result = Canvas::load_png(path).map(Resource::Canvas);
    table.created(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clear, create_context, get_pixel, set_rgb, INVALID_HANDLE};
    use advancegg_canvas::ErrorKind;
    use rstest::rstest;

    fn gray_canvas(table: &mut HandleTable) -> Handle {
        let ctx = create_context(table, 8, 8);
        set_rgb(table, ctx, 0.4, 0.4, 0.4).unwrap();
        clear(table, ctx).unwrap();
        ctx
    }

    #[test]
    fn test_filters_return_new_handles() {
        let mut table = HandleTable::new();
        let ctx = gray_canvas(&mut table);
        let blurred = apply_blur(&mut table, ctx, 2.0);
        let gray = apply_grayscale(&mut table, ctx);
        let bright = apply_brightness(&mut table, ctx, 2.0);
        for id in [blurred, gray, bright] {
            assert!(id > ctx);
        }
        assert_eq!(get_pixel(&table, gray, 3, 3).unwrap(), get_pixel(&table, ctx, 3, 3).unwrap());
        assert_eq!(get_pixel(&table, bright, 0, 0).unwrap(), Some([204, 204, 204, 255]));
        assert_eq!(get_pixel(&table, ctx, 0, 0).unwrap(), Some([102, 102, 102, 255]));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn test_bad_filter_parameter_gives_sentinel(#[case] value: f64) {
        let mut table = HandleTable::new();
        let ctx = gray_canvas(&mut table);
        assert_eq!(apply_blur(&mut table, ctx, value), INVALID_HANDLE);
        assert_eq!(table.take_last_error().unwrap().kind(), ErrorKind::InvalidParameter);
        assert_eq!(apply_brightness(&mut table, ctx, value), INVALID_HANDLE);
    }

    #[test]
    fn test_filter_on_unknown_handle() {
        let mut table = HandleTable::new();
        assert_eq!(apply_grayscale(&mut table, 99), INVALID_HANDLE);
        assert_eq!(table.take_last_error().unwrap().kind(), ErrorKind::InvalidHandle);
    }

    #[test]
    fn test_png_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut table = HandleTable::new();
        let ctx = gray_canvas(&mut table);
        save_png(&mut table, ctx, &path).unwrap();
        let loaded = load_png(&mut table, &path);
        assert_eq!(table.canvas(loaded).unwrap().pixels(), table.canvas(ctx).unwrap().pixels());
    }

    #[rstest]
    #[case(-1)]
    #[case(101)]
    fn test_jpeg_quality_out_of_range(#[case] quality: i32) {
        let dir = tempfile::tempdir().unwrap();
        let mut table = HandleTable::new();
        let ctx = gray_canvas(&mut table);
        let err = save_jpeg(&mut table, ctx, dir.path().join("out.jpg"), quality).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_save_to_missing_directory() {
        let mut table = HandleTable::new();
        let ctx = gray_canvas(&mut table);
        let err = save_jpeg(&mut table, ctx, "/no/such/dir/out.jpg", 80).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodeFailure);
    }
}
