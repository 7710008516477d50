//! PNG and JPEG encoding of pixmaps, and PNG decoding.

use crate::color::{demultiply, premultiply};
use crate::error::{CanvasError, CanvasResult};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use tiny_skia::Pixmap;

/// Encode as 8-bit straight-alpha RGBA PNG with the given pixel density.
pub fn encode_png(pixmap: &Pixmap, ppi: f32) -> CanvasResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        // Set pixel density metadata (pixels per meter)
        let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;

        // Convert from premultiplied to straight alpha for PNG
        let mut data = Vec::with_capacity(pixmap.data().len());
        for p in pixmap.pixels() {
            data.extend_from_slice(&demultiply(*p));
        }
        writer.write_image_data(&data)?;
    }
    Ok(buf)
}

/// Encode as baseline JPEG. `quality` must be in `0..=100`; 0 is encoded as 1.
///
/// JPEG has no alpha: the premultiplied color is written, which is the
/// image composited over black.
pub fn encode_jpeg(pixmap: &Pixmap, quality: i32) -> CanvasResult<Vec<u8>> {
    if !(0..=100).contains(&quality) {
        return Err(CanvasError::invalid_parameter(format!(
            "JPEG quality must be in 0..=100, got {quality}"
        )));
    }
    let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
    for p in pixmap.pixels() {
        rgb.extend_from_slice(&[p.red(), p.green(), p.blue()]);
    }
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.max(1) as u8).encode(
        &rgb,
        pixmap.width(),
        pixmap.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

/// Decode a PNG of any color type and bit depth into a premultiplied pixmap.
pub fn decode_png(bytes: &[u8]) -> CanvasResult<Pixmap> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];
    let (width, height) = (info.width, info.height);

    let mut pixmap =
        Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;
    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(CanvasError::PngError("unexpanded palette image".to_string()))
        }
    };
    for (p, px) in pixmap.pixels_mut().iter_mut().zip(data.chunks_exact(channels)) {
        let [r, g, b, a] = match *px {
            [v] => [v, v, v, 255],
            [v, a] => [v, v, v, a],
            [r, g, b] => [r, g, b, 255],
            [r, g, b, a] => [r, g, b, a],
            _ => [0, 0, 0, 0],
        };
        *p = premultiply(r, g, b, a);
    }
    Ok(pixmap)
}
