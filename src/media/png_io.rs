//! PNG still-image decode to RGBA8 and encode, with an optional oxipng pass.

use crate::error::MediaError;
use chrono::{DateTime, Utc};
use pixel_dither::Frame;
use std::io::{Cursor, Read};

/// Decode a PNG of any colour type and bit depth into an RGBA8 frame.
pub fn decode_png<R: Read>(input: R) -> Result<Frame, MediaError> {
    let mut decoder = png::Decoder::new(input);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| MediaError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| MediaError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let width = info.width as usize;
    let height = info.height as usize;
    let data = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(MediaError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(width, height, color_type = ?info.color_type, "Decoded PNG");
    Ok(Frame::new(width, height, data)?)
}

/// Encode an RGBA8 frame as PNG.
///
/// With `optimize`, the fast-encoded image is re-compressed with oxipng; if
/// that fails the fast encoding is returned unchanged.
pub fn encode_png(frame: &Frame, optimize: bool) -> Result<Vec<u8>, MediaError> {
    let (width, height) = match (u32::try_from(frame.width()), u32::try_from(frame.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(MediaError::UnsupportedDimensions {
                width: frame.width(),
                height: frame.height(),
            })
        }
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| MediaError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(frame.data())
            .map_err(|e| MediaError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            Ok(optimized)
        }
        Err(e) => {
            tracing::warn!(error = %e, "PNG optimization failed, keeping fast encoding");
            Ok(png_bytes)
        }
    }
}

/// `pixel-art-<unix-millis>.png` for the current time
pub fn default_output_name() -> String {
    output_name_at(Utc::now())
}

pub fn output_name_at(time: DateTime<Utc>) -> String {
    format!("pixel-art-{}.png", time.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encode_raw(color: png::ColorType, depth: png::BitDepth, w: u32, h: u32, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, w, h);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_rgba_survives_encode_decode() {
        let frame = Frame::new(2, 1, vec![10, 20, 30, 255, 40, 50, 60, 128]).unwrap();
        let bytes = encode_png(&frame, false).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(decode_png(bytes.as_slice()).unwrap(), frame);
    }

    #[test]
    fn test_optimized_output_decodes_identically() {
        let frame = Frame::filled(16, 16, [90, 80, 70, 255]).unwrap();
        let bytes = encode_png(&frame, true).unwrap();
        assert_eq!(decode_png(bytes.as_slice()).unwrap(), frame);
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        let bytes = encode_raw(png::ColorType::Rgb, png::BitDepth::Eight, 1, 1, &[1, 2, 3]);
        let frame = decode_png(bytes.as_slice()).unwrap();
        assert_eq!(frame.pixel(0, 0), [1, 2, 3, 255]);
    }

    #[test]
    fn test_grayscale_expands_to_rgb() {
        let bytes = encode_raw(png::ColorType::Grayscale, png::BitDepth::Eight, 2, 1, &[0, 200]);
        let frame = decode_png(bytes.as_slice()).unwrap();
        assert_eq!(frame.pixel(1, 0), [200, 200, 200, 255]);
    }

    #[test]
    fn test_gray_alpha_keeps_alpha() {
        let bytes = encode_raw(png::ColorType::GrayscaleAlpha, png::BitDepth::Eight, 1, 1, &[50, 7]);
        let frame = decode_png(bytes.as_slice()).unwrap();
        assert_eq!(frame.pixel(0, 0), [50, 50, 50, 7]);
    }

    #[test]
    fn test_sixteen_bit_is_stripped() {
        let bytes = encode_raw(
            png::ColorType::Rgb,
            png::BitDepth::Sixteen,
            1,
            1,
            &[0xAB, 0x00, 0x12, 0x00, 0xFF, 0xFF],
        );
        let frame = decode_png(bytes.as_slice()).unwrap();
        assert_eq!(frame.pixel(0, 0), [0xAB, 0x12, 0xFF, 255]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = decode_png(&b"not a png"[..]);
        assert!(matches!(result, Err(MediaError::PngDecode(_))));
    }

    #[test]
    fn test_output_name_uses_millis() {
        let time = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(output_name_at(time), "pixel-art-1700000000123.png");
    }
}
