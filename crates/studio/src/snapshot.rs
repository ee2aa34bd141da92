//! PNG load and save for canvases.
//!
//! This module is feature-gated behind `png` (default on) so that callers
//! who only need the warps do not pull in the `image` crate. 16-bit canvases
//! are written as 16-bit PNGs, 8-bit canvases as 8-bit PNGs.

use std::path::Path;

use image::ImageBuffer;
use marbling_core::{Canvas, Channel, ChannelDepth, MarblingError};

use crate::normalize::{stretch_to_full_range, to_working_range};

/// Writes `canvas` as an RGB PNG after stretching it over the full channel
/// range.
///
/// Returns `MarblingError::InvalidDimensions` if the canvas dimensions
/// overflow `u32`, or `MarblingError::Io` on encode or write failure.
pub fn write_png<C: Channel>(canvas: &Canvas<C>, path: &Path) -> Result<(), MarblingError> {
    let stretched = stretch_to_full_range(canvas)?;
    let w = u32::try_from(canvas.width()).map_err(|_| MarblingError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| MarblingError::InvalidDimensions)?;
    let values = stretched.pixels().iter().copied();
    let saved = match C::DEPTH {
        ChannelDepth::Sixteen => {
            let raw: Vec<u16> = values.map(Channel::to_u16).collect();
            ImageBuffer::<image::Rgb<u16>, _>::from_raw(w, h, raw)
                .ok_or_else(|| MarblingError::Io("RGB16 buffer size mismatch".into()))?
                .save(path)
        }
        ChannelDepth::Eight => {
            let raw: Vec<u8> = values.map(Channel::to_u8).collect();
            ImageBuffer::<image::Rgb<u8>, _>::from_raw(w, h, raw)
                .ok_or_else(|| MarblingError::Io("RGB8 buffer size mismatch".into()))?
                .save(path)
        }
    };
    saved.map_err(|e| MarblingError::Io(format!("{}: {e}", path.display())))?;
    tracing::debug!(
        path = %path.display(),
        width = w,
        height = h,
        bits = C::DEPTH.bits(),
        "png written"
    );
    Ok(())
}

/// Loads an image as a canvas in its working range.
///
/// Any format the `image` crate decodes with the enabled features is
/// accepted; alpha is dropped. Values are normalized onto
/// `[0, max(height, width) - 1]` (capped at the channel maximum).
pub fn read_png<C: Channel>(path: &Path) -> Result<Canvas<C>, MarblingError> {
    let img = image::open(path).map_err(|e| MarblingError::Io(format!("{}: {e}", path.display())))?;
    let (w, h, data): (u32, u32, Vec<C>) = match C::DEPTH {
        ChannelDepth::Sixteen => {
            let rgb = img.to_rgb16();
            let (w, h) = rgb.dimensions();
            let data = rgb.into_raw().into_iter().map(|v| C::from_f64(f64::from(v))).collect();
            (w, h, data)
        }
        ChannelDepth::Eight => {
            let rgb = img.to_rgb8();
            let (w, h) = rgb.dimensions();
            (w, h, rgb.into_raw().into_iter().map(C::from_u8).collect())
        }
    };
    let (w, h) = (w as usize, h as usize);
    let canvas = Canvas::from_raw(h, w, data)?;
    tracing::debug!(path = %path.display(), width = w, height = h, "init image loaded");
    to_working_range(&canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marbling_core::Rgb;

    fn gradient<C: Channel>(h: usize, w: usize) -> Canvas<C> {
        let data = (0..h * w * 3).map(|i| C::from_f64((i % 97) as f64)).collect();
        Canvas::from_raw(h, w, data).unwrap()
    }

    #[test]
    fn write_png_16_bit_round_trip() {
        let canvas = gradient::<u16>(12, 20);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        write_png(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.color(), image::ColorType::Rgb16);
        let rgb = img.to_rgb16();
        assert_eq!(rgb.dimensions(), (20, 12));
        let raw = rgb.into_raw();
        assert_eq!(raw.iter().copied().min(), Some(0));
        assert_eq!(raw.iter().copied().max(), Some(u16::MAX));
    }

    #[test]
    fn write_png_8_bit_round_trip() {
        let canvas = gradient::<u8>(5, 7);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out8.png");

        write_png(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.color(), image::ColorType::Rgb8);
        let rgb = img.to_rgb8();
        assert_eq!(rgb.dimensions(), (7, 5));
        let raw = rgb.into_raw();
        assert_eq!(raw.iter().copied().min(), Some(0));
        assert_eq!(raw.iter().copied().max(), Some(u8::MAX));
    }

    #[test]
    fn written_values_match_stretched_canvas() {
        let mut data = vec![20_u16; 3 * 2 * 2];
        data[0] = 10;
        data[11] = 30;
        let canvas = Canvas::from_raw(2, 2, data).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exact.png");
        write_png(&canvas, &path).unwrap();
        let raw = image::open(&path).unwrap().to_rgb16().into_raw();
        assert_eq!(raw[0], 0);
        assert_eq!(raw[1], 32768);
        assert_eq!(raw[11], u16::MAX);
    }

    #[test]
    fn read_png_normalizes_to_working_range() {
        let canvas = gradient::<u16>(6, 10);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("init.png");
        write_png(&canvas, &path).unwrap();

        let loaded: Canvas<u16> = read_png(&path).unwrap();
        assert_eq!((loaded.height(), loaded.width()), (6, 10));
        assert_eq!(loaded.pixels().iter().copied().min(), Some(0));
        assert_eq!(loaded.pixels().iter().copied().max(), Some(9));
    }

    #[test]
    fn constant_canvas_writes_black() {
        let canvas = Canvas::<u16>::new(3, 3, Rgb::splat(255)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        write_png(&canvas, &path).unwrap();
        let raw = image::open(&path).unwrap().to_rgb16().into_raw();
        assert!(raw.iter().all(|&v| v == 0));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_png::<u16>(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, MarblingError::Io(_)));
    }

    #[test]
    fn write_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.png");
        let canvas = gradient::<u16>(2, 2);
        let err = write_png(&canvas, &path).unwrap_err();
        assert!(matches!(err, MarblingError::Io(_)));
    }
}
