//! One-shot normalization of source pixel layouts into the canonical buffer.
//!
//! The filtering engine only ever sees [`Rgba8`]: four 8-bit channels with
//! straight (non-premultiplied) alpha. Whatever layout the caller starts from
//! is converted exactly once at ingress; the hot filter loops never dispatch
//! on a source format.

use crate::error::ImageError;
use crate::image::{Image, ImageSize, Rgba8};

/// Source pixel layouts accepted at ingress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelLayout {
    /// 4 bytes per pixel, R,G,B,A with straight alpha.
    Rgba8,
    /// 4 bytes per pixel, R,G,B,A with color channels premultiplied by alpha.
    Rgba8Premultiplied,
    /// 3 bytes per pixel, R,G,B, fully opaque.
    Rgb8,
    /// 1 byte per pixel, replicated into R,G,B, fully opaque.
    Gray8,
    /// 2 bytes per pixel, big-endian 16-bit gray; the high byte is kept.
    Gray16BigEndian,
    /// 1 byte per pixel indexing into an RGBA palette.
    Indexed8 {
        /// Palette entries as straight-alpha RGBA.
        palette: Vec<[u8; 4]>,
    },
    /// 3 bytes per pixel, Y,Cb,Cr per BT.601, fully opaque.
    Ycbcr8,
}

impl PixelLayout {
    /// Number of source bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelLayout::Rgba8 | PixelLayout::Rgba8Premultiplied => 4,
            PixelLayout::Rgb8 | PixelLayout::Ycbcr8 => 3,
            PixelLayout::Gray8 | PixelLayout::Indexed8 { .. } => 1,
            PixelLayout::Gray16BigEndian => 2,
        }
    }
}

/// Convert raw source bytes into the canonical straight-alpha RGBA8 buffer.
///
/// # Errors
///
/// Returns [`ImageError::InvalidChannelShape`] if `data` does not hold exactly
/// `width * height` pixels for the layout, and
/// [`ImageError::InvalidPaletteIndex`] if an indexed pixel points outside the
/// palette.
pub fn to_canonical(
    data: &[u8],
    size: ImageSize,
    layout: &PixelLayout,
) -> Result<Rgba8, ImageError> {
    let num_pixels = size.width * size.height;
    let expected = num_pixels * layout.bytes_per_pixel();
    if data.len() != expected {
        return Err(ImageError::InvalidChannelShape(data.len(), expected));
    }

    let mut out = Vec::with_capacity(num_pixels * 4);

    match layout {
        PixelLayout::Rgba8 => out.extend_from_slice(data),
        PixelLayout::Rgba8Premultiplied => {
            for px in data.chunks_exact(4) {
                let a = px[3];
                match a {
                    0 => out.extend_from_slice(&[0, 0, 0, 0]),
                    0xff => out.extend_from_slice(px),
                    _ => {
                        for &c in &px[..3] {
                            out.push((c as u16 * 0xff / a as u16) as u8);
                        }
                        out.push(a);
                    }
                }
            }
        }
        PixelLayout::Rgb8 => {
            for px in data.chunks_exact(3) {
                out.extend_from_slice(px);
                out.push(0xff);
            }
        }
        PixelLayout::Gray8 => {
            for &g in data {
                out.extend_from_slice(&[g, g, g, 0xff]);
            }
        }
        PixelLayout::Gray16BigEndian => {
            for px in data.chunks_exact(2) {
                let g = px[0];
                out.extend_from_slice(&[g, g, g, 0xff]);
            }
        }
        PixelLayout::Indexed8 { palette } => {
            for &idx in data {
                let entry = palette
                    .get(idx as usize)
                    .ok_or(ImageError::InvalidPaletteIndex(idx as usize, palette.len()))?;
                out.extend_from_slice(entry);
            }
        }
        PixelLayout::Ycbcr8 => {
            for px in data.chunks_exact(3) {
                let (r, g, b) = ycbcr_to_rgb(px[0], px[1], px[2]);
                out.extend_from_slice(&[r, g, b, 0xff]);
            }
        }
    }

    Image::new(size, out)
}

/// BT.601 YCbCr to RGB.
fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> (u8, u8, u8) {
    let y = y as f32;
    let cb = cb as f32 - 128.0;
    let cr = cr as f32 - 128.0;

    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;

    (
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    )
}
