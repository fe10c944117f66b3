#![deny(missing_docs)]
//! Image buffer types for the glaze smoothing engine.

/// Canonical pixel-format normalization at ingress.
pub mod canonical;

/// Error types for the image module.
pub mod error;

/// Dense row-major image buffers.
pub mod image;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize, PixelCast, Rgba8};
