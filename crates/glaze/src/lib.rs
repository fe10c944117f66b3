#![deny(missing_docs)]
//! In-memory image smoothing: Gaussian and bilateral filtering over a
//! canonical RGBA8 buffer, parallelized across row partitions.

#[doc(inline)]
pub use glaze_image as image;

#[doc(inline)]
pub use glaze_filter as filter;
