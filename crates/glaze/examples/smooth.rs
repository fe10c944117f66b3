//! Runs the three smoothing engines over a synthetic image and logs timings.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example smooth
//! ```

use std::time::Instant;

use glaze::filter::{bilateral_filter, gaussian_blur, gaussian_blur_direct, FilterError};
use glaze::image::canonical::{to_canonical, PixelLayout};
use glaze::image::{ImageSize, Rgba8};

fn main() -> Result<(), FilterError> {
    env_logger::init();

    let size = ImageSize {
        width: 640,
        height: 480,
    };

    // grayscale gradient with a hard vertical edge, normalized into the
    // canonical RGBA buffer at ingress
    let mut gray = Vec::with_capacity(size.width * size.height);
    for y in 0..size.height {
        for x in 0..size.width {
            let base = if x < size.width / 2 { 40 } else { 200 };
            gray.push((base + (x * 45 / size.width) + (y % 7)).min(255) as u8);
        }
    }
    let src = to_canonical(&gray, size, &PixelLayout::Gray8)?;

    let mut dst = Rgba8::from_size_val(size, 0)?;

    let start = Instant::now();
    gaussian_blur_direct(&src, &mut dst, 2.0, 3, 4)?;
    log::info!("direct 2d gaussian took {:?}", start.elapsed());

    let start = Instant::now();
    gaussian_blur(&src, &mut dst, 2.0)?;
    log::info!("separable gaussian took {:?}", start.elapsed());

    let start = Instant::now();
    bilateral_filter(&src, &mut dst, 2.0, 10.0)?;
    log::info!("bilateral took {:?}", start.elapsed());

    let edge = (
        *dst.get(size.width / 2 - 1, size.height / 2, 0)?,
        *dst.get(size.width / 2, size.height / 2, 0)?,
    );
    log::info!("bilateral kept the edge at {edge:?}");

    Ok(())
}
