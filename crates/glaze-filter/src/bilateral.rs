//! Edge-preserving bilateral filtering.
//!
//! The bilateral filter weights every neighbor by the product of two
//! Gaussians: one over spatial distance and one over color distance to the
//! center pixel. Neighbors across a color edge get a near-zero weight, so
//! smooth regions are averaged while edges survive.

use glaze_image::{ImageError, PixelCast, Rgba8};

use crate::error::FilterError;
use crate::kernels::gaussian_lookup_table;
use crate::parallel::{dispatch_rows, ExecutionStrategy};
use crate::partition::PartitionRange;

/// Apply the single-pass 2D bilateral filter with the default strategy.
///
/// See [`bilateral_filter_with_strategy`].
pub fn bilateral_filter(
    src: &Rgba8,
    dst: &mut Rgba8,
    spatial_sigma: f32,
    intensity_sigma: f32,
) -> Result<(), FilterError> {
    bilateral_filter_with_strategy(
        src,
        dst,
        spatial_sigma,
        intensity_sigma,
        ExecutionStrategy::Auto,
    )
}

/// Apply the single-pass 2D bilateral filter.
///
/// The window half-width is `ceil(3 * max(spatial_sigma, intensity_sigma))`.
/// Both weight tables are magnitude-indexed lookup kernels of length
/// `radius + 1`; spatial and color distances are rounded to the nearest
/// integer and saturate at `radius`. Out-of-bounds taps are skipped and every
/// pixel renormalizes by the weight mass it accumulated, so borders behave
/// like the interior. Alpha is accumulated like any other channel; color
/// distance is measured over R,G,B only.
pub fn bilateral_filter_with_strategy(
    src: &Rgba8,
    dst: &mut Rgba8,
    spatial_sigma: f32,
    intensity_sigma: f32,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    let (radius, spatial, intensity) =
        lookup_kernels(src, dst, spatial_sigma, intensity_sigma)?;

    let rows = src.rows();
    let cols = src.cols();
    let src_data = src.as_slice();

    dispatch_rows(
        dst.as_slice_mut(),
        cols * 4,
        rows,
        strategy,
        |range: PartitionRange, chunk: &mut [u8]| {
            for (local_y, row_out) in chunk.chunks_exact_mut(cols * 4).enumerate() {
                let y = range.start + local_y;
                for x in 0..cols {
                    let center = &src_data[(y * cols + x) * 4..(y * cols + x) * 4 + 3];
                    let mut acc = [0.0f32; 4];
                    let mut mass = 0.0f32;

                    for dy in -(radius as isize)..=radius as isize {
                        let yy = y as isize + dy;
                        if yy < 0 || yy >= rows as isize {
                            continue;
                        }
                        for dx in -(radius as isize)..=radius as isize {
                            let xx = x as isize + dx;
                            if xx < 0 || xx >= cols as isize {
                                continue;
                            }

                            let idx = (yy as usize * cols + xx as usize) * 4;
                            let neighbor = &src_data[idx..idx + 4];

                            let spatial_dist = ((dx * dx + dy * dy) as f32)
                                .sqrt()
                                .round() as usize;
                            let w = spatial[spatial_dist.min(radius)]
                                * intensity[color_distance(center, neighbor).min(radius)];

                            for (ch, a) in acc.iter_mut().enumerate() {
                                *a += neighbor[ch] as f32 * w;
                            }
                            mass += w;
                        }
                    }

                    let out = &mut row_out[x * 4..(x + 1) * 4];
                    for (ch, o) in out.iter_mut().enumerate() {
                        *o = u8::from_f32(acc[ch] / mass);
                    }
                }
            }
        },
    )
}

/// Apply a separable two-pass approximation of the bilateral filter.
///
/// Runs a 1D bilateral pass horizontally, then vertically over the rounded
/// intermediate. This is a faster approximation with reduced accuracy, since
/// the bilateral filter does not factor into 1D passes the way a Gaussian
/// does, and it is never the default; use [`bilateral_filter`] for the exact
/// result.
pub fn bilateral_filter_approx(
    src: &Rgba8,
    dst: &mut Rgba8,
    spatial_sigma: f32,
    intensity_sigma: f32,
) -> Result<(), FilterError> {
    bilateral_filter_approx_with_strategy(
        src,
        dst,
        spatial_sigma,
        intensity_sigma,
        ExecutionStrategy::Auto,
    )
}

/// [`bilateral_filter_approx`] with an explicit execution strategy.
pub fn bilateral_filter_approx_with_strategy(
    src: &Rgba8,
    dst: &mut Rgba8,
    spatial_sigma: f32,
    intensity_sigma: f32,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    let (radius, spatial, intensity) =
        lookup_kernels(src, dst, spatial_sigma, intensity_sigma)?;

    let mut temp = Rgba8::from_size_val(src.size(), 0)?;
    axis_pass(src, &mut temp, radius, &spatial, &intensity, Axis::X, strategy)?;
    axis_pass(&temp, dst, radius, &spatial, &intensity, Axis::Y, strategy)
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// One 1D bilateral pass along a single axis.
fn axis_pass(
    src: &Rgba8,
    dst: &mut Rgba8,
    radius: usize,
    spatial: &[f32],
    intensity: &[f32],
    axis: Axis,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    let rows = src.rows();
    let cols = src.cols();
    let src_data = src.as_slice();

    dispatch_rows(
        dst.as_slice_mut(),
        cols * 4,
        rows,
        strategy,
        |range: PartitionRange, chunk: &mut [u8]| {
            for (local_y, row_out) in chunk.chunks_exact_mut(cols * 4).enumerate() {
                let y = range.start + local_y;
                for x in 0..cols {
                    let center = &src_data[(y * cols + x) * 4..(y * cols + x) * 4 + 3];
                    let mut acc = [0.0f32; 4];
                    let mut mass = 0.0f32;

                    for d in -(radius as isize)..=radius as isize {
                        let (xx, yy) = match axis {
                            Axis::X => (x as isize + d, y as isize),
                            Axis::Y => (x as isize, y as isize + d),
                        };
                        if xx < 0 || xx >= cols as isize || yy < 0 || yy >= rows as isize {
                            continue;
                        }

                        let idx = (yy as usize * cols + xx as usize) * 4;
                        let neighbor = &src_data[idx..idx + 4];

                        let w = spatial[d.unsigned_abs().min(radius)]
                            * intensity[color_distance(center, neighbor).min(radius)];

                        for (ch, a) in acc.iter_mut().enumerate() {
                            *a += neighbor[ch] as f32 * w;
                        }
                        mass += w;
                    }

                    let out = &mut row_out[x * 4..(x + 1) * 4];
                    for (ch, o) in out.iter_mut().enumerate() {
                        *o = u8::from_f32(acc[ch] / mass);
                    }
                }
            }
        },
    )
}

/// Validate parameters and build the two magnitude-indexed weight tables.
fn lookup_kernels(
    src: &Rgba8,
    dst: &Rgba8,
    spatial_sigma: f32,
    intensity_sigma: f32,
) -> Result<(usize, Vec<f32>, Vec<f32>), FilterError> {
    if src.size() != dst.size() {
        return Err(FilterError::Image(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )));
    }

    let radius = (3.0 * spatial_sigma.max(intensity_sigma)).ceil() as usize;
    let spatial = gaussian_lookup_table(radius, spatial_sigma)?;
    let intensity = gaussian_lookup_table(radius, intensity_sigma)?;
    Ok((radius, spatial, intensity))
}

/// Rounded Euclidean distance between two colors over R,G,B.
fn color_distance(center: &[u8], neighbor: &[u8]) -> usize {
    let dr = center[0] as f32 - neighbor[0] as f32;
    let dg = center[1] as f32 - neighbor[1] as f32;
    let db = center[2] as f32 - neighbor[2] as f32;
    (dr * dr + dg * dg + db * db).sqrt().round() as usize
}
