//! Direct 2D convolution.

use glaze_image::{Image, ImageError, PixelCast};

use crate::error::FilterError;
use crate::kernels::Kernel2d;
use crate::parallel::{dispatch_rows, ExecutionStrategy};

/// Convolve an image with a square 2D kernel in a single pass.
///
/// For every destination pixel the full kernel window is walked; taps that
/// fall outside the image are skipped (no padding, no wrapping) and the sum
/// is renormalized by the weight mass actually accumulated, so border pixels
/// keep the same brightness as the interior. The final cast back to the
/// channel type clamps, never wraps.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C), read-only and shared
///   across workers.
/// * `dst` - The destination image with shape (H, W, C); each worker writes a
///   disjoint row range.
/// * `kernel` - The normalized 2D kernel.
/// * `strategy` - How to schedule the row partitions.
pub fn convolve_2d<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel2d,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError>
where
    T: PixelCast,
{
    if src.size() != dst.size() {
        return Err(FilterError::Image(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )));
    }

    let rows = src.rows();
    let cols = src.cols();
    let radius = kernel.radius() as isize;
    let side = kernel.side();
    let src_data = src.as_slice();

    dispatch_rows(
        dst.as_slice_mut(),
        cols * C,
        rows,
        strategy,
        |range, chunk| {
            for (local_y, row_out) in chunk.chunks_exact_mut(cols * C).enumerate() {
                let y = range.start + local_y;
                for x in 0..cols {
                    let mut acc = [0.0f32; C];
                    let mut mass = 0.0f32;

                    for ky in 0..side {
                        let yy = y as isize + ky as isize - radius;
                        if yy < 0 || yy >= rows as isize {
                            continue;
                        }
                        for kx in 0..side {
                            let xx = x as isize + kx as isize - radius;
                            if xx < 0 || xx >= cols as isize {
                                continue;
                            }

                            let w = kernel.weight(kx, ky);
                            let idx = (yy as usize * cols + xx as usize) * C;
                            for (ch, a) in acc.iter_mut().enumerate() {
                                *a += src_data[idx + ch].to_f32() * w;
                            }
                            mass += w;
                        }
                    }

                    let out = &mut row_out[x * C..(x + 1) * C];
                    for (ch, o) in out.iter_mut().enumerate() {
                        *o = if mass > 0.0 {
                            T::from_f32(acc[ch] / mass)
                        } else {
                            T::from_f32(0.0)
                        };
                    }
                }
            }
        },
    )
}
