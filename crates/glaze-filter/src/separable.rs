//! Separable convolution: two 1D passes instead of one 2D pass.

use glaze_image::{Image, ImageError, PixelCast};

use crate::error::FilterError;
use crate::kernels::Kernel1d;
use crate::parallel::{dispatch_rows, ExecutionStrategy};

/// Convolve an image with a 1D kernel applied horizontally, then vertically.
///
/// Because the 2D Gaussian factors into the outer product of the same 1D
/// kernel, the two passes together equal the direct 2D convolution while the
/// per-pixel cost drops from O(r^2) to O(r). The horizontal pass accumulates
/// into an `f32` intermediate image; only the vertical pass casts back to the
/// channel type, rounding and clamping.
///
/// Boundary policy matches [`crate::convolution::convolve_2d`]: out-of-range
/// taps are skipped and each pass renormalizes by the weight mass it actually
/// used.
pub fn separable_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel1d,
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
    let stride = cols * C;
    let radius = kernel.radius() as isize;
    let weights = kernel.weights();
    let offsets: Vec<isize> = (0..weights.len())
        .map(|i| i as isize - radius)
        .collect();

    let src_data = src.as_slice();
    let mut temp = vec![0.0f32; src_data.len()];

    // Horizontal pass: src -> temp
    dispatch_rows(&mut temp, stride, rows, strategy, |range, chunk| {
        for (local_y, row_out) in chunk.chunks_exact_mut(stride).enumerate() {
            let row_offset = (range.start + local_y) * stride;
            for x in 0..cols {
                let mut acc = [0.0f32; C];
                let mut mass = 0.0f32;

                for (&w, &off) in weights.iter().zip(offsets.iter()) {
                    let xx = x as isize + off;
                    if xx < 0 || xx >= cols as isize {
                        continue;
                    }
                    let idx = row_offset + xx as usize * C;
                    for (ch, a) in acc.iter_mut().enumerate() {
                        *a += src_data[idx + ch].to_f32() * w;
                    }
                    mass += w;
                }

                let out = &mut row_out[x * C..(x + 1) * C];
                for (ch, o) in out.iter_mut().enumerate() {
                    *o = acc[ch] / mass;
                }
            }
        }
    })?;

    // Vertical pass: temp -> dst
    dispatch_rows(dst.as_slice_mut(), stride, rows, strategy, |range, chunk| {
        for (local_y, row_out) in chunk.chunks_exact_mut(stride).enumerate() {
            let y = range.start + local_y;
            for x in 0..cols {
                let mut acc = [0.0f32; C];
                let mut mass = 0.0f32;

                for (&w, &off) in weights.iter().zip(offsets.iter()) {
                    let yy = y as isize + off;
                    if yy < 0 || yy >= rows as isize {
                        continue;
                    }
                    let idx = yy as usize * stride + x * C;
                    for (ch, a) in acc.iter_mut().enumerate() {
                        *a += temp[idx + ch] * w;
                    }
                    mass += w;
                }

                let out = &mut row_out[x * C..(x + 1) * C];
                for (ch, o) in out.iter_mut().enumerate() {
                    *o = T::from_f32(acc[ch] / mass);
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convolution::convolve_2d;
    use crate::kernels::{gaussian_kernel_1d, Kernel2d};
    use approx::assert_relative_eq;
    use glaze_image::ImageSize;

    #[test]
    fn uniform_image_stays_uniform() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 9,
            height: 6,
        };
        let src = Image::<u8, 4>::new(size, vec![201; 9 * 6 * 4])?;
        let mut dst = Image::from_size_val(size, 0u8)?;

        let kernel = gaussian_kernel_1d(1.0)?;
        separable_filter(&src, &mut dst, &kernel, ExecutionStrategy::Serial)?;

        assert!(dst.as_slice().iter().all(|&v| v == 201));
        Ok(())
    }

    #[test]
    fn matches_direct_2d_with_outer_product_kernel() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 11,
            height: 8,
        };
        let data: Vec<f32> = (0..11 * 8 * 3).map(|i| (i * 17 % 251) as f32).collect();
        let src = Image::<f32, 3>::new(size, data)?;

        let kernel = gaussian_kernel_1d(0.5)?;
        let mut separable = Image::from_size_val(size, 0.0f32)?;
        separable_filter(&src, &mut separable, &kernel, ExecutionStrategy::Serial)?;

        // the equivalent 2D kernel is the outer product of the 1D kernel with itself
        let w = kernel.weights();
        let outer: Vec<f32> = w
            .iter()
            .flat_map(|&wy| w.iter().map(move |&wx| wx * wy))
            .collect();
        let kernel_2d = Kernel2d::from_weights(outer, kernel.radius())?;
        let mut direct = Image::from_size_val(size, 0.0f32)?;
        convolve_2d(&src, &mut direct, &kernel_2d, ExecutionStrategy::Serial)?;

        for (&a, &b) in separable.as_slice().iter().zip(direct.as_slice().iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-3);
        }
        Ok(())
    }

    #[test]
    fn impulse_spreads_along_both_axes() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 9,
            height: 9,
        };
        let mut data = vec![0.0f32; 81];
        data[4 * 9 + 4] = 81.0;
        let src = Image::<f32, 1>::new(size, data)?;
        let mut dst = Image::from_size_val(size, 0.0f32)?;

        let kernel = gaussian_kernel_1d(0.5)?;
        separable_filter(&src, &mut dst, &kernel, ExecutionStrategy::Serial)?;

        let center = *dst.get(4, 4, 0)?;
        assert!(center > 0.0 && center < 81.0);
        assert!(*dst.get(4, 3, 0)? > 0.0);
        assert!(*dst.get(3, 4, 0)? > 0.0);
        // mass is conserved away from borders
        let total: f32 = dst.as_slice().iter().sum();
        assert_relative_eq!(total, 81.0, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn degenerate_extents_are_safe() -> Result<(), FilterError> {
        // kernel radius exceeds every extent here; only in-bounds taps count
        let kernel = gaussian_kernel_1d(2.0)?;
        for (w, h) in [(1, 7), (7, 1), (1, 1)] {
            let size = ImageSize {
                width: w,
                height: h,
            };
            let src = Image::<u8, 4>::new(size, vec![55; w * h * 4])?;
            let mut dst = Image::from_size_val(size, 0u8)?;
            separable_filter(&src, &mut dst, &kernel, ExecutionStrategy::Auto)?;
            assert!(dst.as_slice().iter().all(|&v| v == 55));
        }
        Ok(())
    }

    #[test]
    fn strategies_agree() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 23,
            height: 13,
        };
        let data: Vec<u8> = (0..23 * 13 * 4).map(|i| (i * 13 % 256) as u8).collect();
        let src = Image::<u8, 4>::new(size, data)?;
        let kernel = gaussian_kernel_1d(1.5)?;

        let mut serial = Image::from_size_val(size, 0u8)?;
        separable_filter(&src, &mut serial, &kernel, ExecutionStrategy::Serial)?;

        for strategy in [ExecutionStrategy::Auto, ExecutionStrategy::Workers(5)] {
            let mut dst = Image::from_size_val(size, 0u8)?;
            separable_filter(&src, &mut dst, &kernel, strategy)?;
            assert_eq!(dst.as_slice(), serial.as_slice());
        }
        Ok(())
    }
}
