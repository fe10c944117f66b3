//! High-level blur entry points.
//!
//! These wrap the engines in [`crate::convolution`] and [`crate::separable`]
//! with kernel construction and parameter validation. All validation happens
//! before any pixel work begins; a failed call leaves the destination
//! untouched.

use glaze_image::{Image, PixelCast};

use crate::error::FilterError;
use crate::kernels::{gaussian_kernel_1d, gaussian_kernel_2d};
use crate::parallel::ExecutionStrategy;
use crate::{convolution, separable};

/// Blur an image with a direct 2D Gaussian convolution over an explicit
/// worker count.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `std_dev` - The standard deviation of the Gaussian; must be positive.
/// * `kernel_radius` - Half-width of the kernel window.
/// * `workers` - Number of row partitions to process concurrently; must be
///   at least 1 (counts beyond the row count are clamped).
pub fn gaussian_blur_direct<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    std_dev: f32,
    kernel_radius: usize,
    workers: usize,
) -> Result<(), FilterError>
where
    T: PixelCast,
{
    if workers == 0 {
        return Err(FilterError::InvalidWorkerCount(0));
    }

    let kernel = gaussian_kernel_2d(std_dev, kernel_radius)?;
    log::debug!(
        "direct gaussian blur: std_dev={std_dev}, radius={kernel_radius}, workers={workers}"
    );
    convolution::convolve_2d(src, dst, &kernel, ExecutionStrategy::Workers(workers))
}

/// Blur an image with a separable Gaussian using the default strategy.
///
/// See [`gaussian_blur_with_strategy`].
pub fn gaussian_blur<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    sigma: f32,
) -> Result<(), FilterError>
where
    T: PixelCast,
{
    gaussian_blur_with_strategy(src, dst, sigma, ExecutionStrategy::Auto)
}

/// Blur an image with a separable Gaussian: one horizontal and one vertical
/// 1D pass over a kernel derived from `sigma`.
pub fn gaussian_blur_with_strategy<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    sigma: f32,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError>
where
    T: PixelCast,
{
    let kernel = gaussian_kernel_1d(sigma)?;
    log::debug!(
        "separable gaussian blur: sigma={sigma}, radius={}, strategy={strategy:?}",
        kernel.radius()
    );
    separable::separable_filter(src, dst, &kernel, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glaze_image::ImageSize;

    #[test]
    fn direct_blur_smooths_an_impulse() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let mut data = vec![0u8; 5 * 5 * 4];
        // white, opaque center pixel
        data[(2 * 5 + 2) * 4..(2 * 5 + 2) * 4 + 4].copy_from_slice(&[255, 255, 255, 255]);
        let src = Image::<u8, 4>::new(size, data)?;
        let mut dst = Image::from_size_val(size, 0u8)?;

        gaussian_blur_direct(&src, &mut dst, 1.0, 1, 2)?;

        assert!(*dst.get(2, 2, 0)? < 255);
        assert!(*dst.get(2, 2, 0)? > 0);
        assert!(*dst.get(1, 2, 0)? > 0);
        assert!(*dst.get(2, 1, 0)? > 0);
        // corners lie outside the radius-1 window of the impulse
        assert_eq!(*dst.get(0, 0, 0)?, 0);
        assert_eq!(*dst.get(4, 4, 0)?, 0);
        Ok(())
    }

    #[test]
    fn direct_blur_validates_parameters() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let src = Image::<u8, 4>::from_size_val(size, 0)?;
        let mut dst = Image::from_size_val(size, 0u8)?;

        assert_eq!(
            gaussian_blur_direct(&src, &mut dst, 0.0, 1, 2),
            Err(FilterError::InvalidSigma(0.0))
        );
        assert_eq!(
            gaussian_blur_direct(&src, &mut dst, 1.0, 1, 0),
            Err(FilterError::InvalidWorkerCount(0))
        );
        Ok(())
    }

    #[test]
    fn separable_blur_validates_sigma() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let src = Image::<u8, 4>::from_size_val(size, 0)?;
        let mut dst = Image::from_size_val(size, 0u8)?;

        assert_eq!(
            gaussian_blur(&src, &mut dst, -1.0),
            Err(FilterError::InvalidSigma(-1.0))
        );
        Ok(())
    }

    #[test]
    fn separable_blur_runs_end_to_end() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 16,
            height: 16,
        };
        let data: Vec<u8> = (0..16 * 16 * 4).map(|i| (i % 256) as u8).collect();
        let src = Image::<u8, 4>::new(size, data)?;
        let mut dst = Image::from_size_val(size, 0u8)?;

        gaussian_blur(&src, &mut dst, 1.2)?;
        assert_ne!(dst.as_slice(), src.as_slice());
        Ok(())
    }
}
