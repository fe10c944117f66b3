//! Discrete Gaussian weight tables.
//!
//! Kernels are computed once per filter invocation and are read-only
//! afterwards. The normalized variants carry the invariant that their weights
//! sum to 1; the magnitude-indexed lookup table used by the bilateral filter
//! is deliberately left unnormalized, since it is consumed as a relative
//! weight rather than a probability distribution.

use crate::error::FilterError;

/// A normalized 1D Gaussian kernel of length `2 * radius + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1d {
    weights: Vec<f32>,
    radius: usize,
}

impl Kernel1d {
    /// Half-width of the kernel.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of taps, `2 * radius + 1`.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the kernel has no taps. Never true for a generated kernel.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The tap weights, ordered from `-radius` to `radius`.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// A normalized square 2D Gaussian kernel with side `2 * radius + 1`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2d {
    weights: Vec<f32>,
    radius: usize,
}

impl Kernel2d {
    /// Build a kernel from precomputed weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernelLength`] unless
    /// `weights.len() == (2 * radius + 1)^2`.
    pub fn from_weights(weights: Vec<f32>, radius: usize) -> Result<Self, FilterError> {
        let side = 2 * radius + 1;
        if weights.len() != side * side {
            return Err(FilterError::InvalidKernelLength(weights.len(), side * side));
        }
        Ok(Self { weights, radius })
    }

    /// Half-width of the kernel.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Side length, `2 * radius + 1`.
    pub fn side(&self) -> usize {
        2 * self.radius + 1
    }

    /// The weight at kernel coordinates `(kx, ky)`, both in `[0, side)`.
    pub fn weight(&self, kx: usize, ky: usize) -> f32 {
        self.weights[ky * self.side() + kx]
    }

    /// The weights in row-major order.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

fn check_sigma(sigma: f32) -> Result<(), FilterError> {
    // also rejects NaN
    if !(sigma > 0.0) {
        return Err(FilterError::InvalidSigma(sigma));
    }
    Ok(())
}

/// Unnormalized 1D Gaussian density at `x`.
fn gaussian(x: f32, sigma: f32) -> f32 {
    (-(x * x) / (2.0 * sigma * sigma)).exp() / (sigma * (2.0 * std::f32::consts::PI).sqrt())
}

/// Create a normalized 2D Gaussian kernel for the given standard deviation
/// and half-width.
///
/// `weight(x, y) = exp(-(x^2 + y^2) / (2 sigma^2)) / (2 pi sigma^2)` for
/// `x, y` in `[-radius, radius]`, then every entry is divided by the matrix
/// sum so the total mass is 1.
pub fn gaussian_kernel_2d(std_dev: f32, radius: usize) -> Result<Kernel2d, FilterError> {
    check_sigma(std_dev)?;

    let side = 2 * radius + 1;
    let sigma_sq = std_dev * std_dev;
    let norm = 2.0 * std::f32::consts::PI * sigma_sq;

    let mut weights = Vec::with_capacity(side * side);
    let mut sum = 0.0;
    for ky in 0..side {
        let y = ky as f32 - radius as f32;
        for kx in 0..side {
            let x = kx as f32 - radius as f32;
            let w = (-(x * x + y * y) / (2.0 * sigma_sq)).exp() / norm;
            weights.push(w);
            sum += w;
        }
    }

    weights.iter_mut().for_each(|w| *w /= sum);
    Kernel2d::from_weights(weights, radius)
}

/// Create a normalized 1D Gaussian kernel for the given standard deviation.
///
/// The half-width is derived from sigma: `ceil(3 sigma)` rounded up to the
/// next even number, so the kernel always has an odd tap count.
pub fn gaussian_kernel_1d(sigma: f32) -> Result<Kernel1d, FilterError> {
    check_sigma(sigma)?;

    let mut radius = (3.0 * sigma).ceil() as usize;
    if radius % 2 == 1 {
        radius += 1;
    }

    let mut weights: Vec<f32> = (0..2 * radius + 1)
        .map(|i| gaussian(i as f32 - radius as f32, sigma))
        .collect();

    let sum: f32 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= sum);

    Ok(Kernel1d { weights, radius })
}

/// Create a magnitude-indexed Gaussian lookup table of length `radius + 1`.
///
/// Entry `d` is the Gaussian density at distance `d`. The table is not
/// normalized; the bilateral filter renormalizes per pixel by the weight mass
/// it actually accumulates.
pub fn gaussian_lookup_table(radius: usize, sigma: f32) -> Result<Vec<f32>, FilterError> {
    check_sigma(sigma)?;

    Ok((0..=radius).map(|d| gaussian(d as f32, sigma)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kernel_1d_sums_to_one() -> Result<(), FilterError> {
        for sigma in [0.3, 0.5, 1.0, 1.7, 3.0, 8.5] {
            let kernel = gaussian_kernel_1d(sigma)?;
            let sum: f32 = kernel.weights().iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn kernel_1d_radius_is_even() -> Result<(), FilterError> {
        // ceil(3 * 1.0) = 3, rounded up to 4
        let kernel = gaussian_kernel_1d(1.0)?;
        assert_eq!(kernel.radius(), 4);
        assert_eq!(kernel.len(), 9);

        // ceil(3 * 0.5) = 2, already even
        let kernel = gaussian_kernel_1d(0.5)?;
        assert_eq!(kernel.radius(), 2);
        assert_eq!(kernel.len(), 5);

        Ok(())
    }

    #[test]
    fn kernel_1d_is_symmetric() -> Result<(), FilterError> {
        let kernel = gaussian_kernel_1d(1.3)?;
        let w = kernel.weights();
        for i in 0..kernel.radius() {
            assert_relative_eq!(w[i], w[w.len() - 1 - i], epsilon = 1e-7);
        }
        assert!(w[kernel.radius()] >= w[0]);
        Ok(())
    }

    #[test]
    fn kernel_2d_sums_to_one() -> Result<(), FilterError> {
        for (std_dev, radius) in [(0.8, 1), (1.0, 2), (2.5, 5), (4.0, 0)] {
            let kernel = gaussian_kernel_2d(std_dev, radius)?;
            let sum: f32 = kernel.weights().iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
            assert_eq!(kernel.side(), 2 * radius + 1);
        }
        Ok(())
    }

    #[test]
    fn kernel_2d_center_is_max() -> Result<(), FilterError> {
        let kernel = gaussian_kernel_2d(1.0, 2)?;
        let center = kernel.weight(2, 2);
        for &w in kernel.weights() {
            assert!(w <= center);
            assert!(w >= 0.0);
        }
        Ok(())
    }

    #[test]
    fn lookup_table_is_monotonic_and_unnormalized() -> Result<(), FilterError> {
        let table = gaussian_lookup_table(5, 1.0)?;
        assert_eq!(table.len(), 6);
        assert_relative_eq!(
            table[0],
            1.0 / (2.0 * std::f32::consts::PI).sqrt(),
            epsilon = 1e-6
        );
        for d in 1..table.len() {
            assert!(table[d] < table[d - 1]);
        }
        Ok(())
    }

    #[test]
    fn non_positive_sigma_is_rejected() {
        assert_eq!(
            gaussian_kernel_1d(0.0),
            Err(FilterError::InvalidSigma(0.0))
        );
        assert_eq!(
            gaussian_kernel_2d(-1.5, 3),
            Err(FilterError::InvalidSigma(-1.5))
        );
        assert!(gaussian_lookup_table(3, f32::NAN).is_err());
    }

    #[test]
    fn from_weights_validates_length() {
        assert_eq!(
            Kernel2d::from_weights(vec![1.0; 8], 1),
            Err(FilterError::InvalidKernelLength(8, 9))
        );
        assert!(Kernel2d::from_weights(vec![1.0; 9], 1).is_ok());
    }
}
