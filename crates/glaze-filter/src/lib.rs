#![deny(missing_docs)]
//! Gaussian and bilateral smoothing over canonical image buffers,
//! parallelized across disjoint row partitions.

/// Edge-preserving bilateral filtering.
pub mod bilateral;

/// Direct 2D convolution.
pub mod convolution;

/// Error types for the filtering engine.
pub mod error;

/// Gaussian kernel generation.
pub mod kernels;

/// High-level blur entry points.
pub mod ops;

/// Fork-join dispatch of row partitions.
pub mod parallel;

/// Splitting an extent into disjoint worker ranges.
pub mod partition;

/// Separable two-pass convolution.
pub mod separable;

pub use crate::bilateral::{
    bilateral_filter, bilateral_filter_approx, bilateral_filter_approx_with_strategy,
    bilateral_filter_with_strategy,
};
pub use crate::convolution::convolve_2d;
pub use crate::error::FilterError;
pub use crate::kernels::{
    gaussian_kernel_1d, gaussian_kernel_2d, gaussian_lookup_table, Kernel1d, Kernel2d,
};
pub use crate::ops::{gaussian_blur, gaussian_blur_direct, gaussian_blur_with_strategy};
pub use crate::parallel::ExecutionStrategy;
pub use crate::partition::{partition, PartitionRange};
pub use crate::separable::separable_filter;
